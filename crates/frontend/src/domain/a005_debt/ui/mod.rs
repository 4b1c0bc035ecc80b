//! Manual debt entry form.

use contracts::domain::a005_debt::aggregate::DebtDraft;
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::domain::a010_user::ui::{UserPicker, UserPickerItem};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::format::format_money;
use crate::shared::gateway::{self, WriteMethod};

#[component]
pub fn DebtForm() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(DebtDraft::default());
    let customer_name = RwSignal::new(String::new());
    let customer_debt = RwSignal::new(0.0);
    let debt_limit = RwSignal::new(0.0);
    let report = RwSignal::new(ValidationReport::new());
    let loading = RwSignal::new(false);

    let submit = move |_| {
        if loading.get_untracked() {
            return;
        }
        let draft = form.get_untracked();
        // The ceiling here has no limit > 0 guard; a zero-limit customer
        // can't take on manual debt.
        match draft.validate(customer_debt.get_untracked(), debt_limit.get_untracked()) {
            Ok(()) => report.set(ValidationReport::new()),
            Err(r) => {
                report.set(r);
                return;
            }
        }
        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            let user_id = ctx.user_id.get_untracked();
            let result = async {
                let doc = to_document(
                    &draft,
                    &BranchScope::new(&branch_id),
                    &AuditStamp::on_create(&user_id),
                )?;
                let body = gateway::create_body("debt", doc);
                let envelope =
                    gateway::create_or_update("create", WriteMethod::Post, &body).await?;
                if envelope.success {
                    Ok(())
                } else {
                    Err(envelope.error_text())
                }
            }
            .await;
            loading.set(false);
            match result {
                Ok(()) => {
                    ctx.notify_success("debt recorded");
                    form.set(DebtDraft::default());
                    customer_name.set(String::new());
                    customer_debt.set(0.0);
                    debt_limit.set(0.0);
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container debt-form">
            <div class="details-header">
                <h3>{"New debt"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label>{"Customer"}</label>
                    {move || {
                        if form.get().customer_id.is_empty() {
                            view! {
                                <UserPicker
                                    role="customer"
                                    on_selected=move |item: UserPickerItem| {
                                        form.update(|f| f.customer_id = item.id.clone());
                                        customer_name.set(item.username.clone());
                                        customer_debt.set(item.debt);
                                        debt_limit.set(item.debt_limit);
                                    }
                                />
                            }
                                .into_any()
                        } else {
                            let summary = format!(
                                "{} (debt {} / limit {})",
                                customer_name.get(),
                                format_money(customer_debt.get()),
                                format_money(debt_limit.get()),
                            );
                            view! {
                                <div class="picked-product">
                                    <span>{summary}</span>
                                    <button
                                        class="btn btn-link"
                                        on:click=move |_| {
                                            form.update(|f| f.customer_id.clear());
                                            customer_name.set(String::new());
                                            customer_debt.set(0.0);
                                            debt_limit.set(0.0);
                                        }
                                    >
                                        {"change"}
                                    </button>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                    <FieldError report=report field="customerId" />
                </div>

                <div class="form-group">
                    <label for="total_amount">{"Total amount"}</label>
                    <input
                        type="number"
                        id="total_amount"
                        prop:value=move || form.get().total_amount
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| f.total_amount = value);
                        }
                    />
                    <FieldError report=report field="totalAmount" />
                </div>

                <div class="form-group">
                    <label for="paid_amount">{"Paid amount"}</label>
                    <input
                        type="number"
                        id="paid_amount"
                        prop:value=move || form.get().paid_amount
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| f.paid_amount = value);
                        }
                    />
                    <FieldError report=report field="paidAmount" />
                </div>

                <div class="form-group">
                    <label for="description">{"Description"}</label>
                    <textarea
                        id="description"
                        prop:value=move || form.get().description
                        on:input=move |ev| {
                            form.update(|f| f.description = event_target_value(&ev));
                        }
                        rows="3"
                    />
                    <FieldError report=report field="description" />
                </div>

                <div class="form-group">
                    <label for="due_date">{"Due date"}</label>
                    <input
                        type="date"
                        id="due_date"
                        prop:value=move || form.get().due_date
                        on:input=move |ev| {
                            form.update(|f| f.due_date = event_target_value(&ev));
                        }
                    />
                </div>
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=submit disabled=move || loading.get()>
                    {"Record debt"}
                </button>
            </div>
        </div>
    }
}
