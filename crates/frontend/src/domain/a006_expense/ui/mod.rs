//! Expense entry form.

use contracts::domain::a006_expense::aggregate::ExpenseDraft;
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::gateway::{self, WriteMethod};

const FORM_KEY: &str = "a006_expense";

#[component]
pub fn ExpenseForm() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(ExpenseDraft::default());
    let report = RwSignal::new(ValidationReport::new());
    let loading = RwSignal::new(false);

    // Restore a half-typed expense when the user comes back to this page.
    if let Some(state) = ctx.get_form_state(FORM_KEY) {
        if let Ok(draft) = serde_json::from_value::<ExpenseDraft>(state) {
            form.set(draft);
        }
    }
    on_cleanup(move || {
        if let Ok(state) = serde_json::to_value(form.get_untracked()) {
            ctx.set_form_state(FORM_KEY.to_string(), state);
        }
    });

    let submit = move |_| {
        if loading.get_untracked() {
            return;
        }
        let draft = form.get_untracked();
        match draft.validate() {
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
                let body = gateway::create_body("expense", doc);
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
                    ctx.notify_success("expense recorded");
                    form.set(ExpenseDraft::default());
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container expense-form">
            <div class="details-header">
                <h3>{"New expense"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="name">{"Name"}</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || form.get().name
                        on:input=move |ev| {
                            form.update(|f| f.name = event_target_value(&ev));
                        }
                        placeholder="Rent, electricity, ..."
                    />
                    <FieldError report=report field="name" />
                </div>

                <div class="form-group">
                    <label for="amount">{"Amount"}</label>
                    <input
                        type="number"
                        id="amount"
                        prop:value=move || form.get().amount
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| f.amount = value);
                        }
                    />
                    <FieldError report=report field="amount" />
                </div>

                <div class="form-group">
                    <label for="date">{"Date"}</label>
                    <input
                        type="date"
                        id="date"
                        prop:value=move || form.get().date
                        on:input=move |ev| {
                            form.update(|f| f.date = event_target_value(&ev));
                        }
                    />
                    <FieldError report=report field="date" />
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
                </div>
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=submit disabled=move || loading.get()>
                    {"Record expense"}
                </button>
            </div>
        </div>
    }
}
