//! Purchase entry: a single-line form that either submits immediately or
//! stages the line into the local-storage bulk list, plus the staging screen
//! that submits everything in one bulk-create call.

use contracts::domain::a003_purchase::aggregate::{PurchaseDraft, CASH_IN_HAND};
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::domain::a001_product::ui::{ProductPicker, ProductPickerItem};
use crate::domain::a010_user::ui::{UserPicker, UserPickerItem};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::format::{format_money, format_quantity};
use crate::shared::gateway::{self, WriteMethod};
use crate::shared::staging::{self, StagedPurchase};

#[component]
pub fn PurchasePage() -> impl IntoView {
    let staged = RwSignal::new(staging::load_staged());

    view! {
        <div class="purchase-page">
            <PurchaseForm staged=staged />
            <StagingList staged=staged />
        </div>
    }
}

#[component]
fn PurchaseForm(staged: RwSignal<Vec<StagedPurchase>>) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(PurchaseDraft::default());
    let product_name = RwSignal::new(String::new());
    let supplier_name = RwSignal::new(String::new());
    let report = RwSignal::new(ValidationReport::new());
    let loading = RwSignal::new(false);

    let reset = move || {
        form.set(PurchaseDraft::default());
        product_name.set(String::new());
        supplier_name.set(String::new());
        report.set(ValidationReport::new());
    };

    // Runs validation first; submission and staging share the same gate.
    let validated_draft = move || -> Option<PurchaseDraft> {
        let mut draft = form.get_untracked();
        draft.recompute_totals();
        match draft.validate() {
            Ok(()) => {
                report.set(ValidationReport::new());
                Some(draft)
            }
            Err(r) => {
                report.set(r);
                None
            }
        }
    };

    let submit = move |_| {
        if loading.get_untracked() {
            return;
        }
        let Some(draft) = validated_draft() else {
            return;
        };
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
                let body = gateway::create_body("purchase", doc);
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
                    ctx.notify_success("purchase recorded");
                    reset();
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let stage = move |_| {
        let Some(draft) = validated_draft() else {
            return;
        };
        match staging::push_staged(draft) {
            Ok(count) => {
                staged.set(staging::load_staged());
                ctx.notify_success(format!("staged, {} pending", count));
                reset();
            }
            Err(e) => ctx.notify_error(e),
        }
    };

    view! {
        <div class="details-container purchase-form">
            <div class="details-header">
                <h3>{"New purchase"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label>{"Product"}</label>
                    {move || {
                        if form.get().product_id.is_empty() {
                            view! {
                                <ProductPicker on_selected=move |item: ProductPickerItem| {
                                    form.update(|f| {
                                        f.product_id = item.id.clone();
                                        f.unit_price = item.buying_price;
                                        f.recompute_totals();
                                    });
                                    product_name.set(item.name.clone());
                                } />
                            }
                                .into_any()
                        } else {
                            view! {
                                <div class="picked-product">
                                    <span>{product_name.get()}</span>
                                    <button
                                        class="btn btn-link"
                                        on:click=move |_| {
                                            form.update(|f| f.product_id.clear());
                                            product_name.set(String::new());
                                        }
                                    >
                                        {"change"}
                                    </button>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                    <FieldError report=report field="productId" />
                </div>

                <div class="form-group">
                    <label>{"Supplier"}</label>
                    {move || {
                        if form.get().supplier_id.is_empty() {
                            view! {
                                <UserPicker
                                    role="supplier"
                                    on_selected=move |item: UserPickerItem| {
                                        form.update(|f| f.supplier_id = item.id.clone());
                                        supplier_name.set(item.username.clone());
                                    }
                                />
                            }
                                .into_any()
                        } else {
                            view! {
                                <div class="picked-product">
                                    <span>{supplier_name.get()}</span>
                                    <button
                                        class="btn btn-link"
                                        on:click=move |_| {
                                            form.update(|f| f.supplier_id.clear());
                                            supplier_name.set(String::new());
                                        }
                                    >
                                        {"change"}
                                    </button>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                    <FieldError report=report field="supplierId" />
                </div>

                <div class="form-group">
                    <label for="quantity">{"Quantity"}</label>
                    <input
                        type="number"
                        id="quantity"
                        prop:value=move || form.get().quantity
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| {
                                f.quantity = value;
                                f.recompute_totals();
                            });
                        }
                    />
                    <FieldError report=report field="quantity" />
                </div>

                <div class="form-group">
                    <label for="unit_price">{"Unit price"}</label>
                    <input
                        type="number"
                        id="unit_price"
                        prop:value=move || form.get().unit_price
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| {
                                f.unit_price = value;
                                f.recompute_totals();
                            });
                        }
                    />
                    <FieldError report=report field="unitPrice" />
                </div>

                <div class="form-group">
                    <label>{"Total"}</label>
                    <span class="readonly-value">
                        {move || format_money(form.get().total_amount)}
                    </span>
                </div>

                <div class="form-group">
                    <label for="paid_amount">{"Paid amount"}</label>
                    <input
                        type="number"
                        id="paid_amount"
                        prop:value=move || form.get().paid_amount
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| f.set_paid_amount(value));
                        }
                    />
                    <FieldError report=report field="paidAmount" />
                </div>

                <div class="form-group">
                    <label for="payment_account">{"Payment account"}</label>
                    <select
                        id="payment_account"
                        on:change=move |ev| {
                            form.update(|f| f.payment_account = event_target_value(&ev));
                        }
                    >
                        <option value=CASH_IN_HAND>{"Cash in hand"}</option>
                        <option value="bank_main">{"Main bank account"}</option>
                        <option value="mobile_money">{"Mobile money"}</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="reference">{"Reference"}</label>
                    <input
                        type="text"
                        id="reference"
                        prop:value=move || form.get().reference
                        on:input=move |ev| {
                            form.update(|f| f.reference = event_target_value(&ev));
                        }
                        placeholder="Transaction reference"
                    />
                    <FieldError report=report field="reference" />
                </div>
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=submit disabled=move || loading.get()>
                    {"Submit purchase"}
                </button>
                <button class="btn btn-secondary" on:click=stage disabled=move || loading.get()>
                    {"Add to staging"}
                </button>
            </div>
        </div>
    }
}

#[component]
fn StagingList(staged: RwSignal<Vec<StagedPurchase>>) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let loading = RwSignal::new(false);

    let submit_all = move |_| {
        let lines = staged.get_untracked();
        if lines.is_empty() || loading.get_untracked() {
            return;
        }
        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            let user_id = ctx.user_id.get_untracked();
            let scope = BranchScope::new(&branch_id);
            let stamp = AuditStamp::on_create(&user_id);

            let mut documents = Vec::with_capacity(lines.len());
            for line in &lines {
                match to_document(&line.draft, &scope, &stamp) {
                    Ok(doc) => documents.push(doc),
                    Err(e) => {
                        loading.set(false);
                        ctx.notify_error(e);
                        return;
                    }
                }
            }

            let body = gateway::bulk_create_body("purchase", documents);
            let result = gateway::create_or_update("bulk-create", WriteMethod::Post, &body).await;
            loading.set(false);
            match result {
                Ok(envelope) if envelope.success => {
                    // The store is only cleared after the backend confirms.
                    staging::clear_staged();
                    staged.set(vec![]);
                    ctx.notify_success(format!("{} purchases recorded", lines.len()));
                }
                Ok(envelope) => ctx.notify_error(envelope.error_text()),
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container staging-list">
            <div class="details-header">
                <h3>{move || format!("Staged purchases ({})", staged.get().len())}</h3>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Quantity"}</th>
                        <th>{"Unit price"}</th>
                        <th>{"Total"}</th>
                        <th>{"Paid"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        staged
                            .get()
                            .into_iter()
                            .map(|line| {
                                let id = line.id.clone();
                                view! {
                                    <tr>
                                        <td>{format_quantity(line.draft.quantity)}</td>
                                        <td>{format_money(line.draft.unit_price)}</td>
                                        <td>{format_money(line.draft.total_amount)}</td>
                                        <td>{format_money(line.draft.paid_amount)}</td>
                                        <td>
                                            <button
                                                class="btn btn-link"
                                                on:click=move |_| {
                                                    match staging::remove_staged(&id) {
                                                        Ok(rest) => staged.set(rest),
                                                        Err(e) => ctx.notify_error(e),
                                                    }
                                                }
                                            >
                                                {"remove"}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=submit_all
                    disabled=move || loading.get() || staged.get().is_empty()
                >
                    {"Submit all staged"}
                </button>
            </div>
        </div>
    }
}
