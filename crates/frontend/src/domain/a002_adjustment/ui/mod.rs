//! Stock adjustment form: explicit direction plus a delta against the
//! product's current stock.

use contracts::domain::a002_adjustment::aggregate::{AdjustmentKind, StockAdjustmentDraft};
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::domain::a001_product::ui::ProductPicker;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::format::format_quantity;
use crate::shared::gateway::{self, WriteMethod};

#[component]
pub fn AdjustmentForm() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(StockAdjustmentDraft::default());
    let product_name = RwSignal::new(String::new());
    let report = RwSignal::new(ValidationReport::new());
    let loading = RwSignal::new(false);

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
                let body = gateway::create_body("adjustment", doc);
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
                    ctx.notify_success("stock adjustment recorded");
                    form.set(StockAdjustmentDraft::default());
                    product_name.set(String::new());
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container adjustment-form">
            <div class="details-header">
                <h3>{"Stock adjustment"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label>{"Product"}</label>
                    {move || {
                        if form.get().product_id.is_empty() {
                            view! {
                                <ProductPicker on_selected=move |item: crate::domain::a001_product::ui::ProductPickerItem| {
                                    form.update(|f| {
                                        f.product_id = item.id.clone();
                                        f.stock_before = item.stock;
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
                                            form.update(|f| {
                                                f.product_id.clear();
                                                f.stock_before = 0.0;
                                            });
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
                    <label for="kind">{"Direction"}</label>
                    <select
                        id="kind"
                        on:change=move |ev| {
                            let kind = match event_target_value(&ev).as_str() {
                                "decrease" => AdjustmentKind::Decrease,
                                _ => AdjustmentKind::Increase,
                            };
                            form.update(|f| f.kind = kind);
                        }
                    >
                        <option value="increase">{"Increase"}</option>
                        <option value="decrease">{"Decrease"}</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="quantity">{"Quantity"}</label>
                    <input
                        type="number"
                        id="quantity"
                        prop:value=move || form.get().quantity
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| f.quantity = value);
                        }
                    />
                    <FieldError report=report field="quantity" />
                </div>

                <div class="form-group">
                    <label>{"Stock before"}</label>
                    <span class="readonly-value">
                        {move || format_quantity(form.get().stock_before)}
                    </span>
                </div>

                <div class="form-group">
                    <label>{"Stock after"}</label>
                    // Derived figure is always shown, also when negative.
                    <span class="readonly-value">
                        {move || format_quantity(form.get().stock_after())}
                    </span>
                    <FieldError report=report field="stockAfter" />
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
                    {"Record adjustment"}
                </button>
            </div>
        </div>
    }
}
