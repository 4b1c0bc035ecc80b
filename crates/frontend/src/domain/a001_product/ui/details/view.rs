use super::view_model::ProductDetailsViewModel;
use contracts::domain::a001_product::aggregate::stock_correction;
use contracts::domain::a002_adjustment::aggregate::AdjustmentKind;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::debounce::{Debouncer, LOOKUP_DELAY_MS};
use crate::shared::format::format_quantity;

#[component]
pub fn ProductDetails() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let vm = ProductDetailsViewModel::new();
    let report = vm.report;

    // A `?record=` deep link opens the form in edit mode.
    if let Some(id) = ctx.take_pending_record() {
        vm.load(ctx, id);
    }

    let debouncer = Debouncer::new();
    on_cleanup(move || debouncer.cancel());

    let vm_clone = vm.clone();

    view! {
        <div class="details-container product-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.product_id.get().is_some() { "Edit product" } else { "New product" }
                    }
                </h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="barcode">{"Barcode"}</label>
                    <input
                        type="text"
                        id="barcode"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().barcode
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.barcode = event_target_value(&ev));
                                let vm = vm.clone();
                                debouncer.schedule(LOOKUP_DELAY_MS, move || vm.lookup_barcode(ctx));
                            }
                        }
                        placeholder="Scan or type the barcode"
                    />
                </div>

                <div class="form-group">
                    <label for="name">{"Name"}</label>
                    <input
                        type="text"
                        id="name"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().name
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.name = event_target_value(&ev));
                                vm.name_taken.set(false);
                            }
                        }
                        on:blur={
                            let vm = vm_clone.clone();
                            move |_| vm.check_name(ctx)
                        }
                        placeholder="Product name"
                    />
                    <FieldError report=report field="name" />
                </div>

                <div class="form-group">
                    <label for="stock">{"Stock"}</label>
                    <input
                        type="number"
                        id="stock"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().stock
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev).parse().unwrap_or(0.0);
                                vm.form.update(|f| f.stock = value);
                            }
                        }
                    />
                    <FieldError report=report field="stock" />
                    {
                        let vm = vm_clone.clone();
                        move || {
                            let original = vm.original.get()?;
                            let new_stock = vm.form.get().stock;
                            if new_stock == original.stock {
                                return None;
                            }
                            let (kind, delta) = stock_correction(original.stock, new_stock);
                            let direction = match kind {
                                AdjustmentKind::Increase => "increase",
                                AdjustmentKind::Decrease => "decrease",
                            };
                            Some(view! {
                                <div class="field-hint">
                                    {format!("stock correction: {} by {}", direction, format_quantity(delta))}
                                </div>
                            })
                        }
                    }
                </div>

                <div class="form-group">
                    <label for="buying_price">{"Buying price"}</label>
                    <input
                        type="number"
                        id="buying_price"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().buying_price
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev).parse().unwrap_or(0.0);
                                vm.form.update(|f| f.buying_price = value);
                            }
                        }
                    />
                    <FieldError report=report field="buyingPrice" />
                </div>

                <div class="form-group">
                    <label for="selling_price">{"Selling price"}</label>
                    <input
                        type="number"
                        id="selling_price"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().selling_price
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev).parse().unwrap_or(0.0);
                                vm.form.update(|f| f.selling_price = value);
                            }
                        }
                    />
                    <FieldError report=report field="sellingPrice" />
                </div>

                <div class="form-group">
                    <label for="reorder_stock_level">{"Reorder stock level"}</label>
                    <input
                        type="number"
                        id="reorder_stock_level"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().reorder_stock_level
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev).parse().unwrap_or(0.0);
                                vm.form.update(|f| f.reorder_stock_level = value);
                            }
                        }
                    />
                    <FieldError report=report field="reorderStockLevel" />
                </div>

                <div class="form-group">
                    <label for="position">{"Position"}</label>
                    <input
                        type="text"
                        id="position"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().position
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                vm.form.update(|f| f.position = event_target_value(&ev));
                            }
                        }
                        placeholder="Shelf / aisle"
                    />
                </div>

                <div class="form-group">
                    <label for="cif_rate">{"Cost, insurance and freight (rate)"}</label>
                    <input
                        type="number"
                        id="cif_rate"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().cif_rate
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev).parse().unwrap_or(0.0);
                                vm.form.update(|f| f.cif_rate = value);
                            }
                        }
                    />
                    <FieldError report=report field="cifRate" />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let vm = vm_clone.clone();
                        move |_| vm.save_command(ctx)
                    }
                    disabled={
                        let vm = vm_clone.clone();
                        move || vm.loading.get()
                    }
                >
                    {
                        let vm = vm_clone.clone();
                        move || if vm.product_id.get().is_some() { "Save" } else { "Create" }
                    }
                </button>
            </div>
        </div>
    }
}
