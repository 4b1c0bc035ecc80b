use super::view_model::SaleDetailsViewModel;
use contracts::domain::a004_sale::aggregate::SaleStatus;
use leptos::prelude::*;

use crate::domain::a001_product::ui::{ProductPicker, ProductPickerItem};
use crate::domain::a010_user::ui::{UserPicker, UserPickerItem};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::format::format_money;

#[component]
pub fn SaleDetails() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let vm = SaleDetailsViewModel::new();
    let report = vm.report;

    let vm_clone = vm.clone();

    view! {
        <div class="details-container sale-details">
            <div class="details-header">
                <h3>{"New sale"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label>{"Cart"}</label>
                    {
                        let vm = vm_clone.clone();
                        view! {
                            <ProductPicker on_selected=move |item: ProductPickerItem| vm.add_line(item) />
                        }
                    }
                    <FieldError report=report field="lines" />
                </div>

                <table class="data-table cart-table">
                    <thead>
                        <tr>
                            <th>{"Product"}</th>
                            <th>{"Quantity"}</th>
                            <th>{"Unit price"}</th>
                            <th>{"Total"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {
                            let vm = vm_clone.clone();
                            move || {
                                vm.form
                                    .get()
                                    .lines
                                    .into_iter()
                                    .map(|line| {
                                        let qty_id = line.product_id.clone();
                                        let rm_id = line.product_id.clone();
                                        let vm_qty = vm.clone();
                                        let vm_rm = vm.clone();
                                        view! {
                                            <tr>
                                                <td>{line.name.clone()}</td>
                                                <td>
                                                    <input
                                                        type="number"
                                                        prop:value=line.quantity
                                                        on:input=move |ev| {
                                                            let value = event_target_value(&ev)
                                                                .parse()
                                                                .unwrap_or(0.0);
                                                            vm_qty.set_line_quantity(&qty_id, value);
                                                        }
                                                    />
                                                </td>
                                                <td>{format_money(line.unit_price)}</td>
                                                <td>{format_money(line.total_amount)}</td>
                                                <td>
                                                    <button
                                                        class="btn btn-link"
                                                        on:click=move |_| vm_rm.remove_line(&rm_id)
                                                    >
                                                        {"remove"}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }
                        }
                    </tbody>
                </table>
                <FieldError report=report field="quantity" />

                <div class="form-group">
                    <label>{"Cart total"}</label>
                    <span class="readonly-value">
                        {
                            let vm = vm_clone.clone();
                            move || format_money(vm.form.get().total_amount)
                        }
                    </span>
                    <FieldError report=report field="totalAmount" />
                </div>

                <div class="form-group">
                    <label for="status">{"Payment status"}</label>
                    <select
                        id="status"
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let status = match event_target_value(&ev).as_str() {
                                    "credit" => SaleStatus::Credit,
                                    _ => SaleStatus::Cash,
                                };
                                vm.set_status(status);
                            }
                        }
                    >
                        <option value="cash">{"Cash"}</option>
                        <option value="credit">{"Credit"}</option>
                    </select>
                </div>

                <div class="form-group">
                    <label>{"Customer"}</label>
                    {
                        let vm = vm_clone.clone();
                        move || {
                            if vm.form.get().customer_id.is_empty() {
                                let vm = vm.clone();
                                view! {
                                    <UserPicker
                                        role="customer"
                                        on_selected=move |item: UserPickerItem| vm.pick_customer(item)
                                    />
                                }
                                    .into_any()
                            } else {
                                let vm = vm.clone();
                                let summary = format!(
                                    "{} (debt {} / limit {})",
                                    vm.customer_name.get(),
                                    format_money(vm.customer_debt.get()),
                                    format_money(vm.debt_limit.get()),
                                );
                                view! {
                                    <div class="picked-product">
                                        <span>{summary}</span>
                                        <button
                                            class="btn btn-link"
                                            on:click=move |_| vm.clear_customer()
                                        >
                                            {"change"}
                                        </button>
                                    </div>
                                }
                                    .into_any()
                            }
                        }
                    }
                    <FieldError report=report field="customerId" />
                </div>

                <div class="form-group">
                    <label for="paid_amount">{"Paid amount"}</label>
                    <input
                        type="number"
                        id="paid_amount"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().paid_amount
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev).parse().unwrap_or(0.0);
                                vm.form.update(|f| f.set_paid_amount(value));
                            }
                        }
                    />
                    <FieldError report=report field="paidAmount" />
                </div>

                <div class="form-group">
                    <label for="quotation_id">{"Quotation (invoice path)"}</label>
                    <input
                        type="text"
                        id="quotation_id"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.quotation_id.get()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.quotation_id.set(event_target_value(&ev))
                        }
                        placeholder="Leave empty for a plain sale"
                    />
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
                    {"Record sale"}
                </button>
            </div>
        </div>
    }
}
