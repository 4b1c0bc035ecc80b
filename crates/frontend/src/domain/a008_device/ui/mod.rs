//! Device service intake form. Brand, model and IMEI only apply to phones.

use contracts::domain::a008_device::aggregate::{DeviceServiceDraft, MOBILE_PHONE};
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::domain::a010_user::ui::{UserPicker, UserPickerItem};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::gateway::{self, WriteMethod};

const DEVICE_TYPES: &[&str] = &[MOBILE_PHONE, "laptop", "tablet", "television", "other"];

#[component]
pub fn DeviceServiceForm() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(DeviceServiceDraft::default());
    let customer_name = RwSignal::new(String::new());
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
                let body = gateway::create_body("device", doc);
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
                    ctx.notify_success("service intake recorded");
                    form.set(DeviceServiceDraft::default());
                    customer_name.set(String::new());
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container device-form">
            <div class="details-header">
                <h3>{"Device service intake"}</h3>
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
                                    }
                                />
                            }
                                .into_any()
                        } else {
                            view! {
                                <div class="picked-product">
                                    <span>{customer_name.get()}</span>
                                    <button
                                        class="btn btn-link"
                                        on:click=move |_| {
                                            form.update(|f| f.customer_id.clear());
                                            customer_name.set(String::new());
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
                    <label for="device_type">{"Device type"}</label>
                    <select
                        id="device_type"
                        on:change=move |ev| {
                            form.update(|f| f.device_type = event_target_value(&ev));
                        }
                    >
                        <option value="">{"Select a type"}</option>
                        {DEVICE_TYPES
                            .iter()
                            .map(|t| view! { <option value=*t>{*t}</option> })
                            .collect_view()}
                    </select>
                    <FieldError report=report field="deviceType" />
                </div>

                {move || {
                    (form.get().device_type == MOBILE_PHONE)
                        .then(|| {
                            view! {
                                <div class="form-group">
                                    <label for="brand">{"Brand"}</label>
                                    <input
                                        type="text"
                                        id="brand"
                                        prop:value=move || form.get().brand
                                        on:input=move |ev| {
                                            form.update(|f| f.brand = event_target_value(&ev));
                                        }
                                    />
                                    <FieldError report=report field="brand" />
                                </div>
                                <div class="form-group">
                                    <label for="model">{"Model"}</label>
                                    <input
                                        type="text"
                                        id="model"
                                        prop:value=move || form.get().model
                                        on:input=move |ev| {
                                            form.update(|f| f.model = event_target_value(&ev));
                                        }
                                    />
                                    <FieldError report=report field="model" />
                                </div>
                                <div class="form-group">
                                    <label for="imei">{"IMEI"}</label>
                                    <input
                                        type="text"
                                        id="imei"
                                        prop:value=move || form.get().imei
                                        on:input=move |ev| {
                                            form.update(|f| f.imei = event_target_value(&ev));
                                        }
                                        placeholder="15 digits"
                                        maxlength="15"
                                    />
                                    <FieldError report=report field="imei" />
                                </div>
                            }
                        })
                }}

                <div class="form-group">
                    <label for="problem">{"Problem"}</label>
                    <textarea
                        id="problem"
                        prop:value=move || form.get().problem
                        on:input=move |ev| {
                            form.update(|f| f.problem = event_target_value(&ev));
                        }
                        rows="3"
                    />
                    <FieldError report=report field="problem" />
                </div>

                <div class="form-group">
                    <label for="service_cost">{"Service cost"}</label>
                    <input
                        type="number"
                        id="service_cost"
                        prop:value=move || form.get().service_cost
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| f.service_cost = value);
                        }
                    />
                    <FieldError report=report field="serviceCost" />
                </div>
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=submit disabled=move || loading.get()>
                    {"Record intake"}
                </button>
            </div>
        </div>
    }
}
