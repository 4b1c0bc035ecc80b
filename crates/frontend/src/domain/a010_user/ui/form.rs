//! User administration form.

use contracts::domain::a010_user::aggregate::UserDraft;
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::gateway::{self, WriteMethod};

const ROLES: &[&str] = &["admin", "manager", "cashier", "customer", "supplier"];

#[component]
pub fn UserForm() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(UserDraft::default());
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
                let body = gateway::create_body("user", doc);
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
                    ctx.notify_success("user saved");
                    form.set(UserDraft::default());
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container user-form">
            <div class="details-header">
                <h3>{"New user"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="username">{"Username"}</label>
                    <input
                        type="text"
                        id="username"
                        prop:value=move || form.get().username
                        on:input=move |ev| {
                            form.update(|f| f.username = event_target_value(&ev));
                        }
                    />
                    <FieldError report=report field="username" />
                </div>

                <div class="form-group">
                    <label for="phone_number">{"Phone number"}</label>
                    <input
                        type="text"
                        id="phone_number"
                        prop:value=move || form.get().phone_number
                        on:input=move |ev| {
                            form.update(|f| f.phone_number = event_target_value(&ev));
                        }
                        placeholder="10 digits"
                        maxlength="10"
                    />
                    <FieldError report=report field="phoneNumber" />
                </div>

                <div class="form-group">
                    <label for="role">{"Role"}</label>
                    <select
                        id="role"
                        on:change=move |ev| {
                            form.update(|f| f.role = event_target_value(&ev));
                        }
                    >
                        <option value="">{"Select a role"}</option>
                        {ROLES
                            .iter()
                            .map(|role| view! { <option value=*role>{*role}</option> })
                            .collect_view()}
                    </select>
                    <FieldError report=report field="role" />
                </div>

                <div class="form-group">
                    <label for="debt_limit">{"Debt limit"}</label>
                    <input
                        type="number"
                        id="debt_limit"
                        prop:value=move || form.get().debt_limit
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| f.debt_limit = value);
                        }
                    />
                    <FieldError report=report field="debtLimit" />
                </div>
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=submit disabled=move || loading.get()>
                    {"Create"}
                </button>
            </div>
        </div>
    }
}
