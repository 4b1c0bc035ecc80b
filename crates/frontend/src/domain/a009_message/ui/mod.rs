//! SMS campaign form with a live segment and cost preview.

use contracts::domain::a009_message::aggregate::{
    message_cost, segment_count, MessageCampaignDraft,
};
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::domain::a010_user::ui::{fetch_users, UserPickerItem};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::format::format_money;
use crate::shared::gateway::{self, WriteMethod};

#[component]
pub fn MessageCampaignForm() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(MessageCampaignDraft::default());
    let customers = RwSignal::new(Vec::<UserPickerItem>::new());
    let report = RwSignal::new(ValidationReport::new());
    let loading = RwSignal::new(false);

    wasm_bindgen_futures::spawn_local(async move {
        let branch_id = ctx.branch_id.get_untracked();
        match fetch_users(&branch_id, "customer").await {
            Ok(rows) => customers.set(rows),
            Err(e) => log::warn!("customer list failed: {}", e),
        }
    });

    let toggle_recipient = move |id: String| {
        form.update(|f| {
            if let Some(pos) = f.recipient_ids.iter().position(|r| r == &id) {
                f.recipient_ids.remove(pos);
            } else {
                f.recipient_ids.push(id);
            }
        });
    };

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
                let body = gateway::create_body("message", doc);
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
                    ctx.notify_success("campaign queued");
                    form.set(MessageCampaignDraft::default());
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container message-form">
            <div class="details-header">
                <h3>{"New SMS campaign"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="body">{"Message"}</label>
                    <textarea
                        id="body"
                        prop:value=move || form.get().body
                        on:input=move |ev| {
                            form.update(|f| f.body = event_target_value(&ev));
                        }
                        rows="4"
                    />
                    <FieldError report=report field="body" />
                    <div class="field-hint">
                        {move || {
                            let draft = form.get();
                            let len = draft.body.chars().count();
                            let rate = ctx.per_message_rate.get();
                            format!(
                                "{} characters, {} segment(s), {} per recipient, total {}",
                                len,
                                segment_count(len),
                                format_money(message_cost(len, rate)),
                                format_money(draft.total_cost(rate)),
                            )
                        }}
                    </div>
                </div>

                <div class="form-group">
                    <label>{"Recipients"}</label>
                    <FieldError report=report field="recipientIds" />
                    <ul class="recipient-list">
                        {move || {
                            let selected = form.get().recipient_ids;
                            customers
                                .get()
                                .into_iter()
                                .map(|customer| {
                                    let id = customer.id.clone();
                                    let checked = selected.contains(&id);
                                    let label = format!(
                                        "{} ({})",
                                        customer.username,
                                        customer.phone_number,
                                    );
                                    view! {
                                        <li>
                                            <label>
                                                <input
                                                    type="checkbox"
                                                    prop:checked=checked
                                                    on:change=move |_| toggle_recipient(id.clone())
                                                />
                                                {label}
                                            </label>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </div>

                <div class="form-group">
                    <label for="api_key">{"Vendor API key"}</label>
                    <input
                        type="text"
                        id="api_key"
                        prop:value=move || form.get().api_key
                        on:input=move |ev| {
                            form.update(|f| f.api_key = event_target_value(&ev));
                        }
                        placeholder="30 characters"
                        maxlength="30"
                    />
                    <FieldError report=report field="apiKey" />
                </div>
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=submit disabled=move || loading.get()>
                    {"Send campaign"}
                </button>
            </div>
        </div>
    }
}
