use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::domain::a001_product::ui::{ProductDetails, ProductImport};
use crate::domain::a002_adjustment::ui::AdjustmentForm;
use crate::domain::a003_purchase::ui::PurchasePage;
use crate::domain::a004_sale::ui::SaleDetails;
use crate::domain::a005_debt::ui::DebtForm;
use crate::domain::a006_expense::ui::ExpenseForm;
use crate::domain::a007_account::ui::AccountPage;
use crate::domain::a008_device::ui::DeviceServiceForm;
use crate::domain::a009_message::ui::MessageCampaignForm;
use crate::domain::a010_user::ui::UserForm;
use crate::layout::global_context::{AppGlobalContext, PAGES};
use crate::layout::shell::Shell;
use crate::shared::gateway::{self, ReadMethod};
use contracts::shared::query::{Condition, QueryDescriptor};

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new();
    provide_context(ctx);

    bootstrap_session(ctx);
    ctx.init_router_integration();

    view! {
        <Shell>
            <ActivePage />
        </Shell>
    }
}

/// Seed the session context. The shell starts with every page enabled so a
/// slow settings call never blanks the UI; the session read then replaces
/// the grants with the server's capability list, and pages outside it land
/// on not-found with the no-access notification.
fn bootstrap_session(ctx: AppGlobalContext) {
    ctx.capabilities
        .set(PAGES.iter().map(|p| p.capability.to_string()).collect());

    spawn_local(async move {
        let descriptor = QueryDescriptor::cross_branch("setting", Condition::eq("visible", true));
        match gateway::read_or_delete("read", ReadMethod::Get, &descriptor).await {
            Ok(envelope) if envelope.success => {
                let settings = envelope.message;
                if let Some(branch_id) = settings["branchId"].as_str() {
                    ctx.branch_id.set(branch_id.to_string());
                }
                if let Some(user_id) = settings["userId"].as_str() {
                    ctx.user_id.set(user_id.to_string());
                }
                if let Some(rate) = settings["perMessageRate"].as_f64() {
                    ctx.per_message_rate.set(rate);
                }
                if let Some(rate) = settings["transferFeeRate"].as_f64() {
                    ctx.transfer_fee_rate.set(rate);
                }
                if let Some(caps) = session_capabilities(&settings) {
                    ctx.capabilities.set(caps);
                }
            }
            Ok(envelope) => log::warn!("settings read failed: {}", envelope.error_text()),
            Err(e) => log::warn!("settings read failed: {}", e),
        }
    });
}

/// Capability strings granted by the session document. `None` when the
/// document carries no list (the optimistic seed stays in place).
fn session_capabilities(settings: &serde_json::Value) -> Option<Vec<String>> {
    let caps = settings["capabilities"].as_array()?;
    Some(
        caps.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
    )
}

#[component]
fn ActivePage() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        {move || {
            match ctx.active_page.get().as_str() {
                "a001_product" => view! { <ProductDetails /> }.into_any(),
                "a001_product_import" => view! { <ProductImport /> }.into_any(),
                "a002_adjustment" => view! { <AdjustmentForm /> }.into_any(),
                "a003_purchase" => view! { <PurchasePage /> }.into_any(),
                "a004_sale" => view! { <SaleDetails /> }.into_any(),
                "a005_debt" => view! { <DebtForm /> }.into_any(),
                "a006_expense" => view! { <ExpenseForm /> }.into_any(),
                "a007_account" => view! { <AccountPage /> }.into_any(),
                "a008_device" => view! { <DeviceServiceForm /> }.into_any(),
                "a009_message" => view! { <MessageCampaignForm /> }.into_any(),
                "a010_user" => view! { <UserForm /> }.into_any(),
                _ => {
                    view! {
                        <div class="not-found">
                            <h3>"Page not found"</h3>
                        </div>
                    }
                        .into_any()
                }
            }
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_grants_replace_the_seed() {
        let settings = json!({
            "branchId": "b1",
            "capabilities": ["product", "sale"],
        });
        assert_eq!(
            session_capabilities(&settings),
            Some(vec!["product".to_string(), "sale".to_string()])
        );
    }

    #[test]
    fn missing_grant_list_keeps_the_seed() {
        let settings = json!({ "branchId": "b1" });
        assert_eq!(session_capabilities(&settings), None);
    }

    #[test]
    fn non_string_grants_are_skipped() {
        let settings = json!({ "capabilities": ["product", 7, null] });
        assert_eq!(
            session_capabilities(&settings),
            Some(vec!["product".to_string()])
        );
    }
}
