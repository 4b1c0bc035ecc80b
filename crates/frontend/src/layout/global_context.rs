use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Key of the fallback page shown on unknown or denied navigation.
pub const NOT_FOUND_PAGE: &str = "not_found";

/// Navigable pages with the capability string each one is gated by.
pub struct PageDef {
    pub key: &'static str,
    pub title: &'static str,
    pub capability: &'static str,
}

pub const PAGES: &[PageDef] = &[
    PageDef {
        key: "a001_product",
        title: "Products",
        capability: "product",
    },
    PageDef {
        key: "a001_product_import",
        title: "Product import",
        capability: "product",
    },
    PageDef {
        key: "a002_adjustment",
        title: "Stock adjustment",
        capability: "adjustment",
    },
    PageDef {
        key: "a003_purchase",
        title: "Purchases",
        capability: "purchase",
    },
    PageDef {
        key: "a004_sale",
        title: "Sale",
        capability: "sale",
    },
    PageDef {
        key: "a005_debt",
        title: "Debts",
        capability: "debt",
    },
    PageDef {
        key: "a006_expense",
        title: "Expenses",
        capability: "expense",
    },
    PageDef {
        key: "a007_account",
        title: "Accounts",
        capability: "account",
    },
    PageDef {
        key: "a008_device",
        title: "Devices & services",
        capability: "device",
    },
    PageDef {
        key: "a009_message",
        title: "Messages",
        capability: "message",
    },
    PageDef {
        key: "a010_user",
        title: "Users",
        capability: "user",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Page-level notification shown in the shell header.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
}

/// Per-session application context: tenant scope, current user, settings
/// and transient UI state shared across pages.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub branch_id: RwSignal<String>,
    pub user_id: RwSignal<String>,
    pub capabilities: RwSignal<Vec<String>>,
    /// Configured SMS price per message segment.
    pub per_message_rate: RwSignal<f64>,
    /// Configured fee rate applied to account transfers.
    pub transfer_fee_rate: RwSignal<f64>,
    pub active_page: RwSignal<String>,
    /// Record id carried by a `?record=` deep link, consumed by the page it
    /// opens (the product form fetches it on mount).
    pub pending_record_id: RwSignal<Option<String>>,
    pub notification: RwSignal<Option<Notification>>,
    pub form_states: RwSignal<HashMap<String, serde_json::Value>>,
}

/// Navigation state carried in the URL query string.
#[derive(Debug, Default, PartialEq, serde::Deserialize)]
struct NavParams {
    active: Option<String>,
    record: Option<String>,
}

fn parse_nav_params(search: &str) -> NavParams {
    serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            branch_id: RwSignal::new(String::new()),
            user_id: RwSignal::new(String::new()),
            capabilities: RwSignal::new(vec![]),
            per_message_rate: RwSignal::new(0.0),
            transfer_fee_rate: RwSignal::new(0.0),
            active_page: RwSignal::new(PAGES[0].key.to_string()),
            pending_record_id: RwSignal::new(None),
            notification: RwSignal::new(None),
            form_states: RwSignal::new(HashMap::new()),
        }
    }

    pub fn can(&self, capability: &str) -> bool {
        self.capabilities
            .with_untracked(|caps| caps.iter().any(|c| c == capability))
    }

    /// Activate a page, enforcing its capability. A denied activation lands
    /// on the not-found page with the fixed no-access notification.
    pub fn activate_page(&self, key: &str) {
        let Some(page) = PAGES.iter().find(|p| p.key == key) else {
            self.active_page.set(NOT_FOUND_PAGE.to_string());
            return;
        };
        if !self.can(page.capability) {
            self.notify_error("you have no access to this page");
            self.active_page.set(NOT_FOUND_PAGE.to_string());
            return;
        }
        self.active_page.set(key.to_string());
    }

    pub fn notify_success(&self, text: impl Into<String>) {
        self.notification.set(Some(Notification {
            text: text.into(),
            kind: NotificationKind::Success,
        }));
    }

    pub fn notify_error(&self, text: impl Into<String>) {
        self.notification.set(Some(Notification {
            text: text.into(),
            kind: NotificationKind::Error,
        }));
    }

    pub fn clear_notification(&self) {
        self.notification.set(None);
    }

    /// Consume the deep-linked record id, if any. Single-shot so the form
    /// goes back to create mode on the next visit.
    pub fn take_pending_record(&self) -> Option<String> {
        let id = self.pending_record_id.get_untracked();
        if id.is_some() {
            self.pending_record_id.set(None);
        }
        id
    }

    /// Saved filter/form state, preserved across page switches.
    pub fn get_form_state(&self, form_key: &str) -> Option<serde_json::Value> {
        self.form_states
            .with_untracked(|states| states.get(form_key).cloned())
    }

    pub fn set_form_state(&self, form_key: String, state: serde_json::Value) {
        self.form_states.update(|states| {
            states.insert(form_key, state);
        });
    }

    /// Pick up `?active=<page>` (and an optional `?record=<id>` deep link)
    /// from the URL on startup and mirror the active page back into the
    /// query string afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params = parse_nav_params(&search);
        self.pending_record_id.set(params.record);
        if let Some(active_key) = &params.active {
            self.activate_page(active_key);
        }

        let this = *self;
        Effect::new(move |_| {
            let active = this.active_page.get();
            let query = serde_qs::to_string(&HashMap::from([("active".to_string(), active)]))
                .unwrap_or_default();
            if let Some(w) = window() {
                if let Ok(history) = w.history() {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&format!("?{}", query)),
                    );
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_params_carry_page_and_record() {
        let params = parse_nav_params("?active=a001_product&record=p42");
        assert_eq!(params.active.as_deref(), Some("a001_product"));
        assert_eq!(params.record.as_deref(), Some("p42"));
    }

    #[test]
    fn record_is_optional() {
        let params = parse_nav_params("?active=a004_sale");
        assert_eq!(params.active.as_deref(), Some("a004_sale"));
        assert_eq!(params.record, None);
    }

    #[test]
    fn malformed_query_falls_back_to_defaults() {
        assert_eq!(parse_nav_params(""), NavParams::default());
        assert_eq!(parse_nav_params("?%%%"), NavParams::default());
    }
}
