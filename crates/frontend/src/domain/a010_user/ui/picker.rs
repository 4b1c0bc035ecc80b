//! Role-filtered user picker (customers for sales and debts, suppliers for
//! purchases).

use contracts::shared::query::{Condition, QueryDescriptor, Select, Sort};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FormNotice;
use crate::shared::gateway::{self, ReadMethod};

#[derive(Clone, Debug, PartialEq)]
pub struct UserPickerItem {
    pub id: String,
    pub username: String,
    pub phone_number: String,
    pub debt_limit: f64,
    /// Running balance maintained by the backend on every credit movement.
    pub debt: f64,
}

pub async fn fetch_users(branch_id: &str, role: &str) -> Result<Vec<UserPickerItem>, String> {
    let descriptor = QueryDescriptor::scoped(
        "user",
        branch_id,
        Some(Condition::eq("role", role)),
    )
    .with_select(Select::include(&[
        "_id",
        "username",
        "phoneNumber",
        "debtLimit",
        "debt",
    ]))
    .with_sort(Sort::ascending("username"));
    let envelope = gateway::read_or_delete("list", ReadMethod::Get, &descriptor).await?;
    if !envelope.success {
        return Err(envelope.error_text());
    }
    let docs = envelope.message.as_array().cloned().unwrap_or_default();
    Ok(docs
        .into_iter()
        .filter_map(|doc| {
            Some(UserPickerItem {
                id: doc["_id"].as_str()?.to_string(),
                username: doc["username"].as_str().unwrap_or_default().to_string(),
                phone_number: doc["phoneNumber"].as_str().unwrap_or_default().to_string(),
                debt_limit: doc["debtLimit"].as_f64().unwrap_or(0.0),
                debt: doc["debt"].as_f64().unwrap_or(0.0),
            })
        })
        .collect())
}

#[component]
pub fn UserPicker<F>(role: &'static str, on_selected: F) -> impl IntoView
where
    F: Fn(UserPickerItem) + 'static + Clone + Send,
{
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let (items, set_items) = signal::<Vec<UserPickerItem>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (search_filter, set_search_filter) = signal::<String>(String::new());

    wasm_bindgen_futures::spawn_local(async move {
        let branch_id = ctx.branch_id.get_untracked();
        match fetch_users(&branch_id, role).await {
            Ok(rows) => {
                set_items.set(rows);
                set_error.set(None);
            }
            Err(e) => set_error.set(Some(e)),
        }
    });

    let filtered_items = move || {
        let filter = search_filter.get().to_lowercase();
        items
            .get()
            .into_iter()
            .filter(|item| {
                filter.is_empty()
                    || item.username.to_lowercase().contains(&filter)
                    || item.phone_number.contains(&filter)
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="picker user-picker">
            <input
                type="text"
                class="picker__search"
                prop:value=move || search_filter.get()
                on:input=move |ev| set_search_filter.set(event_target_value(&ev))
                placeholder="Search by name or phone"
            />
            <FormNotice message=error.into() />
            <ul class="picker__list">
                {move || {
                    filtered_items()
                        .into_iter()
                        .map(|item| {
                            let label = format!("{} ({})", item.username, item.phone_number);
                            let on_selected = on_selected.clone();
                            view! {
                                <li
                                    class="picker__item"
                                    on:click=move |_| on_selected(item.clone())
                                >
                                    {label}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
