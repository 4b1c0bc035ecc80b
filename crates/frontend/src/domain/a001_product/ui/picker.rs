//! Product picker shared by the movement forms (adjustment, purchase, sale).

use contracts::shared::query::{QueryDescriptor, Select, Sort};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FormNotice;
use crate::shared::format::{format_money, format_quantity};
use crate::shared::gateway::{self, ReadMethod};

#[derive(Clone, Debug, PartialEq)]
pub struct ProductPickerItem {
    pub id: String,
    pub name: String,
    pub stock: f64,
    pub buying_price: f64,
    pub selling_price: f64,
}

async fn fetch_products(branch_id: &str) -> Result<Vec<ProductPickerItem>, String> {
    let descriptor = QueryDescriptor::scoped("product", branch_id, None)
        .with_select(Select::include(&[
            "_id",
            "name",
            "stock",
            "buyingPrice",
            "sellingPrice",
        ]))
        .with_sort(Sort::ascending("name"));
    let envelope = gateway::read_or_delete("list", ReadMethod::Get, &descriptor).await?;
    if !envelope.success {
        return Err(envelope.error_text());
    }
    let docs = envelope.message.as_array().cloned().unwrap_or_default();
    Ok(docs
        .into_iter()
        .filter_map(|doc| {
            Some(ProductPickerItem {
                id: doc["_id"].as_str()?.to_string(),
                name: doc["name"].as_str().unwrap_or_default().to_string(),
                stock: doc["stock"].as_f64().unwrap_or(0.0),
                buying_price: doc["buyingPrice"].as_f64().unwrap_or(0.0),
                selling_price: doc["sellingPrice"].as_f64().unwrap_or(0.0),
            })
        })
        .collect())
}

#[component]
pub fn ProductPicker<F>(on_selected: F) -> impl IntoView
where
    F: Fn(ProductPickerItem) + 'static + Clone + Send,
{
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let (items, set_items) = signal::<Vec<ProductPickerItem>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (search_filter, set_search_filter) = signal::<String>(String::new());

    wasm_bindgen_futures::spawn_local(async move {
        let branch_id = ctx.branch_id.get_untracked();
        match fetch_products(&branch_id).await {
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
            .filter(|item| filter.is_empty() || item.name.to_lowercase().contains(&filter))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="picker product-picker">
            <input
                type="text"
                class="picker__search"
                prop:value=move || search_filter.get()
                on:input=move |ev| set_search_filter.set(event_target_value(&ev))
                placeholder="Search products"
            />
            <FormNotice message=error.into() />
            <ul class="picker__list">
                {move || {
                    filtered_items()
                        .into_iter()
                        .map(|item| {
                            let label = format!(
                                "{} (stock {}, price {})",
                                item.name,
                                format_quantity(item.stock),
                                format_money(item.selling_price),
                            );
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
