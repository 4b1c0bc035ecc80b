use leptos::prelude::*;

use super::global_context::{AppGlobalContext, NotificationKind, PAGES};

/// Two-pane shell: navigation on the left, the active page in the center,
/// with the notification strip above the content.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="shell">
            <Sidebar />
            <div class="shell__center">
                <NotificationBar />
                {children()}
            </div>
        </div>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <nav class="sidebar">
            {PAGES
                .iter()
                .map(|page| {
                    let key = page.key;
                    view! {
                        <button
                            class="sidebar__item"
                            class:sidebar__item--active=move || ctx.active_page.get() == key
                            on:click=move |_| ctx.activate_page(key)
                        >
                            {page.title}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
fn NotificationBar() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        {move || {
            ctx.notification.get().map(|n| {
                let class = match n.kind {
                    NotificationKind::Success => "notification notification--success",
                    NotificationKind::Error => "notification notification--error",
                };
                view! {
                    <div class=class>
                        <span>{n.text.clone()}</span>
                        <button class="notification__close" on:click=move |_| ctx.clear_notification()>
                            "✕"
                        </button>
                    </div>
                }
            })
        }}
    }
}
