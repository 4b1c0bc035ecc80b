//! Inline validation display shared by every form.

use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

/// First validation message for one field, rendered under its input.
/// Renders nothing while the field is clean.
#[component]
pub fn FieldError(report: RwSignal<ValidationReport>, field: &'static str) -> impl IntoView {
    view! {
        {move || {
            report
                .get()
                .message_for(field)
                .map(|message| {
                    let message = message.to_string();
                    view! { <div class="field-error">{message}</div> }
                })
        }}
    }
}

/// Form-level message block (errors that belong to no single field).
#[component]
pub fn FormNotice(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || {
            message
                .get()
                .map(|text| view! { <div class="error">{text}</div> })
        }}
    }
}
