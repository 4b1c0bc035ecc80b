//! Spreadsheet bulk import of products.
//!
//! Header-mapped parse, per-row validation, one bulk-create call for the
//! valid rows and a downloadable CSV report for the rejected ones.

use contracts::domain::a001_product::excel::{map_rows, ImportOutcome, RowError, COLUMNS};
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FormNotice;
use crate::shared::excel_importer::parser::read_excel_from_file;
use crate::shared::excel_importer::{ColumnDef, ExcelData};
use crate::shared::export::{export_to_csv, CsvExportable};
use crate::shared::gateway::{self, WriteMethod};

impl CsvExportable for RowError {
    fn headers() -> Vec<&'static str> {
        vec!["ROW", "REASON"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![self.row.to_string(), self.reason.clone()]
    }
}

fn import_columns() -> Vec<ColumnDef> {
    COLUMNS
        .iter()
        .map(|(field, title)| ColumnDef::new(field, title))
        .collect()
}

#[component]
pub fn ProductImport() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let file_name = RwSignal::new(String::new());
    let missing_columns = RwSignal::new(Vec::<String>::new());
    let outcome = RwSignal::new(None::<ImportOutcome>);
    let parse_error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let on_file_picked = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        outcome.set(None);
        missing_columns.set(vec![]);
        parse_error.set(None);
        file_name.set(file.name());

        wasm_bindgen_futures::spawn_local(async move {
            let raw = match read_excel_from_file(file.clone()).await {
                Ok(raw) => raw,
                Err(e) => {
                    parse_error.set(Some(e));
                    return;
                }
            };
            let data = match ExcelData::from_raw(raw, &import_columns(), file.name()) {
                Ok(data) => data,
                Err(e) => {
                    parse_error.set(Some(e));
                    return;
                }
            };
            if !data.has_all_columns_mapped() {
                missing_columns.set(data.missing_columns());
                return;
            }
            outcome.set(Some(map_rows(&data.rows)));
        });
    };

    let submit = move |_| {
        let Some(current) = outcome.get_untracked() else {
            return;
        };
        if current.valid.is_empty() || loading.get_untracked() {
            return;
        }
        loading.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            let user_id = ctx.user_id.get_untracked();
            let scope = BranchScope::new(&branch_id);
            let stamp = AuditStamp::on_create(&user_id);

            let mut documents = Vec::with_capacity(current.valid.len());
            for draft in &current.valid {
                match to_document(draft, &scope, &stamp) {
                    Ok(doc) => documents.push(doc),
                    Err(e) => {
                        loading.set(false);
                        ctx.notify_error(e);
                        return;
                    }
                }
            }

            let body = gateway::bulk_create_body("product", documents);
            let result = gateway::create_or_update("bulk-create", WriteMethod::Post, &body).await;
            loading.set(false);
            match result {
                Ok(envelope) if envelope.success => {
                    ctx.notify_success(format!("{} products imported", current.valid.len()));
                    outcome.set(None);
                    file_name.set(String::new());
                }
                Ok(envelope) => ctx.notify_error(envelope.error_text()),
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    let download_report = move |_| {
        let Some(current) = outcome.get_untracked() else {
            return;
        };
        if let Err(e) = export_to_csv(&current.failed, "import-errors.csv") {
            ctx.notify_error(e);
        }
    };

    view! {
        <div class="details-container product-import">
            <div class="details-header">
                <h3>{"Product import"}</h3>
            </div>

            <div class="form-group">
                <label for="import_file">{"Spreadsheet file"}</label>
                <input type="file" id="import_file" accept=".xlsx,.xls,.csv" on:change=on_file_picked />
                {move || {
                    let name = file_name.get();
                    (!name.is_empty()).then(|| view! { <div class="field-hint">{name}</div> })
                }}
            </div>

            <FormNotice message=parse_error.into() />

            {move || {
                let missing = missing_columns.get();
                (!missing.is_empty())
                    .then(|| {
                        view! {
                            <div class="error">
                                {format!("missing columns: {}", missing.join(", "))}
                            </div>
                        }
                    })
            }}

            {move || {
                outcome.get().map(|current| {
                    let valid_count = current.valid.len();
                    let failed_count = current.failed.len();
                    view! {
                        <div class="import-summary">
                            <p>{format!("{} rows ready, {} rejected", valid_count, failed_count)}</p>
                            <ul class="import-errors">
                                {current
                                    .failed
                                    .iter()
                                    .map(|e| view! { <li>{format!("row {}: {}", e.row, e.reason)}</li> })
                                    .collect_view()}
                            </ul>
                        </div>
                    }
                })
            }}

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=submit
                    disabled=move || {
                        loading.get()
                            || outcome.get().map(|o| o.valid.is_empty()).unwrap_or(true)
                    }
                >
                    {"Import valid rows"}
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=download_report
                    disabled=move || {
                        outcome.get().map(|o| o.failed.is_empty()).unwrap_or(true)
                    }
                >
                    {"Download error report"}
                </button>
            </div>
        </div>
    }
}
