use super::model;
use contracts::domain::a001_product::aggregate::{normalize_barcode, ProductDraft};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;

/// ViewModel for the product details form.
#[derive(Clone)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductDraft>,
    pub product_id: RwSignal<Option<String>>,
    /// Snapshot taken at load time; a changed stock figure against it
    /// produces the derived stock-correction adjustment on save.
    pub original: RwSignal<Option<ProductDraft>>,
    pub edit_locked: RwSignal<bool>,
    pub report: RwSignal<ValidationReport>,
    /// Out-of-band async duplicate-name check. Submission is blocked while
    /// this is set even when the synchronous report is clean.
    pub name_taken: RwSignal<bool>,
    pub loading: RwSignal<bool>,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProductDraft::default()),
            product_id: RwSignal::new(None),
            original: RwSignal::new(None),
            edit_locked: RwSignal::new(false),
            report: RwSignal::new(ValidationReport::new()),
            name_taken: RwSignal::new(false),
            loading: RwSignal::new(false),
        }
    }

    fn apply_fetched(&self, fetched: model::FetchedProduct) {
        self.product_id.set(Some(fetched.id));
        self.original.set(Some(fetched.draft.clone()));
        self.edit_locked.set(fetched.edit_locked);
        self.form.set(fetched.draft);
        self.report.set(ValidationReport::new());
        self.name_taken.set(false);
    }

    /// Fetch by id on mount (deep-linked edit).
    pub fn load(&self, ctx: AppGlobalContext, id: String) {
        if self.loading.get_untracked() {
            return;
        }
        self.loading.set(true);
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            let result = model::fetch_by_id(&branch_id, &id).await;
            vm.loading.set(false);
            match result {
                Ok(fetched) => vm.apply_fetched(fetched),
                Err(e) => ctx.notify_error(e),
            }
        });
    }

    /// Debounced barcode lookup: an existing product switches the form into
    /// edit mode, an unknown barcode just keeps the typed digits.
    pub fn lookup_barcode(&self, ctx: AppGlobalContext) {
        let barcode = normalize_barcode(&self.form.get_untracked().barcode);
        if barcode.is_empty() {
            return;
        }
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            match model::find_by_barcode(&branch_id, &barcode).await {
                Ok(Some(fetched)) => vm.apply_fetched(fetched),
                Ok(None) => {}
                Err(e) => log::warn!("barcode lookup failed: {}", e),
            }
        });
    }

    /// Async duplicate-name check, run when the name input loses focus.
    pub fn check_name(&self, ctx: AppGlobalContext) {
        let name = self.form.get_untracked().name;
        if name.trim().is_empty() {
            self.name_taken.set(false);
            return;
        }
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            let exclude = vm.product_id.get_untracked();
            match model::name_taken(&branch_id, &name, exclude.as_deref()).await {
                Ok(taken) => vm.name_taken.set(taken),
                Err(e) => log::warn!("duplicate-name check failed: {}", e),
            }
        });
    }

    pub fn save_command(&self, ctx: AppGlobalContext) {
        if self.loading.get_untracked() {
            return;
        }
        let draft = self.form.get_untracked();
        let mut report = match draft.validate(self.edit_locked.get_untracked()) {
            Ok(()) => ValidationReport::new(),
            Err(report) => report,
        };
        if self.name_taken.get_untracked() {
            report.push("name", "a product with this name already exists");
        }
        if !report.ok() {
            self.report.set(report);
            return;
        }
        self.report.set(ValidationReport::new());
        self.loading.set(true);

        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            let user_id = ctx.user_id.get_untracked();
            let product_id = vm.product_id.get_untracked();
            let original = vm.original.get_untracked();
            let result = model::save(
                &branch_id,
                &user_id,
                product_id,
                &draft,
                original.as_ref(),
            )
            .await;
            vm.loading.set(false);
            match result {
                Ok(()) => {
                    ctx.notify_success("product saved");
                    vm.form.set(ProductDraft::default());
                    vm.product_id.set(None);
                    vm.original.set(None);
                    vm.edit_locked.set(false);
                    vm.name_taken.set(false);
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    }
}

impl Default for ProductDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
