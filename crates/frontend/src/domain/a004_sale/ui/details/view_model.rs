use super::model;
use contracts::domain::a004_sale::aggregate::{CartLine, SaleDraft, SaleStatus};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::domain::a001_product::ui::ProductPickerItem;
use crate::domain::a010_user::ui::UserPickerItem;
use crate::layout::global_context::AppGlobalContext;

/// ViewModel for the sale/cart form.
#[derive(Clone)]
pub struct SaleDetailsViewModel {
    pub form: RwSignal<SaleDraft>,
    pub customer_name: RwSignal<String>,
    /// Running debt and configured limit of the picked customer; inputs to
    /// the credit-sale ceiling rule.
    pub customer_debt: RwSignal<f64>,
    pub debt_limit: RwSignal<f64>,
    /// Non-empty turns the submit into the invoice path, which verifies the
    /// quotation before writing.
    pub quotation_id: RwSignal<String>,
    pub report: RwSignal<ValidationReport>,
    pub loading: RwSignal<bool>,
}

impl SaleDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(SaleDraft::default()),
            customer_name: RwSignal::new(String::new()),
            customer_debt: RwSignal::new(0.0),
            debt_limit: RwSignal::new(0.0),
            quotation_id: RwSignal::new(String::new()),
            report: RwSignal::new(ValidationReport::new()),
            loading: RwSignal::new(false),
        }
    }

    pub fn pick_customer(&self, item: UserPickerItem) {
        self.form.update(|f| f.customer_id = item.id.clone());
        self.customer_name.set(item.username);
        self.customer_debt.set(item.debt);
        self.debt_limit.set(item.debt_limit);
    }

    pub fn clear_customer(&self) {
        self.form.update(|f| f.customer_id.clear());
        self.customer_name.set(String::new());
        self.customer_debt.set(0.0);
        self.debt_limit.set(0.0);
    }

    /// Add a product as a new cart line, or bump the quantity of the line
    /// that already carries it.
    pub fn add_line(&self, item: ProductPickerItem) {
        self.form.update(|f| {
            if let Some(line) = f.lines.iter_mut().find(|l| l.product_id == item.id) {
                line.quantity += 1.0;
            } else {
                f.lines.push(CartLine {
                    product_id: item.id,
                    name: item.name,
                    quantity: 1.0,
                    unit_price: item.selling_price,
                    available_stock: item.stock,
                    ..Default::default()
                });
            }
            f.recompute_totals();
        });
    }

    pub fn set_line_quantity(&self, product_id: &str, quantity: f64) {
        self.form.update(|f| {
            if let Some(line) = f.lines.iter_mut().find(|l| l.product_id == product_id) {
                line.quantity = quantity;
            }
            f.recompute_totals();
        });
    }

    pub fn remove_line(&self, product_id: &str) {
        self.form.update(|f| {
            f.lines.retain(|l| l.product_id != product_id);
            f.recompute_totals();
        });
    }

    pub fn set_status(&self, status: SaleStatus) {
        self.form.update(|f| f.status = status);
    }

    pub fn save_command(&self, ctx: AppGlobalContext) {
        if self.loading.get_untracked() {
            return;
        }
        let mut draft = self.form.get_untracked();
        draft.recompute_totals();
        let debt = self.customer_debt.get_untracked();
        let limit = self.debt_limit.get_untracked();
        match draft.validate(debt, limit) {
            Ok(()) => self.report.set(ValidationReport::new()),
            Err(r) => {
                self.report.set(r);
                return;
            }
        }
        self.loading.set(true);

        let quotation = self.quotation_id.get_untracked().trim().to_string();
        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if !quotation.is_empty() {
                if let Err(e) = model::verify_quotation(&quotation).await {
                    vm.loading.set(false);
                    ctx.notify_error(e);
                    return;
                }
            }
            let branch_id = ctx.branch_id.get_untracked();
            let user_id = ctx.user_id.get_untracked();
            let quotation_ref = (!quotation.is_empty()).then_some(quotation.as_str());
            let result = model::save(&branch_id, &user_id, &draft, quotation_ref).await;
            vm.loading.set(false);
            match result {
                Ok(()) => {
                    ctx.notify_success("sale recorded");
                    vm.form.set(SaleDraft::default());
                    vm.quotation_id.set(String::new());
                    vm.clear_customer();
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    }
}

impl Default for SaleDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
