use serde::{Deserialize, Serialize};

use crate::shared::validation::{
    require_non_negative, require_positive, require_text, ValidationReport,
};

/// Payment account value the `reference` requirement is keyed on.
pub const CASH_IN_HAND: &str = "cash_in_hand";

/// Local-storage key under which pending bulk-purchase lines are staged
/// across a session until the single bulk-create submit.
pub const STAGING_KEY: &str = "purchases";

/// One purchase line, either submitted alone or staged into the bulk list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseDraft {
    pub product_id: String,
    pub supplier_id: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub payment_account: String,
    pub reference: String,
    /// Once the user touches the paid field it stops tracking the total.
    #[serde(skip)]
    pub paid_edited: bool,
}

impl PurchaseDraft {
    /// Recompute derived totals from quantity and unit price. Idempotent;
    /// runs synchronously before every validation pass.
    pub fn recompute_totals(&mut self) {
        self.total_amount = self.quantity * self.unit_price;
        if !self.paid_edited {
            self.paid_amount = self.total_amount;
        }
    }

    /// User override of the paid amount.
    pub fn set_paid_amount(&mut self, amount: f64) {
        self.paid_edited = true;
        self.paid_amount = amount;
    }

    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "productId", &self.product_id, "product");
        require_text(&mut report, "supplierId", &self.supplier_id, "supplier");
        require_positive(&mut report, "quantity", self.quantity, "quantity");
        require_positive(&mut report, "unitPrice", self.unit_price, "unit price");
        require_non_negative(&mut report, "paidAmount", self.paid_amount, "paid amount");
        if self.paid_amount > self.total_amount {
            report.push("paidAmount", "paid amount can't exceed total amount");
        }
        if self.payment_account != CASH_IN_HAND {
            require_text(&mut report, "reference", &self.reference, "reference");
        }
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PurchaseDraft {
        PurchaseDraft {
            product_id: "p1".into(),
            supplier_id: "s1".into(),
            quantity: 10.0,
            unit_price: 1000.0,
            payment_account: CASH_IN_HAND.into(),
            ..Default::default()
        }
    }

    #[test]
    fn totals_derive_and_paid_tracks_total() {
        let mut d = draft();
        d.recompute_totals();
        assert_eq!(d.total_amount, 10000.0);
        assert_eq!(d.paid_amount, 10000.0);

        d.quantity = 12.0;
        d.recompute_totals();
        assert_eq!(d.paid_amount, 12000.0);
    }

    #[test]
    fn paid_stops_tracking_once_edited() {
        let mut d = draft();
        d.recompute_totals();
        d.set_paid_amount(4000.0);
        d.quantity = 20.0;
        d.recompute_totals();
        assert_eq!(d.total_amount, 20000.0);
        assert_eq!(d.paid_amount, 4000.0);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut d = draft();
        d.recompute_totals();
        let snapshot = d.clone();
        d.recompute_totals();
        assert_eq!(d, snapshot);
    }

    #[test]
    fn paid_over_total_is_rejected() {
        let mut d = draft();
        d.recompute_totals();
        d.set_paid_amount(10001.0);
        let report = d.validate().unwrap_err();
        assert_eq!(
            report.message_for("paidAmount"),
            Some("paid amount can't exceed total amount")
        );
    }

    #[test]
    fn reference_required_unless_cash_in_hand() {
        let mut d = draft();
        d.recompute_totals();
        assert!(d.validate().is_ok());

        d.payment_account = "bank_main".into();
        assert!(d.validate().is_err());
        d.reference = "TXN-0042".into();
        assert!(d.validate().is_ok());
    }
}
