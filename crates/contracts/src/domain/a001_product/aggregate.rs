use serde::{Deserialize, Serialize};

use crate::domain::a002_adjustment::aggregate::AdjustmentKind;
use crate::shared::validation::{
    require_non_negative, require_positive, require_text, ValidationReport,
};

/// Editable fields of a catalog product. Branch scope and audit stamps are
/// merged in at submit time by `domain::common::to_document`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub barcode: String,
    pub stock: f64,
    pub buying_price: f64,
    pub selling_price: f64,
    pub reorder_stock_level: f64,
    pub position: String,
    pub cif_rate: f64,
}

impl ProductDraft {
    /// Form rules. `edit_locked` is set once the product has purchase
    /// history; from then on a zero buying price is no longer acceptable.
    ///
    /// The duplicate-name check runs asynchronously against the backend and
    /// is the form's responsibility, not part of this report.
    pub fn validate(&self, edit_locked: bool) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "name", &self.name, "name");
        if edit_locked {
            require_positive(&mut report, "buyingPrice", self.buying_price, "buying price");
        } else {
            require_non_negative(&mut report, "buyingPrice", self.buying_price, "buying price");
        }
        require_positive(&mut report, "sellingPrice", self.selling_price, "selling price");
        if self.selling_price < self.buying_price {
            report.push(
                "sellingPrice",
                "selling price can't be less than buying price",
            );
        }
        require_non_negative(&mut report, "stock", self.stock, "stock");
        require_non_negative(
            &mut report,
            "reorderStockLevel",
            self.reorder_stock_level,
            "reorder stock level",
        );
        require_non_negative(&mut report, "cifRate", self.cif_rate, "cif rate");
        report.into_result()
    }
}

/// Barcodes arrive from scanners and spreadsheets with whitespace and
/// punctuation; only the digits are meaningful.
pub fn normalize_barcode(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Stock correction as the product form computes it: the user types the new
/// stock figure and the adjustment is derived from `new - old`, sign giving
/// the direction. The dedicated adjustment form uses an explicit direction
/// selector instead; the two computations are intentionally separate.
pub fn stock_correction(old_stock: f64, new_stock: f64) -> (AdjustmentKind, f64) {
    if new_stock >= old_stock {
        (AdjustmentKind::Increase, new_stock - old_stock)
    } else {
        (AdjustmentKind::Decrease, old_stock - new_stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "sugar 1kg".into(),
            barcode: "6161100530067".into(),
            stock: 25.0,
            buying_price: 1000.0,
            selling_price: 1200.0,
            reorder_stock_level: 5.0,
            position: "A3".into(),
            cif_rate: 0.0,
        }
    }

    #[test]
    fn valid_product_passes() {
        assert!(valid_draft().validate(false).is_ok());
    }

    #[test]
    fn selling_below_buying_is_rejected() {
        let mut draft = valid_draft();
        draft.selling_price = 900.0;
        let report = draft.validate(false).unwrap_err();
        assert_eq!(
            report.message_for("sellingPrice"),
            Some("selling price can't be less than buying price")
        );
    }

    #[test]
    fn zero_buying_price_only_before_edit_lock() {
        let mut draft = valid_draft();
        draft.buying_price = 0.0;
        assert!(draft.validate(false).is_ok());
        assert!(draft.validate(true).is_err());
    }

    #[test]
    fn barcode_keeps_digits_only() {
        assert_eq!(normalize_barcode(" 616-110 0530067\n"), "6161100530067");
        assert_eq!(normalize_barcode("no digits"), "");
    }

    #[test]
    fn correction_direction_follows_sign() {
        assert_eq!(stock_correction(10.0, 16.0), (AdjustmentKind::Increase, 6.0));
        assert_eq!(stock_correction(16.0, 10.0), (AdjustmentKind::Decrease, 6.0));
        assert_eq!(stock_correction(5.0, 5.0), (AdjustmentKind::Increase, 0.0));
    }

    #[test]
    fn draft_round_trips_through_document_json() {
        let draft = valid_draft();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["buyingPrice"], 1000.0);
        let back: ProductDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back, draft);
    }
}
