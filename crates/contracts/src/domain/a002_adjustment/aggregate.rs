use serde::{Deserialize, Serialize};

use crate::shared::validation::{require_positive, require_text, ValidationReport};

/// Direction of a stock adjustment, chosen explicitly by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Increase,
    Decrease,
}

impl Default for AdjustmentKind {
    fn default() -> Self {
        AdjustmentKind::Increase
    }
}

/// Dedicated stock adjustment form: explicit direction plus a delta, unlike
/// the product form's derived correction (see `a001_product::aggregate`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockAdjustmentDraft {
    pub product_id: String,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub stock_before: f64,
    pub quantity: f64,
    pub description: String,
}

impl StockAdjustmentDraft {
    /// Derived stock-after figure. Always computed, even when negative, so
    /// the form can display the number alongside its error.
    pub fn stock_after(&self) -> f64 {
        match self.kind {
            AdjustmentKind::Increase => self.stock_before + self.quantity,
            AdjustmentKind::Decrease => self.stock_before - self.quantity,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "productId", &self.product_id, "product");
        require_positive(&mut report, "quantity", self.quantity, "quantity");
        if self.stock_after() < 0.0 {
            report.push("stockAfter", "stock after adjustment can't be less than 0");
        }
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: AdjustmentKind, before: f64, quantity: f64) -> StockAdjustmentDraft {
        StockAdjustmentDraft {
            product_id: "p1".into(),
            kind,
            stock_before: before,
            quantity,
            description: String::new(),
        }
    }

    #[test]
    fn increase_adds_delta() {
        let d = draft(AdjustmentKind::Increase, 500.0, 100.0);
        assert_eq!(d.stock_after(), 600.0);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn decrease_subtracts_delta() {
        let d = draft(AdjustmentKind::Decrease, 500.0, 100.0);
        assert_eq!(d.stock_after(), 400.0);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn negative_result_blocks_but_still_computes() {
        let d = draft(AdjustmentKind::Decrease, 10.0, 50.0);
        // Derived value still available for display.
        assert_eq!(d.stock_after(), -40.0);
        let report = d.validate().unwrap_err();
        assert_eq!(
            report.message_for("stockAfter"),
            Some("stock after adjustment can't be less than 0")
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let d = draft(AdjustmentKind::Increase, 10.0, 0.0);
        let report = d.validate().unwrap_err();
        assert!(report.message_for("quantity").is_some());
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let d = draft(AdjustmentKind::Decrease, 10.0, 2.0);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "decrease");
        assert_eq!(json["stockBefore"], 10.0);
    }
}
