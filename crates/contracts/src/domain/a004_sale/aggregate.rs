use serde::{Deserialize, Serialize};

use crate::shared::query::{Condition, MultiQuery, MultiQueryResult, Select};
use crate::shared::validation::{require_positive, require_text, ValidationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Cash,
    Credit,
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Cash
    }
}

/// One line of the in-memory cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_amount: f64,
    /// Stock known at the time the line was added; checked client-side.
    #[serde(skip)]
    pub available_stock: f64,
}

impl CartLine {
    pub fn recompute(&mut self) {
        self.total_amount = self.quantity * self.unit_price;
    }

    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "productId", &self.product_id, "product");
        require_positive(&mut report, "quantity", self.quantity, "quantity");
        if self.quantity > self.available_stock {
            report.push("quantity", "requested quantity exceeds available stock");
        }
        report.into_result()
    }
}

/// Sum of line totals across the cart.
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(|l| l.total_amount).sum()
}

/// Sale form draft: the cart plus payment status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleDraft {
    pub customer_id: String,
    pub status: SaleStatus,
    pub lines: Vec<CartLine>,
    pub total_amount: f64,
    pub paid_amount: f64,
    #[serde(skip)]
    pub paid_edited: bool,
}

impl SaleDraft {
    pub fn recompute_totals(&mut self) {
        for line in &mut self.lines {
            line.recompute();
        }
        self.total_amount = cart_total(&self.lines);
        if !self.paid_edited {
            self.paid_amount = self.total_amount;
        }
    }

    pub fn set_paid_amount(&mut self, amount: f64) {
        self.paid_edited = true;
        self.paid_amount = amount;
    }

    /// Cart rules plus the credit-sale debt ceiling. The limit applies only
    /// to credit sales and only when the customer has a limit configured
    /// (`debt_limit > 0`); the debt form's equivalent rule has no such
    /// guard, see `a005_debt`.
    pub fn validate(&self, customer_debt: f64, debt_limit: f64) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        if self.lines.is_empty() {
            report.push("lines", "cart is empty");
        }
        for line in &self.lines {
            if let Err(line_report) = line.validate() {
                report.merge(line_report);
            }
        }
        if self.status == SaleStatus::Credit {
            require_text(&mut report, "customerId", &self.customer_id, "customer");
            if debt_limit > 0.0 && customer_debt + self.total_amount > debt_limit {
                report.push("totalAmount", "you have reached your debt limit");
            }
        }
        if self.paid_amount > self.total_amount {
            report.push("paidAmount", "paid amount can't exceed total amount");
        }
        report.into_result()
    }
}

/// Batched check an invoice runs before submission: the referenced quotation
/// must exist and must not already have an invoice. One round trip.
pub fn quotation_check(quotation_id: &str) -> MultiQuery {
    MultiQuery::new()
        .push(
            "quotation",
            Condition::eq("_id", quotation_id),
            Some(Select::include(&["_id"])),
        )
        .push(
            "invoice",
            Condition::eq("quotationId", quotation_id),
            Some(Select::include(&["_id"])),
        )
}

/// Interpret the multi-query outcome of [`quotation_check`].
pub fn quotation_usable(result: &MultiQueryResult) -> Result<(), String> {
    let quotation_found = result.get("quotation").map(|o| o.passed).unwrap_or(false);
    if !quotation_found {
        return Err("quotation does not exist".to_string());
    }
    let invoiced = result.get("invoice").map(|o| o.passed).unwrap_or(false);
    if invoiced {
        return Err("quotation already has an invoice".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::QueryOutcome;

    fn line(quantity: f64, unit_price: f64, available: f64) -> CartLine {
        let mut line = CartLine {
            product_id: "p1".into(),
            name: "soap".into(),
            quantity,
            unit_price,
            available_stock: available,
            ..Default::default()
        };
        line.recompute();
        line
    }

    #[test]
    fn cart_total_sums_lines() {
        let lines = vec![line(2.0, 500.0, 10.0), line(1.0, 250.0, 4.0)];
        assert_eq!(cart_total(&lines), 1250.0);
    }

    #[test]
    fn oversell_is_rejected() {
        let l = line(12.0, 100.0, 10.0);
        let report = l.validate().unwrap_err();
        assert_eq!(
            report.message_for("quantity"),
            Some("requested quantity exceeds available stock")
        );
    }

    #[test]
    fn credit_sale_respects_debt_limit() {
        let mut sale = SaleDraft {
            customer_id: "c1".into(),
            status: SaleStatus::Credit,
            lines: vec![line(20.0, 1000.0, 50.0)],
            ..Default::default()
        };
        sale.recompute_totals();
        assert_eq!(sale.total_amount, 20000.0);

        // 40000 current + 20000 new > 50000 limit
        let report = sale.validate(40000.0, 50000.0).unwrap_err();
        assert_eq!(
            report.message_for("totalAmount"),
            Some("you have reached your debt limit")
        );

        // A smaller sale passes.
        sale.lines = vec![line(5.0, 1000.0, 50.0)];
        sale.recompute_totals();
        assert!(sale.validate(40000.0, 50000.0).is_ok());
    }

    #[test]
    fn limit_ignored_without_configured_ceiling() {
        let mut sale = SaleDraft {
            customer_id: "c1".into(),
            status: SaleStatus::Credit,
            lines: vec![line(20.0, 1000.0, 50.0)],
            ..Default::default()
        };
        sale.recompute_totals();
        assert!(sale.validate(40000.0, 0.0).is_ok());
    }

    #[test]
    fn cash_sale_skips_debt_rule() {
        let mut sale = SaleDraft {
            status: SaleStatus::Cash,
            lines: vec![line(20.0, 1000.0, 50.0)],
            ..Default::default()
        };
        sale.recompute_totals();
        assert!(sale.validate(40000.0, 50000.0).is_ok());
    }

    #[test]
    fn quotation_outcome_interpretation() {
        let mut result = MultiQueryResult::new();
        result.insert(
            "quotation".to_string(),
            QueryOutcome {
                passed: true,
                document: None,
            },
        );
        result.insert(
            "invoice".to_string(),
            QueryOutcome {
                passed: false,
                document: None,
            },
        );
        assert!(quotation_usable(&result).is_ok());

        result.get_mut("invoice").unwrap().passed = true;
        assert_eq!(
            quotation_usable(&result),
            Err("quotation already has an invoice".to_string())
        );
    }
}
