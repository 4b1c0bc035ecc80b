use serde::{Deserialize, Serialize};

use crate::shared::validation::{require_positive, require_text, ValidationReport};

/// Manually recorded customer debt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebtDraft {
    pub customer_id: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub description: String,
    pub due_date: String,
}

impl DebtDraft {
    /// Unlike the sale form, the ceiling check here has no `limit > 0`
    /// guard; a customer with a zero limit can't take on manual debt.
    /// The two rules are specified independently.
    pub fn validate(&self, customer_debt: f64, debt_limit: f64) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "customerId", &self.customer_id, "customer");
        require_positive(&mut report, "totalAmount", self.total_amount, "total amount");
        require_text(&mut report, "description", &self.description, "description");
        if customer_debt + self.total_amount > debt_limit {
            report.push("totalAmount", "you have reached your debt limit");
        }
        if self.paid_amount > self.total_amount {
            report.push("paidAmount", "paid amount can't exceed total amount");
        }
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(total: f64) -> DebtDraft {
        DebtDraft {
            customer_id: "c1".into(),
            total_amount: total,
            description: "goods on credit".into(),
            ..Default::default()
        }
    }

    #[test]
    fn limit_scenario() {
        // limit 50000, current debt 40000
        let report = draft(20000.0).validate(40000.0, 50000.0).unwrap_err();
        assert_eq!(
            report.message_for("totalAmount"),
            Some("you have reached your debt limit")
        );
        assert!(draft(5000.0).validate(40000.0, 50000.0).is_ok());
    }

    #[test]
    fn zero_limit_blocks_all_debt() {
        // No > 0 guard here, intentionally diverging from the sale form.
        assert!(draft(100.0).validate(0.0, 0.0).is_err());
    }

    #[test]
    fn required_fields() {
        let mut d = draft(1000.0);
        d.description.clear();
        d.customer_id.clear();
        let report = d.validate(0.0, 50000.0).unwrap_err();
        assert!(report.message_for("customerId").is_some());
        assert!(report.message_for("description").is_some());
    }
}
