use serde::{Deserialize, Serialize};

use crate::shared::validation::{require_positive, require_text, ValidationReport};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub description: String,
}

impl ExpenseDraft {
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "name", &self.name, "name");
        require_positive(&mut report, "amount", self.amount, "amount");
        require_text(&mut report, "date", &self.date, "date");
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_expense_passes() {
        let d = ExpenseDraft {
            name: "rent".into(),
            amount: 30000.0,
            date: "2026-08-01".into(),
            description: String::new(),
        };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn missing_fields_block_submission() {
        let report = ExpenseDraft::default().validate().unwrap_err();
        assert!(report.message_for("name").is_some());
        assert!(report.message_for("amount").is_some());
        assert!(report.message_for("date").is_some());
    }
}
