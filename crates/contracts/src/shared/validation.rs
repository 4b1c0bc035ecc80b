//! Field validation primitives shared by every form draft.
//!
//! A draft's `validate()` collects failures into a [`ValidationReport`];
//! submission is permitted only when the report is empty (and no out-of-band
//! async check, such as a duplicate-name lookup, has left an error set on
//! the form).

use serde::{Deserialize, Serialize};

/// One failed rule, addressed to the input it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Accumulated validation outcome of a single draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Inline message for one input, first failure wins.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Convert into the submission outcome the UI branches on.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.ok() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Trimmed-emptiness check for required text fields.
pub fn require_text(report: &mut ValidationReport, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        report.push(field, format!("{} is required", label));
    }
}

/// Strictly positive numeric bound (quantities, amounts).
pub fn require_positive(report: &mut ValidationReport, field: &'static str, value: f64, label: &str) {
    if value <= 0.0 {
        report.push(field, format!("{} must be greater than 0", label));
    }
}

/// Non-negative numeric bound (stock, balances, rates).
pub fn require_non_negative(
    report: &mut ValidationReport,
    field: &'static str,
    value: f64,
    label: &str,
) {
    if value < 0.0 {
        report.push(field, format!("{} can't be less than 0", label));
    }
}

/// Exactly `len` ASCII digits (phone numbers, IMEI).
pub fn require_digits(
    report: &mut ValidationReport,
    field: &'static str,
    value: &str,
    len: usize,
    label: &str,
) {
    let trimmed = value.trim();
    if trimmed.len() != len || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        report.push(field, format!("{} must be exactly {} digits", label, len));
    }
}

/// Exact character count (vendor API keys).
pub fn require_exact_len(
    report: &mut ValidationReport,
    field: &'static str,
    value: &str,
    len: usize,
    label: &str,
) {
    if value.trim().len() != len {
        report.push(field, format!("{} must be exactly {} characters", label, len));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_ok() {
        assert!(ValidationReport::new().ok());
        assert!(ValidationReport::new().into_result().is_ok());
    }

    #[test]
    fn require_text_trims() {
        let mut report = ValidationReport::new();
        require_text(&mut report, "name", "   ", "name");
        assert_eq!(report.message_for("name"), Some("name is required"));
    }

    #[test]
    fn numeric_bounds() {
        let mut report = ValidationReport::new();
        require_positive(&mut report, "quantity", 0.0, "quantity");
        require_non_negative(&mut report, "stock", -1.0, "stock");
        require_non_negative(&mut report, "balance", 0.0, "balance");
        assert_eq!(report.errors().len(), 2);
        assert_eq!(
            report.message_for("quantity"),
            Some("quantity must be greater than 0")
        );
    }

    #[test]
    fn digit_count_rules() {
        let mut report = ValidationReport::new();
        require_digits(&mut report, "phoneNumber", "0712345678", 10, "phone number");
        assert!(report.ok());

        require_digits(&mut report, "phoneNumber", "07123", 10, "phone number");
        require_digits(&mut report, "imei", "35891705398828a", 15, "imei");
        assert_eq!(report.errors().len(), 2);
    }

    #[test]
    fn first_failure_wins_per_field() {
        let mut report = ValidationReport::new();
        report.push("amount", "first");
        report.push("amount", "second");
        assert_eq!(report.message_for("amount"), Some("first"));
    }
}
