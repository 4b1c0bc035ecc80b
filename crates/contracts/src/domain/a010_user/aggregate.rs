use serde::{Deserialize, Serialize};

use crate::shared::validation::{
    require_digits, require_non_negative, require_text, ValidationReport,
};

/// Branch user (staff, customer or supplier) managed from the admin screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub username: String,
    pub phone_number: String,
    pub role: String,
    pub debt_limit: f64,
}

impl UserDraft {
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "username", &self.username, "username");
        require_digits(&mut report, "phoneNumber", &self.phone_number, 10, "phone number");
        require_text(&mut report, "role", &self.role, "role");
        require_non_negative(&mut report, "debtLimit", self.debt_limit, "debt limit");
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_user_passes() {
        let d = UserDraft {
            username: "asha".into(),
            phone_number: "0712345678".into(),
            role: "cashier".into(),
            debt_limit: 50000.0,
        };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn phone_must_be_ten_digits() {
        let d = UserDraft {
            username: "asha".into(),
            phone_number: "+255712345678".into(),
            role: "cashier".into(),
            debt_limit: 0.0,
        };
        let report = d.validate().unwrap_err();
        assert_eq!(
            report.message_for("phoneNumber"),
            Some("phone number must be exactly 10 digits")
        );
    }
}
