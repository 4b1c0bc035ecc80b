use serde::{Deserialize, Serialize};

use crate::shared::validation::{
    require_digits, require_non_negative, require_text, ValidationReport,
};

/// Device type that switches on the phone-specific required fields.
pub const MOBILE_PHONE: &str = "mobile_phone";

/// Device taken in for service/repair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceServiceDraft {
    pub customer_id: String,
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub imei: String,
    pub problem: String,
    pub service_cost: f64,
}

impl DeviceServiceDraft {
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "customerId", &self.customer_id, "customer");
        require_text(&mut report, "deviceType", &self.device_type, "device type");
        require_text(&mut report, "problem", &self.problem, "problem");
        require_non_negative(&mut report, "serviceCost", self.service_cost, "service cost");
        // Brand/model/IMEI only exist for phones.
        if self.device_type == MOBILE_PHONE {
            require_text(&mut report, "brand", &self.brand, "brand");
            require_text(&mut report, "model", &self.model, "model");
            require_digits(&mut report, "imei", &self.imei, 15, "imei");
        }
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DeviceServiceDraft {
        DeviceServiceDraft {
            customer_id: "c1".into(),
            device_type: "laptop".into(),
            problem: "won't boot".into(),
            service_cost: 1500.0,
            ..Default::default()
        }
    }

    #[test]
    fn non_phone_skips_phone_fields() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn phone_requires_brand_model_imei() {
        let mut d = base();
        d.device_type = MOBILE_PHONE.into();
        let report = d.validate().unwrap_err();
        assert!(report.message_for("brand").is_some());
        assert!(report.message_for("model").is_some());
        assert!(report.message_for("imei").is_some());

        d.brand = "Samsung".into();
        d.model = "A24".into();
        d.imei = "358917053988280".into();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn imei_must_be_fifteen_digits() {
        let mut d = base();
        d.device_type = MOBILE_PHONE.into();
        d.brand = "Nokia".into();
        d.model = "105".into();
        d.imei = "35891705398828".into();
        let report = d.validate().unwrap_err();
        assert_eq!(
            report.message_for("imei"),
            Some("imei must be exactly 15 digits")
        );
    }
}
