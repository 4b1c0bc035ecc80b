use serde::{Deserialize, Serialize};

use crate::shared::validation::{require_exact_len, require_text, ValidationReport};

/// Characters per SMS segment.
pub const SEGMENT_LEN: usize = 160;

/// Vendor API key length, fixed by the SMS provider.
pub const API_KEY_LEN: usize = 30;

/// Segment count for a message body. A body of up to 160 characters is
/// exactly one segment, including the empty body.
pub fn segment_count(body_len: usize) -> usize {
    if body_len <= SEGMENT_LEN {
        1
    } else {
        body_len.div_ceil(SEGMENT_LEN)
    }
}

/// Cost of sending one message of `body_len` characters.
pub fn message_cost(body_len: usize, per_message_rate: f64) -> f64 {
    segment_count(body_len) as f64 * per_message_rate
}

/// Cost of the whole campaign across the selected recipients.
pub fn campaign_cost(body_len: usize, per_message_rate: f64, recipient_count: usize) -> f64 {
    message_cost(body_len, per_message_rate) * recipient_count as f64
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageCampaignDraft {
    pub body: String,
    pub recipient_ids: Vec<String>,
    pub api_key: String,
}

impl MessageCampaignDraft {
    pub fn validate(&self) -> Result<(), ValidationReport> {
        let mut report = ValidationReport::new();
        require_text(&mut report, "body", &self.body, "message");
        if self.recipient_ids.is_empty() {
            report.push("recipientIds", "select at least one recipient");
        }
        require_exact_len(&mut report, "apiKey", &self.api_key, API_KEY_LEN, "api key");
        report.into_result()
    }

    pub fn total_cost(&self, per_message_rate: f64) -> f64 {
        campaign_cost(
            self.body.chars().count(),
            per_message_rate,
            self.recipient_ids.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_one_segment() {
        assert_eq!(segment_count(0), 1);
        assert_eq!(segment_count(1), 1);
        assert_eq!(segment_count(160), 1);
    }

    #[test]
    fn long_bodies_round_up() {
        assert_eq!(segment_count(161), 2);
        assert_eq!(segment_count(320), 2);
        assert_eq!(segment_count(321), 3);
    }

    #[test]
    fn campaign_cost_scales_with_recipients() {
        // 200 chars = 2 segments, rate 1.5, 40 recipients
        assert_eq!(campaign_cost(200, 1.5, 40), 120.0);
        assert_eq!(message_cost(200, 1.5), 3.0);
    }

    #[test]
    fn api_key_length_is_enforced() {
        let mut d = MessageCampaignDraft {
            body: "promo".into(),
            recipient_ids: vec!["c1".into()],
            api_key: "short".into(),
        };
        assert!(d.validate().is_err());
        d.api_key = "k".repeat(30);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn empty_recipient_list_is_rejected() {
        let d = MessageCampaignDraft {
            body: "promo".into(),
            recipient_ids: vec![],
            api_key: "k".repeat(30),
        };
        let report = d.validate().unwrap_err();
        assert_eq!(
            report.message_for("recipientIds"),
            Some("select at least one recipient")
        );
    }
}
