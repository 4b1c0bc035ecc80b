//! API functions for the sale form.

use contracts::domain::a004_sale::aggregate::{quotation_check, quotation_usable, SaleDraft};
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use serde_json::Value;

use crate::shared::gateway::{self, WriteMethod};

/// Invoice path: the referenced quotation must exist and must not already
/// have an invoice. One batched round trip.
pub async fn verify_quotation(quotation_id: &str) -> Result<(), String> {
    let result = gateway::bulk_read(&quotation_check(quotation_id)).await?;
    quotation_usable(&result)
}

pub async fn save(
    branch_id: &str,
    user_id: &str,
    draft: &SaleDraft,
    quotation_id: Option<&str>,
) -> Result<(), String> {
    let mut doc = to_document(
        draft,
        &BranchScope::new(branch_id),
        &AuditStamp::on_create(user_id),
    )?;
    if let (Some(id), Value::Object(map)) = (quotation_id, &mut doc) {
        map.insert("quotationId".to_string(), Value::String(id.to_string()));
    }
    let body = gateway::create_body("sale", doc);
    let envelope = gateway::create_or_update("create", WriteMethod::Post, &body).await?;
    if envelope.success {
        Ok(())
    } else {
        Err(envelope.error_text())
    }
}
