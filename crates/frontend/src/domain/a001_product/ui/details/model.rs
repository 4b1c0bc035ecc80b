//! API functions for the product details form.

use contracts::domain::a001_product::aggregate::{stock_correction, ProductDraft};
use contracts::domain::a002_adjustment::aggregate::StockAdjustmentDraft;
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::envelope::Envelope;
use contracts::shared::query::{Condition, QueryDescriptor, Select};
use serde_json::Value;

use crate::shared::gateway::{self, ReadMethod, WriteMethod};

pub struct FetchedProduct {
    pub id: String,
    pub draft: ProductDraft,
    /// Set once the product has purchase history; a zero buying price stops
    /// being acceptable from then on.
    pub edit_locked: bool,
}

fn payload(envelope: Envelope) -> Result<Value, String> {
    if envelope.success {
        Ok(envelope.message)
    } else {
        Err(envelope.error_text())
    }
}

pub async fn fetch_by_id(branch_id: &str, id: &str) -> Result<FetchedProduct, String> {
    let descriptor =
        QueryDescriptor::scoped("product", branch_id, Some(Condition::eq("_id", id)));
    let envelope = gateway::read_or_delete("read", ReadMethod::Get, &descriptor).await?;
    let doc = payload(envelope)?;
    let draft: ProductDraft = serde_json::from_value(doc.clone())
        .map_err(|e| format!("unexpected document shape: {}", e))?;
    Ok(FetchedProduct {
        id: doc["_id"].as_str().unwrap_or(id).to_string(),
        draft,
        edit_locked: doc["editLocked"].as_bool().unwrap_or(false),
    })
}

/// Scanner-driven lookup: load the product carrying this barcode, if any.
pub async fn find_by_barcode(
    branch_id: &str,
    barcode: &str,
) -> Result<Option<FetchedProduct>, String> {
    let descriptor = QueryDescriptor::scoped(
        "product",
        branch_id,
        Some(Condition::eq("barcode", barcode)),
    )
    .with_page(1, 1);
    let envelope = gateway::read_or_delete("list", ReadMethod::Get, &descriptor).await?;
    let docs = payload(envelope)?;
    let Some(doc) = docs.as_array().and_then(|a| a.first()).cloned() else {
        return Ok(None);
    };
    let id = doc["_id"].as_str().unwrap_or_default().to_string();
    let edit_locked = doc["editLocked"].as_bool().unwrap_or(false);
    let draft: ProductDraft = serde_json::from_value(doc)
        .map_err(|e| format!("unexpected document shape: {}", e))?;
    Ok(Some(FetchedProduct {
        id,
        draft,
        edit_locked,
    }))
}

/// Duplicate-name check, excluding the product being edited.
pub async fn name_taken(
    branch_id: &str,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<bool, String> {
    let mut clauses = vec![Condition::eq("name", name.trim())];
    if let Some(id) = exclude_id {
        clauses.push(Condition::ne("_id", id));
    }
    let descriptor =
        QueryDescriptor::scoped("product", branch_id, Some(Condition::and(clauses)))
            .with_select(Select::include(&["_id"]));
    let envelope = gateway::read_or_delete("count", ReadMethod::Get, &descriptor).await?;
    let count = payload(envelope)?;
    Ok(count.as_u64().unwrap_or(0) > 0)
}

/// Create or update the product. On edit, a changed stock figure also writes
/// the derived stock-correction adjustment record.
pub async fn save(
    branch_id: &str,
    user_id: &str,
    product_id: Option<String>,
    draft: &ProductDraft,
    original: Option<&ProductDraft>,
) -> Result<(), String> {
    let scope = BranchScope::new(branch_id);
    match &product_id {
        None => {
            let doc = to_document(draft, &scope, &AuditStamp::on_create(user_id))?;
            let body = gateway::create_body("product", doc);
            let envelope = gateway::create_or_update("create", WriteMethod::Post, &body).await?;
            payload(envelope)?;
        }
        Some(id) => {
            let changes = to_document(draft, &scope, &AuditStamp::on_update(user_id))?;
            let body = gateway::update_body("product", &Condition::eq("_id", id.as_str()), changes);
            let envelope = gateway::create_or_update("update", WriteMethod::Put, &body).await?;
            payload(envelope)?;

            if let Some(original) = original {
                if original.stock != draft.stock {
                    let (kind, delta) = stock_correction(original.stock, draft.stock);
                    let adjustment = StockAdjustmentDraft {
                        product_id: id.clone(),
                        kind,
                        stock_before: original.stock,
                        quantity: delta,
                        description: "stock correction".to_string(),
                    };
                    let doc = to_document(&adjustment, &scope, &AuditStamp::on_create(user_id))?;
                    let body = gateway::create_body("adjustment", doc);
                    let envelope =
                        gateway::create_or_update("create", WriteMethod::Post, &body).await?;
                    payload(envelope)?;
                }
            }
        }
    }
    Ok(())
}
