//! Durable staging of pending bulk-purchase lines in localStorage.
//!
//! The purchase form can stage lines across the session; the staging screen
//! submits them as one bulk-create call and clears the store on success.

use contracts::domain::a003_purchase::aggregate::{PurchaseDraft, STAGING_KEY};
use serde::{Deserialize, Serialize};

/// A staged line with a client-side id so list rendering has a stable key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedPurchase {
    pub id: String,
    pub draft: PurchaseDraft,
}

impl StagedPurchase {
    pub fn new(draft: PurchaseDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            draft,
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn load_staged() -> Vec<StagedPurchase> {
    let Some(storage) = storage() else {
        return vec![];
    };
    storage
        .get_item(STAGING_KEY)
        .ok()
        .flatten()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn save_staged(lines: &[StagedPurchase]) -> Result<(), String> {
    let storage = storage().ok_or("local storage is not available")?;
    let raw = serde_json::to_string(lines).map_err(|e| e.to_string())?;
    storage
        .set_item(STAGING_KEY, &raw)
        .map_err(|_| "failed to write local storage".to_string())
}

/// Append one line; returns the new staged count.
pub fn push_staged(draft: PurchaseDraft) -> Result<usize, String> {
    let mut lines = load_staged();
    lines.push(StagedPurchase::new(draft));
    save_staged(&lines)?;
    Ok(lines.len())
}

pub fn remove_staged(id: &str) -> Result<Vec<StagedPurchase>, String> {
    let mut lines = load_staged();
    lines.retain(|line| line.id != id);
    save_staged(&lines)?;
    Ok(lines)
}

pub fn clear_staged() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(STAGING_KEY);
    }
}
