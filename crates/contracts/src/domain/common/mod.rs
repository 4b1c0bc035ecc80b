use serde::{Deserialize, Serialize};

/// Creator/updater identity plus timestamps, injected right before a draft
/// is sent to the backend. The editable fields of a record never include
/// these, which keeps the fetch → edit → resubmit round trip lossless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditStamp {
    #[serde(rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedBy", skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl AuditStamp {
    /// Stamp for a freshly created record.
    pub fn on_create(user_id: &str) -> Self {
        let now = chrono::Utc::now();
        Self {
            created_by: Some(user_id.to_string()),
            created_at: Some(now),
            updated_by: None,
            updated_at: None,
        }
    }

    /// Stamp for an update of an existing record.
    pub fn on_update(user_id: &str) -> Self {
        Self {
            created_by: None,
            created_at: None,
            updated_by: Some(user_id.to_string()),
            updated_at: Some(chrono::Utc::now()),
        }
    }
}

/// Tenant ownership every branch-scoped record carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchScope {
    pub visible: bool,
    #[serde(rename = "branchId")]
    pub branch_id: String,
}

impl BranchScope {
    pub fn new(branch_id: &str) -> Self {
        Self {
            visible: true,
            branch_id: branch_id.to_string(),
        }
    }
}

/// Merge a serialized draft with its branch scope and audit stamp into the
/// `documentData` write payload.
pub fn to_document<T: Serialize>(
    draft: &T,
    scope: &BranchScope,
    stamp: &AuditStamp,
) -> Result<serde_json::Value, String> {
    let mut doc = match serde_json::to_value(draft) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(_) => return Err("draft did not serialize to an object".to_string()),
        Err(e) => return Err(e.to_string()),
    };
    if let Ok(serde_json::Value::Object(scope_map)) = serde_json::to_value(scope) {
        doc.extend(scope_map);
    }
    if let Ok(serde_json::Value::Object(stamp_map)) = serde_json::to_value(stamp) {
        doc.extend(stamp_map);
    }
    Ok(serde_json::Value::Object(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn document_merges_scope_and_stamp() {
        let doc = to_document(
            &Sample { name: "rent".into() },
            &BranchScope::new("b1"),
            &AuditStamp::on_create("u1"),
        )
        .unwrap();
        assert_eq!(doc["name"], json!("rent"));
        assert_eq!(doc["visible"], json!(true));
        assert_eq!(doc["branchId"], json!("b1"));
        assert_eq!(doc["createdBy"], json!("u1"));
        assert!(doc.get("updatedBy").is_none());
    }
}
