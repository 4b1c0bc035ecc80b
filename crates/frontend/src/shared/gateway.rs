//! Request gateway: the only code that talks to the generic CRUD backend.
//!
//! Expected failures never throw; every transport or serialization error
//! becomes an `Err(String)` the calling form surfaces as a notification.
//! Callers keep their submit control disabled while a write is in flight,
//! so there is at most one pending write per form.

use contracts::shared::envelope::Envelope;
use contracts::shared::query::{Condition, MultiQuery, MultiQueryResult, QueryDescriptor};
use gloo_net::http::Request;
use serde_json::{Map, Value};

use super::api_utils::api_base;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMethod {
    Get,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    Post,
    Put,
}

/// GET/DELETE against `read`, `list`, `count` or `delete` routes, with the
/// descriptor serialized into the query string.
pub async fn read_or_delete(
    route: &str,
    method: ReadMethod,
    descriptor: &QueryDescriptor,
) -> Result<Envelope, String> {
    let url = format!(
        "{}/api/{}?{}",
        api_base(),
        route,
        descriptor.to_query_string()
    );
    let response = match method {
        ReadMethod::Get => Request::get(&url).send().await,
        ReadMethod::Delete => Request::delete(&url).send().await,
    }
    .map_err(|e| format!("network error: {}", e))?;

    response
        .json::<Envelope>()
        .await
        .map_err(|e| format!("unexpected response: {}", e))
}

/// POST/PUT with a JSON body against `create`, `update` or the
/// schema-specific variants (`product/bulk-create`, ...).
pub async fn create_or_update(
    route: &str,
    method: WriteMethod,
    body: &Value,
) -> Result<Envelope, String> {
    let url = format!("{}/api/{}", api_base(), route);
    let request = match method {
        WriteMethod::Post => Request::post(&url),
        WriteMethod::Put => Request::put(&url),
    };
    let response = request
        .json(body)
        .map_err(|e| format!("failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("network error: {}", e))?;

    response
        .json::<Envelope>()
        .await
        .map_err(|e| format!("unexpected response: {}", e))
}

/// Batched multi-query round trip (`bulk-read`).
pub async fn bulk_read(query: &MultiQuery) -> Result<MultiQueryResult, String> {
    let envelope = create_or_update("bulk-read", WriteMethod::Post, &query.to_body()).await?;
    envelope.decode::<MultiQueryResult>()
}

/// `create` body: schema plus the full document.
pub fn create_body(schema: &str, document: Value) -> Value {
    let mut body = Map::new();
    body.insert("schema".to_string(), Value::String(schema.to_string()));
    body.insert("documentData".to_string(), document);
    Value::Object(body)
}

/// Bulk `create` body: schema plus every staged document.
pub fn bulk_create_body(schema: &str, documents: Vec<Value>) -> Value {
    let mut body = Map::new();
    body.insert("schema".to_string(), Value::String(schema.to_string()));
    body.insert("documentData".to_string(), Value::Array(documents));
    Value::Object(body)
}

/// `update` body: condition picking the record, `$set` patch with the
/// changed fields.
pub fn update_body(schema: &str, condition: &Condition, changes: Value) -> Value {
    let mut set = Map::new();
    set.insert("$set".to_string(), changes);
    let mut body = Map::new();
    body.insert("schema".to_string(), Value::String(schema.to_string()));
    body.insert("condition".to_string(), condition.to_mongo());
    body.insert("newDocumentData".to_string(), Value::Object(set));
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_body_shape() {
        let body = create_body("expense", json!({ "name": "rent" }));
        assert_eq!(body["schema"], "expense");
        assert_eq!(body["documentData"]["name"], "rent");
    }

    #[test]
    fn update_body_wraps_changes_in_set() {
        let body = update_body(
            "product",
            &Condition::eq("_id", "p1"),
            json!({ "stock": 30.0 }),
        );
        assert_eq!(body["condition"], json!({ "_id": "p1" }));
        assert_eq!(body["newDocumentData"]["$set"]["stock"], 30.0);
    }
}
