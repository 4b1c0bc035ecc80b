//! Read-request composition for the generic `read`/`list`/`count` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::condition::{common_condition, scoped, Condition};

/// Field projection sent as the `select` query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub fields: Vec<String>,
    /// true = include listed fields, false = exclude them.
    pub include: bool,
}

impl Select {
    pub fn include(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            include: true,
        }
    }

    pub fn exclude(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            include: false,
        }
    }

    pub fn to_mongo(&self) -> Value {
        let flag = if self.include { 1 } else { 0 };
        let mut map = Map::new();
        for field in &self.fields {
            map.insert(field.clone(), Value::from(flag));
        }
        Value::Object(map)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort order sent as the `sort` query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Descending,
        }
    }

    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn to_mongo(&self) -> Value {
        let flag = match self.direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        };
        let mut map = Map::new();
        map.insert(self.field.clone(), Value::from(flag));
        Value::Object(map)
    }
}

/// Everything a list/read call needs, composed once and serialized once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub schema: String,
    pub condition: Condition,
    pub select: Option<Select>,
    pub sort: Option<Sort>,
    pub join_foreign_keys: bool,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl QueryDescriptor {
    /// Branch-scoped descriptor: visibility + branch ownership always apply.
    pub fn scoped(schema: &str, branch_id: &str, extra: Option<Condition>) -> Self {
        let condition = match extra {
            Some(clause) => scoped(branch_id, clause),
            None => common_condition(branch_id),
        };
        Self {
            schema: schema.to_string(),
            condition,
            select: None,
            sort: None,
            join_foreign_keys: false,
            page: None,
            limit: None,
        }
    }

    /// Admin cross-branch descriptor; the tenant clause is deliberately
    /// omitted. Callers opt into this explicitly.
    pub fn cross_branch(schema: &str, condition: Condition) -> Self {
        Self {
            schema: schema.to_string(),
            condition,
            select: None,
            sort: None,
            join_foreign_keys: false,
            page: None,
            limit: None,
        }
    }

    pub fn with_select(mut self, select: Select) -> Self {
        self.select = Some(select);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_join(mut self) -> Self {
        self.join_foreign_keys = true;
        self
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// Ordered key/value pairs before URL encoding.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("schema", self.schema.clone()),
            ("condition", self.condition.to_mongo_string()),
        ];
        if let Some(select) = &self.select {
            pairs.push(("select", select.to_mongo().to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.to_mongo().to_string()));
        }
        if self.join_foreign_keys {
            pairs.push(("joinForeignKeys", "true".to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }

    /// URL-encoded query string for GET requests.
    pub fn to_query_string(&self) -> String {
        self.to_query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// One member of a batched multi-query round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTriple {
    pub schema: String,
    pub condition: Condition,
    pub select: Option<Select>,
}

/// Ordered list of independent reads submitted in one call. The response
/// maps each schema name to a pass/fail outcome, so a form can verify, for
/// example, that a quotation exists and has no prior invoice without two
/// round trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiQuery {
    pub queries: Vec<QueryTriple>,
}

impl MultiQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, schema: &str, condition: Condition, select: Option<Select>) -> Self {
        self.queries.push(QueryTriple {
            schema: schema.to_string(),
            condition,
            select,
        });
        self
    }

    /// Request body for `bulk-read`.
    pub fn to_body(&self) -> Value {
        let queries: Vec<Value> = self
            .queries
            .iter()
            .map(|q| {
                let mut map = Map::new();
                map.insert("schema".to_string(), Value::String(q.schema.clone()));
                map.insert("condition".to_string(), q.condition.to_mongo());
                if let Some(select) = &q.select {
                    map.insert("select".to_string(), select.to_mongo());
                }
                Value::Object(map)
            })
            .collect();
        let mut body = Map::new();
        body.insert("queries".to_string(), Value::Array(queries));
        Value::Object(body)
    }
}

/// Per-schema outcome of a multi-query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub passed: bool,
    #[serde(default)]
    pub document: Option<Value>,
}

/// Multi-query response keyed by schema name.
pub type MultiQueryResult = BTreeMap<String, QueryOutcome>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::condition::CmpOp;

    #[test]
    fn scoped_descriptor_carries_tenant_clause() {
        let descriptor = QueryDescriptor::scoped("product", "b1", None);
        let pairs = descriptor.to_query_pairs();
        assert_eq!(pairs[0], ("schema", "product".to_string()));
        assert_eq!(
            pairs[1].1,
            r#"{"$and":[{"visible":true},{"branchId":"b1"}]}"#
        );
    }

    #[test]
    fn query_string_is_stable_for_equal_inputs() {
        let build = || {
            QueryDescriptor::scoped(
                "debt",
                "b2",
                Some(Condition::cmp("totalAmount", CmpOp::Gt, 0)),
            )
            .with_select(Select::include(&["name", "totalAmount", "customerId"]))
            .with_sort(Sort::descending("createdAt"))
            .with_page(2, 50)
            .to_query_string()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn select_projection_orders_keys() {
        let select = Select::include(&["stock", "name"]);
        // BTreeMap-backed serialization sorts keys.
        assert_eq!(select.to_mongo().to_string(), r#"{"name":1,"stock":1}"#);
    }

    #[test]
    fn query_string_encodes_condition() {
        let qs = QueryDescriptor::scoped("expense", "b1", None).to_query_string();
        assert!(qs.starts_with("schema=expense&condition=%7B%22%24and%22"));
        assert!(!qs.contains('{'));
    }

    #[test]
    fn multi_query_body_preserves_order() {
        let mq = MultiQuery::new()
            .push(
                "quotation",
                Condition::eq("_id", "q1"),
                Some(Select::include(&["_id"])),
            )
            .push("invoice", Condition::eq("quotationId", "q1"), None);
        let body = mq.to_body();
        let queries = body["queries"].as_array().unwrap();
        assert_eq!(queries[0]["schema"], "quotation");
        assert_eq!(queries[1]["schema"], "invoice");
        assert_eq!(queries[1].get("select"), None);
    }
}
