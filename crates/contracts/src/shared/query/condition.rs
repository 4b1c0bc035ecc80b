//! Structured filter expressions for the generic read/update endpoints.
//!
//! Conditions are built as a small tagged union and serialized to the
//! MongoDB-style JSON the backend expects through a single serializer,
//! instead of string-building per form. serde_json's default map keeps keys
//! ordered, so identical inputs serialize to byte-identical strings.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Comparison operator used both for field-vs-value and field-vs-field tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl CmpOp {
    /// Operator name on the wire.
    pub fn mongo(&self) -> &'static str {
        match self {
            CmpOp::Eq => "$eq",
            CmpOp::Ne => "$ne",
            CmpOp::Lt => "$lt",
            CmpOp::Gt => "$gt",
            CmpOp::LtEq => "$lte",
            CmpOp::GtEq => "$gte",
        }
    }
}

/// Filter expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// `field == value`, serialized as plain equality.
    Eq { field: String, value: Value },
    /// `field <op> value` for the non-equality comparisons.
    Cmp {
        field: String,
        op: CmpOp,
        value: Value,
    },
    /// `field ∈ values` / `field ∉ values`.
    InList {
        field: String,
        values: Vec<Value>,
        negated: bool,
    },
    /// Every branch must hold.
    And { all: Vec<Condition> },
    /// At least one branch must hold.
    Or { any: Vec<Condition> },
    /// Compare two fields of the same document (`$expr`). `as_object_id`
    /// wraps the left side in `$toObjectId` for reference-vs-id joins.
    FieldCmp {
        op: CmpOp,
        left_field: String,
        right_field: String,
        as_object_id: bool,
    },
}

impl Condition {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Cmp {
            field: field.into(),
            op: CmpOp::Ne,
            value: value.into(),
        }
    }

    pub fn cmp(field: impl Into<String>, op: CmpOp, value: impl Into<Value>) -> Self {
        Condition::Cmp {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn not_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Condition::InList {
            field: field.into(),
            values,
            negated: true,
        }
    }

    pub fn and(all: Vec<Condition>) -> Self {
        Condition::And { all }
    }

    pub fn or(any: Vec<Condition>) -> Self {
        Condition::Or { any }
    }

    /// Serialize to the backend's condition JSON.
    pub fn to_mongo(&self) -> Value {
        match self {
            Condition::Eq { field, value } => object(field, value.clone()),
            Condition::Cmp { field, op, value } => {
                object(field, object(op.mongo(), value.clone()))
            }
            Condition::InList {
                field,
                values,
                negated,
            } => {
                let op = if *negated { "$nin" } else { "$in" };
                object(field, object(op, Value::Array(values.clone())))
            }
            Condition::And { all } => {
                json!({ "$and": all.iter().map(|c| c.to_mongo()).collect::<Vec<_>>() })
            }
            Condition::Or { any } => {
                json!({ "$or": any.iter().map(|c| c.to_mongo()).collect::<Vec<_>>() })
            }
            Condition::FieldCmp {
                op,
                left_field,
                right_field,
                as_object_id,
            } => {
                let left = if *as_object_id {
                    json!({ "$toObjectId": format!("${}", left_field) })
                } else {
                    Value::String(format!("${}", left_field))
                };
                let right = Value::String(format!("${}", right_field));
                object("$expr", object(op.mongo(), json!([left, right])))
            }
        }
    }

    /// Serialized condition string, stable across calls for equal inputs.
    pub fn to_mongo_string(&self) -> String {
        self.to_mongo().to_string()
    }
}

/// Single-key JSON object.
fn object(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Tenant scope every non-admin read and update is constrained by:
/// record is visible and belongs to the caller's branch.
pub fn common_condition(branch_id: &str) -> Condition {
    Condition::And {
        all: vec![
            Condition::eq("visible", true),
            Condition::eq("branchId", branch_id),
        ],
    }
}

/// Tenant scope plus one form-specific clause.
pub fn scoped(branch_id: &str, extra: Condition) -> Condition {
    Condition::And {
        all: vec![
            Condition::eq("visible", true),
            Condition::eq("branchId", branch_id),
            extra,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_plain() {
        let c = Condition::eq("name", "sugar");
        assert_eq!(c.to_mongo_string(), r#"{"name":"sugar"}"#);
    }

    #[test]
    fn ne_and_in_use_operators() {
        let c = Condition::not_in(
            "role",
            vec!["user".into(), "supplier".into(), "customer".into()],
        );
        assert_eq!(
            c.to_mongo_string(),
            r#"{"role":{"$nin":["user","supplier","customer"]}}"#
        );
        assert_eq!(
            Condition::ne("status", "credit").to_mongo_string(),
            r#"{"status":{"$ne":"credit"}}"#
        );
    }

    #[test]
    fn field_cmp_serializes_to_expr() {
        let c = Condition::FieldCmp {
            op: CmpOp::Eq,
            left_field: "quotationId".to_string(),
            right_field: "_id".to_string(),
            as_object_id: true,
        };
        assert_eq!(
            c.to_mongo_string(),
            r#"{"$expr":{"$eq":[{"$toObjectId":"$quotationId"},"$_id"]}}"#
        );
    }

    #[test]
    fn common_condition_scopes_by_branch() {
        let c = common_condition("b1");
        assert_eq!(
            c.to_mongo_string(),
            r#"{"$and":[{"visible":true},{"branchId":"b1"}]}"#
        );
    }

    #[test]
    fn serialization_is_idempotent() {
        let build = || {
            scoped(
                "branch-7",
                Condition::and(vec![
                    Condition::eq("customerId", "c9"),
                    Condition::cmp("totalAmount", CmpOp::Gt, 0),
                ]),
            )
            .to_mongo_string()
        };
        assert_eq!(build(), build());
    }
}
