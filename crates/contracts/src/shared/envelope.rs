use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform response envelope of the generic CRUD backend.
///
/// `message` carries the fetched document/list on success and a user-facing
/// string on failure. Callers must check `success` before interpreting
/// `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Value,
}

impl Envelope {
    pub fn ok(message: Value) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Value::String(message.into()),
        }
    }

    /// User-facing text for a failed response.
    pub fn error_text(&self) -> String {
        match &self.message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Decode the success payload into a concrete type.
    ///
    /// Returns the failure text when called on an unsuccessful envelope, and
    /// a parse description when the payload does not match `T`. Never panics
    /// on shape mismatch.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, String> {
        if !self.success {
            return Err(self.error_text());
        }
        serde_json::from_value(self.message.clone())
            .map_err(|e| format!("unexpected response shape: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_checks_success_first() {
        let env = Envelope::fail("insufficient stock");
        let decoded: Result<Vec<i32>, String> = env.decode();
        assert_eq!(decoded, Err("insufficient stock".to_string()));
    }

    #[test]
    fn decode_reads_payload() {
        let env = Envelope::ok(json!({ "name": "sugar", "stock": 25 }));
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Doc {
            name: String,
            stock: i64,
        }
        assert_eq!(
            env.decode::<Doc>().unwrap(),
            Doc {
                name: "sugar".into(),
                stock: 25
            }
        );
    }

    #[test]
    fn decode_mismatch_is_an_error_not_a_panic() {
        let env = Envelope::ok(json!("plain text"));
        assert!(env.decode::<Vec<i32>>().is_err());
    }
}
