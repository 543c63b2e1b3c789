use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod block;
pub mod document;

// Re-export block types
pub use block::{Block, BlockShape, ChildIds, Column, ParentShape, ROOT_BLOCK_ID};

// Re-export document types
pub use document::{Document, IntegrityIssue};

/// Property value attached to a block (text, colors, paddings, urls...).
///
/// Serialized untagged so layout JSON stays readable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
    Null,
}

impl Value {
    /// Create a Value from a serde_json::Value
    pub fn from_json_value(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Null)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from_json_value).collect())
            }
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from_json_value(v)))
                    .collect(),
            ),
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// Structured error types for document access.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum ApiError {
    #[error("Block not found: {id}")]
    BlockNotFound { id: String },

    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_json() {
        let json = serde_json::json!({
            "text": "Hello",
            "padding": 16,
            "ratio": 0.5,
            "bold": true
        });
        let value = Value::from_json_value(json);
        let obj = match &value {
            Value::Object(obj) => obj,
            other => panic!("expected object, got {:?}", other),
        };

        assert_eq!(obj.get("text").and_then(Value::as_string), Some("Hello"));
        assert_eq!(obj.get("padding").and_then(Value::as_i64), Some(16));
        assert_eq!(obj.get("ratio").and_then(Value::as_f64), Some(0.5));
        assert_eq!(obj.get("bold").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_api_error_messages() {
        let err = ApiError::BlockNotFound {
            id: "block-1".to_string(),
        };
        assert_eq!(err.to_string(), "Block not found: block-1");

        let err = ApiError::InvalidDocument {
            message: "expected object".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid document: expected object");
    }
}
