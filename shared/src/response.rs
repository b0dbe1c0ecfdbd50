//! API response types
//!
//! Successful responses are the bare record (or array of records); only
//! deletes and the health check have their own envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{ "message": "...", "<entity>": { ...deleted record... } }`
///
/// The record key is the camelCase singular entity name (`order`,
/// `menuItem`, ...), so the shape is built as a map.
pub fn deleted<T: Serialize>(entity_key: &str, label: &str, record: &T) -> Value {
    let mut body = Map::new();
    body.insert(
        "message".to_string(),
        Value::String(format!("{label} deleted successfully")),
    );
    body.insert(
        entity_key.to_string(),
        serde_json::to_value(record).unwrap_or(Value::Null),
    );
    Value::Object(body)
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Item {
        id: i64,
        unit_price: f64,
    }

    #[test]
    fn test_deleted_shape() {
        let body = deleted("menuItem", "Menu item", &Item { id: 3, unit_price: 9.5 });
        assert_eq!(body["message"], "Menu item deleted successfully");
        assert_eq!(body["menuItem"]["id"], 3);
        assert_eq!(body["menuItem"]["unitPrice"], 9.5);
    }

    #[test]
    fn test_health_serialize() {
        let json = serde_json::to_value(HealthResponse::healthy("0.1.0")).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], "0.1.0");
    }
}
