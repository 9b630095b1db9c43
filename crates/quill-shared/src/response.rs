//! The response envelope every endpoint answers with.

use serde::{Deserialize, Serialize};

/// `{ success, data?, error?, details? }`.
///
/// Successful responses carry `data`; failures carry a human-readable
/// `error` and, for validation failures, per-field `details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_omits_error_fields() {
        let body = serde_json::to_value(ApiResponse::ok(json!({"id": 1}))).unwrap();

        assert_eq!(body, json!({"success": true, "data": {"id": 1}}));
    }

    #[test]
    fn failure_omits_data() {
        let body = serde_json::to_value(
            ApiResponse::error("Validation failed").with_details(json!({"slug": ["invalid"]})),
        )
        .unwrap();

        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Validation failed",
                "details": {"slug": ["invalid"]}
            })
        );
    }
}
