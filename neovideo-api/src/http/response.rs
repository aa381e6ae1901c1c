// JSON response envelope

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// `{ "success": bool, "message"?: string, "data"?: T }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Envelope carrying only a message.
    pub fn message(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_omits_empty_fields() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(body, json!({"success": true, "data": [1, 2]}));

        let body = serde_json::to_value(ApiResponse::message(false, "nothing to import")).unwrap();
        assert_eq!(body, json!({"success": false, "message": "nothing to import"}));
    }

    #[test]
    fn test_with_message() {
        let body = serde_json::to_value(ApiResponse::ok(7).with_message("deleted")).unwrap();
        assert_eq!(body, json!({"success": true, "message": "deleted", "data": 7}));
    }
}
