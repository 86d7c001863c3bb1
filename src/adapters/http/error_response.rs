//! JSON error body shared by every endpoint.

use serde::Serialize;

/// `{"error": ..., "message": ..., "details": [...]}`; the last two only when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_unset_fields() {
        let json = serde_json::to_value(ErrorResponse::new("Conversation not found")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Conversation not found"}));
    }

    #[test]
    fn includes_message_and_details() {
        let json = serde_json::to_value(
            ErrorResponse::new("Validation failed")
                .with_message("Email is required")
                .with_details(vec!["Email is required".to_string()]),
        )
        .unwrap();

        assert_eq!(json["message"], "Email is required");
        assert_eq!(json["details"][0], "Email is required");
    }
}
