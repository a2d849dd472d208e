//! API error body
//!
//! Failed requests carry a JSON body whose `detail` field holds the
//! human-readable reason. The field comes in three shapes:
//!
//! ```json
//! { "detail": "name required" }
//! { "detail": [{ "loc": ["body", "name"], "msg": "field required" }] }
//! { "detail": { "message": "customer not found" } }
//! ```
//!
//! Some endpoints answer with a top-level `message` instead.

use serde::{Deserialize, Serialize};

/// Error response returned by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The nested `detail` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<DetailItem>),
    Object { message: String },
}

/// One entry of a list-shaped detail (field validation errors)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailItem {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loc: Vec<serde_json::Value>,
}

impl ErrorDetail {
    /// Flatten the detail into a single line; `None` when it carries no text
    pub fn message(&self) -> Option<String> {
        let text = match self {
            Self::Message(m) => m.trim().to_string(),
            Self::Object { message } => message.trim().to_string(),
            Self::Items(items) => items
                .iter()
                .map(|i| i.msg.trim())
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
        };
        (!text.is_empty()).then_some(text)
    }
}

impl ApiErrorBody {
    /// Parse a raw response body. Non-JSON bodies yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Create a body with a plain string detail
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(ErrorDetail::Message(detail.into())),
            message: None,
        }
    }

    /// The human-readable reason, preferring `detail` over `message`
    pub fn reason(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(ErrorDetail::message)
            .or_else(|| {
                self.message
                    .as_deref()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail() {
        let body = ApiErrorBody::parse(r#"{"detail":"name required"}"#).unwrap();
        assert_eq!(body.reason().as_deref(), Some("name required"));
    }

    #[test]
    fn test_list_detail_joins_messages() {
        let body = ApiErrorBody::parse(
            r#"{"detail":[{"loc":["body","name"],"msg":"field required"},{"msg":"invalid email"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.reason().as_deref(),
            Some("field required; invalid email")
        );
    }

    #[test]
    fn test_object_detail() {
        let body = ApiErrorBody::parse(r#"{"detail":{"message":"customer not found"}}"#).unwrap();
        assert_eq!(body.reason().as_deref(), Some("customer not found"));
    }

    #[test]
    fn test_top_level_message_fallback() {
        let body = ApiErrorBody::parse(r#"{"message":"upstream timeout"}"#).unwrap();
        assert_eq!(body.reason().as_deref(), Some("upstream timeout"));
    }

    #[test]
    fn test_missing_or_blank_detail() {
        assert!(ApiErrorBody::parse("{}").unwrap().reason().is_none());
        assert!(
            ApiErrorBody::parse(r#"{"detail":"   "}"#)
                .unwrap()
                .reason()
                .is_none()
        );
        assert!(ApiErrorBody::parse("<html>502</html>").is_none());
    }
}
