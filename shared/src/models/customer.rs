//! Customer Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer entity (a recognised non-staff visitor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub visit_count: i64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: Option<DateTime<Utc>>,
    /// Avatar image reference (URL or storage path)
    pub avatar_url: Option<String>,
}

impl Customer {
    /// Name shown in tables; unnamed customers fall back to their id
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Customer #{}", self.id),
        }
    }
}

/// Create/update customer payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerInput {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    pub gender: Option<String>,
    #[validate(length(min = 5, max = 32, message = "Phone number must be 5-32 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl From<&Customer> for CustomerInput {
    fn from(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            gender: c.gender.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
        }
    }
}

/// Customer list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Free-text search over name/phone/email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Result of deriving a customer's avatar from recorded visit imagery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackfillResult {
    pub visits_processed: i64,
    #[serde(default)]
    pub face_image_url: Option<String>,
}
