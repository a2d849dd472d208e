//! Staff Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Staff member (excluded from customer counts by the recogniser)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    /// Site reference
    pub site_id: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create/update staff payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StaffInput {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    pub site_id: Option<i64>,
    pub is_active: bool,
}

impl Default for StaffInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            site_id: None,
            is_active: true,
        }
    }
}

impl From<&Staff> for StaffInput {
    fn from(s: &Staff) -> Self {
        Self {
            name: s.name.clone(),
            site_id: s.site_id,
            is_active: s.is_active,
        }
    }
}

/// Face enrolment upload for a staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffFaceUpload {
    /// Base64-encoded image bytes (JPEG or PNG)
    pub image_b64: String,
}

/// Result of a face enrolment upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffFaceResult {
    pub staff_id: i64,
    #[serde(default)]
    pub faces_enrolled: i64,
}
