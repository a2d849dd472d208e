//! Visit Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who a visit was attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    Customer,
    Staff,
}

/// A single recognition event (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: i64,
    pub person_id: i64,
    pub person_type: PersonType,
    pub site_id: i64,
    pub timestamp: DateTime<Utc>,
    /// Recogniser confidence in `[0, 1]`
    pub confidence: f64,
}

/// Visit list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_type: Option<PersonType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl VisitQuery {
    /// Most recent visits, up to `limit`
    pub fn recent(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Visits of one customer
    pub fn for_customer(customer_id: i64, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            person_id: Some(customer_id),
            person_type: Some(PersonType::Customer),
            ..Default::default()
        }
    }
}

/// Visit list envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitList {
    #[serde(default)]
    pub visits: Vec<Visit>,
}
