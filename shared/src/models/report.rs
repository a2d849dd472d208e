//! Visitor Report Model
//!
//! Aggregated server-side; the client only reshapes it for charts.

use serde::{Deserialize, Serialize};

/// Bucket width of a visitor report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

/// One time-period entry of a visitor report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorReportBucket {
    /// Period label as sent by the server (e.g. "2024-05-01")
    pub period: String,
    pub total_visits: i64,
    pub unique_visitors: i64,
    /// Authoritative split, when the server provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_visits: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_visits: Option<i64>,
}

/// Visitor report query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportQuery {
    pub granularity: Granularity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<i64>,
    /// Number of trailing buckets requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ReportQuery {
    /// Daily report over the last `days` days
    pub fn daily(days: u32) -> Self {
        Self {
            granularity: Granularity::Day,
            site_id: None,
            limit: Some(days),
        }
    }
}
