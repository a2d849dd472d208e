//! System status models (backend health, recognition workers)

use serde::{Deserialize, Serialize};

/// Backend health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    /// Placeholder used when the health check itself fails
    pub fn unknown() -> Self {
        Self {
            status: "unknown".to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "healthy")
    }
}

/// Recognition worker pool status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerStatus {
    #[serde(default)]
    pub online_count: i64,
    #[serde(default)]
    pub total_count: i64,
}
