//! Site Model

use serde::{Deserialize, Serialize};

/// A physical location with cameras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}
