//! Shared types for the visitor admin workspace
//!
//! Wire models exchanged with the visitor-tracking API and the error body
//! the API returns on failure.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiErrorBody, ErrorDetail};
pub use serde::{Deserialize, Serialize};
