//! Visitor Client - HTTP client for the visitor-tracking API
//!
//! Provides the typed [`VisitorApi`] surface used by the admin pages and its
//! network implementation [`ApiClient`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{ApiClient, VisitorApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};

// Re-export shared models for convenience
pub use shared::models;
