//! Admin configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | VISITOR_API_URL | http://localhost:8000/api/v1 | API base URL |
//! | REQUEST_TIMEOUT_SECS | 30 | Per-request timeout |
//! | PAGE_SIZE | 10 | Table rows per page |
//! | LOG_LEVEL | info | `tracing` filter |
//! | CUSTOMER_VISIT_SHARE | 0.8 | Estimated customer share of visits |

use visitor_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use visitor_client::{ApiClient, ClientConfig, ClientResult};

use crate::stats::DEFAULT_CUSTOMER_SHARE;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub page_size: usize,
    pub log_level: String,
    /// Used only when the visitor report carries no customer/staff split
    pub customer_share: f64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            log_level: "info".into(),
            customer_share: DEFAULT_CUSTOMER_SHARE,
        }
    }
}

impl AdminConfig {
    /// Load from the process environment; unset or unparsable values use defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("VISITOR_API_URL").unwrap_or(defaults.api_url),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            page_size: lookup("PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.page_size),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            customer_share: lookup("CUSTOMER_VISIT_SHARE")
                .and_then(|v| v.parse().ok())
                .filter(|s: &f64| (0.0..=1.0).contains(s))
                .unwrap_or(defaults.customer_share),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url)
            .with_timeout(self.request_timeout_secs)
    }

    pub fn build_client(&self) -> ClientResult<ApiClient> {
        self.client_config().build()
    }
}
