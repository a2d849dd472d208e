//! Data models
//!
//! Records exchanged with the visitor-tracking API.
//! All IDs are `i64`; timestamps are RFC 3339 UTC strings on the wire.

pub mod customer;
pub mod report;
pub mod site;
pub mod staff;
pub mod system;
pub mod visit;

// Re-exports
pub use customer::*;
pub use report::*;
pub use site::*;
pub use staff::*;
pub use system::*;
pub use visit::*;
