//! Visitor Admin - headless admin pages for the visitor-tracking API
//!
//! Each page owns its entity list, load state and modal flags, and exposes
//! view models (rows, pagination, banners) for a renderer to draw. Mutations
//! always go to the server first and are followed by a full reload.

pub mod config;
pub mod controller;
pub mod error;
pub mod logger;
pub mod pages;
pub mod render;
pub mod stats;
pub mod table;

#[cfg(test)]
mod testing;

pub use config::AdminConfig;
pub use controller::{Entity, ListController, ListView, PageState, Phase, ResourceApi};
pub use error::{describe_error, validation_message};
pub use pages::{CustomersPage, DashboardPage, StaffPage};
