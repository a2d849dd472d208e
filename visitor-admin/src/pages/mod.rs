//! Admin pages

pub mod customers;
pub mod dashboard;
pub mod staff;

pub use customers::{CustomerDetail, CustomerResource, CustomersPage};
pub use dashboard::{DashboardData, DashboardPage, DashboardView, SummaryCards};
pub use staff::{StaffPage, StaffResource};
