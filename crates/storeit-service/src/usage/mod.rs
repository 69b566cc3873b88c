//! Storage accounting and the dashboard view built on it.

pub mod dashboard;
pub mod quota;

pub use dashboard::{Dashboard, DashboardService};
pub use quota::QuotaService;
