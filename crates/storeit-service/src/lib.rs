//! # storeit-service
//!
//! Business logic for StoreIt. Each service orchestrates the provider's
//! blob store, document store and account API to implement one use case.
//!
//! Services follow constructor injection; [`Services`] wires them all over
//! a single [`Backend`](storeit_provider::Backend).

pub mod context;
pub mod events;
pub mod file;
pub mod lock;
pub mod registry;
pub mod share;
pub mod usage;
pub mod user;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use context::RequestContext;
pub use events::EventBus;
pub use file::{FileManager, FileRecords, ListingService, UploadService};
pub use lock::{KeyedGuard, KeyedMutex};
pub use registry::Services;
pub use share::ShareService;
pub use usage::{DashboardService, QuotaService};
pub use user::UserService;
