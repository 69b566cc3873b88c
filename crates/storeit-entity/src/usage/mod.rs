//! Storage usage value objects.

pub mod space;
pub mod summary;

pub use space::{BucketUsage, SpaceUsage, UsageRow};
pub use summary::{CategoryUsage, UsageSummary, human_size};
