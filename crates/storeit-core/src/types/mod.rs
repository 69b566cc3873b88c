//! Core type definitions used across the StoreIt workspace.

pub mod document;
pub mod query;
pub mod sorting;

pub use document::{Document, DocumentList, to_attributes};
pub use query::Query;
pub use sorting::{SortDirection, SortField};
