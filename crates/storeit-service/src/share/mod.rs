//! Sharing lists on File documents.

pub mod service;

pub use service::ShareService;
