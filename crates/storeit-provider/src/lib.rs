//! # storeit-provider
//!
//! Implementations of the provider traits from `storeit-core`:
//!
//! - [`appwrite`]: REST client for an Appwrite project (storage bucket,
//!   database collections, account sessions).
//! - [`memory`]: in-process backend used for local development and tests.
//!
//! [`Backend`] bundles the three trait objects selected by configuration.

pub mod appwrite;
pub mod backend;
pub mod memory;
pub mod urls;

pub use backend::Backend;
pub use memory::MemoryBackend;
pub use urls::BlobUrls;
