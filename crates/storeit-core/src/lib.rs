//! # storeit-core
//!
//! Core crate for StoreIt. Contains the provider traits (blob store,
//! document store, account gateway), configuration schemas, the query
//! vocabulary used against the document store, domain events, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other StoreIt crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
