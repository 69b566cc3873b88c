//! # storeit-entity
//!
//! Domain entity models for StoreIt. `File` and `User` mirror the documents
//! kept in the provider's collections; `usage` holds the derived quota
//! value objects. All entities derive `Debug`, `Clone`, `Serialize` and
//! `Deserialize`, using the provider's attribute names on the wire.

pub mod file;
pub mod usage;
pub mod user;
