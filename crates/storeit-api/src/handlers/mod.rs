//! Route handlers organized by domain.

pub mod auth;
pub mod events;
pub mod file;
pub mod health;
pub mod metadata;
pub mod share;
pub mod usage;
