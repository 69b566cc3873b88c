//! Lookup and creation of User documents.

pub mod users;

pub use users::UserDirectory;
