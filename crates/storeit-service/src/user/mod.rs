//! Account flows on top of the identity provider.

pub mod service;

pub use service::UserService;
