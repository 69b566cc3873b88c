//! # storeit-auth
//!
//! Identity for StoreIt requests.
//!
//! ## Modules
//!
//! - `directory` — User documents keyed by email and provider account id
//! - `session` — Session-cookie resolution and one-time-code / password sign-in

pub mod directory;
pub mod session;

pub use directory::UserDirectory;
pub use session::{Authenticator, SessionResolver};
