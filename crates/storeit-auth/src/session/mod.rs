//! Session lifecycle: resolving the cookie to a user, issuing and ending sessions.

pub mod authenticator;
pub mod resolver;

pub use authenticator::Authenticator;
pub use resolver::SessionResolver;
