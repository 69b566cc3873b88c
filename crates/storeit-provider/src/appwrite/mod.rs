//! Appwrite REST backend.
//!
//! All three surfaces share one [`AppwriteClient`]. Server-side calls carry
//! the project API key; session-bound calls (`/account`) carry the user's
//! session secret instead so they act as that user.

mod account;
mod client;
mod databases;
mod storage;

pub use account::AppwriteAccounts;
pub use client::AppwriteClient;
pub use databases::AppwriteDatabases;
pub use storage::AppwriteStorage;
