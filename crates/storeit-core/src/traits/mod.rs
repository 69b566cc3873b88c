//! Provider traits defined in `storeit-core` and implemented by `storeit-provider`.

pub mod account;
pub mod blob;
pub mod document;

pub use account::{Account, AccountGateway, ProviderSession};
pub use blob::{BlobInfo, BlobStore, BlobUpload};
pub use document::DocumentStore;
