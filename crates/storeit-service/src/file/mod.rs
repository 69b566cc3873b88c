//! File operations: upload, listing, rename and delete.

pub mod listing;
pub mod manage;
pub mod records;
pub mod upload;

pub use listing::{ListFilesQuery, ListingService, SORTABLE_FIELDS};
pub use manage::{DeleteOutcome, DeleteRequest, FileManager, RenameRequest};
pub use records::{FileList, FileRecords};
pub use upload::{StoreMetadataRequest, UploadRequest, UploadService};
