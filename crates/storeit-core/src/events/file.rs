//! File-related domain events.

use serde::{Deserialize, Serialize};

/// Events related to file operations. Every variant carries the page path
/// the client should revalidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileEvent {
    /// A file was uploaded.
    Uploaded {
        /// The file document id.
        file_id: String,
        /// The file name.
        name: String,
        /// Size in bytes.
        size: u64,
        /// Page to revalidate.
        path: String,
    },
    /// A file was renamed.
    Renamed {
        /// The file document id.
        file_id: String,
        /// The new name.
        name: String,
        /// Page to revalidate.
        path: String,
    },
    /// A file was deleted by its owner.
    Deleted {
        /// The file document id.
        file_id: String,
        /// The file name (for display after deletion).
        name: String,
        /// Page to revalidate.
        path: String,
    },
    /// The sharing list changed.
    SharingChanged {
        /// The file document id.
        file_id: String,
        /// Emails with access after the change.
        users: Vec<String>,
        /// Page to revalidate.
        path: String,
    },
    /// A shared user removed themselves from a file.
    Left {
        /// The file document id.
        file_id: String,
        /// Email that was removed.
        email: String,
        /// Page to revalidate.
        path: String,
    },
}

impl FileEvent {
    /// Page path carried by the event.
    pub fn path(&self) -> &str {
        match self {
            Self::Uploaded { path, .. }
            | Self::Renamed { path, .. }
            | Self::Deleted { path, .. }
            | Self::SharingChanged { path, .. }
            | Self::Left { path, .. } => path,
        }
    }
}
