//! Per-bucket quota snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::file::FileType;

/// Bytes and most recent update within one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketUsage {
    /// Cumulative size in bytes.
    pub size: u64,
    /// Latest `$updatedAt` among the bucket's files.
    pub latest_date: Option<DateTime<Utc>>,
}

impl BucketUsage {
    fn record(&mut self, size: u64, updated_at: Option<DateTime<Utc>>) {
        self.size = self.size.saturating_add(size);
        if let Some(ts) = updated_at {
            self.latest_date = Some(self.latest_date.map_or(ts, |current| current.max(ts)));
        }
    }
}

/// The projected attributes of one File document used for accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRow {
    /// Stored type.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Size in bytes.
    pub size: u64,
    /// Last update.
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Usage derived from the files visible to a user. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceUsage {
    /// Documents.
    pub document: BucketUsage,
    /// Images.
    pub image: BucketUsage,
    /// Videos.
    pub video: BucketUsage,
    /// Audio.
    pub audio: BucketUsage,
    /// Everything else, including spreadsheets, presentations and archives.
    pub others: BucketUsage,
}

impl SpaceUsage {
    /// Fold rows into a snapshot.
    pub fn from_rows<I: IntoIterator<Item = UsageRow>>(rows: I) -> Self {
        let mut usage = Self::default();
        for row in rows {
            usage
                .bucket_mut(row.file_type)
                .record(row.size, row.updated_at);
        }
        usage
    }

    /// Usage of the bucket a type is accounted under.
    pub fn bucket(&self, file_type: FileType) -> &BucketUsage {
        match file_type.bucket() {
            FileType::Document => &self.document,
            FileType::Image => &self.image,
            FileType::Video => &self.video,
            FileType::Audio => &self.audio,
            _ => &self.others,
        }
    }

    fn bucket_mut(&mut self, file_type: FileType) -> &mut BucketUsage {
        match file_type.bucket() {
            FileType::Document => &mut self.document,
            FileType::Image => &mut self.image,
            FileType::Video => &mut self.video,
            FileType::Audio => &mut self.audio,
            _ => &mut self.others,
        }
    }

    /// Sum over all buckets.
    pub fn total(&self) -> u64 {
        FileType::BUCKETS
            .iter()
            .map(|t| self.bucket(*t).size)
            .fold(0u64, u64::saturating_add)
    }

    /// Check if adding `additional` bytes would go past `ceiling`.
    pub fn would_exceed(&self, additional: u64, ceiling: u64) -> bool {
        self.total().saturating_add(additional) > ceiling
    }
}
