//! Dashboard view over a [`SpaceUsage`] snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::space::SpaceUsage;
use crate::file::Category;

/// Usage of one dashboard category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    /// Category.
    pub category: Category,
    /// Display title.
    pub title: String,
    /// Bytes used.
    pub size: u64,
    /// Most recent update in the category.
    pub latest_date: Option<DateTime<Utc>>,
    /// Listing route.
    pub url: String,
}

/// Totals and per-category breakdown for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    /// Bytes used across all buckets.
    pub used: u64,
    /// Storage ceiling in bytes.
    pub total: u64,
    /// `used / total * 100`, rounded to the nearest integer.
    pub percentage: u64,
    /// Per-category usage.
    pub categories: Vec<CategoryUsage>,
}

impl UsageSummary {
    /// Build the summary; media merges video and audio and keeps the later
    /// of their latest dates.
    pub fn new(usage: &SpaceUsage, ceiling: u64) -> Self {
        let used = usage.total();
        let percentage = if ceiling == 0 {
            0
        } else {
            ((used as f64 / ceiling as f64) * 100.0).round() as u64
        };

        let categories = Category::ALL
            .iter()
            .map(|category| {
                let (size, latest_date) = match category {
                    Category::Documents => (usage.document.size, usage.document.latest_date),
                    Category::Images => (usage.image.size, usage.image.latest_date),
                    Category::Media => (
                        usage.video.size.saturating_add(usage.audio.size),
                        usage.video.latest_date.max(usage.audio.latest_date),
                    ),
                    Category::Others => (usage.others.size, usage.others.latest_date),
                };
                CategoryUsage {
                    category: *category,
                    title: category.title().to_string(),
                    size,
                    latest_date,
                    url: category.route().to_string(),
                }
            })
            .collect();

        Self {
            used,
            total: ceiling,
            percentage,
            categories,
        }
    }
}

/// Human-readable size: bytes below 1 KB, then KB/MB/GB with one decimal.
pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} Bytes")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else if b < KB * KB * KB {
        format!("{:.1} MB", b / (KB * KB))
    } else {
        format!("{:.1} GB", b / (KB * KB * KB))
    }
}
