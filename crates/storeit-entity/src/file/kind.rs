//! File type classification and dashboard categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storeit_core::error::AppError;

/// Type assigned to a file from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Text and office documents.
    Document,
    /// Raster and vector images.
    Image,
    /// Video containers.
    Video,
    /// Audio files.
    Audio,
    /// Spreadsheets and CSV.
    Spreadsheet,
    /// Slide decks.
    Presentation,
    /// Compressed archives.
    Archive,
    /// Anything unrecognized.
    Others,
}

impl FileType {
    /// The five types that quota accounting and the UI group by.
    pub const BUCKETS: [FileType; 5] = [
        FileType::Document,
        FileType::Image,
        FileType::Video,
        FileType::Audio,
        FileType::Others,
    ];

    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Archive => "archive",
            Self::Others => "others",
        }
    }

    /// Quota bucket the type is accounted under. Spreadsheets,
    /// presentations and archives fold into `others`.
    pub fn bucket(&self) -> FileType {
        match self {
            Self::Spreadsheet | Self::Presentation | Self::Archive => Self::Others,
            other => *other,
        }
    }

    /// Stored types matched when filtering by this bucket.
    pub fn stored_types(&self) -> Vec<FileType> {
        match self.bucket() {
            Self::Others => vec![
                Self::Others,
                Self::Spreadsheet,
                Self::Presentation,
                Self::Archive,
            ],
            bucket => vec![bucket],
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" => Ok(Self::Document),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "spreadsheet" => Ok(Self::Spreadsheet),
            "presentation" => Ok(Self::Presentation),
            "archive" => Ok(Self::Archive),
            "others" | "other" => Ok(Self::Others),
            other => Err(AppError::validation(format!("Unknown file type '{other}'"))),
        }
    }
}

/// Trailing extension of a file name, lower-cased.
///
/// Only an ASCII alphanumeric run after the last dot counts; anything else
/// (no dot, trailing dot, punctuation in the tail) yields an empty string.
pub fn extension_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            ext.to_ascii_lowercase()
        }
        _ => String::new(),
    }
}

/// Classify a file by extension. Returns the type and the lower-cased
/// extension.
pub fn classify(filename: &str) -> (FileType, String) {
    let extension = extension_of(filename);
    let file_type = match extension.as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" => FileType::Image,
        "mp4" | "mov" | "avi" | "wmv" | "flv" | "mkv" | "webm" => FileType::Video,
        "mp3" | "wav" | "ogg" | "flac" | "aac" => FileType::Audio,
        "pdf" | "doc" | "docx" | "odt" | "rtf" | "txt" | "md" => FileType::Document,
        "xls" | "xlsx" | "csv" => FileType::Spreadsheet,
        "ppt" | "pptx" => FileType::Presentation,
        "zip" | "rar" | "7z" | "tar" | "gz" => FileType::Archive,
        _ => FileType::Others,
    };
    (file_type, extension)
}

/// Listing routes shown in the dashboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `/documents`
    Documents,
    /// `/images`
    Images,
    /// `/media` (video and audio)
    Media,
    /// `/others`
    Others,
}

impl Category {
    /// All categories in dashboard order.
    pub const ALL: [Category; 4] = [
        Category::Documents,
        Category::Images,
        Category::Media,
        Category::Others,
    ];

    /// Bucket types listed under the category.
    pub fn types(&self) -> Vec<FileType> {
        match self {
            Self::Documents => vec![FileType::Document],
            Self::Images => vec![FileType::Image],
            Self::Media => vec![FileType::Video, FileType::Audio],
            Self::Others => vec![FileType::Others],
        }
    }

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Documents => "Documents",
            Self::Images => "Images",
            Self::Media => "Media",
            Self::Others => "Others",
        }
    }

    /// Route path of the listing page.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Documents => "/documents",
            Self::Images => "/images",
            Self::Media => "/media",
            Self::Others => "/others",
        }
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "documents" => Ok(Self::Documents),
            "images" => Ok(Self::Images),
            "media" => Ok(Self::Media),
            "others" => Ok(Self::Others),
            other => Err(AppError::validation(format!("Unknown category '{other}'"))),
        }
    }
}
