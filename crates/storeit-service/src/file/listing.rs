//! Scoped file listing with type filter, name search, sort and limit.

use std::sync::Arc;

use tracing::debug;

use storeit_core::error::AppError;
use storeit_core::types::{Query, SortField};
use storeit_entity::file::{Category, FileType};

use super::records::{FileList, FileRecords};
use crate::context::RequestContext;

/// Attributes a listing may be sorted by.
pub const SORTABLE_FIELDS: &[&str] = &[
    "$createdAt",
    "$updatedAt",
    "name",
    "size",
    "type",
    "extension",
];

/// Listing parameters.
#[derive(Debug, Clone, Default)]
pub struct ListFilesQuery {
    /// Bucket types to include; empty means all.
    pub types: Vec<FileType>,
    /// Substring matched against the file name.
    pub search_text: Option<String>,
    /// `"field-direction"`, e.g. `"$createdAt-desc"`.
    pub sort: Option<String>,
    /// Maximum number of files returned.
    pub limit: Option<u32>,
}

/// Builds provider queries for the caller's visible files.
#[derive(Debug, Clone)]
pub struct ListingService {
    records: Arc<FileRecords>,
}

impl ListingService {
    /// Creates a listing service.
    pub fn new(records: Arc<FileRecords>) -> Self {
        Self { records }
    }

    /// Lists files owned by or shared with the current user.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        query: ListFilesQuery,
    ) -> Result<FileList, AppError> {
        let queries = build_queries(ctx, &query)?;
        let list = self.records.list(&queries).await?;
        debug!(
            user_id = %ctx.user_id(),
            total = list.total,
            returned = list.documents.len(),
            "Listed files"
        );
        Ok(list)
    }

    /// Lists the files of one dashboard category.
    pub async fn list_category(
        &self,
        ctx: &RequestContext,
        category: Category,
        mut query: ListFilesQuery,
    ) -> Result<FileList, AppError> {
        query.types = category.types();
        self.list_files(ctx, query).await
    }
}

/// Translates listing parameters into provider queries. Fails before any
/// provider call when the sort is malformed.
pub fn build_queries(ctx: &RequestContext, query: &ListFilesQuery) -> Result<Vec<Query>, AppError> {
    let sort = query
        .sort
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|raw| SortField::parse(raw, SORTABLE_FIELDS))
        .transpose()?;

    let mut queries = vec![FileRecords::scope(&ctx.user)];

    if !query.types.is_empty() {
        let mut stored: Vec<&'static str> = Vec::new();
        for t in query.types.iter().flat_map(FileType::stored_types) {
            if !stored.contains(&t.as_str()) {
                stored.push(t.as_str());
            }
        }
        queries.push(Query::equal("type", stored));
    }

    if let Some(text) = query
        .search_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        queries.push(Query::contains("name", [text]));
    }

    if let Some(sort) = &sort {
        queries.push(Query::order(sort));
    }

    if let Some(limit) = query.limit {
        queries.push(Query::limit(limit));
    }

    Ok(queries)
}
