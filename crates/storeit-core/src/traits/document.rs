//! Document store trait for the provider's database collections.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::result::AppResult;
use crate::types::{Document, DocumentList, Query};

/// Collection-scoped document database.
///
/// All calls name the collection explicitly; the database id is fixed by
/// the implementation's configuration.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name.
    fn provider_type(&self) -> &str;

    /// Create a document under the given id.
    async fn create_document(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> AppResult<Document>;

    /// Fetch a document. Missing documents yield a `NotFound` error.
    async fn get_document(&self, collection: &str, id: &str) -> AppResult<Document>;

    /// Apply a partial update and return the stored document.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> AppResult<Document>;

    /// Delete a document.
    async fn delete_document(&self, collection: &str, id: &str) -> AppResult<()>;

    /// List documents matching all filter clauses, shaped by the
    /// order, limit and select clauses.
    async fn list_documents(&self, collection: &str, queries: &[Query])
    -> AppResult<DocumentList>;
}
