//! In-memory [`DocumentStore`].

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Map, Value};

use storeit_core::error::AppError;
use storeit_core::result::AppResult;
use storeit_core::traits::DocumentStore;
use storeit_core::types::{Document, DocumentList, Query};

use super::filter;

/// Document store keeping each collection as an insertion-ordered list.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, Vec<Document>>,
    fail_creates: AtomicBool,
    fail_lists: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent creates fail with a provider error.
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent list calls fail with a provider error.
    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent deletes fail with a provider error.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |docs| docs.len())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn create_document(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> AppResult<Document> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(AppError::provider("Simulated document write failure"));
        }

        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.id == id) {
            return Err(AppError::conflict(format!(
                "Document '{id}' already exists in '{collection}'"
            )));
        }

        let now = Utc::now();
        let mut doc = Document::new(id, data);
        doc.created_at = Some(now);
        doc.updated_at = Some(now);
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn get_document(&self, collection: &str, id: &str) -> AppResult<Document> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned())
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> AppResult<Document> {
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))?;
        let doc = docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))?;

        doc.data.extend(data);
        doc.updated_at = Some(Utc::now());
        Ok(doc.clone())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> AppResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::provider("Simulated document delete failure"));
        }
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| AppError::not_found(format!("Document '{id}' not found")))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(AppError::not_found(format!("Document '{id}' not found")));
        }
        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> AppResult<DocumentList> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(AppError::provider("Simulated list failure"));
        }
        let docs = self
            .collections
            .get(collection)
            .map(|docs| docs.clone())
            .unwrap_or_default();
        Ok(filter::apply(docs, queries))
    }
}
