//! Typed access to the files collection.

use std::sync::Arc;

use serde_json::{Map, Value, json};

use storeit_core::error::AppError;
use storeit_core::traits::DocumentStore;
use storeit_core::types::{Query, to_attributes};
use storeit_entity::file::{CreateFile, File};
use storeit_entity::user::User;

/// A page of File documents.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FileList {
    /// Number of matches ignoring the limit.
    pub total: u64,
    /// The returned files.
    pub documents: Vec<File>,
}

/// Reads and writes File documents.
#[derive(Debug, Clone)]
pub struct FileRecords {
    documents: Arc<dyn DocumentStore>,
    collection: String,
}

impl FileRecords {
    /// Creates a repository over the files collection.
    pub fn new(documents: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            documents,
            collection: collection.into(),
        }
    }

    /// Files owned by the user or shared with their email.
    pub fn scope(user: &User) -> Query {
        Query::or([
            Query::equal("owner", [user.id.as_str()]),
            Query::contains("users", [user.email.as_str()]),
        ])
    }

    /// Fetches a file by document id.
    pub async fn get(&self, file_id: &str) -> Result<File, AppError> {
        self.documents
            .get_document(&self.collection, file_id)
            .await?
            .into_model()
    }

    /// Inserts a File document under `file_id`.
    pub async fn create(&self, file_id: &str, file: &CreateFile) -> Result<File, AppError> {
        self.documents
            .create_document(&self.collection, file_id, to_attributes(file)?)
            .await?
            .into_model()
    }

    /// Replaces the file name.
    pub async fn set_name(&self, file_id: &str, name: &str) -> Result<File, AppError> {
        self.patch(file_id, "name", json!(name)).await
    }

    /// Replaces the sharing list.
    pub async fn set_users(&self, file_id: &str, users: &[String]) -> Result<File, AppError> {
        self.patch(file_id, "users", json!(users)).await
    }

    /// Deletes the File document.
    pub async fn delete(&self, file_id: &str) -> Result<(), AppError> {
        self.documents.delete_document(&self.collection, file_id).await
    }

    /// Runs a list query and decodes the results.
    pub async fn list(&self, queries: &[Query]) -> Result<FileList, AppError> {
        let list = self
            .documents
            .list_documents(&self.collection, queries)
            .await?;
        let documents = list
            .documents
            .into_iter()
            .map(|doc| doc.into_model())
            .collect::<Result<Vec<File>, _>>()?;
        Ok(FileList {
            total: list.total,
            documents,
        })
    }

    /// Runs a list query and decodes each document into `T`. Returns the
    /// provider's match count alongside the decoded page.
    pub async fn list_as<T: serde::de::DeserializeOwned>(
        &self,
        queries: &[Query],
    ) -> Result<(u64, Vec<T>), AppError> {
        let list = self
            .documents
            .list_documents(&self.collection, queries)
            .await?;
        let rows = list
            .documents
            .into_iter()
            .map(|doc| doc.into_model())
            .collect::<Result<Vec<T>, _>>()?;
        Ok((list.total, rows))
    }

    /// The File document backed by `blob_id`, if one exists.
    pub async fn find_by_blob(&self, blob_id: &str) -> Result<Option<File>, AppError> {
        let list = self
            .list(&[Query::equal("bucketFileId", [blob_id]), Query::limit(1)])
            .await?;
        Ok(list.documents.into_iter().next())
    }

    async fn patch(&self, file_id: &str, attribute: &str, value: Value) -> Result<File, AppError> {
        let mut data = Map::new();
        data.insert(attribute.to_string(), value);
        self.documents
            .update_document(&self.collection, file_id, data)
            .await?
            .into_model()
    }
}
