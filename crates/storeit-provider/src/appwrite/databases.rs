//! Appwrite database collections as a [`DocumentStore`].

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::{Map, Value, json};

use storeit_core::config::ProviderConfig;
use storeit_core::result::AppResult;
use storeit_core::traits::DocumentStore;
use storeit_core::types::{Document, DocumentList, Query};

use super::client::AppwriteClient;

/// Document store backed by one Appwrite database.
#[derive(Debug, Clone)]
pub struct AppwriteDatabases {
    client: AppwriteClient,
    database_id: String,
}

impl AppwriteDatabases {
    /// Create a store for the configured database.
    pub fn new(client: AppwriteClient, config: &ProviderConfig) -> Self {
        Self {
            client,
            database_id: config.database_id.clone(),
        }
    }

    fn documents_url(&self, collection: &str) -> AppResult<Url> {
        self.client.url(&format!(
            "/databases/{}/collections/{collection}/documents",
            self.database_id
        ))
    }

    fn document_url(&self, collection: &str, id: &str) -> AppResult<Url> {
        self.client.url(&format!(
            "/databases/{}/collections/{collection}/documents/{id}",
            self.database_id
        ))
    }
}

/// Append each query as a JSON-encoded `queries[]` parameter.
fn with_queries(mut url: Url, queries: &[Query]) -> AppResult<Url> {
    if !queries.is_empty() {
        let encoded = queries
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        let mut pairs = url.query_pairs_mut();
        for query in &encoded {
            pairs.append_pair("queries[]", query);
        }
    }
    Ok(url)
}

#[async_trait]
impl DocumentStore for AppwriteDatabases {
    fn provider_type(&self) -> &str {
        "appwrite"
    }

    async fn create_document(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> AppResult<Document> {
        let url = self.documents_url(collection)?;
        let body = json!({ "documentId": id, "data": data });
        self.client
            .send_json(
                self.client.server(Method::POST, url).json(&body),
                "create document",
            )
            .await
    }

    async fn get_document(&self, collection: &str, id: &str) -> AppResult<Document> {
        let url = self.document_url(collection, id)?;
        self.client
            .send_json(self.client.server(Method::GET, url), "get document")
            .await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> AppResult<Document> {
        let url = self.document_url(collection, id)?;
        let body = json!({ "data": data });
        self.client
            .send_json(
                self.client.server(Method::PATCH, url).json(&body),
                "update document",
            )
            .await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> AppResult<()> {
        let url = self.document_url(collection, id)?;
        self.client
            .send_empty(self.client.server(Method::DELETE, url), "delete document")
            .await
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> AppResult<DocumentList> {
        let url = with_queries(self.documents_url(collection)?, queries)?;
        self.client
            .send_json(self.client.server(Method::GET, url), "list documents")
            .await
    }
}
