//! Public blob URLs.

use storeit_core::config::ProviderConfig;

/// Builds the view and download URLs the provider serves blobs from.
#[derive(Debug, Clone)]
pub struct BlobUrls {
    endpoint: String,
    bucket_id: String,
    project_id: String,
}

impl BlobUrls {
    /// Create from provider settings.
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket_id: config.bucket_id.clone(),
            project_id: config.project_id.clone(),
        }
    }

    /// `{endpoint}/storage/buckets/{bucket}/files/{id}/view?project={project}`
    pub fn view(&self, blob_id: &str) -> String {
        self.build(blob_id, "view")
    }

    /// `{endpoint}/storage/buckets/{bucket}/files/{id}/download?project={project}`
    pub fn download(&self, blob_id: &str) -> String {
        self.build(blob_id, "download")
    }

    fn build(&self, blob_id: &str, action: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/{}?project={}",
            self.endpoint, self.bucket_id, blob_id, action, self.project_id
        )
    }
}
