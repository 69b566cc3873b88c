//! Shared fixtures for service tests.

use bytes::Bytes;

use storeit_core::config::AppConfig;
use storeit_entity::file::File;
use storeit_provider::MemoryBackend;

use crate::context::RequestContext;
use crate::file::UploadRequest;
use crate::registry::Services;

pub(crate) const MIB: u64 = 1024 * 1024;

/// Services over a fresh in-memory backend.
pub(crate) struct Harness {
    pub memory: MemoryBackend,
    pub services: Services,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let memory = MemoryBackend::new(&config.provider);
        let services = Services::new(&memory.backend(), &config);
        Self { memory, services }
    }

    /// Signs up a user and returns a context acting as them.
    pub async fn user(&self, email: &str) -> RequestContext {
        let name = email.split('@').next().unwrap_or("user");
        self.services
            .users
            .sign_up(name, email)
            .await
            .expect("sign up");
        let user = self
            .services
            .users
            .get_by_email(email)
            .await
            .expect("lookup")
            .expect("user exists");
        RequestContext::new(user)
    }

    pub async fn upload(&self, ctx: &RequestContext, name: &str, len: u64) -> File {
        self.services
            .uploads
            .upload(ctx, upload_request(name, len))
            .await
            .expect("upload")
    }
}

pub(crate) fn upload_request(name: &str, len: u64) -> UploadRequest {
    UploadRequest {
        name: name.to_string(),
        content_type: None,
        data: Bytes::from(vec![0u8; len as usize]),
        path: "/".to_string(),
    }
}
