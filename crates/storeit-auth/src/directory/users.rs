//! User documents stored in the provider's users collection.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storeit_core::error::AppError;
use storeit_core::traits::DocumentStore;
use storeit_core::types::{Query, to_attributes};
use storeit_entity::user::{CreateUser, User};

/// Reads and creates User documents.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    /// Document store holding the users collection.
    documents: Arc<dyn DocumentStore>,
    /// Users collection id.
    collection: String,
}

impl UserDirectory {
    /// Creates a directory over `collection`.
    pub fn new(documents: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            documents,
            collection: collection.into(),
        }
    }

    /// Finds the user with this email. Emails are stored lower-cased.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.trim().to_lowercase();
        self.find_one(Query::equal("email", [email])).await
    }

    /// Finds the user bound to a provider account.
    pub async fn find_by_account_id(&self, account_id: &str) -> Result<Option<User>, AppError> {
        self.find_one(Query::equal("accountId", [account_id])).await
    }

    /// Fetches a user by document id.
    pub async fn get(&self, user_id: &str) -> Result<User, AppError> {
        self.documents
            .get_document(&self.collection, user_id)
            .await?
            .into_model()
    }

    /// Inserts a new User document under a fresh id.
    pub async fn create(&self, user: CreateUser) -> Result<User, AppError> {
        let id = Uuid::new_v4().simple().to_string();
        let data = to_attributes(&user)?;
        let user: User = self
            .documents
            .create_document(&self.collection, &id, data)
            .await?
            .into_model()?;

        info!(user_id = %user.id, account_id = %user.account_id, "User created");
        Ok(user)
    }

    async fn find_one(&self, filter: Query) -> Result<Option<User>, AppError> {
        let list = self
            .documents
            .list_documents(&self.collection, &[filter, Query::limit(1)])
            .await?;
        list.documents
            .into_iter()
            .next()
            .map(|doc| doc.into_model())
            .transpose()
    }
}
