//! Domain events emitted by StoreIt operations.
//!
//! Events are published on the service-layer event bus and streamed to
//! connected clients so they can revalidate the affected page.

pub mod account;
pub mod file;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use account::AccountEvent;
pub use file::FileEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<String>,
    /// User ids and emails allowed to receive the event.
    pub audience: Vec<String>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A file-related event.
    File(FileEvent),
    /// An account-related event.
    Account(AccountEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<String>, audience: Vec<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            audience,
            payload,
        }
    }

    /// Whether a user (by id or email) may receive this event.
    pub fn is_visible_to(&self, user_id: &str, email: &str) -> bool {
        self.audience
            .iter()
            .any(|member| member == user_id || member.eq_ignore_ascii_case(email))
    }

    /// Page path the event invalidates, if any.
    pub fn revalidate_path(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::File(event) => Some(event.path()),
            EventPayload::Account(_) => None,
        }
    }
}
