//! Account-related domain events.

use serde::{Deserialize, Serialize};

/// Events related to account lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountEvent {
    /// A User document was created.
    SignedUp {
        /// User document id.
        user_id: String,
        /// Account email.
        email: String,
    },
    /// A session was established.
    SignedIn {
        /// External account id.
        account_id: String,
    },
    /// A session was deleted.
    SignedOut {
        /// User document id.
        user_id: String,
    },
}
