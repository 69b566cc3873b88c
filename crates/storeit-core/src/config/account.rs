//! Account defaults.

use serde::{Deserialize, Serialize};

/// Values applied to newly created User documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Avatar URL given to every new user.
    #[serde(default = "default_avatar")]
    pub avatar_placeholder_url: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            avatar_placeholder_url: default_avatar(),
        }
    }
}

fn default_avatar() -> String {
    "https://img.freepik.com/free-psd/3d-illustration-person-with-sunglasses_23-2149436188.jpg"
        .to_string()
}
