//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Settings for the cookie carrying the provider session secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie name.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the cookie carries the `Secure` attribute. Only disable for
    /// plain-http local development.
    #[serde(default = "default_secure")]
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            secure: default_secure(),
        }
    }
}

fn default_cookie_name() -> String {
    "storeit-session".to_string()
}

fn default_secure() -> bool {
    true
}
