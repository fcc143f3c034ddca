use serde::{Deserialize, Serialize};

use super::Session;

pub const DEFAULT_REDIRECT_TO: &str = "http://localhost:5173/";
pub const DEFAULT_SESSION_CHECK_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub backend: Option<BackendConfig>,

    /// Upper bound for the startup session check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_check_timeout_secs: Option<u64>,

    /// Per-request timeout for the hosted service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            backend: None,
            session_check_timeout_secs: None,
            http_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn session_check_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(
            self.session_check_timeout_secs
                .unwrap_or(DEFAULT_SESSION_CHECK_TIMEOUT_SECS),
        )
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub anon_key: String,

    /// Where the identity provider sends the browser after an OAuth login.
    #[serde(default = "default_redirect_to")]
    pub redirect_to: String,
}

fn default_redirect_to() -> String {
    DEFAULT_REDIRECT_TO.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientState {
    pub version: u32,

    #[serde(default)]
    pub session: Option<StoredSession>,

    /// Verifier for an OAuth login that has not come back yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkce_verifier: Option<String>,

    #[serde(default)]
    pub preferences: Preferences,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            version: 1,
            session: None,
            pkce_verifier: None,
            preferences: Preferences::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub user: Session,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub notifications: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
        }
    }
}
