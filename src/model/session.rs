use serde::{Deserialize, Serialize};

/// An authenticated subject as reported by the hosted auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub subject_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Session {
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Learner")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionChange {
    SignedIn(Session),
    SignedOut,
    TokenRefreshed(Session),
}

impl SessionChange {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionChange::SignedIn(s) | SessionChange::TokenRefreshed(s) => Some(s),
            SessionChange::SignedOut => None,
        }
    }
}

/// Identity providers offered next to the password form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Google,
    Github,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Github => "github",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Github => "GitHub",
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "github" => Ok(Provider::Github),
            other => anyhow::bail!("unsupported provider `{}` (use google or github)", other),
        }
    }
}
