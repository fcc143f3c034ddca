//! Completes an OAuth login when the provider sends the user back with
//! tokens, a code, or an error in the address.

use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use url::Url;

use crate::backend::AuthService;
use crate::model::Session;

/// Shown for every failed redirect; details go to the log.
pub const REDIRECT_FAILED_MESSAGE: &str = "sign-in failed, please try again";

const AUTH_PARAMS: &[&str] = &[
    "access_token",
    "refresh_token",
    "expires_in",
    "expires_at",
    "token_type",
    "provider_token",
    "provider_refresh_token",
    "type",
    "code",
    "error",
    "error_code",
    "error_description",
];

/// The visible address of the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(s: &str) -> Result<Self> {
        let url = Url::parse(s.trim()).with_context(|| format!("invalid redirect url `{}`", s))?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Removes auth parameters from the query and fragment. Returns whether
    /// anything was removed.
    pub fn strip_auth_params(&mut self) -> bool {
        let mut changed = false;

        if let Some(query) = self.url.query() {
            let (kept, removed) = filter_pairs(query);
            if removed {
                changed = true;
                let kept = (!kept.is_empty()).then_some(kept);
                self.url.set_query(kept.as_deref());
            }
        }

        if let Some(fragment) = self.url.fragment() {
            let (kept, removed) = filter_pairs(fragment);
            if removed {
                changed = true;
                let kept = (!kept.is_empty()).then_some(kept);
                self.url.set_fragment(kept.as_deref());
            }
        }

        changed
    }
}

/// Drops auth segments and keeps every other segment byte for byte, so
/// fragments that are not form data survive.
fn filter_pairs(encoded: &str) -> (String, bool) {
    let mut removed = false;
    let kept: Vec<&str> = encoded
        .split('&')
        .filter(|segment| {
            let key = segment.split_once('=').map_or(*segment, |(k, _)| k);
            let auth = AUTH_PARAMS.contains(&key);
            removed |= auth;
            !auth
        })
        .collect();
    (kept.join("&"), removed)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectGrant {
    /// Implicit flow: tokens in the fragment.
    Tokens {
        access_token: String,
        refresh_token: Option<String>,
        expires_in: Option<i64>,
    },
    /// PKCE flow: a one-time code in the query.
    Code(String),
    Error {
        code: String,
        description: Option<String>,
    },
}

impl RedirectGrant {
    fn consumption_key(&self) -> String {
        match self {
            RedirectGrant::Tokens { access_token, .. } => format!("token:{}", access_token),
            RedirectGrant::Code(code) => format!("code:{}", code),
            RedirectGrant::Error { code, description } => {
                format!("error:{}:{}", code, description.as_deref().unwrap_or(""))
            }
        }
    }
}

fn lookup(encoded: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(encoded?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// `None` when the address carries nothing a login left behind.
pub fn parse_redirect(url: &Url) -> Option<RedirectGrant> {
    let query = url.query();
    let fragment = url.fragment();
    let find = |key: &str| lookup(fragment, key).or_else(|| lookup(query, key));

    if let Some(code) = find("error") {
        return Some(RedirectGrant::Error {
            code: find("error_code").unwrap_or(code),
            description: find("error_description"),
        });
    }
    if let Some(access_token) = lookup(fragment, "access_token") {
        return Some(RedirectGrant::Tokens {
            access_token,
            refresh_token: lookup(fragment, "refresh_token"),
            expires_in: lookup(fragment, "expires_in").and_then(|v| v.parse().ok()),
        });
    }
    lookup(query, "code").map(RedirectGrant::Code)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectOutcome {
    NotApplicable,
    SignedIn(Session),
    Failed(String),
}

/// Remembers which grants were already used so a repeated completion of the
/// same redirect does nothing.
#[derive(Debug, Default)]
pub struct RedirectHandler {
    consumed: HashSet<String>,
}

impl RedirectHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complete_redirect(
        &mut self,
        location: &mut Location,
        auth: &dyn AuthService,
    ) -> RedirectOutcome {
        let Some(grant) = parse_redirect(location.url()) else {
            return RedirectOutcome::NotApplicable;
        };
        location.strip_auth_params();

        if !self.consumed.insert(grant.consumption_key()) {
            debug!("redirect grant already consumed");
            return RedirectOutcome::NotApplicable;
        }

        if let RedirectGrant::Error { code, description } = &grant {
            warn!(
                code = %code,
                "provider reported a failed login: {}",
                description.as_deref().unwrap_or("no description")
            );
            return RedirectOutcome::Failed(REDIRECT_FAILED_MESSAGE.to_string());
        }

        match auth.complete_redirect_exchange(&grant) {
            Ok(session) => {
                info!(user = %session.subject_id, "redirect login completed");
                RedirectOutcome::SignedIn(session)
            }
            Err(err) => {
                warn!("redirect exchange failed: {:#}", err);
                RedirectOutcome::Failed(REDIRECT_FAILED_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/redirect_tests.rs"]
mod tests;
