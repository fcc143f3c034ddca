//! Auth endpoints of the hosted service.

use tracing::{debug, info, warn};

use super::http_client::{generate_verifier, now_unix};
use super::*;

impl HostedBackend {
    fn token_grant(&self, grant_type: &str, body: &impl serde::Serialize) -> Result<StoredSession> {
        let resp = self
            .client
            .post(self.url("/auth/v1/token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.config.anon_key)
            .json(body)
            .send()
            .with_context(|| format!("token request ({})", grant_type))?;
        let tokens: TokenResponse = self
            .ensure_auth_ok(resp)?
            .json()
            .context("parse token response")?;
        Ok(tokens.into_stored(now_unix()))
    }

    fn fetch_user(&self, access_token: &str) -> Result<Option<Session>> {
        let resp = self
            .client
            .get(self.url("/auth/v1/user"))
            .header("apikey", &self.config.anon_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", access_token),
            )
            .send()
            .context("get user")?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED
            || resp.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        let user: AuthUser = self
            .ensure_ok(resp, "get user")?
            .json()
            .context("parse user")?;
        Ok(Some(user.into_session()))
    }

    fn pkce_verifier(&self) -> Result<Option<String>> {
        match &self.store {
            Some(store) => store.pkce_verifier(),
            None => Ok(self.pending_verifier()),
        }
    }
}

impl AuthService for HostedBackend {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let stored = self.token_grant("password", &PasswordGrant { email, password })?;
        info!(user = %stored.user.subject_id, "signed in");
        self.remember(stored)
    }

    fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<Session> {
        let resp = self
            .client
            .post(self.url("/auth/v1/signup"))
            .header("apikey", &self.config.anon_key)
            .json(&SignupRequest {
                email,
                password,
                data: SignupData {
                    full_name: display_name,
                },
            })
            .send()
            .context("sign up")?;
        let body: serde_json::Value = self
            .ensure_auth_ok(resp)?
            .json()
            .context("parse sign-up response")?;

        // Without a token the account exists but waits for email confirmation.
        if body.get("access_token").is_none() {
            anyhow::bail!(CONFIRM_EMAIL_MESSAGE);
        }
        let tokens: TokenResponse =
            serde_json::from_value(body).context("parse sign-up session")?;
        let stored = tokens.into_stored(now_unix());
        info!(user = %stored.user.subject_id, "signed up");
        self.remember(stored)
    }

    fn sign_in_with_provider(&self, provider: Provider) -> Result<String> {
        let verifier = generate_verifier()?;
        let mut url = url::Url::parse(&self.url("/auth/v1/authorize"))
            .with_context(|| format!("invalid backend url {}", self.config.base_url))?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", &self.config.redirect_to)
            .append_pair("code_challenge", &verifier)
            .append_pair("code_challenge_method", "plain");

        match &self.store {
            Some(store) => store
                .set_pkce_verifier(Some(&verifier))
                .context("persist pkce verifier")?,
            None => self.set_pending_verifier(Some(verifier)),
        }
        debug!(provider = provider.as_str(), "oauth login started");
        Ok(url.to_string())
    }

    fn sign_out(&self) -> Result<()> {
        let Some(stored) = self.stored() else {
            return Ok(());
        };
        self.forget();

        let resp = self
            .client
            .post(self.url("/auth/v1/logout"))
            .header("apikey", &self.config.anon_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", stored.access_token),
            )
            .send()
            .context("sign out")?;
        // An already expired token means the remote session is gone anyway.
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        self.ensure_ok(resp, "sign out")?;
        info!(user = %stored.user.subject_id, "signed out");
        Ok(())
    }

    fn current_session(&self) -> Result<Option<Session>> {
        let Some(stored) = self.stored() else {
            return Ok(None);
        };

        if let Some(user) = self.fetch_user(&stored.access_token)? {
            let mut slot = self.slot();
            if let Some(s) = slot.as_mut() {
                s.user = user.clone();
            }
            return Ok(Some(user));
        }

        debug!("stored access token rejected; trying refresh");
        self.refresh_session()
    }

    fn refresh_session(&self) -> Result<Option<Session>> {
        let Some(refresh_token) = self.stored().and_then(|s| s.refresh_token) else {
            self.forget();
            return Ok(None);
        };

        let resp = self
            .client
            .post(self.url("/auth/v1/token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .context("refresh session")?;
        if resp.status().is_client_error() {
            let reason = auth_error_message(&resp.json().unwrap_or(serde_json::Value::Null));
            warn!("refresh token rejected: {}", reason);
            self.forget();
            return Ok(None);
        }
        let tokens: TokenResponse = self
            .ensure_ok(resp, "refresh session")?
            .json()
            .context("parse refresh response")?;
        let user = self.remember(tokens.into_stored(now_unix()))?;
        Ok(Some(user))
    }

    fn complete_redirect_exchange(&self, grant: &RedirectGrant) -> Result<Session> {
        let stored = match grant {
            RedirectGrant::Tokens {
                access_token,
                refresh_token,
                expires_in,
            } => {
                let user = self
                    .fetch_user(access_token)?
                    .ok_or_else(|| anyhow::anyhow!("access token from redirect was rejected"))?;
                StoredSession {
                    access_token: access_token.clone(),
                    refresh_token: refresh_token.clone(),
                    expires_at: expires_in.map(|secs| now_unix() + secs),
                    user,
                }
            }
            RedirectGrant::Code(code) => {
                let verifier = self
                    .pkce_verifier()?
                    .ok_or_else(|| anyhow::anyhow!("no OAuth login in progress"))?;
                let stored = self.token_grant(
                    "pkce",
                    &PkceGrant {
                        auth_code: code,
                        code_verifier: &verifier,
                    },
                )?;
                match &self.store {
                    Some(store) => store.set_pkce_verifier(None)?,
                    None => self.set_pending_verifier(None),
                }
                stored
            }
            RedirectGrant::Error { code, description } => {
                anyhow::bail!(
                    "provider returned {}: {}",
                    code,
                    description.as_deref().unwrap_or("no description")
                );
            }
        };
        info!(user = %stored.user.subject_id, "signed in via redirect");
        self.remember(stored)
    }

    fn delete_account(&self) -> Result<()> {
        if self.stored().is_none() {
            anyhow::bail!("not signed in");
        }
        let resp = self
            .post("/rest/v1/rpc/delete_own_account")
            .json(&serde_json::json!({}))
            .send()
            .context("delete account")?;
        self.ensure_ok(resp, "delete account")?;
        self.forget();
        info!("account deleted");
        Ok(())
    }

    fn session_expires_at(&self) -> Option<i64> {
        self.slot().as_ref().and_then(|s| s.expires_at)
    }
}
