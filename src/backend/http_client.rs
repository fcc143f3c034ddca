use tracing::debug;

use super::*;

/// A reply the service answered with a failing status.
#[derive(Debug)]
pub(super) struct StatusError {
    status: reqwest::StatusCode,
    message: String,
}

impl StatusError {
    fn new(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StatusError {}

/// Only transport failures and 5xx replies can succeed on a second try.
fn is_transient(err: &anyhow::Error) -> bool {
    if let Some(status) = err.chain().find_map(|e| e.downcast_ref::<StatusError>()) {
        return status.status.is_server_error();
    }
    err.chain()
        .find_map(|e| e.downcast_ref::<reqwest::Error>())
        .is_some_and(|e| e.is_connect() || e.is_timeout() || e.is_request())
}

pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    const ATTEMPTS: usize = 3;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match f() {
            Ok(v) => return Ok(v),
            Err(err) if attempt < ATTEMPTS && is_transient(&err) => {
                debug!(attempt, "{} failed: {:#}", label, err);
                std::thread::sleep(std::time::Duration::from_millis(200 * (1 << (attempt - 1))));
            }
            Err(err) => return Err(err.context(label.to_string())),
        }
    }
}

/// Picks the most readable reason out of an auth or row error body.
pub fn auth_error_message(body: &serde_json::Value) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("An unexpected error occurred")
        .to_string()
}

fn body_message(resp: reqwest::blocking::Response) -> String {
    let body = resp
        .json::<serde_json::Value>()
        .unwrap_or(serde_json::Value::Null);
    auth_error_message(&body)
}

pub(super) fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

pub(super) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

/// 32 bytes of entropy, hex-encoded; doubles as the plain PKCE challenge.
pub(super) fn generate_verifier() -> Result<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(64);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

impl HostedBackend {
    /// Status handling for row and RPC calls.
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(StatusError::new(
                status,
                "unauthorized (session expired or invalid; log in again)",
            )
            .into());
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(StatusError::new(
                status,
                "forbidden (row-level policy denied the request)",
            )
            .into());
        }
        if !status.is_success() {
            let message = format!("{} ({}): {}", label, status, body_message(resp));
            return Err(StatusError::new(status, message).into());
        }
        Ok(resp)
    }

    /// Auth endpoints report failures the user should read verbatim.
    pub(super) fn ensure_auth_ok(
        &self,
        resp: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response> {
        if !resp.status().is_success() {
            anyhow::bail!(body_message(resp));
        }
        Ok(resp)
    }

    pub(super) fn auth(&self) -> String {
        match self.slot().as_ref() {
            Some(s) => format!("Bearer {}", s.access_token),
            None => format!("Bearer {}", self.config.anon_key),
        }
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub(super) fn get(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.client
            .get(self.url(path))
            .header("apikey", &self.config.anon_key)
            .header(reqwest::header::AUTHORIZATION, self.auth())
    }

    pub(super) fn post(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.client
            .post(self.url(path))
            .header("apikey", &self.config.anon_key)
            .header(reqwest::header::AUTHORIZATION, self.auth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_message_prefers_description() {
        let body = serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials",
        });
        assert_eq!(auth_error_message(&body), "Invalid login credentials");

        let body = serde_json::json!({"code": 422, "msg": "User already registered"});
        assert_eq!(auth_error_message(&body), "User already registered");

        let body = serde_json::json!({"message": "", "error": "boom"});
        assert_eq!(auth_error_message(&body), "boom");

        assert_eq!(
            auth_error_message(&serde_json::Value::Null),
            "An unexpected error occurred"
        );
    }

    #[test]
    fn server_errors_are_retried_then_labelled() {
        let mut calls = 0;
        let err = with_retries("list courses", || -> Result<()> {
            calls += 1;
            Err(StatusError::new(reqwest::StatusCode::SERVICE_UNAVAILABLE, "upstream down").into())
        })
        .unwrap_err();
        assert_eq!(calls, 3);
        let msg = format!("{:#}", err);
        assert!(msg.starts_with("list courses"), "{}", msg);
        assert!(msg.contains("upstream down"), "{}", msg);
    }

    #[test]
    fn client_errors_fail_on_the_first_attempt() {
        for status in [
            reqwest::StatusCode::UNAUTHORIZED,
            reqwest::StatusCode::FORBIDDEN,
            reqwest::StatusCode::NOT_FOUND,
        ] {
            let mut calls = 0;
            let err = with_retries("select courses", || -> Result<()> {
                calls += 1;
                Err(anyhow::Error::new(StatusError::new(status, "denied")).context("select courses"))
            })
            .unwrap_err();
            assert_eq!(calls, 1, "{}", status);
            assert!(format!("{:#}", err).contains("denied"));
        }
    }

    #[test]
    fn recovers_after_a_transient_failure() {
        let mut calls = 0;
        let v = with_retries("select lessons", || -> Result<u8> {
            calls += 1;
            if calls == 1 {
                return Err(StatusError::new(reqwest::StatusCode::BAD_GATEWAY, "bad gateway").into());
            }
            Ok(7)
        })
        .unwrap();
        assert_eq!((v, calls), (7, 2));
    }

    #[test]
    fn undecodable_rows_are_not_retried() {
        let mut calls = 0;
        let _ = with_retries("select quizzes", || -> Result<()> {
            calls += 1;
            serde_json::from_str::<Vec<u8>>("not json").context("parse quizzes rows")?;
            Ok(())
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn verifier_is_long_enough_for_pkce() {
        let v = generate_verifier().unwrap();
        assert_eq!(v.len(), 64);
        assert!(v.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(v, generate_verifier().unwrap());
    }
}
