//! The hosted backend-as-a-service seen from the client: an auth service
//! and a row store, plus the two implementations the client ships with.

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};

use crate::model::{
    BackendConfig, ContactMessage, Course, Difficulty, Lesson, ProgressRecord, ProgressStatus,
    Provider, Quiz, QuizAttempt, QuizQuestion, Session, StoredSession, UserProfile,
};
use crate::redirect::RedirectGrant;
use crate::store::LocalStore;

mod http_client;
pub use self::http_client::auth_error_message;
use self::http_client::with_retries;

mod auth;
mod memory;
mod rows;
mod types;

pub use self::memory::MemoryBackend;
use self::types::*;

/// Message returned when sign-up succeeds but the service wants the email
/// confirmed before it issues a session.
pub const CONFIRM_EMAIL_MESSAGE: &str = "check your email to confirm your account, then log in";

pub trait AuthService: Send + Sync {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<Session>;

    /// Starts an OAuth login and returns the URL the user must open.
    fn sign_in_with_provider(&self, provider: Provider) -> Result<String>;

    /// Ends the session remotely. The local copy is gone afterwards even
    /// when the remote call fails.
    fn sign_out(&self) -> Result<()>;

    fn current_session(&self) -> Result<Option<Session>>;

    /// `Ok(None)` means the service rejected the refresh token and the local
    /// session was dropped.
    fn refresh_session(&self) -> Result<Option<Session>>;

    fn complete_redirect_exchange(&self, grant: &RedirectGrant) -> Result<Session>;

    fn delete_account(&self) -> Result<()>;

    /// Unix seconds at which the current access token expires.
    fn session_expires_at(&self) -> Option<i64> {
        None
    }
}

pub trait RowStore: Send + Sync {
    fn list_courses(&self) -> Result<Vec<Course>>;
    fn get_course(&self, course_id: &str) -> Result<Option<Course>>;
    fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>>;
    fn list_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>>;
    fn get_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>>;
    fn quiz_questions(&self, quiz_id: &str) -> Result<Vec<QuizQuestion>>;

    fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;
    /// Newest first.
    fn user_progress(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<ProgressRecord>>;
    /// Status of every progress row visible to the caller, across all users.
    fn all_progress_statuses(&self) -> Result<Vec<ProgressStatus>>;
    /// Newest first.
    fn quiz_attempts(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<QuizAttempt>>;

    fn record_quiz_attempt(&self, user_id: &str, quiz_id: &str, score: u32) -> Result<()>;
    fn insert_contact_message(&self, message: &ContactMessage) -> Result<()>;
}

/// GoTrue-style auth and PostgREST-style rows over blocking HTTP.
pub struct HostedBackend {
    config: BackendConfig,
    client: reqwest::blocking::Client,
    store: Option<LocalStore>,
    session: Mutex<Option<StoredSession>>,
    // PKCE verifier when there is no store to keep it in.
    verifier: Mutex<Option<String>>,
}

impl HostedBackend {
    /// Restores any session a previous process left in `store`.
    pub fn new(
        config: BackendConfig,
        http_timeout: std::time::Duration,
        store: Option<LocalStore>,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("academy/", env!("CARGO_PKG_VERSION")))
            .timeout(http_timeout)
            .build()
            .context("build reqwest client")?;

        let session = match &store {
            Some(store) => store.session().context("load stored session")?,
            None => None,
        };

        let config = BackendConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Ok(Self {
            config,
            client,
            store,
            session: Mutex::new(session),
            verifier: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn slot(&self) -> MutexGuard<'_, Option<StoredSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stored(&self) -> Option<StoredSession> {
        self.slot().clone()
    }

    fn remember(&self, session: StoredSession) -> Result<Session> {
        let user = session.user.clone();
        if let Some(store) = &self.store {
            store
                .set_session(Some(&session))
                .context("persist session")?;
        }
        *self.slot() = Some(session);
        Ok(user)
    }

    fn pending_verifier(&self) -> Option<String> {
        self.verifier
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_pending_verifier(&self, verifier: Option<String>) {
        *self.verifier.lock().unwrap_or_else(PoisonError::into_inner) = verifier;
    }

    fn forget(&self) {
        *self.slot() = None;
        if let Some(store) = &self.store
            && let Err(err) = store.set_session(None)
        {
            tracing::warn!("clear stored session: {:#}", err);
        }
    }
}
