//! Composition root: wires the session holder, the gated navigator and the
//! redirect handler to one backend, and exposes the operations screens and
//! commands call.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::backend::{AuthService, HostedBackend, RowStore};
use crate::catalog::{
    ContactDraft, ProfileStats, ProfileSummary, ProgressSummary, QuizScore, QuizSession,
    RECENT_ACTIVITY_LIMIT,
};
use crate::gate::{GateState, NavOutcome, Navigator};
use crate::model::{
    AuthScreen, Course, Lesson, Payload, PendingAction, Provider, Quiz, Route, Screen, Session,
    SessionChange,
};
use crate::observe::Subscription;
use crate::redirect::{Location, RedirectHandler, RedirectOutcome};
use crate::session::SessionHolder;
use crate::settings::{BackendOverrides, resolve_backend};
use crate::store::LocalStore;

/// Refresh when the access token has less than this left.
pub const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short user-facing message, shown once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CourseDetail {
    pub course: Course,
    pub lessons: Vec<Lesson>,
    pub quizzes: Vec<Quiz>,
    pub progress: ProgressSummary,
}

pub struct Client {
    auth: Arc<dyn AuthService>,
    rows: Arc<dyn RowStore>,
    holder: SessionHolder,
    nav: Navigator,
    redirect: RedirectHandler,
    session_check_timeout: Duration,

    // Session changes waiting to reach the navigator, oldest first.
    inbox: Rc<RefCell<VecDeque<SessionChange>>>,
    _inbox_sub: Subscription,
    notices: Vec<Notice>,
}

impl Client {
    pub fn new(
        auth: Arc<dyn AuthService>,
        rows: Arc<dyn RowStore>,
        session_check_timeout: Duration,
    ) -> Self {
        let holder = SessionHolder::new();
        let inbox: Rc<RefCell<VecDeque<SessionChange>>> = Rc::default();
        let sub = {
            let inbox = inbox.clone();
            holder.on_session_change(move |change| inbox.borrow_mut().push_back(change.clone()))
        };
        Self {
            auth,
            rows,
            holder,
            nav: Navigator::new(),
            redirect: RedirectHandler::new(),
            session_check_timeout,
            inbox,
            _inbox_sub: sub,
            notices: Vec::new(),
        }
    }

    /// One backend serving both auth and rows.
    pub fn with_backend<B>(backend: Arc<B>, session_check_timeout: Duration) -> Self
    where
        B: AuthService + RowStore + 'static,
    {
        let auth: Arc<dyn AuthService> = backend.clone();
        let rows: Arc<dyn RowStore> = backend;
        Self::new(auth, rows, session_check_timeout)
    }

    /// Client for the hosted service configured in `store`, with flag and
    /// environment overrides applied. Tokens persist in the same store.
    pub fn open(store: LocalStore, overrides: &BackendOverrides) -> Result<Self> {
        let cfg = store.read_config()?;
        let backend_cfg = resolve_backend(overrides, &cfg)?;
        let backend = HostedBackend::new(backend_cfg, cfg.http_timeout(), Some(store))?;
        Ok(Self::with_backend(
            Arc::new(backend),
            cfg.session_check_timeout(),
        ))
    }

    /// Startup session check. Resolves within the configured timeout.
    pub fn start(&mut self) -> Option<Session> {
        self.holder
            .refresh_from_backend(self.auth.clone(), self.session_check_timeout)
    }

    pub fn is_loading(&self) -> bool {
        self.holder.is_loading()
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.holder.get_session()
    }

    pub fn current_route(&self) -> &Route {
        self.nav.current()
    }

    pub fn current_screen(&self) -> Screen {
        self.nav.current().screen
    }

    pub fn gate_state(&self) -> &GateState {
        self.nav.state()
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.nav.pending()
    }

    pub fn is_login_prompt_visible(&self) -> bool {
        self.nav.is_login_prompt_visible()
    }

    pub fn auth_error(&self) -> Option<&str> {
        self.nav.auth_error()
    }

    pub fn subscribe_route(&self, f: impl FnMut(&Route) + 'static) -> Subscription {
        self.nav.subscribe_route(f)
    }

    pub fn subscribe_prompt(&self, f: impl FnMut(&bool) + 'static) -> Subscription {
        self.nav.subscribe_prompt(f)
    }

    pub fn subscribe_session(&self, f: impl FnMut(&Option<Session>) + 'static) -> Subscription {
        self.holder.observe(f)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
    }

    fn apply(&mut self, change: SessionChange) {
        self.holder.apply(change);
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            match next {
                Some(change) => self.nav.on_session_change(&change),
                None => break,
            }
        }
    }

    pub fn request_navigation(&mut self, screen: Screen, payload: Option<Payload>) -> NavOutcome {
        let session = self.holder.get_session().cloned();
        self.nav.request(screen, payload, session.as_ref())
    }

    pub fn dismiss_login_prompt(&mut self) {
        self.nav.dismiss_prompt();
    }

    pub fn choose_auth_screen(&mut self, which: AuthScreen) -> bool {
        self.nav.choose_auth_screen(which)
    }

    fn auth_failed(&mut self, err: &anyhow::Error) {
        let reason = format!("{:#}", err);
        self.nav.authentication_failed(reason.clone());
        self.notify(NoticeLevel::Error, reason);
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<Session> {
        match self.auth.sign_in(email.trim(), password) {
            Ok(session) => {
                let text = format!("Welcome back, {}!", session.greeting_name());
                self.apply(SessionChange::SignedIn(session.clone()));
                self.notify(NoticeLevel::Success, text);
                Ok(session)
            }
            Err(err) => {
                self.auth_failed(&err);
                Err(err)
            }
        }
    }

    pub fn sign_up(&mut self, email: &str, password: &str, display_name: &str) -> Result<Session> {
        match self
            .auth
            .sign_up(email.trim(), password, display_name.trim())
        {
            Ok(session) => {
                let text = format!("Account created. Welcome, {}!", session.greeting_name());
                self.apply(SessionChange::SignedIn(session.clone()));
                self.notify(NoticeLevel::Success, text);
                Ok(session)
            }
            Err(err) => {
                self.auth_failed(&err);
                Err(err)
            }
        }
    }

    pub fn sign_in_with_provider(&mut self, provider: Provider) -> Result<String> {
        self.auth
            .sign_in_with_provider(provider)
            .with_context(|| format!("start {} login", provider.label()))
    }

    pub fn complete_redirect(&mut self, location: &mut Location) -> RedirectOutcome {
        let outcome = self.redirect.complete_redirect(location, self.auth.as_ref());
        match &outcome {
            RedirectOutcome::SignedIn(session) => {
                let text = format!("Welcome, {}!", session.greeting_name());
                self.apply(SessionChange::SignedIn(session.clone()));
                self.notify(NoticeLevel::Success, text);
            }
            RedirectOutcome::Failed(reason) => {
                self.nav.authentication_failed(reason.clone());
                self.notify(NoticeLevel::Error, reason.clone());
            }
            RedirectOutcome::NotApplicable => {}
        }
        outcome
    }

    /// Always ends signed out on the home screen; a failed remote call is
    /// only logged.
    pub fn sign_out(&mut self) {
        if let Err(err) = self.auth.sign_out() {
            warn!("remote sign-out failed: {:#}", err);
        }
        self.apply(SessionChange::SignedOut);
        self.notify(NoticeLevel::Info, "Logged out.");
    }

    pub fn refresh_session(&mut self) -> Result<()> {
        match self.auth.refresh_session().context("refresh session")? {
            Some(session) => self.apply(SessionChange::TokenRefreshed(session)),
            None => {
                info!("session ended by the service");
                self.apply(SessionChange::SignedOut);
                self.notify(NoticeLevel::Info, "Your session expired. Please log in again.");
            }
        }
        Ok(())
    }

    /// Refreshes when the token is about to expire. Returns whether a
    /// refresh was attempted.
    pub fn maintain_session(&mut self, now: i64) -> Result<bool> {
        if self.holder.get_session().is_none() {
            return Ok(false);
        }
        match self.auth.session_expires_at() {
            Some(expires_at) if expires_at - now <= REFRESH_MARGIN_SECS => {
                self.refresh_session()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn require_session(&self) -> Result<Session> {
        self.holder
            .get_session()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("login required"))
    }

    pub fn delete_account(&mut self) -> Result<()> {
        self.require_session()?;
        self.auth.delete_account().context("delete account")?;
        self.apply(SessionChange::SignedOut);
        self.notify(NoticeLevel::Info, "Your account has been deleted.");
        Ok(())
    }

    pub fn courses(&self) -> Result<Vec<Course>> {
        self.rows.list_courses().context("load courses")
    }

    pub fn course_detail(&self, course_id: &str) -> Result<CourseDetail> {
        let session = self.require_session()?;
        let course = self
            .rows
            .get_course(course_id)?
            .ok_or_else(|| anyhow::anyhow!("course {} not found", course_id))?;
        let lessons = self.rows.list_lessons(course_id)?;
        let quizzes = self.rows.list_quizzes(course_id)?;
        let records = self.rows.user_progress(&session.subject_id, None)?;
        let progress =
            ProgressSummary::for_lessons(lessons.iter().map(|l| l.id.as_str()), &records);
        Ok(CourseDetail {
            course,
            lessons,
            quizzes,
            progress,
        })
    }

    pub fn quiz(&self, quiz_id: &str) -> Result<QuizSession> {
        self.require_session()?;
        let quiz = self
            .rows
            .get_quiz(quiz_id)?
            .ok_or_else(|| anyhow::anyhow!("quiz {} not found", quiz_id))?;
        let questions = self.rows.quiz_questions(quiz_id)?;
        Ok(QuizSession::new(quiz, questions))
    }

    pub fn submit_quiz(&mut self, quiz: &mut QuizSession) -> Result<QuizScore> {
        let session = self.require_session()?;
        let first = !quiz.is_submitted();
        let score = quiz.submit();
        if first {
            self.rows
                .record_quiz_attempt(&session.subject_id, &quiz.quiz().id, score.percent)
                .context("record quiz attempt")?;
            self.notify(
                NoticeLevel::Success,
                format!("You scored {}/{} ({}%)", score.correct, score.total, score.percent),
            );
        }
        Ok(score)
    }

    pub fn profile_summary(&self) -> Result<ProfileSummary> {
        let session = self.require_session()?;
        let user = &session.subject_id;
        let profile = self.rows.user_profile(user).context("load profile")?;
        let own = self.rows.user_progress(user, None)?;
        let all = self.rows.all_progress_statuses()?;
        let attempts = self.rows.quiz_attempts(user, None)?;
        let stats = ProfileStats::compute(&own, &all, attempts.len());

        let recent_quizzes = attempts.into_iter().take(RECENT_ACTIVITY_LIMIT).collect();
        let recent_lessons = own.into_iter().take(RECENT_ACTIVITY_LIMIT).collect();
        Ok(ProfileSummary {
            profile,
            stats,
            recent_quizzes,
            recent_lessons,
        })
    }

    pub fn contact_draft(&self) -> ContactDraft {
        ContactDraft::prefill(self.holder.get_session())
    }

    pub fn submit_contact(&mut self, draft: &ContactDraft) -> Result<()> {
        let message = draft.validate()?;
        if let Err(err) = self.rows.insert_contact_message(&message) {
            self.notify(NoticeLevel::Error, "Failed to send message. Please try again.");
            return Err(err.context("send contact message"));
        }
        self.notify(NoticeLevel::Success, "Message sent successfully!");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
