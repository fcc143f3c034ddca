mod catalog;
mod config;
mod screen;
mod session;

pub use self::catalog::{
    ContactMessage, Course, Difficulty, Lesson, ProgressRecord, ProgressStatus, Quiz, QuizAttempt,
    QuizQuestion, UserProfile,
};
pub use self::config::{
    BackendConfig, ClientConfig, ClientState, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_REDIRECT_TO,
    DEFAULT_SESSION_CHECK_TIMEOUT_SECS, Preferences, StoredSession, Theme,
};
pub use self::screen::{Access, AuthScreen, Payload, PendingAction, Route, Screen};
pub use self::session::{Provider, Session, SessionChange};
