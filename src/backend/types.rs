use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Deserialize)]
pub(super) struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl AuthUser {
    pub fn into_session(self) -> Session {
        let display_name = ["full_name", "name", "user_name"]
            .iter()
            .filter_map(|k| self.user_metadata.get(*k).and_then(|v| v.as_str()))
            .find(|s| !s.trim().is_empty())
            .map(str::to_string);
        Session {
            subject_id: self.id,
            email: self.email.unwrap_or_default(),
            display_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl TokenResponse {
    pub fn into_stored(self, now: i64) -> StoredSession {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));
        StoredSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into_session(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignupData<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct SignupData<'a> {
    pub full_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct PkceGrant<'a> {
    pub auth_code: &'a str,
    pub code_verifier: &'a str,
}

/// `quizzes(title)` / `lessons(title)` embeds.
#[derive(Debug, Default, Deserialize)]
pub(super) struct TitleEmbed {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProgressRow {
    pub lesson_id: String,
    #[serde(default)]
    pub lessons: Option<TitleEmbed>,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub completion_percentage: f64,
    #[serde(default)]
    pub updated_at: String,
}

impl From<ProgressRow> for ProgressRecord {
    fn from(row: ProgressRow) -> Self {
        ProgressRecord {
            lesson_id: row.lesson_id,
            lesson_title: row.lessons.and_then(|l| l.title),
            status: row.status,
            completion_percentage: row.completion_percentage,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AttemptRow {
    pub quiz_id: String,
    #[serde(default)]
    pub quizzes: Option<TitleEmbed>,
    pub score: u32,
    #[serde(default)]
    pub completed_at: String,
}

impl From<AttemptRow> for QuizAttempt {
    fn from(row: AttemptRow) -> Self {
        QuizAttempt {
            quiz_id: row.quiz_id,
            quiz_title: row.quizzes.and_then(|q| q.title),
            score: row.score,
            completed_at: row.completed_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusRow {
    #[serde(default)]
    pub status: ProgressStatus,
}

#[derive(Debug, Serialize)]
pub(super) struct NewQuizAttempt<'a> {
    pub user_id: &'a str,
    pub quiz_id: &'a str,
    pub score: u32,
    pub completed_at: String,
}
