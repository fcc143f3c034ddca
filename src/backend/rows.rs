//! Row reads and inserts against the PostgREST-style API.

use serde::de::DeserializeOwned;

use super::http_client::now_ts;
use super::*;

impl HostedBackend {
    /// GET `/rest/v1/<table>` with filters, retried like every idempotent read.
    fn select<T: DeserializeOwned>(&self, table: &str, params: &[(&str, String)]) -> Result<Vec<T>> {
        let label = format!("select {}", table);
        with_retries(&label, || {
            let resp = self
                .get(&format!("/rest/v1/{}", table))
                .query(params)
                .send()
                .with_context(|| format!("{} request", label))?;
            let rows: Vec<T> = self
                .ensure_ok(resp, &label)?
                .json()
                .with_context(|| format!("parse {} rows", table))?;
            Ok(rows)
        })
    }

    fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>> {
        let mut params = params.to_vec();
        params.push(("limit", "1".to_string()));
        Ok(self.select(table, &params)?.into_iter().next())
    }

    fn insert(&self, table: &str, body: &impl serde::Serialize) -> Result<()> {
        let resp = self
            .post(&format!("/rest/v1/{}", table))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .with_context(|| format!("insert into {}", table))?;
        self.ensure_ok(resp, &format!("insert into {}", table))?;
        Ok(())
    }
}

fn eq(v: &str) -> String {
    format!("eq.{}", v)
}

fn with_limit(mut params: Vec<(&'static str, String)>, limit: Option<usize>) -> Vec<(&'static str, String)> {
    if let Some(n) = limit {
        params.push(("limit", n.to_string()));
    }
    params
}

impl RowStore for HostedBackend {
    fn list_courses(&self) -> Result<Vec<Course>> {
        self.select("courses", &[("select", "*".into()), ("order", "title.asc".into())])
    }

    fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        self.select_one("courses", &[("select", "*".into()), ("id", eq(course_id))])
    }

    fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>> {
        self.select(
            "lessons",
            &[
                ("select", "*".into()),
                ("course_id", eq(course_id)),
                ("order", "position.asc".into()),
            ],
        )
    }

    fn list_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>> {
        self.select(
            "quizzes",
            &[
                ("select", "id,course_id,title".into()),
                ("course_id", eq(course_id)),
                ("order", "title.asc".into()),
            ],
        )
    }

    fn get_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        self.select_one(
            "quizzes",
            &[("select", "id,course_id,title".into()), ("id", eq(quiz_id))],
        )
    }

    fn quiz_questions(&self, quiz_id: &str) -> Result<Vec<QuizQuestion>> {
        self.select(
            "quiz_questions",
            &[
                ("select", "*".into()),
                ("quiz_id", eq(quiz_id)),
                ("order", "id.asc".into()),
            ],
        )
    }

    fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.select_one(
            "users",
            &[
                ("select", "id,email,full_name,role,created_at".into()),
                ("id", eq(user_id)),
            ],
        )
    }

    fn user_progress(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<ProgressRecord>> {
        let params = with_limit(
            vec![
                (
                    "select",
                    "lesson_id,lessons(title),status,completion_percentage,updated_at".into(),
                ),
                ("user_id", eq(user_id)),
                ("order", "updated_at.desc".into()),
            ],
            limit,
        );
        let rows: Vec<ProgressRow> = self.select("user_progress", &params)?;
        Ok(rows.into_iter().map(ProgressRecord::from).collect())
    }

    fn all_progress_statuses(&self) -> Result<Vec<ProgressStatus>> {
        let rows: Vec<StatusRow> = self.select("user_progress", &[("select", "status".into())])?;
        Ok(rows.into_iter().map(|r| r.status).collect())
    }

    fn quiz_attempts(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<QuizAttempt>> {
        let params = with_limit(
            vec![
                ("select", "score,completed_at,quiz_id,quizzes(title)".into()),
                ("user_id", eq(user_id)),
                ("order", "completed_at.desc".into()),
            ],
            limit,
        );
        let rows: Vec<AttemptRow> = self.select("quiz_attempts", &params)?;
        Ok(rows.into_iter().map(QuizAttempt::from).collect())
    }

    fn record_quiz_attempt(&self, user_id: &str, quiz_id: &str, score: u32) -> Result<()> {
        self.insert(
            "quiz_attempts",
            &NewQuizAttempt {
                user_id,
                quiz_id,
                score,
                completed_at: now_ts(),
            },
        )
    }

    fn insert_contact_message(&self, message: &ContactMessage) -> Result<()> {
        self.insert("contact_messages", &[message])
    }
}
