//! In-process backend used by tests and local demos.

use std::collections::HashMap;
use std::time::Duration;

use super::http_client::now_ts;
use super::*;

#[derive(Clone)]
struct Account {
    session: Session,
    password: String,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<Account>,
    current: Option<Session>,
    expires_at: Option<i64>,

    offline: bool,
    latency: Duration,
    fail_sign_out: bool,
    reject_refresh: bool,
    require_confirmation: bool,

    // Redirect tokens and PKCE codes mapped to the subject they log in.
    grants: HashMap<String, String>,
    next_id: u64,

    courses: Vec<Course>,
    lessons: Vec<Lesson>,
    quizzes: Vec<Quiz>,
    questions: Vec<QuizQuestion>,
    profiles: Vec<UserProfile>,
    progress: Vec<(String, ProgressRecord)>,
    attempts: Vec<(String, QuizAttempt)>,
    contact: Vec<ContactMessage>,

    sign_out_calls: usize,
}

impl Inner {
    fn mint_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.session.email.eq_ignore_ascii_case(email))
    }

    fn session_for(&self, subject_id: &str) -> Option<Session> {
        self.accounts
            .iter()
            .find(|a| a.session.subject_id == subject_id)
            .map(|a| a.session.clone())
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend preloaded with a small catalog: two courses with lessons,
    /// and one quiz on the first.
    pub fn with_sample_catalog() -> Self {
        let backend = Self::new();
        backend.add_course(Course {
            id: "1".to_string(),
            title: "React for Beginners".to_string(),
            description: "Learn the fundamentals of React and build dynamic UIs.".to_string(),
            category: "web development".to_string(),
            difficulty: Difficulty::Beginner,
            image_url: None,
            students_enrolled: 1200,
        });
        backend.add_course(Course {
            id: "2".to_string(),
            title: "AI with Python".to_string(),
            description: "Build intelligent systems with Python and machine learning.".to_string(),
            category: "ai".to_string(),
            difficulty: Difficulty::Advanced,
            image_url: None,
            students_enrolled: 640,
        });
        for (id, course_id, title, position) in [
            ("l-1", "1", "Components and props", 1),
            ("l-2", "1", "State and hooks", 2),
            ("l-3", "2", "NumPy warm-up", 1),
        ] {
            backend.add_lesson(Lesson {
                id: id.to_string(),
                course_id: course_id.to_string(),
                title: title.to_string(),
                description: String::new(),
                duration_minutes: Some(15),
                position,
            });
        }
        backend.add_quiz(
            Quiz {
                id: "q-1".to_string(),
                course_id: "1".to_string(),
                title: "React basics".to_string(),
            },
            vec![
                QuizQuestion {
                    id: "qq-1".to_string(),
                    quiz_id: "q-1".to_string(),
                    question: "Which hook holds local state?".to_string(),
                    options: vec![
                        "useEffect".to_string(),
                        "useState".to_string(),
                        "useMemo".to_string(),
                    ],
                    correct_answer: 1,
                },
                QuizQuestion {
                    id: "qq-2".to_string(),
                    quiz_id: "q-1".to_string(),
                    question: "What do components receive from their parent?".to_string(),
                    options: vec!["props".to_string(), "refs".to_string()],
                    correct_answer: 0,
                },
            ],
        );
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulated network: latency first, then the offline switch.
    fn round_trip(&self) -> Result<()> {
        let (latency, offline) = {
            let inner = self.lock();
            (inner.latency, inner.offline)
        };
        if !latency.is_zero() {
            std::thread::sleep(latency);
        }
        if offline {
            anyhow::bail!("backend unavailable");
        }
        Ok(())
    }

    pub fn add_account(&self, email: &str, password: &str, display_name: Option<&str>) -> Session {
        let mut inner = self.lock();
        let subject_id = inner.mint_id("user");
        let session = Session {
            subject_id: subject_id.clone(),
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
        };
        inner.accounts.push(Account {
            session: session.clone(),
            password: password.to_string(),
        });
        inner.profiles.push(UserProfile {
            id: subject_id,
            email: email.to_string(),
            full_name: display_name.map(str::to_string),
            role: Some("learner".to_string()),
            created_at: Some(now_ts()),
        });
        session
    }

    /// Registers a one-time token or code that logs `email` in through the
    /// redirect exchange.
    pub fn issue_redirect_grant(&self, email: &str) -> Option<String> {
        let mut inner = self.lock();
        let subject = inner.account_by_email(email)?.session.subject_id.clone();
        let grant = inner.mint_id("grant");
        inner.grants.insert(grant.clone(), subject);
        Some(grant)
    }

    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = latency;
    }

    pub fn set_fail_sign_out(&self, fail: bool) {
        self.lock().fail_sign_out = fail;
    }

    pub fn set_reject_refresh(&self, reject: bool) {
        self.lock().reject_refresh = reject;
    }

    pub fn set_require_confirmation(&self, require: bool) {
        self.lock().require_confirmation = require;
    }

    pub fn set_expires_at(&self, expires_at: Option<i64>) {
        self.lock().expires_at = expires_at;
    }

    /// Starts the backend with `email` already signed in, as a restored
    /// session would.
    pub fn restore_session(&self, email: &str) -> bool {
        let mut inner = self.lock();
        let Some(session) = inner.account_by_email(email).map(|a| a.session.clone()) else {
            return false;
        };
        inner.current = Some(session);
        true
    }

    pub fn add_course(&self, course: Course) {
        self.lock().courses.push(course);
    }

    pub fn add_lesson(&self, lesson: Lesson) {
        self.lock().lessons.push(lesson);
    }

    pub fn add_quiz(&self, quiz: Quiz, questions: Vec<QuizQuestion>) {
        let mut inner = self.lock();
        inner.quizzes.push(quiz);
        inner.questions.extend(questions);
    }

    pub fn add_progress(&self, user_id: &str, record: ProgressRecord) {
        self.lock().progress.push((user_id.to_string(), record));
    }

    pub fn contact_messages(&self) -> Vec<ContactMessage> {
        self.lock().contact.clone()
    }

    pub fn sign_out_calls(&self) -> usize {
        self.lock().sign_out_calls
    }
}

impl AuthService for MemoryBackend {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.round_trip()?;
        let mut inner = self.lock();
        let session = match inner.account_by_email(email) {
            Some(a) if a.password == password => a.session.clone(),
            _ => anyhow::bail!("Invalid login credentials"),
        };
        inner.current = Some(session.clone());
        Ok(session)
    }

    fn sign_up(&self, email: &str, password: &str, display_name: &str) -> Result<Session> {
        self.round_trip()?;
        if self.lock().account_by_email(email).is_some() {
            anyhow::bail!("User already registered");
        }
        if password.len() < 6 {
            anyhow::bail!("Password should be at least 6 characters");
        }
        let name = Some(display_name).filter(|n| !n.trim().is_empty());
        let session = self.add_account(email, password, name);

        let mut inner = self.lock();
        if inner.require_confirmation {
            anyhow::bail!(CONFIRM_EMAIL_MESSAGE);
        }
        inner.current = Some(session.clone());
        Ok(session)
    }

    fn sign_in_with_provider(&self, provider: Provider) -> Result<String> {
        self.round_trip()?;
        Ok(format!("memory://authorize?provider={}", provider.as_str()))
    }

    fn sign_out(&self) -> Result<()> {
        let mut inner = self.lock();
        inner.sign_out_calls += 1;
        inner.current = None;
        if inner.offline || inner.fail_sign_out {
            anyhow::bail!("sign out: backend unavailable");
        }
        Ok(())
    }

    fn current_session(&self) -> Result<Option<Session>> {
        self.round_trip()?;
        Ok(self.lock().current.clone())
    }

    fn refresh_session(&self) -> Result<Option<Session>> {
        self.round_trip()?;
        let mut inner = self.lock();
        if inner.reject_refresh || inner.current.is_none() {
            inner.current = None;
            return Ok(None);
        }
        inner.expires_at = inner.expires_at.map(|_| super::http_client::now_unix() + 3600);
        Ok(inner.current.clone())
    }

    fn complete_redirect_exchange(&self, grant: &RedirectGrant) -> Result<Session> {
        self.round_trip()?;
        let mut inner = self.lock();
        let key = match grant {
            RedirectGrant::Tokens { access_token, .. } => access_token,
            RedirectGrant::Code(code) => code,
            RedirectGrant::Error { code, .. } => anyhow::bail!("provider returned {}", code),
        };
        let subject = inner
            .grants
            .remove(key)
            .ok_or_else(|| anyhow::anyhow!("invalid or expired grant"))?;
        let session = inner
            .session_for(&subject)
            .ok_or_else(|| anyhow::anyhow!("user not found"))?;
        inner.current = Some(session.clone());
        Ok(session)
    }

    fn delete_account(&self) -> Result<()> {
        self.round_trip()?;
        let mut inner = self.lock();
        let Some(current) = inner.current.take() else {
            anyhow::bail!("not signed in");
        };
        inner
            .accounts
            .retain(|a| a.session.subject_id != current.subject_id);
        inner.profiles.retain(|p| p.id != current.subject_id);
        Ok(())
    }

    fn session_expires_at(&self) -> Option<i64> {
        self.lock().expires_at
    }
}

impl RowStore for MemoryBackend {
    fn list_courses(&self) -> Result<Vec<Course>> {
        self.round_trip()?;
        let mut out = self.lock().courses.clone();
        out.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(out)
    }

    fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        self.round_trip()?;
        Ok(self
            .lock()
            .courses
            .iter()
            .find(|c| c.id == course_id)
            .cloned())
    }

    fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>> {
        self.round_trip()?;
        let mut out: Vec<Lesson> = self
            .lock()
            .lessons
            .iter()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect();
        out.sort_by_key(|l| l.position);
        Ok(out)
    }

    fn list_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>> {
        self.round_trip()?;
        Ok(self
            .lock()
            .quizzes
            .iter()
            .filter(|q| q.course_id == course_id)
            .cloned()
            .collect())
    }

    fn get_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        self.round_trip()?;
        Ok(self.lock().quizzes.iter().find(|q| q.id == quiz_id).cloned())
    }

    fn quiz_questions(&self, quiz_id: &str) -> Result<Vec<QuizQuestion>> {
        self.round_trip()?;
        Ok(self
            .lock()
            .questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        self.round_trip()?;
        Ok(self.lock().profiles.iter().find(|p| p.id == user_id).cloned())
    }

    fn user_progress(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<ProgressRecord>> {
        self.round_trip()?;
        let mut out: Vec<ProgressRecord> = self
            .lock()
            .progress
            .iter()
            .filter(|(u, _)| u == user_id)
            .map(|(_, r)| r.clone())
            .collect();
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        out.truncate(limit.unwrap_or(usize::MAX));
        Ok(out)
    }

    fn all_progress_statuses(&self) -> Result<Vec<ProgressStatus>> {
        self.round_trip()?;
        Ok(self.lock().progress.iter().map(|(_, r)| r.status).collect())
    }

    fn quiz_attempts(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<QuizAttempt>> {
        self.round_trip()?;
        let mut out: Vec<QuizAttempt> = self
            .lock()
            .attempts
            .iter()
            .filter(|(u, _)| u == user_id)
            .map(|(_, a)| a.clone())
            .collect();
        // Stable sort keeps insertion order for attempts in the same second.
        out.reverse();
        out.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        out.truncate(limit.unwrap_or(usize::MAX));
        Ok(out)
    }

    fn record_quiz_attempt(&self, user_id: &str, quiz_id: &str, score: u32) -> Result<()> {
        self.round_trip()?;
        let mut inner = self.lock();
        let quiz_title = inner
            .quizzes
            .iter()
            .find(|q| q.id == quiz_id)
            .map(|q| q.title.clone());
        inner.attempts.push((
            user_id.to_string(),
            QuizAttempt {
                quiz_id: quiz_id.to_string(),
                quiz_title,
                score,
                completed_at: now_ts(),
            },
        ));
        Ok(())
    }

    fn insert_contact_message(&self, message: &ContactMessage) -> Result<()> {
        self.round_trip()?;
        self.lock().contact.push(message.clone());
        Ok(())
    }
}
