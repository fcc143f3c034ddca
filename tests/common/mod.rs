//! In-process stand-in for the hosted auth and row API.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use academy::backend::HostedBackend;
use academy::model::{BackendConfig, DEFAULT_REDIRECT_TO};
use academy::store::LocalStore;
use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

pub const ANON_KEY: &str = "test-anon-key";

#[derive(Clone, Debug)]
struct MockUser {
    id: String,
    email: String,
    password: String,
    full_name: Option<String>,
}

impl MockUser {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "email": self.email,
            "user_metadata": { "full_name": self.full_name },
        })
    }
}

#[derive(Debug, Default)]
struct MockState {
    users: Vec<MockUser>,
    access: HashMap<String, String>,
    refresh: HashMap<String, String>,
    // auth code -> (user id, verifier the exchange must present)
    codes: HashMap<String, (String, String)>,
    tables: HashMap<String, Vec<Value>>,
    require_confirmation: bool,
    logout_calls: usize,
    next_id: usize,
}

impl MockState {
    fn mint(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn user(&self, id: &str) -> Option<&MockUser> {
        self.users.iter().find(|u| u.id == id)
    }

    fn issue(&mut self, user_id: &str) -> Option<Value> {
        let user = self.user(user_id)?.to_json();
        let access = self.mint("at");
        let refresh = self.mint("rt");
        self.access.insert(access.clone(), user_id.to_string());
        self.refresh.insert(refresh.clone(), user_id.to_string());
        Some(json!({
            "access_token": access,
            "refresh_token": refresh,
            "token_type": "bearer",
            "expires_in": 3600,
            "user": user,
        }))
    }
}

type Shared = Arc<Mutex<MockState>>;

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MockService {
    pub base_url: String,
    state: Shared,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for MockService {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

pub fn spawn_service() -> Result<MockService> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind mock service")?;
    listener
        .set_nonblocking(true)
        .context("set listener nonblocking")?;
    let addr = listener.local_addr().context("mock service address")?;

    let state = Shared::default();
    let app = routes(state.clone());
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let thread = thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("build tokio runtime");
        rt.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("adopt mock listener");
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .expect("mock service");
        });
    });

    Ok(MockService {
        base_url: format!("http://{}", addr),
        state,
        shutdown: Some(tx),
        thread: Some(thread),
    })
}

#[allow(dead_code)]
impl MockService {
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.base_url.clone(),
            anon_key: ANON_KEY.to_string(),
            redirect_to: DEFAULT_REDIRECT_TO.to_string(),
        }
    }

    pub fn backend(&self, store: Option<LocalStore>) -> HostedBackend {
        HostedBackend::new(self.backend_config(), Duration::from_secs(5), store)
            .expect("build hosted backend")
    }

    pub fn add_user(&self, email: &str, password: &str, full_name: Option<&str>) -> String {
        let mut st = lock(&self.state);
        let id = st.mint("user");
        st.users.push(MockUser {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.map(str::to_string),
        });
        st.tables.entry("users".to_string()).or_default().push(json!({
            "id": id,
            "email": email,
            "full_name": full_name,
            "role": "student",
            "created_at": "2024-01-01T00:00:00Z",
        }));
        id
    }

    pub fn set_require_confirmation(&self, require: bool) {
        lock(&self.state).require_confirmation = require;
    }

    /// Every issued access token stops working; refresh tokens stay valid.
    pub fn expire_access_tokens(&self) {
        lock(&self.state).access.clear();
    }

    /// What the provider would hand back after a user approves an OAuth
    /// login started with `challenge`.
    pub fn approve_oauth(&self, email: &str, challenge: &str) -> String {
        let mut st = lock(&self.state);
        let user_id = st
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.id.clone())
            .expect("known user");
        let code = st.mint("code");
        st.codes
            .insert(code.clone(), (user_id, challenge.to_string()));
        code
    }

    pub fn set_rows(&self, table: &str, rows: Vec<Value>) {
        lock(&self.state).tables.insert(table.to_string(), rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        lock(&self.state)
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn logout_calls(&self) -> usize {
        lock(&self.state).logout_calls
    }

    pub fn has_user(&self, email: &str) -> bool {
        lock(&self.state).users.iter().any(|u| u.email == email)
    }

    pub fn seed_catalog(&self) {
        self.set_rows(
            "courses",
            vec![
                json!({
                    "id": "2", "title": "AI with Python", "description": "Machine learning basics",
                    "category": "ai", "difficulty": "advanced", "students_enrolled": 640,
                }),
                json!({
                    "id": "1", "title": "React for Beginners", "description": "Components and hooks",
                    "category": "web development", "difficulty": "beginner", "students_enrolled": 1200,
                }),
            ],
        );
        self.set_rows(
            "lessons",
            vec![
                json!({"id": "l-2", "course_id": "1", "title": "State and hooks", "position": 2}),
                json!({"id": "l-1", "course_id": "1", "title": "Components and props", "position": 1}),
                json!({"id": "l-3", "course_id": "2", "title": "NumPy warm-up", "position": 1}),
            ],
        );
        self.set_rows(
            "quizzes",
            vec![json!({"id": "q-1", "course_id": "1", "title": "React basics"})],
        );
        self.set_rows(
            "quiz_questions",
            vec![
                json!({
                    "id": "qq-1", "quiz_id": "q-1", "question": "Which hook holds local state?",
                    "options": ["useEffect", "useState"], "correct_answer": 1,
                }),
                json!({
                    "id": "qq-2", "quiz_id": "q-1", "question": "What do components receive?",
                    "options": ["props", "refs"], "correct_answer": 0,
                }),
            ],
        );
    }
}

fn routes(state: Shared) -> Router {
    Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/user", get(user))
        .route("/auth/v1/logout", post(logout))
        .route("/rest/v1/rpc/delete_own_account", post(delete_own_account))
        .route("/rest/v1/:table", get(select).post(insert))
        .with_state(state)
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn check_apikey(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get("apikey").and_then(|v| v.to_str().ok()) {
        Some(ANON_KEY) => Ok(()),
        _ => Err(reply(
            StatusCode::UNAUTHORIZED,
            json!({"message": "Invalid API key"}),
        )),
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn field<'a>(body: &'a Value, key: &str) -> &'a str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn invalid_jwt() -> Response {
    reply(
        StatusCode::UNAUTHORIZED,
        json!({"code": 401, "msg": "invalid JWT"}),
    )
}

async fn token(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_apikey(&headers) {
        return resp;
    }
    let mut st = lock(&state);
    let user_id = match q.get("grant_type").map(String::as_str) {
        Some("password") => st
            .users
            .iter()
            .find(|u| u.email == field(&body, "email") && u.password == field(&body, "password"))
            .map(|u| u.id.clone()),
        Some("refresh_token") => st.refresh.remove(field(&body, "refresh_token")),
        Some("pkce") => match st.codes.remove(field(&body, "auth_code")) {
            Some((id, verifier)) if verifier == field(&body, "code_verifier") => Some(id),
            _ => None,
        },
        _ => None,
    };
    match user_id.and_then(|id| st.issue(&id)) {
        Some(tokens) => Json(tokens).into_response(),
        None => reply(
            StatusCode::BAD_REQUEST,
            json!({"error": "invalid_grant", "error_description": "Invalid login credentials"}),
        ),
    }
}

async fn signup(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_apikey(&headers) {
        return resp;
    }
    let mut st = lock(&state);
    let email = field(&body, "email").to_string();
    if st.users.iter().any(|u| u.email == email) {
        return reply(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({"code": 422, "msg": "User already registered"}),
        );
    }
    let full_name = body
        .pointer("/data/full_name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let id = st.mint("user");
    let user = MockUser {
        id: id.clone(),
        email,
        password: field(&body, "password").to_string(),
        full_name,
    };
    let user_json = user.to_json();
    st.users.push(user);

    if st.require_confirmation {
        return Json(user_json).into_response();
    }
    match st.issue(&id) {
        Some(tokens) => Json(tokens).into_response(),
        None => reply(StatusCode::INTERNAL_SERVER_ERROR, json!({"msg": "lost user"})),
    }
}

async fn user(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = check_apikey(&headers) {
        return resp;
    }
    let st = lock(&state);
    let found = bearer(&headers)
        .and_then(|t| st.access.get(&t).cloned())
        .and_then(|id| st.user(&id).map(MockUser::to_json));
    match found {
        Some(u) => Json(u).into_response(),
        None => invalid_jwt(),
    }
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = check_apikey(&headers) {
        return resp;
    }
    let mut st = lock(&state);
    st.logout_calls += 1;
    match bearer(&headers).and_then(|t| st.access.remove(&t)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => invalid_jwt(),
    }
}

async fn delete_own_account(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = check_apikey(&headers) {
        return resp;
    }
    let mut st = lock(&state);
    let Some(id) = bearer(&headers).and_then(|t| st.access.get(&t).cloned()) else {
        return invalid_jwt();
    };
    st.users.retain(|u| u.id != id);
    st.access.retain(|_, owner| *owner != id);
    st.refresh.retain(|_, owner| *owner != id);
    StatusCode::NO_CONTENT.into_response()
}

fn cell(row: &Value, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

async fn select(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(table): UrlPath<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if let Err(resp) = check_apikey(&headers) {
        return resp;
    }
    let mut rows = lock(&state).tables.get(&table).cloned().unwrap_or_default();
    let mut limit = None;
    for (key, value) in &params {
        match key.as_str() {
            "select" => {}
            "limit" => limit = value.parse::<usize>().ok(),
            "order" => {
                let (col, dir) = value.split_once('.').unwrap_or((value.as_str(), "asc"));
                rows.sort_by(|a, b| cell(a, col).cmp(&cell(b, col)));
                if dir == "desc" {
                    rows.reverse();
                }
            }
            col => {
                if let Some(want) = value.strip_prefix("eq.") {
                    rows.retain(|r| cell(r, col) == want);
                }
            }
        }
    }
    if let Some(n) = limit {
        rows.truncate(n);
    }
    Json(Value::Array(rows)).into_response()
}

async fn insert(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(table): UrlPath<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = check_apikey(&headers) {
        return resp;
    }
    let mut st = lock(&state);
    let rows = st.tables.entry(table).or_default();
    match body {
        Value::Array(items) => rows.extend(items),
        item => rows.push(item),
    }
    StatusCode::CREATED.into_response()
}

/// Runs the `academy` binary against `service` with its own data directory.
#[allow(dead_code)]
pub fn run_academy(data_dir: &Path, service: &MockService, args: &[&str]) -> Result<(bool, String, String)> {
    let out = Command::new(env!("CARGO_BIN_EXE_academy"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(["--url", &service.base_url, "--anon-key", ANON_KEY])
        .args(args)
        .env_remove("ACADEMY_BACKEND_URL")
        .env_remove("ACADEMY_ANON_KEY")
        .env_remove("ACADEMY_REDIRECT_TO")
        .output()
        .with_context(|| format!("run academy {:?}", args))?;
    Ok((
        out.status.success(),
        String::from_utf8_lossy(&out.stdout).to_string(),
        String::from_utf8_lossy(&out.stderr).to_string(),
    ))
}
