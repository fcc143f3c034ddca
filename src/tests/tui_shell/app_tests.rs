use std::sync::Arc;

use super::*;
use crate::backend::MemoryBackend;

fn signed_in_app(dir: &std::path::Path) -> (Arc<MemoryBackend>, App) {
    let backend = Arc::new(MemoryBackend::with_sample_catalog());
    backend.add_account("ada@example.com", "secret1", Some("Ada"));
    backend.restore_session("ada@example.com");
    let client = Client::with_backend(backend.clone(), Duration::from_secs(5));
    let store = LocalStore::open(dir).unwrap();
    let mut app = App::new(client, store, Preferences::default());
    app.start();
    app.sync();
    (backend, app)
}

fn home_greeting(app: &App) -> Option<String> {
    app.current_view::<HomeView>()
        .and_then(|v| v.greeting().map(str::to_string))
}

#[test]
fn logout_on_home_drops_the_greeting() {
    let dir = tempfile::tempdir().unwrap();
    let (_backend, mut app) = signed_in_app(dir.path());
    assert_eq!(home_greeting(&app).as_deref(), Some("Ada"));

    app.logout();
    app.sync();

    assert_eq!(app.client.current_screen(), Screen::Home);
    assert!(app.current_view::<HomeView>().is_some());
    assert_eq!(home_greeting(&app), None);
}

#[test]
fn expired_session_on_home_drops_the_greeting() {
    let dir = tempfile::tempdir().unwrap();
    let (backend, mut app) = signed_in_app(dir.path());
    backend.set_reject_refresh(true);

    app.client.refresh_session().unwrap();
    app.sync();

    assert_eq!(home_greeting(&app), None);
}
