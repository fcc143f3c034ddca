use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use super::*;
use crate::backend::MemoryBackend;

fn backend_with_user() -> Arc<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend.add_account("ada@example.com", "secret1", Some("Ada"));
    Arc::new(backend)
}

#[test]
fn loading_until_first_check_resolves() {
    let backend = backend_with_user();
    backend.restore_session("ada@example.com");

    let mut holder = SessionHolder::new();
    assert!(holder.is_loading());
    assert!(holder.get_session().is_none());

    let found = holder.refresh_from_backend(backend, Duration::from_secs(5));

    assert!(!holder.is_loading());
    assert_eq!(found.as_ref().map(|s| s.email.as_str()), Some("ada@example.com"));
    assert_eq!(holder.get_session(), found.as_ref());
}

#[test]
fn restored_session_is_not_announced_as_login() {
    let backend = backend_with_user();
    backend.restore_session("ada@example.com");

    let mut holder = SessionHolder::new();
    let changes = Rc::new(RefCell::new(0));
    let _sub = {
        let changes = changes.clone();
        holder.on_session_change(move |_| *changes.borrow_mut() += 1)
    };

    holder.refresh_from_backend(backend, Duration::from_secs(5));
    assert!(holder.get_session().is_some());
    assert_eq!(*changes.borrow(), 0);
}

#[test]
fn failing_check_resolves_to_no_session() {
    let backend = backend_with_user();
    backend.restore_session("ada@example.com");
    backend.set_offline(true);

    let mut holder = SessionHolder::new();
    assert!(holder.refresh_from_backend(backend, Duration::from_secs(5)).is_none());
    assert!(!holder.is_loading());
}

#[test]
fn hung_check_gives_up_after_timeout() {
    let backend = backend_with_user();
    backend.restore_session("ada@example.com");
    backend.set_latency(Duration::from_secs(2));

    let mut holder = SessionHolder::new();
    let started = Instant::now();
    let found = holder.refresh_from_backend(backend, Duration::from_millis(100));

    assert!(found.is_none());
    assert!(!holder.is_loading());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn apply_updates_cache_then_notifies() {
    let mut holder = SessionHolder::new();
    let seen: Rc<RefCell<Vec<SessionChange>>> = Rc::default();
    let sub = {
        let seen = seen.clone();
        holder.on_session_change(move |c| seen.borrow_mut().push(c.clone()))
    };
    let session = Session {
        subject_id: "u-1".to_string(),
        email: "ada@example.com".to_string(),
        display_name: None,
    };

    holder.apply(SessionChange::SignedIn(session.clone()));
    assert_eq!(holder.get_session(), Some(&session));
    holder.apply(SessionChange::SignedOut);
    assert!(holder.get_session().is_none());
    assert_eq!(
        *seen.borrow(),
        vec![SessionChange::SignedIn(session), SessionChange::SignedOut]
    );

    assert_eq!(holder.change_listener_count(), 1);
    drop(sub);
    assert_eq!(holder.change_listener_count(), 0);
}
