use super::*;
use crate::backend::MemoryBackend;
use crate::model::{ProgressRecord, ProgressStatus};

fn signed_in() -> (Arc<MemoryBackend>, Client, Session) {
    let backend = Arc::new(MemoryBackend::with_sample_catalog());
    let session = backend.add_account("ada@example.com", "secret1", Some("Ada"));
    backend.restore_session("ada@example.com");
    let mut client = Client::with_backend(backend.clone(), Duration::from_secs(5));
    client.start();
    (backend, client, session)
}

fn record(lesson_id: &str, status: ProgressStatus, updated_at: &str) -> ProgressRecord {
    ProgressRecord {
        lesson_id: lesson_id.to_string(),
        lesson_title: None,
        status,
        completion_percentage: 0.0,
        updated_at: updated_at.to_string(),
    }
}

#[test]
fn token_near_expiry_is_refreshed() {
    let (backend, mut client, _) = signed_in();
    backend.set_expires_at(Some(1_000));

    assert!(!client.maintain_session(900).unwrap());
    assert!(client.maintain_session(950).unwrap());
    assert!(client.current_session().is_some());
    assert!(backend.session_expires_at().is_some_and(|t| t > 1_000));
}

#[test]
fn rejected_refresh_signs_out_with_notice() {
    let (backend, mut client, _) = signed_in();
    client.request_navigation(Screen::Profile, None);
    backend.set_reject_refresh(true);

    client.refresh_session().unwrap();

    assert!(client.current_session().is_none());
    assert_eq!(client.current_screen(), Screen::Home);
    let notices = client.take_notices();
    assert!(notices.iter().any(|n| n.text.contains("session expired")));
}

#[test]
fn course_detail_requires_session() {
    let backend = Arc::new(MemoryBackend::with_sample_catalog());
    let mut client = Client::with_backend(backend, Duration::from_secs(5));
    client.start();

    assert!(client.courses().unwrap().len() == 2);
    assert!(client.course_detail("1").is_err());
}

#[test]
fn course_detail_counts_only_its_lessons() {
    let (backend, client, session) = signed_in();
    backend.add_progress(&session.subject_id, record("l-1", ProgressStatus::Completed, "2024-01-02"));
    backend.add_progress(&session.subject_id, record("l-3", ProgressStatus::Completed, "2024-01-03"));

    let detail = client.course_detail("1").unwrap();

    assert_eq!(detail.lessons.len(), 2);
    assert_eq!(detail.progress.completed, 1);
    assert_eq!(detail.progress.percent, 50);
    assert_eq!(detail.progress.status, ProgressStatus::InProgress);
}

#[test]
fn quiz_attempt_is_recorded_once() {
    let (backend, mut client, session) = signed_in();
    let mut quiz = client.quiz("q-1").unwrap();
    quiz.answer(0, 1).unwrap();
    quiz.answer(1, 0).unwrap();

    let first = client.submit_quiz(&mut quiz).unwrap();
    let again = client.submit_quiz(&mut quiz).unwrap();

    assert_eq!(first.percent, 100);
    assert_eq!(first, again);
    assert_eq!(
        backend.quiz_attempts(&session.subject_id, None).unwrap().len(),
        1
    );
}

#[test]
fn profile_summary_compares_with_everyone() {
    let (backend, client, session) = signed_in();
    backend.add_progress(&session.subject_id, record("l-1", ProgressStatus::Completed, "2024-01-02"));
    backend.add_progress(&session.subject_id, record("l-2", ProgressStatus::InProgress, "2024-01-03"));
    backend.add_progress("someone-else", record("l-1", ProgressStatus::NotStarted, "2024-01-01"));
    backend.add_progress("someone-else", record("l-2", ProgressStatus::NotStarted, "2024-01-01"));

    let summary = client.profile_summary().unwrap();

    assert_eq!(summary.stats.you_vs_average(), (50, 25));
    assert_eq!(summary.recent_lessons[0].lesson_id, "l-2");
    assert_eq!(
        summary.profile.map(|p| p.email),
        Some("ada@example.com".to_string())
    );
}

#[test]
fn contact_uses_session_identity() {
    let (backend, mut client, _) = signed_in();
    let mut draft = client.contact_draft();
    assert!(draft.identity_locked());
    draft.message = "When does the AI course start?".to_string();

    client.submit_contact(&draft).unwrap();

    let sent = backend.contact_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "ada@example.com");
    assert_eq!(sent[0].name, "Ada");
}

#[test]
fn failed_contact_send_reports_generic_error() {
    let backend = Arc::new(MemoryBackend::with_sample_catalog());
    let mut client = Client::with_backend(backend.clone(), Duration::from_secs(5));
    client.start();
    let mut draft = client.contact_draft();
    draft.set_name("Grace");
    draft.set_email("grace@example.com");
    draft.message = "Hi".to_string();
    backend.set_offline(true);

    assert!(client.submit_contact(&draft).is_err());
    let notices = client.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].text, "Failed to send message. Please try again.");
}

#[test]
fn deleting_the_account_goes_home_signed_out() {
    let (backend, mut client, _) = signed_in();
    client.request_navigation(Screen::Settings, None);

    client.delete_account().unwrap();

    assert!(client.current_session().is_none());
    assert_eq!(client.current_screen(), Screen::Home);
    assert!(backend.sign_in("ada@example.com", "secret1").is_err());
}

#[test]
fn session_observers_hear_logout_from_home() {
    let (_backend, mut client, session) = signed_in();
    let routes = Rc::new(RefCell::new(0));
    let sessions: Rc<RefCell<Vec<Option<Session>>>> = Rc::default();
    let _route_sub = {
        let routes = routes.clone();
        client.subscribe_route(move |_| *routes.borrow_mut() += 1)
    };
    let _session_sub = {
        let sessions = sessions.clone();
        client.subscribe_session(move |s| sessions.borrow_mut().push(s.clone()))
    };
    assert_eq!(client.current_screen(), Screen::Home);

    client.sign_out();

    assert_eq!(*routes.borrow(), 0);
    assert_eq!(*sessions.borrow(), vec![None]);

    client.sign_in("ada@example.com", "secret1").unwrap();
    assert_eq!(sessions.borrow().last(), Some(&Some(session)));
}
