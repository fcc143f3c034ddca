use super::*;
use crate::backend::MemoryBackend;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[test]
fn plain_address_has_no_grant() {
    assert_eq!(parse_redirect(&url("http://localhost:5173/")), None);
    assert_eq!(
        parse_redirect(&url("http://localhost:5173/?tab=explore#top")),
        None
    );
}

#[test]
fn fragment_tokens_are_parsed() {
    let grant = parse_redirect(&url(
        "http://localhost:5173/#access_token=abc&refresh_token=def&expires_in=3600&token_type=bearer&type=signup",
    ));
    assert_eq!(
        grant,
        Some(RedirectGrant::Tokens {
            access_token: "abc".to_string(),
            refresh_token: Some("def".to_string()),
            expires_in: Some(3600),
        })
    );
}

#[test]
fn query_code_and_errors_are_parsed() {
    assert_eq!(
        parse_redirect(&url("http://localhost:5173/?code=xyz")),
        Some(RedirectGrant::Code("xyz".to_string()))
    );
    assert_eq!(
        parse_redirect(&url(
            "http://localhost:5173/?error=access_denied&error_description=User+cancelled"
        )),
        Some(RedirectGrant::Error {
            code: "access_denied".to_string(),
            description: Some("User cancelled".to_string()),
        })
    );
}

#[test]
fn stripping_keeps_unrelated_parameters() {
    let mut loc =
        Location::parse("http://localhost:5173/?tab=explore&code=xyz#access_token=a&section=2")
            .unwrap();
    assert!(loc.strip_auth_params());
    assert_eq!(loc.as_str(), "http://localhost:5173/?tab=explore#section=2");
    assert!(!loc.strip_auth_params());
}

#[test]
fn emptied_fragment_is_removed() {
    let mut loc = Location::parse("http://localhost:5173/#access_token=a&expires_in=60").unwrap();
    loc.strip_auth_params();
    assert_eq!(loc.as_str(), "http://localhost:5173/");
}

#[test]
fn no_grant_is_a_no_op() {
    let backend = MemoryBackend::new();
    let mut handler = RedirectHandler::new();
    let mut loc = Location::parse("http://localhost:5173/?tab=explore").unwrap();

    let out = handler.complete_redirect(&mut loc, &backend);

    assert_eq!(out, RedirectOutcome::NotApplicable);
    assert_eq!(loc.as_str(), "http://localhost:5173/?tab=explore");
}

#[test]
fn redirect_completes_once_and_strips_address() {
    let backend = MemoryBackend::new();
    let session = backend.add_account("ada@example.com", "secret1", Some("Ada"));
    let token = backend.issue_redirect_grant("ada@example.com").unwrap();

    let raw = format!(
        "http://localhost:5173/#access_token={}&refresh_token=r&expires_in=3600",
        token
    );
    let mut handler = RedirectHandler::new();
    let mut loc = Location::parse(&raw).unwrap();

    assert_eq!(
        handler.complete_redirect(&mut loc, &backend),
        RedirectOutcome::SignedIn(session)
    );
    assert_eq!(loc.as_str(), "http://localhost:5173/");

    // Second pass over the cleaned address, and a replay of the original one.
    assert_eq!(
        handler.complete_redirect(&mut loc, &backend),
        RedirectOutcome::NotApplicable
    );
    let mut replay = Location::parse(&raw).unwrap();
    assert_eq!(
        handler.complete_redirect(&mut replay, &backend),
        RedirectOutcome::NotApplicable
    );
    assert_eq!(replay.as_str(), "http://localhost:5173/");
}

#[test]
fn provider_error_fails_with_generic_message() {
    let backend = MemoryBackend::new();
    let mut handler = RedirectHandler::new();
    let mut loc =
        Location::parse("http://localhost:5173/?error=server_error&error_description=boom").unwrap();

    let out = handler.complete_redirect(&mut loc, &backend);

    assert_eq!(
        out,
        RedirectOutcome::Failed(REDIRECT_FAILED_MESSAGE.to_string())
    );
    assert_eq!(loc.as_str(), "http://localhost:5173/");
}

#[test]
fn rejected_exchange_fails_with_generic_message() {
    let backend = MemoryBackend::new();
    let mut handler = RedirectHandler::new();
    let mut loc = Location::parse("http://localhost:5173/?code=unknown").unwrap();

    let out = handler.complete_redirect(&mut loc, &backend);

    assert_eq!(
        out,
        RedirectOutcome::Failed(REDIRECT_FAILED_MESSAGE.to_string())
    );
    assert_eq!(loc.as_str(), "http://localhost:5173/");
}

#[test]
fn stripping_leaves_other_segments_untouched() {
    let mut loc = Location::parse("http://localhost:5173/#/courses&access_token=abc").unwrap();
    assert!(loc.strip_auth_params());
    assert_eq!(loc.as_str(), "http://localhost:5173/#/courses");

    let mut loc = Location::parse("http://localhost:5173/?q=a%20b&code=xyz").unwrap();
    assert!(loc.strip_auth_params());
    assert_eq!(loc.as_str(), "http://localhost:5173/?q=a%20b");
}
