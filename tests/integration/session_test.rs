//! Session lifecycle against a mocked identity service

use std::sync::Arc;

use pretty_assertions::assert_eq;
use remotedesk::egui_app::{
    guard, CredentialStore, GuardDecision, MemoryCredentialStore, Route, SessionPhase,
};
use remotedesk::shared::{ErrorKind, Role, SubscriptionStatus};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::assert_ok;
use crate::common::*;

#[tokio::test]
async fn test_login_persists_token_and_sets_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response_json("admin")))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let mut session = session_for(&server, store.clone());

    let identity = assert_ok!(session.login("ada@example.com", "pw").await);
    assert_eq!(identity.role, Role::Admin);
    assert!(session.is_authenticated());
    assert!(session.is_admin());
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(store.load().unwrap().as_deref(), Some(TOKEN));
    assert_eq!(session.api().token(), Some(TOKEN));
}

#[tokio::test]
async fn test_failed_login_leaves_session_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(detail("Invalid credentials")))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let mut session = session_for(&server, store.clone());

    let err = session.login("ada@example.com", "bad").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationFailure);
    assert!(session.current().is_none());
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn test_register_signs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response_json("user")))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let mut session = session_for(&server, store.clone());

    let identity = assert_ok!(session.register("ada@example.com", "pw", "Ada").await);
    assert_eq!(identity.name, "Ada");
    assert!(!session.is_admin());
    assert_eq!(store.load().unwrap().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_restore_with_valid_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(me_json("user", Some(active_subscription_json()))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_token(TOKEN));
    let mut session = session_for(&server, store.clone());
    assert!(session.loading());

    session.restore().await;

    assert!(!session.loading());
    assert_eq!(session.current().map(|i| i.email.as_str()), Some("ada@example.com"));
    let subscription = session.subscription().expect("subscription restored");
    assert_eq!(subscription.status, SubscriptionStatus::Active);
    assert_eq!(guard::check(Route::Dashboard, &session), GuardDecision::Allow);
}

#[tokio::test]
async fn test_restore_with_rejected_token_clears_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(detail("Invalid token")))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_token("stale"));
    let mut session = session_for(&server, store.clone());

    session.restore().await;

    assert!(!session.loading());
    assert!(session.current().is_none());
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(
        guard::check(Route::Dashboard, &session),
        GuardDecision::Redirect(Route::Login)
    );
}

#[tokio::test]
async fn test_restore_with_server_error_keeps_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_token(TOKEN));
    let mut session = session_for(&server, store.clone());

    session.restore().await;

    assert!(!session.loading());
    assert!(session.current().is_none());
    assert_eq!(store.load().unwrap().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn test_restore_without_token_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = session_for(&server, Arc::new(MemoryCredentialStore::new()));
    session.restore().await;

    assert_eq!(session.phase(), SessionPhase::Ready);
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_logout_clears_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response_json("user")))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let mut session = session_for(&server, store.clone());
    assert_ok!(session.login("ada@example.com", "pw").await);

    session.logout();

    assert!(session.current().is_none());
    assert_eq!(session.api().token(), None);
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(
        guard::check(Route::Subscribe, &session),
        GuardDecision::Redirect(Route::Login)
    );
}
