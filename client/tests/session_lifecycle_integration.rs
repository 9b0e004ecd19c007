use client::api::RequestDispatcher;
use client::auth::session_manager::SessionManager;
use client::auth::session_store::{MemorySessionStore, SessionStore};
use client::auth::types::Credential;
use client::config::ApiConfig;
use claims::{assert_none, assert_some_eq};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manager_for(base_url: &str, store: &Arc<MemorySessionStore>) -> SessionManager {
    let dispatcher = Arc::new(RequestDispatcher::new(reqwest::Client::new(), store.clone()));
    SessionManager::new(dispatcher, store.clone(), ApiConfig::new(base_url))
}

#[tokio::test]
async fn login_stores_issued_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=alice"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-1", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let manager = manager_for(&server.uri(), &store);

    assert!(!manager.is_authenticated());
    assert!(manager.login("alice", "secret").await);
    assert!(manager.is_authenticated());
    assert_some_eq!(store.load(), Credential::bearer("tok-1"));
}

#[tokio::test]
async fn rejected_login_leaves_session_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let manager = manager_for(&server.uri(), &store);

    assert!(!manager.login("alice", "wrong").await);
    assert!(!manager.is_authenticated());
    assert_none!(store.load());
}

#[tokio::test]
async fn login_rejects_empty_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "", "token_type": "bearer"})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let manager = manager_for(&server.uri(), &store);

    assert!(!manager.login("alice", "secret").await);
    assert_none!(store.load());
}

#[tokio::test]
async fn login_absorbs_transport_failure_into_false() {
    let store = Arc::new(MemorySessionStore::new());
    let manager = manager_for("http://127.0.0.1:1", &store);

    assert!(!manager.login("alice", "secret").await);
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn refresh_attaches_current_credential_and_replaces_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("authorization", "Bearer tok-old"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-new", "token_type": "bearer"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.store(&Credential::bearer("tok-old"));
    let manager = manager_for(&server.uri(), &store);

    assert!(manager.refresh().await);
    assert_some_eq!(store.load(), Credential::bearer("tok-new"));
}

#[tokio::test]
async fn rejected_refresh_ends_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.store(&Credential::bearer("tok-stale"));
    let manager = manager_for(&server.uri(), &store);

    // The dispatcher's 401 path clears the store; refresh itself only
    // reports the failure.
    assert!(!manager.refresh().await);
    assert!(!manager.is_authenticated());
    assert_none!(store.load());
}

#[tokio::test]
async fn acknowledged_logout_clears_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Successfully logged out"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.store(&Credential::bearer("tok-1"));
    let manager = manager_for(&server.uri(), &store);

    assert!(manager.logout().await);
    assert_none!(store.load());
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn unacknowledged_logout_still_clears_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.store(&Credential::bearer("tok-1"));
    let manager = manager_for(&server.uri(), &store);

    assert!(!manager.logout().await);
    assert_none!(store.load());
}

#[tokio::test]
async fn logout_clears_the_session_even_when_unreachable() {
    let store = Arc::new(MemorySessionStore::new());
    store.store(&Credential::bearer("tok-1"));
    let manager = manager_for("http://127.0.0.1:1", &store);

    assert!(!manager.logout().await);
    assert_none!(store.load());
}

#[tokio::test]
async fn logout_twice_is_harmless() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.store(&Credential::bearer("tok-1"));
    let manager = manager_for(&server.uri(), &store);

    assert!(manager.logout().await);
    assert_none!(store.load());

    manager.logout().await;
    assert_none!(store.load());
}
