use std::sync::Arc;

use serde_json::json;
use storefront_auth::{AuthClient, AuthSession, AuthState, Credentials, SignupRequest};
use storefront_cache::{Cache, MemoryStore, StorageKey};
use storefront_data::{ApiConfig, HttpClient, RetryPolicy, SessionContext};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer, cache: Cache) -> AuthSession {
    let config = ApiConfig::new(format!("{}/api", server.uri()))
        .unwrap()
        .with_retry(RetryPolicy::none());
    let http = HttpClient::new(&config, Arc::new(SessionContext::new())).unwrap();
    AuthSession::new(AuthClient::new(http), cache)
}

#[tokio::test]
async fn test_login_persists_and_propagates_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "asha@example.in", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-1",
            "user": {"_id": "u1", "name": "Asha", "email": "asha@example.in", "role": "user"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Cache::new(MemoryStore::new());
    let mut session = session_for(&server, cache.clone());
    let user = session
        .login(Credentials::new("asha@example.in", "secret1"))
        .await
        .unwrap();
    assert_eq!(user.id.as_str(), "u1");

    assert_eq!(session.state(), AuthState::Authenticated);
    assert_eq!(session.context().token().as_deref(), Some("jwt-1"));
    assert_eq!(
        cache.get_string(StorageKey::AuthToken).await.unwrap().as_deref(),
        Some("jwt-1")
    );
    let cached: Option<storefront_auth::User> = cache.get(StorageKey::User).await.unwrap();
    assert_eq!(cached.map(|u| u.id.into_inner()), Some("u1".to_string()));
}

#[tokio::test]
async fn test_login_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid email or password"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server, Cache::new(MemoryStore::new()));
    let err = session
        .login(Credentials::new("a@x.in", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Invalid email or password");
    assert_eq!(session.error(), Some("Invalid email or password"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_signup_registers_and_authenticates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({"name": "Ravi", "email": "ravi@example.in", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": "jwt-2",
            "user": {"id": "u2", "name": "Ravi", "email": "ravi@example.in"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server, Cache::new(MemoryStore::new()));
    session
        .signup(SignupRequest::new("Ravi", "ravi@example.in", "hunter22"))
        .await
        .unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("jwt-2"));
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer jwt-3"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Cache::new(MemoryStore::new());
    cache.set_string(StorageKey::AuthToken, "jwt-3").await.unwrap();
    cache
        .set(
            StorageKey::User,
            &json!({"id": "u3", "name": "Meera", "email": "m@example.in"}),
        )
        .await
        .unwrap();
    cache.set(StorageKey::OnboardingComplete, &true).await.unwrap();

    let mut session = session_for(&server, cache.clone());
    assert!(session.restore().await);

    session.logout().await;
    assert!(!session.is_authenticated());
    assert_eq!(session.token(), None);
    assert!(session.user().is_none());
    assert_eq!(session.context().token(), None);
    assert_eq!(cache.get_string(StorageKey::User).await.unwrap(), None);
    assert_eq!(
        cache.get::<bool>(StorageKey::OnboardingComplete).await.unwrap(),
        Some(true)
    );
}
