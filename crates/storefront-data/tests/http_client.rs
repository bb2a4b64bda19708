use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use storefront_data::{
    ApiConfig, ApiError, BackoffStrategy, HttpClient, RetryPolicy, SessionContext,
    NETWORK_ERROR_MESSAGE,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Pong {
    ok: bool,
}

fn client_for(server: &MockServer, session: Arc<SessionContext>) -> HttpClient {
    let config = ApiConfig::new(format!("{}/api", server.uri()))
        .unwrap()
        .with_timeout(Duration::from_secs(2))
        .with_retry(RetryPolicy::new(2).with_backoff(BackoffStrategy::None));
    HttpClient::new(&config, session).unwrap()
}

#[tokio::test]
async fn test_get_attaches_bearer_token_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(query_param("userId", "u1"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(SessionContext::with_token("tok-1")));
    let pong: Pong = client.get("/cart").query("userId", "u1").send().await.unwrap();
    assert_eq!(pong, Pong { ok: true });
}

#[tokio::test]
async fn test_get_is_retried_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(SessionContext::new()));
    let err = client.get("/products").send::<Pong>().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.user_message(), "Request failed with status 503");
}

#[tokio::test]
async fn test_mutations_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_json(json!({"userId": "u1"})))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Order failed"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(SessionContext::new()));
    let err = client
        .post("/orders")
        .json(&json!({"userId": "u1"}))
        .unwrap()
        .send_empty()
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 500,
            message: "Order failed".to_string()
        }
    );
}

#[tokio::test]
async fn test_unauthorized_clears_shared_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Session expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(SessionContext::with_token("stale"));
    let mut watcher = session.subscribe();
    let client = client_for(&server, session.clone());
    let err = client.get("/users/profile").send::<Pong>().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Session expired");
    assert_eq!(session.token(), None);
    assert!(watcher.has_changed().unwrap());
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(SessionContext::new()));
    let err = client.get("/products").send::<Pong>().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let config = ApiConfig::new("http://127.0.0.1:1/api")
        .unwrap()
        .with_retry(RetryPolicy::none());
    let client = HttpClient::new(&config, Arc::new(SessionContext::new())).unwrap();
    let err = client.get("/products").send::<Pong>().await.unwrap_err();
    assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_multipart_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/profile/avatar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(SessionContext::with_token("t")));
    let pong: Pong = client
        .post("/users/profile/avatar")
        .file("avatar", vec![0x89, 0x50, 0x4e, 0x47], "me.png", "image/png")
        .send()
        .await
        .unwrap();
    assert!(pong.ok);
}
