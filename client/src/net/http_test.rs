use super::*;
use crate::state::session::{MemoryTokenStore, SessionError, SessionState, TokenStore};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, session: SessionStore) -> ApiClient {
    let config = ClientConfig::new(&server.uri()).unwrap();
    ApiClient::new(&config, session).unwrap()
}

fn authenticated(token: &str) -> SessionStore {
    let session = SessionStore::in_memory();
    session.set(token).unwrap();
    session
}

/// Token store that counts removals so repeated clears are observable.
#[derive(Clone, Default)]
struct CountingStore {
    removals: Arc<AtomicUsize>,
}

impl TokenStore for CountingStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(Some("counted".to_owned()))
    }

    fn save(&self, _token: &str) -> Result<(), SessionError> {
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        self.removals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// URL helpers
// =============================================================================

#[test]
fn endpoint_and_media_url_join_against_base() {
    let config = ClientConfig::new("https://api.example.org/").unwrap();
    let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();

    assert_eq!(client.endpoint("/api/book"), "https://api.example.org/api/book");
    assert_eq!(client.endpoint("api/book"), "https://api.example.org/api/book");
    assert_eq!(client.media_url("/uploads/a.jpg"), "https://api.example.org/uploads/a.jpg");
    assert_eq!(client.media_url("https://cdn.example.org/a.jpg"), "https://cdn.example.org/a.jpg");
}

#[test]
fn media_url_handles_scheme_case_and_protocol_relative_urls() {
    let config = ClientConfig::new("https://api.example.org").unwrap();
    let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();

    assert_eq!(client.media_url("HTTPS://cdn.example.org/a.jpg"), "https://cdn.example.org/a.jpg");
    assert_eq!(client.media_url("Http://cdn.example.org/b.mp4"), "http://cdn.example.org/b.mp4");
    assert_eq!(client.media_url("//cdn.example.org/c.jpg"), "https://cdn.example.org/c.jpg");
}

#[test]
fn paths_stay_under_a_base_path_prefix() {
    let config = ClientConfig::new("https://example.org/backend").unwrap();
    let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();

    assert_eq!(client.endpoint("/api/book"), "https://example.org/backend/api/book");
    assert_eq!(client.media_url("/uploads/a.jpg"), "https://example.org/backend/uploads/a.jpg");
    assert_eq!(client.media_url("uploads/b.jpg"), "https://example.org/backend/uploads/b.jpg");
}

#[test]
fn decode_body_treats_empty_as_null() {
    let unit: () = decode_body("  ").unwrap();
    assert_eq!(unit, ());
    assert!(matches!(decode_body::<Vec<Value>>("{"), Err(ApiError::Decode(_))));
}

#[test]
fn call_builder_defaults_to_no_retry() {
    let call = Call::get("/api/admin/bookings");
    assert_eq!(call.method(), &Method::GET);
    assert_eq!(call.path(), "/api/admin/bookings");
    assert_eq!(call.retry_policy(), RetryPolicy::NONE);
    assert_eq!(call.retry(RetryPolicy::STANDARD).retry_policy(), RetryPolicy::STANDARD);
}

// =============================================================================
// auth header
// =============================================================================

#[tokio::test]
async fn attaches_stored_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/contacts"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, authenticated("tok-123"));
    let items: Vec<Value> = client.send(&Call::get("/api/admin/contacts")).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn sends_unauthenticated_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/gallery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    let _: Vec<Value> = client.send(&Call::get("/api/admin/gallery")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn token_is_read_at_send_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/donors"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    let client = client_for(&server, session.clone());
    session.set("fresh").unwrap();
    let _: Vec<Value> = client.send(&Call::get("/api/admin/donors")).await.unwrap();
}

// =============================================================================
// classification
// =============================================================================

#[tokio::test]
async fn unauthorized_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/bookings"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })))
        .mount(&server)
        .await;

    let session = authenticated("stale");
    let mut rx = session.subscribe();
    let client = client_for(&server, session.clone());

    let result = client.send::<Vec<Value>>(&Call::get("/api/admin/bookings")).await;

    assert_eq!(result, Err(ApiError::Unauthorized));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(session.token(), None);
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
}

#[tokio::test]
async fn concurrent_unauthorized_responses_clear_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = CountingStore::default();
    let removals = store.removals.clone();
    let session = SessionStore::open(store).unwrap();
    assert!(session.is_authenticated());
    let client = client_for(&server, session.clone());

    let bookings = Call::get("/api/admin/bookings");
    let contacts = Call::get("/api/admin/contacts");
    let (a, b) = tokio::join!(client.send::<Value>(&bookings), client.send::<Value>(&contacts));

    assert_eq!(a, Err(ApiError::Unauthorized));
    assert_eq!(b, Err(ApiError::Unauthorized));
    assert_eq!(removals.load(Ordering::SeqCst), 1);
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/contact"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "message": "Email is invalid" })))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    let call = Call::post("/api/contact").json(&json!({ "email": "nope" })).unwrap();
    let result = client.send::<Value>(&call).await;

    assert_eq!(result, Err(ApiError::Server { status: 422, message: Some("Email is invalid".to_owned()) }));
}

#[tokio::test]
async fn server_error_without_json_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    let result = client.send::<Value>(&Call::get("/")).await;
    assert_eq!(result, Err(ApiError::Server { status: 502, message: None }));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let server = MockServer::start().await;
    let config = ClientConfig::new(&server.uri()).unwrap();
    drop(server);

    let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
    let result = client.send::<Value>(&Call::get("/api/admin/gallery")).await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn slow_backend_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).unwrap().with_request_timeout(Duration::from_millis(200));
    let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
    let result = client.send::<Value>(&Call::get("/")).await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}

// =============================================================================
// retry
// =============================================================================

#[tokio::test]
async fn retries_transient_failures_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/gallery"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/gallery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "_id": "g1" }])))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    let call = Call::get("/api/admin/gallery").retry(RetryPolicy::new(3, Duration::from_millis(10)));
    let items: Vec<Value> = client.send(&call).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, authenticated("tok"));
    let call = Call::get("/api/admin/bookings").retry(RetryPolicy::new(3, Duration::from_millis(10)));
    assert_eq!(client.send::<Value>(&call).await, Err(ApiError::Unauthorized));
}

#[tokio::test]
async fn unwrapped_call_fails_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::open(MemoryTokenStore::default()).unwrap());
    let call = Call::post("/api/book").json(&json!({})).unwrap();
    assert!(client.send::<Value>(&call).await.is_err());
}
