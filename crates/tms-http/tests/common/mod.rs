// tms-http/tests/common/mod.rs
// =============================================================================
// Module: HTTP Test Helpers
// Description: Shared router, request, and audit helpers for API tests.
// Purpose: Drive the axum router in-process without binding sockets.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers may panic on setup failure."
)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::body::Body;
use axum::http::HeaderMap;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use serde_json::Value;
use serde_json::json;
use time::Duration;
use time::OffsetDateTime;
use tms_config::AuthScope;
use tms_config::AuthTokenConfig;
use tms_config::ServerAuthConfig;
use tms_config::ServerAuthMode;
use tms_config::TmsConfig;
use tms_core::InMemoryPackStore;
use tms_core::ManualClock;
use tms_core::SharedPackStore;
use tms_core::TranslationService;
use tms_http::AuditSink;
use tms_http::AuthAuditEvent;
use tms_http::PackAuditEvent;
use tms_http::TmsServer;
use tower::ServiceExt;

/// Token granting read only.
pub const READ_TOKEN: &str = "reader-token";
/// Token granting read and write.
pub const WRITE_TOKEN: &str = "writer-token";

/// Fixed start instant for manual clocks.
pub fn start() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::days(20_000)
}

/// Returns a local-only config with audit disabled.
pub fn local_config() -> TmsConfig {
    let mut config = TmsConfig::default();
    config.server.audit.enabled = false;
    config
}

/// Returns a bearer config with a read token and a read/write token.
pub fn bearer_config() -> TmsConfig {
    let mut config = local_config();
    config.server.auth = ServerAuthConfig {
        mode: ServerAuthMode::BearerToken,
        tokens: vec![
            AuthTokenConfig {
                token: READ_TOKEN.to_string(),
                scopes: [AuthScope::Read].into_iter().collect(),
            },
            AuthTokenConfig {
                token: WRITE_TOKEN.to_string(),
                scopes: [AuthScope::Read, AuthScope::Write].into_iter().collect(),
            },
        ],
    };
    config
}

/// Builds a server over an in-memory store and a pinned clock.
pub fn server_with_clock(config: TmsConfig) -> (TmsServer, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start()));
    let service = TranslationService::with_clock(
        SharedPackStore::from_store(InMemoryPackStore::new()),
        Arc::clone(&clock) as Arc<dyn tms_core::Clock + Send + Sync>,
    );
    let server = TmsServer::with_service(config, service).expect("server");
    (server, clock)
}

/// Builds a local-only router and its clock.
pub fn local_router() -> (Router, Arc<ManualClock>) {
    let (server, clock) = server_with_clock(local_config());
    (server.router(), clock)
}

/// Decoded response parts.
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// JSON body, or `Null` for empty bodies.
    pub body: Value,
}

/// Sends `request` through `router` and decodes the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

/// Builds a bodiless request with an optional bearer token.
pub fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

/// Builds a JSON request with an optional bearer token.
pub fn json_request(method: &str, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder =
        Request::builder().method(method).uri(uri).header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// Builds a valid creation body.
pub fn creation_body(pack_name: &str, locale: &str) -> Value {
    let definitions: BTreeMap<&str, &str> =
        BTreeMap::from([("greeting", "Hello"), ("farewell", "Bye")]);
    json!({
        "packName": pack_name,
        "locale": locale,
        "definitions": definitions,
    })
}

/// Creates a pack through the API and returns its id.
pub async fn create(router: &Router, pack_name: &str, locale: &str, token: Option<&str>) -> String {
    let body = creation_body(pack_name, locale);
    let response = send(router, json_request("POST", "/translations", &body, token)).await;
    assert_eq!(response.status, StatusCode::CREATED, "create failed: {}", response.body);
    response.body["id"].as_str().expect("id").to_string()
}

/// Audit sink that keeps serialized events in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<Value>>,
}

impl RecordingAuditSink {
    /// Returns a snapshot of the recorded events.
    pub fn events(&self) -> Vec<Value> {
        self.events.lock().expect("audit lock").clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record_pack(&self, event: &PackAuditEvent) {
        self.events.lock().expect("audit lock").push(serde_json::to_value(event).expect("event"));
    }

    fn record_auth(&self, event: &AuthAuditEvent) {
        self.events.lock().expect("audit lock").push(serde_json::to_value(event).expect("event"));
    }
}
