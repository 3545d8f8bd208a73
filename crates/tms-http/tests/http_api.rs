// tms-http/tests/http_api.rs
// ============================================================================
// Module: REST API Tests
// Description: End-to-end request handling through the axum router.
// Purpose: Pin status codes, body shapes, and headers for every endpoint.
// ============================================================================

//! ## Overview
//! Drives the router in-process with `tower::ServiceExt::oneshot` in
//! local-only mode, covering the resolution lookup, listing, lookup by id,
//! creation, status changes, deletion, and the failure mappings.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::collections::BTreeSet;

use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::http::header::LOCATION;
use serde_json::json;
use time::Duration;
use tms_core::PackId;
use tms_core::PackStore;
use tms_core::SharedPackStore;
use tms_core::StoreError;
use tms_core::TranslationPack;
use tms_core::TranslationService;
use tms_http::TmsServer;
use tms_http::TranslationPackResponse;

use crate::common::creation_body;
use crate::common::create;
use crate::common::json_request;
use crate::common::local_config;
use crate::common::local_router;
use crate::common::request;
use crate::common::send;
use crate::common::start;

// ============================================================================
// SECTION: Creation and Lookup
// ============================================================================

#[tokio::test]
async fn create_returns_201_with_location_and_pack() {
    let (router, _clock) = local_router();
    let response =
        send(&router, json_request("POST", "/translations", &creation_body("shared", "en"), None))
            .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let pack: TranslationPackResponse = serde_json::from_value(response.body).unwrap();
    assert_eq!(pack.pack_name, "shared");
    assert_eq!(pack.locale, "en");
    assert!(pack.enabled);
    assert_eq!(pack.created, start());
    let keys: Vec<&str> = pack.definitions.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["farewell", "greeting"]);
    let location = response.headers.get(LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, format!("/translations/{}", pack.id));
}

#[tokio::test]
async fn created_pack_serializes_camel_case_with_rfc3339_timestamp() {
    let (router, _clock) = local_router();
    let id = create(&router, "shared", "hu", None).await;
    let response = send(&router, request("GET", &format!("/translations/{id}"), None)).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.body;
    assert_eq!(body["packName"], "shared");
    assert_eq!(body["locale"], "hu");
    assert_eq!(body["enabled"], true);
    assert_eq!(body["created"], "2024-10-04T00:00:00Z");
    assert_eq!(body["definitions"][0], json!({"key": "farewell", "value": "Bye"}));
}

#[tokio::test]
async fn get_unknown_pack_is_404_with_message() {
    let (router, _clock) = local_router();
    let id = PackId::generate();
    let response = send(&router, request("GET", &format!("/translations/{id}"), None)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        json!({"message": format!("Requested translation pack [{id}] not found")})
    );
}

#[tokio::test]
async fn malformed_pack_id_is_400() {
    let (router, _clock) = local_router();
    let response = send(&router, request("GET", "/translations/not-a-uuid", None)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid translation pack id [not-a-uuid]");
}

// ============================================================================
// SECTION: Validation and Decoding
// ============================================================================

#[tokio::test]
async fn invalid_creation_request_is_400_with_field_messages() {
    let (router, _clock) = local_router();
    let body = json!({"packName": "   ", "locale": "en"});
    let response = send(&router, json_request("POST", "/translations", &body, None)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Translation pack creation request is invalid");
    assert_eq!(response.body["validation"]["packName"], "packName must not be blank");
    assert_eq!(response.body["validation"]["definitions"], "definitions are required");
    assert!(response.body["validation"].get("locale").is_none());
}

#[tokio::test]
async fn padded_pack_name_is_stored_trimmed_and_resolvable() {
    let (router, _clock) = local_router();
    let id = create(&router, " shared ", "en", None).await;

    let fetched = send(&router, request("GET", &format!("/translations/{id}"), None)).await;
    assert_eq!(fetched.body["packName"], "shared");

    let padded = send(&router, request("GET", "/translations?packs=%20shared%20", None)).await;
    let packs: Vec<TranslationPackResponse> = serde_json::from_value(padded.body).unwrap();
    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].id.to_string(), id);
}

#[tokio::test]
async fn pack_name_with_comma_is_rejected() {
    let (router, _clock) = local_router();
    let body = creation_body("a,b", "en");
    let response = send(&router, json_request("POST", "/translations", &body, None)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["validation"]["packName"], "packName must not contain ','");

    let listing = send(&router, request("GET", "/translations", None)).await;
    assert_eq!(listing.body, json!([]));
}

#[tokio::test]
async fn unparseable_json_is_400() {
    let (router, _clock) = local_router();
    let request = Request::builder()
        .method("POST")
        .uri("/translations")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&router, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].is_string());
    assert!(response.body.get("validation").is_none());
}

#[tokio::test]
async fn oversized_body_is_413() {
    let mut config = local_config();
    config.server.max_body_bytes = 64;
    let (server, _clock) = common::server_with_clock(config);
    let router = server.router();
    let body = json!({
        "packName": "shared",
        "locale": "en",
        "definitions": {"key": "x".repeat(256)},
    });
    let response = send(&router, json_request("POST", "/translations", &body, None)).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
}

// ============================================================================
// SECTION: Resolution and Listing
// ============================================================================

#[tokio::test]
async fn packs_query_returns_latest_enabled_per_locale() {
    let (router, clock) = local_router();
    let old_en = create(&router, "shared", "en", None).await;
    clock.advance(Duration::hours(1));
    let new_en = create(&router, "shared", "en", None).await;
    let hu = create(&router, "shared", "hu", None).await;
    clock.advance(Duration::hours(1));
    let app = create(&router, "app1", "en", None).await;
    create(&router, "other", "en", None).await;

    let response = send(&router, request("GET", "/translations?packs=shared,app1", None)).await;
    assert_eq!(response.status, StatusCode::OK);
    let packs: Vec<TranslationPackResponse> = serde_json::from_value(response.body).unwrap();
    let ids: BTreeSet<String> = packs.iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids, BTreeSet::from([new_en, hu, app]));
    assert!(!ids.contains(&old_en));
    assert!(packs.iter().all(|p| p.enabled));
    assert!(packs.iter().all(|p| !p.definitions.is_empty()));
}

#[tokio::test]
async fn repeated_packs_parameters_are_merged_and_blanks_ignored() {
    let (router, _clock) = local_router();
    let shared = create(&router, "shared", "en", None).await;
    let app = create(&router, "app1", "en", None).await;

    let response =
        send(&router, request("GET", "/translations?packs=shared,%20&packs=app1", None)).await;
    let packs: Vec<TranslationPackResponse> = serde_json::from_value(response.body).unwrap();
    let ids: BTreeSet<String> = packs.iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids, BTreeSet::from([shared, app]));
}

#[tokio::test]
async fn disabled_versions_are_skipped_by_resolution() {
    let (router, clock) = local_router();
    let older = create(&router, "shared", "en", None).await;
    clock.advance(Duration::minutes(5));
    let newer = create(&router, "shared", "en", None).await;
    let toggled =
        send(&router, request("PUT", &format!("/translations/{newer}/status"), None)).await;
    assert_eq!(toggled.status, StatusCode::CREATED);

    let response = send(&router, request("GET", "/translations?packs=shared", None)).await;
    let packs: Vec<TranslationPackResponse> = serde_json::from_value(response.body).unwrap();
    assert_eq!(packs.len(), 1);
    assert_eq!(packs[0].id.to_string(), older);
}

#[tokio::test]
async fn listing_returns_meta_info_without_definitions() {
    let (router, clock) = local_router();
    let first = create(&router, "shared", "en", None).await;
    clock.advance(Duration::seconds(1));
    let second = create(&router, "app1", "hu", None).await;

    let response = send(&router, request("GET", "/translations", None)).await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], first);
    assert_eq!(items[1]["id"], second);
    assert_eq!(items[1]["packName"], "app1");
    assert!(items.iter().all(|item| item.get("definitions").is_none()));
}

#[tokio::test]
async fn empty_packs_parameter_returns_empty_list() {
    let (router, _clock) = local_router();
    create(&router, "shared", "en", None).await;
    let response = send(&router, request("GET", "/translations?packs=", None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

// ============================================================================
// SECTION: Status and Deletion
// ============================================================================

#[tokio::test]
async fn status_change_returns_201_and_flips_flag_twice() {
    let (router, _clock) = local_router();
    let id = create(&router, "shared", "en", None).await;
    let uri = format!("/translations/{id}/status");

    let first = send(&router, request("PUT", &uri, None)).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["enabled"], false);
    assert_eq!(
        first.headers.get(LOCATION).unwrap().to_str().unwrap(),
        format!("/translations/{id}")
    );

    let second = send(&router, request("PUT", &uri, None)).await;
    assert_eq!(second.body["enabled"], true);
}

#[tokio::test]
async fn status_change_on_unknown_pack_is_404() {
    let (router, _clock) = local_router();
    let uri = format!("/translations/{}/status", PackId::generate());
    let response = send(&router, request("PUT", &uri, None)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_204_then_lookup_is_404() {
    let (router, _clock) = local_router();
    let id = create(&router, "shared", "en", None).await;
    let uri = format!("/translations/{id}");

    let deleted = send(&router, request("DELETE", &uri, None)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_null());

    let lookup = send(&router, request("GET", &uri, None)).await;
    assert_eq!(lookup.status, StatusCode::NOT_FOUND);

    let again = send(&router, request("DELETE", &uri, None)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// SECTION: Health and Failures
// ============================================================================

#[tokio::test]
async fn health_and_ready_report_ok() {
    let (router, _clock) = local_router();
    let health = send(&router, request("GET", "/health", None)).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, json!({"status": "ok"}));

    let ready = send(&router, request("GET", "/ready", None)).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body, json!({"status": "ready"}));
}

/// Store whose every call fails with an I/O error.
struct BrokenStore;

impl PackStore for BrokenStore {
    fn list_all(&self) -> Result<Vec<TranslationPack>, StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }

    fn list_by_names(&self, _names: &BTreeSet<String>) -> Result<Vec<TranslationPack>, StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }

    fn exists(&self, _id: PackId) -> Result<bool, StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }

    fn get(&self, _id: PackId) -> Result<Option<TranslationPack>, StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }

    fn put(&self, _pack: &TranslationPack) -> Result<Option<TranslationPack>, StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }

    fn delete(&self, _id: PackId) -> Result<bool, StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }

    fn readiness(&self) -> Result<(), StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }
}

/// Store whose writes never produce a document.
struct SilentStore;

impl PackStore for SilentStore {
    fn list_all(&self) -> Result<Vec<TranslationPack>, StoreError> {
        Ok(Vec::new())
    }

    fn list_by_names(&self, _names: &BTreeSet<String>) -> Result<Vec<TranslationPack>, StoreError> {
        Ok(Vec::new())
    }

    fn exists(&self, _id: PackId) -> Result<bool, StoreError> {
        Ok(false)
    }

    fn get(&self, _id: PackId) -> Result<Option<TranslationPack>, StoreError> {
        Ok(None)
    }

    fn put(&self, _pack: &TranslationPack) -> Result<Option<TranslationPack>, StoreError> {
        Ok(None)
    }

    fn delete(&self, _id: PackId) -> Result<bool, StoreError> {
        Ok(false)
    }
}

/// Builds a local router over `store`.
fn router_over(store: impl PackStore + Send + Sync + 'static) -> axum::Router {
    let service = TranslationService::new(SharedPackStore::from_store(store));
    TmsServer::with_service(local_config(), service).unwrap().router()
}

#[tokio::test]
async fn store_failures_are_500_with_generic_message() {
    let router = router_over(BrokenStore);
    let response = send(&router, request("GET", "/translations", None)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"message": "Unexpected exception occurred"}));

    let ready = send(&router, request("GET", "/ready", None)).await;
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready.body, json!({"status": "unavailable"}));
}

#[tokio::test]
async fn creation_without_persisted_document_is_409() {
    let router = router_over(SilentStore);
    let response =
        send(&router, json_request("POST", "/translations", &creation_body("shared", "en"), None))
            .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    let message = response.body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to create translation pack for request ["));
    assert!(message.contains("packName=shared"));
}

#[tokio::test]
async fn server_rejects_invalid_config() {
    let mut config = local_config();
    config.server.max_body_bytes = 0;
    let service = TranslationService::new(SharedPackStore::from_store(
        tms_core::InMemoryPackStore::new(),
    ));
    let result = TmsServer::with_service(config, service);
    assert!(result.is_err());
}

#[tokio::test]
async fn sqlite_backed_server_persists_packs() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = local_config();
    config.store.store_type = tms_config::StoreType::Sqlite;
    config.store.path = Some(dir.path().join("packs.sqlite"));

    let router = TmsServer::from_config(config.clone()).unwrap().router();
    let id = create(&router, "shared", "en", None).await;
    drop(router);

    let reopened = TmsServer::from_config(config).unwrap().router();
    let response = send(&reopened, request("GET", &format!("/translations/{id}"), None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["packName"], "shared");
}
