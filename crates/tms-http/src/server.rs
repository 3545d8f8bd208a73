// tms-http/src/server.rs
// ============================================================================
// Module: TMS HTTP Server
// Description: axum router, handlers, and server bootstrap.
// Purpose: Expose the translation service over the `/translations` REST API.
// Dependencies: tms-core, tms-config, tms-store-sqlite, axum, tokio, tracing
// ============================================================================

//! ## Overview
//! [`TmsServer`] wires a validated [`TmsConfig`] to a pack store, the
//! translation service, the auth policy, and an audit sink. Every request
//! passes the auth middleware before reaching a handler; handlers move engine
//! calls onto the blocking pool and map the outcome through [`ApiError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::Extension;
use axum::Json;
use axum::Router;
use axum::extract::ConnectInfo;
use axum::extract::DefaultBodyLimit;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::LOCATION;
use axum::middleware;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::put;
use tms_config::ServerAuditConfig;
use tms_config::ServerAuthMode;
use tms_config::StoreConfig;
use tms_config::StoreType;
use tms_config::TmsConfig;
use tms_core::InMemoryPackStore;
use tms_core::NAME_LIST_SEPARATOR;
use tms_core::PackCreationRequest;
use tms_core::PackId;
use tms_core::PackServiceError;
use tms_core::SharedPackStore;
use tms_core::TranslationPack;
use tms_core::TranslationService;
use tms_store_sqlite::SqlitePackStore;
use tracing::info;
use tracing::warn;

use crate::api::StatusResponse;
use crate::api::TranslationPackCreationRequest;
use crate::api::TranslationPackMetaInfoResponse;
use crate::api::TranslationPackResponse;
use crate::audit::AuditSink;
use crate::audit::AuthAuditEvent;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::PackAction;
use crate::audit::PackAuditEvent;
use crate::audit::StderrAuditSink;
use crate::auth::AuthContext;
use crate::auth::DefaultRequestAuthz;
use crate::auth::PACKS_PARAM;
use crate::auth::RequestAuthz;
use crate::auth::RequestContext;
use crate::auth::RouteAccess;
use crate::error::ApiError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Collection path for translation packs.
const PATH_TRANSLATIONS: &str = "/translations";

// ============================================================================
// SECTION: Server
// ============================================================================

/// Translation management HTTP server.
pub struct TmsServer {
    /// Validated configuration.
    config: TmsConfig,
    /// Translation engine.
    service: TranslationService,
    /// Request auth policy.
    authz: Arc<dyn RequestAuthz>,
    /// Audit sink for mutations and denials.
    audit: Arc<dyn AuditSink>,
}

impl TmsServer {
    /// Builds a server from configuration, opening the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or initialization fails.
    pub fn from_config(config: TmsConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let store = build_pack_store(&config.store)?;
        Self::assemble(config, TranslationService::new(store))
    }

    /// Builds a server over an existing service.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when validation or initialization fails.
    pub fn with_service(
        config: TmsConfig,
        service: TranslationService,
    ) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        Self::assemble(config, service)
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &TmsConfig {
        &self.config
    }

    /// Builds the REST router.
    #[must_use]
    pub fn router(&self) -> Router {
        let state = Arc::new(ServerState {
            service: self.service.clone(),
            authz: Arc::clone(&self.authz),
            audit: Arc::clone(&self.audit),
        });
        Router::new()
            .route(PATH_TRANSLATIONS, get(list_translations).post(create_pack))
            .route("/translations/{pack_id}", get(get_pack).delete(delete_pack))
            .route("/translations/{pack_id}/status", put(change_status))
            .route("/health", get(health))
            .route("/ready", get(ready))
            .layer(middleware::from_fn_with_state(Arc::clone(&state), authorize_request))
            .layer(DefaultBodyLimit::max(self.config.server.max_body_bytes))
            .with_state(state)
    }

    /// Binds the configured address and serves until interrupted.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        emit_local_only_warning(&self.config);
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| ServerError::Transport(format!("http bind failed: {err}")))?;
        info!(bind = %addr, "translation management service listening");
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))
    }

    /// Wires auth and audit around `service`.
    fn assemble(config: TmsConfig, service: TranslationService) -> Result<Self, ServerError> {
        let authz = Arc::new(DefaultRequestAuthz::from_config(&config.server.auth));
        let audit = build_audit_sink(&config.server.audit)?;
        Ok(Self {
            config,
            service,
            authz,
            audit,
        })
    }
}

/// Builds the pack store selected by `[store]`.
fn build_pack_store(config: &StoreConfig) -> Result<SharedPackStore, ServerError> {
    match config.store_type {
        StoreType::Memory => Ok(SharedPackStore::from_store(InMemoryPackStore::new())),
        StoreType::Sqlite => {
            let sqlite = config
                .sqlite_config()
                .ok_or_else(|| ServerError::Config("sqlite store requires path".to_string()))?;
            let store =
                SqlitePackStore::new(&sqlite).map_err(|err| ServerError::Init(err.to_string()))?;
            Ok(SharedPackStore::from_store(store))
        }
    }
}

/// Builds the audit sink selected by `[server.audit]`.
fn build_audit_sink(config: &ServerAuditConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = FileAuditSink::new(FsPath::new(path))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Warns when the server runs without credentials.
fn emit_local_only_warning(config: &TmsConfig) {
    if config.server.auth.mode == ServerAuthMode::LocalOnly {
        warn!(
            "server running in local-only mode without explicit auth; configure server.auth to \
             enable bearer_token"
        );
    }
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

// ============================================================================
// SECTION: State and Middleware
// ============================================================================

/// Shared state for handlers and middleware.
struct ServerState {
    /// Translation engine.
    service: TranslationService,
    /// Request auth policy.
    authz: Arc<dyn RequestAuthz>,
    /// Audit sink.
    audit: Arc<dyn AuditSink>,
}

impl ServerState {
    /// Runs an engine call on the blocking pool.
    async fn run<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&TranslationService) -> Result<T, PackServiceError> + Send + 'static,
    {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || call(&service))
            .await
            .map_err(|err| ApiError::Internal(format!("engine task failed: {err}")))?
            .map_err(ApiError::from)
    }

    /// Records the outcome of a pack mutation.
    fn audit_mutation(
        &self,
        action: PackAction,
        pack_id: Option<PackId>,
        auth: &AuthContext,
        result: &Result<TranslationPack, ApiError>,
    ) {
        let event = match result {
            Ok(pack) => PackAuditEvent::succeeded(action, pack, auth),
            Err(err) => PackAuditEvent::failed(action, pack_id, auth, &err.to_string()),
        };
        self.audit.record_pack(&event);
    }
}

/// Authorizes every request before routing.
async fn authorize_request(
    State(state): State<Arc<ServerState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let access =
        RouteAccess::classify(request.method(), request.uri().path(), request.uri().query());
    let peer_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let ctx = RequestContext::new(peer_ip, auth_header);
    match state.authz.authorize(&ctx, access) {
        Ok(auth) => {
            request.extensions_mut().insert(auth);
            next.run(request).await
        }
        Err(err) => {
            let event = AuthAuditEvent::denied(
                &ctx,
                access,
                request.method().as_str(),
                request.uri().path(),
                &err,
            );
            state.audit.record_auth(&event);
            ApiError::from(err).into_response()
        }
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// `GET /translations`: resolution lookup with `packs`, meta-info listing without.
async fn list_translations(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    if let Some(names) = requested_pack_names(&params) {
        let packs =
            state.run(move |service| service.retrieve_latest_enabled_packs(&names)).await?;
        let body: Vec<TranslationPackResponse> =
            packs.iter().map(TranslationPackResponse::from).collect();
        return Ok(Json(body).into_response());
    }
    let metas = state.run(TranslationService::retrieve_all_meta_info).await?;
    let body: Vec<TranslationPackMetaInfoResponse> =
        metas.iter().map(TranslationPackMetaInfoResponse::from).collect();
    Ok(Json(body).into_response())
}

/// `GET /translations/{pack_id}`.
async fn get_pack(
    State(state): State<Arc<ServerState>>,
    Path(pack_id): Path<String>,
) -> Result<Json<TranslationPackResponse>, ApiError> {
    let id = parse_pack_id(&pack_id)?;
    let pack = state.run(move |service| service.get_pack(id)).await?;
    Ok(Json(TranslationPackResponse::from(&pack)))
}

/// `POST /translations`.
async fn create_pack(
    State(state): State<Arc<ServerState>>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<TranslationPackCreationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(json_rejection)?;
    let request = PackCreationRequest::from(body);
    let result = state.run(move |service| service.create_pack(&request)).await;
    state.audit_mutation(PackAction::Create, None, &auth, &result);
    let pack = result?;
    info!(
        pack_id = %pack.id,
        pack_name = %pack.pack_name,
        locale = %pack.locale,
        "translation pack created"
    );
    Ok(created(&pack))
}

/// `PUT /translations/{pack_id}/status`.
async fn change_status(
    State(state): State<Arc<ServerState>>,
    Extension(auth): Extension<AuthContext>,
    Path(pack_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_pack_id(&pack_id)?;
    let result = state.run(move |service| service.change_status(id)).await;
    state.audit_mutation(PackAction::ChangeStatus, Some(id), &auth, &result);
    let pack = result?;
    info!(pack_id = %pack.id, enabled = pack.enabled, "translation pack status changed");
    Ok(created(&pack))
}

/// `DELETE /translations/{pack_id}`.
async fn delete_pack(
    State(state): State<Arc<ServerState>>,
    Extension(auth): Extension<AuthContext>,
    Path(pack_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_pack_id(&pack_id)?;
    match state.run(move |service| service.delete_pack(id)).await {
        Ok(()) => {
            state.audit.record_pack(&PackAuditEvent::deleted(id, &auth));
            info!(pack_id = %id, "translation pack deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            state.audit.record_pack(&PackAuditEvent::failed(
                PackAction::Delete,
                Some(id),
                &auth,
                &err.to_string(),
            ));
            Err(err)
        }
    }
}

/// `GET /health`: liveness.
async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::new("ok"))
}

/// `GET /ready`: backing store readiness.
async fn ready(State(state): State<Arc<ServerState>>) -> Response {
    match state.run(TranslationService::readiness).await {
        Ok(()) => Json(StatusResponse::new("ready")).into_response(),
        Err(err) => {
            warn!(error = %err, "pack store not ready");
            (StatusCode::SERVICE_UNAVAILABLE, Json(StatusResponse::new("unavailable")))
                .into_response()
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Collects names from every `packs` parameter; `None` when there is none.
fn requested_pack_names(params: &[(String, String)]) -> Option<Vec<String>> {
    let mut requested = false;
    let mut names = Vec::new();
    for (key, value) in params {
        if key != PACKS_PARAM {
            continue;
        }
        requested = true;
        names.extend(
            value
                .split(NAME_LIST_SEPARATOR)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }
    requested.then_some(names)
}

/// Parses a path id, rejecting malformed values with 400.
fn parse_pack_id(raw: &str) -> Result<PackId, ApiError> {
    raw.parse::<PackId>().map_err(|err| ApiError::bad_request(err.to_string()))
}

/// Maps a JSON body rejection onto an API error.
fn json_rejection(rejection: JsonRejection) -> ApiError {
    let status = rejection.status();
    let status = if status == StatusCode::PAYLOAD_TOO_LARGE
        || status == StatusCode::UNSUPPORTED_MEDIA_TYPE
    {
        status
    } else {
        StatusCode::BAD_REQUEST
    };
    ApiError::Rejected {
        status,
        message: rejection.body_text(),
    }
}

/// Builds a 201 response pointing at `pack`.
fn created(pack: &TranslationPack) -> Response {
    let location = format!("{PATH_TRANSLATIONS}/{}", pack.id);
    (StatusCode::CREATED, [(LOCATION, location)], Json(TranslationPackResponse::from(pack)))
        .into_response()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
