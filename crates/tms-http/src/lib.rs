// tms-http/src/lib.rs
// ============================================================================
// Module: TMS HTTP Library
// Description: Public API surface for the HTTP presentation adapter.
// Purpose: Expose the server, wire types, auth policy, and audit sinks.
// Dependencies: crate::{api, audit, auth, error, server}
// ============================================================================

//! ## Overview
//! The HTTP adapter maps the `/translations` REST surface onto
//! [`tms_core::TranslationService`]. It never computes anything itself: it
//! decodes wire types, authorizes the request, runs the engine call off the
//! async workers, and maps results and failures back to HTTP.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod audit;
pub mod auth;
pub mod error;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use api::ErrorResponse;
pub use api::StatusResponse;
pub use api::TranslationDefinitionResponse;
pub use api::TranslationPackCreationRequest;
pub use api::TranslationPackMetaInfoResponse;
pub use api::TranslationPackResponse;
pub use audit::AuditSink;
pub use audit::AuthAuditEvent;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::PackAction;
pub use audit::PackAuditEvent;
pub use audit::StderrAuditSink;
pub use auth::AuthContext;
pub use auth::AuthError;
pub use auth::AuthMethod;
pub use auth::DefaultRequestAuthz;
pub use auth::RequestAuthz;
pub use auth::RequestContext;
pub use auth::RouteAccess;
pub use error::ApiError;
pub use server::ServerError;
pub use server::TmsServer;
