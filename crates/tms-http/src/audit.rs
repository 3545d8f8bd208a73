// tms-http/src/audit.rs
// ============================================================================
// Module: TMS Audit Logging
// Description: Structured audit events for pack mutations and auth denials.
// Purpose: Emit JSON-line audit records to a pluggable sink.
// Dependencies: tms-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Pack creation, status changes, and deletions each produce one
//! [`PackAuditEvent`], successful or not. Rejected requests produce one
//! [`AuthAuditEvent`]. Sinks serialize events as single JSON lines; tokens are
//! only ever recorded as fingerprints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use tms_core::PackId;
use tms_core::TranslationPack;

use crate::auth::AuthContext;
use crate::auth::AuthError;
use crate::auth::RequestContext;
use crate::auth::RouteAccess;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Pack mutation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackAction {
    /// A pack was created.
    Create,
    /// A pack's enabled flag was flipped.
    ChangeStatus,
    /// A pack was deleted.
    Delete,
}

/// Pack mutation audit payload.
#[derive(Debug, Clone, Serialize)]
pub struct PackAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Mutation kind.
    pub action: PackAction,
    /// Outcome label (`success` or `failure`).
    pub outcome: &'static str,
    /// Target pack id when known.
    pub pack_id: Option<String>,
    /// Pack name when known.
    pub pack_name: Option<String>,
    /// Locale tag when known.
    pub locale: Option<String>,
    /// Enabled flag after the mutation.
    pub enabled: Option<bool>,
    /// Failure message for unsuccessful mutations.
    pub error: Option<String>,
    /// Auth method label.
    pub auth_method: &'static str,
    /// Bearer token fingerprint (sha256).
    pub token_fingerprint: Option<String>,
    /// Caller IP address when available.
    pub peer_ip: Option<String>,
}

impl PackAuditEvent {
    /// Builds a success event for a created or toggled `pack`.
    #[must_use]
    pub fn succeeded(action: PackAction, pack: &TranslationPack, auth: &AuthContext) -> Self {
        Self {
            event: "tms_pack_mutation",
            timestamp_ms: now_ms(),
            action,
            outcome: "success",
            pack_id: Some(pack.id.to_string()),
            pack_name: Some(pack.pack_name.clone()),
            locale: Some(pack.locale.as_str().to_string()),
            enabled: Some(pack.enabled),
            error: None,
            auth_method: auth.method.as_str(),
            token_fingerprint: auth.token_fingerprint.clone(),
            peer_ip: auth.peer_ip.map(|ip| ip.to_string()),
        }
    }

    /// Builds a success event for a deleted pack.
    #[must_use]
    pub fn deleted(pack_id: PackId, auth: &AuthContext) -> Self {
        Self {
            event: "tms_pack_mutation",
            timestamp_ms: now_ms(),
            action: PackAction::Delete,
            outcome: "success",
            pack_id: Some(pack_id.to_string()),
            pack_name: None,
            locale: None,
            enabled: None,
            error: None,
            auth_method: auth.method.as_str(),
            token_fingerprint: auth.token_fingerprint.clone(),
            peer_ip: auth.peer_ip.map(|ip| ip.to_string()),
        }
    }

    /// Builds a failure event.
    #[must_use]
    pub fn failed(
        action: PackAction,
        pack_id: Option<PackId>,
        auth: &AuthContext,
        error: &str,
    ) -> Self {
        Self {
            event: "tms_pack_mutation",
            timestamp_ms: now_ms(),
            action,
            outcome: "failure",
            pack_id: pack_id.map(|id| id.to_string()),
            pack_name: None,
            locale: None,
            enabled: None,
            error: Some(error.to_string()),
            auth_method: auth.method.as_str(),
            token_fingerprint: auth.token_fingerprint.clone(),
            peer_ip: auth.peer_ip.map(|ip| ip.to_string()),
        }
    }
}

/// Auth denial audit payload.
#[derive(Debug, Clone, Serialize)]
pub struct AuthAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Decision outcome.
    pub decision: &'static str,
    /// Access level the request needed.
    pub access: &'static str,
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Caller IP address when available.
    pub peer_ip: Option<String>,
    /// Denial reason.
    pub reason: String,
}

impl AuthAuditEvent {
    /// Builds a deny event.
    #[must_use]
    pub fn denied(
        ctx: &RequestContext,
        access: RouteAccess,
        method: &str,
        path: &str,
        error: &AuthError,
    ) -> Self {
        Self {
            event: "tms_request_authz",
            timestamp_ms: now_ms(),
            decision: "deny",
            access: access.as_str(),
            method: method.to_string(),
            path: path.to_string(),
            peer_ip: ctx.peer_ip.map(|ip| ip.to_string()),
            reason: error.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for pack and auth events.
pub trait AuditSink: Send + Sync {
    /// Records a pack mutation event.
    fn record_pack(&self, event: &PackAuditEvent);

    /// Records an auth denial event.
    fn record_auth(&self, event: &AuthAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record_pack(&self, event: &PackAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }

    fn record_auth(&self, event: &AuthAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized line.
    fn append(&self, payload: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_pack(&self, event: &PackAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }

    fn record_auth(&self, event: &AuthAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.append(&payload);
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_pack(&self, _event: &PackAuditEvent) {}

    fn record_auth(&self, _event: &AuthAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Milliseconds since the Unix epoch; zero if the clock is before it.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis())
}
