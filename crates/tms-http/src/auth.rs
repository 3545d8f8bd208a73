// tms-http/src/auth.rs
// ============================================================================
// Module: TMS Authn/Authz
// Description: Authentication and scope enforcement for REST requests.
// Purpose: Provide fail-closed local-only and bearer token policies.
// Dependencies: tms-config, axum, sha2
// ============================================================================

//! ## Overview
//! Every request is classified into a [`RouteAccess`] level before any
//! handler runs. Resolution lookups (`GET /translations?packs=...`) and the
//! health checks are public; every other read needs the `read` scope and
//! every mutation needs `write`. Local-only mode requires a loopback peer
//! whenever the peer address is known.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::net::IpAddr;

use axum::http::Method;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;
use tms_config::AuthScope;
use tms_config::ServerAuthConfig;
use tms_config::ServerAuthMode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted `Authorization` header size.
const MAX_AUTH_HEADER_BYTES: usize = 8 * 1024;

/// Query parameter that selects the resolution lookup.
pub(crate) const PACKS_PARAM: &str = "packs";

// ============================================================================
// SECTION: Route Access
// ============================================================================

/// Access level a request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// No credentials required.
    Public,
    /// Requires the `read` scope.
    Read,
    /// Requires the `write` scope.
    Write,
}

impl RouteAccess {
    /// Classifies a request by method, path, and raw query string.
    #[must_use]
    pub fn classify(method: &Method, path: &str, query: Option<&str>) -> Self {
        let path = path.trim_end_matches('/');
        let safe = method == Method::GET || method == Method::HEAD;
        if !safe {
            return Self::Write;
        }
        match path {
            "/health" | "/ready" => Self::Public,
            "/translations" if query.is_some_and(has_packs_param) => Self::Public,
            _ => Self::Read,
        }
    }

    /// Returns the scope this access level needs, if any.
    #[must_use]
    pub const fn required_scope(self) -> Option<AuthScope> {
        match self {
            Self::Public => None,
            Self::Read => Some(AuthScope::Read),
            Self::Write => Some(AuthScope::Write),
        }
    }

    /// Returns the access label used in audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Per-request inputs for auth decisions.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Peer IP address when the transport reports one.
    pub peer_ip: Option<IpAddr>,
    /// Raw `Authorization` header value.
    pub auth_header: Option<String>,
}

impl RequestContext {
    /// Builds a request context.
    #[must_use]
    pub const fn new(peer_ip: Option<IpAddr>, auth_header: Option<String>) -> Self {
        Self {
            peer_ip,
            auth_header,
        }
    }

    /// Returns true unless the peer is known and not loopback.
    #[must_use]
    pub fn peer_is_local(&self) -> bool {
        self.peer_ip.is_none_or(|ip| ip.is_loopback())
    }
}

// ============================================================================
// SECTION: Auth Context
// ============================================================================

/// Authentication method used for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Public route; no credentials evaluated.
    Anonymous,
    /// Local-only loopback access.
    Local,
    /// Bearer token authentication.
    BearerToken,
}

impl AuthMethod {
    /// Returns the method label used in audit events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Local => "local",
            Self::BearerToken => "bearer_token",
        }
    }
}

/// Authenticated caller context, attached to the request for handlers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authentication method.
    pub method: AuthMethod,
    /// Hex sha256 of the bearer token.
    pub token_fingerprint: Option<String>,
    /// Peer IP address when known.
    pub peer_ip: Option<IpAddr>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authentication or authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Missing or invalid credentials.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    /// Credentials are valid but lack the needed scope.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Authn/authz interface for REST requests.
pub trait RequestAuthz: Send + Sync {
    /// Authorizes a request. Returns the caller context on success.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the request is rejected.
    fn authorize(
        &self,
        ctx: &RequestContext,
        access: RouteAccess,
    ) -> Result<AuthContext, AuthError>;
}

// ============================================================================
// SECTION: Default Policy
// ============================================================================

/// Default policy derived from `[server.auth]`.
pub struct DefaultRequestAuthz {
    /// Configured auth mode.
    mode: ServerAuthMode,
    /// Accepted tokens and their scopes.
    tokens: BTreeMap<String, BTreeSet<AuthScope>>,
}

impl DefaultRequestAuthz {
    /// Builds the policy from server auth configuration.
    #[must_use]
    pub fn from_config(config: &ServerAuthConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .map(|entry| (entry.token.clone(), entry.scopes.clone()))
            .collect();
        Self {
            mode: config.mode,
            tokens,
        }
    }

    /// Returns the configured auth mode.
    #[must_use]
    pub const fn mode(&self) -> ServerAuthMode {
        self.mode
    }
}

impl RequestAuthz for DefaultRequestAuthz {
    fn authorize(
        &self,
        ctx: &RequestContext,
        access: RouteAccess,
    ) -> Result<AuthContext, AuthError> {
        match self.mode {
            ServerAuthMode::LocalOnly => authorize_local_only(ctx),
            ServerAuthMode::BearerToken => match access.required_scope() {
                None => Ok(AuthContext {
                    method: AuthMethod::Anonymous,
                    token_fingerprint: None,
                    peer_ip: ctx.peer_ip,
                }),
                Some(scope) => authorize_bearer(ctx, &self.tokens, scope),
            },
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when the raw query carries a non-empty resolution parameter.
pub(crate) fn has_packs_param(query: &str) -> bool {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .any(|(key, value)| key == PACKS_PARAM && !value.is_empty())
}

/// Returns the lowercase hex sha256 of `token`.
fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Local-only policy: loopback peers only.
fn authorize_local_only(ctx: &RequestContext) -> Result<AuthContext, AuthError> {
    if ctx.peer_is_local() {
        Ok(AuthContext {
            method: AuthMethod::Local,
            token_fingerprint: None,
            peer_ip: ctx.peer_ip,
        })
    } else {
        Err(AuthError::Unauthenticated("local-only mode requires loopback access".to_string()))
    }
}

/// Bearer policy: known token carrying `scope`.
fn authorize_bearer(
    ctx: &RequestContext,
    tokens: &BTreeMap<String, BTreeSet<AuthScope>>,
    scope: AuthScope,
) -> Result<AuthContext, AuthError> {
    let token = parse_bearer_token(ctx.auth_header.as_deref())?;
    let scopes = tokens
        .get(&token)
        .ok_or_else(|| AuthError::Unauthenticated("invalid bearer token".to_string()))?;
    if !scopes.contains(&scope) {
        return Err(AuthError::Unauthorized(format!("token lacks {} scope", scope.as_str())));
    }
    Ok(AuthContext {
        method: AuthMethod::BearerToken,
        token_fingerprint: Some(token_fingerprint(&token)),
        peer_ip: ctx.peer_ip,
    })
}

/// Extracts the token from a `Bearer` authorization header.
fn parse_bearer_token(auth_header: Option<&str>) -> Result<String, AuthError> {
    let header = auth_header
        .ok_or_else(|| AuthError::Unauthenticated("missing authorization".to_string()))?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(AuthError::Unauthenticated("authorization header too large".to_string()));
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::Unauthenticated("invalid authorization header".to_string()));
    }
    Ok(token.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
