// tms-http/src/api.rs
// ============================================================================
// Module: TMS API Wire Types
// Description: JSON request and response records for the REST surface.
// Purpose: Keep the wire contract separate from the domain model.
// Dependencies: tms-core, serde, time
// ============================================================================

//! ## Overview
//! Wire records use camelCase field names and RFC 3339 timestamps. Each one is
//! connected to its domain counterpart by a single `From` mapping; nothing
//! else converts between the two layers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use tms_core::PackCreationRequest;
use tms_core::PackId;
use tms_core::PackMetaInfo;
use tms_core::TranslationDefinition;
use tms_core::TranslationPack;
use tms_core::ValidationErrors;

// ============================================================================
// SECTION: Pack Responses
// ============================================================================

/// A single key/value definition on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationDefinitionResponse {
    /// Translation key.
    pub key: String,
    /// Translated text.
    pub value: String,
}

impl From<&TranslationDefinition> for TranslationDefinitionResponse {
    fn from(definition: &TranslationDefinition) -> Self {
        Self {
            key: definition.key.clone(),
            value: definition.value.clone(),
        }
    }
}

/// Full translation pack as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPackResponse {
    /// Pack identifier.
    pub id: PackId,
    /// Pack family name.
    pub pack_name: String,
    /// Locale tag.
    pub locale: String,
    /// Whether the pack takes part in resolution.
    pub enabled: bool,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    /// Definitions in stored order.
    pub definitions: Vec<TranslationDefinitionResponse>,
}

impl From<&TranslationPack> for TranslationPackResponse {
    fn from(pack: &TranslationPack) -> Self {
        Self {
            id: pack.id,
            pack_name: pack.pack_name.clone(),
            locale: pack.locale.as_str().to_string(),
            enabled: pack.enabled,
            created: pack.created,
            definitions: pack.definitions.iter().map(TranslationDefinitionResponse::from).collect(),
        }
    }
}

/// Pack meta-info as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPackMetaInfoResponse {
    /// Pack identifier.
    pub id: PackId,
    /// Pack family name.
    pub pack_name: String,
    /// Locale tag.
    pub locale: String,
    /// Whether the pack takes part in resolution.
    pub enabled: bool,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}

impl From<&PackMetaInfo> for TranslationPackMetaInfoResponse {
    fn from(meta: &PackMetaInfo) -> Self {
        Self {
            id: meta.id,
            pack_name: meta.pack_name.clone(),
            locale: meta.locale.as_str().to_string(),
            enabled: meta.enabled,
            created: meta.created,
        }
    }
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Pack creation body. Fields are optional so absence surfaces as a
/// validation message instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationPackCreationRequest {
    /// Requested pack name.
    #[serde(default)]
    pub pack_name: Option<String>,
    /// Requested locale tag.
    #[serde(default)]
    pub locale: Option<String>,
    /// Requested definitions.
    #[serde(default)]
    pub definitions: Option<BTreeMap<String, String>>,
}

impl From<TranslationPackCreationRequest> for PackCreationRequest {
    fn from(request: TranslationPackCreationRequest) -> Self {
        Self {
            pack_name: request.pack_name,
            locale: request.locale,
            definitions: request.definitions,
        }
    }
}

// ============================================================================
// SECTION: Status and Errors
// ============================================================================

/// Error body; `validation` is present only for rejected creation requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure message.
    pub message: String,
    /// Per-field validation messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    /// Builds a plain message body.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            validation: None,
        }
    }

    /// Builds a validation body.
    #[must_use]
    pub fn validation(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        Self {
            message: message.into(),
            validation: Some(errors.fields().clone()),
        }
    }
}

/// Liveness and readiness body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Status label.
    pub status: String,
}

impl StatusResponse {
    /// Builds a status body.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}
