// tms-core/src/model/pack.rs
// ============================================================================
// Module: TMS Translation Packs
// Description: Translation pack documents and their meta-info projection.
// Purpose: Define the aggregate root persisted by pack stores.
// Dependencies: crate::model::{identifiers, locale}, serde, time
// ============================================================================

//! ## Overview
//! A [`TranslationPack`] is one stored version of a named, localized set of
//! key/value definitions. Several packs may share a name and locale; they are
//! told apart by `created` and `enabled`. Only `enabled` changes after
//! creation. [`PackMetaInfo`] is the same record without its definitions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::model::identifiers::PackId;
use crate::model::locale::Locale;

// ============================================================================
// SECTION: Pack Types
// ============================================================================

/// Single translation key/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationDefinition {
    /// Translation key.
    pub key: String,
    /// Translated text.
    pub value: String,
}

impl TranslationDefinition {
    /// Creates a new definition.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Stored translation pack document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPack {
    /// Server-assigned identifier.
    pub id: PackId,
    /// Logical pack family name.
    pub pack_name: String,
    /// Locale tag of the definitions.
    pub locale: Locale,
    /// Whether this version is eligible for resolution.
    pub enabled: bool,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    /// Translation definitions, returned as stored.
    pub definitions: Vec<TranslationDefinition>,
}

impl TranslationPack {
    /// Returns the meta-info projection of this pack.
    #[must_use]
    pub fn meta_info(&self) -> PackMetaInfo {
        PackMetaInfo::from(self)
    }
}

/// Translation pack projection without definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackMetaInfo {
    /// Server-assigned identifier.
    pub id: PackId,
    /// Logical pack family name.
    pub pack_name: String,
    /// Locale tag.
    pub locale: Locale,
    /// Whether this version is eligible for resolution.
    pub enabled: bool,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}

impl From<&TranslationPack> for PackMetaInfo {
    fn from(pack: &TranslationPack) -> Self {
        Self {
            id: pack.id,
            pack_name: pack.pack_name.clone(),
            locale: pack.locale.clone(),
            enabled: pack.enabled,
            created: pack.created,
        }
    }
}
