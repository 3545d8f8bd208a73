// tms-core/src/model/identifiers.rs
// ============================================================================
// Module: TMS Identifiers
// Description: Opaque identifier for stored translation packs.
// Purpose: Provide a strongly typed, serializable pack ID with a stable string form.
// Dependencies: serde, thiserror, uuid
// ============================================================================

//! ## Overview
//! Pack identifiers are random UUIDs assigned server-side when a pack is
//! created. They serialize as their hyphenated string form and are never
//! accepted from clients at creation time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Identifier of a single stored translation pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackId(Uuid);

impl PackId {
    /// Generates a fresh random pack identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for PackId {
    type Err = PackIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| PackIdError::Malformed(value.to_string()))
    }
}

impl From<Uuid> for PackId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Pack identifier parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackIdError {
    /// The value is not a UUID.
    #[error("Invalid translation pack id [{0}]")]
    Malformed(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
