// tms-core/src/interfaces/mod.rs
// ============================================================================
// Module: TMS Interfaces
// Description: Backend-agnostic persistence contract for translation packs.
// Purpose: Define the store surface used by the pack repository and engine.
// Dependencies: crate::model, thiserror
// ============================================================================

//! ## Overview
//! The [`PackStore`] trait is the only way the engine reaches persisted packs.
//! Implementations keep packs in repository-native order: insertion order,
//! with a full replace keeping the original position. Implementations must
//! fail closed on corrupt or mismatched data rather than skipping records.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::PackId;
use crate::model::TranslationPack;

// ============================================================================
// SECTION: Pack Store
// ============================================================================

/// Pack store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("pack store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("pack store corruption: {0}")]
    Corrupt(String),
    /// Store data version is incompatible.
    #[error("pack store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("pack store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("pack store error: {0}")]
    Store(String),
}

/// Persistence contract for translation packs.
pub trait PackStore {
    /// Lists every stored pack in repository-native order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when listing fails.
    fn list_all(&self) -> Result<Vec<TranslationPack>, StoreError>;

    /// Lists packs whose name is in `names`, in repository-native order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when listing fails.
    fn list_by_names(&self, names: &BTreeSet<String>) -> Result<Vec<TranslationPack>, StoreError>;

    /// Returns true when a pack with `id` is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn exists(&self, id: PackId) -> Result<bool, StoreError>;

    /// Loads a pack by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn get(&self, id: PackId) -> Result<Option<TranslationPack>, StoreError>;

    /// Inserts or fully replaces a pack and returns the persisted document.
    ///
    /// `Ok(None)` means the backend accepted the write but produced no
    /// document to return.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    fn put(&self, pack: &TranslationPack) -> Result<Option<TranslationPack>, StoreError>;

    /// Removes a pack; returns whether a document was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn delete(&self, id: PackId) -> Result<bool, StoreError>;

    /// Reports store readiness for health checks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
