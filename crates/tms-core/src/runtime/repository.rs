// tms-core/src/runtime/repository.rs
// ============================================================================
// Module: TMS Pack Repository
// Description: Repository contract used by the engine, backed by a pack store.
// Purpose: Give the engine the exact persistence verbs it needs and nothing more.
// Dependencies: crate::{interfaces, model, runtime::store}
// ============================================================================

//! ## Overview
//! [`PackRepository`] narrows a [`SharedPackStore`] to the operations the
//! engine performs. `set_enabled` and `delete` are no-ops for unknown ids;
//! the engine performs its own existence checks before calling them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::interfaces::PackStore;
use crate::interfaces::StoreError;
use crate::model::PackId;
use crate::model::TranslationPack;
use crate::runtime::store::SharedPackStore;

// ============================================================================
// SECTION: Repository
// ============================================================================

/// Pack repository over a shared store.
#[derive(Clone)]
pub struct PackRepository {
    /// Backing store.
    store: SharedPackStore,
}

impl PackRepository {
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: SharedPackStore) -> Self {
        Self {
            store,
        }
    }

    /// Returns every pack in repository-native order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn find_all(&self) -> Result<Vec<TranslationPack>, StoreError> {
        self.store.list_all()
    }

    /// Returns every pack whose name is in `names`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn find_all_by_name_in(
        &self,
        names: &BTreeSet<String>,
    ) -> Result<Vec<TranslationPack>, StoreError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        self.store.list_by_names(names)
    }

    /// Returns true when `id` is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn exists(&self, id: PackId) -> Result<bool, StoreError> {
        self.store.exists(id)
    }

    /// Loads a pack by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn get_by_id(&self, id: PackId) -> Result<Option<TranslationPack>, StoreError> {
        self.store.get(id)
    }

    /// Inserts or replaces a pack and returns the persisted value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn save(&self, pack: &TranslationPack) -> Result<Option<TranslationPack>, StoreError> {
        self.store.put(pack)
    }

    /// Sets the enabled flag of a stored pack; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn set_enabled(&self, id: PackId, enabled: bool) -> Result<(), StoreError> {
        if let Some(mut pack) = self.store.get(id)? {
            pack.enabled = enabled;
            self.store.put(&pack)?;
        }
        Ok(())
    }

    /// Deletes a pack; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails.
    pub fn delete(&self, id: PackId) -> Result<(), StoreError> {
        self.store.delete(id)?;
        Ok(())
    }

    /// Reports backing store readiness.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    pub fn readiness(&self) -> Result<(), StoreError> {
        self.store.readiness()
    }
}
