// tms-core/src/runtime/store.rs
// ============================================================================
// Module: TMS In-Memory Store
// Description: In-memory pack store and the shared store wrapper.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::model, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryPackStore`] keeps packs in a vector so that repository-native
//! order is insertion order; replacing a pack updates it in place. It backs
//! the `memory` store type and every engine test. [`SharedPackStore`] wraps
//! any [`PackStore`] behind an `Arc` so the engine and adapters can clone it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::interfaces::PackStore;
use crate::interfaces::StoreError;
use crate::model::PackId;
use crate::model::TranslationPack;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory pack store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPackStore {
    /// Packs in insertion order, protected by a mutex.
    packs: Arc<Mutex<Vec<TranslationPack>>>,
}

impl InMemoryPackStore {
    /// Creates an empty in-memory pack store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the pack list.
    fn lock(&self) -> Result<MutexGuard<'_, Vec<TranslationPack>>, StoreError> {
        self.packs.lock().map_err(|_| StoreError::Store("pack store mutex poisoned".to_string()))
    }
}

impl PackStore for InMemoryPackStore {
    fn list_all(&self) -> Result<Vec<TranslationPack>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn list_by_names(&self, names: &BTreeSet<String>) -> Result<Vec<TranslationPack>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.iter().filter(|pack| names.contains(&pack.pack_name)).cloned().collect())
    }

    fn exists(&self, id: PackId) -> Result<bool, StoreError> {
        Ok(self.lock()?.iter().any(|pack| pack.id == id))
    }

    fn get(&self, id: PackId) -> Result<Option<TranslationPack>, StoreError> {
        Ok(self.lock()?.iter().find(|pack| pack.id == id).cloned())
    }

    fn put(&self, pack: &TranslationPack) -> Result<Option<TranslationPack>, StoreError> {
        let mut guard = self.lock()?;
        match guard.iter_mut().find(|stored| stored.id == pack.id) {
            Some(stored) => stored.clone_from(pack),
            None => guard.push(pack.clone()),
        }
        Ok(Some(pack.clone()))
    }

    fn delete(&self, id: PackId) -> Result<bool, StoreError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|pack| pack.id != id);
        Ok(guard.len() != before)
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared pack store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedPackStore {
    /// Inner store implementation.
    inner: Arc<dyn PackStore + Send + Sync>,
}

impl SharedPackStore {
    /// Wraps a pack store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl PackStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn PackStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl PackStore for SharedPackStore {
    fn list_all(&self) -> Result<Vec<TranslationPack>, StoreError> {
        self.inner.list_all()
    }

    fn list_by_names(&self, names: &BTreeSet<String>) -> Result<Vec<TranslationPack>, StoreError> {
        self.inner.list_by_names(names)
    }

    fn exists(&self, id: PackId) -> Result<bool, StoreError> {
        self.inner.exists(id)
    }

    fn get(&self, id: PackId) -> Result<Option<TranslationPack>, StoreError> {
        self.inner.get(id)
    }

    fn put(&self, pack: &TranslationPack) -> Result<Option<TranslationPack>, StoreError> {
        self.inner.put(pack)
    }

    fn delete(&self, id: PackId) -> Result<bool, StoreError> {
        self.inner.delete(id)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.inner.readiness()
    }
}
