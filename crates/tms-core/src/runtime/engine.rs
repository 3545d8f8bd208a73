// tms-core/src/runtime/engine.rs
// ============================================================================
// Module: TMS Translation Service
// Description: Resolution and lifecycle engine for translation packs.
// Purpose: Implement every pack operation exposed by outer surfaces.
// Dependencies: crate::{model, interfaces, runtime::{repository, resolution}}
// ============================================================================

//! ## Overview
//! [`TranslationService`] is stateless between calls: each operation goes to
//! the [`PackRepository`] and returns. Lookups by id check existence first and
//! report [`PackServiceError::NotFound`] for unknown ids. Creation validates
//! the request, draws an unused id, stamps `created` from the injected
//! [`Clock`], and fails with [`PackServiceError::CreationFailed`] when the
//! store produces no document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use crate::interfaces::StoreError;
use crate::model::Clock;
use crate::model::PackCreationRequest;
use crate::model::PackId;
use crate::model::PackMetaInfo;
use crate::model::SystemClock;
use crate::model::TranslationPack;
use crate::model::ValidationErrors;
use crate::runtime::repository::PackRepository;
use crate::runtime::resolution::resolve_latest_enabled;
use crate::runtime::store::SharedPackStore;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum id draws before creation gives up.
const MAX_ID_ATTEMPTS: usize = 8;

// ============================================================================
// SECTION: Service
// ============================================================================

/// Translation pack resolution and lifecycle engine.
#[derive(Clone)]
pub struct TranslationService {
    /// Pack repository.
    repository: PackRepository,
    /// Source of creation timestamps.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl TranslationService {
    /// Creates a service over `store` using the system clock.
    #[must_use]
    pub fn new(store: SharedPackStore) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a service over `store` with an explicit clock.
    #[must_use]
    pub fn with_clock(store: SharedPackStore, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            repository: PackRepository::new(store),
            clock,
        }
    }

    /// Returns the latest enabled pack per `(pack_name, locale)` for `names`.
    ///
    /// # Errors
    ///
    /// Returns [`PackServiceError::Store`] when the store fails.
    pub fn retrieve_latest_enabled_packs(
        &self,
        names: &[String],
    ) -> Result<Vec<TranslationPack>, PackServiceError> {
        let names: BTreeSet<String> = names.iter().cloned().collect();
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let candidates = self.repository.find_all_by_name_in(&names)?;
        Ok(resolve_latest_enabled(&names, candidates))
    }

    /// Returns meta-info for every stored pack in repository-native order.
    ///
    /// # Errors
    ///
    /// Returns [`PackServiceError::Store`] when the store fails.
    pub fn retrieve_all_meta_info(&self) -> Result<Vec<PackMetaInfo>, PackServiceError> {
        Ok(self.repository.find_all()?.iter().map(PackMetaInfo::from).collect())
    }

    /// Returns the pack stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PackServiceError::NotFound`] for unknown ids and
    /// [`PackServiceError::Store`] when the store fails.
    pub fn get_pack(&self, id: PackId) -> Result<TranslationPack, PackServiceError> {
        self.ensure_exists(id)?;
        self.repository.get_by_id(id)?.ok_or(PackServiceError::NotFound(id))
    }

    /// Validates `request` and persists a new enabled pack.
    ///
    /// # Errors
    ///
    /// Returns [`PackServiceError::ValidationFailed`] for invalid input,
    /// [`PackServiceError::CreationFailed`] when no document is persisted, and
    /// [`PackServiceError::Store`] when the store fails.
    pub fn create_pack(
        &self,
        request: &PackCreationRequest,
    ) -> Result<TranslationPack, PackServiceError> {
        let valid = request.validate().map_err(PackServiceError::ValidationFailed)?;
        let id = self.fresh_id(request)?;
        let pack = TranslationPack {
            id,
            pack_name: valid.pack_name,
            locale: valid.locale,
            enabled: true,
            created: self.clock.now(),
            definitions: valid.definitions,
        };
        self.repository
            .save(&pack)?
            .ok_or_else(|| PackServiceError::CreationFailed(request.summary()))
    }

    /// Flips the enabled flag of `id` and returns the persisted pack.
    ///
    /// # Errors
    ///
    /// Returns [`PackServiceError::NotFound`] for unknown ids and
    /// [`PackServiceError::Store`] when the store fails.
    pub fn change_status(&self, id: PackId) -> Result<TranslationPack, PackServiceError> {
        self.ensure_exists(id)?;
        let current = self.repository.get_by_id(id)?.ok_or(PackServiceError::NotFound(id))?;
        self.repository.set_enabled(id, !current.enabled)?;
        self.repository.get_by_id(id)?.ok_or(PackServiceError::NotFound(id))
    }

    /// Deletes the pack stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PackServiceError::NotFound`] for unknown ids and
    /// [`PackServiceError::Store`] when the store fails.
    pub fn delete_pack(&self, id: PackId) -> Result<(), PackServiceError> {
        self.ensure_exists(id)?;
        self.repository.delete(id)?;
        Ok(())
    }

    /// Reports backing store readiness.
    ///
    /// # Errors
    ///
    /// Returns [`PackServiceError::Store`] when the store is unavailable.
    pub fn readiness(&self) -> Result<(), PackServiceError> {
        Ok(self.repository.readiness()?)
    }

    /// Fails with `NotFound` unless `id` is stored.
    fn ensure_exists(&self, id: PackId) -> Result<(), PackServiceError> {
        if self.repository.exists(id)? { Ok(()) } else { Err(PackServiceError::NotFound(id)) }
    }

    /// Draws an id the store does not hold yet.
    fn fresh_id(&self, request: &PackCreationRequest) -> Result<PackId, PackServiceError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = PackId::generate();
            if !self.repository.exists(id)? {
                return Ok(id);
            }
        }
        Err(PackServiceError::CreationFailed(request.summary()))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Translation service errors.
#[derive(Debug, Error)]
pub enum PackServiceError {
    /// No pack is stored under the id.
    #[error("Requested translation pack [{0}] not found")]
    NotFound(PackId),
    /// The store produced no document for a new pack.
    #[error("Failed to create translation pack for request [{0}]")]
    CreationFailed(String),
    /// The creation request is invalid.
    #[error("invalid translation pack creation request: {0}")]
    ValidationFailed(ValidationErrors),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
