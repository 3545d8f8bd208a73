// tms-core/src/runtime/mod.rs
// ============================================================================
// Module: TMS Runtime
// Description: Pack repository, resolution, and the lifecycle engine.
// Purpose: Execute translation pack operations against a pack store.
// Dependencies: crate::{model, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement pack resolution and lifecycle operations. All
//! outer surfaces call into [`TranslationService`] so that behavior is the
//! same regardless of transport or store.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;
pub mod repository;
pub mod resolution;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::PackServiceError;
pub use engine::TranslationService;
pub use repository::PackRepository;
pub use resolution::ResolutionKey;
pub use resolution::resolve_latest_enabled;
pub use store::InMemoryPackStore;
pub use store::SharedPackStore;
