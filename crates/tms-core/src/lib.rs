// tms-core/src/lib.rs
// ============================================================================
// Module: TMS Core Library
// Description: Public API surface for the translation management core.
// Purpose: Expose pack types, store interfaces, and the lifecycle engine.
// Dependencies: crate::{model, interfaces, runtime}
// ============================================================================

//! ## Overview
//! TMS core owns the translation pack model and the resolution and lifecycle
//! engine. It is storage-agnostic: persistence is reached through the
//! [`PackStore`] interface, and every outer surface (HTTP, CLI) calls into
//! [`TranslationService`] rather than touching stores directly.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod model;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use model::*;

pub use interfaces::PackStore;
pub use interfaces::StoreError;
pub use runtime::InMemoryPackStore;
pub use runtime::PackRepository;
pub use runtime::PackServiceError;
pub use runtime::ResolutionKey;
pub use runtime::SharedPackStore;
pub use runtime::TranslationService;
pub use runtime::resolve_latest_enabled;
