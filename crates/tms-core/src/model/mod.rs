// tms-core/src/model/mod.rs
// ============================================================================
// Module: TMS Model
// Description: Translation pack data model, identifiers, and time sources.
// Purpose: Group the value types shared by stores, the engine, and adapters.
// Dependencies: serde, time, uuid
// ============================================================================

//! ## Overview
//! Core types are plain data: identifiers, locales, packs and their
//! projections, creation requests with validation, and the clock seam used to
//! stamp new packs.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod locale;
pub mod pack;
pub mod clock;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::PackId;
pub use identifiers::PackIdError;
pub use locale::Locale;
pub use locale::LocaleError;
pub use pack::PackMetaInfo;
pub use pack::TranslationDefinition;
pub use pack::TranslationPack;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use validation::MAX_PACK_NAME_LENGTH;
pub use validation::NAME_LIST_SEPARATOR;
pub use validation::PackCreationRequest;
pub use validation::ValidPackRequest;
pub use validation::ValidationErrors;
