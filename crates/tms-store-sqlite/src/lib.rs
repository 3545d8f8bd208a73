// tms-store-sqlite/src/lib.rs
// ============================================================================
// Module: TMS SQLite Pack Store
// Description: Durable PackStore backend using SQLite.
// Purpose: Provide persistent storage for translation packs.
// Dependencies: tms-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`PackStore`](tms_core::PackStore)
//! implementation. Each pack is one JSON document row; an autoincrement
//! sequence column records insertion order so listings come back in
//! repository-native order even after replacements.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MAX_DOCUMENT_BYTES;
pub use store::SqlitePackStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
