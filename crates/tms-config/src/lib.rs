// tms-config/src/lib.rs
// ============================================================================
// Module: TMS Config Library
// Description: Canonical config model, loading, and validation.
// Purpose: Single source of truth for tms.toml semantics.
// Dependencies: tms-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `tms-config` defines the configuration model for the translation
//! management service: server bind and limits, inbound auth, audit logging,
//! the pack store backend, and logging output. Validation is strict and
//! fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
