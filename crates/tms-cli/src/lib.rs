// tms-cli/src/lib.rs
// ============================================================================
// Module: TMS CLI Library
// Description: Shared helpers for the `tms` binary.
// Purpose: Keep logging setup testable outside the entry point.
// Dependencies: crate::logging
// ============================================================================

//! ## Overview
//! The `tms` binary parses commands and hands off to [`tms_http::TmsServer`];
//! this library holds the pieces worth testing on their own.

pub mod logging;

pub use logging::LoggingError;
pub use logging::env_filter;
pub use logging::init_tracing;
