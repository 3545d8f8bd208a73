// tms-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for tms-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use tms_config::AuthScope;
use tms_config::AuthTokenConfig;
use tms_config::ConfigError;
use tms_config::ServerAuthConfig;
use tms_config::ServerAuthMode;
use tms_config::TmsConfig;

/// Result type used by config tests.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `TmsConfig` without validation.
pub fn config_from_toml(toml_str: &str) -> Result<TmsConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<TmsConfig, toml::de::Error> {
    config_from_toml("")
}

/// Returns bearer auth with one token granting `scopes`.
pub fn bearer_auth(token: &str, scopes: &[AuthScope]) -> ServerAuthConfig {
    ServerAuthConfig {
        mode: ServerAuthMode::BearerToken,
        tokens: vec![AuthTokenConfig {
            token: token.to_string(),
            scopes: scopes.iter().copied().collect(),
        }],
    }
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}
