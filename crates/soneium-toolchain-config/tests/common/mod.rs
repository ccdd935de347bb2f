// soneium-toolchain-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for toolchain config integration tests.
// Purpose: Reduce duplication across suites for soneium-toolchain-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use soneium_toolchain_config::ConfigError;
use soneium_toolchain_config::EnvSnapshot;
use soneium_toolchain_config::NetworkProfile;
use soneium_toolchain_config::REMOTE_NETWORK_NAME;
use soneium_toolchain_config::ToolchainConfig;

/// Builds a config from explicit environment pairs.
pub fn config_from_pairs(pairs: &[(&str, &str)]) -> Result<ToolchainConfig, ConfigError> {
    ToolchainConfig::from_env(&EnvSnapshot::from_pairs(pairs.iter().copied()))
}

/// Returns the remote network entry or an error message.
pub fn remote(config: &ToolchainConfig) -> Result<&NetworkProfile, String> {
    config
        .network(REMOTE_NETWORK_NAME)
        .ok_or_else(|| format!("missing {REMOTE_NETWORK_NAME} network entry"))
}

/// Asserts that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
