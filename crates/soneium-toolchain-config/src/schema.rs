// soneium-toolchain-config/src/schema.rs
// ============================================================================
// Module: Artifact Schema
// Description: JSON schema builder for the toolchain configuration artifact.
// Purpose: Provide a canonical validation schema for downstream consumers.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for `toolchain.config.json`. Defaults
//! and bounds are taken from the same constants the loader uses.

use serde_json::Value;
use serde_json::json;

use crate::config::DEFAULT_COMPILER_VERSION;
use crate::config::DEFAULT_OPTIMIZER_RUNS;
use crate::config::DEFAULT_REMOTE_CHAIN_ID;
use crate::config::DEFAULT_REMOTE_RPC_URL;
use crate::config::DEFAULT_TEST_TIMEOUT_MS;
use crate::config::LOCAL_NETWORK_NAME;
use crate::config::MAX_ACCOUNTS_PER_NETWORK;
use crate::config::MAX_CHAIN_ID;
use crate::config::MAX_COMPILER_PROFILES;
use crate::config::MAX_DEPLOYER_KEY_LENGTH;
use crate::config::MAX_NETWORK_NAME_LENGTH;
use crate::config::MAX_NETWORKS;
use crate::config::MAX_TEST_TIMEOUT_MS;
use crate::config::MAX_URL_LENGTH;

/// Returns the JSON schema for `toolchain.config.json`.
#[must_use]
pub fn artifact_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "soneium-toolchain://schemas/toolchain.config.schema.json",
        "title": "Soneium Toolchain Configuration",
        "description": "Compiler, network, and test-runner settings for the contract toolchain.",
        "type": "object",
        "properties": {
            "compilerProfiles": {
                "type": "array",
                "items": compiler_profile_schema(),
                "minItems": 1,
                "maxItems": MAX_COMPILER_PROFILES
            },
            "networks": networks_schema(),
            "testRunnerTimeoutMs": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_TEST_TIMEOUT_MS,
                "default": DEFAULT_TEST_TIMEOUT_MS,
                "description": "Per-test timeout applied by the test runner."
            }
        },
        "required": ["compilerProfiles", "networks", "testRunnerTimeoutMs"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Compiler Profiles
// ============================================================================

/// Schema for a single compiler profile.
fn compiler_profile_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "version": {
                "type": "string",
                "pattern": "^[0-9]+\\.[0-9]+\\.[0-9]+$",
                "default": DEFAULT_COMPILER_VERSION,
                "description": "Compiler version (MAJOR.MINOR.PATCH)."
            },
            "settings": {
                "type": "object",
                "properties": {
                    "optimizer": {
                        "type": "object",
                        "properties": {
                            "enabled": { "type": "boolean", "default": true },
                            "runs": {
                                "type": "integer",
                                "minimum": 0,
                                "maximum": u32::MAX,
                                "default": DEFAULT_OPTIMIZER_RUNS
                            }
                        },
                        "required": ["enabled", "runs"],
                        "additionalProperties": false
                    },
                    "viaIR": { "type": "boolean", "default": false }
                },
                "required": ["optimizer", "viaIR"],
                "additionalProperties": false
            }
        },
        "required": ["version", "settings"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Networks
// ============================================================================

/// Schema for the network map.
fn networks_schema() -> Value {
    json!({
        "type": "object",
        "propertyNames": {
            "pattern": "^[A-Za-z0-9_-]+$",
            "maxLength": MAX_NETWORK_NAME_LENGTH
        },
        "additionalProperties": network_profile_schema(),
        "required": [LOCAL_NETWORK_NAME],
        "maxProperties": MAX_NETWORKS
    })
}

/// Schema for a single network profile.
fn network_profile_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "url": {
                "type": "string",
                "pattern": "^(https?|wss?)://",
                "maxLength": MAX_URL_LENGTH,
                "examples": [DEFAULT_REMOTE_RPC_URL],
                "description": "RPC endpoint (absent for the local network)."
            },
            "chainId": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_CHAIN_ID,
                "examples": [DEFAULT_REMOTE_CHAIN_ID]
            },
            "accounts": {
                "type": "array",
                "items": { "type": "string", "minLength": 1, "maxLength": MAX_DEPLOYER_KEY_LENGTH },
                "maxItems": MAX_ACCOUNTS_PER_NETWORK,
                "default": []
            }
        },
        "dependentRequired": { "url": ["chainId"] },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    #[test]
    fn schema_lists_every_top_level_field() {
        let schema = artifact_schema();
        let properties = schema["properties"].as_object().unwrap();
        let mut keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["compilerProfiles", "networks", "testRunnerTimeoutMs"]);
    }

    #[test]
    fn schema_requires_local_network() {
        let schema = artifact_schema();
        assert_eq!(schema["properties"]["networks"]["required"], json!([LOCAL_NETWORK_NAME]));
    }
}
