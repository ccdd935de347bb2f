//! Deploy target validation tests for soneium-toolchain-config.
// soneium-toolchain-config/tests/deploy_target.rs
// =============================================================================
// Module: Deploy Target Validation Tests
// Description: Validate credential requirements for deployment targets.
// Purpose: Surface missing deployer keys before any broadcast is attempted.
// =============================================================================

use soneium_toolchain_config::DEPLOYER_KEY_VAR;
use soneium_toolchain_config::LOCAL_NETWORK_NAME;
use soneium_toolchain_config::REDACTED_KEY;
use soneium_toolchain_config::REMOTE_NETWORK_NAME;

mod common;

type TestResult = Result<(), String>;

#[test]
fn local_network_is_always_deployable() -> TestResult {
    let config = common::config_from_pairs(&[]).map_err(|err| err.to_string())?;
    config.require_deploy_target(LOCAL_NETWORK_NAME).map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn remote_network_without_key_is_rejected() -> TestResult {
    let config = common::config_from_pairs(&[]).map_err(|err| err.to_string())?;
    common::assert_invalid(config.require_deploy_target(REMOTE_NETWORK_NAME), DEPLOYER_KEY_VAR)
}

#[test]
fn remote_network_with_key_is_accepted() -> TestResult {
    let config = common::config_from_pairs(&[(DEPLOYER_KEY_VAR, "0xabc")])
        .map_err(|err| err.to_string())?;
    let network =
        config.require_deploy_target(REMOTE_NETWORK_NAME).map_err(|err| err.to_string())?;
    if network.accounts.len() != 1 {
        return Err("expected one deployer key".to_string());
    }
    Ok(())
}

#[test]
fn unknown_network_is_rejected() -> TestResult {
    let config = common::config_from_pairs(&[]).map_err(|err| err.to_string())?;
    common::assert_invalid(config.require_deploy_target("mainnet"), "unknown network: mainnet")
}

#[test]
fn redacted_copy_hides_keys_and_keeps_shape() -> TestResult {
    let config = common::config_from_pairs(&[(DEPLOYER_KEY_VAR, "0xsecret")])
        .map_err(|err| err.to_string())?;
    let redacted = config.redacted();
    let rendered = serde_json::to_string(&redacted).map_err(|err| err.to_string())?;
    if rendered.contains("0xsecret") {
        return Err("redacted output leaked the key".to_string());
    }
    if !rendered.contains(REDACTED_KEY) {
        return Err("redacted output should mark the key slot".to_string());
    }
    let remote = common::remote(&redacted)?;
    if remote.accounts.len() != 1 {
        return Err("redaction should keep the number of keys".to_string());
    }
    if common::remote(&config)?.accounts[0].expose() != "0xsecret" {
        return Err("redaction must not mutate the original".to_string());
    }
    Ok(())
}

#[test]
fn debug_output_never_contains_keys() -> TestResult {
    let config = common::config_from_pairs(&[(DEPLOYER_KEY_VAR, "0xsecret")])
        .map_err(|err| err.to_string())?;
    let rendered = format!("{config:?}");
    if rendered.contains("0xsecret") {
        return Err("Debug output leaked the key".to_string());
    }
    Ok(())
}
