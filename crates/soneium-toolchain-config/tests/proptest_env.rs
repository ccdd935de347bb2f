// soneium-toolchain-config/tests/proptest_env.rs
// ============================================================================
// Module: Env Resolution Property-Based Tests
// Description: Property tests for env-sourced field resolution.
// Purpose: Detect panics and identity violations across wide input ranges.
// ============================================================================

//! Property-based tests for environment resolution invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use soneium_toolchain_config::CHAIN_ID_VAR;
use soneium_toolchain_config::DEPLOYER_KEY_VAR;
use soneium_toolchain_config::EnvSnapshot;
use soneium_toolchain_config::MAX_CHAIN_ID;
use soneium_toolchain_config::REMOTE_NETWORK_NAME;
use soneium_toolchain_config::RPC_URL_VAR;
use soneium_toolchain_config::ToolchainConfig;
use soneium_toolchain_config::parse_chain_id;

proptest! {
    #[test]
    fn valid_chain_ids_parse_to_themselves(id in 1..=MAX_CHAIN_ID) {
        let env = EnvSnapshot::from_pairs([(CHAIN_ID_VAR, id.to_string())]);
        let config = ToolchainConfig::from_env(&env).unwrap();
        prop_assert_eq!(config.networks[REMOTE_NETWORK_NAME].chain_id, Some(id));
    }

    #[test]
    fn hex_and_decimal_forms_agree(id in 1..=MAX_CHAIN_ID) {
        prop_assert_eq!(parse_chain_id(&format!("0x{id:x}")).unwrap(), id);
        prop_assert_eq!(parse_chain_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn chain_id_parser_never_panics(raw in ".{0,32}") {
        if let Ok(id) = parse_chain_id(&raw) {
            prop_assert!(id > 0 && id <= MAX_CHAIN_ID);
        }
    }

    #[test]
    fn non_empty_url_is_copied_verbatim(url in "[ -~]{1,64}") {
        let env = EnvSnapshot::from_pairs([(RPC_URL_VAR, url.clone())]);
        let config = ToolchainConfig::from_env(&env).unwrap();
        prop_assert_eq!(config.networks[REMOTE_NETWORK_NAME].url.as_deref(), Some(url.as_str()));
    }

    #[test]
    fn non_empty_key_yields_single_account(key in "[0-9a-fx]{1,66}") {
        let env = EnvSnapshot::from_pairs([(DEPLOYER_KEY_VAR, key.clone())]);
        let config = ToolchainConfig::from_env(&env).unwrap();
        let accounts = &config.networks[REMOTE_NETWORK_NAME].accounts;
        prop_assert_eq!(accounts.len(), 1);
        prop_assert_eq!(accounts[0].expose(), key.as_str());
    }
}
