// soneium-toolchain-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and output helpers.
// Purpose: Ensure CLI flags map to loader options and output stays redacted.
// Dependencies: soneium-toolchain-cli main helpers
// ============================================================================

//! ## Overview
//! Validates clap wiring, redacted display output, and deploy-target
//! summaries without touching the process environment.
//!
//! Security posture: display paths must never reveal deployer keys.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use clap::Parser;
use soneium_toolchain_config::DEPLOYER_KEY_VAR;
use soneium_toolchain_config::EnvSnapshot;
use soneium_toolchain_config::LOCAL_NETWORK_NAME;
use soneium_toolchain_config::ToolchainConfig;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::FormatArg;
use super::check_summary;
use super::show_output;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn config_with_key() -> ToolchainConfig {
    ToolchainConfig::from_env(&EnvSnapshot::from_pairs([(DEPLOYER_KEY_VAR, "0xsecret")]))
        .expect("config builds")
}

fn parse_config_command(args: &[&str]) -> ConfigCommand {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("arguments parse");
    match cli.command {
        Some(Commands::Config {
            command,
        }) => command,
        None => panic!("expected config subcommand"),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn write_defaults_to_conventional_artifact_path() {
    let command = parse_config_command(&["soneium-toolchain", "config", "write"]);
    let ConfigCommand::Write(write) = command else {
        panic!("expected write command");
    };
    assert_eq!(write.output, PathBuf::from("toolchain.config.json"));
    let options = write.env.load_options();
    assert!(options.dotenv);
    assert_eq!(options.env_file, None);
}

#[test]
fn no_dotenv_flag_disables_loading() {
    let command = parse_config_command(&["soneium-toolchain", "config", "show", "--no-dotenv"]);
    let ConfigCommand::Show(show) = command else {
        panic!("expected show command");
    };
    assert!(!show.env.load_options().dotenv);
    assert_eq!(show.format, FormatArg::Json);
}

#[test]
fn env_file_and_no_dotenv_conflict() {
    let result = Cli::try_parse_from([
        "soneium-toolchain",
        "config",
        "show",
        "--no-dotenv",
        "--env-file",
        "deploy.env",
    ]);
    assert!(result.is_err());
}

#[test]
fn check_defaults_to_remote_network() {
    let command = parse_config_command(&["soneium-toolchain", "config", "check"]);
    let ConfigCommand::Check(check) = command else {
        panic!("expected check command");
    };
    assert_eq!(check.network, "soneium");
}

#[test]
fn show_output_redacts_keys() {
    let config = config_with_key();
    for format in [FormatArg::Json, FormatArg::Toml] {
        let rendered = show_output(&config, format).expect("render");
        assert!(!rendered.contains("0xsecret"), "{format:?} output leaked the key");
    }
}

#[test]
fn check_summary_reports_remote_readiness() {
    let summary = check_summary(&config_with_key(), "soneium").expect("ready");
    assert_eq!(summary, "network soneium ready: chain id 12345, 1 deployer key(s)");
}

#[test]
fn check_summary_accepts_local_network() {
    let summary = check_summary(&ToolchainConfig::default(), LOCAL_NETWORK_NAME).expect("local");
    assert!(summary.contains("is local"));
}

#[test]
fn check_summary_rejects_remote_without_key() {
    let err = check_summary(&ToolchainConfig::default(), "soneium").expect_err("missing key");
    assert!(err.to_string().contains(DEPLOYER_KEY_VAR));
}
