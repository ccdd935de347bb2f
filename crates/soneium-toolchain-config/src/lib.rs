// soneium-toolchain-config/src/lib.rs
// ============================================================================
// Module: Soneium Toolchain Config Library
// Description: Canonical toolchain config model, env ingestion, and artifacts.
// Purpose: Single source of truth for the settings handed to the toolchain.
// Dependencies: dotenvy, serde, serde_json, toml, tracing, url
// ============================================================================

//! ## Overview
//! `soneium-toolchain-config` builds the configuration consumed by the
//! external contract toolchain: compiler profiles, network profiles, and the
//! test-runner timeout. Inputs come from an explicit environment snapshot
//! (optionally merged with a `.env` file) and are resolved by a pure builder.
//!
//! Security posture: deployer keys are secrets; they are redacted from
//! `Debug`/`Display` output and never logged.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifact;
pub mod config;
pub mod env;
pub mod examples;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifact::ARTIFACT_FILE_NAME;
pub use artifact::ArtifactFormat;
pub use artifact::read_artifact;
pub use artifact::render_artifact;
pub use artifact::write_artifact;
pub use config::*;
pub use env::CHAIN_ID_VAR;
pub use env::DEFAULT_ENV_FILE;
pub use env::DEPLOYER_KEY_VAR;
pub use env::DotenvOutcome;
pub use env::ENV_FILE_VAR;
pub use env::EnvSnapshot;
pub use env::RPC_URL_VAR;
pub use env::resolve_dotenv_path;
pub use examples::dotenv_example;
pub use schema::artifact_schema;
