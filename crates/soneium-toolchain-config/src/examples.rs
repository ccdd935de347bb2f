// soneium-toolchain-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical `.env` template for the toolchain.
// Purpose: Deterministic example for docs and project scaffolding.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical `.env.example` listing every variable the loader reads. Output is
//! deterministic and kept in sync with the constants in [`crate::env`].

use crate::config::DEFAULT_REMOTE_CHAIN_ID;
use crate::config::DEFAULT_REMOTE_RPC_URL;
use crate::env::CHAIN_ID_VAR;
use crate::env::DEPLOYER_KEY_VAR;
use crate::env::ENV_FILE_VAR;
use crate::env::RPC_URL_VAR;

/// Returns a canonical `.env.example` file.
#[must_use]
pub fn dotenv_example() -> String {
    format!(
        "# Soneium toolchain environment\n\
         # Copy to .env and fill in values. Unset or empty entries use the defaults.\n\
         \n\
         # Remote RPC endpoint (default: {DEFAULT_REMOTE_RPC_URL})\n\
         {RPC_URL_VAR}=\n\
         \n\
         # Remote chain id, decimal or 0x-hex (default: {DEFAULT_REMOTE_CHAIN_ID})\n\
         {CHAIN_ID_VAR}=\n\
         \n\
         # Deployer private key; never commit a real value\n\
         {DEPLOYER_KEY_VAR}=\n\
         \n\
         # Alternate .env location, honored only from the process environment\n\
         # {ENV_FILE_VAR}=\n"
    )
}
