// soneium-toolchain-config/src/config.rs
// ============================================================================
// Module: Toolchain Configuration
// Description: Configuration model, default substitution, and validation.
// Purpose: Build the settings object handed to the external toolchain.
// Dependencies: serde, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! [`ToolchainConfig`] is built by a pure function over an [`EnvSnapshot`].
//! Optional inputs fall back to fixed defaults; a chain identifier that is
//! present but not a positive integer fails closed instead of being coerced.
//!
//! Security posture: deployer keys are wrapped in [`DeployerKey`] so that
//! `Debug` output and logs never contain them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use url::Url;

use crate::env::CHAIN_ID_VAR;
use crate::env::DEPLOYER_KEY_VAR;
use crate::env::DotenvOutcome;
use crate::env::EnvSnapshot;
use crate::env::RPC_URL_VAR;
use crate::env::resolve_dotenv_path;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default compiler version for the single built-in compiler profile.
pub const DEFAULT_COMPILER_VERSION: &str = "0.8.30";
/// Default optimizer run count.
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;
/// Name of the local development network entry.
pub const LOCAL_NETWORK_NAME: &str = "hardhat";
/// Name of the remote network entry.
pub const REMOTE_NETWORK_NAME: &str = "soneium";
/// Placeholder RPC endpoint used when none is configured.
pub const DEFAULT_REMOTE_RPC_URL: &str = "https://rpc.soneium.example";
/// Fallback chain identifier used when none is configured.
pub const DEFAULT_REMOTE_CHAIN_ID: u64 = 12_345;
/// Default test-runner timeout in milliseconds.
pub const DEFAULT_TEST_TIMEOUT_MS: u64 = 200_000;
/// Largest chain identifier accepted (EIP-2294 bound).
pub const MAX_CHAIN_ID: u64 = 4_503_599_627_370_476;
/// Maximum number of compiler profiles.
pub(crate) const MAX_COMPILER_PROFILES: usize = 16;
/// Maximum number of network entries.
pub(crate) const MAX_NETWORKS: usize = 64;
/// Maximum length of a network name.
pub(crate) const MAX_NETWORK_NAME_LENGTH: usize = 64;
/// Maximum number of deployer keys per network.
pub(crate) const MAX_ACCOUNTS_PER_NETWORK: usize = 64;
/// Maximum length of a single deployer key.
pub(crate) const MAX_DEPLOYER_KEY_LENGTH: usize = 512;
/// Maximum length of an RPC endpoint URL.
pub(crate) const MAX_URL_LENGTH: usize = 2048;
/// Maximum test-runner timeout (one day) in milliseconds.
pub(crate) const MAX_TEST_TIMEOUT_MS: u64 = 86_400_000;
/// Placeholder substituted for keys in redacted output.
pub const REDACTED_KEY: &str = "<redacted>";
/// URL schemes accepted for RPC endpoints.
const ALLOWED_URL_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Configuration handed to the external compiler, network client, and test
/// runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Ordered compiler profiles.
    pub compiler_profiles: Vec<CompilerProfile>,
    /// Network profiles keyed by network name.
    pub networks: BTreeMap<String, NetworkProfile>,
    /// Test-runner settings (serialized as the bare timeout).
    #[serde(rename = "testRunnerTimeoutMs")]
    pub test_runner: TestRunnerProfile,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(LOCAL_NETWORK_NAME.to_string(), NetworkProfile::local());
        networks.insert(
            REMOTE_NETWORK_NAME.to_string(),
            NetworkProfile::remote(DEFAULT_REMOTE_RPC_URL, DEFAULT_REMOTE_CHAIN_ID, Vec::new()),
        );
        Self {
            compiler_profiles: vec![CompilerProfile::default()],
            networks,
            test_runner: TestRunnerProfile::default(),
        }
    }
}

impl ToolchainConfig {
    /// Builds the configuration from an explicit environment snapshot.
    ///
    /// Unset or empty variables fall back to the documented defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `SONEIUM_CHAINID` is set but is
    /// not a positive integer within range.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.networks.insert(REMOTE_NETWORK_NAME.to_string(), remote_network_from_env(env)?);
        Ok(config)
    }

    /// Captures the process environment, merges the `.env` file, then builds
    /// and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when building or validation fails.
    pub fn load(options: &LoadOptions) -> Result<Self, ConfigError> {
        Self::load_with_snapshot(EnvSnapshot::from_process(), options)
    }

    /// Same as [`ToolchainConfig::load`] but starts from a caller-provided
    /// snapshot instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when building or validation fails.
    pub fn load_with_snapshot(
        mut env: EnvSnapshot,
        options: &LoadOptions,
    ) -> Result<Self, ConfigError> {
        let outcome = if options.dotenv {
            let path = resolve_dotenv_path(options.env_file.as_deref(), &env);
            env.merge_dotenv(&path)
        } else {
            DotenvOutcome::Disabled
        };
        let config = Self::from_env(&env)?;
        config.validate()?;
        info!(
            dotenv = dotenv_label(&outcome),
            compilers = config.compiler_profiles.len(),
            networks = config.networks.len(),
            "toolchain configuration loaded"
        );
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler_profiles.is_empty() {
            return Err(ConfigError::Invalid(
                "compilerProfiles must contain at least one profile".to_string(),
            ));
        }
        if self.compiler_profiles.len() > MAX_COMPILER_PROFILES {
            return Err(ConfigError::Invalid("too many compiler profiles".to_string()));
        }
        let mut versions = BTreeSet::new();
        for profile in &self.compiler_profiles {
            profile.validate()?;
            if !versions.insert(profile.version.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate compiler profile version: {}",
                    profile.version
                )));
            }
        }
        if self.networks.len() > MAX_NETWORKS {
            return Err(ConfigError::Invalid("too many network entries".to_string()));
        }
        if !self.networks.contains_key(LOCAL_NETWORK_NAME) {
            return Err(ConfigError::Invalid(format!(
                "networks must contain the local {LOCAL_NETWORK_NAME} entry"
            )));
        }
        if !self.networks.values().any(|network| !network.is_local()) {
            return Err(ConfigError::Invalid(
                "networks must contain at least one remote entry".to_string(),
            ));
        }
        for (name, network) in &self.networks {
            validate_network_name(name)?;
            network.validate(name)?;
        }
        self.test_runner.validate()
    }

    /// Returns the network profile for `name`, if present.
    #[must_use]
    pub fn network(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.get(name)
    }

    /// Checks that `name` can be used as a deployment target.
    ///
    /// Remote networks need at least one deployer key; the local network
    /// needs none.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the network is unknown or has no
    /// signing credential.
    pub fn require_deploy_target(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        let network = self
            .network(name)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown network: {name}")))?;
        if !network.is_local() && network.accounts.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "network {name} requires at least one deployer key (set {DEPLOYER_KEY_VAR})"
            )));
        }
        Ok(network)
    }

    /// Returns a copy with every deployer key replaced by a placeholder.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for network in copy.networks.values_mut() {
            for key in &mut network.accounts {
                *key = DeployerKey::new(REDACTED_KEY);
            }
        }
        copy
    }
}

/// Options controlling [`ToolchainConfig::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Merge a `.env` file into the snapshot before building.
    pub dotenv: bool,
    /// Explicit `.env` path (overrides `SONEIUM_TOOLCHAIN_ENV_FILE`).
    pub env_file: Option<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            dotenv: true,
            env_file: None,
        }
    }
}

/// Versioned compiler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerProfile {
    /// Compiler version (`MAJOR.MINOR.PATCH`).
    pub version: String,
    /// Compiler settings.
    pub settings: CompilerSettings,
}

impl Default for CompilerProfile {
    fn default() -> Self {
        Self {
            version: DEFAULT_COMPILER_VERSION.to_string(),
            settings: CompilerSettings::default(),
        }
    }
}

impl CompilerProfile {
    /// Validates the compiler profile.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_compiler_version(&self.version)?;
        self.settings.optimizer.validate(&self.version)
    }
}

/// Settings passed to the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CompilerSettings {
    /// Optimizer configuration.
    pub optimizer: OptimizerSettings,
    /// Compile through the intermediate representation pipeline.
    #[serde(rename = "viaIR")]
    pub via_ir: bool,
}

/// Optimizer configuration (size vs. runtime cost trade-off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerSettings {
    /// Enables the optimizer.
    pub enabled: bool,
    /// Expected number of contract executions.
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: DEFAULT_OPTIMIZER_RUNS,
        }
    }
}

impl OptimizerSettings {
    /// Validates optimizer settings.
    fn validate(self, version: &str) -> Result<(), ConfigError> {
        if self.enabled && self.runs == 0 {
            return Err(ConfigError::Invalid(format!(
                "compiler {version}: optimizer.runs must be greater than zero when enabled"
            )));
        }
        Ok(())
    }
}

/// Connection and signing parameters for a network.
///
/// # Invariants
/// - A profile without `url` is the local in-process network.
/// - Remote profiles always carry a `chain_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NetworkProfile {
    /// RPC endpoint URL (absent for the local network).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Chain identifier (absent for the local network).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// Signing credentials.
    #[serde(default)]
    pub accounts: Vec<DeployerKey>,
}

impl NetworkProfile {
    /// Returns the local development network profile.
    #[must_use]
    pub const fn local() -> Self {
        Self {
            url: None,
            chain_id: None,
            accounts: Vec::new(),
        }
    }

    /// Returns a remote network profile.
    #[must_use]
    pub fn remote(url: impl Into<String>, chain_id: u64, accounts: Vec<DeployerKey>) -> Self {
        Self {
            url: Some(url.into()),
            chain_id: Some(chain_id),
            accounts,
        }
    }

    /// Returns true for the local in-process network.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        self.url.is_none()
    }

    /// Validates the network profile.
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            validate_endpoint_url(name, url)?;
            if self.chain_id.is_none() {
                return Err(ConfigError::Invalid(format!(
                    "networks.{name}.chainId is required for remote networks"
                )));
            }
        }
        if let Some(chain_id) = self.chain_id
            && (chain_id == 0 || chain_id > MAX_CHAIN_ID)
        {
            return Err(ConfigError::Invalid(format!(
                "networks.{name}.chainId must be between 1 and {MAX_CHAIN_ID}"
            )));
        }
        if self.accounts.len() > MAX_ACCOUNTS_PER_NETWORK {
            return Err(ConfigError::Invalid(format!("networks.{name}.accounts has too many keys")));
        }
        for key in &self.accounts {
            key.validate(name)?;
        }
        Ok(())
    }
}

/// Deployer private key. `Debug` and `Display` never reveal the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployerKey(String);

impl DeployerKey {
    /// Wraps a private key string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw key. Callers must not log the result.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Validates key shape constraints.
    fn validate(&self, network: &str) -> Result<(), ConfigError> {
        if self.0.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "networks.{network}.accounts entries must be non-empty"
            )));
        }
        if self.0.trim() != self.0 {
            return Err(ConfigError::Invalid(format!(
                "networks.{network}.accounts entries must not contain surrounding whitespace"
            )));
        }
        if self.0.len() > MAX_DEPLOYER_KEY_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "networks.{network}.accounts entry too long"
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for DeployerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeployerKey(<redacted>)")
    }
}

impl fmt::Display for DeployerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED_KEY)
    }
}

/// Test-runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestRunnerProfile {
    /// Per-test timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for TestRunnerProfile {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TEST_TIMEOUT_MS,
        }
    }
}

impl TestRunnerProfile {
    /// Validates the test-runner timeout.
    fn validate(self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TEST_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "testRunnerTimeoutMs must be between 1 and {MAX_TEST_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading or writing configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// JSON/TOML parsing or rendering error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the remote network profile from the snapshot.
fn remote_network_from_env(env: &EnvSnapshot) -> Result<NetworkProfile, ConfigError> {
    let url = env.get(RPC_URL_VAR).map_or_else(
        || {
            debug!(var = RPC_URL_VAR, "unset; using placeholder RPC endpoint");
            DEFAULT_REMOTE_RPC_URL.to_string()
        },
        str::to_string,
    );
    let chain_id = match env.get(CHAIN_ID_VAR) {
        Some(raw) => parse_chain_id(raw)?,
        None => {
            debug!(var = CHAIN_ID_VAR, "unset; using fallback chain id");
            DEFAULT_REMOTE_CHAIN_ID
        }
    };
    let accounts = env.get(DEPLOYER_KEY_VAR).map_or_else(
        || {
            debug!(var = DEPLOYER_KEY_VAR, "unset; remote network has no deployer key");
            Vec::new()
        },
        |key| vec![DeployerKey::new(key)],
    );
    Ok(NetworkProfile::remote(url, chain_id, accounts))
}

/// Parses a chain identifier from decimal or `0x`-prefixed hex text.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for non-numeric, zero, or out-of-range
/// values.
pub fn parse_chain_id(raw: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim();
    let (digits, radix) = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };
    // Sign characters are not digits; `from_str_radix` alone would accept `+`.
    let parsed = if !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)) {
        u64::from_str_radix(digits, radix).ok()
    } else {
        None
    };
    match parsed {
        Some(value) if value > 0 && value <= MAX_CHAIN_ID => Ok(value),
        _ => Err(ConfigError::Invalid(format!(
            "{CHAIN_ID_VAR} must be a positive integer no greater than {MAX_CHAIN_ID}, got \
             '{trimmed}'"
        ))),
    }
}

/// Validates a `MAJOR.MINOR.PATCH` compiler version.
fn validate_compiler_version(version: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = version.split('.').collect();
    let well_formed = parts.len() == 3
        && parts.iter().all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        && parts.iter().all(|part| part.parse::<u32>().is_ok());
    if !well_formed {
        return Err(ConfigError::Invalid(format!(
            "compiler version must be MAJOR.MINOR.PATCH, got '{version}'"
        )));
    }
    Ok(())
}

/// Validates a network name.
fn validate_network_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Invalid("network names must be non-empty".to_string()));
    }
    if name.len() > MAX_NETWORK_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("network name too long: {name}")));
    }
    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
        return Err(ConfigError::Invalid(format!(
            "network name must use [A-Za-z0-9_-]: {name}"
        )));
    }
    Ok(())
}

/// Validates an RPC endpoint URL without altering it.
fn validate_endpoint_url(network: &str, value: &str) -> Result<(), ConfigError> {
    if value.len() > MAX_URL_LENGTH {
        return Err(ConfigError::Invalid(format!("networks.{network}.url exceeds max length")));
    }
    if value.trim() != value {
        return Err(ConfigError::Invalid(format!(
            "networks.{network}.url must not contain surrounding whitespace"
        )));
    }
    let parsed = Url::parse(value)
        .map_err(|err| ConfigError::Invalid(format!("networks.{network}.url is invalid: {err}")))?;
    if !ALLOWED_URL_SCHEMES.contains(&parsed.scheme()) {
        return Err(ConfigError::Invalid(format!(
            "networks.{network}.url must use http, https, ws, or wss"
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::Invalid(format!("networks.{network}.url must include a host")));
    }
    Ok(())
}

/// Short label for a dotenv outcome used in log fields.
const fn dotenv_label(outcome: &DotenvOutcome) -> &'static str {
    match outcome {
        DotenvOutcome::Disabled => "disabled",
        DotenvOutcome::Missing {
            ..
        } => "missing",
        DotenvOutcome::Unreadable {
            ..
        } => "unreadable",
        DotenvOutcome::Loaded {
            ..
        } => "loaded",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
