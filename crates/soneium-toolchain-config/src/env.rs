// soneium-toolchain-config/src/env.rs
// ============================================================================
// Module: Environment Snapshot
// Description: Explicit key/value view of the environment used by the loader.
// Purpose: Keep config resolution pure and testable without process mutation.
// Dependencies: dotenvy, tracing
// ============================================================================

//! ## Overview
//! The loader never reads ambient process state directly. Instead it resolves
//! values from an [`EnvSnapshot`], captured once from the process environment
//! (or built from explicit pairs in tests) and optionally merged with a local
//! `.env` file.
//!
//! # Invariants
//! - Empty values are indistinguishable from unset values.
//! - `.env` entries fill gaps only; existing keys are never overridden.
//! - Merging a `.env` file never fails and never touches `std::env`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable overriding the remote network RPC endpoint.
pub const RPC_URL_VAR: &str = "SONEIUM_RPC";
/// Environment variable overriding the remote network chain identifier.
pub const CHAIN_ID_VAR: &str = "SONEIUM_CHAINID";
/// Environment variable carrying the deployer private key.
pub const DEPLOYER_KEY_VAR: &str = "DEPLOYER_PRIVATE_KEY";
/// Environment variable overriding the `.env` file location.
pub const ENV_FILE_VAR: &str = "SONEIUM_TOOLCHAIN_ENV_FILE";
/// Default `.env` file name, resolved against the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";
/// Maximum `.env` file size in bytes.
const MAX_DOTENV_FILE_SIZE: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Immutable-by-convention mapping of environment variable names to values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    /// Captured variables keyed by name.
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self {
            vars,
        }
    }

    /// Builds a snapshot from explicit key/value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs.into_iter().map(|(key, value)| (key.into(), value.into())).collect();
        Self {
            vars,
        }
    }

    /// Returns the value for `key` when it is set and non-empty.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str).filter(|value| !value.is_empty())
    }

    /// Returns the number of captured variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns true when no variables are captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merges entries from a `.env` file, best effort.
    ///
    /// A missing file yields [`DotenvOutcome::Missing`]; a path that cannot be
    /// read as a regular file yields [`DotenvOutcome::Unreadable`]. Malformed
    /// or non-UTF-8 lines are skipped and counted, and parsing continues with
    /// the next line. Keys already present in the snapshot win.
    pub fn merge_dotenv(&mut self, path: &Path) -> DotenvOutcome {
        let bytes = match read_dotenv_file(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no .env file; using process environment only");
                return DotenvOutcome::Missing {
                    path: path.to_path_buf(),
                };
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable .env file");
                return DotenvOutcome::Unreadable {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                };
            }
        };

        let (text, mut skipped) = decode_dotenv_lines(&bytes, path);
        let mut applied = 0_usize;
        let mut shadowed = 0_usize;
        let mut truncated = false;
        for item in dotenvy::from_read_iter(text.as_bytes()) {
            match item {
                Ok((key, value)) => {
                    if self.vars.contains_key(&key) {
                        shadowed += 1;
                    } else {
                        self.vars.insert(key, value);
                        applied += 1;
                    }
                }
                Err(dotenvy::Error::LineParse(_, index)) => {
                    // Line content may hold a secret; report the position only.
                    warn!(path = %path.display(), index, "skipping malformed .env line");
                    skipped += 1;
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "stopped reading .env file");
                    truncated = true;
                    break;
                }
            }
        }
        debug!(path = %path.display(), applied, shadowed, skipped, truncated, "merged .env file");
        DotenvOutcome::Loaded {
            path: path.to_path_buf(),
            applied,
            shadowed,
            skipped,
            truncated,
        }
    }
}

impl fmt::Debug for EnvSnapshot {
    // Values may be secrets; only names are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSnapshot").field("keys", &self.vars.keys().collect::<Vec<_>>()).finish()
    }
}

// ============================================================================
// SECTION: Dotenv Outcome
// ============================================================================

/// Result of merging a `.env` file into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvOutcome {
    /// Dotenv loading was disabled by the caller.
    Disabled,
    /// No file exists at the resolved path.
    Missing {
        /// Resolved `.env` path.
        path: PathBuf,
    },
    /// The file exists but could not be opened.
    Unreadable {
        /// Resolved `.env` path.
        path: PathBuf,
        /// Underlying error message.
        error: String,
    },
    /// The file was read.
    Loaded {
        /// Resolved `.env` path.
        path: PathBuf,
        /// Entries added to the snapshot.
        applied: usize,
        /// Entries ignored because the key was already set.
        shadowed: usize,
        /// Malformed lines that were skipped.
        skipped: usize,
        /// Reading stopped before the end of the file.
        truncated: bool,
    },
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a `.env` file, refusing non-regular files and oversized input.
fn read_dotenv_file(path: &Path) -> io::Result<Vec<u8>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    if metadata.len() > MAX_DOTENV_FILE_SIZE {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "file exceeds size limit"));
    }
    fs::read(path)
}

/// Blanks lines that are not valid UTF-8 so the parser never stops early.
///
/// Line positions are preserved; returns the decoded text and the number of
/// lines dropped.
fn decode_dotenv_lines(bytes: &[u8], path: &Path) -> (String, usize) {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0_usize;
    for (index, line) in bytes.split(|byte| *byte == b'\n').enumerate() {
        if index > 0 {
            text.push('\n');
        }
        if let Ok(line) = std::str::from_utf8(line) {
            text.push_str(line);
        } else {
            warn!(path = %path.display(), index, "skipping .env line that is not valid UTF-8");
            dropped += 1;
        }
    }
    (text, dropped)
}

/// Resolves the `.env` path from an explicit path, the override variable, or
/// the default file name.
#[must_use]
pub fn resolve_dotenv_path(explicit: Option<&Path>, env: &EnvSnapshot) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    env.get(ENV_FILE_VAR).map_or_else(|| PathBuf::from(DEFAULT_ENV_FILE), PathBuf::from)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
