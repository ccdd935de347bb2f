// soneium-toolchain-config/src/artifact.rs
// ============================================================================
// Module: Config Artifacts
// Description: Render, write, and read the toolchain configuration artifact.
// Purpose: Hand the resolved settings to the toolchain at a well-known path.
// Dependencies: serde_json, toml
// ============================================================================

//! ## Overview
//! The external toolchain discovers its settings by file name. The canonical
//! artifact is `toolchain.config.json`; a TOML rendering is also supported and
//! selected by file extension. Reads enforce size, encoding, and path limits
//! and validate the decoded configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use crate::config::ConfigError;
use crate::config::ToolchainConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Conventional artifact file name looked up by the toolchain.
pub const ARTIFACT_FILE_NAME: &str = "toolchain.config.json";
/// Maximum artifact file size in bytes.
pub(crate) const MAX_ARTIFACT_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Supported artifact encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Pretty-printed TOML.
    Toml,
}

impl ArtifactFormat {
    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for missing or unsupported extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => {
                Err(ConfigError::Invalid(format!("unsupported artifact extension: {other}")))
            }
            None => Err(ConfigError::Invalid(
                "artifact path must end in .json or .toml".to_string(),
            )),
        }
    }

    /// Returns the canonical file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Renders the configuration in the requested format.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when serialization fails.
pub fn render_artifact(
    config: &ToolchainConfig,
    format: ArtifactFormat,
) -> Result<String, ConfigError> {
    match format {
        ArtifactFormat::Json => {
            let mut out = serde_json::to_string_pretty(config)
                .map_err(|err| ConfigError::Parse(err.to_string()))?;
            out.push('\n');
            Ok(out)
        }
        ArtifactFormat::Toml => {
            // Going through a table emits plain values ahead of sub-tables.
            let table =
                toml::Table::try_from(config).map_err(|err| ConfigError::Parse(err.to_string()))?;
            toml::to_string_pretty(&table).map_err(|err| ConfigError::Parse(err.to_string()))
        }
    }
}

/// Validates and writes the configuration to `path`.
///
/// The format follows the path extension.
///
/// # Errors
///
/// Returns [`ConfigError`] when validation, rendering, or the write fails.
pub fn write_artifact(
    config: &ToolchainConfig,
    path: &Path,
) -> Result<ArtifactFormat, ConfigError> {
    validate_path(path)?;
    let format = ArtifactFormat::from_path(path)?;
    config.validate()?;
    let rendered = render_artifact(config, format)?;
    fs::write(path, rendered).map_err(|err| ConfigError::Io(err.to_string()))?;
    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        "wrote toolchain artifact"
    );
    Ok(format)
}

/// Reads and validates a configuration artifact.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is unreadable, oversized, not UTF-8,
/// malformed, or fails validation.
pub fn read_artifact(path: &Path) -> Result<ToolchainConfig, ConfigError> {
    validate_path(path)?;
    let format = ArtifactFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    if bytes.len() > MAX_ARTIFACT_FILE_SIZE {
        return Err(ConfigError::Invalid("artifact file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::Invalid("artifact file must be utf-8".to_string()))?;
    let config: ToolchainConfig = match format {
        ArtifactFormat::Json => {
            serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?
        }
        ArtifactFormat::Toml => {
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?
        }
    };
    config.validate()?;
    Ok(config)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates an artifact path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(ConfigError::Invalid("artifact path must be non-empty".to_string()));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("artifact path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("artifact path component too long".to_string()));
        }
    }
    Ok(())
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

    use std::path::PathBuf;

    use super::*;

    #[test]
    fn format_detected_from_extension() {
        assert_eq!(
            ArtifactFormat::from_path(Path::new(ARTIFACT_FILE_NAME)).unwrap(),
            ArtifactFormat::Json
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("toolchain.config.toml")).unwrap(),
            ArtifactFormat::Toml
        );
    }

    #[test]
    fn format_rejects_unknown_extension() {
        assert!(ArtifactFormat::from_path(Path::new("toolchain.config.yaml")).is_err());
        assert!(ArtifactFormat::from_path(Path::new("toolchain")).is_err());
    }

    #[test]
    fn validate_path_rejects_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn validate_path_rejects_component_too_long() {
        let long = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        let path = PathBuf::from(format!("{long}.json"));
        assert!(validate_path(&path).is_err());
    }

    #[test]
    fn validate_path_rejects_total_length() {
        let segment = "a".repeat(200);
        let path: PathBuf = std::iter::repeat_n(segment.as_str(), 25).collect();
        assert!(validate_path(&path).is_err());
    }

    #[test]
    fn read_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ARTIFACT_FILE_NAME);
        fs::write(&path, vec![b' '; MAX_ARTIFACT_FILE_SIZE + 1]).unwrap();
        let err = read_artifact(&path).unwrap_err();
        assert!(err.to_string().contains("size limit"));
    }

    #[test]
    fn json_rendering_ends_with_newline() {
        let rendered = render_artifact(&ToolchainConfig::default(), ArtifactFormat::Json).unwrap();
        assert!(rendered.ends_with("}\n"));
    }
}
