// soneium-toolchain-cli/src/main.rs
// ============================================================================
// Module: Soneium Toolchain CLI Entry Point
// Description: Command dispatcher for toolchain configuration workflows.
// Purpose: Resolve, inspect, check, and emit the toolchain config artifact.
// Dependencies: clap, soneium-toolchain-config, thiserror, tracing-subscriber.
// ============================================================================

//! ## Overview
//! The Soneium toolchain CLI resolves the configuration from the environment
//! (plus an optional `.env` file) and hands it to the external toolchain by
//! writing the conventional artifact. Logs go to stderr so stdout stays
//! machine-readable. Security posture: deployer keys are redacted from every
//! display path; only `config write` emits them, and only to the artifact.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use soneium_toolchain_config::ARTIFACT_FILE_NAME;
use soneium_toolchain_config::ArtifactFormat;
use soneium_toolchain_config::LoadOptions;
use soneium_toolchain_config::REMOTE_NETWORK_NAME;
use soneium_toolchain_config::ToolchainConfig;
use soneium_toolchain_config::artifact_schema;
use soneium_toolchain_config::dotenv_example;
use soneium_toolchain_config::render_artifact;
use soneium_toolchain_config::write_artifact;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "soneium-toolchain", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the resolved configuration with deployer keys redacted.
    Show(ConfigShowCommand),
    /// Write the configuration artifact for the toolchain.
    Write(ConfigWriteCommand),
    /// Check that a network can be used as a deployment target.
    Check(ConfigCheckCommand),
    /// Print the JSON schema of the configuration artifact.
    Schema,
    /// Print a `.env` template listing every supported variable.
    EnvExample,
}

/// Environment source arguments shared by loading commands.
#[derive(Args, Debug, Clone)]
struct EnvArgs {
    /// Path to a `.env` file (overrides `SONEIUM_TOOLCHAIN_ENV_FILE`).
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
    /// Skip `.env` loading entirely.
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "env_file")]
    no_dotenv: bool,
}

impl EnvArgs {
    /// Converts CLI flags into loader options.
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            dotenv: !self.no_dotenv,
            env_file: self.env_file.clone(),
        }
    }
}

/// Arguments for `config show`.
#[derive(Args, Debug)]
struct ConfigShowCommand {
    /// Environment source options.
    #[command(flatten)]
    env: EnvArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,
}

/// Arguments for `config write`.
#[derive(Args, Debug)]
struct ConfigWriteCommand {
    /// Environment source options.
    #[command(flatten)]
    env: EnvArgs,
    /// Artifact path; the extension selects JSON or TOML.
    #[arg(long, value_name = "PATH", default_value = ARTIFACT_FILE_NAME)]
    output: PathBuf,
}

/// Arguments for `config check`.
#[derive(Args, Debug)]
struct ConfigCheckCommand {
    /// Environment source options.
    #[command(flatten)]
    env: EnvArgs,
    /// Network that will be targeted by a deployment.
    #[arg(long, value_name = "NAME", default_value = REMOTE_NETWORK_NAME)]
    network: String,
}

/// Output formats accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormatArg {
    /// Pretty-printed JSON.
    Json,
    /// Pretty-printed TOML.
    Toml,
}

impl From<FormatArg> for ArtifactFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => Self::Json,
            FormatArg::Toml => Self::Toml,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("soneium-toolchain {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Installs the stderr log subscriber, honoring `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // A subscriber may already be installed by an embedding harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Show(command) => command_config_show(&command),
        ConfigCommand::Write(command) => command_config_write(&command),
        ConfigCommand::Check(command) => command_config_check(&command),
        ConfigCommand::Schema => command_config_schema(),
        ConfigCommand::EnvExample => command_config_env_example(),
    }
}

/// Executes `config show`.
fn command_config_show(command: &ConfigShowCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.env)?;
    let rendered = show_output(&config, command.format)?;
    write_stdout_raw(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `config write`.
fn command_config_write(command: &ConfigWriteCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.env)?;
    tracing::debug!(output = %command.output.display(), "writing toolchain artifact");
    let format = write_artifact(&config, &command.output)
        .map_err(|err| CliError::new(format!("failed to write artifact: {err}")))?;
    write_stdout_line(&format!(
        "wrote {} ({})",
        command.output.display(),
        format.extension()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `config check`.
fn command_config_check(command: &ConfigCheckCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.env)?;
    tracing::debug!(network = %command.network, "checking deploy target");
    let summary = check_summary(&config, &command.network)?;
    write_stdout_line(&summary).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `config schema`.
fn command_config_schema() -> CliResult<ExitCode> {
    let schema = serde_json::to_string_pretty(&artifact_schema())
        .map_err(|err| CliError::new(format!("failed to render schema: {err}")))?;
    write_stdout_line(&schema).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `config env-example`.
fn command_config_env_example() -> CliResult<ExitCode> {
    write_stdout_raw(&dotenv_example())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads and validates configuration using the CLI environment flags.
fn load_config(env: &EnvArgs) -> CliResult<ToolchainConfig> {
    ToolchainConfig::load(&env.load_options())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

/// Renders the redacted configuration for display.
fn show_output(config: &ToolchainConfig, format: FormatArg) -> CliResult<String> {
    render_artifact(&config.redacted(), format.into())
        .map_err(|err| CliError::new(format!("failed to render config: {err}")))
}

/// Builds the deploy-target readiness summary for `network`.
fn check_summary(config: &ToolchainConfig, network: &str) -> CliResult<String> {
    let profile =
        config.require_deploy_target(network).map_err(|err| CliError::new(err.to_string()))?;
    if profile.is_local() {
        return Ok(format!("network {network} is local; no deployer key required"));
    }
    let chain_id = profile.chain_id.map_or_else(|| "unknown".to_string(), |id| id.to_string());
    Ok(format!(
        "network {network} ready: chain id {chain_id}, {} deployer key(s)",
        profile.accounts.len()
    ))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes text to stdout without adding a newline.
fn write_stdout_raw(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(message.as_bytes())
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
