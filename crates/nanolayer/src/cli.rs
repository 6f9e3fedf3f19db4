//! Argument parsing, error categories and exit codes.

use clap::{Parser, Subcommand};
use miette::{Diagnostic, Report};
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

use crate::tracing::LogLevel;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// CLI or configuration error exit code
pub const EXIT_CLI: i32 = 2;
/// Installation failure exit code
pub const EXIT_INSTALL: i32 = 3;

/// CLI-specific error types with proper exit code mapping
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI or configuration error (exit code 2)
    #[error("CLI/configuration error: {message}")]
    #[diagnostic(code(nanolayer::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Installation failure (exit code 3)
    #[error("Installation failed: {message}")]
    #[diagnostic(code(nanolayer::cli::install))]
    Install {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new installation error
    #[must_use]
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new installation error with help text
    #[must_use]
    pub fn install_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

/// Convert installer errors to the matching CLI category.
///
/// Malformed inputs are configuration errors (exit code 2); everything that
/// goes wrong while talking to GitHub or writing files is an installation
/// error (exit code 3).
impl From<nanolayer_tools_github::Error> for CliError {
    fn from(err: nanolayer_tools_github::Error) -> Self {
        use nanolayer_tools_github::Error;

        match err {
            Error::InvalidRepository(_) => Self::config_with_help(
                err.to_string(),
                "Repositories are given as owner/name, e.g. charmbracelet/gum",
            ),
            Error::InvalidPattern { .. } | Error::EmptyTemplate => Self::config(err.to_string()),
            Error::Upstream { status: 401 | 403, .. } => Self::install_with_help(
                err.to_string(),
                "Set GITHUB_TOKEN to raise the GitHub API rate limit",
            ),
            Error::UnreachableAsset { .. } => Self::install_with_help(
                err.to_string(),
                "Check --asset-url-template, --asset-name and --architecture-replacement",
            ),
            other => Self::install(other.to_string()),
        }
    }
}

/// Map CLI error to appropriate exit code
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Install { .. } => EXIT_INSTALL,
    }
}

/// Render error appropriately based on JSON flag
pub fn render_error(err: &CliError, json_mode: bool) {
    if json_mode {
        let error_envelope = ErrorEnvelope::new(serde_json::json!({
            "code": match err {
                CliError::Config { .. } => "config",
                CliError::Install { .. } => "install",
            },
            "message": err.to_string()
        }));

        match serde_json::to_string(&error_envelope) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error serializing error response"),
        }
    } else {
        let report = Report::new(err.clone());
        eprintln!("{report:?}");
        let _ = io::stderr().flush();
    }
}

/// Success response envelope for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct OkEnvelope<T> {
    /// Status indicator - always "ok" for success
    pub status: &'static str,
    /// The actual data payload
    pub data: T,
}

impl<T> OkEnvelope<T> {
    /// Create a new success envelope
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response envelope for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope<E> {
    /// Status indicator - always "error" for failures
    pub status: &'static str,
    /// The error details
    pub error: E,
}

impl<E> ErrorEnvelope<E> {
    /// Create a new error envelope
    #[must_use]
    pub const fn new(error: E) -> Self {
        Self {
            status: "error",
            error,
        }
    }
}

/// Main CLI entry point for nanolayer.
///
/// Installs tools published as GitHub release assets.
#[derive(Parser, Debug)]
#[command(name = "nanolayer")]
#[command(about = "Install tools published as GitHub release assets")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    /// Emit logs and results as JSON.
    #[arg(long, global = true, help = "Emit logs and results as JSON")]
    pub json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a tool.
    #[command(about = "Install a tool")]
    Install {
        /// Where to install from.
        #[command(subcommand)]
        source: InstallCommands,
    },
    /// Show host information.
    #[command(about = "Show host information")]
    System,
    /// Show version information.
    #[command(about = "Show version information")]
    Version,
}

/// Install sources.
#[derive(Subcommand, Debug)]
pub enum InstallCommands {
    /// Install a release asset from a GitHub repository.
    #[command(about = "Install a release asset from a GitHub repository")]
    Github(GithubArgs),
}

/// Arguments of `install github`.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct GithubArgs {
    /// Repository as owner/name.
    #[arg(value_name = "OWNER/REPO")]
    pub repo: String,

    /// Asset name; defaults to the repository name.
    #[arg(long, help = "Asset name, defaults to the repository name")]
    pub asset_name: Option<String>,

    /// Release version without the leading `v`, or `latest`.
    #[arg(long, default_value = "latest", help = "Release version or 'latest'")]
    pub asset_version: String,

    /// Asset URL template with `${Repo}`, `${Version}`, `${Architecture}`
    /// and `${AssetName}` placeholders.
    #[arg(long, help = "Asset URL template")]
    pub asset_url_template: Option<String>,

    /// Architecture rename, as `"<host> <asset>"`.
    #[arg(
        long = "architecture-replacement",
        value_name = "FROM TO",
        help = "Rename the host architecture, e.g. \"x86_64 amd64\""
    )]
    pub architecture_replacements: Vec<String>,

    /// Entry destination, as `"<glob> <path>"`.
    #[arg(
        long = "file-destination",
        value_name = "GLOB PATH",
        help = "Install entries matching GLOB to PATH, e.g. \"*/gum /usr/local/bin/gum\""
    )]
    pub file_destinations: Vec<String>,
}

/// Split `"<left> <right>"` on whitespace into exactly two fields.
pub fn parse_pair<'a>(flag: &str, value: &'a str) -> Result<(&'a str, &'a str), CliError> {
    let mut fields = value.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(left), Some(right), None) => Ok((left, right)),
        _ => Err(CliError::config_with_help(
            format!("Invalid --{flag} value '{value}'"),
            format!("Expected two space-separated fields, e.g. --{flag} \"a b\""),
        )),
    }
}

/// Parse command line arguments into a CLI structure.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
