//! `install github` command.

use std::path::PathBuf;
use std::sync::Arc;

use nanolayer_system::LinuxSystem;
use nanolayer_tools_github::{
    ArchitectureReplacements, DestinationMap, GitHubClient, GitHubInstaller, InstallReport,
    InstallRequest, LATEST, default_destinations,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{CliError, GithubArgs, OkEnvelope, parse_pair};

/// Turn command line arguments into an installer request.
///
/// Empty `--asset-name` and `--asset-version` values fall back to the
/// defaults. Without any `--file-destination`, `*/<asset>` is installed to
/// `/usr/local/bin/<asset>`.
///
/// # Errors
///
/// Returns a configuration error for a malformed repository, pair or glob.
pub fn build_request(args: &GithubArgs) -> Result<InstallRequest, CliError> {
    let mut request = InstallRequest::for_repo(&args.repo)?;

    if let Some(name) = args.asset_name.as_deref().filter(|n| !n.is_empty()) {
        request.asset_name = name.to_string();
        request.destinations = default_destinations(name)?;
    }

    request.version = if args.asset_version.is_empty() {
        LATEST.to_string()
    } else {
        args.asset_version.clone()
    };

    if let Some(template) = args.asset_url_template.as_deref().filter(|t| !t.is_empty()) {
        request.url_template = template.to_string();
    }

    let mut replacements = ArchitectureReplacements::new();
    for pair in &args.architecture_replacements {
        let (from, to) = parse_pair("architecture-replacement", pair)?;
        replacements.insert(from, to);
    }
    request.architecture_replacements = replacements;

    if !args.file_destinations.is_empty() {
        let mut destinations = DestinationMap::new();
        for pair in &args.file_destinations {
            let (pattern, path) = parse_pair("file-destination", pair)?;
            destinations.insert(pattern, path)?;
        }
        request.destinations = destinations;
    }

    Ok(request)
}

#[derive(Debug, Serialize)]
struct InstalledSummary {
    entry: String,
    destination: PathBuf,
}

#[derive(Debug, Serialize)]
struct InstallSummary {
    repo: String,
    asset_url: String,
    kind: String,
    entries: usize,
    installed: Vec<InstalledSummary>,
}

impl InstallSummary {
    fn new(repo: &str, report: InstallReport) -> Self {
        Self {
            repo: repo.to_string(),
            asset_url: report.asset_url,
            kind: report.kind.to_string(),
            entries: report.entries,
            installed: report
                .installed
                .into_iter()
                .map(|file| InstalledSummary {
                    entry: file.entry,
                    destination: file.destination,
                })
                .collect(),
        }
    }
}

/// Execute `install github`.
///
/// # Errors
///
/// Returns a configuration error for malformed arguments and an installation
/// error when resolving, downloading, extracting or writing fails.
pub async fn execute_install_github(args: &GithubArgs, json: bool) -> Result<(), CliError> {
    let request = build_request(args)?;
    info!(
        repo = %request.repo,
        asset = %request.asset_name,
        version = %request.version,
        "Installing from GitHub release"
    );
    debug!(template = %request.url_template, destinations = request.destinations.len(), "Install request");

    let client = GitHubClient::from_env()?;
    let installer = GitHubInstaller::new(client, Arc::new(LinuxSystem::new()));
    let report = installer.install_from_release(&request).await?;
    let summary = InstallSummary::new(&request.repo, report);

    if json {
        let output = serde_json::to_string(&OkEnvelope::new(&summary))
            .map_err(|e| CliError::install(format!("Failed to serialize result: {e}")))?;
        println!("{output}");
    } else {
        for file in &summary.installed {
            println!("{} -> {}", file.entry, file.destination.display());
        }
    }

    Ok(())
}
