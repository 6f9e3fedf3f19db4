//! GitHub Releases asset installer for nanolayer.
//!
//! Installs tools shipped as release assets. Supports:
//! - `${Key}` URL templates with `Repo`, `Version`, `Architecture` and
//!   `AssetName` placeholders, plus any caller-supplied keys
//! - `latest` resolution against the release listing
//! - Host architecture renaming to match vendor naming
//! - tar, tar.gz, tar.bz2, zip, gz and bz2 assets, detected from the URL
//!   or the content
//! - Glob-based fan-out of archive entries to filesystem destinations
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use nanolayer_system::LinuxSystem;
//! use nanolayer_tools_github::{GitHubClient, GitHubInstaller, InstallRequest};
//!
//! let installer = GitHubInstaller::new(GitHubClient::from_env()?, Arc::new(LinuxSystem::new()));
//! let request = InstallRequest::for_repo("charmbracelet/gum")?;
//! let report = installer.install_from_release(&request).await?;
//! ```

mod archive;
mod client;
mod config;
mod destination;
mod error;
mod extract;
pub mod http;
mod install;
mod normalize;
mod release;
mod template;

pub use archive::ArchiveKind;
pub use client::GitHubClient;
pub use config::{DEFAULT_API_BASE, GitHubConfig, TOKEN_ENV_VARS};
pub use destination::{Destination, DestinationMap};
pub use error::{Error, Result};
pub use extract::{ArchiveEntry, SINGLE_STREAM_ENTRY, extract, extract_named};
pub use http::{HttpTransport, ReqwestTransport};
pub use install::{
    DEFAULT_BIN_DIR, DEFAULT_URL_TEMPLATE, GitHubInstaller, InstallReport, InstallRequest,
    InstalledFile, default_destinations, install_entries, repo_name,
};
pub use normalize::ArchitectureReplacements;
pub use release::{DEFAULT_PAGE_SIZE, LATEST, Release, normalize_tag, select_latest};
pub use template::{KEY_ARCHITECTURE, KEY_ASSET_NAME, KEY_REPO, KEY_VERSION, TemplateContext};
