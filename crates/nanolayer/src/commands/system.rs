//! `system` command.

use nanolayer_system::{HostSystem, LinuxSystem};
use serde::Serialize;

use crate::cli::{CliError, OkEnvelope};

/// What nanolayer knows about the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SystemInfo {
    /// Whether the kernel is Linux.
    pub is_linux: bool,
    /// Host architecture name.
    pub architecture: String,
    /// Distribution id.
    pub distribution: String,
    /// Whether the process runs as root or through sudo.
    pub has_root_privileges: bool,
    /// Version of this binary.
    pub nanolayer_version: String,
}

impl SystemInfo {
    /// Collect host facts from `host`.
    #[must_use]
    pub fn collect(host: &dyn HostSystem) -> Self {
        Self {
            is_linux: host.is_linux(),
            architecture: host.architecture().to_string(),
            distribution: host.distribution().to_string(),
            has_root_privileges: host.has_root_privileges(),
            nanolayer_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// `Key=value` lines.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            format!("IsLinux={}", self.is_linux),
            format!("Architecture={}", self.architecture),
            format!("Distribution={}", self.distribution),
            format!("HasRootPrivileges={}", self.has_root_privileges),
            format!("NanolayerVersion={}", self.nanolayer_version),
        ]
    }
}

/// Execute `system`.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn execute_system(json: bool) -> Result<(), CliError> {
    let info = SystemInfo::collect(&LinuxSystem::new());

    if json {
        let output = serde_json::to_string(&OkEnvelope::new(&info))
            .map_err(|e| CliError::install(format!("Failed to serialize result: {e}")))?;
        println!("{output}");
    } else {
        for line in info.to_lines() {
            println!("{line}");
        }
    }

    Ok(())
}
