//! Command implementations.

pub mod install;
pub mod system;

use serde::Serialize;

use crate::cli::{CliError, OkEnvelope};

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
}

/// Execute `version`.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn execute_version(json: bool) -> Result<(), CliError> {
    let version = env!("CARGO_PKG_VERSION");
    if json {
        let output = serde_json::to_string(&OkEnvelope::new(VersionInfo { version }))
            .map_err(|e| CliError::install(format!("Failed to serialize result: {e}")))?;
        println!("{output}");
    } else {
        println!("nanolayer version {version}");
    }
    Ok(())
}
