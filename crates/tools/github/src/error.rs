//! Error types for GitHub release installation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for release installation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, downloading or installing an asset.
#[derive(Error, Debug)]
pub enum Error {
    /// The release listing endpoint answered with a non-success status.
    #[error("GitHub API returned status {status} for {repo}: {body}")]
    Upstream {
        /// The repository whose releases were requested.
        repo: String,
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The release listing could not be decoded.
    #[error("Invalid response from {url}: {message}")]
    InvalidResponse {
        /// The requested URL.
        url: String,
        /// Decoder message.
        message: String,
    },

    /// No release satisfied the pre-release filter.
    #[error("No suitable release found for {0}")]
    NotFound(String),

    /// The URL template rendered to an empty string.
    #[error("Asset URL template rendered to an empty URL")]
    EmptyTemplate,

    /// The existence probe for the asset URL failed.
    #[error("Asset URL {url} is not reachable: {message}")]
    UnreachableAsset {
        /// The probed URL.
        url: String,
        /// Status or transport message.
        message: String,
    },

    /// Downloading the asset body failed.
    #[error("Failed to download asset from {url}: {message}")]
    Download {
        /// The asset URL.
        url: String,
        /// Status or transport message.
        message: String,
    },

    /// The archive kind cannot be extracted.
    #[error("Unsupported archive type: {0}")]
    UnsupportedFormat(String),

    /// The archive stream is malformed, truncated or corrupt.
    #[error("Failed to extract {kind} archive: {message}")]
    Extraction {
        /// The archive kind being read.
        kind: String,
        /// Decoder message.
        message: String,
    },

    /// A file destination glob does not compile.
    #[error("Invalid file destination pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser message.
        message: String,
    },

    /// The repository identifier is not `owner/repo`.
    #[error("Repository must be in the format 'owner/repo', got '{0}'")]
    InvalidRepository(String),

    /// The HTTP transport failed before a response was received.
    #[error("Request to {url} failed: {message}")]
    Transport {
        /// The requested URL.
        url: String,
        /// Transport message.
        message: String,
    },

    /// Creating a directory or writing a file failed.
    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        /// What was being attempted.
        action: &'static str,
        /// The path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an upstream status error.
    #[must_use]
    pub fn upstream(repo: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            repo: repo.into(),
            status,
            body: body.into(),
        }
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an unreachable asset error.
    #[must_use]
    pub fn unreachable_asset(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnreachableAsset {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a download error.
    #[must_use]
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error.
    #[must_use]
    pub fn extraction(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a filesystem error.
    #[must_use]
    pub fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}
