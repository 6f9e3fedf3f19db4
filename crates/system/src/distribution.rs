//! Linux distribution detection from os-release.

use std::fmt;
use std::path::Path;

use tracing::debug;

/// Default location of the os-release file.
pub const OS_RELEASE_FILE: &str = "/etc/os-release";

/// Linux distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Ubuntu.
    Ubuntu,
    /// Debian.
    Debian,
    /// Alpine Linux.
    Alpine,
    /// Red Hat Enterprise Linux.
    Rhel,
    /// Fedora.
    Fedora,
    /// openSUSE (Leap and Tumbleweed included).
    OpenSuse,
    /// Raspbian.
    Raspbian,
    /// Manjaro.
    Manjaro,
    /// Arch Linux.
    Arch,
    /// Not recognised or not readable.
    Unknown,
}

impl Distribution {
    /// Map an os-release `ID` value to a distribution.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id.trim().trim_matches(['"', '\'']).to_lowercase().as_str() {
            "ubuntu" => Self::Ubuntu,
            "debian" => Self::Debian,
            "alpine" => Self::Alpine,
            "rhel" => Self::Rhel,
            "fedora" => Self::Fedora,
            "opensuse" | "opensuse-leap" | "opensuse-tumbleweed" => Self::OpenSuse,
            "raspbian" => Self::Raspbian,
            "manjaro" => Self::Manjaro,
            "arch" => Self::Arch,
            _ => Self::Unknown,
        }
    }

    /// Parse the contents of an os-release file.
    ///
    /// Only the first `ID=` line is considered.
    #[must_use]
    pub fn parse_os_release(contents: &str) -> Self {
        contents
            .lines()
            .find_map(|line| line.strip_prefix("ID="))
            .map_or(Self::Unknown, Self::from_id)
    }

    /// Read and parse an os-release file, yielding [`Distribution::Unknown`]
    /// when it cannot be read.
    #[must_use]
    pub fn detect_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_os_release(&contents),
            Err(e) => {
                debug!(?path, error = %e, "Could not read os-release");
                Self::Unknown
            }
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ubuntu => "ubuntu",
            Self::Debian => "debian",
            Self::Alpine => "alpine",
            Self::Rhel => "rhel",
            Self::Fedora => "fedora",
            Self::OpenSuse => "opensuse",
            Self::Raspbian => "raspbian",
            Self::Manjaro => "manjaro",
            Self::Arch => "arch",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
