//! Host capability trait and its implementations.

use std::path::PathBuf;

use tracing::trace;

use crate::architecture::Architecture;
use crate::distribution::{Distribution, OS_RELEASE_FILE};

/// Read-only view of the machine an installer runs on.
pub trait HostSystem: Send + Sync {
    /// CPU architecture of the host.
    fn architecture(&self) -> Architecture;

    /// Linux distribution family of the host.
    fn distribution(&self) -> Distribution;

    /// Whether the kernel reports itself as Linux.
    fn is_linux(&self) -> bool;

    /// Whether the process runs as root or under sudo.
    fn has_root_privileges(&self) -> bool;
}

/// The real host, probed through `uname(2)` and os-release.
#[derive(Debug, Clone)]
pub struct LinuxSystem {
    os_release: PathBuf,
}

impl Default for LinuxSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxSystem {
    /// Probe the running host using the standard os-release location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            os_release: PathBuf::from(OS_RELEASE_FILE),
        }
    }

    /// Read the distribution from a different os-release file.
    #[must_use]
    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }
}

impl HostSystem for LinuxSystem {
    fn architecture(&self) -> Architecture {
        let machine = uname::machine().unwrap_or_else(|| std::env::consts::ARCH.to_string());
        trace!(%machine, "Host machine");
        Architecture::from_machine(&machine)
    }

    fn distribution(&self) -> Distribution {
        Distribution::detect_from(&self.os_release)
    }

    fn is_linux(&self) -> bool {
        uname::sysname().map_or(cfg!(target_os = "linux"), |name| name == "Linux")
    }

    fn has_root_privileges(&self) -> bool {
        uname::effective_uid_is_root()
            || std::env::var("SUDO_UID").is_ok_and(|uid| !uid.is_empty())
    }
}

/// A host with fixed answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHost {
    /// Reported architecture.
    pub architecture: Architecture,
    /// Reported distribution.
    pub distribution: Distribution,
    /// Reported Linux flag.
    pub linux: bool,
    /// Reported privilege flag.
    pub root: bool,
}

impl StaticHost {
    /// A Linux host with the given architecture and distribution, not root.
    #[must_use]
    pub const fn new(architecture: Architecture, distribution: Distribution) -> Self {
        Self {
            architecture,
            distribution,
            linux: true,
            root: false,
        }
    }
}

impl HostSystem for StaticHost {
    fn architecture(&self) -> Architecture {
        self.architecture
    }

    fn distribution(&self) -> Distribution {
        self.distribution
    }

    fn is_linux(&self) -> bool {
        self.linux
    }

    fn has_root_privileges(&self) -> bool {
        self.root
    }
}

#[cfg(unix)]
mod uname {
    fn field_to_string(field: &[libc::c_char]) -> String {
        #[allow(clippy::cast_sign_loss)]
        let bytes: Vec<u8> = field
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8)
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[expect(unsafe_code, reason = "Required for uname(2)")]
    fn utsname() -> Option<libc::utsname> {
        // SAFETY: utsname is a plain C struct of byte arrays; all-zero is a
        // valid value and uname only writes within its bounds.
        unsafe {
            let mut buf: libc::utsname = std::mem::zeroed();
            if libc::uname(&mut buf) == 0 {
                Some(buf)
            } else {
                None
            }
        }
    }

    pub fn machine() -> Option<String> {
        utsname().map(|buf| field_to_string(&buf.machine))
    }

    pub fn sysname() -> Option<String> {
        utsname().map(|buf| field_to_string(&buf.sysname))
    }

    #[expect(unsafe_code, reason = "Required for geteuid(2)")]
    pub fn effective_uid_is_root() -> bool {
        // SAFETY: geteuid has no preconditions and cannot fail.
        unsafe {
            libc::geteuid() == 0
        }
    }
}

#[cfg(not(unix))]
mod uname {
    pub fn machine() -> Option<String> {
        None
    }

    pub fn sysname() -> Option<String> {
        None
    }

    pub fn effective_uid_is_root() -> bool {
        false
    }
}
