//! CPU architecture names as reported by `uname -m`.

use std::fmt;

/// CPU architecture of the host.
///
/// Vendor spellings are folded into one variant (`aarch64` and `arm64` are
/// both [`Architecture::Arm64`]). The [`Display`](fmt::Display) form is the
/// name installers substitute into download URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    /// 64-bit ARM.
    Arm64,
    /// 64-bit x86.
    X86_64,
    /// ARMv5.
    Armv5,
    /// ARMv6.
    Armv6,
    /// ARMv7.
    Armv7,
    /// ARM hard-float.
    Armhf,
    /// Generic 32-bit ARM.
    Arm32,
    /// 32-bit x86 (i386).
    I386,
    /// 32-bit x86 (i686).
    I686,
    /// 64-bit PowerPC.
    Ppc64,
    /// IBM Z.
    S390,
    /// Anything not listed above.
    Other,
}

impl Architecture {
    /// Map a raw machine string to an architecture.
    #[must_use]
    pub fn from_machine(machine: &str) -> Self {
        match machine.trim() {
            "arm64" | "aarch64" => Self::Arm64,
            "x86_64" | "amd64" => Self::X86_64,
            "armv5" => Self::Armv5,
            "armv6" => Self::Armv6,
            "armv7" | "armv7l" => Self::Armv7,
            "armhf" => Self::Armhf,
            "arm32" => Self::Arm32,
            "i386" => Self::I386,
            "i686" => Self::I686,
            "ppc64" | "ppc64le" => Self::Ppc64,
            "s390" | "s390x" => Self::S390,
            _ => Self::Other,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::X86_64 => "x86_64",
            Self::Armv5 => "armv5",
            Self::Armv6 => "armv6",
            Self::Armv7 => "armv7",
            Self::Armhf => "armhf",
            Self::Arm32 => "arm32",
            Self::I386 => "i386",
            Self::I686 => "i686",
            Self::Ppc64 => "ppc64",
            Self::S390 => "s390",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
