//! Archive kind detection.
//!
//! Classification looks at the download URL first and only falls back to
//! sniffing magic bytes when the URL carries no recognised suffix.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Offset of the POSIX `ustar` magic inside a tar header.
const USTAR_MAGIC_OFFSET: usize = 257;
const USTAR_MAGIC: &[u8] = b"ustar";

/// Container or compression format of a downloaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// Uncompressed tar.
    Tar,
    /// Gzip-compressed tar.
    TarGz,
    /// Bzip2-compressed tar.
    TarBz2,
    /// Zip archive.
    Zip,
    /// Single gzip stream.
    Gz,
    /// Single bzip2 stream.
    Bz2,
    /// Not recognised.
    Unknown,
}

/// Filename suffixes in match priority order.
const SUFFIXES: &[(&str, ArchiveKind)] = &[
    (".tar.gz", ArchiveKind::TarGz),
    (".tgz", ArchiveKind::TarGz),
    (".tar.bz2", ArchiveKind::TarBz2),
    (".tbz2", ArchiveKind::TarBz2),
    (".tbz", ArchiveKind::TarBz2),
    (".tar", ArchiveKind::Tar),
    (".zip", ArchiveKind::Zip),
    (".gz", ArchiveKind::Gz),
    (".bz2", ArchiveKind::Bz2),
];

impl ArchiveKind {
    /// Classify an asset from its URL and content.
    ///
    /// A recognised URL suffix always wins over the content. `Unknown` is a
    /// valid answer; deciding whether it is fatal is up to the caller.
    #[must_use]
    pub fn detect(url: &str, data: &[u8]) -> Self {
        Self::from_suffix(url).unwrap_or_else(|| Self::from_magic(data))
    }

    /// Classify by case-insensitive filename suffix.
    #[must_use]
    pub fn from_suffix(url: &str) -> Option<Self> {
        let lower = url.to_ascii_lowercase();
        SUFFIXES
            .iter()
            .find(|(suffix, _)| lower.ends_with(suffix))
            .map(|&(_, kind)| kind)
    }

    /// Classify by magic bytes.
    ///
    /// Compressed streams are assumed to wrap a tar, the common case for
    /// release assets.
    #[must_use]
    pub fn from_magic(data: &[u8]) -> Self {
        if data.starts_with(b"BZh") {
            Self::TarBz2
        } else if data.starts_with(b"PK") {
            Self::Zip
        } else if data.starts_with(&[0x1f, 0x8b]) {
            Self::TarGz
        } else if data
            .get(USTAR_MAGIC_OFFSET..USTAR_MAGIC_OFFSET + USTAR_MAGIC.len())
            .is_some_and(|magic| magic == USTAR_MAGIC)
        {
            Self::Tar
        } else {
            Self::Unknown
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
            Self::Zip => "zip",
            Self::Gz => "gz",
            Self::Bz2 => "bz2",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveKind {
    type Err = Error;

    /// Parse a kind name. `unknown` parses, since it is a detection result;
    /// any name outside the known set is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tar" => Ok(Self::Tar),
            "tar.gz" | "tgz" => Ok(Self::TarGz),
            "tar.bz2" | "tbz2" | "tbz" => Ok(Self::TarBz2),
            "zip" => Ok(Self::Zip),
            "gz" => Ok(Self::Gz),
            "bz2" => Ok(Self::Bz2),
            "unknown" => Ok(Self::Unknown),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}
