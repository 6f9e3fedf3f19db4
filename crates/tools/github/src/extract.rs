//! In-memory archive extraction.
//!
//! Release assets are small enough to hold entirely in memory, so every
//! entry is materialised before anything touches the filesystem.

use std::io::{Cursor, Read};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use tar::{Archive, EntryType};
use tracing::trace;

use crate::archive::ArchiveKind;
use crate::{Error, Result};

/// Name given to the payload of a bare `gz` or `bz2` stream.
pub const SINGLE_STREAM_ENTRY: &str = "file";

/// A file or directory read out of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Archive-relative path, `/`-separated.
    pub name: String,
    /// File contents; empty for directories.
    pub content: Vec<u8>,
    /// Whether this entry is a directory.
    pub is_dir: bool,
}

impl ArchiveEntry {
    /// A regular file entry.
    #[must_use]
    pub fn file(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            is_dir: false,
        }
    }

    /// A directory entry.
    #[must_use]
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Vec::new(),
            is_dir: true,
        }
    }
}

/// Extract every entry of `data`, in archive order.
pub fn extract(kind: ArchiveKind, data: &[u8]) -> Result<Vec<ArchiveEntry>> {
    match kind {
        ArchiveKind::Tar => read_tar(kind, Cursor::new(data)),
        ArchiveKind::TarGz => read_tar(kind, MultiGzDecoder::new(Cursor::new(data))),
        ArchiveKind::TarBz2 => read_tar(kind, MultiBzDecoder::new(Cursor::new(data))),
        ArchiveKind::Zip => read_zip(data),
        ArchiveKind::Gz => read_single(kind, MultiGzDecoder::new(Cursor::new(data))),
        ArchiveKind::Bz2 => read_single(kind, MultiBzDecoder::new(Cursor::new(data))),
        ArchiveKind::Unknown => Err(Error::UnsupportedFormat(kind.to_string())),
    }
}

/// Extract using a kind name such as `"tar.gz"` or `"tgz"`.
pub fn extract_named(kind: &str, data: &[u8]) -> Result<Vec<ArchiveEntry>> {
    extract(kind.parse()?, data)
}

fn read_tar<R: Read>(kind: ArchiveKind, reader: R) -> Result<Vec<ArchiveEntry>> {
    let fail = |message: String| Error::extraction(kind.as_str(), message);

    let mut archive = Archive::new(reader);
    let mut entries = Vec::new();

    for entry in archive
        .entries()
        .map_err(|e| fail(format!("Failed to read tar: {e}")))?
    {
        let mut entry = entry.map_err(|e| fail(format!("Failed to read tar header: {e}")))?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let entry_type = entry.header().entry_type();

        match entry_type {
            EntryType::Directory => {
                trace!(%name, "tar directory");
                entries.push(ArchiveEntry::dir(name));
            }
            // pax global headers carry metadata, not files
            EntryType::XGlobalHeader => {}
            _ => {
                let expected = entry.size();
                let mut content = Vec::new();
                entry
                    .read_to_end(&mut content)
                    .map_err(|e| fail(format!("Failed to read tar file {name}: {e}")))?;
                if content.len() as u64 != expected {
                    return Err(fail(format!(
                        "Truncated tar file {name}: expected {expected} bytes, got {}",
                        content.len()
                    )));
                }
                trace!(%name, bytes = content.len(), "tar file");
                entries.push(ArchiveEntry::file(name, content));
            }
        }
    }

    Ok(entries)
}

fn read_zip(data: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let fail = |message: String| Error::extraction(ArchiveKind::Zip.as_str(), message);

    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| fail(format!("Failed to open zip: {e}")))?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| fail(format!("Failed to read zip entry {i}: {e}")))?;
        let name = file.name().to_string();

        if file.is_dir() {
            trace!(%name, "zip directory");
            entries.push(ArchiveEntry::dir(name));
            continue;
        }

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| fail(format!("Failed to read zip file {name}: {e}")))?;
        trace!(%name, bytes = content.len(), "zip file");
        entries.push(ArchiveEntry::file(name, content));
    }

    Ok(entries)
}

fn read_single<R: Read>(kind: ArchiveKind, mut reader: R) -> Result<Vec<ArchiveEntry>> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .map_err(|e| Error::extraction(kind.as_str(), format!("Failed to decompress: {e}")))?;
    Ok(vec![ArchiveEntry::file(SINGLE_STREAM_ENTRY, content)])
}
