//! Release asset installation.
//!
//! The pipeline runs strictly in order: normalise the host architecture,
//! resolve and probe the asset URL, download the whole asset, classify and
//! extract it in memory, then copy matching entries to their destinations.
//! The first failure aborts the run. Files already written stay in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nanolayer_system::HostSystem;
use tracing::{debug, info, warn};

use crate::archive::ArchiveKind;
use crate::client::GitHubClient;
use crate::destination::DestinationMap;
use crate::extract::{ArchiveEntry, extract};
use crate::normalize::ArchitectureReplacements;
use crate::release::LATEST;
use crate::template::TemplateContext;
use crate::{Error, Result};

/// URL template used when the caller does not supply one.
pub const DEFAULT_URL_TEMPLATE: &str = "https://github.com/${Repo}/releases/download/v${Version}/${AssetName}_${Version}_Linux_${Architecture}.tar.gz";

/// Directory binaries are installed into by default.
pub const DEFAULT_BIN_DIR: &str = "/usr/local/bin";

/// Everything needed to install one release asset.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Repository as `owner/name`.
    pub repo: String,
    /// Version to install, or `latest`.
    pub version: String,
    /// Value of the `AssetName` placeholder.
    pub asset_name: String,
    /// URL template with `${Key}` placeholders.
    pub url_template: String,
    /// Host architecture overrides.
    pub architecture_replacements: ArchitectureReplacements,
    /// Entry globs and their destinations.
    pub destinations: DestinationMap,
}

impl InstallRequest {
    /// A request with the stock defaults for `repo`.
    ///
    /// The asset name is the repository name, the version is `latest`, and
    /// `*/<name>` is installed to `/usr/local/bin/<name>`.
    pub fn for_repo(repo: &str) -> Result<Self> {
        let asset_name = repo_name(repo)?.to_string();
        let destinations = default_destinations(&asset_name)?;
        Ok(Self {
            repo: repo.to_string(),
            version: LATEST.to_string(),
            asset_name,
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            architecture_replacements: ArchitectureReplacements::new(),
            destinations,
        })
    }
}

/// The name part of an `owner/name` repository.
pub fn repo_name(repo: &str) -> Result<&str> {
    match repo.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(*name),
        _ => Err(Error::InvalidRepository(repo.to_string())),
    }
}

/// `*/<asset>` to `/usr/local/bin/<asset>`.
pub fn default_destinations(asset_name: &str) -> Result<DestinationMap> {
    DestinationMap::new().with(
        &format!("*/{asset_name}"),
        Path::new(DEFAULT_BIN_DIR).join(asset_name),
    )
}

/// One entry copied to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledFile {
    /// Archive entry name.
    pub entry: String,
    /// Where it was written.
    pub destination: PathBuf,
}

/// Outcome of a successful installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Probed URL the asset was downloaded from.
    pub asset_url: String,
    /// Detected archive kind.
    pub kind: ArchiveKind,
    /// Number of entries in the archive, directories included.
    pub entries: usize,
    /// Files written, in write order.
    pub installed: Vec<InstalledFile>,
}

/// Installs release assets onto the local filesystem.
#[derive(Clone)]
pub struct GitHubInstaller {
    client: GitHubClient,
    host: Arc<dyn HostSystem>,
}

impl GitHubInstaller {
    /// Create an installer.
    #[must_use]
    pub fn new(client: GitHubClient, host: Arc<dyn HostSystem>) -> Self {
        Self { client, host }
    }

    /// Resolve, download, extract and install the asset described by `request`.
    ///
    /// Succeeds even when no entry matched any destination.
    pub async fn install_from_release(&self, request: &InstallRequest) -> Result<InstallReport> {
        let host_architecture = self.host.architecture().to_string();
        info!(architecture = %host_architecture, "Detected architecture");
        let architecture = request
            .architecture_replacements
            .normalize(&host_architecture);
        if architecture != host_architecture {
            info!(%architecture, "Using architecture");
        }

        let context = TemplateContext::standard(
            &request.repo,
            &request.version,
            architecture,
            &request.asset_name,
        );
        let asset_url = self
            .client
            .resolve_asset_url(
                &request.repo,
                &request.version,
                &request.url_template,
                &context,
            )
            .await?;
        info!(url = %asset_url, "Using asset URL");

        let data = self.client.download_asset(&asset_url).await?;

        let kind = ArchiveKind::detect(&asset_url, &data);
        info!(%kind, bytes = data.len(), "Detected archive type");

        let entries = extract(kind, &data)?;
        let installed = install_entries(&entries, &request.destinations)?;

        if installed.is_empty() {
            let patterns: Vec<_> = request.destinations.iter().map(|d| d.pattern()).collect();
            warn!(?patterns, entries = entries.len(), "No archive entry matched any file destination");
        }

        Ok(InstallReport {
            asset_url,
            kind,
            entries: entries.len(),
            installed,
        })
    }
}

/// Write every file entry matching a destination glob.
///
/// Directory entries are only listed; destination directories are created
/// as needed for the files written into them.
pub fn install_entries(
    entries: &[ArchiveEntry],
    destinations: &DestinationMap,
) -> Result<Vec<InstalledFile>> {
    let mut installed = Vec::new();

    for entry in entries {
        if entry.is_dir {
            debug!(name = %entry.name, "Archive directory");
            continue;
        }
        debug!(name = %entry.name, bytes = entry.content.len(), "Archive file");

        for destination in destinations.matching(&entry.name) {
            write_executable(destination, &entry.content)?;
            info!(entry = %entry.name, destination = %destination.display(), "Installed file");
            installed.push(InstalledFile {
                entry: entry.name.clone(),
                destination: destination.to_path_buf(),
            });
        }
    }

    Ok(installed)
}

/// Write `content` to `path` with mode 0755, creating parents with 0755.
fn write_executable(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }

    std::fs::write(path, content).map_err(|e| Error::filesystem("write", path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .map_err(|e| Error::filesystem("set permissions on", path, e))?;
    }

    Ok(())
}

fn create_dir_all(dir: &Path) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(dir)
        .map_err(|e| Error::filesystem("create directory", dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_repo_defaults() {
        let request = InstallRequest::for_repo("charmbracelet/gum").unwrap();
        assert_eq!(request.asset_name, "gum");
        assert_eq!(request.version, "latest");
        assert_eq!(request.url_template, DEFAULT_URL_TEMPLATE);
        assert!(request.architecture_replacements.is_empty());

        let destinations: Vec<_> = request
            .destinations
            .iter()
            .map(|d| (d.pattern().to_string(), d.path().to_path_buf()))
            .collect();
        assert_eq!(
            destinations,
            vec![("*/gum".to_string(), PathBuf::from("/usr/local/bin/gum"))]
        );
    }

    #[test]
    fn test_repo_name_validation() {
        assert_eq!(repo_name("a/b").unwrap(), "b");
        for bad in ["gum", "a/b/c", "/b", "a/", ""] {
            assert!(
                matches!(repo_name(bad), Err(Error::InvalidRepository(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_install_entries_writes_match() {
        let temp = tempfile::TempDir::new().unwrap();
        let dest = temp.path().join("out").join("tool");
        let destinations = DestinationMap::new().with("bin/tool", &dest).unwrap();
        let entries = vec![
            ArchiveEntry::dir("bin/"),
            ArchiveEntry::file("bin/tool", "payload"),
            ArchiveEntry::file("README.md", "docs"),
        ];

        let installed = install_entries(&entries, &destinations).unwrap();

        assert_eq!(
            installed,
            vec![InstalledFile {
                entry: "bin/tool".into(),
                destination: dest.clone()
            }]
        );
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "payload");
        assert!(!temp.path().join("out").join("bin").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_entries_sets_modes() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let dest = temp.path().join("nested").join("tool");
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, "old").unwrap();
        std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o600)).unwrap();

        let destinations = DestinationMap::new().with("tool", &dest).unwrap();
        install_entries(&[ArchiveEntry::file("tool", "new")], &destinations).unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "new");
        let mode = std::fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_install_entries_fans_out() {
        let temp = tempfile::TempDir::new().unwrap();
        let a = temp.path().join("a").join("tool");
        let b = temp.path().join("b").join("c").join("tool");
        let destinations = DestinationMap::new()
            .with("*/tool", &a)
            .unwrap()
            .with("dist/*", &b)
            .unwrap();

        let installed =
            install_entries(&[ArchiveEntry::file("dist/tool", "x")], &destinations).unwrap();

        assert_eq!(installed.len(), 2);
        assert_eq!(std::fs::read(&a).unwrap(), b"x");
        assert_eq!(std::fs::read(&b).unwrap(), b"x");
    }

    #[test]
    fn test_install_entries_no_match_is_ok() {
        let temp = tempfile::TempDir::new().unwrap();
        let destinations = DestinationMap::new()
            .with("*/missing", temp.path().join("missing"))
            .unwrap();

        let installed =
            install_entries(&[ArchiveEntry::file("tool", "x")], &destinations).unwrap();

        assert!(installed.is_empty());
        assert!(!temp.path().join("missing").exists());
    }

    #[test]
    fn test_install_entries_reports_path_on_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        // a regular file where a directory is needed
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let dest = blocker.join("tool");
        let destinations = DestinationMap::new().with("tool", &dest).unwrap();

        let err = install_entries(&[ArchiveEntry::file("tool", "x")], &destinations).unwrap_err();

        assert!(matches!(err, Error::Filesystem { ref path, .. } if *path == blocker));
    }
}
