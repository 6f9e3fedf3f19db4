//! End-to-end installation over an in-memory transport.

mod common;

use std::sync::Arc;

use common::{MockTransport, gzip, tar, zip};
use nanolayer_system::{Architecture, Distribution, StaticHost};
use nanolayer_tools_github::http::Method;
use nanolayer_tools_github::{
    ArchitectureReplacements, ArchiveKind, DestinationMap, Error, GitHubClient, GitHubConfig,
    GitHubInstaller, InstallRequest,
};
use tempfile::TempDir;

const RELEASES: &str = "https://api.github.com/repos/dev/tool/releases";
const LISTING: &str = r#"[
    {"tag_name": "v2.0.0-rc.1", "prerelease": true},
    {"tag_name": "v1.4.2", "prerelease": false},
    {"tag_name": "v1.4.1", "prerelease": false}
]"#;

fn installer(transport: MockTransport) -> (GitHubInstaller, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let client = GitHubClient::new(transport.clone(), GitHubConfig::default());
    let host = Arc::new(StaticHost::new(Architecture::X86_64, Distribution::Debian));
    (GitHubInstaller::new(client, host), transport)
}

fn request(destinations: DestinationMap) -> InstallRequest {
    let mut request = InstallRequest::for_repo("dev/tool").unwrap();
    request.architecture_replacements = ArchitectureReplacements::new().with("x86_64", "amd64");
    request.destinations = destinations;
    request
}

/// Test the default template with `latest` and a renamed architecture
#[tokio::test]
async fn test_install_latest_tar_gz() {
    let url = "https://github.com/dev/tool/releases/download/v1.4.2/tool_1.4.2_Linux_amd64.tar.gz";
    let asset = gzip(&tar(&[
        ("tool_1.4.2_Linux_amd64/", b"", true),
        ("tool_1.4.2_Linux_amd64/tool", b"payload", false),
        ("tool_1.4.2_Linux_amd64/LICENSE", b"MIT", false),
    ]));
    let (installer, transport) = installer(
        MockTransport::new()
            .route(Method::Get, RELEASES, 200, LISTING)
            .route(Method::Head, url, 200, "")
            .route(Method::Get, url, 200, asset),
    );

    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("out").join("tool");
    let report = installer
        .install_from_release(&request(DestinationMap::new().with("*/tool", &dest).unwrap()))
        .await
        .unwrap();

    assert_eq!(report.asset_url, url);
    assert_eq!(report.kind, ArchiveKind::TarGz);
    assert_eq!(report.entries, 3);
    assert_eq!(report.installed.len(), 1);
    assert_eq!(report.installed[0].entry, "tool_1.4.2_Linux_amd64/tool");
    assert_eq!(report.installed[0].destination, dest);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "payload");

    let calls: Vec<_> = transport
        .requests()
        .iter()
        .map(|r| (r.method, r.url.clone()))
        .collect();
    assert_eq!(
        calls,
        vec![
            (Method::Get, RELEASES.to_string()),
            (Method::Head, url.to_string()),
            (Method::Get, url.to_string()),
        ]
    );
}

/// Test a pinned version and custom template skip the release listing
#[tokio::test]
async fn test_install_pinned_zip() {
    let url = "https://dl.example.com/tool/1.0.0/tool-amd64.zip";
    let asset = zip(&[("bin/", b"", true), ("bin/tool", b"zipped", false)]);
    let (installer, transport) = installer(
        MockTransport::new()
            .route(Method::Head, url, 200, "")
            .route(Method::Get, url, 200, asset),
    );

    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("tool");
    let mut request = request(DestinationMap::new().with("bin/tool", &dest).unwrap());
    request.version = "1.0.0".to_string();
    request.url_template =
        "https://dl.example.com/${AssetName}/${Version}/${AssetName}-${Architecture}.zip".into();

    let report = installer.install_from_release(&request).await.unwrap();

    assert_eq!(report.kind, ArchiveKind::Zip);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "zipped");
    assert!(transport.requests().iter().all(|r| r.url != RELEASES));
}

/// Test a failed probe stops the run before any download
#[tokio::test]
async fn test_unreachable_asset_is_not_downloaded() {
    let url = "https://github.com/dev/tool/releases/download/v1.4.2/tool_1.4.2_Linux_amd64.tar.gz";
    let (installer, transport) = installer(
        MockTransport::new()
            .route(Method::Get, RELEASES, 200, LISTING)
            .route(Method::Head, url, 404, "")
            .route(Method::Get, url, 200, "never fetched"),
    );

    let temp = TempDir::new().unwrap();
    let err = installer
        .install_from_release(&request(
            DestinationMap::new()
                .with("*/tool", temp.path().join("tool"))
                .unwrap(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnreachableAsset { url: ref u, .. } if u == url));
    let gets = transport
        .requests()
        .iter()
        .filter(|r| r.method == Method::Get && r.url == url)
        .count();
    assert_eq!(gets, 0);
    assert!(!temp.path().join("tool").exists());
}

/// Test an upstream failure while resolving `latest`
#[tokio::test]
async fn test_upstream_error_on_listing() {
    let (installer, _) = installer(MockTransport::new().route(
        Method::Get,
        RELEASES,
        500,
        "internal error",
    ));

    let err = installer
        .install_from_release(&request(DestinationMap::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream { status: 500, .. }));
}

/// Test a listing with only pre-releases has no `latest`
#[tokio::test]
async fn test_only_pre_releases_is_not_found() {
    let (installer, _) = installer(MockTransport::new().route(
        Method::Get,
        RELEASES,
        200,
        r#"[{"tag_name": "v2.0.0-rc.1", "prerelease": true}]"#,
    ));

    let err = installer
        .install_from_release(&request(DestinationMap::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(ref repo) if repo == "dev/tool"));
}

/// Test an archive with no matching entry installs nothing but succeeds
#[tokio::test]
async fn test_no_matching_entry_succeeds() {
    let url = "https://github.com/dev/tool/releases/download/v1.4.2/tool_1.4.2_Linux_amd64.tar.gz";
    let asset = gzip(&tar(&[("other/binary", b"x", false)]));
    let (installer, _) = installer(
        MockTransport::new()
            .route(Method::Get, RELEASES, 200, LISTING)
            .route(Method::Head, url, 200, "")
            .route(Method::Get, url, 200, asset),
    );

    let temp = TempDir::new().unwrap();
    let report = installer
        .install_from_release(&request(
            DestinationMap::new()
                .with("*/tool", temp.path().join("tool"))
                .unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(report.entries, 1);
    assert!(report.installed.is_empty());
    assert!(!temp.path().join("tool").exists());
}

/// Test a download that is not an archive fails extraction
#[tokio::test]
async fn test_corrupt_asset_fails_extraction() {
    let url = "https://github.com/dev/tool/releases/download/v1.4.2/tool_1.4.2_Linux_amd64.tar.gz";
    let (installer, _) = installer(
        MockTransport::new()
            .route(Method::Get, RELEASES, 200, LISTING)
            .route(Method::Head, url, 200, "")
            .route(Method::Get, url, 200, "<html>rate limited</html>"),
    );

    let err = installer
        .install_from_release(&request(DestinationMap::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Extraction { .. }));
}
