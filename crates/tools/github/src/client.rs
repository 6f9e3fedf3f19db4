//! Release listing, asset URL resolution and asset download.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::config::GitHubConfig;
use crate::http::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::release::{DEFAULT_PAGE_SIZE, LATEST, Release, select_latest};
use crate::template::{KEY_VERSION, TemplateContext};
use crate::{Error, Result};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Talks to the GitHub API and to asset download hosts.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    config: GitHubConfig,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.config.api_base)
            .field("authenticated", &self.config.token.is_some())
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Create a client over an explicit transport.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, config: GitHubConfig) -> Self {
        Self { transport, config }
    }

    /// Create a client using `reqwest` and a token from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            Arc::new(ReqwestTransport::new()?),
            GitHubConfig::from_env(),
        ))
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &GitHubConfig {
        &self.config
    }

    /// List releases of `repo` in upstream order.
    ///
    /// Without `all_pages` the request asks for [`DEFAULT_PAGE_SIZE`]
    /// releases. With it the page size is left to the server; pagination
    /// links are not followed, so only the first page is returned either way.
    pub async fn list_releases(&self, repo: &str, all_pages: bool) -> Result<Vec<Release>> {
        let url = self.config.releases_url(repo);
        let mut request = HttpRequest::get(&url).with_header("Accept", GITHUB_ACCEPT);
        if let Some(token) = &self.config.token {
            request = request.with_header("Authorization", format!("token {token}"));
        }
        if !all_pages {
            request = request.with_query("per_page", DEFAULT_PAGE_SIZE.to_string());
        }

        debug!(%url, all_pages, authenticated = self.config.token.is_some(), "Listing releases");
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(Error::upstream(repo, response.status, response.text()));
        }

        let releases: Vec<Release> = serde_json::from_slice(&response.body)
            .map_err(|e| Error::invalid_response(&url, e.to_string()))?;
        debug!(%repo, count = releases.len(), "Listed releases");
        Ok(releases)
    }

    /// The newest release of `repo` in listing order.
    pub async fn latest_release(&self, repo: &str, include_pre_releases: bool) -> Result<Release> {
        let releases = self.list_releases(repo, false).await?;
        select_latest(&releases, include_pre_releases)
            .cloned()
            .ok_or_else(|| Error::NotFound(repo.to_string()))
    }

    /// Render `url_template` for `version` and confirm the asset exists.
    ///
    /// `latest` is first resolved to the newest stable tag. The resolved
    /// version is added to a copy of `context` under `Version`.
    pub async fn resolve_asset_url(
        &self,
        repo: &str,
        version: &str,
        url_template: &str,
        context: &TemplateContext,
    ) -> Result<String> {
        let version = if version == LATEST {
            let release = self.latest_release(repo, false).await?;
            info!(%repo, version = %release.tag, "Resolved latest release");
            release.tag
        } else {
            version.to_string()
        };

        let context = context.clone().with(KEY_VERSION, version);
        let url = context.render(url_template);
        if url.is_empty() {
            return Err(Error::EmptyTemplate);
        }

        let response = self
            .transport
            .send(HttpRequest::head(&url))
            .await
            .map_err(|e| Error::unreachable_asset(&url, e.to_string()))?;
        if !response.is_success() {
            return Err(Error::unreachable_asset(
                &url,
                format!("HTTP {}", response.status),
            ));
        }

        Ok(url)
    }

    /// Download the full body of `url`.
    pub async fn download_asset(&self, url: &str) -> Result<Bytes> {
        debug!(%url, "Downloading asset");
        let response = self
            .transport
            .send(HttpRequest::get(url))
            .await
            .map_err(|e| Error::download(url, e.to_string()))?;
        if !response.is_success() {
            return Err(Error::download(url, format!("HTTP {}", response.status)));
        }
        debug!(%url, bytes = response.body.len(), "Downloaded asset");
        Ok(response.body)
    }
}
