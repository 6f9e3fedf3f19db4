//! GitHub API client configuration.

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variables consulted for an API token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Where to reach the GitHub API and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// Base URL of the REST API, without trailing slash.
    pub api_base: String,
    /// Token used to raise rate limits; requests stay anonymous without it.
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
        }
    }
}

impl GitHubConfig {
    /// Default endpoint with a token from `GITHUB_TOKEN` or `GH_TOKEN`.
    ///
    /// Empty variables count as unset.
    #[must_use]
    pub fn from_env() -> Self {
        let token = TOKEN_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|value| !value.is_empty()));
        Self {
            token,
            ..Self::default()
        }
    }

    /// Use a different API endpoint.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Use an explicit token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// URL of the release listing for `repo`.
    #[must_use]
    pub fn releases_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/releases", self.api_base, repo)
    }
}
