//! `${Key}` placeholder substitution for asset URLs.

/// Placeholder key for the repository (`owner/name`).
pub const KEY_REPO: &str = "Repo";
/// Placeholder key for the resolved version.
pub const KEY_VERSION: &str = "Version";
/// Placeholder key for the (normalised) architecture.
pub const KEY_ARCHITECTURE: &str = "Architecture";
/// Placeholder key for the asset name.
pub const KEY_ASSET_NAME: &str = "AssetName";

/// Ordered placeholder values used to render one URL template.
///
/// Keys are unique. Substitution happens in insertion order, so rendering is
/// deterministic even when one value itself contains a `${...}` token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    entries: Vec<(String, String)>,
}

impl TemplateContext {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The four keys every installer provides.
    #[must_use]
    pub fn standard(repo: &str, version: &str, architecture: &str, asset_name: &str) -> Self {
        Self::new()
            .with(KEY_REPO, repo)
            .with(KEY_VERSION, version)
            .with(KEY_ARCHITECTURE, architecture)
            .with(KEY_ASSET_NAME, asset_name)
    }

    /// Set `key`, replacing an existing value in place or appending.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every `${Key}` token for every key. Unknown tokens stay as they are.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        self.entries
            .iter()
            .fold(template.to_string(), |rendered, (key, value)| {
                rendered.replace(&format!("${{{key}}}"), value)
            })
    }
}
