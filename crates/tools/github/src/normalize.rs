//! Host architecture to vendor naming.

use std::collections::BTreeMap;

/// Per-project overrides for the host architecture name.
///
/// Release authors spell architectures differently (`amd64`, `x86_64`,
/// `64bit`, ...). Entries map the host's name to the vendor's; hosts without
/// an entry pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchitectureReplacements {
    map: BTreeMap<String, String>,
}

impl ArchitectureReplacements {
    /// No replacements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map host name `from` to `to`.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.map.insert(from.into(), to.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.insert(from, to);
        self
    }

    /// Whether no replacements are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Replacement for `host_architecture`, or the host name itself.
    #[must_use]
    pub fn normalize<'a>(&'a self, host_architecture: &'a str) -> &'a str {
        self.map
            .get(host_architecture)
            .map_or(host_architecture, String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArchitectureReplacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }
}
