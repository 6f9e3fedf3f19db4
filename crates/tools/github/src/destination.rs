//! Glob-to-path mapping for archive entries.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::{Error, Result};

/// Shell `fnmatch` semantics with pathname matching: wildcards and classes
/// never cross a `/`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One compiled glob and where matching entries are written.
#[derive(Debug, Clone)]
pub struct Destination {
    raw: String,
    pattern: Pattern,
    path: PathBuf,
}

impl Destination {
    /// The glob as written.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.raw
    }

    /// Filesystem destination.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `entry_name` matches this glob.
    #[must_use]
    pub fn matches(&self, entry_name: &str) -> bool {
        self.pattern.matches_with(entry_name, MATCH_OPTIONS)
    }
}

/// Where archive entries get installed.
///
/// Patterns keep insertion order; re-adding a pattern replaces its
/// destination. When two patterns target the same path, the later pattern
/// is written last.
#[derive(Debug, Clone, Default)]
pub struct DestinationMap {
    entries: Vec<Destination>,
}

impl DestinationMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and map it to `path`.
    pub fn insert(&mut self, pattern: &str, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if let Some(existing) = self.entries.iter_mut().find(|d| d.pattern() == pattern) {
            existing.path = path;
            return Ok(());
        }

        let compiled = Pattern::new(&fnmatch_to_glob(pattern))
            .map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;
        self.entries.push(Destination {
            raw: pattern.to_string(),
            pattern: compiled,
            path,
        });
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, pattern: &str, path: impl Into<PathBuf>) -> Result<Self> {
        self.insert(pattern, path)?;
        Ok(self)
    }

    /// All mappings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.entries.iter()
    }

    /// Destinations whose glob matches `entry_name`.
    pub fn matching<'a>(&'a self, entry_name: &'a str) -> impl Iterator<Item = &'a Path> + 'a {
        self.entries
            .iter()
            .filter(move |d| d.matches(entry_name))
            .map(|d| d.path())
    }

    /// Number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rewrite an `fnmatch` pattern into `glob` crate syntax.
///
/// Runs of `*` collapse to one, so `**` never becomes a recursive wildcard.
/// `[^...]` negates like `[!...]`, and a backslash escape becomes a
/// one-character class.
fn fnmatch_to_glob(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        if in_class {
            out.push(c);
            if c == ']' {
                in_class = false;
            }
            continue;
        }

        match c {
            '\\' => match chars.next() {
                Some(escaped) => {
                    out.push('[');
                    out.push(escaped);
                    out.push(']');
                }
                None => out.push('\\'),
            },
            '*' => {
                out.push('*');
                while chars.next_if_eq(&'*').is_some() {}
            }
            '[' => {
                in_class = true;
                out.push('[');
                if chars.next_if(|&n| n == '^' || n == '!').is_some() {
                    out.push('!');
                }
                // a leading `]` is a member, not the end of the class
                if chars.next_if_eq(&']').is_some() {
                    out.push(']');
                }
            }
            _ => out.push(c),
        }
    }

    out
}
