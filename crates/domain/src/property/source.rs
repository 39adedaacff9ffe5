//! Named property sources
//!
//! A source pairs a name with a lookup strategy. Map sources answer by
//! direct key lookup; environment sources answer over a snapshot of
//! environment variables with relaxed key matching.

use super::map::PropertyMap;

/// How a source answers lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceKind {
    /// Direct lookup in the backing map.
    Map(PropertyMap),
    /// Lookup over an environment-variable snapshot with relaxed key
    /// matching (dots and hyphens also tried as underscores, plus
    /// upper-case forms).
    Environment(PropertyMap),
}

/// A named provider of key-to-value lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySource {
    name: String,
    kind: SourceKind,
}

impl PropertySource {
    /// Creates a map-backed source.
    #[must_use]
    pub fn with_map(name: impl Into<String>, entries: PropertyMap) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Map(entries),
        }
    }

    /// Creates an environment-snapshot source with relaxed key matching.
    #[must_use]
    pub fn with_environment(name: impl Into<String>, snapshot: PropertyMap) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Environment(snapshot),
        }
    }

    /// Returns the source name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value for `key`, if this source contains it.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        match &self.kind {
            SourceKind::Map(entries) => entries.get(key).map(String::as_str),
            SourceKind::Environment(snapshot) => {
                relaxed_names(key).find_map(|candidate| snapshot.get(&candidate).map(String::as_str))
            }
        }
    }

    /// Returns true if this source contains `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the number of entries backing this source.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.kind {
            SourceKind::Map(entries) | SourceKind::Environment(entries) => entries.len(),
        }
    }

    /// Returns true if this source has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all keys present in this source, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let entries = match &self.kind {
            SourceKind::Map(entries) | SourceKind::Environment(entries) => entries,
        };
        let mut keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Candidate names tried for a key against an environment snapshot:
/// the key itself, dots as underscores, hyphens as underscores, both,
/// then the upper-case form of each.
fn relaxed_names(key: &str) -> impl Iterator<Item = String> + '_ {
    let dotted = key.replace('.', "_");
    let dashed = key.replace('-', "_");
    let both = dotted.replace('-', "_");

    let mut candidates = vec![key.to_string(), dotted, dashed, both];
    candidates.dedup();

    let upper: Vec<String> = candidates.iter().map(|c| c.to_uppercase()).collect();
    candidates.into_iter().chain(upper)
}
