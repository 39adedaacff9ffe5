//! Placeholder lookup port
//!
//! The single narrow capability the engine resolves keys through. `None`
//! means the key is absent; `Some(String::new())` means found-empty, a
//! valid value that substitutes as the empty string.

use lacuna_domain::{PropertyMap, PropertySources};

/// Port for resolving a placeholder key to an optional replacement value.
pub trait PlaceholderLookup {
    /// Returns the replacement value for `key`, or `None` if no
    /// replacement is to be made.
    fn lookup(&self, key: &str) -> Option<String>;
}

impl PlaceholderLookup for PropertyMap {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl PlaceholderLookup for PropertySources {
    fn lookup(&self, key: &str) -> Option<String> {
        PropertySources::lookup(self, key)
    }
}

/// Adapts a closure into a [`PlaceholderLookup`].
#[derive(Debug, Clone)]
pub struct FnLookup<F>(F);

impl<F> FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Wraps a lookup function.
    pub const fn new(lookup: F) -> Self {
        Self(lookup)
    }
}

impl<F> PlaceholderLookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lacuna_domain::PropertySource;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fn_lookup() {
        let lookup = FnLookup::new(|key: &str| (key == "a").then(|| "1".to_string()));
        assert_eq!(lookup.lookup("a"), Some("1".to_string()));
        assert_eq!(lookup.lookup("b"), None);
    }

    #[test]
    fn test_property_map_lookup() {
        let mut map = PropertyMap::new();
        map.insert("host".to_string(), "localhost".to_string());
        map.insert("blank".to_string(), String::new());

        assert_eq!(PlaceholderLookup::lookup(&map, "host"), Some("localhost".to_string()));
        assert_eq!(PlaceholderLookup::lookup(&map, "blank"), Some(String::new()));
        assert_eq!(PlaceholderLookup::lookup(&map, "missing"), None);
    }

    #[test]
    fn test_property_sources_lookup() {
        let mut entries = PropertyMap::new();
        entries.insert("host".to_string(), "localhost".to_string());

        let mut sources = PropertySources::new();
        sources.add_last(PropertySource::with_map("app", entries));

        assert_eq!(
            PlaceholderLookup::lookup(&sources, "host"),
            Some("localhost".to_string())
        );
    }
}
