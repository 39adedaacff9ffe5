//! Property map and resolved-property types

use std::collections::HashMap;

/// A collection of properties keyed by name.
///
/// An empty string is a valid, present value; absence is expressed only by
/// a missing key.
pub type PropertyMap = HashMap<String, String>;

/// A resolved property with its value and the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProperty {
    /// The property key that was looked up.
    pub key: String,
    /// The resolved value.
    pub value: String,
    /// The name of the source that satisfied the lookup.
    pub source: String,
}

impl ResolvedProperty {
    /// Creates a new resolved property.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolved_property_new() {
        let resolved = ResolvedProperty::new("server.port", "8080", "defaults");
        assert_eq!(resolved.key, "server.port");
        assert_eq!(resolved.value, "8080");
        assert_eq!(resolved.source, "defaults");
    }

    #[test]
    fn test_empty_value_is_present() {
        let mut map = PropertyMap::new();
        map.insert("blank".to_string(), String::new());

        assert_eq!(map.get("blank").map(String::as_str), Some(""));
        assert_eq!(map.get("missing"), None);
    }
}
