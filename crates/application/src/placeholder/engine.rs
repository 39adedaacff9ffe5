//! Placeholder resolution engine
//!
//! Substitutes placeholder expressions against a lookup capability.
//! Resolution is recursive: keys may be built from other placeholders and
//! resolved values may themselves contain placeholders. A visited-set
//! scoped to each top-level call detects circular references.

use std::collections::HashSet;

use tracing::trace;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::PlaceholderLookup;

use super::parser::{self, PlaceholderFormat, DEFAULT_VALUE_SEPARATOR};

/// Resolves placeholder expressions in strings.
///
/// The engine is immutable configuration only; each [`resolve`] call
/// allocates its own visited-set, so one engine can serve concurrent
/// callers.
///
/// [`resolve`]: PlaceholderEngine::resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderEngine {
    format: PlaceholderFormat,
    value_separator: Option<String>,
    ignore_unresolvable: bool,
}

impl PlaceholderEngine {
    /// Creates a strict engine with `${name}` delimiters and the `:`
    /// default-value separator. Unresolvable placeholders are errors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            format: PlaceholderFormat::default(),
            value_separator: Some(DEFAULT_VALUE_SEPARATOR.to_string()),
            ignore_unresolvable: false,
        }
    }

    /// Creates a lenient engine: unresolvable placeholders are left in
    /// place rather than reported as errors.
    #[must_use]
    pub fn lenient() -> Self {
        Self::new().with_ignore_unresolvable(true)
    }

    /// Sets the delimiter configuration.
    #[must_use]
    pub fn with_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the separator between a placeholder key and its default value.
    #[must_use]
    pub fn with_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.value_separator = Some(separator.into());
        self
    }

    /// Disables default-value handling entirely.
    #[must_use]
    pub fn without_value_separator(mut self) -> Self {
        self.value_separator = None;
        self
    }

    /// Sets whether unresolvable placeholders are kept in place (`true`)
    /// or reported as errors (`false`).
    #[must_use]
    pub const fn with_ignore_unresolvable(mut self, ignore: bool) -> Self {
        self.ignore_unresolvable = ignore;
        self
    }

    /// Returns the delimiter configuration.
    #[must_use]
    pub const fn format(&self) -> &PlaceholderFormat {
        &self.format
    }

    /// Returns the default-value separator, if configured.
    #[must_use]
    pub fn value_separator(&self) -> Option<&str> {
        self.value_separator.as_deref()
    }

    /// Returns true if unresolvable placeholders are kept in place.
    #[must_use]
    pub const fn ignore_unresolvable(&self) -> bool {
        self.ignore_unresolvable
    }

    /// Resolves every placeholder in `input` via `lookup`.
    ///
    /// Input without placeholders is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::CircularReference`] when a placeholder
    /// refers back to itself on the active resolution path, and
    /// [`ApplicationError::UnresolvablePlaceholder`] when a key has no
    /// value, no default applies, and the engine is strict.
    pub fn resolve(
        &self,
        input: &str,
        lookup: &impl PlaceholderLookup,
    ) -> ApplicationResult<String> {
        self.parse_value(input, lookup, &mut HashSet::new())
    }

    /// Resolves placeholders in `value`, tracking the bodies currently
    /// being expanded in `visited`.
    fn parse_value(
        &self,
        value: &str,
        lookup: &dyn PlaceholderLookup,
        visited: &mut HashSet<String>,
    ) -> ApplicationResult<String> {
        let prefix = self.format.prefix();
        let suffix = self.format.suffix();

        let mut result = String::from(value);
        let mut start = result.find(prefix);

        while let Some(start_index) = start {
            let Some(end_index) = parser::find_end_index(&result, &self.format, start_index)
            else {
                break;
            };

            let body_start = start_index + prefix.len();
            let placeholder = result[body_start..end_index].to_string();

            if !visited.insert(placeholder.clone()) {
                return Err(ApplicationError::CircularReference { key: placeholder });
            }

            // The key itself may be built from placeholders.
            let resolved_key = self.parse_value(&placeholder, lookup, visited)?;

            let mut prop_value = lookup.lookup(&resolved_key);
            if prop_value.is_none() {
                if let Some(separator) = &self.value_separator {
                    if let Some(separator_index) = resolved_key.find(separator.as_str()) {
                        let actual_key = &resolved_key[..separator_index];
                        let default_value = &resolved_key[separator_index + separator.len()..];
                        prop_value = lookup
                            .lookup(actual_key)
                            .or_else(|| Some(default_value.to_string()));
                    }
                }
            }

            match prop_value {
                Some(found) => {
                    // The value may contain placeholders of its own; the
                    // substituted text is not re-scanned afterwards.
                    let found = self.parse_value(&found, lookup, visited)?;
                    result.replace_range(start_index..end_index + suffix.len(), &found);
                    trace!(key = %resolved_key, "resolved placeholder");
                    start = find_from(&result, prefix, start_index + found.len());
                }
                None if self.ignore_unresolvable => {
                    // Keep the unresolved expression and scan past it.
                    start = find_from(&result, prefix, end_index + suffix.len());
                }
                None => {
                    return Err(ApplicationError::UnresolvablePlaceholder {
                        key: resolved_key,
                        value: value.to_string(),
                    });
                }
            }

            visited.remove(&placeholder);
        }

        Ok(result)
    }
}

impl Default for PlaceholderEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds `needle` in `haystack` at or after byte offset `from`.
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|i| i + from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use lacuna_domain::PropertyMap;
    use pretty_assertions::assert_eq;

    fn map_of(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_simple() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("a", "1")]);

        assert_eq!(engine.resolve("${a}", &props).expect("resolves"), "1");
    }

    #[test]
    fn test_resolve_no_placeholders_unchanged() {
        let engine = PlaceholderEngine::new();
        let props = PropertyMap::new();

        assert_eq!(
            engine.resolve("plain text", &props).expect("resolves"),
            "plain text"
        );
    }

    #[test]
    fn test_resolve_multiple_left_to_right() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("a", "x"), ("b", "y")]);

        assert_eq!(engine.resolve("${a}-${b}", &props).expect("resolves"), "x-y");
    }

    #[test]
    fn test_resolve_with_surrounding_text() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("host", "localhost"), ("port", "8080")]);

        assert_eq!(
            engine
                .resolve("http://${host}:${port}/api", &props)
                .expect("resolves"),
            "http://localhost:8080/api"
        );
    }

    #[test]
    fn test_default_value_used_when_absent() {
        let engine = PlaceholderEngine::new();
        let props = PropertyMap::new();

        assert_eq!(
            engine.resolve("${a:default}", &props).expect("resolves"),
            "default"
        );
    }

    #[test]
    fn test_default_value_ignored_when_present() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("a", "1")]);

        assert_eq!(engine.resolve("${a:default}", &props).expect("resolves"), "1");
    }

    #[test]
    fn test_empty_value_is_found_not_defaulted() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("a", "")]);

        assert_eq!(engine.resolve("${a:default}", &props).expect("resolves"), "");
    }

    #[test]
    fn test_default_value_may_be_empty() {
        let engine = PlaceholderEngine::new();
        let props = PropertyMap::new();

        assert_eq!(engine.resolve("${a:}", &props).expect("resolves"), "");
    }

    #[test]
    fn test_default_splits_at_first_separator() {
        let engine = PlaceholderEngine::new();
        let props = PropertyMap::new();

        assert_eq!(
            engine
                .resolve("${url:http://fallback}", &props)
                .expect("resolves"),
            "http://fallback"
        );
    }

    #[test]
    fn test_no_separator_configured() {
        let engine = PlaceholderEngine::new().without_value_separator();
        let props = map_of(&[("a:default", "whole-key")]);

        // The body is a single key; the colon has no special meaning.
        assert_eq!(
            engine.resolve("${a:default}", &props).expect("resolves"),
            "whole-key"
        );
    }

    #[test]
    fn test_unresolvable_strict_errors() {
        let engine = PlaceholderEngine::new();
        let props = PropertyMap::new();

        let err = engine.resolve("${a}", &props).expect_err("strict mode errors");
        assert_eq!(
            err,
            ApplicationError::UnresolvablePlaceholder {
                key: "a".to_string(),
                value: "${a}".to_string(),
            }
        );
    }

    #[test]
    fn test_unresolvable_lenient_kept() {
        let engine = PlaceholderEngine::lenient();
        let props = map_of(&[("b", "y")]);

        assert_eq!(
            engine.resolve("${a}-${b}", &props).expect("lenient resolves"),
            "${a}-y"
        );
    }

    #[test]
    fn test_nested_key_resolution() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("inner", "a"), ("a", "42")]);

        assert_eq!(engine.resolve("${${inner}}", &props).expect("resolves"), "42");
    }

    #[test]
    fn test_nested_key_with_literal_part() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("env", "prod"), ("db.prod.url", "postgres://prod")]);

        assert_eq!(
            engine.resolve("${db.${env}.url}", &props).expect("resolves"),
            "postgres://prod"
        );
    }

    #[test]
    fn test_value_containing_placeholder_resolves() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("greeting", "hello ${name}"), ("name", "world")]);

        assert_eq!(
            engine.resolve("${greeting}", &props).expect("resolves"),
            "hello world"
        );
    }

    #[test]
    fn test_self_reference_is_circular() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("a", "${a}")]);

        let err = engine.resolve("${a}", &props).expect_err("cycle detected");
        assert_eq!(err, ApplicationError::CircularReference { key: "a".to_string() });
    }

    #[test]
    fn test_mutual_reference_is_circular() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("a", "${b}"), ("b", "${a}")]);

        let err = engine.resolve("${a}", &props).expect_err("cycle detected");
        assert!(matches!(err, ApplicationError::CircularReference { .. }));
    }

    #[test]
    fn test_circular_detected_in_lenient_mode() {
        let engine = PlaceholderEngine::lenient();
        let props = map_of(&[("a", "${a}")]);

        assert!(engine.resolve("${a}", &props).is_err());
    }

    #[test]
    fn test_repeated_key_is_not_circular() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("a", "x")]);

        // The same key on sibling branches is fine; only the active
        // recursion path counts.
        assert_eq!(engine.resolve("${a}${a}", &props).expect("resolves"), "xx");
    }

    #[test]
    fn test_substituted_value_not_rescanned() {
        let engine = PlaceholderEngine::lenient();
        let props = map_of(&[("a", "${b}")]);

        // `b` is unresolvable, so the literal `${b}` lands in the output;
        // scanning continues after it rather than looping on it.
        assert_eq!(engine.resolve("${a}", &props).expect("resolves"), "${b}");
    }

    #[test]
    fn test_placeholder_after_substituted_literal() {
        let engine = PlaceholderEngine::lenient();
        let props = map_of(&[("a", "${missing}"), ("c", "3")]);

        assert_eq!(
            engine.resolve("${a}-${c}", &props).expect("resolves"),
            "${missing}-3"
        );
    }

    #[test]
    fn test_unterminated_placeholder_left_alone() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("a", "1")]);

        assert_eq!(engine.resolve("${a", &props).expect("resolves"), "${a");
    }

    #[test]
    fn test_custom_delimiters() {
        let format = PlaceholderFormat::new("{{", "}}").expect("valid delimiters");
        let engine = PlaceholderEngine::new().with_format(format);
        let props = map_of(&[("name", "world")]);

        assert_eq!(
            engine.resolve("hello {{name}}", &props).expect("resolves"),
            "hello world"
        );
    }

    #[test]
    fn test_custom_value_separator() {
        let engine = PlaceholderEngine::new().with_value_separator("?:");
        let props = PropertyMap::new();

        assert_eq!(
            engine.resolve("${a?:fallback}", &props).expect("resolves"),
            "fallback"
        );
    }

    #[test]
    fn test_default_value_containing_placeholder() {
        let engine = PlaceholderEngine::new();
        let props = map_of(&[("fallback", "42")]);

        assert_eq!(
            engine.resolve("${a:${fallback}}", &props).expect("resolves"),
            "42"
        );
    }

    #[test]
    fn test_closure_lookup() {
        use crate::ports::FnLookup;

        let engine = PlaceholderEngine::new();
        let lookup = FnLookup::new(|key: &str| (key == "user").then(|| "amy".to_string()));

        assert_eq!(engine.resolve("hi ${user}", &lookup).expect("resolves"), "hi amy");
    }
}
