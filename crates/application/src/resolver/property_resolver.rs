//! Property resolver over an ordered source stack
//!
//! Ties the source stack and the placeholder engine together: raw and
//! typed property access, nested resolution of returned values, whole-text
//! lenient/strict passes, and required-property validation.

use std::str::FromStr;

use tracing::{debug, trace};

use lacuna_domain::PropertySources;

use crate::error::{ApplicationError, ApplicationResult};
use crate::placeholder::{PlaceholderEngine, PlaceholderFormat, DEFAULT_VALUE_SEPARATOR};

/// Resolves properties against an ordered stack of sources, expanding
/// placeholders inside resolved values.
#[derive(Debug, Clone)]
pub struct PropertyResolver {
    sources: PropertySources,
    format: PlaceholderFormat,
    value_separator: Option<String>,
    ignore_unresolvable_nested: bool,
    required: Vec<String>,
}

impl PropertyResolver {
    /// Creates a resolver over the given sources with `${name}` delimiters
    /// and the `:` default-value separator. Placeholders nested in
    /// resolved values are strict.
    #[must_use]
    pub fn new(sources: PropertySources) -> Self {
        Self {
            sources,
            format: PlaceholderFormat::default(),
            value_separator: Some(DEFAULT_VALUE_SEPARATOR.to_string()),
            ignore_unresolvable_nested: false,
            required: Vec::new(),
        }
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

    /// Sets whether unresolvable placeholders inside resolved property
    /// values are kept in place (`true`) or reported as errors (`false`).
    #[must_use]
    pub const fn with_ignore_unresolvable_nested(mut self, ignore: bool) -> Self {
        self.ignore_unresolvable_nested = ignore;
        self
    }

    /// Declares the keys that [`validate_required_properties`] checks.
    ///
    /// [`validate_required_properties`]: PropertyResolver::validate_required_properties
    pub fn set_required_properties<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = keys.into_iter().map(Into::into).collect();
    }

    /// Returns the underlying source stack.
    #[must_use]
    pub const fn sources(&self) -> &PropertySources {
        &self.sources
    }

    /// Returns a mutable reference to the underlying source stack.
    pub fn sources_mut(&mut self) -> &mut PropertySources {
        &mut self.sources
    }

    /// Returns the value of `key`, with placeholders inside the value
    /// expanded against this resolver's sources.
    ///
    /// An absent key is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if expanding placeholders inside the value fails
    /// (circular reference, or unresolvable key in strict nested mode).
    pub fn get_property(&self, key: &str) -> ApplicationResult<Option<String>> {
        let Some(found) = self.sources.resolve(key) else {
            return Ok(None);
        };
        trace!(key = %found.key, source = %found.source, "property found");
        self.engine(self.ignore_unresolvable_nested)
            .resolve(&found.value, &self.sources)
            .map(Some)
    }

    /// Returns the value of `key`, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::RequiredPropertyMissing`] if no source
    /// contains `key`, or a nested-resolution error as per
    /// [`get_property`](PropertyResolver::get_property).
    pub fn get_required_property(&self, key: &str) -> ApplicationResult<String> {
        self.get_property(key)?
            .ok_or_else(|| ApplicationError::RequiredPropertyMissing { key: key.to_string() })
    }

    /// Returns the value of `key` parsed into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidPropertyValue`] if the value
    /// fails to parse, or any [`get_property`] error.
    ///
    /// [`get_property`]: PropertyResolver::get_property
    pub fn get_parsed<T>(&self, key: &str) -> ApplicationResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_property(key)?
            .map(|value| {
                value
                    .parse()
                    .map_err(|e: T::Err| ApplicationError::InvalidPropertyValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })
            })
            .transpose()
    }

    /// Returns the value of `key` as a comma-delimited list: items are
    /// trimmed and empty segments dropped.
    ///
    /// # Errors
    ///
    /// Returns any [`get_property`](PropertyResolver::get_property) error.
    pub fn get_list(&self, key: &str) -> ApplicationResult<Option<Vec<String>>> {
        Ok(self.get_property(key)?.map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        }))
    }

    /// Resolves placeholders in `text` leniently: unresolvable
    /// placeholders stay in place.
    ///
    /// # Errors
    ///
    /// Circular references still fail; lenience covers only unresolvable
    /// keys.
    pub fn resolve_placeholders(&self, text: &str) -> ApplicationResult<String> {
        self.engine(true).resolve(text, &self.sources)
    }

    /// Resolves placeholders in `text` strictly: any unresolvable
    /// placeholder is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::UnresolvablePlaceholder`] or
    /// [`ApplicationError::CircularReference`].
    pub fn resolve_required_placeholders(&self, text: &str) -> ApplicationResult<String> {
        self.engine(false).resolve(text, &self.sources)
    }

    /// Checks that every declared-required key is present in some source,
    /// reporting all missing keys together.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingRequiredProperties`] listing
    /// every missing key.
    pub fn validate_required_properties(&self) -> ApplicationResult<()> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|key| self.sources.lookup(key).is_none())
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            debug!(missing = ?missing, "required properties validation failed");
            Err(ApplicationError::MissingRequiredProperties { keys: missing })
        }
    }

    fn engine(&self, ignore_unresolvable: bool) -> PlaceholderEngine {
        let engine = PlaceholderEngine::new()
            .with_format(self.format.clone())
            .with_ignore_unresolvable(ignore_unresolvable);
        match &self.value_separator {
            Some(separator) => engine.with_value_separator(separator.clone()),
            None => engine.without_value_separator(),
        }
    }
}
