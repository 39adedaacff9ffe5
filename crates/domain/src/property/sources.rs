//! Ordered stack of property sources
//!
//! Sources are searched front-to-back; the first source containing a key
//! wins. Re-adding a name relocates the existing source.

use crate::error::{DomainError, DomainResult};

use super::map::ResolvedProperty;
use super::source::PropertySource;

/// An ordered collection of property sources with first-match-wins
/// precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySources {
    sources: Vec<PropertySource>,
}

impl PropertySources {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source with highest precedence. An existing source with the
    /// same name is removed first.
    pub fn add_first(&mut self, source: PropertySource) {
        self.remove(source.name());
        self.sources.insert(0, source);
    }

    /// Adds a source with lowest precedence. An existing source with the
    /// same name is removed first.
    pub fn add_last(&mut self, source: PropertySource) {
        self.remove(source.name());
        self.sources.push(source);
    }

    /// Adds a source immediately before the named one.
    ///
    /// # Errors
    ///
    /// Returns an error if no source with `relative_to` exists.
    pub fn add_before(&mut self, relative_to: &str, source: PropertySource) -> DomainResult<()> {
        self.remove(source.name());
        let index = self.index_of(relative_to)?;
        self.sources.insert(index, source);
        Ok(())
    }

    /// Adds a source immediately after the named one.
    ///
    /// # Errors
    ///
    /// Returns an error if no source with `relative_to` exists.
    pub fn add_after(&mut self, relative_to: &str, source: PropertySource) -> DomainResult<()> {
        self.remove(source.name());
        let index = self.index_of(relative_to)?;
        self.sources.insert(index + 1, source);
        Ok(())
    }

    /// Replaces the named source in place, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns an error if no source with `name` exists.
    pub fn replace(&mut self, name: &str, source: PropertySource) -> DomainResult<()> {
        let index = self.index_of(name)?;
        self.sources[index] = source;
        Ok(())
    }

    /// Removes and returns the named source, if present.
    pub fn remove(&mut self, name: &str) -> Option<PropertySource> {
        let index = self.sources.iter().position(|s| s.name() == name)?;
        Some(self.sources.remove(index))
    }

    /// Returns the named source, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertySource> {
        self.sources.iter().find(|s| s.name() == name)
    }

    /// Returns true if a source with `name` is in the stack.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolves a key against the stack, front-to-back.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<ResolvedProperty> {
        self.sources.iter().find_map(|source| {
            source
                .lookup(key)
                .map(|value| ResolvedProperty::new(key, value, source.name()))
        })
    }

    /// Resolves a key to just its value.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.sources
            .iter()
            .find_map(|source| source.lookup(key).map(String::from))
    }

    /// Iterates the sources in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertySource> {
        self.sources.iter()
    }

    /// Returns the number of sources in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if the stack has no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Returns the source names in precedence order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(PropertySource::name).collect()
    }

    fn index_of(&self, name: &str) -> DomainResult<usize> {
        self.sources
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| DomainError::UnknownSource(name.to_string()))
    }
}

impl<'a> IntoIterator for &'a PropertySources {
    type Item = &'a PropertySource;
    type IntoIter = std::slice::Iter<'a, PropertySource>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}
