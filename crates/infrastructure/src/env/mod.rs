//! Process environment adapters

use tracing::debug;

use lacuna_application::PlaceholderLookup;
use lacuna_domain::{PropertyMap, PropertySource};

/// Name of the source produced by [`system_environment_source`].
pub const SYSTEM_ENVIRONMENT_SOURCE_NAME: &str = "system-environment";

/// Snapshots the process environment into an environment-kind source.
///
/// The snapshot is taken once, at construction; the source supports
/// relaxed key matching (`foo.bar` also finds `FOO_BAR`).
#[must_use]
pub fn system_environment_source() -> PropertySource {
    let snapshot: PropertyMap = std::env::vars().collect();
    debug!(variables = snapshot.len(), "snapshotted process environment");
    PropertySource::with_environment(SYSTEM_ENVIRONMENT_SOURCE_NAME, snapshot)
}

/// A live lookup over the process environment.
///
/// Unlike [`system_environment_source`] this reads variables at lookup
/// time and matches names exactly, with no relaxed mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLookup;

impl EnvLookup {
    /// Creates a live environment lookup.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PlaceholderLookup for EnvLookup {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
