//! File loading for `.properties` sources

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use lacuna_domain::PropertySource;

use super::parser::parse_properties;

/// Errors loading a `.properties` file.
#[derive(Debug, Error)]
pub enum PropertiesFileError {
    /// The file could not be read.
    #[error("failed to read properties file {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Loads a `.properties` file into a map source named after its path.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_properties_file(path: impl AsRef<Path>) -> Result<PropertySource, PropertiesFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| PropertiesFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_properties(&text);
    debug!(path = %path.display(), entries = entries.len(), "loaded properties file");
    Ok(PropertySource::with_map(path.display().to_string(), entries))
}
