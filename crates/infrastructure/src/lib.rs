//! Lacuna Infrastructure - Source adapters
//!
//! This crate builds property sources from the outside world: the process
//! environment, `.properties` files, and flattened JSON documents.

pub mod env;
pub mod json;
pub mod properties;

pub use env::{system_environment_source, EnvLookup, SYSTEM_ENVIRONMENT_SOURCE_NAME};
pub use json::{load_json_file, JsonSourceError};
pub use properties::{load_properties_file, parse_properties, PropertiesFileError};
