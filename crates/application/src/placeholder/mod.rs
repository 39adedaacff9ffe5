//! Placeholder resolution
//!
//! Scanning and substitution of `${name}` style expressions.
//!
//! # Usage
//!
//! ```
//! use lacuna_application::placeholder::PlaceholderEngine;
//! use lacuna_domain::PropertyMap;
//!
//! let mut props = PropertyMap::new();
//! props.insert("host".to_string(), "localhost".to_string());
//!
//! let engine = PlaceholderEngine::new();
//! let resolved = engine.resolve("http://${host}:${port:8080}", &props).unwrap();
//! assert_eq!(resolved, "http://localhost:8080");
//! ```

pub mod engine;
pub mod parser;

pub use engine::PlaceholderEngine;
pub use parser::{
    has_placeholders, next_placeholder, placeholder_keys, PlaceholderFormat, PlaceholderSpan,
    DEFAULT_PREFIX, DEFAULT_SUFFIX, DEFAULT_VALUE_SEPARATOR,
};
