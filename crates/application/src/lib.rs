//! Lacuna Application - Placeholder resolution
//!
//! This crate implements the placeholder resolution engine, the lookup
//! capability it resolves keys through, and the property resolver facade
//! over an ordered source stack. No I/O happens here; sources are built
//! by the infrastructure layer.

pub mod error;
pub mod placeholder;
pub mod ports;
pub mod resolver;

pub use error::{ApplicationError, ApplicationResult};
pub use placeholder::{
    has_placeholders, placeholder_keys, PlaceholderEngine, PlaceholderFormat, PlaceholderSpan,
};
pub use ports::{FnLookup, PlaceholderLookup};
pub use resolver::PropertyResolver;
