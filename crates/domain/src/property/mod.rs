//! Property model types

mod map;
mod source;
mod sources;

pub use map::{PropertyMap, ResolvedProperty};
pub use source::PropertySource;
pub use sources::PropertySources;
