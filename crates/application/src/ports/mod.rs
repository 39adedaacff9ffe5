//! Application ports

mod lookup;

pub use lookup::{FnLookup, PlaceholderLookup};
