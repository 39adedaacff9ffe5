//! Placeholder scanning
//!
//! Finds `${name}` style spans in text. The end-of-placeholder scan is
//! nesting-aware: inside a placeholder, each occurrence of the simple
//! prefix opens a nested level and each suffix closes one, so
//! `${a${b}}` parses as one outer placeholder with `${b}` inside it.

use std::collections::HashSet;
use std::ops::Range;

use crate::error::{ApplicationError, ApplicationResult};

/// Default placeholder prefix.
pub const DEFAULT_PREFIX: &str = "${";

/// Default placeholder suffix.
pub const DEFAULT_SUFFIX: &str = "}";

/// Default separator between a placeholder key and its default value.
pub const DEFAULT_VALUE_SEPARATOR: &str = ":";

/// Placeholder delimiter configuration.
///
/// Holds the prefix/suffix pair plus the derived *simple prefix*: when the
/// suffix has a well-known opening complement (`}` for `{`, `]` for `[`,
/// `)` for `(`) and the prefix ends with it, nesting is tracked by that
/// single bracket rather than the full prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderFormat {
    prefix: String,
    suffix: String,
    simple_prefix: String,
}

impl PlaceholderFormat {
    /// Creates a format from a prefix/suffix pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either delimiter is empty.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> ApplicationResult<Self> {
        let prefix = prefix.into();
        let suffix = suffix.into();

        if prefix.is_empty() {
            return Err(ApplicationError::InvalidDelimiters(
                "placeholder prefix must not be empty".to_string(),
            ));
        }
        if suffix.is_empty() {
            return Err(ApplicationError::InvalidDelimiters(
                "placeholder suffix must not be empty".to_string(),
            ));
        }

        let simple_prefix = simple_prefix_for(&prefix, &suffix);
        Ok(Self {
            prefix,
            suffix,
            simple_prefix,
        })
    }

    /// Returns the placeholder prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the placeholder suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the token used to detect nested placeholders.
    #[must_use]
    pub fn simple_prefix(&self) -> &str {
        &self.simple_prefix
    }
}

impl Default for PlaceholderFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            simple_prefix: simple_prefix_for(DEFAULT_PREFIX, DEFAULT_SUFFIX),
        }
    }
}

/// The bracket complement of well-known suffixes; anything else tracks
/// nesting with the full prefix.
fn simple_prefix_for(prefix: &str, suffix: &str) -> String {
    let well_known = match suffix {
        "}" => Some("{"),
        "]" => Some("["),
        ")" => Some("("),
        _ => None,
    };

    match well_known {
        Some(simple) if prefix.ends_with(simple) => simple.to_string(),
        _ => prefix.to_string(),
    }
}

/// A placeholder occurrence in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpan {
    /// Byte range of the whole `prefix…suffix` expression.
    pub span: Range<usize>,
    /// Byte range of the body between prefix and suffix.
    pub body: Range<usize>,
}

impl PlaceholderSpan {
    /// Returns the body text of this placeholder within `input`.
    #[must_use]
    pub fn body_str<'a>(&self, input: &'a str) -> &'a str {
        &input[self.body.clone()]
    }
}

/// Finds the next placeholder at or after byte offset `from`.
///
/// An opening prefix whose end cannot be found (unbalanced input) yields
/// `None`; scanning never runs past an unterminated placeholder.
#[must_use]
pub fn next_placeholder(
    input: &str,
    format: &PlaceholderFormat,
    from: usize,
) -> Option<PlaceholderSpan> {
    let start = input.get(from..)?.find(format.prefix())? + from;
    let end = find_end_index(input, format, start)?;
    Some(PlaceholderSpan {
        span: start..end + format.suffix().len(),
        body: start + format.prefix().len()..end,
    })
}

/// Returns true if the input contains at least one complete placeholder.
#[must_use]
pub fn has_placeholders(input: &str, format: &PlaceholderFormat) -> bool {
    next_placeholder(input, format, 0).is_some()
}

/// Returns the distinct top-level placeholder bodies, in order of first
/// appearance. Bodies are raw: nested placeholders and default-value
/// separators are not interpreted.
#[must_use]
pub fn placeholder_keys(input: &str, format: &PlaceholderFormat) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    let mut from = 0;

    while let Some(found) = next_placeholder(input, format, from) {
        let body = found.body_str(input).to_string();
        if seen.insert(body.clone()) {
            keys.push(body);
        }
        from = found.span.end;
    }

    keys
}

/// Walks forward from just after the opening prefix at `start_index`,
/// returning the byte index of the suffix that closes the placeholder.
///
/// Matching is byte-wise: a valid UTF-8 delimiter can never match starting
/// inside a multi-byte character, so advancing one byte at a time is safe.
pub(crate) fn find_end_index(
    buf: &str,
    format: &PlaceholderFormat,
    start_index: usize,
) -> Option<usize> {
    let bytes = buf.as_bytes();
    let suffix = format.suffix().as_bytes();
    let simple_prefix = format.simple_prefix().as_bytes();

    let mut index = start_index + format.prefix().len();
    let mut within_nested = 0usize;

    while index < bytes.len() {
        if bytes[index..].starts_with(suffix) {
            if within_nested > 0 {
                within_nested -= 1;
                index += suffix.len();
            } else {
                return Some(index);
            }
        } else if bytes[index..].starts_with(simple_prefix) {
            within_nested += 1;
            index += simple_prefix.len();
        } else {
            index += 1;
        }
    }

    None
}
