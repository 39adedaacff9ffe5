//! Parser for Java-style `.properties` text
//!
//! Logical-line oriented: a physical line ending in an unescaped
//! backslash continues on the next line with its leading whitespace
//! trimmed. `#` and `!` start comments, keys and values separate on the
//! first unescaped `=`, `:` or whitespace run, and `\t \n \r \f \\ \uXXXX`
//! escapes apply to both keys and values. Later duplicate keys win.

use lacuna_domain::PropertyMap;

/// Parses `.properties` text into a property map.
#[must_use]
pub fn parse_properties(text: &str) -> PropertyMap {
    let bytes = text.as_bytes();
    let mut offset = 0usize;
    let mut entries = PropertyMap::new();

    while offset < bytes.len() {
        let line_start = offset;
        let logical = read_logical_line(bytes, &mut offset);
        if let Some((key, value)) = parse_logical_line(&logical) {
            entries.insert(key, value);
        }

        // Always make progress, even on pathological inputs.
        if offset == line_start {
            offset += 1;
        }
    }

    entries
}

/// Reads one logical line, splicing backslash continuations.
fn read_logical_line(bytes: &[u8], offset: &mut usize) -> String {
    let mut out = Vec::new();

    loop {
        let segment_start = *offset;
        let mut line_end = segment_start;
        while line_end < bytes.len() && bytes[line_end] != b'\n' {
            line_end += 1;
        }

        let mut content_end = line_end;
        if content_end > segment_start && bytes[content_end - 1] == b'\r' {
            content_end -= 1;
        }

        let continues = ends_with_unescaped_backslash(&bytes[segment_start..content_end]);
        let copy_end = if continues {
            // Drop the continuation backslash itself.
            content_end.saturating_sub(1)
        } else {
            content_end
        };
        out.extend_from_slice(&bytes[segment_start..copy_end]);

        *offset = if line_end < bytes.len() {
            line_end + 1
        } else {
            line_end
        };

        if !continues {
            break;
        }

        // Continuation: leading whitespace on the next physical line is
        // not part of the value.
        while *offset < bytes.len() && is_property_whitespace(bytes[*offset]) {
            *offset += 1;
        }
    }

    // Splice points are all ASCII, so the joined line is still UTF-8.
    String::from_utf8_lossy(&out).into_owned()
}

fn ends_with_unescaped_backslash(line: &[u8]) -> bool {
    let mut backslashes = 0usize;
    let mut i = line.len();
    while i > 0 && line[i - 1] == b'\\' {
        backslashes += 1;
        i -= 1;
    }
    backslashes % 2 == 1
}

/// Splits a logical line into an unescaped key/value pair. Comment and
/// blank lines yield `None`; a line with no separator is a key with an
/// empty (present) value.
fn parse_logical_line(line: &str) -> Option<(String, String)> {
    let bytes = line.as_bytes();

    let mut i = 0usize;
    while i < bytes.len() && is_property_whitespace(bytes[i]) {
        i += 1;
    }

    if i >= bytes.len() {
        return None;
    }
    if bytes[i] == b'#' || bytes[i] == b'!' {
        return None;
    }

    let key_start = i;
    while i < bytes.len() {
        match bytes[i] {
            // An escaped character never terminates the key.
            b'\\' => i += 2,
            b'=' | b':' => break,
            b if is_property_whitespace(b) => break,
            _ => i += 1,
        }
    }
    let key_end = i.min(bytes.len());
    i = key_end;

    while i < bytes.len() && is_property_whitespace(bytes[i]) {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'=' || bytes[i] == b':') {
        i += 1;
    }
    while i < bytes.len() && is_property_whitespace(bytes[i]) {
        i += 1;
    }

    let key = unescape(&line[key_start..key_end]);
    let value = unescape(&line[i..]);
    Some((key, value))
}

const fn is_property_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0C')
}

/// Applies `.properties` escapes. Unknown escapes collapse to the escaped
/// character; malformed `\uXXXX` sequences are dropped.
fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            None => {
                out.push('\\');
                break;
            }
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0C'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() == 4
                    && let Ok(code) = u32::from_str_radix(&hex, 16)
                    && let Some(decoded) = char::from_u32(code)
                {
                    out.push(decoded);
                }
            }
            Some(other) => out.push(other),
        }
    }

    out
}
