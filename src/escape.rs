//! HTML escaping for protected code content.
//!
//! Fast-path optimized: scans for the first escapable character with memchr,
//! then copies segments between escapes. Only code bodies are escaped in this
//! engine; ordinary text flows through untouched (documents are trusted local
//! files, and math spans must survive byte-for-byte).

use memchr::{memchr, memchr3};

/// Lookup table for characters escaped in code content.
///
/// `"` is included so code can be embedded in attribute-bearing markup
/// without re-escaping.
const ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'&' as usize] = true;
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'"' as usize] = true;
    table
};

/// Escape `&`, `<`, `>`, and `"` into `out`.
///
/// # Example
/// ```
/// let mut out = String::new();
/// mathdown::escape::escape_text_into(&mut out, "<script>");
/// assert_eq!(out, "&lt;script&gt;");
/// ```
pub fn escape_text_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();

    let mut pos = match first_escape(bytes) {
        Some(p) => p,
        None => {
            out.push_str(input);
            return;
        }
    };

    out.push_str(&input[..pos]);

    while pos < bytes.len() {
        // Bulk-copy the run up to the next escapable byte.
        let scan_start = pos;
        while pos < bytes.len() && !ESCAPE_TABLE[bytes[pos] as usize] {
            pos += 1;
        }
        if pos > scan_start {
            out.push_str(&input[scan_start..pos]);
        }

        if pos < bytes.len() {
            let seq = match bytes[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => unreachable!(),
            };
            out.push_str(seq);
            pos += 1;
        }
    }
}

/// Escape and return a new `String`.
///
/// Prefer [`escape_text_into`] to reuse buffers.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    escape_text_into(&mut out, input);
    out
}

/// Check whether a string contains anything that would be escaped.
pub fn needs_escape(input: &str) -> bool {
    first_escape(input.as_bytes()).is_some()
}

#[inline]
fn first_escape(input: &[u8]) -> Option<usize> {
    let a = memchr3(b'&', b'<', b'>', input);
    let b = memchr(b'"', input);
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
