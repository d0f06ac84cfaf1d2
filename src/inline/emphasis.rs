//! Bold and italic emphasis.
//!
//! Two passes over the text run, bold first. Matching is lazy: an opener
//! pairs with the nearest valid closer of the same delimiter, and a delimiter
//! without a closer stays literal. The italic pass refuses delimiters that
//! touch another `*`/`_` so it never re-matches bold pairs.

use memchr::{memchr, memchr2};

#[inline]
fn is_delim(b: u8) -> bool {
    b == b'*' || b == b'_'
}

/// `**text**` / `__text__` → `<strong>text</strong>`.
pub(super) fn bold(text: &str) -> String {
    if memchr2(b'*', b'_', text.as_bytes()).is_none() {
        return text.to_owned();
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(off) = memchr2(b'*', b'_', &bytes[pos..]) {
        let i = pos + off;
        out.push_str(&text[pos..i]);
        let d = bytes[i];
        if bytes.get(i + 1) == Some(&d) {
            if let Some(j) = find_pair(bytes, d, i + 3) {
                out.push_str("<strong>");
                out.push_str(&text[i + 2..j]);
                out.push_str("</strong>");
                pos = j + 2;
                continue;
            }
        }
        out.push(d as char);
        pos = i + 1;
    }
    out.push_str(&text[pos..]);
    out
}

/// Find the next `dd` pair at or after `from`.
fn find_pair(bytes: &[u8], d: u8, from: usize) -> Option<usize> {
    let mut k = from;
    while k < bytes.len() {
        let j = k + memchr(d, &bytes[k..])?;
        if bytes.get(j + 1) == Some(&d) {
            return Some(j);
        }
        k = j + 1;
    }
    None
}

/// `*text*` / `_text_` → `<em>text</em>`.
pub(super) fn italic(text: &str) -> String {
    if memchr2(b'*', b'_', text.as_bytes()).is_none() {
        return text.to_owned();
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(off) = memchr2(b'*', b'_', &bytes[pos..]) {
        let i = pos + off;
        out.push_str(&text[pos..i]);
        let d = bytes[i];
        let opener_ok = (i == 0 || !is_delim(bytes[i - 1]))
            && matches!(bytes.get(i + 1), Some(&b) if !is_delim(b));
        if opener_ok {
            if let Some(j) = find_single(bytes, d, i + 2) {
                out.push_str("<em>");
                out.push_str(&text[i + 1..j]);
                out.push_str("</em>");
                pos = j + 1;
                continue;
            }
        }
        out.push(d as char);
        pos = i + 1;
    }
    out.push_str(&text[pos..]);
    out
}

/// Find the next `d` at or after `from` that is not adjacent to another
/// emphasis delimiter on either side.
fn find_single(bytes: &[u8], d: u8, from: usize) -> Option<usize> {
    let mut k = from;
    while k < bytes.len() {
        let j = k + memchr(d, &bytes[k..])?;
        let prev_ok = j > 0 && !is_delim(bytes[j - 1]);
        let next_ok = bytes.get(j + 1).is_none_or(|&b| !is_delim(b));
        if prev_ok && next_ok {
            return Some(j);
        }
        k = j + 1;
    }
    None
}
