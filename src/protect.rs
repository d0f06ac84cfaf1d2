//! Protected-span extraction and restoration.
//!
//! The first pipeline stage lifts every region that must be opaque to the
//! Markdown rules — fenced code, inline code, display math, inline math,
//! footnote definitions — out of the text, leaving tagged placeholder tokens
//! behind. The last stage substitutes the rendered replacements back.
//!
//! Extraction order is a correctness invariant: fences, then inline code,
//! then display math, then inline math, then footnote definitions. A later
//! pattern never matches inside text an earlier pass already tokenized, which
//! is what makes ``` `$$` ``` a code span rather than a math opener.
//!
//! A token is `SENTINEL kind index SENTINEL` backed by an index-addressed
//! table of rendered strings. A zeroth pass lifts any pre-existing sentinel
//! byte out of the document, so after stage 1 every sentinel in the buffer is
//! engine-owned and a token can never collide with literal user text.

use memchr::{memchr, memmem};

use crate::escape;
use crate::footnote::FootnoteStore;
use crate::Options;

/// Token delimiter byte (U+001A SUBSTITUTE).
pub(crate) const SENTINEL: u8 = 0x1A;

pub(crate) const KIND_CODE_BLOCK: u8 = b'C';
pub(crate) const KIND_INLINE_CODE: u8 = b'I';
pub(crate) const KIND_DISPLAY_MATH: u8 = b'D';
pub(crate) const KIND_INLINE_MATH: u8 = b'M';
pub(crate) const KIND_LITERAL: u8 = b'X';
/// Link/image spans use the same token grammar but live in a table local to
/// one inline-formatting run.
pub(crate) const KIND_LINK: u8 = b'L';

/// Build the token string for a table slot.
pub(crate) fn token(kind: u8, index: usize) -> String {
    let mut t = String::with_capacity(10);
    t.push(SENTINEL as char);
    t.push(kind as char);
    t.push_str(&index.to_string());
    t.push(SENTINEL as char);
    t
}

/// Parse a token starting at `bytes[at]`.
///
/// Returns `(kind, index, byte length)` when `at` begins a well-formed token.
pub(crate) fn parse_token(bytes: &[u8], at: usize) -> Option<(u8, usize, usize)> {
    if bytes.get(at) != Some(&SENTINEL) {
        return None;
    }
    let kind = *bytes.get(at + 1)?;
    if !kind.is_ascii_uppercase() {
        return None;
    }
    let digits_start = at + 2;
    let mut i = digits_start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start || bytes.get(i) != Some(&SENTINEL) {
        return None;
    }
    // Digits are ASCII, the slice is valid UTF-8.
    let index: usize = std::str::from_utf8(&bytes[digits_start..i])
        .ok()?
        .parse()
        .ok()?;
    Some((kind, index, i + 1 - at))
}

/// True when the whole line is a single code-block token (an opaque block
/// line for the block parser).
pub(crate) fn is_opaque_block(line: &str) -> bool {
    let bytes = line.as_bytes();
    matches!(
        parse_token(bytes, 0),
        Some((KIND_CODE_BLOCK, _, len)) if len == bytes.len()
    )
}

/// Per-kind tables of rendered replacements, indexed by token number.
#[derive(Debug, Default)]
pub struct SpanTables {
    code_blocks: Vec<String>,
    inline_code: Vec<String>,
    display_math: Vec<String>,
    inline_math: Vec<String>,
    literals: Vec<String>,
}

impl SpanTables {
    fn push(&mut self, kind: u8, rendered: String) -> String {
        let table = match kind {
            KIND_CODE_BLOCK => &mut self.code_blocks,
            KIND_INLINE_CODE => &mut self.inline_code,
            KIND_DISPLAY_MATH => &mut self.display_math,
            KIND_INLINE_MATH => &mut self.inline_math,
            KIND_LITERAL => &mut self.literals,
            _ => unreachable!("unknown span kind"),
        };
        let index = table.len();
        table.push(rendered);
        token(kind, index)
    }

    /// Substitute all tokens back into `html`.
    ///
    /// Runs per kind in a fixed order. Math is restored before code because a
    /// math body may legitimately contain a code token (the backtick span was
    /// extracted first); the later code passes then resolve it. Protected
    /// literal sentinels go last, after every engine-owned token is gone.
    pub fn restore(&self, html: String) -> String {
        let html = restore_kind(html, KIND_INLINE_MATH, &self.inline_math);
        let html = restore_kind(html, KIND_DISPLAY_MATH, &self.display_math);
        let html = restore_kind(html, KIND_CODE_BLOCK, &self.code_blocks);
        let html = restore_kind(html, KIND_INLINE_CODE, &self.inline_code);
        restore_kind(html, KIND_LITERAL, &self.literals)
    }
}

pub(crate) fn restore_kind(text: String, kind: u8, entries: &[String]) -> String {
    if entries.is_empty() || memchr(SENTINEL, text.as_bytes()).is_none() {
        return text;
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(off) = memchr(SENTINEL, &bytes[pos..]) {
        let at = pos + off;
        out.push_str(&text[pos..at]);
        match parse_token(bytes, at) {
            Some((k, index, len)) if k == kind && index < entries.len() => {
                out.push_str(&entries[index]);
                pos = at + len;
            }
            // A token of another kind is copied whole. Consuming its closing
            // sentinel matters: left to right, a closer followed by user text
            // could otherwise be misread as an opener.
            Some((_, _, len)) => {
                out.push_str(&text[at..at + len]);
                pos = at + len;
            }
            None => {
                out.push(SENTINEL as char);
                pos = at + 1;
            }
        }
    }
    out.push_str(&text[pos..]);
    out
}

/// Run all extraction passes over `input`.
///
/// Returns the tokenized text, the span tables for [`SpanTables::restore`],
/// and the collected footnote definitions.
pub fn protect(input: &str, options: &Options) -> (String, SpanTables, FootnoteStore) {
    let mut tables = SpanTables::default();
    let mut text = extract_literals(input.to_owned(), &mut tables);
    text = extract_code_fences(text, &mut tables);
    text = extract_inline_code(text, &mut tables);
    text = extract_display_math(text, &mut tables);
    text = extract_inline_math(text, &mut tables);

    let mut footnotes = FootnoteStore::new();
    if options.footnotes {
        text = extract_footnote_defs(text, &mut footnotes);
    }
    (text, tables, footnotes)
}

/// Lift pre-existing sentinel bytes out of the document.
fn extract_literals(text: String, tables: &mut SpanTables) -> String {
    if memchr(SENTINEL, text.as_bytes()).is_none() {
        return text;
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 16);
    let mut pos = 0;
    while let Some(off) = memchr(SENTINEL, &bytes[pos..]) {
        let at = pos + off;
        out.push_str(&text[pos..at]);
        let tok = tables.push(KIND_LITERAL, (SENTINEL as char).to_string());
        out.push_str(&tok);
        pos = at + 1;
    }
    out.push_str(&text[pos..]);
    out
}

/// A fence opener: ``` at column 0 followed only by a word-character tag.
fn fence_opener(line: &str) -> Option<&str> {
    let tag = line.strip_prefix("```")?;
    if tag
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        Some(tag)
    } else {
        None
    }
}

fn render_fence(tag: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 48);
    if tag.is_empty() {
        html.push_str("<pre><code>");
    } else {
        html.push_str("<pre><code class=\"language-");
        html.push_str(tag);
        html.push_str("\">");
    }
    escape::escape_text_into(&mut html, body);
    html.push_str("</code></pre>");
    html
}

fn extract_code_fences(text: String, tables: &mut SpanTables) -> String {
    if memmem::find(text.as_bytes(), b"```").is_none() {
        return text;
    }
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut pos = 0;
    while pos < len {
        let line_end = memchr(b'\n', &bytes[pos..])
            .map(|o| pos + o)
            .unwrap_or(len);
        let line = &text[pos..line_end];

        let mut consumed_to = line_end;
        if let Some(tag) = fence_opener(line) {
            // Look for the closing fence on a following line.
            let mut cl_start = line_end + 1;
            let mut closer: Option<(usize, usize)> = None;
            while cl_start < len {
                let cl_end = memchr(b'\n', &bytes[cl_start..])
                    .map(|o| cl_start + o)
                    .unwrap_or(len);
                if text[cl_start..cl_end].starts_with("```") {
                    closer = Some((cl_start, cl_end));
                    break;
                }
                cl_start = cl_end + 1;
            }
            if let Some((cl_start, cl_end)) = closer {
                let body_start = line_end + 1;
                // Exclude the newline before the closer line.
                let body = if cl_start > body_start {
                    &text[body_start..cl_start - 1]
                } else {
                    ""
                };
                let tok = tables.push(KIND_CODE_BLOCK, render_fence(tag, body));
                out.push_str(&tok);
                consumed_to = cl_end;
            } else {
                // Unterminated fence: literal text.
                out.push_str(line);
            }
        } else {
            out.push_str(line);
        }

        pos = consumed_to;
        if pos < len {
            out.push('\n');
            pos += 1;
        }
    }
    out
}

fn extract_inline_code(text: String, tables: &mut SpanTables) -> String {
    if memchr(b'`', text.as_bytes()).is_none() {
        return text;
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(off) = memchr(b'`', &bytes[pos..]) {
        let i = pos + off;
        out.push_str(&text[pos..i]);
        match memchr(b'`', &bytes[i + 1..]) {
            Some(coff) if coff > 0 => {
                let j = i + 1 + coff;
                let mut rendered = String::with_capacity(coff + 13);
                rendered.push_str("<code>");
                escape::escape_text_into(&mut rendered, &text[i + 1..j]);
                rendered.push_str("</code>");
                let tok = tables.push(KIND_INLINE_CODE, rendered);
                out.push_str(&tok);
                pos = j + 1;
            }
            // Empty span or no closer: the backtick is literal.
            _ => {
                out.push('`');
                pos = i + 1;
            }
        }
    }
    out.push_str(&text[pos..]);
    out
}

fn extract_display_math(text: String, tables: &mut SpanTables) -> String {
    let finder = memmem::Finder::new("$$");
    if finder.find(text.as_bytes()).is_none() {
        return text;
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(off) = finder.find(&bytes[pos..]) {
        let i = pos + off;
        out.push_str(&text[pos..i]);
        match finder.find(&bytes[i + 2..]) {
            Some(coff) => {
                let j = i + 2 + coff;
                // Delimiters included: the span is opaque here and meaningful
                // only to the downstream math renderer.
                let rendered = format!("$${}$$", &text[i + 2..j]);
                let tok = tables.push(KIND_DISPLAY_MATH, rendered);
                out.push_str(&tok);
                pos = j + 2;
            }
            None => {
                out.push_str("$$");
                pos = i + 2;
            }
        }
    }
    out.push_str(&text[pos..]);
    out
}

fn extract_inline_math(text: String, tables: &mut SpanTables) -> String {
    if memchr(b'$', text.as_bytes()).is_none() {
        return text;
    }
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(off) = memchr(b'$', &bytes[pos..]) {
        let i = pos + off;
        out.push_str(&text[pos..i]);

        // Opener: not adjacent to another dollar, content starts on this line.
        let prev_is_dollar = i > 0 && bytes[i - 1] == b'$';
        let opener_ok = !prev_is_dollar
            && matches!(bytes.get(i + 1), Some(&b) if b != b'$' && b != b'\n');
        if !opener_ok {
            out.push('$');
            pos = i + 1;
            continue;
        }

        let Some(coff) = memchr(b'$', &bytes[i + 1..]) else {
            out.push('$');
            pos = i + 1;
            continue;
        };
        let j = i + 1 + coff;
        let crosses_line = memchr(b'\n', &bytes[i + 1..j]).is_some();
        let closer_ok = bytes.get(j + 1) != Some(&b'$');
        if crosses_line || !closer_ok {
            out.push('$');
            pos = i + 1;
            continue;
        }

        let rendered = format!("${}$", &text[i + 1..j]);
        let tok = tables.push(KIND_INLINE_MATH, rendered);
        out.push_str(&tok);
        pos = j + 1;
    }
    out.push_str(&text[pos..]);
    out
}

/// A footnote definition line: `[^id]: body` at column 0.
fn footnote_def(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("[^")?;
    let rb = rest.find(']')?;
    if rb == 0 {
        return None;
    }
    let label = &rest[..rb];
    let after = rest[rb + 1..].strip_prefix(':')?;
    let body = after.trim_start();
    if body.is_empty() {
        return None;
    }
    Some((label, body))
}

fn extract_footnote_defs(text: String, footnotes: &mut FootnoteStore) -> String {
    if memmem::find(text.as_bytes(), b"[^").is_none() {
        return text;
    }
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut pos = 0;
    let mut pending_newline = false;
    while pos < len {
        let line_end = memchr(b'\n', &bytes[pos..])
            .map(|o| pos + o)
            .unwrap_or(len);
        let line = &text[pos..line_end];
        if let Some((label, body)) = footnote_def(line) {
            // Definition lines produce no inline output; drop the line and
            // its newline entirely.
            footnotes.insert(label, body);
        } else {
            if pending_newline {
                out.push('\n');
            }
            out.push_str(line);
            pending_newline = true;
        }
        pos = line_end + 1;
    }
    out
}
