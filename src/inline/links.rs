//! Image and link protection.
//!
//! Images and links are lifted out of the text run before any other inline
//! rewriting so typography and emphasis can never corrupt a URL or link text.
//! The image pass runs first because `![…](…)` is a strict superset of the
//! link pattern. Rendered markup sits in a table local to one formatting run
//! and is substituted back, verbatim, as the final inline step.

use memchr::{memchr, memmem};

use crate::protect::{self, KIND_LINK};

/// Rendered link/image markup for one formatting run.
pub(super) struct LinkTable {
    entries: Vec<String>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, rendered: String) -> String {
        let index = self.entries.len();
        self.entries.push(rendered);
        protect::token(KIND_LINK, index)
    }

    /// Substitute link tokens back, verbatim.
    pub fn restore(&self, text: String) -> String {
        protect::restore_kind(text, KIND_LINK, &self.entries)
    }

    /// Extract `![alt](url)` images. Alt may be empty; the URL may not.
    pub fn extract_images(&mut self, text: &str) -> String {
        let finder = memmem::Finder::new("![");
        if finder.find(text.as_bytes()).is_none() {
            return text.to_owned();
        }
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while let Some(off) = finder.find(&bytes[pos..]) {
            let at = pos + off;
            out.push_str(&text[pos..at]);
            match parse_bracket_paren(text, at + 1, true) {
                Some((alt, url, end)) => {
                    let rendered = format!("<img src=\"{url}\" alt=\"{alt}\">");
                    let tok = self.push(rendered);
                    out.push_str(&tok);
                    pos = end;
                }
                // Leave the bracket in place; the link pass may still use it.
                None => {
                    out.push('!');
                    pos = at + 1;
                }
            }
        }
        out.push_str(&text[pos..]);
        out
    }

    /// Extract `[text](url)` links. Text and URL must be non-empty.
    pub fn extract_links(&mut self, text: &str) -> String {
        if memchr(b'[', text.as_bytes()).is_none() {
            return text.to_owned();
        }
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while let Some(off) = memchr(b'[', &bytes[pos..]) {
            let at = pos + off;
            out.push_str(&text[pos..at]);
            match parse_bracket_paren(text, at, false) {
                Some((label, url, end)) => {
                    let rendered = format!("<a href=\"{url}\">{label}</a>");
                    let tok = self.push(rendered);
                    out.push_str(&tok);
                    pos = end;
                }
                None => {
                    out.push('[');
                    pos = at + 1;
                }
            }
        }
        out.push_str(&text[pos..]);
        out
    }
}

/// Parse `[label](url)` with the `[` at `open`.
///
/// The label runs to the first `]` and may not contain one; the URL runs to
/// the first `)`. Returns `(label, url, end)` where `end` is the offset just
/// past the closing parenthesis.
fn parse_bracket_paren(
    text: &str,
    open: usize,
    allow_empty_label: bool,
) -> Option<(&str, &str, usize)> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes[open], b'[');
    let label_start = open + 1;
    let rb = label_start + memchr(b']', &bytes[label_start..])?;
    if !allow_empty_label && rb == label_start {
        return None;
    }
    if bytes.get(rb + 1) != Some(&b'(') {
        return None;
    }
    let url_start = rb + 2;
    let cp = url_start + memchr(b')', &bytes[url_start..])?;
    if cp == url_start {
        return None;
    }
    Some((&text[label_start..rb], &text[url_start..cp], cp + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str) -> String {
        let mut table = LinkTable::new();
        let s = table.extract_images(text);
        let s = table.extract_links(&s);
        table.restore(s)
    }

    #[test]
    fn link_renders() {
        assert_eq!(
            round_trip("see [docs](https://example.com) here"),
            "see <a href=\"https://example.com\">docs</a> here"
        );
    }

    #[test]
    fn image_renders() {
        assert_eq!(
            round_trip("![a chart](chart.png)"),
            "<img src=\"chart.png\" alt=\"a chart\">"
        );
    }

    #[test]
    fn image_alt_may_be_empty() {
        assert_eq!(round_trip("![](x.png)"), "<img src=\"x.png\" alt=\"\">");
    }

    #[test]
    fn link_text_may_not_be_empty() {
        assert_eq!(round_trip("[](x)"), "[](x)");
    }

    #[test]
    fn url_may_not_be_empty() {
        assert_eq!(round_trip("[a]()"), "[a]()");
        assert_eq!(round_trip("![a]()"), "![a]()");
    }

    #[test]
    fn unterminated_stays_literal() {
        assert_eq!(round_trip("[a](b"), "[a](b");
        assert_eq!(round_trip("![a](b"), "![a](b");
        assert_eq!(round_trip("[a] (b)"), "[a] (b)");
    }

    #[test]
    fn image_not_mistaken_for_link() {
        let html = round_trip("![alt](src)");
        assert!(html.starts_with("<img"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn bang_before_plain_link() {
        assert_eq!(
            round_trip("wow! [x](y)"),
            "wow! <a href=\"y\">x</a>"
        );
    }

    #[test]
    fn extraction_protects_url_from_later_passes() {
        let mut table = LinkTable::new();
        let s = table.extract_images("[a--b](c--d)");
        let s = table.extract_links(&s);
        // The tokenized text carries no hyphens for typography to rewrite.
        assert!(!s.contains("--"));
        assert_eq!(table.restore(s), "<a href=\"c--d\">a--b</a>");
    }
}
