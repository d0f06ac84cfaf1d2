//! Footnote definitions and reference resolution.
//!
//! Definitions are collected (and removed from the body text) by the
//! protector; this module numbers them by first-definition order, rewrites
//! `[^id]` markers in the assembled output into superscript anchors, and
//! renders the trailing footnote section. Markers whose id was never defined
//! stay literal text.

use memchr::{memchr, memmem};
use rustc_hash::FxHashMap;

use crate::inline;
use crate::Options;

/// A collected footnote definition.
#[derive(Debug, Clone)]
pub struct FootnoteDef {
    /// The id between `[^` and `]`.
    pub label: String,
    /// The definition body, to be inline-formatted at render time.
    pub body: String,
}

/// Store of footnote definitions in first-definition order, with a derived
/// label → 1-based number map.
#[derive(Debug, Default)]
pub struct FootnoteStore {
    defs: Vec<FootnoteDef>,
    numbers: FxHashMap<String, usize>,
}

impl FootnoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition if the label is new. First definition wins; later
    /// duplicates are consumed by the caller but discarded here.
    pub(crate) fn insert(&mut self, label: &str, body: &str) {
        if self.numbers.contains_key(label) {
            return;
        }
        self.numbers.insert(label.to_owned(), self.defs.len() + 1);
        self.defs.push(FootnoteDef {
            label: label.to_owned(),
            body: body.to_owned(),
        });
    }

    /// 1-based number for a label, by first-definition order.
    pub fn number_of(&self, label: &str) -> Option<usize> {
        self.numbers.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FootnoteDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Rewrite `[^id]` markers into numbered superscript links.
///
/// The first marker for each footnote carries the `fnref-N` anchor the
/// section's back-reference points at; repeated markers link without an id.
pub fn resolve_references(html: &str, notes: &FootnoteStore) -> String {
    let finder = memmem::Finder::new("[^");
    if notes.is_empty() || finder.find(html.as_bytes()).is_none() {
        return html.to_owned();
    }
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len() + 64);
    let mut seen = vec![false; notes.len()];
    let mut pos = 0;
    while let Some(off) = finder.find(&bytes[pos..]) {
        let at = pos + off;
        out.push_str(&html[pos..at]);
        let id_start = at + 2;
        let resolved = match memchr(b']', &bytes[id_start..]) {
            Some(roff) if roff > 0 => {
                let id = &html[id_start..id_start + roff];
                match notes.number_of(id) {
                    Some(n) => {
                        if seen[n - 1] {
                            out.push_str(&format!("<sup><a href=\"#fn-{n}\">{n}</a></sup>"));
                        } else {
                            seen[n - 1] = true;
                            out.push_str(&format!(
                                "<sup><a href=\"#fn-{n}\" id=\"fnref-{n}\">{n}</a></sup>"
                            ));
                        }
                        Some(id_start + roff + 1)
                    }
                    None => None,
                }
            }
            _ => None,
        };
        match resolved {
            Some(next) => pos = next,
            None => {
                out.push_str("[^");
                pos = at + 2;
            }
        }
    }
    out.push_str(&html[pos..]);
    out
}

/// Append the rendered footnote section when any footnote was defined.
///
/// Bodies pass through inline formatting here; protected-span tokens inside
/// them resolve in the restoration stage that follows.
pub fn append_section(html: &mut String, notes: &FootnoteStore, options: &Options) {
    if notes.is_empty() {
        return;
    }
    if !html.is_empty() {
        html.push('\n');
    }
    html.push_str("<section class=\"footnotes\">\n<hr />\n<ol>");
    for (i, def) in notes.iter().enumerate() {
        let n = i + 1;
        let body = inline::format(&def.body, options);
        html.push_str(&format!(
            "\n<li id=\"fn-{n}\">{body} <a href=\"#fnref-{n}\">\u{21a9}</a></li>"
        ));
    }
    html.push_str("\n</ol>\n</section>");
}
