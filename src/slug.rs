//! Heading anchor id generation.
//!
//! Ids are derived from the raw heading text before inline formatting:
//! placeholder tokens and Markdown punctuation are stripped, the rest is
//! lowercased, runs of non-alphanumeric characters collapse to single
//! hyphens, and duplicates get `-1`, `-2`, … suffixes so every anchor in a
//! document is unique.

use rustc_hash::FxHashMap;

use crate::protect;

/// Derive a slug from heading text.
pub fn slugify(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    let mut i = 0;
    while i < text.len() {
        let c = text[i..].chars().next().expect("in-bounds char boundary");
        if c == protect::SENTINEL as char {
            // Protected spans contribute nothing to the anchor.
            if let Some((_, _, len)) = protect::parse_token(bytes, i) {
                i += len;
                continue;
            }
            pending_hyphen = true;
            i += 1;
            continue;
        }
        // Emphasis/code/link punctuation is dropped outright, it is markup,
        // not a word separator.
        if matches!(c, '*' | '_' | '`' | '~' | '[' | ']') {
            i += c.len_utf8();
            continue;
        }
        if c.is_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            for lc in c.to_lowercase() {
                out.push(lc);
            }
        } else {
            pending_hyphen = true;
        }
        i += c.len_utf8();
    }
    out
}

/// Per-document slug assignment with deduplication.
#[derive(Debug, Default)]
pub struct SlugSet {
    seen: FxHashMap<String, usize>,
}

impl SlugSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for `text`, unique within this set: `title`, `title-1`, `title-2`…
    /// Headings that slug to nothing fall back to `heading`.
    pub fn assign(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "heading".to_owned();
        }
        match self.seen.get_mut(&base) {
            Some(count) => {
                *count += 1;
                format!("{base}-{count}")
            }
            None => {
                self.seen.insert(base.clone(), 0);
                base
            }
        }
    }
}
