//! mathdown: math-aware Markdown to HTML conversion engine.
//!
//! Converts a complete document into an HTML fragment through five stages
//! over a single text buffer:
//!
//! 1. **protect** — fenced code, inline code, display math (`$$…$$`), inline
//!    math (`$…$`), and footnote definitions are lifted out behind
//!    placeholder tokens so no later rule can touch them
//! 2. **block parse** — line-oriented classification into headings, rules,
//!    blockquotes, lists, tables, and paragraphs
//! 3. **inline format** — links/images, smart typography, and emphasis,
//!    applied per text run
//! 4. **footnotes** — `[^id]` markers become numbered superscript anchors
//!    and the rendered footnote section is appended
//! 5. **restore** — protected spans substitute back: math verbatim for the
//!    downstream math renderer, code HTML-escaped for the syntax highlighter
//!
//! The engine is pure and total: no I/O, no shared state, and no error
//! channel — malformed constructs degrade into literal or paragraph text.
//! The fragment expects a host page that runs a math renderer over `$…$` /
//! `$$…$$` and a syntax highlighter over `language-*` code elements after
//! insertion.
//!
//! # Example
//! ```
//! let html = mathdown::to_html("# Euler\n\nFamously, $e^{i\\pi}+1=0$.");
//! assert!(html.contains("<h1 id=\"euler\">Euler</h1>"));
//! assert!(html.contains("$e^{i\\pi}+1=0$"));
//! ```

pub mod block;
pub mod escape;
pub mod footnote;
pub mod inline;
pub mod protect;
pub mod render;
pub mod slug;

pub use footnote::{FootnoteDef, FootnoteStore};
pub use render::HtmlWriter;

/// Rendering options.
///
/// Defaults enable the full engine; the toggles exist for embedders that
/// render restricted previews.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Dash, ellipsis, and curly-quote substitutions.
    pub smart_typography: bool,
    /// Slugged `id` attributes on headings.
    pub heading_anchors: bool,
    /// Footnote definitions, markers, and the trailing section.
    pub footnotes: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            smart_typography: true,
            heading_anchors: true,
            footnotes: true,
        }
    }
}

/// Convert Markdown to an HTML fragment with default options.
pub fn to_html(input: &str) -> String {
    to_html_with_options(input, &Options::default())
}

/// Convert Markdown to an HTML fragment.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    let (text, spans, notes) = protect::protect(input, options);

    let mut writer = HtmlWriter::with_capacity_for(input.len());
    let mut parser = block::BlockParser::new(options);
    parser.parse(&text, &mut writer);
    let mut html = writer.into_string();

    if options.footnotes {
        html = footnote::resolve_references(&html, &notes);
        footnote::append_section(&mut html, &notes, options);
    }

    // Restoration must come last: the marker rewrite above touches only
    // literal `[^id]` text, never token bytes.
    spans.restore(html)
}
