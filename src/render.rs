//! HTML fragment writer.
//!
//! The output buffer is an ordered sequence of markup lines: every block
//! element begins a new line, lines are separated by `\n`, and the finished
//! fragment has no trailing newline. The buffer is append-only; the footnote
//! and restoration stages that follow operate on the joined string.

use crate::block::Alignment;

/// Append-only writer over a byte buffer.
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    /// Create with capacity sized for an input document.
    ///
    /// Typical fragments run ~1.25x the source size.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: Vec::with_capacity(input_len + input_len / 4),
        }
    }

    /// Start a new markup line.
    #[inline]
    fn begin_line(&mut self) {
        if !self.out.is_empty() {
            self.out.push(b'\n');
        }
    }

    #[inline]
    fn push_str(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Take ownership as a `String`.
    #[inline]
    pub fn into_string(self) -> String {
        // SAFETY: every write is either a &str or ASCII markup.
        unsafe { String::from_utf8_unchecked(self.out) }
    }

    // --- Block elements ---

    /// `<hr />`
    #[inline]
    pub fn hr(&mut self) {
        self.begin_line();
        self.push_str("<hr />");
    }

    /// `<hN id="...">content</hN>`
    pub fn heading(&mut self, level: u8, id: Option<&str>, content: &str) {
        debug_assert!((1..=6).contains(&level));
        self.begin_line();
        self.push_str("<h");
        self.out.push(b'0' + level);
        if let Some(id) = id {
            self.push_str(" id=\"");
            self.push_str(id);
            self.push_str("\"");
        }
        self.push_str(">");
        self.push_str(content);
        self.push_str("</h");
        self.out.push(b'0' + level);
        self.push_str(">");
    }

    /// `<p>content</p>`
    pub fn paragraph(&mut self, content: &str) {
        self.begin_line();
        self.push_str("<p>");
        self.push_str(content);
        self.push_str("</p>");
    }

    /// A pre-rendered line emitted verbatim (opaque code-block tokens).
    pub fn raw_line(&mut self, line: &str) {
        self.begin_line();
        self.push_str(line);
    }

    #[inline]
    pub fn blockquote_start(&mut self) {
        self.begin_line();
        self.push_str("<blockquote>");
    }

    #[inline]
    pub fn blockquote_end(&mut self) {
        self.begin_line();
        self.push_str("</blockquote>");
    }

    #[inline]
    pub fn ul_start(&mut self) {
        self.begin_line();
        self.push_str("<ul>");
    }

    #[inline]
    pub fn ul_end(&mut self) {
        self.begin_line();
        self.push_str("</ul>");
    }

    #[inline]
    pub fn ol_start(&mut self) {
        self.begin_line();
        self.push_str("<ol>");
    }

    #[inline]
    pub fn ol_end(&mut self) {
        self.begin_line();
        self.push_str("</ol>");
    }

    /// `<li>content</li>`
    pub fn list_item(&mut self, content: &str) {
        self.begin_line();
        self.push_str("<li>");
        self.push_str(content);
        self.push_str("</li>");
    }

    // --- Tables ---

    /// `<table>` and the header row opener.
    pub fn table_start(&mut self) {
        self.begin_line();
        self.push_str("<table>");
        self.begin_line();
        self.push_str("<thead><tr>");
    }

    /// `<th style="text-align:...">content</th>`
    pub fn table_header_cell(&mut self, align: Alignment, content: &str) {
        self.begin_line();
        self.push_str("<th style=\"text-align:");
        self.push_str(align.css());
        self.push_str("\">");
        self.push_str(content);
        self.push_str("</th>");
    }

    /// Close the header row, open the body.
    pub fn table_head_end(&mut self) {
        self.begin_line();
        self.push_str("</tr></thead>");
        self.begin_line();
        self.push_str("<tbody>");
    }

    #[inline]
    pub fn table_row_start(&mut self) {
        self.begin_line();
        self.push_str("<tr>");
    }

    /// `<td style="text-align:...">content</td>`
    pub fn table_cell(&mut self, align: Alignment, content: &str) {
        self.begin_line();
        self.push_str("<td style=\"text-align:");
        self.push_str(align.css());
        self.push_str("\">");
        self.push_str(content);
        self.push_str("</td>");
    }

    #[inline]
    pub fn table_row_end(&mut self) {
        self.begin_line();
        self.push_str("</tr>");
    }

    #[inline]
    pub fn table_end(&mut self) {
        self.begin_line();
        self.push_str("</tbody></table>");
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
