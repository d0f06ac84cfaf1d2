//! Block parser: a line-oriented state machine.
//!
//! One pass over the protected text, one line of lookahead (used only to spot
//! table separator rows). At most one block context — a list or a blockquote
//! — is open at a time; opening a different kind closes the previous one
//! first, and blank lines close nothing (contexts end at the next
//! non-matching content line or EOF).

use smallvec::SmallVec;

use super::line::{self, Alignment, LineKind};
use crate::inline;
use crate::render::HtmlWriter;
use crate::slug::SlugSet;
use crate::Options;

/// Which list element is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ListState {
    #[default]
    None,
    Unordered,
    Ordered,
}

/// Block parser state.
pub struct BlockParser<'a> {
    options: &'a Options,
    list: ListState,
    in_quote: bool,
    slugs: SlugSet,
}

impl<'a> BlockParser<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            list: ListState::None,
            in_quote: false,
            slugs: SlugSet::new(),
        }
    }

    /// Parse the protected text and emit block markup into `writer`.
    pub fn parse(&mut self, text: &str, writer: &mut HtmlWriter) {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            match line::classify(line) {
                LineKind::Blank => i += 1,
                LineKind::Rule => {
                    self.close_list(writer);
                    self.close_quote(writer);
                    writer.hr();
                    i += 1;
                }
                LineKind::Heading { level, content } => {
                    self.close_list(writer);
                    self.close_quote(writer);
                    let body = inline::format(content, self.options);
                    if self.options.heading_anchors {
                        // The id comes from the raw content; tokens and
                        // markup are stripped by the slugger.
                        let id = self.slugs.assign(content);
                        writer.heading(level, Some(id.as_str()), &body);
                    } else {
                        writer.heading(level, None, &body);
                    }
                    i += 1;
                }
                LineKind::Quote { content } => {
                    self.close_list(writer);
                    if !self.in_quote {
                        writer.blockquote_start();
                        self.in_quote = true;
                    }
                    if !content.trim().is_empty() {
                        writer.paragraph(&inline::format(content, self.options));
                    }
                    i += 1;
                }
                LineKind::UnorderedItem { content } => {
                    self.close_quote(writer);
                    if self.list != ListState::Unordered {
                        self.close_list(writer);
                        writer.ul_start();
                        self.list = ListState::Unordered;
                    }
                    writer.list_item(&inline::format(content, self.options));
                    i += 1;
                }
                LineKind::OrderedItem { content } => {
                    self.close_quote(writer);
                    if self.list != ListState::Ordered {
                        self.close_list(writer);
                        writer.ol_start();
                        self.list = ListState::Ordered;
                    }
                    writer.list_item(&inline::format(content, self.options));
                    i += 1;
                }
                LineKind::OpaqueBlock => {
                    self.close_list(writer);
                    self.close_quote(writer);
                    writer.raw_line(line);
                    i += 1;
                }
                LineKind::Text => {
                    self.close_list(writer);
                    self.close_quote(writer);
                    if line.contains('|')
                        && i + 1 < lines.len()
                        && line::is_table_separator(lines[i + 1])
                    {
                        i = self.emit_table(&lines, i, writer);
                    } else {
                        writer.paragraph(&inline::format(line, self.options));
                        i += 1;
                    }
                }
            }
        }
        self.close_list(writer);
        self.close_quote(writer);
    }

    /// Emit a table starting at `lines[start]` (header) with the separator on
    /// the next line. Returns the index after the last consumed row.
    fn emit_table(&mut self, lines: &[&str], start: usize, writer: &mut HtmlWriter) -> usize {
        let aligns: SmallVec<[Alignment; 8]> = line::separator_alignments(lines[start + 1]);
        writer.table_start();
        for (col, cell) in line::split_pipe_row(lines[start]).iter().enumerate() {
            // Columns past the separator's width fall back to left.
            let align = aligns.get(col).copied().unwrap_or_default();
            writer.table_header_cell(align, &inline::format(cell.trim(), self.options));
        }
        writer.table_head_end();

        let mut i = start + 2;
        while i < lines.len() && lines[i].contains('|') {
            writer.table_row_start();
            for (col, cell) in line::split_pipe_row(lines[i]).iter().enumerate() {
                let align = aligns.get(col).copied().unwrap_or_default();
                writer.table_cell(align, &inline::format(cell.trim(), self.options));
            }
            writer.table_row_end();
            i += 1;
        }
        writer.table_end();
        i
    }

    fn close_list(&mut self, writer: &mut HtmlWriter) {
        match self.list {
            ListState::None => {}
            ListState::Unordered => writer.ul_end(),
            ListState::Ordered => writer.ol_end(),
        }
        self.list = ListState::None;
    }

    fn close_quote(&mut self, writer: &mut HtmlWriter) {
        if self.in_quote {
            writer.blockquote_end();
            self.in_quote = false;
        }
    }
}
