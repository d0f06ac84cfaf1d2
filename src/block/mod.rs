//! Block-level parsing.
//!
//! Line classification lives in [`line`]; the state machine that walks the
//! document and emits markup lives in [`parser`]. Handled blocks:
//! - horizontal rules
//! - ATX headings (with anchor ids)
//! - blockquotes
//! - unordered and ordered lists
//! - pipe tables (with per-column alignment)
//! - paragraphs and opaque code-block lines
//!
//! Nested block structures are out of scope by construction: a list marker
//! inside a blockquote is quoted paragraph text, not a nested list.

mod line;
mod parser;

pub use line::{classify, is_table_separator, separator_alignments, split_pipe_row, Alignment, LineKind};
pub use parser::BlockParser;
