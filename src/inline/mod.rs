//! Inline formatting, applied per emitted text run.
//!
//! Pass order is load-bearing:
//! 1. images, then links, are lifted into a run-local table — URLs and link
//!    text must survive the later passes byte-for-byte
//! 2. smart typography (optional)
//! 3. bold, then italic
//! 4. the link table substitutes back
//!
//! Protected-span tokens from stage 1 flow through every pass untouched;
//! none of the trigger bytes below can occur inside a token.

mod emphasis;
mod links;
mod typography;

use crate::Options;

/// Format one text run.
pub fn format(text: &str, options: &Options) -> String {
    if !has_inline_triggers(text) {
        return text.to_owned();
    }
    let mut table = links::LinkTable::new();
    let mut s = table.extract_images(text);
    s = table.extract_links(&s);
    if options.smart_typography {
        s = typography::apply(&s);
    }
    s = emphasis::bold(&s);
    s = emphasis::italic(&s);
    table.restore(s)
}

/// Cheap pre-scan: bytes that can begin any inline rewrite.
fn has_inline_triggers(text: &str) -> bool {
    text.bytes()
        .any(|b| matches!(b, b'!' | b'[' | b'*' | b'_' | b'-' | b'.' | b'"' | b'\''))
}
