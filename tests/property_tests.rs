//! Property tests: the engine is total and never leaks placeholder tokens.

use mathdown::to_html;
use proptest::prelude::*;

proptest! {
    /// Any input produces some output without panicking.
    #[test]
    fn engine_is_total(input in any::<String>()) {
        let _ = to_html(&input);
    }

    /// Inputs dense in metacharacters exercise every scanner.
    #[test]
    fn metacharacter_soup_is_total(input in "[-*_#>|$`\\[\\]()!.\"' a-z0-9\n]{0,300}") {
        let _ = to_html(&input);
    }

    /// No placeholder token survives restoration for inputs that do not
    /// themselves contain the sentinel byte.
    #[test]
    fn no_sentinel_leak(input in "[^\u{1a}]{0,300}") {
        let html = to_html(&input);
        prop_assert!(
            !html.contains('\u{1a}'),
            "token leaked for input {input:?}: {html:?}"
        );
    }

    /// Inputs that do contain sentinel bytes get them back verbatim.
    #[test]
    fn sentinel_bytes_round_trip(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
        let input = format!("{prefix}\u{1a}{suffix}");
        let html = to_html(&input);
        prop_assert!(html.contains('\u{1a}'), "literal sentinel lost: {html:?}");
    }

    /// Plain single-line prose comes back as exactly one paragraph.
    #[test]
    fn plain_prose_is_one_paragraph(text in "[a-z]{1,10}( [a-z]{1,10}){0,5}") {
        prop_assert_eq!(to_html(&text), format!("<p>{text}</p>"));
    }

    /// Lists of plain items always produce balanced list markup.
    #[test]
    fn lists_are_balanced(items in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let input: String = items.iter().map(|i| format!("- {i}\n")).collect();
        let html = to_html(&input);
        prop_assert_eq!(html.matches("<ul>").count(), 1);
        prop_assert_eq!(html.matches("</ul>").count(), 1);
        prop_assert_eq!(html.matches("<li>").count(), items.len());
    }
}
