use mathdown::{to_html, to_html_with_options, Options};

fn html_without_ids(input: &str) -> String {
    let options = Options {
        heading_anchors: false,
        ..Options::default()
    };
    to_html_with_options(input, &options)
}

#[test]
fn basic_heading_id() {
    assert_eq!(to_html("# Hello World"), "<h1 id=\"hello-world\">Hello World</h1>");
}

#[test]
fn all_levels() {
    for level in 1..=6 {
        let input = format!("{} Test Heading", "#".repeat(level));
        let html = to_html(&input);
        assert!(
            html.contains(&format!("<h{level} id=\"test-heading\">Test Heading</h{level}>")),
            "Level {level}: {html}"
        );
    }
}

#[test]
fn seven_hashes_is_a_paragraph() {
    let html = to_html("####### Nope");
    assert!(html.starts_with("<p>"), "Got: {html}");
}

#[test]
fn missing_space_is_a_paragraph() {
    let html = to_html("#Nope");
    assert_eq!(html, "<p>#Nope</p>");
}

#[test]
fn heading_with_emphasis() {
    let html = to_html("## Hello **World**");
    assert!(html.contains("id=\"hello-world\""), "Got: {html}");
    assert!(html.contains("Hello <strong>World</strong>"), "Got: {html}");
}

#[test]
fn heading_with_code_span() {
    // The code span is a protected token during slugging and contributes
    // nothing to the anchor.
    let html = to_html("## The `render` function");
    assert!(html.contains("id=\"the-function\""), "Got: {html}");
    assert!(html.contains("The <code>render</code> function"), "Got: {html}");
}

#[test]
fn duplicate_headings_deduplicate() {
    let html = to_html("# Hello\n\n# Hello\n\n# Hello");
    assert!(html.contains("id=\"hello\""), "Got: {html}");
    assert!(html.contains("id=\"hello-1\""), "Got: {html}");
    assert!(html.contains("id=\"hello-2\""), "Got: {html}");
}

#[test]
fn punctuation_stripped_from_id() {
    let html = to_html("# Hello, World! (2024)");
    assert!(html.contains("id=\"hello-world-2024\""), "Got: {html}");
}

#[test]
fn unicode_preserved_in_id() {
    let html = to_html("# Héllo Wörld");
    assert!(html.contains("id=\"héllo-wörld\""), "Got: {html}");
}

#[test]
fn symbol_only_heading_gets_fallback_id() {
    let html = to_html("# !!!");
    assert!(html.contains("id=\"heading\""), "Got: {html}");
}

#[test]
fn anchors_disabled() {
    let html = html_without_ids("# Hello World");
    assert_eq!(html, "<h1>Hello World</h1>");
}

#[test]
fn heading_closes_open_contexts() {
    let html = to_html("- item\n# Title");
    assert_eq!(
        html,
        "<ul>\n<li>item</li>\n</ul>\n<h1 id=\"title\">Title</h1>"
    );
}

#[test]
fn typography_applies_inside_heading() {
    let html = to_html("# Before --- After");
    assert!(html.contains("Before \u{2014} After"), "Got: {html}");
    assert!(html.contains("id=\"before-after\""), "Got: {html}");
}
