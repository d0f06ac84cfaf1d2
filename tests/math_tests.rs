use mathdown::to_html;

// Math is opaque to the engine: it must reach the downstream renderer
// byte-for-byte, delimiters included, with no escaping and no substitutions.

#[test]
fn inline_math_verbatim() {
    let html = to_html("The identity $x^2+1$ holds.");
    assert!(html.contains("$x^2+1$"), "Got: {html}");
}

#[test]
fn inline_math_is_not_escaped() {
    let html = to_html("$a < b$ and $c & d$");
    assert!(html.contains("$a < b$"), "Got: {html}");
    assert!(html.contains("$c & d$"), "Got: {html}");
}

#[test]
fn inline_math_protected_from_emphasis() {
    let html = to_html("$a_1 * b_2 * c$");
    assert!(html.contains("$a_1 * b_2 * c$"), "Got: {html}");
    assert!(!html.contains("<em>"), "Got: {html}");
}

#[test]
fn inline_math_protected_from_typography() {
    let html = to_html("$x_{n---1}$");
    assert!(html.contains("$x_{n---1}$"), "Got: {html}");
}

#[test]
fn display_math_verbatim() {
    let html = to_html("$$E = mc^2$$");
    assert!(html.contains("$$E = mc^2$$"), "Got: {html}");
}

#[test]
fn display_math_spans_lines() {
    let html = to_html("$$\n\\int_0^1 x\\,dx\n$$");
    assert!(html.contains("$$\n\\int_0^1 x\\,dx\n$$"), "Got: {html}");
}

#[test]
fn display_math_block_becomes_paragraph() {
    let html = to_html("$$\nx^2\n$$");
    assert!(html.starts_with("<p>"), "Got: {html}");
    assert!(html.ends_with("</p>"), "Got: {html}");
}

#[test]
fn dollar_amounts_stay_literal() {
    let html = to_html("I paid $5 for it.");
    assert!(html.contains("$5"), "Got: {html}");
}

#[test]
fn two_amounts_on_one_line_do_pair() {
    // Two bare dollars on one line form a span; this is the documented
    // dialect, amounts need escaping or separation.
    let html = to_html("$5 and $6");
    assert!(html.contains("$5 and $"), "Got: {html}");
}

#[test]
fn unterminated_math_stays_literal() {
    let html = to_html("lonely $x forever");
    assert_eq!(html, "<p>lonely $x forever</p>");
}

#[test]
fn math_does_not_cross_lines() {
    let html = to_html("a $x\ny$ b");
    assert!(html.contains("<p>a $x</p>"), "Got: {html}");
    assert!(html.contains("<p>y$ b</p>"), "Got: {html}");
}

#[test]
fn adjacent_dollars_are_not_inline_math() {
    let html = to_html("$$$");
    assert!(html.contains("$$$"), "Got: {html}");
}

#[test]
fn code_span_wins_over_math() {
    let html = to_html("`$x$`");
    assert_eq!(html, "<p><code>$x$</code></p>");
}

#[test]
fn math_inside_code_fence_is_code() {
    let html = to_html("```\n$x^2$\n```");
    assert_eq!(html, "<pre><code>$x^2$</code></pre>");
}

#[test]
fn backtick_span_inside_display_math_restores() {
    let html = to_html("$$a `b` c$$");
    assert!(html.contains("$$a <code>b</code> c$$"), "Got: {html}");
}

#[test]
fn math_in_list_items_and_headings() {
    let html = to_html("# On $x^2$\n\n- first $a+b$\n- second");
    assert!(html.contains("$x^2$"), "Got: {html}");
    assert!(html.contains("<li>first $a+b$</li>"), "Got: {html}");
    // The math token contributes nothing to the heading id.
    assert!(html.contains("<h1 id=\"on\">"), "Got: {html}");
}
