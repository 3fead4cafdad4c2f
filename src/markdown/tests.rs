//! Tests for markdown normalization and rendering.

use super::*;

#[test]
fn test_normalize_unescapes_entities_and_newlines() {
    let out = normalize("a &#x60;b&grave; \\\"c\\\"\\nd");
    assert_eq!(out, "a `b` \"c\"\nd");
}

#[test]
fn test_normalize_isolates_fences() {
    let out = normalize("Here:```python\nprint(1)```");
    assert_eq!(out, "Here:\n```python\n\nprint(1)\n\n```\n");
}

#[test]
fn test_normalize_drops_leading_fence_language() {
    let out = normalize("```java\nclass A {}\n```");
    assert!(!out.contains("```java"));
}

#[test]
fn test_normalize_collapses_blank_runs() {
    assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
}

#[test]
fn test_render_paragraph_with_line_breaks() {
    let html = render_html("first line\nsecond line\n\nnext paragraph");
    assert_eq!(
        html,
        "<p>first line<br>\nsecond line</p>\n<p>next paragraph</p>"
    );
}

#[test]
fn test_render_code_block_with_language() {
    let html = render_html("Result:\n\n```java\nclass A { int x = 1 < 2; }\n```\n");
    assert!(html.contains(
        "<pre class=\"language-java\"><code class=\"language-java\">class A { int x = 1 &lt; 2; }</code></pre>"
    ));
    assert!(html.starts_with("<p>Result:</p>"));
}

#[test]
fn test_render_code_block_defaults_to_typescript() {
    let html = render_html("see\n```\nconst a = 1;\n```");
    assert!(html.contains("<pre class=\"language-typescript\">"));
}

#[test]
fn test_render_leading_fence_loses_language() {
    let html = render_html("```gherkin\nFeature: Login\n```");
    assert!(html.contains("language-typescript"));
    assert!(html.contains("Feature: Login"));
}

#[test]
fn test_render_unterminated_fence_keeps_code() {
    let blocks = code_blocks("text\n```java\nclass A {}");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].language, "java");
    assert_eq!(blocks[0].code, "class A {}");
}

#[test]
fn test_render_headings_and_lists() {
    let html = render_html("## Steps\n- open page\n- click **Login**\n1. first\n2. second");
    assert!(html.contains("<h2>Steps</h2>"));
    assert!(html.contains("<ul><li>open page</li><li>click <strong>Login</strong></li></ul>"));
    assert!(html.contains("<ol><li>first</li><li>second</li></ol>"));
}

#[test]
fn test_inline_code_and_emphasis_are_escaped() {
    let html = render_html("use `<div>` and *care* & luck");
    assert_eq!(
        html,
        "<p>use <code>&lt;div&gt;</code> and <em>care</em> &amp; luck</p>"
    );
}

#[test]
fn test_lone_asterisk_is_literal() {
    assert_eq!(render_html("2 * 3"), "<p>2 * 3</p>");
}

#[test]
fn test_copy_code_joins_blocks() {
    let reply = "Page:\n```java\nclass P {}\n```\nTest:\n```java\nclass T {}\n```";
    assert_eq!(copy_code(reply).unwrap(), "class P {}\n\nclass T {}");
}

#[test]
fn test_copy_code_none_without_blocks() {
    assert!(copy_code("no code here").is_none());
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html("<a href=\"x\">'&'</a>"),
        "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
    );
}
