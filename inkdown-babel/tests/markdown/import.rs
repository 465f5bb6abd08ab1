//! Import tests for Markdown format (Markdown → rich HTML)

use super::{count_tag, fixture};
use inkdown_babel::format::Format;
use inkdown_babel::formats::markdown::{MarkdownFormat, MarkdownOptions};
use inkdown_babel::{to_html, to_html_raw, to_html_with_options, FormatError};
use insta::assert_snapshot;

#[test]
fn test_heading_levels_round_trip() {
    for (md, tag, text) in [("# A", "h1", "A"), ("## B", "h2", "B"), ("### C", "h3", "C")] {
        let html = to_html(md);
        assert_eq!(count_tag(&html, tag), 1, "{md} -> {html}");
        assert!(html.contains(&format!("<{tag}>{text}</{tag}>")));
        for other in ["h1", "h2", "h3", "h4", "h5", "h6"] {
            if other != tag {
                assert_eq!(count_tag(&html, other), 0);
            }
        }
    }
}

#[test]
fn test_code_fence_opacity() {
    let html = to_html("```\n**not bold**\n```");
    assert_eq!(count_tag(&html, "strong"), 0);
    assert!(html.contains("<code>**not bold**</code>"));
}

#[test]
fn test_list_wrapping_exclusivity() {
    let html = to_html("- a\n- b");
    assert_eq!(count_tag(&html, "ul"), 1);
    assert_eq!(count_tag(&html, "li"), 2);
    assert_eq!(count_tag(&html, "ol"), 0);

    let html = to_html("1. a\n2. b");
    assert_eq!(count_tag(&html, "ol"), 1);
    assert_eq!(count_tag(&html, "li"), 2);
    assert_eq!(count_tag(&html, "ul"), 0);
}

#[test]
fn test_image_precedence_over_link() {
    let html = to_html("![alt](u)");
    assert_eq!(count_tag(&html, "img"), 1);
    assert_eq!(count_tag(&html, "a"), 0);
    assert!(!html.contains('!'));
}

#[test]
fn test_absent_input_is_rejected() {
    assert!(matches!(to_html_raw(None), Err(FormatError::InvalidInput(_))));
    assert!(matches!(
        to_html_raw(Some(&[0xc3, 0x28][..])),
        Err(FormatError::InvalidInput(_))
    ));
    assert_eq!(to_html_raw(Some("# A".as_bytes())).unwrap(), "<h1>A</h1>");
}

#[test]
fn test_small_document() {
    let html = to_html("# Title\n\nIntro with **bold**.\n\n- a\n  - b\n\n> quote");
    assert_snapshot!(html, @r###"
    <h1>Title</h1>
    <p>Intro with <strong>bold</strong>.</p>
    <ul><li>a<ul><li>b</li></ul></li></ul>
    <blockquote>quote</blockquote>
    "###);
}

#[test]
fn test_kitchensink_structure() {
    let html = to_html(&fixture("kitchensink.md"));

    assert_eq!(count_tag(&html, "h1"), 1);
    assert_eq!(count_tag(&html, "h2"), 4);
    assert_eq!(count_tag(&html, "h3"), 1);
    assert_eq!(count_tag(&html, "ul"), 4);
    assert_eq!(count_tag(&html, "ol"), 1);
    assert_eq!(count_tag(&html, "blockquote"), 1);
    assert_eq!(count_tag(&html, "pre"), 2);
    assert_eq!(count_tag(&html, "hr"), 1);
    assert_eq!(count_tag(&html, "img"), 1);
    assert_eq!(count_tag(&html, "a"), 1);

    // Escaped markers and fenced content are literal.
    assert!(html.contains("2 * 3, [not a link](x), `tick`."));
    assert!(html.contains("println!(\"**not bold**\");"));
    assert!(html.contains("<pre><code>```\nfenced fence\n```</code></pre>"));
}

#[test]
fn test_heading_ids_option() {
    let options = MarkdownOptions {
        heading_ids: true,
        ..MarkdownOptions::default()
    };
    let html = to_html_with_options("# Getting Started\n\n## 日本語 の 見出し", &options);
    assert_eq!(
        html,
        "<h1 id=\"getting-started\">Getting Started</h1>\n<h2 id=\"日本語-の-見出し\">日本語 の 見出し</h2>"
    );
}

#[test]
fn test_format_trait_parse() {
    let doc = MarkdownFormat::default().parse("Some *text*").unwrap();
    assert_eq!(doc.as_str(), "<p>Some <em>text</em></p>");
}

#[test]
fn test_seven_hashes_is_a_paragraph() {
    assert_eq!(to_html("####### x"), "<p>####### x</p>");
}

#[test]
fn test_html_in_markdown_is_escaped() {
    assert_eq!(
        to_html("<script>alert(1)</script>"),
        "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
    );
}
