//! Round-trip tests: Markdown → HTML → Markdown and HTML → Markdown → HTML.

use super::fixture;
use inkdown_babel::{to_html, to_markdown};

fn markdown_cycle(md: &str) -> String {
    to_markdown(&to_html(md)).expect("default options never reject")
}

#[test]
fn test_kitchensink_is_a_fixed_point() {
    let md = fixture("kitchensink.md");
    assert_eq!(markdown_cycle(&md), md.trim_end());
}

#[test]
fn test_html_stabilizes_after_one_cycle() {
    let documents = [
        "<h1>A</h1><p>x <b>y</b> <i>z</i></p>",
        "<ul><li>one<ol><li>two</li></ol></li></ul>",
        "<p>line<br>break</p><blockquote><p>q1</p><p>q2</p></blockquote>",
        "<p>Wow!<a href=\"/x\">link</a> and <img src=\"a b.png\" alt=\"[alt]\"></p>",
        "<pre><code>```\ninner\n```</code></pre><p><code>`tick`</code></p>",
        "<div>loose <span>text</span></div><p>1. literal</p>",
    ];
    for html in documents {
        let once = to_html(&to_markdown(html).unwrap());
        let twice = to_html(&to_markdown(&once).unwrap());
        assert_eq!(once, twice, "not stable for {html}");
    }
}

#[test]
fn test_escaped_characters_survive() {
    for text in ["2 * 3 * 4", "# hash", "[brackets]", "a \\ b", "`tick`", "~~not struck~~"] {
        let html = format!("<p>{text}</p>");
        let md = to_markdown(&html).unwrap();
        assert_eq!(to_html(&md), html, "markdown was {md:?}");
    }
}

#[test]
fn test_nested_list_round_trip() {
    let md = "- a\n  - b\n    - c\n  - d\n- e\n\n1. x\n2. y\n   1. z";
    assert_eq!(markdown_cycle(md), md);
}

#[test]
fn test_code_span_with_backticks_round_trip() {
    let html = "<p><code>a``b</code> and <code>`</code></p>";
    let md = to_markdown(html).unwrap();
    assert_eq!(md, "```a``b``` and `` ` ``");
    assert_eq!(to_html(&md), html);
}

#[test]
fn test_code_block_keeps_blank_lines() {
    let md = "```\na\n\n\n\nb\n```";
    assert_eq!(markdown_cycle(md), md);
}

#[test]
fn test_adjacent_emphasis_round_trip() {
    for html in [
        "<p><em>a</em><strong>b</strong></p>",
        "<p><strong>a</strong><em>b</em></p>",
        "<p><em>a</em><s>b</s></p>",
    ] {
        let md = to_markdown(html).unwrap();
        assert_eq!(to_html(&md), html, "markdown was {md:?}");
    }
}

#[test]
fn test_nested_emphasis_round_trip() {
    for html in [
        "<p><em><strong>a</strong> b</em></p>",
        "<p><strong><em>a</em> b</strong></p>",
        "<p><em>a <strong>b</strong></em></p>",
        "<p><strong>x<em>y</em></strong></p>",
        "<p><em><s>x</s></em></p>",
    ] {
        let md = to_markdown(html).unwrap();
        assert_eq!(to_html(&md), html, "markdown was {md:?}");
    }
}

#[test]
fn test_same_kind_emphasis_stabilizes() {
    for html in [
        "<p><em>a</em><em>b</em></p>",
        "<p><strong>a</strong><strong>b</strong></p>",
        "<p><em><em>a</em> b</em></p>",
        "<p><em><strong>a</strong></em></p>",
    ] {
        let once = to_html(&to_markdown(html).unwrap());
        let twice = to_html(&to_markdown(&once).unwrap());
        assert_eq!(once, twice, "not stable for {html}");
    }
}

#[test]
fn test_backslash_in_href_survives() {
    let html = "<p><a href=\"a\\*b\">t</a> <img src=\"c:\\x.png\" alt=\"x\"></p>";
    let md = to_markdown(html).unwrap();
    assert_eq!(to_html(&md), html, "markdown was {md:?}");
}
