//! Cross-check against comrak on the subset where the editor's rules and CommonMark agree.
//!
//! Only element counts are compared: the two renderers differ in whitespace, self-closing
//! syntax and in wrapping blockquote content in `<p>`.

use super::count_tag;
use comrak::{markdown_to_html, ComrakOptions};
use inkdown_babel::to_html;

/// (our tag, comrak's tag)
const TAGS: &[(&str, &str)] = &[
    ("h1", "h1"),
    ("h2", "h2"),
    ("h3", "h3"),
    ("h6", "h6"),
    ("strong", "strong"),
    ("em", "em"),
    ("s", "del"),
    ("code", "code"),
    ("pre", "pre"),
    ("ul", "ul"),
    ("ol", "ol"),
    ("li", "li"),
    ("blockquote", "blockquote"),
    ("a", "a"),
    ("img", "img"),
    ("hr", "hr"),
];

const DOCUMENTS: &[&str] = &[
    "# A\n\n## B\n\n### C\n\n###### F",
    "**bold** and *italic* and ~~gone~~",
    "***both*** then `code` with **`bold code`**",
    "*a***b** and ***c** d*",
    "- a\n- b\n  - c\n\n1. x\n2. y",
    "> quoted **text**",
    "before\n\n---\n\nafter",
    "![alt](u.png) and [link](https://x.dev)",
    "```rust\nlet x = *y;\n```",
    "```\n# not a heading\n- not a list\n```",
    "`**literal**` and \\*escaped\\*",
];

fn comrak_html(md: &str) -> String {
    let mut options = ComrakOptions::default();
    options.extension.strikethrough = true;
    markdown_to_html(md, &options)
}

#[test]
fn test_element_counts_match_commonmark() {
    for md in DOCUMENTS {
        let ours = to_html(md);
        let reference = comrak_html(md);
        for (tag, reference_tag) in TAGS {
            assert_eq!(
                count_tag(&ours, tag),
                count_tag(&reference, reference_tag),
                "<{tag}> count differs for {md:?}\nours: {ours}\ncomrak: {reference}"
            );
        }
    }
}
