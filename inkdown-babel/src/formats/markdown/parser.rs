//! Markdown parsing (Markdown → rich HTML)
//!
//! Line-oriented block parser. Each line is classified in a fixed order:
//! fenced code first (so nothing inside a fence is ever interpreted), then
//! headings, horizontal rules, blockquotes and list items. Anything else is
//! paragraph text. Inline content of every block goes through
//! [`render_inline`](super::inline::render_inline).
//!
//! Blocks are emitted one per output line; list and blockquote markup is kept
//! on a single line so the editor's loader sees no stray whitespace nodes.

use super::inline::render_inline;
use super::MarkdownOptions;
use crate::common::escape::{escape_attribute, escape_html, html_text};
use crate::common::slug::slug;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}) (.*)$").unwrap());
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)(?:(-)|([0-9]{1,9})\.) (.*)$").unwrap());

/// Convert Markdown text to a rich HTML fragment.
pub fn parse_from_markdown(source: &str, options: &MarkdownOptions) -> String {
    let lines: Vec<&str> = source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    BlockParser { options }.parse(&lines).join("\n")
}

struct Fence<'a> {
    len: usize,
    language: Option<&'a str>,
}

struct ListLine<'a> {
    indent: usize,
    ordered: bool,
    text: &'a str,
}

struct BlockParser<'o> {
    options: &'o MarkdownOptions,
}

impl BlockParser<'_> {
    fn parse(&self, lines: &[&str]) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if let Some(fence) = fence_open(line) {
                let (block, next) = self.code_block(&lines[i + 1..], &fence);
                blocks.push(block);
                i += 1 + next;
            } else if line.trim().is_empty() {
                i += 1;
            } else if let Some(block) = self.heading(line) {
                blocks.push(block);
                i += 1;
            } else if is_rule(line) {
                blocks.push("<hr>".to_string());
                i += 1;
            } else if quote_content(line).is_some() {
                let inner: Vec<&str> = lines[i..]
                    .iter()
                    .map_while(|l| quote_content(l))
                    .collect();
                i += inner.len();
                blocks.push(self.blockquote(&inner));
            } else if list_line(line).is_some() {
                let items: Vec<ListLine> = lines[i..].iter().map_while(|l| list_line(l)).collect();
                i += items.len();
                blocks.push(render_lists(&items));
            } else {
                let start = i;
                while i < lines.len() && !lines[i].trim().is_empty() && !starts_block(lines[i]) {
                    i += 1;
                }
                // The first line never starts a block, so the paragraph is non-empty.
                blocks.push(paragraph(&lines[start..i]));
            }
        }

        blocks
    }

    /// Returns the rendered block and the number of lines consumed after the
    /// opening fence. An unclosed fence runs to the end of the input.
    fn code_block(&self, rest: &[&str], fence: &Fence<'_>) -> (String, usize) {
        let close = rest.iter().position(|line| is_fence_close(line, fence.len));
        let body = &rest[..close.unwrap_or(rest.len())];
        let consumed = close.map_or(rest.len(), |c| c + 1);

        let content = escape_html(&body.join("\n"));
        let open = match fence.language {
            Some(lang) if self.options.code_language => {
                format!("<pre><code class=\"language-{}\">", escape_attribute(lang))
            }
            _ => "<pre><code>".to_string(),
        };
        (format!("{open}{content}</code></pre>"), consumed)
    }

    fn heading(&self, line: &str) -> Option<String> {
        let caps = HEADING.captures(line)?;
        let level = caps[1].len();
        let content = render_inline(caps[2].trim());
        if self.options.heading_ids {
            let id = slug(&html_text(&content));
            Some(format!("<h{level} id=\"{id}\">{content}</h{level}>"))
        } else {
            Some(format!("<h{level}>{content}</h{level}>"))
        }
    }

    fn blockquote(&self, inner: &[&str]) -> String {
        let blocks = self.parse(inner);
        let body = match blocks.as_slice() {
            [single] if single.starts_with("<p>") && single.ends_with("</p>") => {
                single["<p>".len()..single.len() - "</p>".len()].to_string()
            }
            _ => blocks.concat(),
        };
        format!("<blockquote>{body}</blockquote>")
    }
}

fn paragraph(lines: &[&str]) -> String {
    let text: Vec<&str> = lines.iter().map(|line| line.trim()).collect();
    format!("<p>{}</p>", render_inline(&text.join("\n")))
}

fn fence_open(line: &str) -> Option<Fence<'_>> {
    let trimmed = line.trim_start();
    let len = trimmed.chars().take_while(|&c| c == '`').count();
    if len < 3 {
        return None;
    }
    let info = trimmed[len..].trim();
    if info.contains('`') {
        return None;
    }
    Some(Fence {
        len,
        language: info.split_whitespace().next(),
    })
}

fn is_fence_close(line: &str, len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= len && trimmed.chars().all(|c| c == '`')
}

fn is_rule(line: &str) -> bool {
    line.trim_end() == "---"
}

fn quote_content(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

fn list_line(line: &str) -> Option<ListLine<'_>> {
    let caps = LIST_ITEM.captures(line)?;
    let indent = caps[1]
        .chars()
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum();
    let text = caps.get(4).map_or("", |m| m.as_str());
    Some(ListLine {
        indent,
        ordered: caps.get(3).is_some(),
        text,
    })
}

/// Whether a line interrupts a running paragraph.
fn starts_block(line: &str) -> bool {
    fence_open(line).is_some()
        || HEADING.is_match(line)
        || is_rule(line)
        || quote_content(line).is_some()
        || list_line(line).is_some()
}

/// Render a run of list lines as one or more sibling lists.
fn render_lists(items: &[ListLine<'_>]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < items.len() {
        i += render_list(&items[i..], &mut out);
    }
    out
}

/// Render the list opened by `items[0]`. Returns the number of lines consumed.
///
/// Deeper-indented lines nest inside the preceding item. A line at the same
/// indentation with the other marker kind closes the list, as does a line
/// indented less than the first one.
fn render_list(items: &[ListLine<'_>], out: &mut String) -> usize {
    let base = items[0].indent;
    let ordered = items[0].ordered;
    let tag = if ordered { "ol" } else { "ul" };

    out.push_str(&format!("<{tag}>"));
    let mut i = 0;
    while i < items.len() && items[i].indent == base && items[i].ordered == ordered {
        out.push_str("<li>");
        out.push_str(&render_inline(items[i].text.trim()));
        i += 1;
        while i < items.len() && items[i].indent > base {
            i += render_list(&items[i..], out);
        }
        out.push_str("</li>");
    }
    out.push_str(&format!("</{tag}>"));
    i
}
