//! Markdown serialization (rich HTML → Markdown)
//!
//! The fragment is parsed with html5ever and walked top-down. Block elements
//! become blank-line separated Markdown blocks; loose inline content at block
//! level is gathered into a paragraph. Text that the parser would read back
//! as syntax is backslash-escaped, so that `to_html(to_markdown(x))` is stable
//! after one cycle.

use super::{MarkdownOptions, UnsupportedTagPolicy};
use crate::common::escape::{escape_line_start, escape_markdown, escape_url};
use crate::error::FormatError;
use crate::formats::html::dom::{
    attr, body, element_name, find_unsupported, is_supported, parse_fragment, text_content,
};
use markup5ever_rcdom::{Handle, NodeData};
use std::cell::Cell;

/// Elements that always produce a block of their own.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "pre", "ul", "ol", "li", "blockquote", "hr",
];

/// Unsupported elements that browsers lay out as blocks. Their text is kept as
/// a paragraph instead of running into its neighbours.
const LAYOUT_TAGS: &[&str] = &[
    "div", "section", "article", "header", "footer", "main", "nav", "aside", "figure",
    "figcaption", "table", "thead", "tbody", "tr", "dl", "dt", "dd", "address", "details",
    "summary",
];

/// Elements whose content is never text.
const DROPPED_TAGS: &[&str] = &["head", "script", "style", "template", "noscript"];

/// Emphasis kinds, as bits of [`MarkdownWriter::open`].
const STRONG: u8 = 1;
const EM: u8 = 2;
const STRIKE: u8 = 4;

/// Serialize a rich HTML fragment to Markdown.
pub fn serialize_to_markdown(html: &str, options: &MarkdownOptions) -> Result<String, FormatError> {
    let dom = parse_fragment(html);

    if options.unsupported_tags == UnsupportedTagPolicy::Reject {
        if let Some(tag) = find_unsupported(&dom.document) {
            return Err(FormatError::UnsupportedMarkup(tag));
        }
    }

    let writer = MarkdownWriter {
        options,
        open: Cell::new(0),
    };
    let markdown = writer.blocks(&body(&dom)).join("\n\n");
    Ok(markdown.trim().to_string())
}

struct MarkdownWriter<'o> {
    options: &'o MarkdownOptions,
    /// Emphasis kinds enclosing the node being written.
    open: Cell<u8>,
}

impl MarkdownWriter<'_> {
    fn blocks(&self, parent: &Handle) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut run = String::new();

        for child in parent.children.borrow().iter() {
            let Some(tag) = element_name(child) else {
                append_inline(&mut run, &self.inline(child));
                continue;
            };

            let block = match tag {
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.heading(child, &tag[1..]),
                "p" => paragraph(&self.inline_children(child)),
                "pre" => self.code_block(child),
                "ul" | "ol" => self.list(child, 0),
                "blockquote" => self.blockquote(child),
                "hr" => "---".to_string(),
                _ if DROPPED_TAGS.contains(&tag) => continue,
                "li" | "html" | "body" => {
                    flush_paragraph(&mut blocks, &mut run);
                    blocks.extend(self.blocks(child));
                    continue;
                }
                _ if !is_supported(tag) && has_block_descendant(child) => {
                    flush_paragraph(&mut blocks, &mut run);
                    blocks.extend(self.blocks(child));
                    continue;
                }
                _ if LAYOUT_TAGS.contains(&tag) => paragraph(&self.inline_children(child)),
                _ => {
                    append_inline(&mut run, &self.inline(child));
                    continue;
                }
            };

            flush_paragraph(&mut blocks, &mut run);
            if !block.is_empty() {
                blocks.push(block);
            }
        }

        flush_paragraph(&mut blocks, &mut run);
        blocks
    }

    fn heading(&self, node: &Handle, level: &str) -> String {
        let level = level.parse::<usize>().unwrap_or(1);
        let text = self.inline_children(node).replace('\n', " ");
        let text = text.trim();
        if text.is_empty() {
            return String::new();
        }
        format!("{} {}", "#".repeat(level), text)
    }

    fn code_block(&self, pre: &Handle) -> String {
        let content = text_content(pre);
        let fence = "`".repeat((longest_run(&content, '`') + 1).max(3));
        let language = if self.options.code_language {
            code_language(pre).unwrap_or_default()
        } else {
            String::new()
        };

        if content.is_empty() {
            format!("{fence}{language}\n{fence}")
        } else {
            format!("{fence}{language}\n{content}\n{fence}")
        }
    }

    /// Render a list whose markers start at column `indent`.
    fn list(&self, list: &Handle, indent: usize) -> String {
        let ordered = element_name(list) == Some("ol");
        let mut lines = Vec::new();
        let mut number = 0;

        for item in list.children.borrow().iter() {
            if element_name(item) != Some("li") {
                continue;
            }
            number += 1;
            let marker = if ordered {
                format!("{number}. ")
            } else {
                "- ".to_string()
            };

            let (text, nested) = self.list_item(item);
            lines.push(format!("{}{marker}{text}", " ".repeat(indent)));
            for sublist in nested {
                let rendered = self.list(&sublist, indent + marker.len());
                if !rendered.is_empty() {
                    lines.push(rendered);
                }
            }
        }

        lines.join("\n")
    }

    /// The single-line text of an item, plus the lists nested inside it.
    fn list_item(&self, item: &Handle) -> (String, Vec<Handle>) {
        let mut parts = Vec::new();
        let mut run = String::new();
        let mut nested = Vec::new();

        for child in item.children.borrow().iter() {
            match element_name(child) {
                Some("ul") | Some("ol") => nested.push(child.clone()),
                Some(tag) if BLOCK_TAGS.contains(&tag) || LAYOUT_TAGS.contains(&tag) => {
                    parts.push(std::mem::take(&mut run));
                    parts.push(self.inline_children(child));
                }
                _ => append_inline(&mut run, &self.inline(child)),
            }
        }
        parts.push(run);

        let text = parts
            .iter()
            .map(|part| part.replace('\n', " ").trim().to_string())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (text, nested)
    }

    fn blockquote(&self, node: &Handle) -> String {
        let inner = self.blocks(node).join("\n\n");
        inner
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn inline_children(&self, node: &Handle) -> String {
        let mut out = String::new();
        for child in node.children.borrow().iter() {
            append_inline(&mut out, &self.inline(child));
        }
        out
    }

    fn inline(&self, node: &Handle) -> String {
        match &node.data {
            NodeData::Text { contents } => escape_markdown(&collapse_whitespace(&contents.borrow())),
            NodeData::Element { .. } => match element_name(node).unwrap_or_default() {
                "strong" | "b" => self.emphasis(node, STRONG, "**"),
                "em" | "i" => self.emphasis(node, EM, "*"),
                "s" | "del" | "strike" => self.emphasis(node, STRIKE, "~~"),
                "code" => code_span(&text_content(node)),
                "a" => self.link(node),
                "img" => image(node),
                "br" => "\n".to_string(),
                "hr" => String::new(),
                tag if DROPPED_TAGS.contains(&tag) => String::new(),
                _ => self.inline_children(node),
            },
            _ => String::new(),
        }
    }

    /// Emphasis nested in emphasis of the same kind adds nothing, and `**`
    /// inside `**` would close the outer run, so only the outermost is written.
    fn emphasis(&self, node: &Handle, kind: u8, delimiter: &str) -> String {
        let enclosing = self.open.get();
        if enclosing & kind != 0 {
            return self.inline_children(node);
        }
        self.open.set(enclosing | kind);
        let inner = self.inline_children(node);
        self.open.set(enclosing);
        wrap(delimiter, inner)
    }

    fn link(&self, node: &Handle) -> String {
        let text = self.inline_children(node);
        match attr(node, "href") {
            Some(href) if !text.trim().is_empty() => {
                format!("[{}]({})", text.replace('\n', " "), escape_url(&href))
            }
            _ => text,
        }
    }
}

fn image(node: &Handle) -> String {
    let src = attr(node, "src").unwrap_or_default();
    let alt = attr(node, "alt").unwrap_or_default();
    format!(
        "![{}]({})",
        escape_markdown(&collapse_whitespace(&alt)),
        escape_url(&src)
    )
}

/// Wrap inline content in an emphasis delimiter. Blank content stays bare,
/// and surrounding whitespace moves outside the delimiters, where a run can
/// still open and close.
fn wrap(delimiter: &str, inner: String) -> String {
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return inner;
    }
    let lead = &inner[..inner.len() - inner.trim_start().len()];
    let trail = &inner[inner.trim_end().len()..];
    format!("{lead}{delimiter}{trimmed}{delimiter}{trail}")
}

/// Backtick span long enough to hold every backtick run in `content`.
fn code_span(content: &str) -> String {
    let content = collapse_whitespace(content);
    if content.is_empty() {
        return content;
    }
    let fence = "`".repeat(longest_run(&content, '`') + 1);
    let padded = content.starts_with('`')
        || content.ends_with('`')
        || (content.len() >= 2
            && content.starts_with(' ')
            && content.ends_with(' ')
            && !content.chars().all(|c| c == ' '));

    if padded {
        format!("{fence} {content} {fence}")
    } else {
        format!("{fence}{content}{fence}")
    }
}

fn code_language(pre: &Handle) -> Option<String> {
    let code = pre
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child) == Some("code"))
        .cloned()?;
    let class = attr(&code, "class")?;
    class
        .split_whitespace()
        .find_map(|name| name.strip_prefix("language-"))
        .filter(|lang| !lang.is_empty() && !lang.contains('`'))
        .map(str::to_string)
}

/// Paragraph lines are trimmed, blank ones dropped, and block markers at the
/// start of a line escaped.
fn paragraph(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(escape_line_start)
        .collect::<Vec<_>>()
        .join("\n")
}

fn flush_paragraph(blocks: &mut Vec<String>, run: &mut String) {
    let text = paragraph(&std::mem::take(run));
    if !text.is_empty() {
        blocks.push(text);
    }
}

/// Append an inline piece. A `!` directly before a link would turn it into an
/// image, so it is escaped.
fn append_inline(out: &mut String, piece: &str) {
    if piece.starts_with('[') && ends_with_unescaped_bang(out) {
        out.pop();
        out.push_str("\\!");
    }
    out.push_str(piece);
}

fn ends_with_unescaped_bang(text: &str) -> bool {
    match text.strip_suffix('!') {
        Some(rest) => rest.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0,
        None => false,
    }
}

fn has_block_descendant(node: &Handle) -> bool {
    node.children.borrow().iter().any(|child| {
        element_name(child)
            .is_some_and(|tag| BLOCK_TAGS.contains(&tag) || LAYOUT_TAGS.contains(&tag))
            || has_block_descendant(child)
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.replace(['\n', '\r', '\t'], " ")
}

fn longest_run(text: &str, c: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == c {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
