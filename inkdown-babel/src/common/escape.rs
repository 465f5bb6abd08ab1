//! Escaping helpers shared by both conversion directions.
//!
//! HTML escaping is applied to every text run the parser emits. Markdown
//! escaping is the serializer's counterpart: any character that the parser
//! would read as syntax is prefixed with a backslash, and the parser turns
//! `\X` back into a literal `X`.

use once_cell::sync::Lazy;
use regex::Regex;

static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)\. ").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Characters that carry meaning inside a line of Markdown text.
const INLINE_SPECIALS: &[char] = &['\\', '`', '*', '~', '[', ']'];

/// Escape text for an HTML text node.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attribute(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}

/// Reverse of [`escape_attribute`] for the five entities the parser emits.
pub fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Plain text of an HTML fragment produced by the parser.
pub fn html_text(html: &str) -> String {
    decode_entities(&TAG.replace_all(html, ""))
}

/// Backslash-escape inline Markdown syntax in a text run.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if INLINE_SPECIALS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape block syntax at the start of a paragraph line.
///
/// The line has already gone through inline escaping; only markers that the
/// block parser recognizes at column zero are handled here.
pub fn escape_line_start(line: &str) -> String {
    if line.starts_with('#') || line.starts_with('>') || line.starts_with("- ") || line == "---"
    {
        return format!("\\{line}");
    }
    if let Some(caps) = ORDERED_MARKER.captures(line) {
        let digits = &caps[1];
        return format!("{digits}\\.{}", &line[digits.len() + 1..]);
    }
    line.to_string()
}

/// Make a URL safe to place between `(` and `)`.
///
/// A backslash is doubled, since the parser reads `\X` as an escaped `X`.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\n' | '\r' | '\t' => {}
            _ => out.push(c),
        }
    }
    out
}
