//! Heading outline
//!
//! A table of contents is built from heading records gathered by walking a document. The walk
//! is a capability ([`HeadingSource`]) so the TOC builder does not care whether the headings
//! come from a live editor tree, a parsed HTML fragment or a recorded list.

use crate::formats::html::dom::{body, element_name, parse_fragment, text_content};
use crate::formats::markdown::{parser::parse_from_markdown, MarkdownOptions};
use markup5ever_rcdom::{Handle, RcDom};
use serde::{Deserialize, Serialize};

/// One heading as met in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// 1..=6
    pub level: u8,
    pub text: String,
    /// Opaque ordinal; only its relative order is meaningful.
    pub position: usize,
}

impl HeadingRecord {
    pub fn new(level: u8, text: impl Into<String>, position: usize) -> Self {
        Self {
            level,
            text: text.into(),
            position,
        }
    }
}

/// Read-only walk over the headings of a document, in document order.
pub trait HeadingSource {
    fn visit_headings(&self, visit: &mut dyn FnMut(HeadingRecord));
}

impl HeadingSource for [HeadingRecord] {
    fn visit_headings(&self, visit: &mut dyn FnMut(HeadingRecord)) {
        for heading in self {
            visit(heading.clone());
        }
    }
}

/// Gather every heading a source yields.
pub fn collect_headings<S: HeadingSource + ?Sized>(source: &S) -> Vec<HeadingRecord> {
    let mut headings = Vec::new();
    source.visit_headings(&mut |heading| headings.push(heading));
    headings
}

/// Headings of a rich HTML fragment.
///
/// Positions are pre-order element indices within the fragment body. Heading text is the
/// element's text with whitespace runs collapsed; headings without text are skipped.
pub struct HtmlOutline {
    dom: RcDom,
}

impl HtmlOutline {
    pub fn parse(html: &str) -> Self {
        Self {
            dom: parse_fragment(html),
        }
    }

    /// Outline of a Markdown document, through its rendered HTML.
    pub fn from_markdown(markdown: &str) -> Self {
        Self::parse(&parse_from_markdown(markdown, &MarkdownOptions::default()))
    }
}

impl HeadingSource for HtmlOutline {
    fn visit_headings(&self, visit: &mut dyn FnMut(HeadingRecord)) {
        let mut position = 0;
        for child in body(&self.dom).children.borrow().iter() {
            walk(child, &mut position, visit);
        }
    }
}

fn walk(node: &Handle, position: &mut usize, visit: &mut dyn FnMut(HeadingRecord)) {
    let Some(name) = element_name(node) else {
        return;
    };
    let index = *position;
    *position += 1;

    if let Some(level) = heading_level(name) {
        let text = collapse_whitespace(&text_content(node));
        if !text.is_empty() {
            visit(HeadingRecord::new(level, text, index));
        }
    }

    for child in node.children.borrow().iter() {
        walk(child, position, visit);
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
