//! Thin helpers over the `html5ever` RcDom used by the HTML walkers.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Tags the editor produces, plus the aliases accepted on input.
pub(crate) const SUPPORTED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "strong", "b", "em", "i", "s", "del", "strike",
    "code", "pre", "ul", "ol", "li", "blockquote", "a", "img", "hr", "br",
];

/// Wrapper elements html5ever synthesizes around a fragment.
const STRUCTURAL_TAGS: &[&str] = &["html", "head", "body"];

/// Parse a rich HTML fragment. html5ever places the fragment inside `<body>`.
pub(crate) fn parse_fragment(html: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
}

/// The `<body>` element of a parsed fragment, or the document node if absent.
pub(crate) fn body(dom: &RcDom) -> Handle {
    find_first_element(&dom.document, "body").unwrap_or_else(|| dom.document.clone())
}

fn find_first_element(handle: &Handle, name: &str) -> Option<Handle> {
    if element_name(handle) == Some(name) {
        return Some(handle.clone());
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_first_element(child, name))
}

pub(crate) fn element_name(handle: &Handle) -> Option<&str> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

pub(crate) fn attr(handle: &Handle, name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub(crate) fn is_supported(tag: &str) -> bool {
    SUPPORTED_TAGS.contains(&tag) || STRUCTURAL_TAGS.contains(&tag)
}

/// Concatenated text of a node and its descendants.
pub(crate) fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    collect_text(handle, &mut text);
    text
}

fn collect_text(handle: &Handle, text: &mut String) {
    match &handle.data {
        NodeData::Text { contents } => text.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_text(child, text);
            }
        }
        _ => {}
    }
}

/// First element below `handle` whose tag is outside the supported subset.
pub(crate) fn find_unsupported(handle: &Handle) -> Option<String> {
    if let Some(name) = element_name(handle) {
        if !is_supported(name) {
            return Some(name.to_string());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(find_unsupported)
}
