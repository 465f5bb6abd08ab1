//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ rich HTML conversion.

mod commonmark;
mod export;
mod import;
mod round_trip;

use std::path::PathBuf;

/// Number of opening `tag` elements in an HTML string.
pub fn count_tag(html: &str, tag: &str) -> usize {
    html.matches(&format!("<{tag}>")).count() + html.matches(&format!("<{tag} ")).count()
}

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}
