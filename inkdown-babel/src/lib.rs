//! Markdown ⇄ rich HTML conversion for the inkdown editor
//!
//!     This crate converts between Markdown text and the small rich HTML subset the editor works
//!     on, derives heading anchors, and builds tables of contents from a document's headings.
//!
//!     TLDR: For format authors:
//!         - The hub document type is RichHtml (a fragment in the editor subset). Every format
//!           parses into it and serializes out of it.
//!         - Conversion functions are pure: no I/O, no logging, no global state. The registry is
//!           the only place that logs (format detection and dispatch, at debug).
//!         - Anything the serializer emits must read back through the parser unchanged: escaping
//!           lives in common/escape.rs, and both directions use it.
//!
//!     This is a pure lib, that is, it powers inkdown-cli but is shell agnostic: no code should
//!     suppose a shell environment, be it std print, env vars etc.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition, RichHtml
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── source.rs               # Raw input decoding (absent / non-UTF-8 input)
//!     ├── outline.rs              # HeadingRecord, HeadingSource, HtmlOutline
//!     ├── toc.rs                  # Table of contents builder
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # Block parser (Markdown → HTML)
//!     │   │   ├── inline.rs       # Inline rules
//!     │   │   ├── serializer.rs   # HTML → Markdown
//!     │   │   └── mod.rs
//!     │   └── html                # Identity format + html5ever DOM helpers
//!     ├── common                  # slug, escaping
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # mounts the subdirectories
//!     ├── markdown
//!     │   ├── import.rs           # Markdown → HTML
//!     │   ├── export.rs           # HTML → Markdown
//!     │   ├── round_trip.rs
//!     │   └── commonmark.rs       # cross-check against comrak on the shared subset
//!     ├── outline.rs
//!     ├── registry.rs
//!     ├── properties.rs           # proptest: slug, fixed point, escaping
//!     └── toc.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.
//!
//! Core Algorithms
//!
//!     Markdown → HTML is a line scanner: fenced code is recognized first so nothing inside a fence
//!     is interpreted, then headings, rules, quotes, list items and paragraphs. Inline content runs
//!     through images, then links, then emphasis delimiter-run matching over a tokenized string
//!     in which code spans and backslash escapes are opaque placeholders.
//!
//!     HTML → Markdown walks the html5ever DOM. Tags outside the subset are stripped (their text
//!     kept) or rejected, depending on UnsupportedTagPolicy.
//!
//!     The pair reaches a fixed point after one cycle: to_html(to_markdown(to_html(m))) equals
//!     to_html(m) for Markdown in the supported subset.
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod outline;
pub mod registry;
pub mod source;
pub mod toc;

pub use common::slug::slug;
pub use error::FormatError;
pub use format::{Format, RichHtml};
pub use formats::markdown::{MarkdownOptions, UnsupportedTagPolicy};
pub use outline::{collect_headings, HeadingRecord, HeadingSource, HtmlOutline};
pub use registry::FormatRegistry;
pub use source::decode_source;
pub use toc::{build_toc, build_toc_with_options, toc_html, TocOptions, TocStyle};

/// Convert a rich HTML fragment to Markdown with the default options.
///
/// Tags outside the subset are stripped, so this only fails when a caller-side policy says
/// otherwise; see [`to_markdown_with_options`].
pub fn to_markdown(html: &str) -> Result<String, FormatError> {
    to_markdown_with_options(html, &MarkdownOptions::default())
}

pub fn to_markdown_with_options(
    html: &str,
    options: &MarkdownOptions,
) -> Result<String, FormatError> {
    formats::markdown::serializer::serialize_to_markdown(html, options)
}

/// Convert Markdown to a rich HTML fragment with the default options.
pub fn to_html(markdown: &str) -> String {
    to_html_with_options(markdown, &MarkdownOptions::default())
}

pub fn to_html_with_options(markdown: &str, options: &MarkdownOptions) -> String {
    formats::markdown::parser::parse_from_markdown(markdown, options)
}

/// [`to_markdown`] over raw input: absent or non-UTF-8 bytes fail with
/// [`FormatError::InvalidInput`].
pub fn to_markdown_raw(raw: Option<&[u8]>) -> Result<String, FormatError> {
    to_markdown(decode_source(raw)?)
}

/// [`to_html`] over raw input: absent or non-UTF-8 bytes fail with
/// [`FormatError::InvalidInput`].
pub fn to_html_raw(raw: Option<&[u8]>) -> Result<String, FormatError> {
    Ok(to_html(decode_source(raw)?))
}
