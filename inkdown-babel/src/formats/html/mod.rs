//! HTML format implementation
//!
//! The rich HTML fragment is the hub document type, so this format is close to an identity:
//! parsing checks the fragment against the unsupported-tag policy and serializing hands the
//! fragment back unchanged.
//!
//! # Library Choice
//!
//! We use `html5ever` + `markup5ever_rcdom` for HTML parsing:
//! - Browser-grade HTML5 parser from the Servo project
//! - Handles malformed HTML gracefully (unclosed tags, stray end tags)
//! - Decodes character references the same way the editor's webview does
//!
//! The same DOM helpers ([`dom`]) back the Markdown serializer and the heading outline.

pub(crate) mod dom;

use crate::error::FormatError;
use crate::format::{reject_unknown_params, Format, RichHtml};
use crate::formats::markdown::UnsupportedTagPolicy;
use std::collections::HashMap;

/// Format implementation for HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat {
    unsupported_tags: UnsupportedTagPolicy,
}

impl HtmlFormat {
    pub fn new(unsupported_tags: UnsupportedTagPolicy) -> Self {
        Self { unsupported_tags }
    }

    /// HTML format that refuses markup outside the editor subset
    pub fn strict() -> Self {
        Self::new(UnsupportedTagPolicy::Reject)
    }
}

/// Check a fragment against the policy. `Strip` accepts everything.
pub fn validate_fragment(html: &str, policy: UnsupportedTagPolicy) -> Result<(), FormatError> {
    if policy == UnsupportedTagPolicy::Strip {
        return Ok(());
    }
    let dom = dom::parse_fragment(html);
    match dom::find_unsupported(&dom.document) {
        Some(tag) => Err(FormatError::UnsupportedMarkup(tag)),
        None => Ok(()),
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Rich HTML fragment (editor subset)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<RichHtml, FormatError> {
        validate_fragment(source, self.unsupported_tags)?;
        Ok(RichHtml::new(source))
    }

    fn serialize(&self, doc: &RichHtml) -> Result<String, FormatError> {
        Ok(doc.as_str().to_string())
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<RichHtml, FormatError> {
        reject_unknown_params("html", options, &["unsupported-tags"])?;
        let policy = match options.get("unsupported-tags") {
            Some(value) => value.parse()?,
            None => self.unsupported_tags,
        };
        validate_fragment(source, policy)?;
        Ok(RichHtml::new(source))
    }
}
