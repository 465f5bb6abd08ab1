//! Markdown format implementation
//!
//! This module implements bidirectional conversion between Markdown and the editor's rich
//! HTML subset.
//!
//! # Implementation Choice
//!
//! Both directions are hand-written rather than built on a CommonMark engine. The editor's
//! subset is small, and the conversion rules (fenced code first, bold before italic, images
//! before links, opaque code spans) are precedence rules over the text, which a line scanner
//! plus an ordered chain of inline rules expresses directly. `html5ever` is used on the
//! HTML side so that entity decoding and malformed markup follow browser behaviour.
//!
//! # Element Mapping Table
//!
//! | HTML                     | Markdown                 | Notes                                      |
//! |--------------------------|--------------------------|--------------------------------------------|
//! | `h1`..`h6`               | `#`..`######` + space    | Empty headings are dropped on export       |
//! | `p`                      | text + blank line        | `br` ↔ single newline                      |
//! | `strong` / `b`           | `**x**`                  |                                            |
//! | `em` / `i`               | `*x*`                    |                                            |
//! | `s` / `del` / `strike`   | `~~x~~`                  |                                            |
//! | `code`                   | `` `x` ``                | Fence grows past backticks in the content  |
//! | `pre > code`             | fenced block             | Language only with `code_language`         |
//! | `ul` / `ol` / `li`       | `- x` / `1. x`           | Nesting by indentation                     |
//! | `blockquote`             | `> x`                    | Inner blocks parsed recursively            |
//! | `a[href]`                | `[text](url)`            |                                            |
//! | `img[src,alt]`           | `![alt](src)`            |                                            |
//! | `hr`                     | `---`                    | Exactly three hyphens                      |
//!
//! # Lossy Conversions
//!
//! - Tags outside the subset lose their markup (or fail under [`UnsupportedTagPolicy::Reject`])
//! - Ordered lists always restart at 1
//! - Several paragraphs in one list item are joined into one line
//! - Consecutive blank lines collapse

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::{bool_param, reject_unknown_params, Format, RichHtml};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const PARAMS: &[&str] = &["heading-ids", "code-language", "unsupported-tags"];

/// What the serializer does with tags outside the editor's subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedTagPolicy {
    /// Drop the markup, keep the text.
    #[default]
    Strip,
    /// Fail with [`FormatError::UnsupportedMarkup`].
    Reject,
}

impl FromStr for UnsupportedTagPolicy {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strip" => Ok(UnsupportedTagPolicy::Strip),
            "reject" => Ok(UnsupportedTagPolicy::Reject),
            other => Err(FormatError::InvalidInput(format!(
                "unknown unsupported-tag policy '{other}' (expected strip or reject)"
            ))),
        }
    }
}

impl fmt::Display for UnsupportedTagPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedTagPolicy::Strip => f.write_str("strip"),
            UnsupportedTagPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// Knobs for both conversion directions. The defaults reproduce the editor's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Emit `id="slug"` on parsed headings.
    pub heading_ids: bool,
    /// Carry the fence info string as `class="language-X"` (and back).
    pub code_language: bool,
    pub unsupported_tags: UnsupportedTagPolicy,
}

impl MarkdownOptions {
    /// Overlay extra parameters (`heading-ids`, `code-language`, `unsupported-tags`).
    pub fn with_params(&self, params: &HashMap<String, String>) -> Result<Self, FormatError> {
        reject_unknown_params("markdown", params, PARAMS)?;
        let mut options = self.clone();
        if let Some(value) = bool_param(params, "heading-ids")? {
            options.heading_ids = value;
        }
        if let Some(value) = bool_param(params, "code-language")? {
            options.code_language = value;
        }
        if let Some(value) = params.get("unsupported-tags") {
            options.unsupported_tags = value.parse()?;
        }
        Ok(options)
    }
}

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown in the editor's subset"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown", "txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<RichHtml, FormatError> {
        Ok(RichHtml::new(parser::parse_from_markdown(
            source,
            &self.options,
        )))
    }

    fn serialize(&self, doc: &RichHtml) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(doc.as_str(), &self.options)
    }

    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<RichHtml, FormatError> {
        let options = self.options.with_params(options)?;
        Ok(RichHtml::new(parser::parse_from_markdown(source, &options)))
    }

    fn serialize_with_options(
        &self,
        doc: &RichHtml,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.options.with_params(options)?;
        serializer::serialize_to_markdown(doc.as_str(), &options)
    }
}
