//! Table of contents builder
//!
//! Turns heading records into a Markdown fragment:
//!
//! ```text
//! ## Table of Contents
//!
//! - [Intro](#intro)
//!   - [Setup](#setup)
//! ```
//!
//! Each heading is indented by two spaces per level below 1. Records are taken in the order
//! given; nothing is re-sorted. Headings that share text share an anchor.

use crate::common::escape::escape_markdown;
use crate::common::slug::slug;
use crate::error::FormatError;
use crate::formats::markdown::{parser::parse_from_markdown, MarkdownOptions};
use crate::outline::HeadingRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TITLE: &str = "Table of Contents";

/// How each TOC entry is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocStyle {
    /// `- [text](#slug)`
    #[default]
    Linked,
    /// `- text`
    Simple,
}

impl FromStr for TocStyle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linked" => Ok(TocStyle::Linked),
            "simple" => Ok(TocStyle::Simple),
            other => Err(FormatError::InvalidInput(format!(
                "unknown TOC style '{other}' (expected linked or simple)"
            ))),
        }
    }
}

impl fmt::Display for TocStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TocStyle::Linked => f.write_str("linked"),
            TocStyle::Simple => f.write_str("simple"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocOptions {
    pub title: String,
    pub style: TocStyle,
    /// Headings deeper than this are left out.
    pub max_level: u8,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            style: TocStyle::default(),
            max_level: 6,
        }
    }
}

/// Build a TOC with the default title.
///
/// Fails with [`FormatError::NoHeadings`] when `headings` is empty.
pub fn build_toc(headings: &[HeadingRecord], style: TocStyle) -> Result<String, FormatError> {
    build_toc_with_options(
        headings,
        &TocOptions {
            style,
            ..TocOptions::default()
        },
    )
}

pub fn build_toc_with_options(
    headings: &[HeadingRecord],
    options: &TocOptions,
) -> Result<String, FormatError> {
    let entries: Vec<String> = headings
        .iter()
        .filter(|heading| heading.level <= options.max_level)
        .map(|heading| entry(heading, options.style))
        .collect();

    if entries.is_empty() {
        return Err(FormatError::NoHeadings);
    }

    Ok(format!(
        "## {}\n\n{}",
        escape_markdown(&options.title),
        entries.join("\n")
    ))
}

/// The TOC rendered to rich HTML, ready to insert into the editor.
pub fn toc_html(headings: &[HeadingRecord], options: &TocOptions) -> Result<String, FormatError> {
    let markdown = build_toc_with_options(headings, options)?;
    Ok(parse_from_markdown(&markdown, &MarkdownOptions::default()))
}

fn entry(heading: &HeadingRecord, style: TocStyle) -> String {
    let indent = "  ".repeat(usize::from(heading.level.max(1)) - 1);
    let text = escape_markdown(&heading.text);
    match style {
        TocStyle::Linked => format!("{indent}- [{text}](#{})", slug(&heading.text)),
        TocStyle::Simple => format!("{indent}- {text}"),
    }
}
