//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! Every format converts between its own text representation and the rich HTML fragment the
//! editor works on, so any two registered formats can be chained through [`RichHtml`].

use crate::error::FormatError;
use std::collections::HashMap;
use std::fmt;

/// A rich HTML fragment in the editor's subset.
///
/// This is the hub document type: Markdown parses into it, and serializes out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichHtml(String);

impl RichHtml {
    pub fn new(html: impl Into<String>) -> Self {
        RichHtml(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RichHtml {
    fn from(html: String) -> Self {
        RichHtml(html)
    }
}

impl From<&str> for RichHtml {
    fn from(html: &str) -> Self {
        RichHtml(html.to_string())
    }
}

impl fmt::Display for RichHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for document formats
///
/// Implementors provide conversion between their text representation and [`RichHtml`].
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &RichHtml) -> Result<String, FormatError> {
///         Ok(doc.as_str().to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → RichHtml)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (RichHtml → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a rich HTML fragment
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<RichHtml, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a rich HTML fragment into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &RichHtml) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Parse with extra parameters (e.g. `heading-ids=true`).
    ///
    /// The default implementation only accepts an empty parameter map.
    fn parse_with_options(
        &self,
        source: &str,
        options: &HashMap<String, String>,
    ) -> Result<RichHtml, FormatError> {
        if options.is_empty() {
            self.parse(source)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }

    /// Serialize with extra parameters (e.g. `unsupported-tags=reject`).
    ///
    /// The default implementation only accepts an empty parameter map.
    fn serialize_with_options(
        &self,
        doc: &RichHtml,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Read a boolean extra parameter. Accepts `true`/`false`, `yes`/`no`, `1`/`0`, `on`/`off`.
pub(crate) fn bool_param(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<bool>, FormatError> {
    let Some(value) = options.get(key) else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(Some(true)),
        "false" | "no" | "0" | "off" => Ok(Some(false)),
        other => Err(FormatError::InvalidInput(format!(
            "parameter '{key}' expects a boolean, got '{other}'"
        ))),
    }
}

/// Fail on any parameter key outside `known`.
pub(crate) fn reject_unknown_params(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|key| !known.contains(key))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(FormatError::NotSupported(format!(
        "Format '{format}' does not support parameter(s): {}",
        unknown.join(", ")
    )))
}
