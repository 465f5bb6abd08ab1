//! Error types for conversion operations

use std::fmt;

/// Errors that can occur during conversion operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Input was absent or was not UTF-8 text
    InvalidInput(String),
    /// A table of contents was requested for a document without headings
    NoHeadings,
    /// Markup outside the supported subset met the reject policy
    UnsupportedMarkup(String),
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested operation
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            FormatError::NoHeadings => write!(f, "The document has no headings"),
            FormatError::UnsupportedMarkup(tag) => {
                write!(f, "Unsupported markup: <{tag}> is outside the editor subset")
            }
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}
