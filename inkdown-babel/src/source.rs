//! Raw input decoding.
//!
//! The converters take `&str`. Callers that hold bytes of unknown provenance (stdin, files,
//! an editor bridge that may hand over nothing at all) go through [`decode_source`] first, which
//! is where absent or non-text input becomes [`FormatError::InvalidInput`].

use crate::error::FormatError;

const BOM: &str = "\u{FEFF}";

/// Borrow raw input as UTF-8 text.
///
/// `None` and invalid UTF-8 are rejected. A leading byte-order mark is skipped.
pub fn decode_source(raw: Option<&[u8]>) -> Result<&str, FormatError> {
    let bytes = raw.ok_or_else(|| FormatError::InvalidInput("no input was provided".to_string()))?;
    let text = std::str::from_utf8(bytes).map_err(|e| {
        FormatError::InvalidInput(format!(
            "input is not UTF-8 text (invalid byte at offset {})",
            e.valid_up_to()
        ))
    })?;
    Ok(text.strip_prefix(BOM).unwrap_or(text))
}
