//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name or by file extension, and any
//! parsing format can be converted to any serializing format through [`RichHtml`].

use crate::error::FormatError;
use crate::format::{Format, RichHtml};
use crate::formats::html::HtmlFormat;
use crate::formats::markdown::{MarkdownFormat, MarkdownOptions};
use crate::source::decode_source;
use std::collections::HashMap;

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let html = registry.parse("# Hello", "markdown")?;
/// let markdown = registry.serialize(&html, "markdown")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        log::debug!("registering format '{}'", format.name());
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Extensions are compared case-insensitively. Returns None when no format claims the
    /// extension or the filename has none.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        let mut names = self.list_formats();
        names.retain(|name| {
            self.formats
                .get(name)
                .is_some_and(|f| f.file_extensions().contains(&extension.as_str()))
        });
        let detected = names.into_iter().next();
        log::debug!("detected format {detected:?} for '{filename}'");
        detected
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<RichHtml, FormatError> {
        self.parse_with_options(source, format, &HashMap::new())
    }

    /// Parse source text using the specified format and extra parameters
    pub fn parse_with_options(
        &self,
        source: &str,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<RichHtml, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        log::debug!("parsing {} bytes as {format}", source.len());
        fmt.parse_with_options(source, options)
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &RichHtml, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Serialize a document using the specified format and options
    pub fn serialize_with_options(
        &self,
        doc: &RichHtml,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        log::debug!("serializing to {format}");
        fmt.serialize_with_options(doc, options)
    }

    /// Convert raw input from one format to another.
    ///
    /// `raw` is decoded with [`decode_source`], so absent or non-UTF-8 input fails with
    /// [`FormatError::InvalidInput`] before any format is consulted.
    pub fn convert(&self, raw: Option<&[u8]>, from: &str, to: &str) -> Result<String, FormatError> {
        self.convert_with_options(raw, from, to, &HashMap::new(), &HashMap::new())
    }

    /// Convert with separate parameter maps for the parsing and serializing side.
    pub fn convert_with_options(
        &self,
        raw: Option<&[u8]>,
        from: &str,
        to: &str,
        parse_options: &HashMap<String, String>,
        serialize_options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let source = decode_source(raw)?;
        log::debug!("converting {from} -> {to}");
        let doc = self.parse_with_options(source, from, parse_options)?;
        self.serialize_with_options(&doc, to, serialize_options)
    }

    /// Create a registry with the built-in formats configured by `options`
    pub fn with_options(options: MarkdownOptions) -> Self {
        let mut registry = Self::new();
        registry.register(HtmlFormat::new(options.unsupported_tags));
        registry.register(MarkdownFormat::new(options));
        registry
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        Self::with_options(MarkdownOptions::default())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::UnsupportedTagPolicy;

    struct TestFormat;
    impl Format for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn description(&self) -> &str {
            "Test format"
        }
        fn file_extensions(&self) -> &[&str] {
            &["tst"]
        }
        fn supports_parsing(&self) -> bool {
            true
        }
        fn supports_serialization(&self) -> bool {
            true
        }
        fn parse(&self, _source: &str) -> Result<RichHtml, FormatError> {
            Ok(RichHtml::new("<p>test</p>"))
        }
        fn serialize(&self, _doc: &RichHtml) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
    }

    struct WriteOnly;
    impl Format for WriteOnly {
        fn name(&self) -> &str {
            "write-only"
        }
        fn supports_serialization(&self) -> bool {
            true
        }
        fn serialize(&self, doc: &RichHtml) -> Result<String, FormatError> {
            Ok(doc.to_string())
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_parse_and_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let doc = registry.parse("input", "test").unwrap();
        assert_eq!(doc.as_str(), "<p>test</p>");
        assert_eq!(registry.serialize(&doc, "test").unwrap(), "test output");
    }

    #[test]
    fn test_registry_parse_unsupported() {
        let mut registry = FormatRegistry::new();
        registry.register(WriteOnly);

        let result = registry.parse("input", "write-only");
        assert!(matches!(result, Err(FormatError::NotSupported(_))));
    }

    #[test]
    fn test_registry_serialize_with_unknown_options() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let mut options = HashMap::new();
        options.insert("unused".to_string(), "true".to_string());
        let result = registry.serialize_with_options(&RichHtml::default(), "test", &options);
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        registry.register(TestFormat);

        assert_eq!(registry.list_formats().len(), 1);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(registry.list_formats(), vec!["html", "markdown"]);
    }

    #[test]
    fn test_detect_format_from_filename() {
        let registry = FormatRegistry::with_defaults();

        assert_eq!(
            registry.detect_format_from_filename("doc.md"),
            Some("markdown".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("/path/to/notes.markdown"),
            Some("markdown".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("draft.txt"),
            Some("markdown".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("page.htm"),
            Some("html".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("PAGE.HTML"),
            Some("html".to_string())
        );
        assert_eq!(registry.detect_format_from_filename("doc.unknown"), None);
        assert_eq!(registry.detect_format_from_filename("doc"), None);
    }

    #[test]
    fn test_convert_markdown_to_html_and_back() {
        let registry = FormatRegistry::default();
        let html = registry
            .convert(Some("# Notes\n\n- a\n- b".as_bytes()), "markdown", "html")
            .unwrap();
        assert_eq!(html, "<h1>Notes</h1>\n<ul><li>a</li><li>b</li></ul>");

        let markdown = registry
            .convert(Some(html.as_bytes()), "html", "markdown")
            .unwrap();
        assert_eq!(markdown, "# Notes\n\n- a\n- b");
    }

    #[test]
    fn test_convert_rejects_missing_input() {
        let registry = FormatRegistry::default();
        let result = registry.convert(None, "markdown", "html");
        assert!(matches!(result, Err(FormatError::InvalidInput(_))));
    }

    #[test]
    fn test_with_options_configures_both_formats() {
        let registry = FormatRegistry::with_options(MarkdownOptions {
            unsupported_tags: UnsupportedTagPolicy::Reject,
            ..MarkdownOptions::default()
        });
        let result = registry.convert(Some("<p><span>x</span></p>".as_bytes()), "html", "markdown");
        assert_eq!(
            result,
            Err(FormatError::UnsupportedMarkup("span".to_string()))
        );
    }
}
