//! Shared configuration loader for the inkdown toolchain.
//!
//! `defaults/inkdown.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`InkdownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use inkdown_babel::{MarkdownOptions, TocOptions, TocStyle, UnsupportedTagPolicy};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/inkdown.default.toml");

/// Name of the per-project file picked up from the working directory.
pub const PROJECT_FILE: &str = "inkdown.toml";

/// Top-level configuration consumed by inkdown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct InkdownConfig {
    pub convert: ConvertConfig,
    pub toc: TocConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub markdown: MarkdownConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub heading_ids: bool,
    pub code_language: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub unsupported_tags: UnsupportedTagPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TocConfig {
    pub title: String,
    pub style: TocStyle,
    pub max_level: u8,
}

impl From<&ConvertConfig> for MarkdownOptions {
    fn from(config: &ConvertConfig) -> Self {
        MarkdownOptions {
            heading_ids: config.markdown.heading_ids,
            code_language: config.markdown.code_language,
            unsupported_tags: config.html.unsupported_tags,
        }
    }
}

impl From<ConvertConfig> for MarkdownOptions {
    fn from(config: ConvertConfig) -> Self {
        MarkdownOptions::from(&config)
    }
}

impl From<&TocConfig> for TocOptions {
    fn from(config: &TocConfig) -> Self {
        TocOptions {
            title: config.title.clone(),
            style: config.style,
            max_level: config.max_level,
        }
    }
}

impl From<TocConfig> for TocOptions {
    fn from(config: TocConfig) -> Self {
        TocOptions {
            title: config.title,
            style: config.style,
            max_level: config.max_level,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<InkdownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<InkdownConfig, ConfigError> {
    Loader::new().build()
}
