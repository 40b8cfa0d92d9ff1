//! Config file format abstraction.
//!
//! The [`ConfigFormat`] trait makes file parsing pluggable; [`JsonFormat`]
//! and [`YamlFormat`] are built in. The [`FormatRegistry`](crate::FormatRegistry)
//! dispatches on file extension.

use crate::config_value::ConfigValue;

/// Error returned when parsing a config file fails.
#[derive(Debug, Clone)]
pub struct ConfigFormatError {
    /// Human-readable error message.
    pub message: String,
}

impl ConfigFormatError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl core::fmt::Display for ConfigFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl core::error::Error for ConfigFormatError {}

/// Trait for config file format parsers.
///
/// Implementations parse raw file contents into a [`ConfigValue`] tree.
///
/// # Built-in Formats
///
/// - [`JsonFormat`] - JSON files (`.json`)
/// - [`YamlFormat`] - YAML files (`.yaml`, `.yml`)
///
/// # Custom Formats
///
/// To support additional formats (TOML, INI, etc.), implement this trait and
/// register the format with the [`FormatRegistry`](crate::FormatRegistry):
///
/// ```rust,ignore
/// pub struct TomlFormat;
///
/// impl ConfigFormat for TomlFormat {
///     fn extensions(&self) -> &[&str] {
///         &["toml"]
///     }
///
///     fn parse(&self, contents: &str) -> Result<ConfigValue, ConfigFormatError> {
///         // Parse TOML and convert to ConfigValue...
///         todo!()
///     }
/// }
/// ```
pub trait ConfigFormat: Send + Sync {
    /// File extensions this format handles (without the leading dot).
    ///
    /// For example, `["json"]` or `["yaml", "yml"]`.
    fn extensions(&self) -> &[&str];

    /// Parse file contents into a [`ConfigValue`].
    fn parse(&self, contents: &str) -> Result<ConfigValue, ConfigFormatError>;
}

/// JSON config file format, parsed with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl ConfigFormat for JsonFormat {
    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn parse(&self, contents: &str) -> Result<ConfigValue, ConfigFormatError> {
        serde_json::from_str(contents).map_err(|e| ConfigFormatError::new(e.to_string()))
    }
}

/// YAML config file format, parsed with `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl ConfigFormat for YamlFormat {
    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn parse(&self, contents: &str) -> Result<ConfigValue, ConfigFormatError> {
        serde_yaml::from_str(contents).map_err(|e| ConfigFormatError::new(e.to_string()))
    }
}
