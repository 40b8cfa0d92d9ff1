//! File sources: where config files come from and how they are parsed.
//!
//! The sequencer depends on the [`FileSource`] capability (path in, parsed
//! value out) rather than on the filesystem, so tests can run against an
//! in-memory [`MemorySource`] while production code uses [`FsSource`].

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

use crate::config_format::{ConfigFormat, JsonFormat, YamlFormat};
use crate::config_value::ConfigValue;
use crate::error::ConfigError;

// ============================================================================
// Format Registry
// ============================================================================

/// A registry of config file formats.
///
/// Formats are selected by file extension, case-insensitively.
#[derive(Default)]
pub struct FormatRegistry {
    formats: Vec<Box<dyn ConfigFormat>>,
}

impl FormatRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Create a registry with the default JSON and YAML formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JsonFormat);
        registry.register(YamlFormat);
        registry
    }

    /// Register a new format.
    pub fn register<F: ConfigFormat + 'static>(&mut self, format: F) {
        self.formats.push(Box::new(format));
    }

    /// Find a format that handles the given file extension.
    ///
    /// The extension should not include the leading dot.
    pub fn find_by_extension(&self, extension: &str) -> Option<&dyn ConfigFormat> {
        self.formats
            .iter()
            .find(|f| {
                f.extensions()
                    .iter()
                    .any(|e| e.eq_ignore_ascii_case(extension))
            })
            .map(|f| f.as_ref())
    }

    /// Parse a config file's contents, selecting the format by extension.
    pub fn parse_file(
        &self,
        path: &Utf8Path,
        contents: &str,
    ) -> Result<ConfigValue, ConfigError> {
        let extension = path.extension().unwrap_or("");
        let format =
            self.find_by_extension(extension)
                .ok_or_else(|| ConfigError::UnsupportedFormat {
                    path: path.to_owned(),
                    extension: extension.to_string(),
                })?;
        format
            .parse(contents)
            .map_err(|e| ConfigError::FileParse(path.to_owned(), e))
    }

    /// Get all registered extensions.
    pub fn extensions(&self) -> Vec<&str> {
        self.formats
            .iter()
            .flat_map(|f| f.extensions().iter().copied())
            .collect()
    }
}

// ============================================================================
// FileSource
// ============================================================================

/// Capability to load a parsed config object from a path.
///
/// Loading fails with a read or parse error; an absent file is a read error,
/// never a silent skip.
pub trait FileSource {
    /// Load and parse the file behind `path`.
    fn load(&self, path: &Utf8Path) -> Result<ConfigValue, ConfigError>;
}

/// File source that reads from the real filesystem.
pub struct FsSource {
    registry: FormatRegistry,
}

impl Default for FsSource {
    fn default() -> Self {
        Self {
            registry: FormatRegistry::with_defaults(),
        }
    }
}

impl FsSource {
    /// File source over the default formats (JSON and YAML).
    pub fn new() -> Self {
        Self::default()
    }

    /// File source using a custom format registry.
    pub fn with_registry(registry: FormatRegistry) -> Self {
        Self { registry }
    }
}

impl FileSource for FsSource {
    fn load(&self, path: &Utf8Path) -> Result<ConfigValue, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_owned(), e.to_string()))?;
        self.registry.parse_file(path, &contents)
    }
}

// ============================================================================
// MemorySource
// ============================================================================

/// File source backed by an in-memory map of raw contents (for testing).
///
/// Contents still go through the format registry by extension, so a
/// `MemorySource` behaves exactly like [`FsSource`] over the same bytes.
pub struct MemorySource {
    files: IndexMap<Utf8PathBuf, String>,
    registry: FormatRegistry,
}

impl Default for MemorySource {
    fn default() -> Self {
        Self {
            files: IndexMap::new(),
            registry: FormatRegistry::with_defaults(),
        }
    }
}

impl MemorySource {
    /// Create an empty memory source with the default formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory source from (path, contents) pairs.
    pub fn from_pairs<I, P, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<Utf8PathBuf>,
        S: Into<String>,
    {
        Self {
            files: pairs
                .into_iter()
                .map(|(p, s)| (p.into(), s.into()))
                .collect(),
            registry: FormatRegistry::with_defaults(),
        }
    }

    /// Add or replace one file.
    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }
}

impl FileSource for MemorySource {
    fn load(&self, path: &Utf8Path) -> Result<ConfigValue, ConfigError> {
        let contents = self.files.get(path).ok_or_else(|| {
            ConfigError::FileRead(path.to_owned(), "no such file in memory source".into())
        })?;
        self.registry.parse_file(path, contents)
    }
}
