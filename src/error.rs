//! Error type for configuration loading and access.

use camino::Utf8PathBuf;

use crate::config_format::ConfigFormatError;

/// Errors produced while loading configuration or querying a session.
pub enum ConfigError {
    /// An accessor was called before a successful initialization.
    Uninitialized,
    /// A config file could not be read.
    FileRead(Utf8PathBuf, String),
    /// A config file could not be parsed.
    FileParse(Utf8PathBuf, ConfigFormatError),
    /// No registered format handles the file's extension.
    UnsupportedFormat {
        /// The file whose extension was not recognized.
        path: Utf8PathBuf,
        /// The extension, without the leading dot (may be empty).
        extension: String,
    },
    /// A settings target could not be written.
    Write(Utf8PathBuf, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Uninitialized => {
                write!(f, "configuration has not been initialized")
            }
            ConfigError::FileRead(path, msg) => {
                write!(f, "error reading {path}: {msg}")
            }
            ConfigError::FileParse(path, e) => {
                write!(f, "error parsing {path}: {e}")
            }
            ConfigError::UnsupportedFormat { path, extension } => {
                if extension.is_empty() {
                    write!(f, "no config format registered for {path}")
                } else {
                    write!(f, "unsupported file extension .{extension} for {path}")
                }
            }
            ConfigError::Write(path, msg) => {
                write!(f, "error writing {path}: {msg}")
            }
        }
    }
}

impl std::fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::FileParse(_, e) => Some(e),
            _ => None,
        }
    }
}
