#![warn(missing_docs)]
#![deny(unsafe_code)]
#![doc = include_str!("../README.md")]

mod config_format;
mod config_value;
mod dump;
mod error;
mod loader;
mod merge;
mod session;
mod source;
mod subst;
mod writer;

pub use config_format::{ConfigFormat, ConfigFormatError, JsonFormat, YamlFormat};
pub use config_value::{ConfigValue, ObjectMap};
pub use dump::render_session;
pub use error::ConfigError;
pub use session::{LoadedFile, Options, Session, init, init_with_source};
pub use source::{FileSource, FormatRegistry, FsSource, MemorySource};
pub use subst::TokenRules;
pub use writer::{WriteFormat, default_for, filter_settings, write_settings};
