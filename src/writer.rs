//! Collaborator operations over a resolved session.
//!
//! These are thin boundaries around the core: serializing the resolved
//! settings to a file, deriving a filtered view, and looking up a declared
//! default. Each receives exactly the opaque definition object supplied at
//! initialization and the resolved settings mapping.

use camino::Utf8Path;

use crate::config_value::{ConfigValue, ObjectMap};
use crate::error::ConfigError;
use crate::session::Session;

/// Output formats the writer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Serialize the resolved settings to `target`.
///
/// When the session carries a definition object, only the settings it
/// selects are written (see [`filter_settings`]); otherwise the full
/// settings mapping is written.
pub fn write_settings(
    session: &Session,
    target: &Utf8Path,
    format: WriteFormat,
) -> Result<(), ConfigError> {
    let settings = session.settings()?;
    let view = match session.config_def() {
        Some(def) => filter_settings(settings, def),
        None => settings.clone(),
    };
    let value = ConfigValue::Object(view);

    let rendered = match format {
        WriteFormat::Json => serde_json::to_string_pretty(&value)
            .map_err(|e| ConfigError::Write(target.to_owned(), e.to_string()))?,
        WriteFormat::Yaml => serde_yaml::to_string(&value)
            .map_err(|e| ConfigError::Write(target.to_owned(), e.to_string()))?,
    };
    std::fs::write(target, rendered)
        .map_err(|e| ConfigError::Write(target.to_owned(), e.to_string()))
}

/// Derive the subset of `settings` selected by the definition object.
///
/// The definition's top-level keys name the settings to keep; everything
/// else about the definition is opaque here. A non-object definition selects
/// nothing. Keys the definition names but the settings lack are simply
/// absent from the view.
pub fn filter_settings(settings: &ObjectMap, def: &ConfigValue) -> ObjectMap {
    let Some(def) = def.as_object() else {
        return ObjectMap::new();
    };
    def.keys()
        .filter_map(|key| {
            settings
                .get(key)
                .map(|value| (key.clone(), value.clone()))
        })
        .collect()
}

/// The declared default for one named setting, per the definition object.
///
/// Reads the `default` field of the definition entry named `name`; returns
/// `None` when the entry or the field is absent.
pub fn default_for<'a>(def: &'a ConfigValue, name: &str) -> Option<&'a ConfigValue> {
    def.get(name)?.get("default")
}
