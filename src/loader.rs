//! File resolution and sequencing.
//!
//! The loader walks the explicit file list in order, determines each file's
//! shape (two-tier, flat, or inert), drives the merge engine, and finally
//! drains the extension files collected along the way. The drain is a single
//! flat pass, so extensions discovered while draining are not followed
//! further.

use camino::{Utf8Path, Utf8PathBuf};

use crate::config_value::{ConfigValue, ObjectMap};
use crate::error::ConfigError;
use crate::merge::merge_section;
use crate::session::{LoadedFile, Session};
use crate::source::FileSource;

/// Key introducing the shape-independent tier of a two-tier file.
const DEFAULTS_KEY: &str = "defaults";

/// Marker identifying a multi-file tree import; such a file is never merged
/// as a flat file.
const TREE_MARKER_KEY: &str = "configTree";

/// Optional display name inside a tier, recorded per loaded file.
const NAME_KEY: &str = "name";

/// One configuration load in progress.
pub(crate) struct Loader<'a> {
    session: &'a mut Session,
    source: &'a dyn FileSource,
}

impl<'a> Loader<'a> {
    pub(crate) fn new(session: &'a mut Session, source: &'a dyn FileSource) -> Self {
        Self { session, source }
    }

    /// Process the explicit file list, then the collected extensions.
    pub(crate) fn run(mut self, files: &[Utf8PathBuf]) -> Result<(), ConfigError> {
        for path in files {
            self.load_file(path)?;
        }

        // Single flat pass over the extensions discovered above. Paths that
        // other extensions add while draining land back in the session and
        // stay pending.
        let pending = std::mem::take(&mut self.session.pending_extensions);
        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "loading extension files");
        }
        for path in &pending {
            self.load_file(path)?;
        }
        Ok(())
    }

    fn load_file(&mut self, path: &Utf8Path) -> Result<(), ConfigError> {
        tracing::debug!(path = %path, "loading config file");
        let value = match self.source.load(path) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "failed to load config file");
                return Err(e);
            }
        };

        let ConfigValue::Object(map) = value else {
            // A non-object root matches neither shape and contributes nothing.
            tracing::debug!(path = %path, "config root is not an object, skipping");
            return Ok(());
        };
        self.merge_object(path, map);
        Ok(())
    }

    /// Determine the file's shape and merge its contribution.
    fn merge_object(&mut self, path: &Utf8Path, mut map: ObjectMap) {
        let environment = self.session.environment.clone();
        let env_active = !environment.is_empty();
        let two_tier = map.contains_key(DEFAULTS_KEY)
            || (env_active && map.contains_key(environment.as_str()));

        if two_tier {
            // The record's name comes from the environment tier when present,
            // falling back to the defaults tier. Read before the tiers are
            // consumed below.
            let name = if env_active {
                section_name(map.get(environment.as_str()))
                    .or_else(|| section_name(map.get(DEFAULTS_KEY)))
            } else {
                None
            };

            if let Some(ConfigValue::Object(section)) = map.shift_remove(DEFAULTS_KEY) {
                self.merge(section);
            }
            if env_active {
                if let Some(ConfigValue::Object(section)) = map.shift_remove(environment.as_str())
                {
                    self.merge(section);
                }
                // A two-tier file is recorded only under an active environment,
                // whether or not it carried a tier for that environment.
                self.session.loaded_files.push(LoadedFile {
                    name,
                    path: path.to_owned(),
                });
            }
        } else if self.session.options.flat && !map.contains_key(TREE_MARKER_KEY) {
            self.merge(map);
            self.session.loaded_files.push(LoadedFile {
                name: None,
                path: path.to_owned(),
            });
        } else {
            tracing::debug!(path = %path, "file matched no loadable shape, skipping");
        }
    }

    fn merge(&mut self, section: ObjectMap) {
        let Session {
            settings,
            pending_extensions,
            rules,
            options,
            ..
        } = &mut *self.session;
        merge_section(
            settings.get_or_insert_with(ObjectMap::new),
            section,
            rules,
            options.extend,
            pending_extensions,
        );
    }
}

fn section_name(section: Option<&ConfigValue>) -> Option<String> {
    match section?.get(NAME_KEY) {
        Some(ConfigValue::String(name)) => Some(name.clone()),
        _ => None,
    }
}
