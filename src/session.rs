//! Session state: options, accessors, and the initialization entry points.

use camino::Utf8PathBuf;
use indexmap::IndexMap;

use crate::config_value::{ConfigValue, ObjectMap};
use crate::error::ConfigError;
use crate::loader::Loader;
use crate::source::{FileSource, FsSource};
use crate::subst::TokenRules;

// ============================================================================
// Options
// ============================================================================

/// Options controlling a configuration load.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub(crate) replace: IndexMap<String, String>,
    pub(crate) extend: bool,
    pub(crate) flat: bool,
    pub(crate) config_def: Option<ConfigValue>,
}

impl Options {
    /// Options with defaults: no replacements, replace-wins merging, no flat
    /// mode, no definition object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the replacement mapping for `${TOKEN}` substitution.
    ///
    /// Keys are uppercased when the rules are compiled: a pair
    /// `("base_path", "/var/app")` substitutes every `${BASE_PATH}`.
    pub fn replace<K, V, I>(mut self, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.replace = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Enable deep-extend: a key that is an object in both the settings and
    /// an incoming file is unioned field-by-field instead of replaced.
    pub fn extend(mut self) -> Self {
        self.extend = true;
        self
    }

    /// Enable flat mode: files without tier wrapping merge directly.
    pub fn flat(mut self) -> Self {
        self.flat = true;
        self
    }

    /// Attach the opaque definition object handed to the writer, filter, and
    /// default-lookup collaborators.
    pub fn config_def(mut self, def: ConfigValue) -> Self {
        self.config_def = Some(def);
        self
    }
}

// ============================================================================
// Loaded files
// ============================================================================

/// Record of one file that contributed to the resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    /// The `name` field of the file's winning tier, when present: the
    /// environment tier's name, falling back to the `defaults` tier's.
    pub name: Option<String>,
    /// Path the file was loaded from.
    pub path: Utf8PathBuf,
}

// ============================================================================
// Session
// ============================================================================

/// A configuration session: the environment tag, the resolved settings, and
/// the records of the files behind them.
///
/// Sessions are plain caller-owned values; independent sessions never share
/// state, and tests can hold several at once. Accessors fail with
/// [`ConfigError::Uninitialized`] until a load has begun.
///
/// A failed initialization is fatal for the load but not rolled back: merges
/// applied before the failing file stay in the session.
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) environment: String,
    pub(crate) settings: Option<ObjectMap>,
    pub(crate) loaded_files: Vec<LoadedFile>,
    pub(crate) pending_extensions: Vec<Utf8PathBuf>,
    pub(crate) rules: TokenRules,
    pub(crate) options: Options,
}

impl Session {
    /// Create an uninitialized session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize against the real filesystem (JSON and YAML formats).
    ///
    /// See [`Session::init_with_source`].
    pub fn init(
        &mut self,
        environment: impl Into<String>,
        files: &[Utf8PathBuf],
        options: Options,
    ) -> Result<(), ConfigError> {
        self.init_with_source(environment, files, options, &FsSource::new())
    }

    /// Initialize, loading every file through `source`.
    ///
    /// Files load in list order, later files overriding earlier ones.
    /// Extension files referenced via `configExt` follow after the whole
    /// list, in discovery order, drained in a single pass. Any read or parse
    /// failure aborts the load; the failure is logged and returned, and the
    /// merges already applied stay in place.
    ///
    /// Re-initializing an already-initialized session discards its previous
    /// state first.
    pub fn init_with_source(
        &mut self,
        environment: impl Into<String>,
        files: &[Utf8PathBuf],
        options: Options,
        source: &dyn FileSource,
    ) -> Result<(), ConfigError> {
        self.environment = environment.into();
        self.rules = TokenRules::compile(
            options.replace.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        self.options = options;
        self.settings = Some(ObjectMap::new());
        self.loaded_files.clear();
        self.pending_extensions.clear();

        tracing::debug!(
            environment = %self.environment,
            files = files.len(),
            "initializing configuration"
        );
        Loader::new(self, source).run(files)
    }

    /// The active environment tag (may be empty).
    pub fn environment(&self) -> Result<&str, ConfigError> {
        self.ensure_initialized()?;
        Ok(&self.environment)
    }

    /// The resolved settings mapping.
    pub fn settings(&self) -> Result<&ObjectMap, ConfigError> {
        self.settings.as_ref().ok_or(ConfigError::Uninitialized)
    }

    /// Look up one resolved setting by top-level key.
    pub fn setting(&self, key: &str) -> Result<Option<&ConfigValue>, ConfigError> {
        Ok(self.settings()?.get(key))
    }

    /// Records of the files that contributed settings, in load order.
    pub fn loaded_files(&self) -> Result<&[LoadedFile], ConfigError> {
        self.ensure_initialized()?;
        Ok(&self.loaded_files)
    }

    /// Extension paths discovered while the extension pass was already
    /// draining. These are never loaded (extensions are followed one hop
    /// only); they are kept so the cut-off is observable.
    pub fn pending_extensions(&self) -> &[Utf8PathBuf] {
        &self.pending_extensions
    }

    /// The opaque definition object supplied at initialization, if any.
    pub fn config_def(&self) -> Option<&ConfigValue> {
        self.options.config_def.as_ref()
    }

    fn ensure_initialized(&self) -> Result<(), ConfigError> {
        if self.settings.is_some() {
            Ok(())
        } else {
            Err(ConfigError::Uninitialized)
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Load and resolve configuration, returning the session handle.
///
/// Reads from the real filesystem; see [`Session::init_with_source`] for the
/// sequencing and failure contract.
pub fn init(
    environment: impl Into<String>,
    files: &[Utf8PathBuf],
    options: Options,
) -> Result<Session, ConfigError> {
    init_with_source(environment, files, options, &FsSource::new())
}

/// Like [`init`], loading every file through `source`.
pub fn init_with_source(
    environment: impl Into<String>,
    files: &[Utf8PathBuf],
    options: Options,
    source: &dyn FileSource,
) -> Result<Session, ConfigError> {
    let mut session = Session::new();
    session.init_with_source(environment, files, options, source)?;
    Ok(session)
}
