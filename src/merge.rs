//! Merging parsed config sections into the resolved settings.

use camino::Utf8PathBuf;

use crate::config_value::{ConfigValue, ObjectMap};
use crate::subst::TokenRules;

/// Reserved key naming further files to fold in after the explicit list.
pub(crate) const CONFIG_EXT_KEY: &str = "configExt";

/// Fold one section into `settings`.
///
/// Per top-level key of the section, in order:
/// - token substitution runs over the value first (so extension paths may
///   contain tokens too);
/// - a `configExt` value is diverted into `pending` and never merged;
/// - with `extend`, a key that is an object on both sides is unioned
///   field-by-field, incoming fields winning and existing fields not present
///   in the incoming object surviving;
/// - everything else replaces the existing value wholesale, including an
///   object replacing a scalar or vice versa.
pub(crate) fn merge_section(
    settings: &mut ObjectMap,
    section: ObjectMap,
    rules: &TokenRules,
    extend: bool,
    pending: &mut Vec<Utf8PathBuf>,
) {
    for (key, mut value) in section {
        rules.apply(&mut value);

        if key == CONFIG_EXT_KEY {
            collect_extensions(value, pending);
            continue;
        }

        match value {
            ConfigValue::Object(incoming)
                if extend && matches!(settings.get(&key), Some(ConfigValue::Object(_))) =>
            {
                if let Some(ConfigValue::Object(existing)) = settings.get_mut(&key) {
                    for (field, field_value) in incoming {
                        existing.insert(field, field_value);
                    }
                }
            }
            other => {
                settings.insert(key, other);
            }
        }
    }
}

/// Append extension paths named by a `configExt` value.
///
/// A sequence contributes its string elements, a bare string contributes
/// itself; anything else names no file and is dropped.
fn collect_extensions(value: ConfigValue, pending: &mut Vec<Utf8PathBuf>) {
    match value {
        ConfigValue::Array(items) => {
            for item in items {
                if let ConfigValue::String(path) = item {
                    pending.push(Utf8PathBuf::from(path));
                }
            }
        }
        ConfigValue::String(path) => pending.push(Utf8PathBuf::from(path)),
        _ => {}
    }
}
