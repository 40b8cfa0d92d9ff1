//! Configuration values as a dynamic tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Type alias for the object map type used in [`ConfigValue`].
///
/// Keys keep insertion order, which is the order they appeared in the source
/// file; a key merged from several files keeps the position of its first
/// appearance.
pub type ObjectMap = IndexMap<String, ConfigValue>;

/// A configuration value.
///
/// Settings are dynamic: a resolved configuration is an [`ObjectMap`] whose
/// values can be scalars, arrays, or further objects, with no schema imposed.
/// The untagged representation means config files read and write as plain
/// JSON or YAML values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A null value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    String(String),
    /// An array of values.
    Array(Vec<ConfigValue>),
    /// An object/map of key-value pairs.
    Object(ObjectMap),
}

impl ConfigValue {
    /// Borrow the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer contents, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The boolean contents, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the element list, if this is an array.
    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the key-value map, if this is an object.
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, ConfigValue::Object(_))
    }

    /// Navigate one level down into an object.
    ///
    /// Returns `None` for non-objects and for absent keys.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_object()?.get(key)
    }

    /// Navigate to a value by a path of object keys.
    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigValue> {
        let mut current = self;
        for segment in path {
            current = current.get(segment)?;
        }
        Some(current)
    }
}
