//! Token substitution in config values.
//!
//! Replaces `${TOKEN}` placeholders in string values with replacement text
//! from the mapping supplied at initialization.
//!
//! ## Syntax
//!
//! A replacement rule for key `base_path` matches the literal text
//! `${BASE_PATH}`: rule keys are uppercased once when the rules are
//! compiled, and matching is case-sensitive, so `${base_path}` or
//! `${Base_Path}` in a template never substitutes. Every occurrence in every
//! string is replaced, at any depth of the value tree. There is no escape
//! sequence: a string shaped like a rule's token is always substituted.
//!
//! ## Example
//!
//! ```text
//! "${BASE_PATH}/data"   -> "/var/myapp/data"   (replace: base_path=/var/myapp)
//! "v${MAJOR}.${MINOR}"  -> "v2.1"              (replace: major=2, minor=1)
//! "${unknown}"          -> "${unknown}"        (no matching rule: left as-is)
//! ```

use crate::config_value::ConfigValue;

/// A single compiled replacement rule.
#[derive(Debug, Clone)]
struct TokenRule {
    /// The literal token to search for, e.g. `${BASE_PATH}`.
    token: String,
    /// The text every occurrence is replaced with.
    replacement: String,
}

/// The compiled set of replacement rules, derived once per initialization.
#[derive(Debug, Clone, Default)]
pub struct TokenRules {
    rules: Vec<TokenRule>,
}

impl TokenRules {
    /// Compile rules from a replacement mapping.
    pub fn compile<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            rules: pairs
                .into_iter()
                .map(|(key, replacement)| TokenRule {
                    token: format!("${{{}}}", key.as_ref().to_uppercase()),
                    replacement: replacement.into(),
                })
                .collect(),
        }
    }

    /// Whether any rules were compiled.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to every string in `value`, in place.
    ///
    /// Objects and arrays are traversed recursively; non-string scalars pass
    /// through untouched.
    pub fn apply(&self, value: &mut ConfigValue) {
        if self.rules.is_empty() {
            return;
        }
        match value {
            ConfigValue::String(s) => {
                for rule in &self.rules {
                    if s.contains(&rule.token) {
                        *s = s.replace(&rule.token, &rule.replacement);
                    }
                }
            }
            ConfigValue::Array(items) => {
                for item in items {
                    self.apply(item);
                }
            }
            ConfigValue::Object(map) => {
                for (_key, nested) in map.iter_mut() {
                    self.apply(nested);
                }
            }
            _ => {}
        }
    }
}
