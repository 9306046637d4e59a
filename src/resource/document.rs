/*!
 * Resource document model.
 *
 * A resource document is the ordered set of `key: value` pairs held by one
 * `.resjson` file. Keys of the form `_<key>.comment` are annotations that
 * carry developer guidance for the data entry `<key>`.
 */

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::ResourceError;

use super::relaxed;

/// Prefix shared by all annotation keys
pub const ANNOTATION_PREFIX: &str = "_";

/// Suffix of well-formed annotation keys
pub const ANNOTATION_SUFFIX: &str = ".comment";

/// Ordered key-value content of one resource file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDocument {
    entries: IndexMap<String, Value>,
}

impl ResourceDocument {
    /// Parse relaxed key-value text into a document
    pub fn parse(text: &str) -> Result<Self, ResourceError> {
        Self::parse_with_origin(text, "<text>")
    }

    /// Parse relaxed key-value text, naming `origin` in any error
    pub fn parse_with_origin(text: &str, origin: &str) -> Result<Self, ResourceError> {
        let strict = relaxed::to_strict_json(text);
        let entries: IndexMap<String, Value> =
            serde_json::from_str(&strict).map_err(|e| ResourceError::Malformed {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { entries })
    }

    /// Build a document from pairs, keeping the order they are given in
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace an entry; new keys go to the end
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Remove an entry, keeping the order of the others
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Value) -> bool) {
        self.entries.retain(|k, v| keep(k, v));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries that hold translatable strings
    pub fn data_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(k, _)| !is_annotation_key(k))
    }

    /// Entries that hold developer annotations
    pub fn annotation_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(k, _)| is_annotation_key(k))
    }

    /// Serialize as strict JSON indented with two spaces
    pub fn to_pretty_json(&self) -> String {
        // A map of strings to JSON values always serializes
        serde_json::to_string_pretty(&self.entries).unwrap_or_else(|_| "{}".to_string())
    }
}

/// True for keys that carry annotations rather than translatable text
pub fn is_annotation_key(key: &str) -> bool {
    key.starts_with(ANNOTATION_PREFIX)
}

/// Return the data key an annotation key refers to
///
/// `_greeting.comment` refers to `greeting`. Keys that start with `_` but do
/// not follow that shape are rejected.
pub fn data_key_for_annotation(key: &str) -> Result<&str, ResourceError> {
    key.strip_prefix(ANNOTATION_PREFIX)
        .and_then(|rest| rest.strip_suffix(ANNOTATION_SUFFIX))
        .ok_or_else(|| ResourceError::InvalidAnnotationKey(key.to_string()))
}

/// Annotation key for a data key
pub fn annotation_key_for(data_key: &str) -> String {
    format!("{}{}{}", ANNOTATION_PREFIX, data_key, ANNOTATION_SUFFIX)
}

/// Whether a value carries no content
///
/// Empty strings, empty arrays, empty objects and null are empty. Numbers
/// and booleans always count as content.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
