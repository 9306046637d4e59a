/*!
 * Structural merge of translated values into source-language text.
 *
 * The source file decides key order, whitespace and comments. The text is
 * scanned once: comments are copied through, every `"key": "value"`
 * assignment has its key decoded, and only the quoted value of a key that
 * has a translation is rewritten. Every byte outside those values, commented
 * out assignments included, stays exactly as it was in the source file.
 */

use std::collections::HashSet;

use log::{debug, warn};
use serde_json::Value;

use crate::errors::ResourceError;

use super::document::{is_annotation_key, ResourceDocument};
use super::relaxed;

/// Outcome of one structural merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// The merged text
    pub text: String,
    /// Translated keys whose value was substituted
    pub replaced: Vec<String>,
    /// Translated keys with no assignment in the source text
    pub unmatched: Vec<String>,
}

impl MergeReport {
    /// True when every translated key found its place in the source text
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// Rebuild `original` with the values of `translated`
///
/// Annotation keys in `translated` are never substituted. Keys that cannot be
/// located in `original` are listed in [`MergeReport::unmatched`] and the
/// merge carries on with the rest.
pub fn reorder_and_replace(
    original: &str,
    translated: &ResourceDocument,
) -> Result<MergeReport, ResourceError> {
    // Only ASCII bytes are inspected, so every index is a char boundary
    let bytes = original.as_bytes();
    let mut text = String::with_capacity(original.len());
    let mut copied = 0;
    let mut found: HashSet<String> = HashSet::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
            }
            b'"' | b'\'' => {
                let Some(key_end) = string_end(bytes, i) else {
                    i += 1;
                    continue;
                };
                let Some(value_start) = value_after_colon(bytes, key_end) else {
                    i = key_end;
                    continue;
                };
                let Some(value_end) = string_end(bytes, value_start) else {
                    i = value_start + 1;
                    continue;
                };

                if let Some(key) = decode_string(&original[i..key_end]) {
                    if let Some(value) = translated.get(&key).filter(|_| !is_annotation_key(&key)) {
                        text.push_str(&original[copied..value_start]);
                        text.push_str(&serialize_value(&key, value)?);
                        copied = value_end;
                        found.insert(key);
                    }
                }
                i = value_end;
            }
            _ => i += 1,
        }
    }
    text.push_str(&original[copied..]);

    let mut replaced = Vec::new();
    let mut unmatched = Vec::new();
    for (key, _) in translated.data_entries() {
        if found.contains(key) {
            replaced.push(key.to_string());
        } else {
            warn!("Key {} has no value assignment in the source text, skipping", key);
            unmatched.push(key.to_string());
        }
    }

    debug!(
        "Merged {} keys ({} unmatched, {} annotations ignored)",
        replaced.len(),
        unmatched.len(),
        translated.keys().filter(|k| is_annotation_key(k)).count()
    );

    Ok(MergeReport { text, replaced, unmatched })
}

/// Parse translated text and merge it into `original`
pub fn reorder_and_replace_text(
    original: &str,
    translated_text: &str,
    origin: &str,
) -> Result<MergeReport, ResourceError> {
    let translated = ResourceDocument::parse_with_origin(translated_text, origin)?;
    reorder_and_replace(original, &translated)
}

// Index just past the closing quote of the string opening at `start`
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            c if c == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

// Start of a quoted value following `: ` after a key, if there is one
fn value_after_colon(bytes: &[u8], key_end: usize) -> Option<usize> {
    let mut i = skip_whitespace(bytes, key_end);
    if bytes.get(i) != Some(&b':') {
        return None;
    }
    i = skip_whitespace(bytes, i + 1);
    matches!(bytes.get(i), Some(b'"') | Some(b'\'')).then_some(i)
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

// Decode a quoted key literal, escapes and single quotes included
fn decode_string(literal: &str) -> Option<String> {
    serde_json::from_str(&relaxed::to_strict_json(literal)).ok()
}

fn serialize_value(key: &str, value: &Value) -> Result<String, ResourceError> {
    serde_json::to_string(value).map_err(|e| ResourceError::Malformed {
        origin: format!("key {}", key),
        message: e.to_string(),
    })
}
