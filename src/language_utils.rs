use once_cell::sync::Lazy;
use regex::Regex;

/// Locale code utilities
///
/// Local resource directories are named with tags such as `fi-FI` or
/// `sr-latn`, while the provider expects `fi_FI` or `sr@latin`. This module
/// converts between the two notations.
static LOCAL_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z]{2})-([A-Z]{2}|latn)$").expect("locale tag pattern is valid")
});

/// Map a local locale tag (or a path ending in one) to the provider code.
///
/// Returns `None` when the input does not end in a locale tag, so that
/// directories which are not locale directories can be skipped silently.
pub fn to_provider_code(tag: &str) -> Option<String> {
    let captures = LOCAL_TAG.captures(tag)?;
    let language = captures.get(1)?.as_str();
    let region = captures.get(2)?.as_str();

    if region == "latn" {
        Some(format!("{}@latin", language))
    } else {
        Some(format!("{}_{}", language, region))
    }
}

/// Map a provider code back to the local tag notation
pub fn from_provider_code(code: &str) -> String {
    code.replacen('_', "-", 1)
        .replacen('@', "-", 1)
        .replacen("latin", "latn", 1)
}

/// Check whether a string is a complete local locale tag
pub fn is_local_tag(tag: &str) -> bool {
    LOCAL_TAG.find(tag).is_some_and(|m| m.start() == 0)
}

/// Normalize a user-supplied code (either notation) to the provider notation
pub fn normalize_to_provider_code(code: &str) -> String {
    to_provider_code(code).unwrap_or_else(|| code.to_string())
}
