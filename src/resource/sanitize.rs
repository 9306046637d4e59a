/*!
 * Cleanup applied to a document before it is uploaded.
 */

use std::collections::HashSet;

use log::warn;

use crate::errors::ResourceError;

use super::document::{data_key_for_annotation, is_annotation_key, is_empty_value, ResourceDocument};

/// Remove every entry whose value is empty, returning the removed keys
pub fn prune_empty_values(doc: &mut ResourceDocument) -> Vec<String> {
    let mut removed = Vec::new();
    doc.retain(|key, value| {
        if is_empty_value(value) {
            removed.push(key.to_string());
            false
        } else {
            true
        }
    });

    for key in &removed {
        warn!("Removing key {} with empty value", key);
    }
    removed
}

/// Remove annotations whose data key is not present, returning the removed keys
///
/// The set of live keys is taken once before anything is removed.
pub fn prune_orphan_annotations(doc: &mut ResourceDocument) -> Result<Vec<String>, ResourceError> {
    let live_keys: HashSet<String> = doc.keys().map(str::to_string).collect();

    let mut orphans = Vec::new();
    for key in doc.keys().filter(|k| is_annotation_key(k)) {
        let data_key = data_key_for_annotation(key)?;
        if !live_keys.contains(data_key) {
            orphans.push(key.to_string());
        }
    }

    for key in &orphans {
        warn!("Removing the orphan comment key {} from the resource upload", key);
        doc.remove(key);
    }
    Ok(orphans)
}

/// Apply both prunes in upload order
pub fn sanitize(doc: &mut ResourceDocument) -> Result<(), ResourceError> {
    prune_empty_values(doc);
    prune_orphan_annotations(doc)?;
    Ok(())
}
