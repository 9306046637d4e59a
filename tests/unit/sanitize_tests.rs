/*!
 * Tests for pruning documents before upload
 */

use serde_json::json;

use resjson_sync::errors::ResourceError;
use resjson_sync::resource::sanitize::{prune_empty_values, prune_orphan_annotations, sanitize};
use resjson_sync::resource::ResourceDocument;

/// Test removal of empty values
#[test]
fn test_prune_empty_values_withEmptyEntries_shouldRemoveThem() {
    let mut doc = ResourceDocument::from_pairs(vec![
        ("title", json!("Title")),
        ("blank", json!("")),
        ("nothing", json!(null)),
        ("count", json!(0)),
    ]);

    let removed = prune_empty_values(&mut doc);

    assert_eq!(removed, vec!["blank", "nothing"]);
    assert!(doc.contains_key("title"));
    assert!(doc.contains_key("count"));
    assert_eq!(doc.len(), 2);
}

/// Test removal of annotations that point at missing keys
#[test]
fn test_prune_orphan_annotations_withMissingDataKey_shouldRemoveAnnotation() -> Result<(), ResourceError> {
    let mut doc = ResourceDocument::from_pairs(vec![
        ("greeting", json!("Hello")),
        ("_greeting.comment", json!("kept")),
        ("_gone.comment", json!("orphan")),
    ]);

    let removed = prune_orphan_annotations(&mut doc)?;

    assert_eq!(removed, vec!["_gone.comment"]);
    assert!(doc.contains_key("_greeting.comment"));
    assert!(!doc.contains_key("_gone.comment"));
    Ok(())
}

/// Test that removals during the pass do not change the outcome for later keys
#[test]
fn test_prune_orphan_annotations_withAnnotationOfAnnotation_shouldUseInitialKeys() -> Result<(), ResourceError> {
    // `__x.comment.comment` refers to `_x.comment`, which is itself an orphan
    let mut doc = ResourceDocument::from_pairs(vec![
        ("_x.comment", json!("orphan")),
        ("__x.comment.comment", json!("refers to the orphan")),
    ]);

    let removed = prune_orphan_annotations(&mut doc)?;

    assert_eq!(removed, vec!["_x.comment"]);
    assert!(doc.contains_key("__x.comment.comment"));
    Ok(())
}

/// Test that an underscore key without the comment shape is reported
#[test]
fn test_prune_orphan_annotations_withInvalidKey_shouldFail() {
    let mut doc = ResourceDocument::from_pairs(vec![("_private", json!("x"))]);
    assert_eq!(
        prune_orphan_annotations(&mut doc),
        Err(ResourceError::InvalidAnnotationKey("_private".to_string()))
    );
}

/// Test that an annotation becomes orphaned when its data value is empty
#[test]
fn test_sanitize_withEmptyDataValue_shouldDropItsAnnotationToo() -> Result<(), ResourceError> {
    let mut doc = ResourceDocument::from_pairs(vec![
        ("greeting", json!("")),
        ("_greeting.comment", json!("Shown on start")),
        ("farewell", json!("Bye")),
    ]);

    sanitize(&mut doc)?;

    let keys: Vec<&str> = doc.keys().collect();
    assert_eq!(keys, vec!["farewell"]);
    Ok(())
}

/// Test that sanitizing twice changes nothing the second time
#[test]
fn test_sanitize_withCleanDocument_shouldBeIdempotent() -> Result<(), ResourceError> {
    let mut doc = ResourceDocument::from_pairs(vec![
        ("a", json!("A")),
        ("_a.comment", json!("note")),
        ("b", json!([])),
        ("_c.comment", json!("orphan")),
    ]);

    sanitize(&mut doc)?;
    let once = doc.clone();
    sanitize(&mut doc)?;

    assert_eq!(doc, once);
    assert_eq!(doc.len(), 2);
    Ok(())
}
