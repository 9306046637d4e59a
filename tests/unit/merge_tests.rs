/*!
 * Tests for the structural merge of translated values
 */

use serde_json::json;

use resjson_sync::resource::{reorder_and_replace, reorder_and_replace_text, ResourceDocument};

const SOURCE: &str = "{\n    // Application strings\n    \"app.title\": \"Resource Sync\",\n    \"_app.title.comment\": \"Shown in the title bar\",\n    \"greeting\" : \"Hello\",\n    \"farewell\":\"Goodbye\"\n}\n";

/// Test that the merged text follows the source layout byte for byte
#[test]
fn test_reorder_and_replace_withShuffledTranslation_shouldKeepSourceLayout() {
    let translated = ResourceDocument::from_pairs(vec![
        ("farewell", json!("Näkemiin")),
        ("greeting", json!("Hei")),
        ("app.title", json!("Resurssisynkka")),
    ]);

    let report = reorder_and_replace(SOURCE, &translated).expect("merge should succeed");

    let expected = "{\n    // Application strings\n    \"app.title\": \"Resurssisynkka\",\n    \"_app.title.comment\": \"Shown in the title bar\",\n    \"greeting\" : \"Hei\",\n    \"farewell\":\"Näkemiin\"\n}\n";
    assert_eq!(report.text, expected);
    assert!(report.is_complete());
    assert_eq!(report.replaced.len(), 3);
}

/// Test that an empty translation leaves the source untouched
#[test]
fn test_reorder_and_replace_withEmptyTranslation_shouldReturnSource() {
    let report = reorder_and_replace(SOURCE, &ResourceDocument::default()).expect("merge");
    assert_eq!(report.text, SOURCE);
    assert!(report.replaced.is_empty());
}

/// Test that translated annotations never replace source annotations
#[test]
fn test_reorder_and_replace_withTranslatedAnnotation_shouldKeepSourceAnnotation() {
    let translated = ResourceDocument::from_pairs(vec![
        ("_app.title.comment", json!("Käännetty kommentti")),
        ("app.title", json!("Otsikko")),
    ]);

    let report = reorder_and_replace(SOURCE, &translated).expect("merge");

    assert!(report.text.contains("\"_app.title.comment\": \"Shown in the title bar\""));
    assert!(report.text.contains("\"app.title\": \"Otsikko\""));
}

/// Test that keys missing from the source are reported, not inserted
#[test]
fn test_reorder_and_replace_withUnknownKey_shouldReportUnmatched() {
    let translated = ResourceDocument::from_pairs(vec![
        ("greeting", json!("Hej")),
        ("obsolete", json!("Gammal")),
    ]);

    let report = reorder_and_replace(SOURCE, &translated).expect("merge");

    assert_eq!(report.unmatched, vec!["obsolete"]);
    assert!(!report.is_complete());
    assert!(!report.text.contains("Gammal"));
    assert!(report.text.contains("\"greeting\" : \"Hej\""));
}

/// Test that translations needing escapes are written as valid strings
#[test]
fn test_reorder_and_replace_withQuotesInValue_shouldEscapeThem() {
    let translated = ResourceDocument::from_pairs(vec![("greeting", json!("Say \"hi\"\n"))]);

    let report = reorder_and_replace(SOURCE, &translated).expect("merge");

    assert!(report.text.contains(r#""greeting" : "Say \"hi\"\n""#));
    let reparsed = ResourceDocument::parse(&report.text).expect("merged text should parse");
    assert_eq!(reparsed.get("greeting"), Some(&json!("Say \"hi\"\n")));
}

/// Test that source values containing escaped quotes are fully replaced
#[test]
fn test_reorder_and_replace_withEscapedSourceValue_shouldReplaceWholeValue() {
    let source = r#"{"quote": "He said \"no\"", "next": "x"}"#;
    let translated = ResourceDocument::from_pairs(vec![("quote", json!("Hän sanoi ei"))]);

    let report = reorder_and_replace(source, &translated).expect("merge");

    assert_eq!(report.text, r#"{"quote": "Hän sanoi ei", "next": "x"}"#);
}

/// Test that dotted keys only match themselves
#[test]
fn test_reorder_and_replace_withDottedKey_shouldNotMatchSimilarKeys() {
    let source = r#"{"a.b": "one", "axb": "two", "subtitle": "three", "title": "four"}"#;
    let translated = ResourceDocument::from_pairs(vec![
        ("a.b", json!("yksi")),
        ("title", json!("neljä")),
    ]);

    let report = reorder_and_replace(source, &translated).expect("merge");

    assert_eq!(
        report.text,
        r#"{"a.b": "yksi", "axb": "two", "subtitle": "three", "title": "neljä"}"#
    );
}

/// Test the text entry point with relaxed translated text
#[test]
fn test_reorder_and_replace_text_withRelaxedTranslation_shouldMerge() {
    let translated_text = "{\n  // pulled\n  'greeting': 'Hallo',\n}";

    let report = reorder_and_replace_text(SOURCE, translated_text, "de-DE/main.resjson")
        .expect("merge");

    assert!(report.text.contains("\"greeting\" : \"Hallo\""));
    assert!(report.text.contains("\"farewell\":\"Goodbye\""));
}

/// Test that unparseable translated text is an error
#[test]
fn test_reorder_and_replace_text_withMalformedTranslation_shouldFail() {
    assert!(reorder_and_replace_text(SOURCE, "{\"greeting\": ", "broken").is_err());
}

/// Test that keys written with escapes in the source still find their value
#[test]
fn test_reorder_and_replace_withEscapedKeys_shouldMatchDecodedKey() {
    let source = "{\n  \"say \\\"hi\\\"\": \"Say hi\",\n  \"k\\u00e4y\": \"Go\"\n}";
    let translated = ResourceDocument::from_pairs(vec![
        ("say \"hi\"", json!("Sano hei")),
        ("käy", json!("Mene")),
    ]);

    let report = reorder_and_replace(source, &translated).expect("merge");

    assert!(report.is_complete(), "unmatched: {:?}", report.unmatched);
    assert_eq!(
        report.text,
        "{\n  \"say \\\"hi\\\"\": \"Sano hei\",\n  \"k\\u00e4y\": \"Mene\"\n}"
    );
}

/// Test that commented-out assignments are copied through untouched
#[test]
fn test_reorder_and_replace_withCommentedAssignment_shouldLeaveCommentAlone() {
    let source = "{\n  // \"greeting\": \"old\"\n  /* \"greeting\": \"older\" */\n  \"greeting\": \"Hello\"\n}";
    let translated = ResourceDocument::from_pairs(vec![("greeting", json!("Hei"))]);

    let report = reorder_and_replace(source, &translated).expect("merge");

    assert_eq!(
        report.text,
        "{\n  // \"greeting\": \"old\"\n  /* \"greeting\": \"older\" */\n  \"greeting\": \"Hei\"\n}"
    );
}
