//! Integration tests for the annotation pipeline.
//!
//! Exercises the full flow the renderer uses: raw lesson text in, ordered
//! segments out, then verse lookup per reference segment against a
//! candidate list loaded from disk.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::io::Write;

use versemark::lesson::annotate_directory;
use versemark::{
    extract_references, find_verse_text, parse_text_with_references, CitationKind, SegmentKind,
    VerseLibrary,
};

#[test]
fn test_render_flow_single_citation() {
    let text = "God loves us 'John 3:16' and saved us.";
    let segments = parse_text_with_references(text);

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].kind, SegmentKind::Text);
    assert_eq!(segments[1].kind, SegmentKind::Reference);
    assert_eq!(segments[2].kind, SegmentKind::Text);

    let reference = segments[1].reference.as_ref().unwrap();
    assert_eq!(reference.book, "John");
    assert_eq!(reference.chapter, "3");
    assert_eq!(reference.verse, "16");
}

#[test]
fn test_render_flow_mixed_kinds() {
    let text = "Mixed 'Romans 3:23' and '''John 3:16''' references";
    let citations = extract_references(text);

    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0].kind, CitationKind::Single);
    assert_eq!(citations[1].kind, CitationKind::Triple);

    let segments = parse_text_with_references(text);
    let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SegmentKind::Text,
            SegmentKind::Reference,
            SegmentKind::Text,
            SegmentKind::Reference,
            SegmentKind::Text,
        ]
    );
}

#[test]
fn test_precedence_holds_for_invalid_triple_content() {
    // The single-quote pairs inside triple markers must never surface,
    // whether or not the triple content parses
    let valid = "'''John 3:16'''";
    let found = extract_references(valid);
    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|c| c.kind == CitationKind::Triple));

    let invalid = "'''not a reference'''";
    assert!(extract_references(invalid).is_empty());
}

#[test]
fn test_segments_serialize_for_renderer() {
    let segments = parse_text_with_references("See 'John 3:16' today");
    let json = serde_json::to_string(&segments).unwrap();

    // The renderer contract: lowercase kinds, label in content, parsed
    // reference present only on reference segments
    assert!(json.contains(r#""kind":"text""#));
    assert!(json.contains(r#""kind":"reference""#));
    assert!(json.contains(r#""book":"John""#));
}

#[test]
fn test_verse_lookup_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "lesson-1": [
                {{"bookCode": "Romans", "chapter": 3, "verse": 23, "text": "For all have sinned..."}},
                {{"bookCode": "John", "chapter": "3", "verse": "16", "text": "For God so loved the world..."}}
            ]
        }}"#
    )
    .unwrap();

    let library = VerseLibrary::load(file.path()).unwrap();
    let candidates = library.candidates("lesson-1");

    let segments = parse_text_with_references("Remember '''Romans 3:23''' this week.");
    let reference = segments[1].reference.as_ref().unwrap();
    assert_eq!(
        find_verse_text(reference, candidates),
        Some("For all have sinned...")
    );

    // A reference to a chapter the lesson never fetched resolves to nothing
    let segments = parse_text_with_references("Also 'Romans 5:8' applies.");
    let reference = segments[1].reference.as_ref().unwrap();
    assert_eq!(find_verse_text(reference, candidates), None);
}

#[test]
fn test_batch_annotation_over_lesson_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("week1.txt"),
        "God loves us 'John 3:16' and saved us.",
    )
    .unwrap();
    std::fs::write(dir.path().join("week2.txt"), "No citations in this one.").unwrap();

    let reports = annotate_directory(dir.path()).unwrap();
    assert_eq!(reports.len(), 2);

    let week1 = reports
        .iter()
        .find(|r| r.path.ends_with("week1.txt"))
        .unwrap();
    assert_eq!(week1.citation_count, 1);

    let week2 = reports
        .iter()
        .find(|r| r.path.ends_with("week2.txt"))
        .unwrap();
    assert_eq!(week2.citation_count, 0);
    assert_eq!(week2.segments.len(), 1);
}
