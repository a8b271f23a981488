use std::error::Error;

use serde_json::Value;
use termdag::plan::wire::{self, NoteEncoding, WireNote, WirePlan};
use termdag::plan::{Note, NoteKind, build_plan, encode_plan};
use termdag_test_utils::builders::{CatalogBuilder, CourseBuilder};
use termdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn sample_plan() -> termdag::plan::PlanResult {
    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).name("Intro").build())
        .with_course(CourseBuilder::new("B").credits(4).prereq("A").build())
        .with_course(CourseBuilder::new("X").credits(20).build())
        .build();
    build_plan(&courses, &constraints)
}

#[test]
fn structured_notes_keep_kind_message_and_action() -> TestResult {
    init_tracing();

    let wire = encode_plan(&sample_plan(), NoteEncoding::Structured);
    let json: Value = serde_json::to_value(&wire)?;

    let notes = json["notes"].as_array().expect("notes is an array");
    assert!(!notes.is_empty());
    for note in notes {
        assert!(note.is_object(), "structured notes are objects: {note}");
        assert!(note["kind"].is_string());
        assert!(note["message"].is_string());
    }
    Ok(())
}

#[test]
fn prefixed_notes_are_plain_strings() -> TestResult {
    init_tracing();

    let wire = encode_plan(&sample_plan(), NoteEncoding::Prefixed);
    let json: Value = serde_json::to_value(&wire)?;

    let notes = json["notes"].as_array().expect("notes is an array");
    assert!(!notes.is_empty());
    for note in notes {
        assert!(note.is_string(), "prefixed notes are strings: {note}");
    }
    // The oversized course produced a warning; check its prefix survived.
    assert!(
        notes
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.starts_with("WARNING: "))
    );
    Ok(())
}

#[test]
fn wire_documents_use_camel_case_field_names() -> TestResult {
    init_tracing();

    let wire = encode_plan(&sample_plan(), NoteEncoding::Structured);
    let json: Value = serde_json::to_value(&wire)?;

    assert!(json.get("feasible").is_some());
    assert!(json.get("totalCredits").is_some());
    assert!(json.get("totalTerms").is_some());

    let term = &json["terms"][0];
    assert!(term.get("courseIds").is_some());
    assert!(term.get("credits").is_some());
    assert_eq!(term["courses"][0]["id"], "A");
    assert_eq!(term["courses"][0]["name"], "Intro");

    let explain = json["explain"].as_array().expect("explain is a list");
    assert!(explain.iter().all(|e| e.get("courseId").is_some()));
    Ok(())
}

#[test]
fn prefix_round_trip_recovers_the_kind() -> TestResult {
    init_tracing();

    let cases = [
        (NoteKind::Error, "circular prerequisites: A -> B"),
        (NoteKind::Warning, "term 1 exceeds recommended capacity"),
        (NoteKind::Hint, "raise the cap"),
        (NoteKind::Info, "2 course(s) skipped"),
    ];

    for (kind, message) in cases {
        let prefixed = wire::to_prefixed(&Note::new(kind, message));
        let parsed = wire::parse_prefixed(&prefixed);
        assert_eq!(parsed.kind, kind);
        assert_eq!(parsed.message, message);
    }
    Ok(())
}

#[test]
fn wire_notes_deserialize_from_either_encoding() -> TestResult {
    init_tracing();

    let from_string: WireNote = serde_json::from_value(Value::String(
        "ERROR: course 'A' requires unknown prerequisite 'Z'".into(),
    ))?;
    assert_eq!(from_string.to_note().kind, NoteKind::Error);

    let from_object: WireNote = serde_json::from_value(serde_json::json!({
        "kind": "hint",
        "message": "raise the cap",
        "action": "set max_credits_per_term = 20"
    }))?;
    let note = from_object.to_note();
    assert_eq!(note.kind, NoteKind::Hint);
    assert_eq!(note.action.as_deref(), Some("set max_credits_per_term = 20"));
    Ok(())
}

#[test]
fn serialized_plans_round_trip() -> TestResult {
    init_tracing();

    let wire = encode_plan(&sample_plan(), NoteEncoding::Structured);
    let json = serde_json::to_string(&wire)?;
    let back: WirePlan = serde_json::from_str(&json)?;
    assert_eq!(wire, back);
    Ok(())
}

#[test]
fn identical_plans_serialize_byte_identically() -> TestResult {
    init_tracing();

    let first = serde_json::to_string(&encode_plan(&sample_plan(), NoteEncoding::Structured))?;
    let second = serde_json::to_string(&encode_plan(&sample_plan(), NoteEncoding::Structured))?;
    assert_eq!(first, second);
    Ok(())
}
