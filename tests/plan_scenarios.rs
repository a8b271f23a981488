use std::error::Error;

use termdag::plan::{NoteKind, build_plan};
use termdag_test_utils::builders::{CatalogBuilder, CourseBuilder};
use termdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn diamond_catalog_packs_into_three_terms() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).build())
        .with_course(CourseBuilder::new("B").credits(4).prereq("A").build())
        .with_course(CourseBuilder::new("C").credits(5).prereq("A").build())
        .with_course(
            CourseBuilder::new("D")
                .credits(2)
                .prereq("B")
                .prereq("C")
                .build(),
        )
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(plan.feasible);
    assert_eq!(plan.errors().count(), 0);

    assert_eq!(plan.terms.len(), 3);
    assert_eq!(plan.terms[0].course_ids, vec!["A"]);
    assert_eq!(plan.terms[0].credits, 3);
    assert_eq!(plan.terms[1].course_ids, vec!["B", "C"]);
    assert_eq!(plan.terms[1].credits, 9);
    assert_eq!(plan.terms[2].course_ids, vec!["D"]);
    assert_eq!(plan.terms[2].credits, 2);

    assert_eq!(plan.total_terms, 3);
    assert_eq!(plan.total_credits, 14);
    Ok(())
}

#[test]
fn two_course_cycle_is_infeasible_with_one_error() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).prereq("B").build())
        .with_course(CourseBuilder::new("B").credits(3).prereq("A").build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    let errors: Vec<_> = plan.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("A"));
    assert!(errors[0].message.contains("B"));

    // Neither cyclic course may appear in any term.
    assert!(plan.term_of("A").is_none());
    assert!(plan.term_of("B").is_none());
    Ok(())
}

#[test]
fn missing_prerequisite_names_both_courses() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).prereq("Z").build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    let errors: Vec<_> = plan.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("'A'"));
    assert!(errors[0].message.contains("'Z'"));
    assert!(plan.term_of("A").is_none());
    Ok(())
}

#[test]
fn oversized_course_gets_its_own_term_and_a_warning() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("X").credits(20).build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(plan.feasible, "a warning must not make the plan infeasible");
    assert_eq!(plan.terms.len(), 1);
    assert_eq!(plan.terms[0].course_ids, vec!["X"]);
    assert_eq!(plan.terms[0].credits, 20);

    let warnings: Vec<_> = plan
        .notes
        .iter()
        .filter(|n| n.kind == NoteKind::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("term 1"));
    assert!(warnings[0].message.contains("exceeds recommended capacity"));
    Ok(())
}

#[test]
fn explain_chain_walks_the_whole_prerequisite_line() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).build())
        .with_course(CourseBuilder::new("B").credits(3).prereq("A").build())
        .with_course(CourseBuilder::new("C").credits(3).prereq("B").build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(plan.feasible);
    assert_eq!(plan.explain["C"].chain, vec!["A", "B", "C"]);
    assert_eq!(plan.explain["B"].chain, vec!["A", "B"]);
    // No prerequisites, no entry.
    assert!(!plan.explain.contains_key("A"));
    Ok(())
}

#[test]
fn feasibility_tracks_error_notes_exactly() -> TestResult {
    init_tracing();

    let (good, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).build())
        .build();
    let plan = build_plan(&good, &constraints);
    assert_eq!(plan.feasible, plan.errors().count() == 0);
    assert!(plan.feasible);

    let (bad, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).prereq("GONE").build())
        .build();
    let plan = build_plan(&bad, &constraints);
    assert_eq!(plan.feasible, plan.errors().count() == 0);
    assert!(!plan.feasible);
    Ok(())
}

#[test]
fn duplicate_course_id_is_a_single_fatal_error() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).build())
        .with_course(CourseBuilder::new("A").credits(4).build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    assert_eq!(plan.notes.len(), 1);
    assert!(plan.notes[0].is_error());
    assert!(plan.notes[0].message.contains("duplicate course id 'A'"));
    assert!(plan.terms.is_empty());
    Ok(())
}

#[test]
fn zero_cap_fails_before_scheduling() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(0)
        .with_course(CourseBuilder::new("A").credits(3).build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    assert_eq!(plan.notes.len(), 1);
    assert!(plan.notes[0].message.contains("max_credits_per_term"));
    assert!(plan.terms.is_empty());
    Ok(())
}

#[test]
fn inverted_credit_range_fails_before_scheduling() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .min_credits(12)
        .with_course(CourseBuilder::new("A").credits(3).build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    assert_eq!(plan.notes.len(), 1);
    assert!(plan.notes[0].message.contains("min_credits_per_term"));
    Ok(())
}

#[test]
fn empty_catalog_is_a_feasible_empty_plan() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new().cap(10).build();
    let plan = build_plan(&courses, &constraints);

    assert!(plan.feasible);
    assert!(plan.terms.is_empty());
    assert!(plan.notes.is_empty());
    assert_eq!(plan.total_credits, 0);
    Ok(())
}

#[test]
fn identical_input_builds_identical_plans() -> TestResult {
    init_tracing();

    let build = || {
        CatalogBuilder::new()
            .cap(9)
            .with_course(CourseBuilder::new("N1").credits(3).build())
            .with_course(CourseBuilder::new("N2").credits(3).build())
            .with_course(CourseBuilder::new("N3").credits(3).prereq("N1").build())
            .with_course(
                CourseBuilder::new("N4")
                    .credits(6)
                    .prereq("N1")
                    .prereq("N2")
                    .build(),
            )
            .build()
    };

    let (courses_a, constraints_a) = build();
    let (courses_b, constraints_b) = build();

    let first = build_plan(&courses_a, &constraints_a);
    let second = build_plan(&courses_b, &constraints_b);

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn scheduling_continues_around_a_cycle() -> TestResult {
    init_tracing();

    // A <-> B cycle plus an untangled pair; the pair must still be planned.
    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).prereq("B").build())
        .with_course(CourseBuilder::new("B").credits(3).prereq("A").build())
        .with_course(CourseBuilder::new("M1").credits(4).build())
        .with_course(CourseBuilder::new("M2").credits(4).prereq("M1").build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    assert_eq!(plan.term_of("M1"), Some(1));
    assert_eq!(plan.term_of("M2"), Some(2));
    assert!(plan.term_of("A").is_none());
    assert!(plan.term_of("B").is_none());
    Ok(())
}

#[test]
fn dependents_of_cyclic_courses_are_reported_not_scheduled() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).prereq("B").build())
        .with_course(CourseBuilder::new("B").credits(3).prereq("A").build())
        .with_course(CourseBuilder::new("C").credits(3).prereq("A").build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    assert!(plan.term_of("C").is_none());

    let info: Vec<_> = plan
        .notes
        .iter()
        .filter(|n| n.kind == NoteKind::Info)
        .collect();
    assert_eq!(info.len(), 1);
    assert!(info[0].message.contains("C"));
    Ok(())
}

#[test]
fn self_referencing_course_is_a_cycle_of_length_one() -> TestResult {
    init_tracing();

    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).prereq("A").build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    let errors: Vec<_> = plan.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("circular"));
    assert!(errors[0].message.contains("A"));
    Ok(())
}

#[test]
fn notes_are_ordered_errors_warnings_hints_info() -> TestResult {
    init_tracing();

    // Missing prereq (error), an oversized course (warning) and a stranded
    // dependent (info) in one catalog.
    let (courses, constraints) = CatalogBuilder::new()
        .cap(10)
        .with_course(CourseBuilder::new("A").credits(3).prereq("GONE").build())
        .with_course(CourseBuilder::new("B").credits(3).prereq("A").build())
        .with_course(CourseBuilder::new("X").credits(20).build())
        .build();

    let plan = build_plan(&courses, &constraints);

    assert!(!plan.feasible);
    let kinds: Vec<NoteKind> = plan.notes.iter().map(|n| n.kind).collect();
    let mut sorted = kinds.clone();
    sorted.sort();
    assert_eq!(kinds, sorted, "notes must be grouped by severity");
    assert!(kinds.contains(&NoteKind::Error));
    assert!(kinds.contains(&NoteKind::Warning));
    assert!(kinds.contains(&NoteKind::Info));
    Ok(())
}
