// src/plan/mod.rs

//! The planning engine.
//!
//! - [`cluster`] groups corequisite courses into atomic placement units.
//! - [`scheduler`] packs units into ordered terms under the credit cap.
//! - [`explain`] computes longest prerequisite chains.
//! - [`notes`] turns findings into typed diagnostics.
//! - [`assemble`] packages the exported [`PlanResult`].
//! - [`wire`] handles the serialization contract, including the prefixed
//!   note encoding.
//!
//! [`build_plan`] wires the stages together. It is a pure function of its
//! inputs: it never errors for in-domain conditions, and identical inputs
//! produce identical results.

pub mod assemble;
pub mod cluster;
pub mod explain;
pub mod notes;
pub mod scheduler;
pub mod wire;

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::{Catalog, Course, CourseId, PlanConstraints};
use crate::graph::{CourseGraph, analyze};

pub use assemble::{CourseRef, PlanResult, Term};
pub use explain::ExplainEntry;
pub use notes::{Note, NoteKind};
pub use wire::{NoteEncoding, WireNote, WirePlan, encode_plan};

/// Plan a slice of courses against the given constraints.
///
/// This is the canonical engine entry point. Structural problems
/// (duplicate ids, a zero cap, an inverted credit range) abort before
/// scheduling and come back as a single fatal error note; everything else
/// is planned as far as possible, with cycles and dangling references
/// reported alongside the partial terms.
pub fn build_plan(courses: &[Course], constraints: &PlanConstraints) -> PlanResult {
    if let Some(note) = constraint_issue(constraints) {
        return assemble::assemble_failure(note);
    }

    let mut by_id: BTreeMap<CourseId, Course> = BTreeMap::new();
    for course in courses {
        if by_id.insert(course.id.clone(), course.clone()).is_some() {
            return assemble::assemble_failure(
                Note::error(format!("duplicate course id '{}' in catalog", course.id))
                    .with_action("course ids must be unique"),
            );
        }
    }

    let catalog = Catalog::from_normalized(constraints.clone(), by_id);
    plan_catalog(&catalog)
}

/// Plan an already-validated [`Catalog`].
pub fn plan_catalog(catalog: &Catalog) -> PlanResult {
    let constraints = catalog.constraints();
    if let Some(note) = constraint_issue(constraints) {
        return assemble::assemble_failure(note);
    }

    debug!(
        courses = catalog.len(),
        cap = constraints.max_credits_per_term,
        "planning catalog"
    );

    let graph = CourseGraph::build(catalog);
    let analysis = analyze(&graph);
    let clusters = cluster::build_clusters(
        &graph,
        catalog,
        &analysis,
        constraints.enforce_coreq_together,
    );
    let schedule = scheduler::pack_terms(&graph, &clusters, constraints);
    let explain = explain::explain_chains(&graph, &analysis, &schedule);
    let notes = notes::build_notes(&graph, &analysis, &clusters, &schedule, constraints);

    assemble::assemble(catalog, &graph, &schedule, notes, explain)
}

fn constraint_issue(constraints: &PlanConstraints) -> Option<Note> {
    if constraints.max_credits_per_term == 0 {
        return Some(
            Note::error("max_credits_per_term must be >= 1 (got 0)")
                .with_action("set a positive per-term credit cap"),
        );
    }
    if let Some(min) = constraints.min_credits_per_term
        && min > constraints.max_credits_per_term
    {
        return Some(
            Note::error(format!(
                "min_credits_per_term ({}) exceeds max_credits_per_term ({})",
                min, constraints.max_credits_per_term
            ))
            .with_action("lower the minimum or raise the cap"),
        );
    }
    None
}
