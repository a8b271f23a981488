// src/plan/notes.rs

//! Typed diagnostics.
//!
//! Every in-domain condition the engine can detect ends up here as a
//! [`Note`]; the feasibility flag is derived from the presence of error
//! notes and nothing else. The engine itself never returns an `Err` for
//! any of these conditions.

use serde::{Deserialize, Serialize};

use crate::catalog::PlanConstraints;
use crate::graph::{Analysis, CourseGraph};
use crate::plan::cluster::ClusterSet;
use crate::plan::scheduler::Schedule;

/// Severity of a note. Declaration order doubles as report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Error,
    Warning,
    Hint,
    Info,
}

/// A single diagnostic: what happened, and optionally what to do about it.
///
/// This tagged struct is the only in-engine representation; the
/// "ERROR: ..." string form some consumers expect is produced at the wire
/// boundary (`plan::wire`) and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub kind: NoteKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Note {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoteKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoteKind::Warning, message)
    }

    pub fn hint(message: impl Into<String>) -> Self {
        Self::new(NoteKind::Hint, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoteKind::Info, message)
    }

    pub fn new(kind: NoteKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoteKind::Error
    }
}

/// Convert analyzer and scheduler findings into notes, in production
/// order. The assembler later groups them by kind while keeping this
/// order within each kind.
pub fn build_notes(
    graph: &CourseGraph,
    analysis: &Analysis,
    clusters: &ClusterSet,
    schedule: &Schedule,
    constraints: &PlanConstraints,
) -> Vec<Note> {
    let mut notes = Vec::new();

    cycle_errors(analysis, &mut notes);
    missing_ref_errors(graph, &mut notes);
    conflict_errors(clusters, &mut notes);
    exhaustion_error(graph, schedule, &mut notes);
    capacity_warnings(constraints, schedule, &mut notes);
    min_load_warnings(constraints, schedule, &mut notes);
    hints(constraints, schedule, &mut notes);
    stranded_info(graph, analysis, schedule, &mut notes);

    notes
}

fn cycle_errors(analysis: &Analysis, notes: &mut Vec<Note>) {
    for cycle in &analysis.cycles {
        notes.push(
            Note::error(format!(
                "circular prerequisites: {}",
                cycle.join(" -> ")
            ))
            .with_action("remove or reorder one of the listed prerequisite edges"),
        );
    }
}

fn missing_ref_errors(graph: &CourseGraph, notes: &mut Vec<Note>) {
    for m in graph.missing_prereqs() {
        notes.push(
            Note::error(format!(
                "course '{}' requires unknown prerequisite '{}'",
                m.course, m.missing
            ))
            .with_action(format!(
                "add '{}' to the catalog or drop the reference from '{}'",
                m.missing, m.course
            )),
        );
    }
    for m in graph.missing_coreqs() {
        notes.push(
            Note::error(format!(
                "course '{}' lists unknown corequisite '{}'",
                m.course, m.missing
            ))
            .with_action(format!(
                "add '{}' to the catalog or drop the reference from '{}'",
                m.missing, m.course
            )),
        );
    }
}

fn conflict_errors(clusters: &ClusterSet, notes: &mut Vec<Note>) {
    for c in &clusters.conflicts {
        notes.push(
            Note::error(format!(
                "corequisite group cannot share a term: '{}' has '{}' as a prerequisite",
                c.course, c.prereq
            ))
            .with_action("split the corequisite group or drop the prerequisite edge"),
        );
    }
}

fn exhaustion_error(graph: &CourseGraph, schedule: &Schedule, notes: &mut Vec<Note>) {
    let Some(max_terms) = schedule.exhausted_after else {
        return;
    };
    let left: Vec<&str> = schedule
        .unplaced
        .iter()
        .map(|&u| graph.id(u))
        .collect();
    notes.push(
        Note::error(format!(
            "out of terms: {} course(s) unplaced after term {}: {}",
            left.len(),
            max_terms,
            left.join(", ")
        ))
        .with_action("increase max_terms or max_credits_per_term"),
    );
}

fn capacity_warnings(constraints: &PlanConstraints, schedule: &Schedule, notes: &mut Vec<Note>) {
    for o in &schedule.oversized {
        notes.push(
            Note::warning(format!(
                "term {} exceeds recommended capacity ({} > {} credits)",
                o.term, o.credits, constraints.max_credits_per_term
            ))
            .with_action(format!(
                "{} cannot be split further; raise max_credits_per_term to silence this",
                if o.course_ids.len() == 1 {
                    format!("'{}'", o.course_ids[0])
                } else {
                    format!("corequisite group {{{}}}", o.course_ids.join(", "))
                }
            )),
        );
    }
}

fn min_load_warnings(constraints: &PlanConstraints, schedule: &Schedule, notes: &mut Vec<Note>) {
    let Some(min) = constraints.min_credits_per_term else {
        return;
    };
    for term in &schedule.terms {
        if term.credits < min {
            notes.push(Note::warning(format!(
                "term {} is below the minimum load ({} < {} credits)",
                term.index, term.credits, min
            )));
        }
    }
}

/// Heuristic remediation suggestions. These never affect feasibility.
fn hints(constraints: &PlanConstraints, schedule: &Schedule, notes: &mut Vec<Note>) {
    let cap = constraints.max_credits_per_term;
    let total: u32 = schedule.terms.iter().map(|t| t.credits).sum();
    let used = schedule.terms.len() as u32;
    if cap > 0 && total > 0 {
        let full_load_terms = total.div_ceil(cap);
        if used > full_load_terms + 1 {
            notes.push(
                Note::hint(format!(
                    "plan spans {} terms; {} would suffice at full load",
                    used, full_load_terms
                ))
                .with_action("raise max_credits_per_term or relax prerequisites"),
            );
        }
    }

    if constraints.enforce_coreq_together
        && schedule.oversized.iter().any(|o| o.course_ids.len() > 1)
    {
        notes.push(
            Note::hint("an oversized corequisite group forced an overloaded term")
                .with_action("set enforce_coreq_together = false or raise the cap"),
        );
    }
}

fn stranded_info(
    graph: &CourseGraph,
    analysis: &Analysis,
    schedule: &Schedule,
    notes: &mut Vec<Note>,
) {
    // Courses that are fine on their own but sit downstream of a cycle, a
    // dangling reference or a conflicted coreq group. When the term budget
    // ran out the unplaced remainder is already covered by the error note.
    let mut skipped: Vec<String> = analysis.stranded.clone();
    if schedule.exhausted_after.is_none() {
        skipped.extend(schedule.unplaced.iter().map(|&u| graph.id(u).to_string()));
    }
    skipped.sort();
    skipped.dedup();

    if skipped.is_empty() {
        return;
    }
    notes.push(Note::info(format!(
        "{} course(s) skipped because an upstream course is unschedulable: {}",
        skipped.len(),
        skipped.join(", ")
    )));
}
