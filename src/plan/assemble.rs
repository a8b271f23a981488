// src/plan/assemble.rs

//! Final packaging: denormalize course data into terms, order notes, and
//! derive the feasibility verdict. No new validation happens here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, CourseId};
use crate::graph::CourseGraph;
use crate::plan::explain::ExplainEntry;
use crate::plan::notes::Note;
use crate::plan::scheduler::Schedule;

/// Denormalized course reference carried inside a term so consumers don't
/// need the catalog to render a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    pub id: CourseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub credits: u32,
}

/// One scheduled term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub index: u32,
    pub course_ids: Vec<CourseId>,
    pub courses: Vec<CourseRef>,
    pub credits: u32,
}

/// The complete planning outcome for one catalog + constraints input.
///
/// `feasible` is false exactly when `notes` holds at least one error.
/// Identical inputs always produce an identical `PlanResult`, term and
/// note order included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanResult {
    pub feasible: bool,
    pub terms: Vec<Term>,
    pub notes: Vec<Note>,
    pub explain: BTreeMap<CourseId, ExplainEntry>,
    pub total_credits: u32,
    pub total_terms: u32,
}

impl PlanResult {
    pub fn errors(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|n| n.is_error())
    }

    pub fn term_of(&self, course_id: &str) -> Option<u32> {
        self.terms
            .iter()
            .find(|t| t.course_ids.iter().any(|id| id == course_id))
            .map(|t| t.index)
    }
}

/// Assemble the exported result from the scheduling pipeline's pieces.
pub fn assemble(
    catalog: &Catalog,
    graph: &CourseGraph,
    schedule: &Schedule,
    notes: Vec<Note>,
    explain: BTreeMap<CourseId, ExplainEntry>,
) -> PlanResult {
    let terms: Vec<Term> = schedule
        .terms
        .iter()
        .map(|draft| {
            let course_ids: Vec<CourseId> = draft
                .courses
                .iter()
                .map(|&u| graph.id(u).to_string())
                .collect();
            let courses = course_ids
                .iter()
                .map(|id| course_ref(catalog, id))
                .collect();
            Term {
                index: draft.index,
                course_ids,
                courses,
                credits: draft.credits,
            }
        })
        .collect();

    let notes = ordered(notes);
    let feasible = !notes.iter().any(Note::is_error);
    let total_credits = terms.iter().map(|t| t.credits).sum();
    let total_terms = terms.len() as u32;

    debug!(feasible, total_terms, total_credits, "plan assembled");

    PlanResult {
        feasible,
        terms,
        notes,
        explain,
        total_credits,
        total_terms,
    }
}

/// Result for requests that failed structural validation before any
/// scheduling could happen: no terms, no explanations, just the fatal
/// note.
pub fn assemble_failure(note: Note) -> PlanResult {
    PlanResult {
        feasible: false,
        terms: Vec::new(),
        notes: vec![note],
        explain: BTreeMap::new(),
        total_credits: 0,
        total_terms: 0,
    }
}

/// Errors first, then warnings, hints, info; producers' order kept within
/// each kind.
fn ordered(mut notes: Vec<Note>) -> Vec<Note> {
    notes.sort_by_key(|n| n.kind);
    notes
}

fn course_ref(catalog: &Catalog, id: &str) -> CourseRef {
    match catalog.get(id) {
        Some(course) => CourseRef {
            id: course.id.clone(),
            name: course.name.clone(),
            credits: course.credits,
        },
        // Scheduled indices always come from the catalog; this arm only
        // keeps the assembler total.
        None => CourseRef {
            id: id.to_string(),
            name: None,
            credits: 0,
        },
    }
}
