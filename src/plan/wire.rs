// src/plan/wire.rs

//! Wire contract for plan consumers.
//!
//! Notes travel either as structured objects (preferred, keeps `action`)
//! or as prefixed strings ("ERROR: ...", "WARNING: ...", "HINT: ...",
//! bare = info). The prefix convention lives in this module and nowhere
//! else; the rest of the crate only ever sees [`Note`].

use serde::{Deserialize, Serialize};

use crate::plan::assemble::{PlanResult, Term};
use crate::plan::explain::ExplainEntry;
use crate::plan::notes::{Note, NoteKind};

/// How notes are rendered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteEncoding {
    /// `{kind, message, action?}` objects. Lossless.
    #[default]
    Structured,
    /// `"ERROR: ..."` style strings. Drops `action`.
    Prefixed,
}

/// A note as it appears in serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireNote {
    Structured(Note),
    Text(String),
}

impl WireNote {
    /// Back to the internal representation, inferring the kind from the
    /// prefix for the string form.
    pub fn to_note(&self) -> Note {
        match self {
            WireNote::Structured(note) => note.clone(),
            WireNote::Text(s) => parse_prefixed(s),
        }
    }
}

/// The serialized plan document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePlan {
    pub feasible: bool,
    pub terms: Vec<Term>,
    pub notes: Vec<WireNote>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explain: Vec<ExplainEntry>,
    pub total_credits: u32,
    pub total_terms: u32,
}

/// Flatten a [`PlanResult`] into the wire document.
pub fn encode_plan(plan: &PlanResult, encoding: NoteEncoding) -> WirePlan {
    let notes = plan
        .notes
        .iter()
        .map(|note| match encoding {
            NoteEncoding::Structured => WireNote::Structured(note.clone()),
            NoteEncoding::Prefixed => WireNote::Text(to_prefixed(note)),
        })
        .collect();

    WirePlan {
        feasible: plan.feasible,
        terms: plan.terms.clone(),
        notes,
        explain: plan.explain.values().cloned().collect(),
        total_credits: plan.total_credits,
        total_terms: plan.total_terms,
    }
}

/// Render a note in the prefixed-string form. Info notes carry no prefix.
pub fn to_prefixed(note: &Note) -> String {
    match note.kind {
        NoteKind::Error => format!("ERROR: {}", note.message),
        NoteKind::Warning => format!("WARNING: {}", note.message),
        NoteKind::Hint => format!("HINT: {}", note.message),
        NoteKind::Info => note.message.clone(),
    }
}

/// Parse a prefixed string back into a note. Unprefixed strings are info.
pub fn parse_prefixed(s: &str) -> Note {
    let tagged = [
        ("ERROR:", NoteKind::Error),
        ("WARNING:", NoteKind::Warning),
        ("HINT:", NoteKind::Hint),
    ];
    for (prefix, kind) in tagged {
        if let Some(rest) = s.strip_prefix(prefix) {
            return Note::new(kind, rest.trim_start());
        }
    }
    Note::info(s)
}
