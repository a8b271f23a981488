// src/catalog/model.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Courses are identified by plain string ids throughout the crate.
pub type CourseId = String;

/// Top-level catalog as read from a TOML file.
///
/// ```toml
/// [constraints]
/// max_credits_per_term = 18
/// min_credits_per_term = 12
/// max_terms = 8
///
/// [course.CS101]
/// name = "Programming Fundamentals"
/// credits = 3
///
/// [course.CS102]
/// credits = 4
/// prereq = ["CS101"]
/// coreq = ["LAB102"]
/// ```
///
/// This is the *raw* shape: it has passed deserialization but not semantic
/// validation. Convert it with `Catalog::try_from` before handing it to the
/// engine.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogFile {
    /// Planning constraints from `[constraints]`.
    #[serde(default)]
    pub constraints: PlanConstraints,

    /// All courses from `[course.<ID>]`.
    ///
    /// Keys are the course ids (e.g. `"CS101"`).
    #[serde(default)]
    pub course: BTreeMap<String, CourseSpec>,
}

/// `[course.<ID>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseSpec {
    /// Optional display label; the id is used when absent.
    #[serde(default)]
    pub name: Option<String>,

    /// Credit weight of the course. Zero-credit entries (seminars,
    /// orientation) are allowed.
    pub credits: u32,

    /// Course ids that must be completed in a strictly earlier term.
    #[serde(default)]
    pub prereq: Vec<String>,

    /// Course ids that must be taken in the same term (when
    /// `enforce_coreq_together` is on).
    #[serde(default)]
    pub coreq: Vec<String>,
}

/// `[constraints]` section, also the engine-level constraint input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConstraints {
    /// Per-term credit cap. A cap of 0 is invalid.
    #[serde(default = "default_max_credits_per_term")]
    pub max_credits_per_term: u32,

    /// Optional soft floor: terms with fewer credits get a warning note.
    #[serde(default)]
    pub min_credits_per_term: Option<u32>,

    /// Optional hard ceiling on the number of terms; running out while
    /// courses remain unplaced makes the plan infeasible.
    #[serde(default)]
    pub max_terms: Option<u32>,

    /// Whether corequisite courses must land in the same term.
    #[serde(default = "default_enforce_coreq_together")]
    pub enforce_coreq_together: bool,
}

fn default_max_credits_per_term() -> u32 {
    28
}

fn default_enforce_coreq_together() -> bool {
    true
}

impl Default for PlanConstraints {
    fn default() -> Self {
        Self {
            max_credits_per_term: default_max_credits_per_term(),
            min_credits_per_term: None,
            max_terms: None,
            enforce_coreq_together: default_enforce_coreq_together(),
        }
    }
}

impl PlanConstraints {
    /// Constraints with just a credit cap, everything else defaulted.
    pub fn with_cap(cap: u32) -> Self {
        Self {
            max_credits_per_term: cap,
            ..Self::default()
        }
    }
}

/// A single normalized course as the engine sees it.
///
/// Whatever shape the input had (TOML table, bare id list, richer object),
/// ingestion flattens it into this one struct; downstream code never
/// branches on the input encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: Option<String>,
    pub credits: u32,
    pub prerequisites: Vec<CourseId>,
    pub corequisites: Vec<CourseId>,
}

impl Course {
    fn from_spec(id: CourseId, spec: CourseSpec) -> Self {
        Self {
            id,
            name: spec.name,
            credits: spec.credits,
            prerequisites: spec.prereq,
            corequisites: spec.coreq,
        }
    }
}

/// A validated catalog: the full set of courses plus constraints for one
/// planning request. Immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: BTreeMap<CourseId, Course>,
    constraints: PlanConstraints,
}

impl Catalog {
    /// Construct without re-validating. Used by `validate.rs` after its
    /// checks pass and by test builders that construct known-good data.
    pub fn new_unchecked(
        constraints: PlanConstraints,
        course_specs: BTreeMap<String, CourseSpec>,
    ) -> Self {
        let courses = course_specs
            .into_iter()
            .map(|(id, spec)| (id.clone(), Course::from_spec(id, spec)))
            .collect();
        Self {
            courses,
            constraints,
        }
    }

    /// Construct from already-normalized courses keyed by id. The map key
    /// is authoritative; callers are expected to key each course by its
    /// own id.
    pub fn from_normalized(
        constraints: PlanConstraints,
        courses: BTreeMap<CourseId, Course>,
    ) -> Self {
        Self {
            courses,
            constraints,
        }
    }

    pub fn constraints(&self) -> &PlanConstraints {
        &self.constraints
    }

    pub fn set_cap(&mut self, cap: u32) {
        self.constraints.max_credits_per_term = cap;
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Courses in ascending id order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Owned copy of the course list, for callers of the slice-based engine
    /// entry point.
    pub fn to_course_vec(&self) -> Vec<Course> {
        self.courses.values().cloned().collect()
    }
}
