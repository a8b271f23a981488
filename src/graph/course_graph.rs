// src/graph/course_graph.rs

use std::collections::{BTreeSet, HashMap};

use crate::catalog::{Catalog, CourseId};

/// A dangling reference: `course` names `missing` but the catalog has no
/// such entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingRef {
    pub course: CourseId,
    pub missing: CourseId,
}

/// Index-based prerequisite graph over one catalog.
///
/// Course ids are mapped to dense indices (in ascending id order, which
/// keeps every index-ordered iteration deterministic). Edges run
/// prerequisite -> dependent. References to ids absent from the catalog
/// never become edges; they are collected in the missing-reference lists
/// and reported by the analyzer.
#[derive(Debug, Clone)]
pub struct CourseGraph {
    ids: Vec<CourseId>,
    index: HashMap<CourseId, usize>,
    credits: Vec<u32>,
    /// adj[p] = dependents of p (courses listing p as a prerequisite).
    adj: Vec<Vec<usize>>,
    /// preds[c] = prerequisites of c, deduplicated.
    preds: Vec<Vec<usize>>,
    in_degree: Vec<u32>,
    missing_prereqs: Vec<MissingRef>,
    missing_coreqs: Vec<MissingRef>,
}

impl CourseGraph {
    /// Build the graph from a validated [`Catalog`].
    ///
    /// Duplicate prerequisite entries on one course collapse to a single
    /// edge. A course listing itself is kept as a self-edge so the analyzer
    /// reports it as a cycle of length one.
    pub fn build(catalog: &Catalog) -> Self {
        let ids: Vec<CourseId> = catalog.courses().map(|c| c.id.clone()).collect();
        let index: HashMap<CourseId, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let n = ids.len();
        let credits: Vec<u32> = catalog.courses().map(|c| c.credits).collect();
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree: Vec<u32> = vec![0; n];
        let mut missing_prereqs = Vec::new();
        let mut missing_coreqs = Vec::new();

        for course in catalog.courses() {
            let u = index[&course.id];

            let mut seen: BTreeSet<usize> = BTreeSet::new();
            for pre_id in &course.prerequisites {
                match index.get(pre_id) {
                    Some(&p) => {
                        if seen.insert(p) {
                            adj[p].push(u);
                            preds[u].push(p);
                            in_degree[u] += 1;
                        }
                    }
                    None => missing_prereqs.push(MissingRef {
                        course: course.id.clone(),
                        missing: pre_id.clone(),
                    }),
                }
            }

            for co_id in &course.corequisites {
                if !index.contains_key(co_id) {
                    missing_coreqs.push(MissingRef {
                        course: course.id.clone(),
                        missing: co_id.clone(),
                    });
                }
            }
        }

        for dependents in &mut adj {
            dependents.sort_unstable();
        }
        for prereqs in &mut preds {
            prereqs.sort_unstable();
        }
        missing_prereqs.sort();
        missing_prereqs.dedup();
        missing_coreqs.sort();
        missing_coreqs.dedup();

        Self {
            ids,
            index,
            credits,
            adj,
            preds,
            in_degree,
            missing_prereqs,
            missing_coreqs,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id(&self, idx: usize) -> &str {
        &self.ids[idx]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn credits_of(&self, idx: usize) -> u32 {
        self.credits[idx]
    }

    /// Immediate dependents of a course (courses that list it as a
    /// prerequisite).
    pub fn dependents_of(&self, idx: usize) -> &[usize] {
        &self.adj[idx]
    }

    /// Immediate prerequisites of a course, restricted to ids present in
    /// the catalog.
    pub fn prerequisites_of(&self, idx: usize) -> &[usize] {
        &self.preds[idx]
    }

    pub fn in_degree(&self, idx: usize) -> u32 {
        self.in_degree[idx]
    }

    pub fn out_degree(&self, idx: usize) -> usize {
        self.adj[idx].len()
    }

    pub fn in_degrees(&self) -> &[u32] {
        &self.in_degree
    }

    /// Prerequisite references pointing outside the catalog.
    pub fn missing_prereqs(&self) -> &[MissingRef] {
        &self.missing_prereqs
    }

    /// Corequisite references pointing outside the catalog.
    pub fn missing_coreqs(&self) -> &[MissingRef] {
        &self.missing_coreqs
    }

    /// Whether the course has at least one dangling prerequisite or
    /// corequisite reference.
    pub fn has_missing_refs(&self, idx: usize) -> bool {
        let id = self.id(idx);
        self.missing_prereqs.iter().any(|m| m.course == id)
            || self.missing_coreqs.iter().any(|m| m.course == id)
    }
}
