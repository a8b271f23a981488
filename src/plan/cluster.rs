// src/plan/cluster.rs

//! Corequisite grouping.
//!
//! Courses linked by corequisites must share a term, so the scheduler
//! places *clusters* rather than individual courses. Without corequisites
//! (or with `enforce_coreq_together` off) every cluster is a singleton and
//! the scheduler degenerates to plain per-course packing.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::{Catalog, CourseId};
use crate::graph::{Analysis, CourseGraph};

/// One atomic placement unit: a maximal group of mutually corequisite
/// schedulable courses.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Member course indices, ascending (so `members[0]` is the anchor).
    pub members: Vec<usize>,
    /// Summed credits of all members.
    pub credits: u32,
}

impl Cluster {
    pub fn anchor(&self) -> usize {
        self.members[0]
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }
}

/// A prerequisite edge between two members of one cluster. Such a cluster
/// can never be placed: the edge demands an earlier term, the coreq link
/// demands the same term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConflict {
    pub cluster: usize,
    pub course: CourseId,
    pub prereq: CourseId,
}

/// All clusters for one planning run.
#[derive(Debug, Clone)]
pub struct ClusterSet {
    pub clusters: Vec<Cluster>,
    /// Course index -> owning cluster, `None` for unschedulable courses.
    pub cluster_of: Vec<Option<usize>>,
    /// Per-cluster flag: true when the cluster holds an internal
    /// prerequisite edge and must be excluded from scheduling.
    pub conflicted: Vec<bool>,
    pub conflicts: Vec<ClusterConflict>,
}

impl ClusterSet {
    pub fn is_conflicted(&self, cluster: usize) -> bool {
        self.conflicted[cluster]
    }
}

/// Group schedulable courses into coreq clusters.
///
/// Links are honoured symmetrically (either side listing the other joins
/// the two) but only between schedulable courses; a link to a cyclic or
/// dangling course is ignored here because that course already carries its
/// own error. Cluster ids are assigned in ascending anchor order.
pub fn build_clusters(
    graph: &CourseGraph,
    catalog: &Catalog,
    analysis: &Analysis,
    enforce: bool,
) -> ClusterSet {
    let n = graph.len();

    // Symmetric coreq adjacency among schedulable courses.
    let mut links: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    if enforce {
        for course in catalog.courses() {
            let u = match graph.index_of(&course.id) {
                Some(u) => u,
                None => continue,
            };
            if !analysis.is_schedulable(u) {
                continue;
            }
            for co_id in &course.corequisites {
                if let Some(v) = graph.index_of(co_id)
                    && v != u
                    && analysis.is_schedulable(v)
                {
                    links[u].insert(v);
                    links[v].insert(u);
                }
            }
        }
    }

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut cluster_of: Vec<Option<usize>> = vec![None; n];

    for start in 0..n {
        if !analysis.is_schedulable(start) || cluster_of[start].is_some() {
            continue;
        }

        let id = clusters.len();
        let mut members = BTreeSet::new();
        let mut queue = vec![start];
        while let Some(u) = queue.pop() {
            if !members.insert(u) {
                continue;
            }
            cluster_of[u] = Some(id);
            queue.extend(links[u].iter().copied());
        }

        let members: Vec<usize> = members.into_iter().collect();
        let credits = members.iter().map(|&u| graph.credits_of(u)).sum();
        clusters.push(Cluster { members, credits });
    }

    let (conflicted, conflicts) = find_conflicts(graph, &clusters, &cluster_of);

    debug!(
        clusters = clusters.len(),
        conflicted = conflicts.len(),
        "corequisite clustering complete"
    );

    ClusterSet {
        clusters,
        cluster_of,
        conflicted,
        conflicts,
    }
}

fn find_conflicts(
    graph: &CourseGraph,
    clusters: &[Cluster],
    cluster_of: &[Option<usize>],
) -> (Vec<bool>, Vec<ClusterConflict>) {
    let mut conflicted = vec![false; clusters.len()];
    let mut conflicts = Vec::new();

    for (id, cluster) in clusters.iter().enumerate() {
        if cluster.is_singleton() {
            continue;
        }
        for &u in &cluster.members {
            for &p in graph.prerequisites_of(u) {
                if cluster_of[p] == Some(id) {
                    conflicted[id] = true;
                    conflicts.push(ClusterConflict {
                        cluster: id,
                        course: graph.id(u).to_string(),
                        prereq: graph.id(p).to_string(),
                    });
                }
            }
        }
    }

    (conflicted, conflicts)
}
