// src/plan/scheduler.rs

//! Capacity-bounded topological packing of clusters into ordered terms.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use crate::catalog::{CourseId, PlanConstraints};
use crate::graph::CourseGraph;
use crate::plan::cluster::ClusterSet;

/// One term under construction / in the final schedule.
#[derive(Debug, Clone)]
pub struct TermDraft {
    /// 1-based term position.
    pub index: u32,
    /// Course indices in placement order.
    pub courses: Vec<usize>,
    /// Summed credits of the placed courses.
    pub credits: u32,
}

/// A term that had to take a unit heavier than the cap on its own.
#[derive(Debug, Clone)]
pub struct OversizedPlacement {
    pub term: u32,
    pub course_ids: Vec<CourseId>,
    pub credits: u32,
}

/// Raw scheduling outcome, before diagnostics and assembly.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub terms: Vec<TermDraft>,
    /// Course index -> 1-based term, `None` when unplaced.
    pub term_of: Vec<Option<u32>>,
    pub oversized: Vec<OversizedPlacement>,
    /// Set when `max_terms` ran out with units still waiting.
    pub exhausted_after: Option<u32>,
    /// Schedulable courses left unplaced (term exhaustion, or upstream
    /// cluster conflicts), ascending by id.
    pub unplaced: Vec<usize>,
}

/// Ready-set ordering: ascending credits, then lexical anchor id. The
/// cheap-first tie-break fills remaining capacity tightly before a new
/// term has to be opened.
type ReadyKey = (u32, CourseId, usize);

/// Pack clusters into terms.
///
/// A cluster is ready once every external prerequisite course is placed in
/// some *earlier* term; clusters unlocked by placements within the current
/// term only join the ready set when the term closes, so a prerequisite
/// never shares a term with its dependent. Each iteration places at least
/// one cluster or closes a term, so a catalog of N courses terminates in
/// at most N placement steps.
pub fn pack_terms(
    graph: &CourseGraph,
    clusters: &ClusterSet,
    constraints: &PlanConstraints,
) -> Schedule {
    let cap = constraints.max_credits_per_term;
    let n_clusters = clusters.clusters.len();

    // External prerequisites per cluster, and the reverse index used to
    // notify waiting clusters when a course lands.
    let mut unmet: Vec<usize> = vec![0; n_clusters];
    let mut waiting: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (id, cluster) in clusters.clusters.iter().enumerate() {
        if clusters.is_conflicted(id) {
            continue;
        }
        let mut external: BTreeSet<usize> = BTreeSet::new();
        for &u in &cluster.members {
            for &p in graph.prerequisites_of(u) {
                if clusters.cluster_of[p] != Some(id) {
                    external.insert(p);
                }
            }
        }
        unmet[id] = external.len();
        for p in external {
            waiting.entry(p).or_default().push(id);
        }
    }

    let mut ready: BTreeSet<ReadyKey> = (0..n_clusters)
        .filter(|&id| !clusters.is_conflicted(id) && unmet[id] == 0)
        .map(|id| ready_key(graph, clusters, id))
        .collect();

    let mut schedule = Schedule {
        terms: Vec::new(),
        term_of: vec![None; graph.len()],
        oversized: Vec::new(),
        exhausted_after: None,
        unplaced: Vec::new(),
    };
    // Clusters unlocked by placements in the current term; eligible from
    // the next term onwards.
    let mut unlocked_next: Vec<ReadyKey> = Vec::new();

    while !ready.is_empty() {
        let index = schedule.terms.len() as u32 + 1;
        if let Some(max_terms) = constraints.max_terms
            && index > max_terms
        {
            warn!(max_terms, "term budget exhausted with courses still waiting");
            schedule.exhausted_after = Some(max_terms);
            break;
        }

        let mut term = TermDraft {
            index,
            courses: Vec::new(),
            credits: 0,
        };
        debug!(term = index, "opening term");

        loop {
            let pick = ready
                .iter()
                .find(|(credits, _, _)| {
                    term.credits
                        .checked_add(*credits)
                        .is_some_and(|total| total <= cap)
                })
                .cloned();

            match pick {
                Some(key) => {
                    ready.remove(&key);
                    place(graph, clusters, key.2, &mut term, &mut schedule);
                    notify_dependents(
                        graph,
                        clusters,
                        key.2,
                        &mut unmet,
                        &waiting,
                        &mut unlocked_next,
                    );
                }
                None if term.courses.is_empty() => {
                    // Nothing fits an empty term: the cheapest ready unit is
                    // heavier than the cap. It gets a term of its own and a
                    // capacity warning instead of blocking the plan.
                    let key = ready
                        .iter()
                        .next()
                        .cloned()
                        .expect("ready set is non-empty");
                    ready.remove(&key);
                    place(graph, clusters, key.2, &mut term, &mut schedule);
                    notify_dependents(
                        graph,
                        clusters,
                        key.2,
                        &mut unmet,
                        &waiting,
                        &mut unlocked_next,
                    );
                    warn!(
                        term = index,
                        credits = term.credits,
                        cap,
                        "unit exceeds the credit cap on its own; placing it alone"
                    );
                    schedule.oversized.push(OversizedPlacement {
                        term: index,
                        course_ids: term
                            .courses
                            .iter()
                            .map(|&u| graph.id(u).to_string())
                            .collect(),
                        credits: term.credits,
                    });
                    break;
                }
                None => break,
            }
        }

        debug!(
            term = index,
            credits = term.credits,
            courses = term.courses.len(),
            "closing term"
        );
        schedule.terms.push(term);

        // Units unlocked during this term become ready for the next one.
        for key in unlocked_next.drain(..) {
            ready.insert(key);
        }
    }

    schedule.unplaced = (0..graph.len())
        .filter(|&u| {
            matches!(clusters.cluster_of[u], Some(c) if !clusters.is_conflicted(c))
                && schedule.term_of[u].is_none()
        })
        .collect();

    info!(
        terms = schedule.terms.len(),
        placed = schedule.term_of.iter().filter(|t| t.is_some()).count(),
        unplaced = schedule.unplaced.len(),
        "term packing complete"
    );

    schedule
}

fn ready_key(graph: &CourseGraph, clusters: &ClusterSet, id: usize) -> ReadyKey {
    let cluster = &clusters.clusters[id];
    (
        cluster.credits,
        graph.id(cluster.anchor()).to_string(),
        id,
    )
}

fn place(
    graph: &CourseGraph,
    clusters: &ClusterSet,
    id: usize,
    term: &mut TermDraft,
    schedule: &mut Schedule,
) {
    let cluster = &clusters.clusters[id];
    for &u in &cluster.members {
        debug!(term = term.index, course = graph.id(u), "placing course");
        term.courses.push(u);
        schedule.term_of[u] = Some(term.index);
    }
    term.credits += cluster.credits;
}

fn notify_dependents(
    graph: &CourseGraph,
    clusters: &ClusterSet,
    id: usize,
    unmet: &mut [usize],
    waiting: &BTreeMap<usize, Vec<usize>>,
    unlocked_next: &mut Vec<ReadyKey>,
) {
    for &u in &clusters.clusters[id].members {
        let Some(dependents) = waiting.get(&u) else {
            continue;
        };
        for &dep in dependents {
            unmet[dep] -= 1;
            if unmet[dep] == 0 {
                unlocked_next.push(ready_key(graph, clusters, dep));
            }
        }
    }
}
