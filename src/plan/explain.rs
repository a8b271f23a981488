// src/plan/explain.rs

//! Longest prerequisite chains.
//!
//! For every placed course this computes the longest directed path from a
//! zero-prerequisite ancestor down to the course, which is the answer to
//! "why is this course sitting so late in the plan".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CourseId;
use crate::graph::{Analysis, CourseGraph};
use crate::plan::scheduler::Schedule;

/// The longest prerequisite chain ending at `course_id`, the course itself
/// included as the final element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainEntry {
    pub course_id: CourseId,
    pub chain: Vec<CourseId>,
}

/// Dynamic programming over the schedulable subgraph in topological order:
/// `longest(c) = 1 + max(longest(p))`, 0 without prerequisites. Ties pick
/// the lexically smallest prerequisite so reconstruction is deterministic.
///
/// Entries exist only for placed courses with at least one prerequisite;
/// cyclic, dangling and unplaced courses get none.
pub fn explain_chains(
    graph: &CourseGraph,
    analysis: &Analysis,
    schedule: &Schedule,
) -> BTreeMap<CourseId, ExplainEntry> {
    let n = graph.len();
    let mut depth: Vec<u32> = vec![0; n];
    let mut best_pred: Vec<Option<usize>> = vec![None; n];

    for &u in &analysis.topo_order {
        // Prerequisites are visited before their dependents, and they are
        // iterated in ascending index order, which is ascending id order:
        // a strict improvement check keeps the lexically smallest winner.
        for &p in graph.prerequisites_of(u) {
            if depth[p] + 1 > depth[u] {
                depth[u] = depth[p] + 1;
                best_pred[u] = Some(p);
            }
        }
    }

    let mut entries = BTreeMap::new();
    for &u in &analysis.topo_order {
        if schedule.term_of[u].is_none() || graph.prerequisites_of(u).is_empty() {
            continue;
        }

        let mut chain = Vec::with_capacity(depth[u] as usize + 1);
        let mut cursor = Some(u);
        while let Some(c) = cursor {
            chain.push(graph.id(c).to_string());
            cursor = best_pred[c];
        }
        chain.reverse();

        let course_id = graph.id(u).to_string();
        entries.insert(
            course_id.clone(),
            ExplainEntry { course_id, chain },
        );
    }

    debug!(entries = entries.len(), "explain chains computed");
    entries
}
