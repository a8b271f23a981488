// src/graph/analyze.rs

use std::collections::BTreeSet;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::catalog::CourseId;
use crate::graph::course_graph::CourseGraph;

/// Outcome of cycle and reachability analysis over one course graph.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Schedulable courses in elimination order (a topological order of the
    /// acyclic, fully-resolvable subgraph).
    pub topo_order: Vec<usize>,
    /// Per-course flag: true iff every transitive prerequisite exists in
    /// the catalog and no cycle is reachable upstream.
    pub schedulable: Vec<bool>,
    /// Detected prerequisite cycles, each as its member ids in edge
    /// traversal order. A self-referencing course is a cycle of length one.
    pub cycles: Vec<Vec<CourseId>>,
    /// Courses that are not themselves cyclic or dangling but depend
    /// (transitively) on a course that is.
    pub stranded: Vec<CourseId>,
}

impl Analysis {
    pub fn is_schedulable(&self, idx: usize) -> bool {
        self.schedulable[idx]
    }
}

/// Kahn-style in-degree elimination plus cycle extraction.
///
/// Courses carrying a dangling prerequisite or corequisite reference are
/// barred from elimination up front, so everything downstream of them stays
/// un-eliminated as well. Whatever survives elimination with edges among
/// itself is then condensed into strongly connected components; components
/// with a cycle are reported, the rest are stranded dependents.
pub fn analyze(graph: &CourseGraph) -> Analysis {
    let n = graph.len();
    let blocked: Vec<bool> = (0..n).map(|u| graph.has_missing_refs(u)).collect();

    let mut indeg: Vec<u32> = graph.in_degrees().to_vec();
    let mut ready: BTreeSet<usize> = (0..n)
        .filter(|&u| indeg[u] == 0 && !blocked[u])
        .collect();

    let mut topo_order = Vec::with_capacity(n);
    let mut schedulable = vec![false; n];

    while let Some(&u) = ready.iter().next() {
        ready.remove(&u);
        schedulable[u] = true;
        topo_order.push(u);

        for &v in graph.dependents_of(u) {
            indeg[v] -= 1;
            if indeg[v] == 0 && !blocked[v] {
                ready.insert(v);
            }
        }
    }

    let remaining: Vec<usize> = (0..n).filter(|&u| !schedulable[u]).collect();
    let cycles = find_cycles(graph, &remaining, &blocked);

    let cycle_members: BTreeSet<&str> = cycles
        .iter()
        .flat_map(|c| c.iter().map(|id| id.as_str()))
        .collect();

    let stranded: Vec<CourseId> = remaining
        .iter()
        .copied()
        .filter(|&u| !blocked[u])
        .map(|u| graph.id(u))
        .filter(|id| !cycle_members.contains(id))
        .map(|id| id.to_string())
        .collect();

    if !cycles.is_empty() {
        warn!(
            cycles = cycles.len(),
            "prerequisite graph contains circular dependencies"
        );
    }
    debug!(
        total = n,
        schedulable = topo_order.len(),
        stranded = stranded.len(),
        "reachability analysis complete"
    );

    Analysis {
        topo_order,
        schedulable,
        cycles,
        stranded,
    }
}

/// Extract cycles from the residual subgraph left after elimination.
///
/// Courses with dangling references are excluded: their errors are reported
/// separately and must not distort cycle membership. Member order follows
/// edge traversal from the lexically smallest member, so the same catalog
/// always reports the same cycle the same way.
fn find_cycles(graph: &CourseGraph, remaining: &[usize], blocked: &[bool]) -> Vec<Vec<CourseId>> {
    let residual: BTreeSet<usize> = remaining
        .iter()
        .copied()
        .filter(|&u| !blocked[u])
        .collect();

    let mut sub: DiGraphMap<usize, ()> = DiGraphMap::new();
    for &u in &residual {
        sub.add_node(u);
    }
    for &u in &residual {
        for &v in graph.dependents_of(u) {
            if residual.contains(&v) {
                sub.add_edge(u, v, ());
            }
        }
    }

    let mut cycles = Vec::new();
    for scc in tarjan_scc(&sub) {
        let is_cycle = scc.len() > 1 || (scc.len() == 1 && sub.contains_edge(scc[0], scc[0]));
        if !is_cycle {
            continue;
        }

        let members: BTreeSet<usize> = scc.iter().copied().collect();
        cycles.push(traversal_order(graph, &members));
    }

    // Stable report order across runs: anchor id of each cycle.
    cycles.sort();
    cycles
}

/// Walk the cycle edge by edge starting from its lexically smallest member,
/// always taking the smallest unvisited in-component neighbour.
fn traversal_order(graph: &CourseGraph, members: &BTreeSet<usize>) -> Vec<CourseId> {
    let anchor = members
        .iter()
        .copied()
        .min_by(|&a, &b| graph.id(a).cmp(graph.id(b)))
        .expect("cycle has at least one member");

    let mut order = Vec::with_capacity(members.len());
    let mut visited: BTreeSet<usize> = BTreeSet::new();
    let mut current = anchor;

    loop {
        visited.insert(current);
        order.push(graph.id(current).to_string());

        let next = graph
            .dependents_of(current)
            .iter()
            .copied()
            .find(|v| members.contains(v) && !visited.contains(v));

        match next {
            Some(v) => current = v,
            None => break,
        }
    }

    // Components can contain interleaved cycles; anything not reached by
    // the walk is appended in id order so every member is always named.
    for &u in members {
        if !visited.contains(&u) {
            order.push(graph.id(u).to_string());
        }
    }

    order
}
