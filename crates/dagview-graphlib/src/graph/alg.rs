//! Helper algorithms over [`Graph`].

use super::Graph;
use std::collections::VecDeque;
use std::fmt;

/// Returned by [`topsort`] when the graph is not acyclic.
///
/// `nodes` lists every node that could not be ordered (each one lies on, or downstream of, a
/// cycle), in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    pub nodes: Vec<String>,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph contains a cycle through [{}]", self.nodes.join(", "))
    }
}

impl std::error::Error for CycleError {}

/// Kahn topological sort. Sources are seeded in insertion order and successors are released in
/// edge insertion order, so the result is deterministic.
pub fn topsort<N>(g: &Graph<N>) -> Result<Vec<usize>, CycleError> {
    let n = g.node_count();
    let mut indegree: Vec<usize> = (0..n).map(|ix| g.in_adj[ix].len()).collect();
    let mut queue: VecDeque<usize> = (0..n).filter(|&ix| indegree[ix] == 0).collect();

    let mut out: Vec<usize> = Vec::with_capacity(n);
    while let Some(v) = queue.pop_front() {
        out.push(v);
        for w in g.successors_ix(v) {
            indegree[w] -= 1;
            if indegree[w] == 0 {
                queue.push_back(w);
            }
        }
    }

    if out.len() == n {
        return Ok(out);
    }

    let nodes = (0..n)
        .filter(|&ix| indegree[ix] > 0)
        .filter_map(|ix| g.node_id(ix).map(str::to_string))
        .collect();
    Err(CycleError { nodes })
}

/// Depth-first preorder from `roots`, visiting each node once.
///
/// Uses an explicit stack; children are visited in edge insertion order, matching what a
/// recursive walk would produce. The walk only continues below a node when `descend` returns
/// `true` for it; the node itself is still emitted.
pub fn preorder<N>(
    g: &Graph<N>,
    roots: &[usize],
    mut descend: impl FnMut(usize) -> bool,
) -> Vec<usize> {
    let mut visited = vec![false; g.node_count()];
    let mut out: Vec<usize> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for &root in roots.iter().rev() {
        stack.push(root);
    }
    while let Some(v) = stack.pop() {
        if v >= visited.len() || visited[v] {
            continue;
        }
        visited[v] = true;
        out.push(v);
        if !descend(v) {
            continue;
        }

        let children: Vec<usize> = g.successors_ix(v).collect();
        for &w in children.iter().rev() {
            if !visited[w] {
                stack.push(w);
            }
        }
    }
    out
}
