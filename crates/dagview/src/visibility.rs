//! Visibility resolver: the part of the canonical graph that collapse state leaves on screen.

use crate::error::{Error, Result};
use crate::state::NodeStates;
use crate::store::Dag;
use dagview_graphlib::{EdgeKey, alg};
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleNode {
    pub id: String,
    /// Parents restricted to edges that survived filtering, in edge order.
    pub parent_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleGraph {
    /// Nodes in traversal (depth-first preorder) order.
    pub nodes: Vec<VisibleNode>,
    pub edges: Vec<EdgeKey>,
}

impl VisibleGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&VisibleNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn children_of(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.v == id)
            .map(|e| e.w.as_str())
            .collect()
    }
}

/// Computes the visible subgraph for the given collapse state.
///
/// Walks from every root in depth-first preorder. Each node is emitted once even when it is
/// reachable through several parents; an expanded node contributes all of its outgoing edges and
/// a collapsed one contributes none. Descendants reachable through some other expanded path stay
/// visible.
pub fn visible_subgraph(dag: &Dag, states: &NodeStates) -> Result<VisibleGraph> {
    let g = dag.graph();
    let expanded = |v: usize| g.node_id(v).is_some_and(|id| !states.is_collapsed(id));
    let order = alg::preorder(g, dag.root_ixs(), expanded);

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for &v in order.iter().filter(|&&v| expanded(v)) {
        edges.extend(g.successors_ix(v).map(|w| (v, w)));
    }

    if order.is_empty() {
        tracing::warn!("no visible nodes");
        return Err(Error::EmptyVisibility);
    }

    let name = |ix: usize| g.node_id(ix).unwrap_or_default().to_string();

    let mut parents: HashMap<usize, Vec<String>> = HashMap::default();
    for &(v, w) in &edges {
        parents.entry(w).or_default().push(name(v));
    }

    let nodes: Vec<VisibleNode> = order
        .iter()
        .map(|&ix| VisibleNode {
            id: name(ix),
            parent_ids: parents.remove(&ix).unwrap_or_default(),
        })
        .collect();
    let edges: Vec<EdgeKey> = edges
        .into_iter()
        .map(|(v, w)| EdgeKey::new(name(v), name(w)))
        .collect();

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        collapsed = states.collapsed_count(),
        "resolved visible subgraph"
    );
    Ok(VisibleGraph { nodes, edges })
}
