//! Graph container APIs used by `dagview`.
//!
//! This module contains the core `Graph` container plus a small set of helper algorithms
//! re-exported as `dagview_graphlib::alg`.

use rustc_hash::FxBuildHasher;

mod edge_key;

pub mod alg;

pub use alg::CycleError;
pub use edge_key::EdgeKey;
use edge_key::EdgeKeyView;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    id: String,
    label: N,
}

#[derive(Debug, Clone)]
struct EdgeEntry {
    key: EdgeKey,
    v_ix: usize,
    w_ix: usize,
}

/// Directed simple graph with labelled, insertion-ordered nodes and unlabelled edges.
///
/// Nodes are never removed, so dense node indices stay valid for the lifetime of the graph.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry>,
    edge_index: HashMap<EdgeKey, usize>,

    // Edge indices per node, in edge insertion order.
    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Graph<N> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            out_adj: Vec::new(),
            in_adj: Vec::new(),
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            node_index: HashMap::with_capacity_and_hasher(nodes, FxBuildHasher),
            edges: Vec::with_capacity(edges),
            edge_index: HashMap::with_capacity_and_hasher(edges, FxBuildHasher),
            out_adj: Vec::with_capacity(nodes),
            in_adj: Vec::with_capacity(nodes),
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts a node, or replaces the label of an existing one. Returns the node index.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> usize {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            self.nodes[ix].label = label;
            return ix;
        }
        let ix = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        self.node_index.insert(id, ix);
        ix
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&ix| &self.nodes[ix].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |ix| &mut self.nodes[ix].label)
    }

    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id(&self, ix: usize) -> Option<&str> {
        self.nodes.get(ix).map(|n| n.id.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Inserts an edge between two existing nodes. Setting an edge that already exists is a no-op.
    ///
    /// Returns `false` (and leaves the graph untouched) when either endpoint is missing.
    pub fn set_edge(&mut self, v: &str, w: &str) -> bool {
        let (Some(v_ix), Some(w_ix)) = (self.node_ix(v), self.node_ix(w)) else {
            return false;
        };
        if self.edge_index.contains_key(&EdgeKeyView { v, w }) {
            return true;
        }
        let ix = self.edges.len();
        let key = EdgeKey::new(v, w);
        self.edges.push(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
        });
        self.edge_index.insert(key, ix);
        self.out_adj[v_ix].push(ix);
        self.in_adj[w_ix].push(ix);
        true
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        self.edge_index.contains_key(&EdgeKeyView { v, w })
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        self.out_adj[v_ix]
            .iter()
            .map(|&e| self.edges[e].key.w.as_str())
            .collect()
    }

    /// Successor indices of `v_ix`, in edge insertion order.
    pub fn successors_ix(&self, v_ix: usize) -> impl Iterator<Item = usize> + '_ {
        self.out_adj
            .get(v_ix)
            .into_iter()
            .flatten()
            .map(|&e| self.edges[e].w_ix)
    }

    /// Predecessor indices of `w_ix`, in edge insertion order.
    pub fn predecessors_ix(&self, w_ix: usize) -> impl Iterator<Item = usize> + '_ {
        self.in_adj
            .get(w_ix)
            .into_iter()
            .flatten()
            .map(|&e| self.edges[e].v_ix)
    }

    pub fn out_degree(&self, v: &str) -> usize {
        self.node_ix(v).map(|ix| self.out_adj[ix].len()).unwrap_or(0)
    }

    pub fn in_degree(&self, v: &str) -> usize {
        self.node_ix(v).map(|ix| self.in_adj[ix].len()).unwrap_or(0)
    }
}

impl<N: Default> Graph<N> {
    /// Creates nodes as needed and chains them with edges: `a -> b -> c`.
    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for v in nodes {
            if !self.has_node(v) {
                self.set_node(*v, N::default());
            }
        }
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }
}
