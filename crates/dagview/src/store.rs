//! Graph store: builds the canonical DAG from a flat dataset.
//!
//! Loading is all-or-nothing. Duplicate ids are renamed deterministically, then the edge list is
//! checked for dangling endpoints and cycles; any structural problem aborts the build.

use crate::error::{Error, Result, StructureError};
use crate::model::Dataset;
use dagview_graphlib::{Graph, alg};
use indexmap::IndexMap;
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRecord {
    pub payload: Map<String, Value>,
    /// Canonical parent ids, in edge input order.
    pub parent_ids: Vec<String>,
}

/// One renamed duplicate: the `index`-th input record was renamed from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdRemap {
    pub index: usize,
    pub from: String,
    pub to: String,
}

/// The canonical graph of one loaded dataset.
#[derive(Debug, Clone)]
pub struct Dag {
    graph: Graph<NodeRecord>,
    roots: Vec<usize>,
    remaps: Vec<IdRemap>,
}

impl Dag {
    pub fn graph(&self) -> &Graph<NodeRecord> {
        &self.graph
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.graph.node(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.graph.has_node(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Root node indices (no parents), in input order.
    pub fn root_ixs(&self) -> &[usize] {
        &self.roots
    }

    pub fn roots(&self) -> Vec<&str> {
        self.roots
            .iter()
            .filter_map(|&ix| self.graph.node_id(ix))
            .collect()
    }

    pub fn is_root(&self, id: &str) -> bool {
        self.graph.in_degree(id) == 0 && self.graph.has_node(id)
    }

    pub fn children(&self, id: &str) -> Vec<&str> {
        self.graph.successors(id)
    }

    pub fn parents(&self, id: &str) -> &[String] {
        self.graph
            .node(id)
            .map(|n| n.parent_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Duplicate ids renamed during the build, in input order.
    pub fn remaps(&self) -> &[IdRemap] {
        &self.remaps
    }
}

/// Builds the canonical DAG.
///
/// Fails with [`Error::Input`] for an empty node list and with [`Error::Structure`] for cycles
/// and dangling edge endpoints.
pub fn build_graph(dataset: Dataset) -> Result<Dag> {
    let Dataset { nodes, links } = dataset;
    if nodes.is_empty() {
        return Err(Error::input("the dataset has no nodes"));
    }
    tracing::info!(nodes = nodes.len(), links = links.len(), "building dag");

    let (ids, renamed_to, remaps) = resolve_duplicate_ids(nodes.iter().map(|n| n.id.as_str()))?;

    let mut graph: Graph<NodeRecord> = Graph::with_capacity(nodes.len(), links.len());
    for (node, id) in nodes.into_iter().zip(ids) {
        graph.set_node(
            id,
            NodeRecord {
                payload: node.payload,
                parent_ids: Vec::new(),
            },
        );
    }

    let mut collapsed_parallel = 0usize;
    for link in &links {
        let source = renamed_to.get(&link.source).unwrap_or(&link.source);
        let target = renamed_to.get(&link.target).unwrap_or(&link.target);
        for endpoint in [source, target] {
            if !graph.has_node(endpoint) {
                return Err(StructureError::DanglingEndpoint {
                    from: source.clone(),
                    to: target.clone(),
                    missing: endpoint.clone(),
                }
                .into());
            }
        }
        if source == target {
            return Err(StructureError::Cycle {
                nodes: vec![source.clone()],
            }
            .into());
        }
        if graph.has_edge(source, target) {
            collapsed_parallel += 1;
            continue;
        }
        graph.set_edge(source, target);
    }
    if collapsed_parallel > 0 {
        tracing::debug!(count = collapsed_parallel, "collapsed parallel edges");
    }

    alg::topsort(&graph).map_err(StructureError::from)?;

    let parent_ids: Vec<Vec<String>> = (0..graph.node_count())
        .map(|ix| {
            graph
                .predecessors_ix(ix)
                .filter_map(|p| graph.node_id(p).map(str::to_string))
                .collect()
        })
        .collect();
    let node_ids = graph.node_ids();
    for (id, parents) in node_ids.iter().zip(parent_ids) {
        if let Some(record) = graph.node_mut(id) {
            record.parent_ids = parents;
        }
    }

    let roots: Vec<usize> = (0..graph.node_count())
        .filter(|&ix| graph.predecessors_ix(ix).next().is_none())
        .collect();
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        roots = roots.len(),
        "dag built"
    );

    Ok(Dag {
        graph,
        roots,
        remaps,
    })
}

type Resolution = (Vec<String>, IndexMap<String, String>, Vec<IdRemap>);

/// Assigns every input record a unique id.
///
/// The first occurrence of an id keeps it; later occurrences become `<id>_<n>` with the smallest
/// `n >= 1` that collides with neither an input id nor an earlier generated one. The returned map
/// sends each duplicated id to its first renamed instance, which is where edge endpoints naming
/// that id are redirected.
fn resolve_duplicate_ids<'a>(input: impl Iterator<Item = &'a str> + Clone) -> Result<Resolution> {
    let mut taken: HashSet<String> = input.clone().map(str::to_string).collect();
    let mut seen: HashSet<&str> = HashSet::default();
    let mut next_suffix: IndexMap<&str, usize> = IndexMap::new();

    let mut ids: Vec<String> = Vec::new();
    let mut renamed_to: IndexMap<String, String> = IndexMap::new();
    let mut remaps: Vec<IdRemap> = Vec::new();

    for (index, id) in input.enumerate() {
        if seen.insert(id) {
            ids.push(id.to_string());
            continue;
        }

        let suffix = next_suffix.entry(id).or_insert(1);
        let limit = *suffix + taken.len() + 1;
        let fresh = loop {
            if *suffix > limit {
                return Err(StructureError::UnresolvedDuplicate { id: id.to_string() }.into());
            }
            let candidate = format!("{id}_{suffix}");
            *suffix += 1;
            if !taken.contains(&candidate) {
                break candidate;
            }
        };

        tracing::warn!(from = id, to = %fresh, "renamed duplicate node id");
        taken.insert(fresh.clone());
        renamed_to
            .entry(id.to_string())
            .or_insert_with(|| fresh.clone());
        remaps.push(IdRemap {
            index,
            from: id.to_string(),
            to: fresh.clone(),
        });
        ids.push(fresh);
    }

    Ok((ids, renamed_to, remaps))
}
