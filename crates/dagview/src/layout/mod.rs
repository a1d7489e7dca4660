//! Layered layout of the visible subgraph.
//!
//! The pipeline follows the usual Sugiyama stages:
//! 1. rank: longest path from the roots (`rank`)
//! 2. normalize: split edges spanning several ranks into chains of dummy vertices (`normalize`)
//! 3. order: barycenter sweeps minimizing crossings (`order`)
//! 4. position: slot coordinates in a top-to-bottom frame (`position`)
//!
//! Output is always in the canonical top-to-bottom frame; see [`crate::direction`] for the other
//! orientations.

mod normalize;
mod order;
mod position;
mod rank;

use crate::error::{Error, Result};
use crate::model::Point;
use crate::visibility::VisibleGraph;
use dagview_graphlib::Graph;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between neighbouring nodes of one rank.
    pub node_separation: f64,
    /// Gap between consecutive ranks.
    pub level_separation: f64,
    /// Upper bound on ordering sweeps.
    pub max_sweeps: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 100.0,
            node_separation: 50.0,
            level_separation: 120.0,
            max_sweeps: 24,
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
            ("nodeSeparation", self.node_separation),
            ("levelSeparation", self.level_separation),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::input(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Distance between the centres of neighbouring slots within a rank.
    pub fn slot_step(&self) -> f64 {
        self.node_width + self.node_separation
    }

    /// Distance between the centres of consecutive ranks.
    pub fn rank_step(&self) -> f64 {
        self.node_height + self.level_separation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub rank: usize,
    pub order: usize,
    pub point: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
    /// Control points from the source centre to the target centre. Empty for edges between
    /// adjacent ranks; those get boundary anchors from the caller.
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    /// Edge crossings left by the ordering heuristic, counted on the normalized graph.
    pub crossings: usize,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.node(id).map(|n| n.point)
    }

    pub fn rank_count(&self) -> usize {
        self.nodes.iter().map(|n| n.rank + 1).max().unwrap_or(0)
    }
}

/// Lays out the visible subgraph in the canonical top-to-bottom frame.
///
/// Fails with [`Error::Layout`] when the visible structure is malformed (an edge endpoint that
/// is not a visible node, or a cycle) and with [`Error::Input`] for invalid options.
pub fn compute_layout(visible: &VisibleGraph, opts: &LayoutOptions) -> Result<Layout> {
    opts.validate()?;
    if visible.is_empty() {
        return Ok(Layout::default());
    }

    let mut g: Graph<()> = Graph::with_capacity(visible.nodes.len(), visible.edges.len());
    for n in &visible.nodes {
        g.set_node(n.id.as_str(), ());
    }
    if g.node_count() != visible.nodes.len() {
        return Err(Error::layout("the visible graph lists a node twice"));
    }
    let mut edges: Vec<(usize, usize)> = Vec::with_capacity(visible.edges.len());
    for e in &visible.edges {
        let (Some(v), Some(w)) = (g.node_ix(&e.v), g.node_ix(&e.w)) else {
            return Err(Error::layout(format!(
                "edge {} -> {} references a node outside the visible graph",
                e.v, e.w
            )));
        };
        if g.has_edge(&e.v, &e.w) {
            continue;
        }
        g.set_edge(&e.v, &e.w);
        edges.push((v, w));
    }

    let ranks = rank::longest_path(&g)?;
    let lg = normalize::split_long_edges(&ranks, &edges);
    let (layering, crossings) = order::order(&lg, opts.max_sweeps);
    let coords = position::assign(&lg, &layering, opts);

    let mut slot = vec![0usize; lg.len()];
    for layer in &layering {
        for (i, &v) in layer.iter().enumerate() {
            slot[v] = i;
        }
    }

    let nodes: Vec<LayoutNode> = visible
        .nodes
        .iter()
        .enumerate()
        .map(|(ix, n)| LayoutNode {
            id: n.id.clone(),
            rank: ranks[ix],
            order: slot[ix],
            point: coords[ix],
        })
        .collect();

    let edges: Vec<LayoutEdge> = edges
        .iter()
        .zip(&lg.chains)
        .map(|(&(v, w), chain)| {
            let points = if chain.is_empty() {
                Vec::new()
            } else {
                std::iter::once(coords[v])
                    .chain(chain.iter().map(|&d| coords[d]))
                    .chain(std::iter::once(coords[w]))
                    .collect()
            };
            LayoutEdge {
                source: visible.nodes[v].id.clone(),
                target: visible.nodes[w].id.clone(),
                points,
            }
        })
        .collect();

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        dummies = lg.len() - lg.real_count(),
        ranks = layering.len(),
        crossings,
        "computed layout"
    );
    Ok(Layout {
        nodes,
        edges,
        crossings,
    })
}
