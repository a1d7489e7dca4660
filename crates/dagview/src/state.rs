//! Per-node collapse state.
//!
//! Only nodes with children can collapse. Roots can be toggled directly and, unless the
//! collapse-all scope says otherwise, are exempt from collapse-all. A root is never hidden either
//! way: visibility walks start at the roots.

use crate::store::Dag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeState {
    pub collapsed: bool,
    pub has_children: bool,
    pub is_root: bool,
}

/// Which nodes `collapse-all` folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollapseAllScope {
    /// Every non-root node with children.
    #[default]
    AllNonRoots,
    /// Only non-root nodes with children that hang directly off a root. Deeper flags are kept.
    FirstLevel,
    /// Every node with children, roots included. Roots stay on screen; only their descendants
    /// fold away.
    IncludingRoots,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStates {
    states: IndexMap<String, NodeState>,
}

impl NodeStates {
    /// Initial state for a freshly built graph: everything expanded.
    pub fn from_dag(dag: &Dag) -> Self {
        let g = dag.graph();
        let states = g
            .nodes()
            .map(|id| {
                let state = NodeState {
                    collapsed: false,
                    has_children: g.out_degree(id) > 0,
                    is_root: g.in_degree(id) == 0,
                };
                (id.to_string(), state)
            })
            .collect();
        Self { states }
    }

    pub fn get(&self, id: &str) -> Option<&NodeState> {
        self.states.get(id)
    }

    pub fn is_collapsed(&self, id: &str) -> bool {
        self.states.get(id).is_some_and(|s| s.collapsed)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeState)> {
        self.states.iter().map(|(id, s)| (id.as_str(), s))
    }

    pub fn collapsed_count(&self) -> usize {
        self.states.values().filter(|s| s.collapsed).count()
    }

    /// Flips the collapse flag of a node with children and returns the new flag.
    ///
    /// Returns `None` for unknown ids and for leaves, which have no collapse affordance.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let state = self.states.get_mut(id)?;
        if !state.has_children {
            return None;
        }
        state.collapsed = !state.collapsed;
        Some(state.collapsed)
    }

    pub fn set_collapsed(&mut self, id: &str, collapsed: bool) -> bool {
        match self.states.get_mut(id) {
            Some(state) if state.has_children => {
                let changed = state.collapsed != collapsed;
                state.collapsed = collapsed;
                changed
            }
            _ => false,
        }
    }

    /// Expands every node. Returns how many flags changed.
    pub fn expand_all(&mut self) -> usize {
        let mut changed = 0;
        for state in self.states.values_mut() {
            if state.has_children && state.collapsed {
                state.collapsed = false;
                changed += 1;
            }
        }
        changed
    }

    /// Collapses non-root nodes per `scope`. Returns how many flags changed.
    pub fn collapse_all(&mut self, dag: &Dag, scope: CollapseAllScope) -> usize {
        let mut changed = 0;
        for (id, state) in self.states.iter_mut() {
            if !state.has_children || state.collapsed {
                continue;
            }
            let eligible = match scope {
                CollapseAllScope::IncludingRoots => true,
                _ if state.is_root => false,
                CollapseAllScope::AllNonRoots => true,
                CollapseAllScope::FirstLevel => {
                    dag.parents(id).iter().any(|parent| dag.is_root(parent))
                }
            };
            if eligible {
                state.collapsed = true;
                changed += 1;
            }
        }
        changed
    }
}
