//! View configuration.

use crate::direction::Direction;
use crate::error::Result;
use crate::layout::LayoutOptions;
use crate::state::CollapseAllScope;
use serde::{Deserialize, Serialize};

/// Options of one view. Every field has a default, so partial documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewOptions {
    pub node_width: f64,
    pub node_height: f64,
    pub node_separation: f64,
    pub level_separation: f64,
    /// Node animation duration in milliseconds. Edges animate for twice as long.
    pub transition_duration: u64,
    /// Initial orientation.
    pub direction: Direction,
    pub collapse_all: CollapseAllScope,
    pub max_sweeps: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        let layout = LayoutOptions::default();
        Self {
            node_width: layout.node_width,
            node_height: layout.node_height,
            node_separation: layout.node_separation,
            level_separation: layout.level_separation,
            transition_duration: 500,
            direction: Direction::LR,
            collapse_all: CollapseAllScope::default(),
            max_sweeps: layout.max_sweeps,
        }
    }
}

impl ViewOptions {
    pub fn validate(&self) -> Result<()> {
        self.layout_options().validate()
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            node_width: self.node_width,
            node_height: self.node_height,
            node_separation: self.node_separation,
            level_separation: self.level_separation,
            max_sweeps: self.max_sweeps,
        }
    }
}
