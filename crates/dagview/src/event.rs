//! Interaction events delivered by the rendering adapter.

use crate::direction::Direction;
use crate::frame::FrameEdge;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum InteractionEvent {
    NodeClicked { id: String },
    NodeHoverEnter { id: String },
    NodeHoverExit,
    DragMode { enabled: bool },
    DragStart { id: String, x: f64, y: f64 },
    DragMove { id: String, x: f64, y: f64 },
    DragEnd { id: String, x: f64, y: f64 },
    DirectionChanged { value: Direction },
    DirectionConfirmed { accept: bool },
    ExpandAll,
    CollapseAll,
    ResetPositions,
}

impl InteractionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionEvent::NodeClicked { .. } => "node-clicked",
            InteractionEvent::NodeHoverEnter { .. } => "node-hover-enter",
            InteractionEvent::NodeHoverExit => "node-hover-exit",
            InteractionEvent::DragMode { .. } => "drag-mode",
            InteractionEvent::DragStart { .. } => "drag-start",
            InteractionEvent::DragMove { .. } => "drag-move",
            InteractionEvent::DragEnd { .. } => "drag-end",
            InteractionEvent::DirectionChanged { .. } => "direction-changed",
            InteractionEvent::DirectionConfirmed { .. } => "direction-confirmed",
            InteractionEvent::ExpandAll => "expand-all",
            InteractionEvent::CollapseAll => "collapse-all",
            InteractionEvent::ResetPositions => "reset-positions",
        }
    }
}

/// Result of an orientation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DirectionChange {
    /// Already the active orientation, or nothing was pending.
    Unchanged,
    /// The orientation changed and the view re-rendered.
    Applied,
    /// Manual positions exist; the change waits for a confirmation.
    NeedsConfirmation { requested: Direction },
    /// The pending change was declined; the orientation stays as it was.
    Declined,
}

/// What handling one event did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum EventOutcome {
    /// Nothing changed.
    Ignored,
    /// A new frame was produced.
    Rendered,
    /// The current frame was patched in place (highlights, flags, a committed drag).
    Updated,
    Hover { tooltip: Option<String> },
    DragPreview { edges: Vec<FrameEdge> },
    Direction { change: DirectionChange },
}
