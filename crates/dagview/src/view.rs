//! The interactive view session.
//!
//! A [`DagView`] owns the loaded graph together with every piece of mutable view state (collapse
//! flags, orientation, manual positions, drag and hover) and turns them into [`Frame`]s. Every
//! operation takes `&mut self`, so interaction handlers run one at a time.
//!
//! State changes are transactional: when rendering the changed state fails, the previous state
//! and frame stay in place and the error is kept in [`DagView::last_error`].

use crate::anchor::{anchor_points, drag_connector, fallback_path};
use crate::content::{NodeContent, node_title, node_tooltip};
use crate::direction::{Direction, apply_direction};
use crate::error::{Error, Result};
use crate::event::{DirectionChange, EventOutcome, InteractionEvent};
use crate::frame::{Frame, FrameEdge, FrameNode, Transition};
use crate::layout::compute_layout;
use crate::model::{Dataset, Point};
use crate::options::ViewOptions;
use crate::overrides::{PositionOverrides, apply_overrides};
use crate::state::NodeStates;
use crate::store::{Dag, build_graph};
use crate::visibility::visible_subgraph;
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone)]
struct DragSession {
    id: String,
    /// Node centre minus the pointer position at drag start.
    grab: Point,
    current: Point,
}

impl DragSession {
    fn follow(&self, pointer: Point) -> Point {
        Point::new(pointer.x + self.grab.x, pointer.y + self.grab.y)
    }
}

#[derive(Debug, Clone)]
pub struct DagView {
    options: ViewOptions,
    direction: Direction,
    pending_direction: Option<Direction>,
    dag: Option<Dag>,
    states: NodeStates,
    overrides: PositionOverrides,
    drag_enabled: bool,
    drag: Option<DragSession>,
    hovered: Option<String>,
    frame: Option<Frame>,
    last_error: Option<Error>,
}

impl Default for DagView {
    fn default() -> Self {
        Self::with_checked_options(ViewOptions::default())
    }
}

impl DagView {
    pub fn new(options: ViewOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::with_checked_options(options))
    }

    fn with_checked_options(options: ViewOptions) -> Self {
        Self {
            direction: options.direction,
            options,
            pending_direction: None,
            dag: None,
            states: NodeStates::default(),
            overrides: PositionOverrides::new(),
            drag_enabled: false,
            drag: None,
            hovered: None,
            frame: None,
            last_error: None,
        }
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Orientation waiting for [`DagView::confirm_direction`].
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn dag(&self) -> Option<&Dag> {
        self.dag.as_ref()
    }

    pub fn states(&self) -> &NodeStates {
        &self.states
    }

    pub fn overrides(&self) -> &PositionOverrides {
        &self.overrides
    }

    /// The last successfully rendered frame.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// The error of the most recent failed operation; cleared by the next successful render.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Tooltip text of a displayed node.
    pub fn tooltip(&self, id: &str) -> Option<&str> {
        self.frame.as_ref()?.node(id)?.tooltip.as_deref()
    }

    /// Replaces the dataset and renders it.
    ///
    /// Collapse state starts over; manual positions are kept, so nodes that survive a reload stay
    /// where they were dragged. On failure the previous dataset and frame remain.
    pub fn load(&mut self, dataset: Dataset) -> Result<&Frame> {
        // Taken for the build so the new frame starts without highlights.
        let hovered = self.hovered.take();
        let result = build_graph(dataset).and_then(|dag| {
            let states = NodeStates::from_dag(&dag);
            let frame = self.build_frame(&dag, &states, self.direction)?;
            Ok((dag, states, frame))
        });
        match result {
            Ok((dag, states, frame)) => {
                tracing::info!(
                    nodes = dag.node_count(),
                    renamed = dag.remaps().len(),
                    "loaded dataset"
                );
                self.dag = Some(dag);
                self.states = states;
                self.drag = None;
                self.pending_direction = None;
                Ok(self.commit(frame))
            }
            Err(err) => {
                self.hovered = hovered;
                Err(self.record_error(err))
            }
        }
    }

    /// Re-renders the current state.
    pub fn render(&mut self) -> Result<&Frame> {
        self.render_with_states(self.states.clone())
    }

    fn render_with_states(&mut self, states: NodeStates) -> Result<&Frame> {
        let result = match &self.dag {
            Some(dag) => self.build_frame(dag, &states, self.direction),
            None => Err(Error::input("no dataset loaded")),
        };
        match result {
            Ok(frame) => {
                self.states = states;
                Ok(self.commit(frame))
            }
            Err(err) => Err(self.record_error(err)),
        }
    }

    fn commit(&mut self, frame: Frame) -> &Frame {
        self.last_error = None;
        self.frame.insert(frame)
    }

    fn record_error(&mut self, err: Error) -> Error {
        if err.is_empty_state() {
            tracing::warn!(kind = ?err.kind(), "{err}");
        } else {
            tracing::error!(kind = ?err.kind(), "{err}");
        }
        self.last_error = Some(err.clone());
        err
    }

    fn build_frame(&self, dag: &Dag, states: &NodeStates, direction: Direction) -> Result<Frame> {
        let visible = visible_subgraph(dag, states)?;
        let layout = compute_layout(&visible, &self.options.layout_options())?;
        let layout = apply_direction(layout, direction);
        let (w, h) = (self.options.node_width, self.options.node_height);

        let mut nodes: Vec<FrameNode> = layout
            .nodes
            .iter()
            .map(|n| {
                let state = states.get(&n.id).copied().unwrap_or_default();
                let (title, tooltip, content) = match dag.node(&n.id) {
                    Some(record) => (
                        node_title(&n.id, &record.payload),
                        node_tooltip(&record.payload),
                        NodeContent::from_payload(&n.id, &record.payload),
                    ),
                    None => (n.id.clone(), None, NodeContent::Empty),
                };
                FrameNode {
                    id: n.id.clone(),
                    rank: n.rank,
                    position: n.point,
                    overridden: false,
                    collapsed: state.collapsed,
                    has_children: state.has_children,
                    title,
                    tooltip,
                    content,
                }
            })
            .collect();
        let applied = apply_overrides(&mut nodes, &self.overrides);

        let placed: HashMap<&str, (Point, bool)> = nodes
            .iter()
            .map(|n| (n.id.as_str(), (n.position, n.overridden)))
            .collect();
        let hovered = self.hovered.as_deref();

        let mut edges: Vec<FrameEdge> = Vec::with_capacity(layout.edges.len());
        for e in layout.edges {
            let (Some(&(s, s_moved)), Some(&(t, t_moved))) =
                (placed.get(e.source.as_str()), placed.get(e.target.as_str()))
            else {
                return Err(Error::layout(format!(
                    "edge {} -> {} has an endpoint without a position",
                    e.source, e.target
                )));
            };
            // Routed paths only hold while both ends sit where layout put them.
            let points = if e.points.len() >= 2 && !s_moved && !t_moved {
                let (sa, ta) = anchor_points(s, t, direction, w, h);
                let mut points = e.points;
                let last = points.len() - 1;
                points[0] = sa;
                points[last] = ta;
                points
            } else {
                fallback_path(s, t, direction, w, h)
            };
            let highlighted = hovered.is_some_and(|id| id == e.source || id == e.target);
            edges.push(FrameEdge {
                source: e.source,
                target: e.target,
                points,
                highlighted,
            });
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            overridden = applied,
            %direction,
            "built frame"
        );
        Ok(Frame {
            direction,
            node_width: w,
            node_height: h,
            nodes,
            edges,
            needs_fit: self.frame.is_none(),
            transition: Transition::from_duration(self.options.transition_duration),
        })
    }

    /// Toggles the collapse state of `id` and re-renders.
    ///
    /// Returns `Ok(false)` without rendering when drag mode is on, or when `id` is not displayed
    /// or is a leaf.
    pub fn click(&mut self, id: &str) -> Result<bool> {
        if self.drag_enabled {
            tracing::debug!(id, "click ignored in drag mode");
            return Ok(false);
        }
        if !self.frame.as_ref().is_some_and(|f| f.node(id).is_some()) {
            tracing::debug!(id, "click ignored for a node that is not displayed");
            return Ok(false);
        }
        let mut states = self.states.clone();
        let Some(collapsed) = states.toggle(id) else {
            return Ok(false);
        };
        tracing::debug!(id, collapsed, "toggled node");
        self.render_with_states(states)?;
        Ok(true)
    }

    /// Highlights the visible edges incident to `id`. Returns whether `id` is displayed.
    pub fn hover_enter(&mut self, id: &str) -> bool {
        let Some(frame) = self.frame.as_mut() else {
            return false;
        };
        if frame.node(id).is_none() {
            return false;
        }
        for e in &mut frame.edges {
            e.highlighted = e.source == id || e.target == id;
        }
        self.hovered = Some(id.to_string());
        true
    }

    /// Clears hover highlighting. Returns whether anything was highlighted.
    pub fn hover_exit(&mut self) -> bool {
        let was_hovering = self.hovered.take().is_some();
        if let Some(frame) = self.frame.as_mut() {
            for e in &mut frame.edges {
                e.highlighted = false;
            }
        }
        was_hovering
    }

    /// Switches drag mode. Turning it off abandons a drag in progress without committing it.
    pub fn set_drag_mode(&mut self, enabled: bool) -> bool {
        if self.drag_enabled == enabled {
            return false;
        }
        self.drag_enabled = enabled;
        if !enabled && self.drag.take().is_some() {
            self.discard_drag_preview();
        }
        tracing::info!(enabled, "drag mode");
        true
    }

    /// Rebuilds the frame after an uncommitted drag so the preview position and connectors go
    /// away. A failure stays in `last_error`.
    fn discard_drag_preview(&mut self) {
        tracing::debug!("drag abandoned");
        if self.dag.is_some() {
            let _ = self.render();
        }
    }

    pub fn toggle_drag_mode(&mut self) -> bool {
        self.set_drag_mode(!self.drag_enabled);
        self.drag_enabled
    }

    /// Starts dragging a displayed node. `pointer` is the pointer position in display
    /// coordinates; the node keeps its offset from the pointer while it moves.
    pub fn drag_start(&mut self, id: &str, pointer: Point) -> bool {
        if !self.drag_enabled {
            return false;
        }
        if let Some(active) = &self.drag {
            tracing::warn!(active = %active.id, id, "drag already in progress");
            return false;
        }
        let Some(position) = self.frame.as_ref().and_then(|f| f.position(id)) else {
            return false;
        };
        if !pointer.is_finite() {
            return false;
        }
        self.drag = Some(DragSession {
            id: id.to_string(),
            grab: Point::new(position.x - pointer.x, position.y - pointer.y),
            current: position,
        });
        tracing::debug!(id, "drag started");
        true
    }

    /// Moves the dragged node and reroutes its edges as drag connectors.
    ///
    /// Only the displayed frame changes; nothing is recorded until [`DagView::drag_end`].
    /// Returns the rerouted edges, or `None` when `id` is not being dragged.
    pub fn drag_move(&mut self, id: &str, pointer: Point) -> Option<Vec<FrameEdge>> {
        let drag = self.drag.as_mut().filter(|d| d.id == id)?;
        let position = drag.follow(pointer);
        if !position.is_finite() {
            return None;
        }
        drag.current = position;

        let Frame { nodes, edges, .. } = self.frame.as_mut()?;
        if let Some(node) = nodes.iter_mut().find(|n| n.id == id) {
            node.position = position;
        }
        let placed: HashMap<&str, Point> =
            nodes.iter().map(|n| (n.id.as_str(), n.position)).collect();

        let mut rerouted = Vec::new();
        for e in edges.iter_mut() {
            if e.source != id && e.target != id {
                continue;
            }
            let (Some(&s), Some(&t)) = (placed.get(e.source.as_str()), placed.get(e.target.as_str()))
            else {
                continue;
            };
            e.points = drag_connector(s, t).to_vec();
            rerouted.push(e.clone());
        }
        Some(rerouted)
    }

    /// Ends a drag and records the final position as an override, exactly once per gesture.
    pub fn drag_end(&mut self, id: &str, pointer: Point) -> bool {
        let Some(drag) = self.drag.take_if(|d| d.id == id) else {
            return false;
        };
        let position = match drag.follow(pointer) {
            p if p.is_finite() => p,
            _ => drag.current,
        };
        self.overrides.record(id, position);
        if let Some(node) = self.frame.as_mut().and_then(|f| f.node_mut(id)) {
            node.position = position;
            node.overridden = true;
        }
        tracing::info!(id, x = position.x, y = position.y, "recorded manual position");
        true
    }

    /// Requests an orientation change.
    ///
    /// With manual positions recorded, the change is parked until [`DagView::confirm_direction`]
    /// because applying it discards them.
    pub fn request_direction(&mut self, direction: Direction) -> Result<DirectionChange> {
        if direction == self.direction {
            self.pending_direction = None;
            return Ok(DirectionChange::Unchanged);
        }
        if !self.overrides.is_empty() {
            tracing::info!(
                requested = %direction,
                overrides = self.overrides.len(),
                "direction change needs confirmation"
            );
            self.pending_direction = Some(direction);
            return Ok(DirectionChange::NeedsConfirmation {
                requested: direction,
            });
        }
        self.change_direction(direction)
    }

    /// Resolves a parked orientation change. Accepting drops all manual positions.
    pub fn confirm_direction(&mut self, accept: bool) -> Result<DirectionChange> {
        let Some(direction) = self.pending_direction.take() else {
            return Ok(DirectionChange::Unchanged);
        };
        if !accept {
            tracing::info!(declined = %direction, "direction change declined");
            return Ok(DirectionChange::Declined);
        }
        let saved = std::mem::take(&mut self.overrides);
        let result = self.change_direction(direction);
        if result.is_err() {
            self.overrides = saved;
        }
        result
    }

    fn change_direction(&mut self, direction: Direction) -> Result<DirectionChange> {
        let previous = self.direction;
        let abandoned = self.drag.take().is_some();
        self.direction = direction;
        if self.dag.is_some() {
            if let Err(err) = self.render().map(|_| ()) {
                self.direction = previous;
                if abandoned {
                    self.discard_drag_preview();
                    self.last_error = Some(err.clone());
                }
                return Err(err);
            }
        }
        tracing::info!(from = %previous, to = %direction, "direction changed");
        Ok(DirectionChange::Applied)
    }

    pub fn expand_all(&mut self) -> Result<&Frame> {
        let mut states = self.states.clone();
        let changed = states.expand_all();
        tracing::debug!(changed, "expand all");
        self.render_with_states(states)
    }

    pub fn collapse_all(&mut self) -> Result<&Frame> {
        let mut states = self.states.clone();
        let changed = match &self.dag {
            Some(dag) => states.collapse_all(dag, self.options.collapse_all),
            None => 0,
        };
        tracing::debug!(changed, scope = ?self.options.collapse_all, "collapse all");
        self.render_with_states(states)
    }

    /// Drops every manual position and re-renders.
    pub fn reset_positions(&mut self) -> Result<&Frame> {
        let saved = std::mem::take(&mut self.overrides);
        if let Err(err) = self.render().map(|_| ()) {
            self.overrides = saved;
            return Err(err);
        }
        tracing::info!("reset manual positions");
        self.render_committed()
    }

    fn render_committed(&self) -> Result<&Frame> {
        self.frame
            .as_ref()
            .ok_or_else(|| Error::input("no dataset loaded"))
    }

    /// Dispatches one adapter event.
    pub fn handle(&mut self, event: InteractionEvent) -> Result<EventOutcome> {
        tracing::trace!(event = event.name(), "handling event");
        let outcome = match event {
            InteractionEvent::NodeClicked { id } => rendered_if(self.click(&id)?),
            InteractionEvent::NodeHoverEnter { id } => {
                if self.hover_enter(&id) {
                    EventOutcome::Hover {
                        tooltip: self.tooltip(&id).map(str::to_string),
                    }
                } else {
                    EventOutcome::Ignored
                }
            }
            InteractionEvent::NodeHoverExit => updated_if(self.hover_exit()),
            InteractionEvent::DragMode { enabled } => updated_if(self.set_drag_mode(enabled)),
            InteractionEvent::DragStart { id, x, y } => {
                updated_if(self.drag_start(&id, Point::new(x, y)))
            }
            InteractionEvent::DragMove { id, x, y } => match self.drag_move(&id, Point::new(x, y)) {
                Some(edges) => EventOutcome::DragPreview { edges },
                None => EventOutcome::Ignored,
            },
            InteractionEvent::DragEnd { id, x, y } => {
                updated_if(self.drag_end(&id, Point::new(x, y)))
            }
            InteractionEvent::DirectionChanged { value } => EventOutcome::Direction {
                change: self.request_direction(value)?,
            },
            InteractionEvent::DirectionConfirmed { accept } => EventOutcome::Direction {
                change: self.confirm_direction(accept)?,
            },
            InteractionEvent::ExpandAll => {
                self.expand_all()?;
                EventOutcome::Rendered
            }
            InteractionEvent::CollapseAll => {
                self.collapse_all()?;
                EventOutcome::Rendered
            }
            InteractionEvent::ResetPositions => {
                self.reset_positions()?;
                EventOutcome::Rendered
            }
        };
        Ok(outcome)
    }
}

fn rendered_if(rendered: bool) -> EventOutcome {
    if rendered {
        EventOutcome::Rendered
    } else {
        EventOutcome::Ignored
    }
}

fn updated_if(updated: bool) -> EventOutcome {
    if updated {
        EventOutcome::Updated
    } else {
        EventOutcome::Ignored
    }
}
