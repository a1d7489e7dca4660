//! Render frames: what the rendering adapter draws.

use crate::content::NodeContent;
use crate::direction::Direction;
use crate::model::Point;
use crate::overrides::Positioned;
use serde::Serialize;

/// Margin kept around the bounding box when fitting a frame to a viewport.
pub const FIT_MARGIN: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameNode {
    pub id: String,
    pub rank: usize,
    /// Centre in display coordinates.
    #[serde(flatten)]
    pub position: Point,
    /// The position comes from a manual drag rather than layout.
    pub overridden: bool,
    pub collapsed: bool,
    pub has_children: bool,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    pub content: NodeContent,
}

impl Positioned for FrameNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn position_mut(&mut self) -> &mut Point {
        &mut self.position
    }

    fn set_overridden(&mut self, overridden: bool) {
        self.overridden = overridden;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEdge {
    pub source: String,
    pub target: String,
    pub points: Vec<Point>,
    pub highlighted: bool,
}

/// Animation hints. Edges take twice as long as nodes so they never lag behind visibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub node_ms: u64,
    pub edge_ms: u64,
}

impl Transition {
    pub fn from_duration(duration_ms: u64) -> Self {
        Self {
            node_ms: duration_ms,
            edge_ms: duration_ms.saturating_mul(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub direction: Direction,
    pub node_width: f64,
    pub node_height: f64,
    pub nodes: Vec<FrameNode>,
    pub edges: Vec<FrameEdge>,
    /// Set on the first frame of a session: the adapter should fit it to the viewport.
    pub needs_fit: bool,
    pub transition: Transition,
}

impl Frame {
    pub fn node(&self, id: &str) -> Option<&FrameNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut FrameNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.node(id).map(|n| n.position)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&FrameEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn highlighted_edges(&self) -> impl Iterator<Item = &FrameEdge> {
        self.edges.iter().filter(|e| e.highlighted)
    }

    /// Bounding box of all node rectangles. `None` for an empty frame.
    pub fn bounds(&self) -> Option<Bounds> {
        let half_w = self.node_width / 2.0;
        let half_h = self.node_height / 2.0;
        self.nodes.iter().fold(None, |acc, n| {
            let b = Bounds {
                min_x: n.position.x - half_w,
                min_y: n.position.y - half_h,
                max_x: n.position.x + half_w,
                max_y: n.position.y + half_h,
            };
            Some(match acc {
                None => b,
                Some(acc) => acc.union(&b),
            })
        })
    }

    /// Transform that centres the frame in a `width` x `height` viewport, scaled so the bounding
    /// box plus [`FIT_MARGIN`] fits.
    pub fn fit(&self, width: f64, height: f64) -> Option<ViewTransform> {
        let b = self.bounds()?;
        let scale = (width / (b.width() + FIT_MARGIN)).min(height / (b.height() + FIT_MARGIN));
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let centre = b.centre();
        Some(ViewTransform {
            scale,
            translate_x: width / 2.0 - centre.x * scale,
            translate_y: height / 2.0 - centre.y * scale,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn centre(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Viewport transform: `screen = world * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewTransform {
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }
}
