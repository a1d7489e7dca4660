//! Edge anchor points on node boundaries.

use crate::direction::Direction;
use crate::model::Point;

/// Anchors of an edge on the source and target boundaries facing the flow direction.
///
/// `source` and `target` are node centres in display coordinates.
pub fn anchor_points(
    source: Point,
    target: Point,
    direction: Direction,
    node_width: f64,
    node_height: f64,
) -> (Point, Point) {
    let half_w = node_width / 2.0;
    let half_h = node_height / 2.0;
    let (ds, dt) = match direction {
        Direction::TB => (Point::new(0.0, half_h), Point::new(0.0, -half_h)),
        Direction::BT => (Point::new(0.0, -half_h), Point::new(0.0, half_h)),
        Direction::LR => (Point::new(half_w, 0.0), Point::new(-half_w, 0.0)),
        Direction::RL => (Point::new(-half_w, 0.0), Point::new(half_w, 0.0)),
    };
    (
        Point::new(source.x + ds.x, source.y + ds.y),
        Point::new(target.x + dt.x, target.y + dt.y),
    )
}

/// Fallback two-point path for an edge the layout did not route.
pub fn fallback_path(
    source: Point,
    target: Point,
    direction: Direction,
    node_width: f64,
    node_height: f64,
) -> Vec<Point> {
    let (s, t) = anchor_points(source, target, direction, node_width, node_height);
    vec![s, t]
}

/// Three-point connector shown while a node is being dragged.
///
/// The midpoint bows out by a fifth of the centre distance, across the dominant axis of the
/// segment.
pub fn drag_connector(source: Point, target: Point) -> [Point; 3] {
    let dx = target.x - source.x;
    let dy = target.y - source.y;
    let dist = source.distance(target);

    let mut mid = Point::new((source.x + target.x) / 2.0, (source.y + target.y) / 2.0);
    if dist > 0.0 {
        if dx.abs() > dy.abs() {
            mid.y += dist * 0.2;
        } else {
            mid.x += dist * 0.2;
        }
    }
    [source, mid, target]
}
