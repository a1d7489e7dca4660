//! Coordinate assignment in the canonical top-to-bottom frame.

use super::LayoutOptions;
use super::normalize::LayerGraph;
use crate::model::Point;

/// Places every vertex (dummies included) at its slot centre.
///
/// Ranks are stacked `rank_step()` apart on y. Within a rank, slots are `slot_step()` apart on x
/// and the rank is centred on `x = 0`, so ranks of different widths stay balanced.
pub(crate) fn assign(
    lg: &LayerGraph,
    layering: &[Vec<usize>],
    opts: &LayoutOptions,
) -> Vec<Point> {
    let mut points = vec![Point::ORIGIN; lg.len()];
    let slot = opts.slot_step();
    let step = opts.rank_step();

    for (rank, layer) in layering.iter().enumerate() {
        let y = rank as f64 * step;
        let mid = (layer.len() as f64 - 1.0) / 2.0;
        for (order, &v) in layer.iter().enumerate() {
            points[v] = Point::new((order as f64 - mid) * slot, y);
        }
    }
    points
}
