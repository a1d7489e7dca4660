//! Manually dragged positions layered over computed layout.

use crate::model::Point;
use indexmap::IndexMap;
use serde::Serialize;

/// Absolute display positions keyed by node id, in recording order.
///
/// Positions are in display coordinates of the orientation they were recorded in, which is why
/// the whole map is dropped when the orientation changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PositionOverrides {
    positions: IndexMap<String, Point>,
}

impl PositionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the position of `id`. Effective from the next merge on.
    pub fn record(&mut self, id: impl Into<String>, point: Point) {
        self.positions.insert(id.into(), point);
    }

    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.positions.iter().map(|(id, p)| (id.as_str(), *p))
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

/// Something with an id and a display position that overrides can be merged into.
pub trait Positioned {
    fn id(&self) -> &str;
    fn position_mut(&mut self) -> &mut Point;
    fn set_overridden(&mut self, overridden: bool);
}

/// Replaces computed positions with recorded overrides.
///
/// Nodes with an override take it verbatim and are flagged; the rest keep their computed
/// position, or `(0, 0)` when it is not a finite number. Returns how many overrides applied.
pub fn apply_overrides<T: Positioned>(nodes: &mut [T], overrides: &PositionOverrides) -> usize {
    let mut applied = 0;
    for node in nodes.iter_mut() {
        match overrides.get(node.id()) {
            Some(p) => {
                *node.position_mut() = p;
                node.set_overridden(true);
                applied += 1;
            }
            None => {
                let pos = node.position_mut();
                if !pos.is_finite() {
                    *pos = Point::ORIGIN;
                }
                node.set_overridden(false);
            }
        }
    }
    applied
}
