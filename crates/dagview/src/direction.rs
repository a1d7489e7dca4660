//! Display orientation.
//!
//! Layout always runs top-to-bottom. The other orientations are reached with a single linear map
//! applied to node centres and edge control points alike, so edges stay attached to their nodes.

use crate::layout::Layout;
use crate::model::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::TB, Direction::BT, Direction::LR, Direction::RL];

    /// The canonical-to-display map for this orientation.
    pub fn transform(self) -> Affine {
        match self {
            Direction::TB => Affine::IDENTITY,
            Direction::BT => Affine::new(1.0, 0.0, 0.0, -1.0),
            Direction::LR => Affine::new(0.0, 1.0, 1.0, 0.0),
            Direction::RL => Affine::new(0.0, -1.0, 1.0, 0.0),
        }
    }

    /// Whether ranks advance along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::LR | Direction::RL)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TB => "TB",
            Direction::BT => "BT",
            Direction::LR => "LR",
            Direction::RL => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(pub String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction {:?} (expected TB, BT, LR or RL)", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TB),
            "BT" => Ok(Self::BT),
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// A 2x2 linear map `(x, y) -> (a*x + b*y, c*x + d*y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.b * p.y, self.c * p.x + self.d * p.y)
    }

    /// Inverse map. Orientation maps are orthogonal, so this is their transpose; a singular map
    /// yields `None`.
    pub fn inverse(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Affine::new(
            self.d / det,
            -self.b / det,
            -self.c / det,
            self.a / det,
        ))
    }
}

/// Maps a canonical top-to-bottom layout into `direction`.
pub fn apply_direction(mut layout: Layout, direction: Direction) -> Layout {
    if direction == Direction::TB {
        return layout;
    }
    let m = direction.transform();
    for node in &mut layout.nodes {
        node.point = m.apply(node.point);
    }
    for edge in &mut layout.edges {
        for p in &mut edge.points {
            *p = m.apply(*p);
        }
    }
    layout
}
