//! Compiled turtle geometry: primitives, bounds and laid-out canvases.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A single entry of a compiled drawing, in stream order.
///
/// Polygon runs are flat: a [`Primitive::PolygonBegin`], the moves made while
/// the polygon is open (each one a vertex), then [`Primitive::PolygonEnd`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// A drawn line from an `F` move.
    Segment { from: DVec2, to: DVec2 },
    /// A pen-up move from an `f` move.
    Travel { from: DVec2, to: DVec2 },
    /// Pen relocation after a branch close restores a saved state.
    Restore { to: DVec2 },
    /// Start of a filled polygon at the turtle's current position.
    PolygonBegin { origin: DVec2 },
    /// End of the open polygon.
    PolygonEnd,
}

/// Axis-aligned bounds of everything the turtle visited.
///
/// Seeded at the turtle's starting point and only ever widened.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// A degenerate box containing only `point`.
    pub fn seeded(point: DVec2) -> Self {
        Self {
            x_min: point.x,
            x_max: point.x,
            y_min: point.y,
            y_max: point.y,
        }
    }

    /// Widens the box to contain `point`.
    pub fn include(&mut self, point: DVec2) {
        self.x_min = self.x_min.min(point.x);
        self.x_max = self.x_max.max(point.x);
        self.y_min = self.y_min.min(point.y);
        self.y_max = self.y_max.max(point.y);
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn contains(&self, point: DVec2) -> bool {
        (self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
    }

    /// Padding `(x, y)` to add on each side to make the box square while
    /// keeping it centred.
    pub fn square_offsets(&self) -> (f64, f64) {
        let span = self.width().max(self.height());
        (0.5 * (span - self.width()), 0.5 * (span - self.height()))
    }

    /// The box widened by [`square_offsets`](Self::square_offsets).
    pub fn squared(&self) -> BoundingBox {
        let (dx, dy) = self.square_offsets();
        BoundingBox {
            x_min: self.x_min - dx,
            x_max: self.x_max + dx,
            y_min: self.y_min - dy,
            y_max: self.y_max + dy,
        }
    }
}

/// Output of one compilation pass: primitives plus their bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub primitives: Vec<Primitive>,
    pub bbox: BoundingBox,
    /// Horizontal origin the turtle started from, at `y = 0`.
    pub origin_x: f64,
}

impl Drawing {
    /// Drawn segments that are not part of a polygon run.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        let mut in_polygon = false;
        self.primitives.iter().filter_map(move |p| match *p {
            Primitive::PolygonBegin { .. } => {
                in_polygon = true;
                None
            }
            Primitive::PolygonEnd => {
                in_polygon = false;
                None
            }
            Primitive::Segment { from, to } if !in_polygon => Some((from, to)),
            _ => None,
        })
    }

    pub fn polygon_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::PolygonBegin { .. }))
            .count()
    }
}

/// One independently compiled plot placed on a [`Canvas`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subplot {
    pub drawing: Drawing,
    /// Horizontal origin the subplot was compiled at.
    pub origin_x: f64,
    /// Caption centred below the subplot; empty for none.
    pub label: String,
}

/// Subplots laid out left to right, plus the union of their bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub subplots: Vec<Subplot>,
    pub bbox: BoundingBox,
}

impl Canvas {
    pub fn has_labels(&self) -> bool {
        self.subplots.iter().any(|s| !s.label.is_empty())
    }
}
