//! Left-to-right placement of independently compiled subplots.
//!
//! The first subplot sits at `x = 0`. Every following subplot starts at the
//! previous subplot's `x_max` plus a gap derived from its *own* leftward reach:
//! `|leftmost excursion| + GAP_NUDGE`. Spacing therefore depends on the next
//! plot's left reach rather than on the current plot's right reach.

use crate::error::{LsystemError, Result};
use crate::geometry::{BoundingBox, Canvas, Subplot};
use crate::interpreter::TurtleInterpreter;
use crate::symbols::{SymbolString, cancel_turn_pairs};
use crate::turtle::{TurtleOp, TurtleStack, TurtleState, parse_heading, strip_from};
use glam::DVec2;
use tracing::debug;

/// Extra horizontal clearance between neighbouring subplots, in turtle units.
pub const GAP_NUDGE: f64 = 2.0;

/// One subplot to place: derived symbols, production angle and caption.
#[derive(Clone, Debug, PartialEq)]
pub struct SubplotInput {
    pub symbols: SymbolString,
    pub angle: f64,
    pub label: String,
}

impl SubplotInput {
    pub fn new(symbols: impl Into<SymbolString>, angle: f64) -> Self {
        Self {
            symbols: symbols.into(),
            angle,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Zips parallel symbol, angle and label lists into subplot inputs.
///
/// Angles and labels may be longer than the symbol list; extras are ignored.
pub fn zip_inputs<S, L>(symbols: &[S], angles: &[f64], labels: &[L]) -> Result<Vec<SubplotInput>>
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    if symbols.is_empty() {
        return Err(LsystemError::layout("the turtle commands were not specified"));
    }
    if angles.is_empty() {
        return Err(LsystemError::layout("the turtle angles were not stated"));
    }
    if labels.is_empty() {
        return Err(LsystemError::layout("the labels were not specified"));
    }
    if angles.len() < symbols.len() {
        return Err(LsystemError::layout(
            "fewer turtle angles specified than the number of commands",
        ));
    }
    if labels.len() < symbols.len() {
        return Err(LsystemError::layout(
            "fewer labels specified than the number of commands",
        ));
    }
    Ok(symbols
        .iter()
        .zip(angles)
        .zip(labels)
        .map(|((s, &angle), label)| {
            SubplotInput::new(s.as_ref(), angle).with_label(label.as_ref())
        })
        .collect())
}

/// Compiles and places every subplot, returning the combined canvas.
pub fn layout(inputs: &[SubplotInput]) -> Result<Canvas> {
    if inputs.is_empty() {
        return Err(LsystemError::layout("the turtle commands were not specified"));
    }

    let mut subplots = Vec::with_capacity(inputs.len());
    let mut origin_x = 0.0;
    // Every subplot's bounds contain its origin, and the first origin is (0, 0).
    let mut bbox = BoundingBox::seeded(DVec2::ZERO);

    for (k, input) in inputs.iter().enumerate() {
        let drawing =
            TurtleInterpreter::with_angle(input.angle).compile(&input.symbols, origin_x)?;
        bbox = bbox.union(&drawing.bbox);
        let next_origin = match inputs.get(k + 1) {
            Some(next) => {
                let gap = gap_before(&next.symbols, next.angle)?;
                debug!(subplot = k + 1, gap, "computed subplot gap");
                Some(drawing.bbox.x_max + gap)
            }
            None => None,
        };
        debug!(subplot = k, origin_x, "placed subplot");
        subplots.push(Subplot {
            drawing,
            origin_x,
            label: input.label.clone(),
        });
        if let Some(next) = next_origin {
            origin_x = next;
        }
    }

    Ok(Canvas { subplots, bbox })
}

/// Clearance to leave to the left of a subplot's origin.
pub fn gap_before(symbols: &str, angle: f64) -> Result<f64> {
    Ok(leftmost_excursion(symbols, angle)?.abs() + GAP_NUDGE)
}

/// Smallest `x` reached by a dry-run walk starting at `x = 0`.
///
/// Only heading and forward moves are tracked; polygon marks are ignored.
/// Branches are followed rather than skipped: `[` and `]` save and restore
/// the walker so each branch is measured from where it starts, and a branch
/// reaching left widens the gap. The result is never positive.
pub fn leftmost_excursion(symbols: &str, angle: f64) -> Result<f64> {
    let mut cmds = cancel_turn_pairs(symbols);
    let mut walker = TurtleState::at(DVec2::ZERO);
    let mut stack = TurtleStack::default();
    let mut x_min: f64 = 0.0;

    let mut pos = 0;
    while pos < cmds.len() {
        let symbol = cmds[pos];
        match TurtleOp::from_symbol(symbol) {
            TurtleOp::Draw | TurtleOp::Move => {
                walker.advance();
                x_min = x_min.min(walker.position.x);
            }
            TurtleOp::TurnLeft => walker.turn(angle),
            TurtleOp::TurnRight => walker.turn(-angle),
            TurtleOp::TurnAround => walker.turn(180.0),
            TurtleOp::FaceNorth => walker.heading = 90.0,
            TurtleOp::SetHeading => {
                let (heading, close) = parse_heading(&cmds, pos)?;
                walker.heading = heading;
                pos = close;
            }
            TurtleOp::Push => stack.push(walker),
            TurtleOp::Pop => walker = stack.pop(pos)?,
            TurtleOp::BeginPolygon | TurtleOp::EndPolygon => {}
            TurtleOp::Variable => {
                strip_from(&mut cmds, pos, symbol);
                continue;
            }
        }
        pos += 1;
    }
    Ok(x_min)
}
