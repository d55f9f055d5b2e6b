//! Compiler that turns a symbol stream into a [`Drawing`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a
//! [`TurtleConfig`] carrying the production angle, then call
//! [`TurtleInterpreter::compile`] with the derived symbols and the horizontal
//! origin of the plot.

use crate::error::{LsystemError, Result};
use crate::geometry::{BoundingBox, Drawing, Primitive};
use crate::symbols::cancel_turn_pairs;
use crate::turtle::{TurtleOp, TurtleStack, TurtleState, parse_heading, strip_from};
use glam::DVec2;
use tracing::debug;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug)]
pub struct TurtleConfig {
    /// Production angle in degrees applied by `+` and `-`.
    pub angle: f64,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self { angle: 90.0 }
    }
}

/// Interprets a symbol stream as line and polygon primitives.
pub struct TurtleInterpreter {
    config: TurtleConfig,
}

impl TurtleInterpreter {
    pub fn new(config: TurtleConfig) -> Self {
        Self { config }
    }

    /// Shorthand for an interpreter with the given production angle.
    pub fn with_angle(angle: f64) -> Self {
        Self::new(TurtleConfig { angle })
    }

    pub fn angle(&self) -> f64 {
        self.config.angle
    }

    /// Compiles `symbols` with the turtle starting at `(origin_x, 0)` heading
    /// due east.
    ///
    /// # Normalisation
    ///
    /// Adjacent cancelling turns (`+-`, `-+`) are removed once before
    /// interpretation. A variable symbol is stripped from the rest of the
    /// stream the first time it is met.
    ///
    /// # Polygons
    ///
    /// Between `{` and `}` every move becomes a vertex of one polygon. `}`
    /// without `{`, a nested `{` and an unclosed polygon are errors.
    ///
    /// # Errors
    ///
    /// * [`LsystemError::Configuration`] for empty input, a zero angle, a
    ///   malformed heading literal or a broken polygon.
    /// * [`LsystemError::StackUnderflow`] for `]` with nothing saved; its
    ///   position indexes the normalised stream.
    pub fn compile(&self, symbols: &str, origin_x: f64) -> Result<Drawing> {
        if symbols.is_empty() {
            return Err(LsystemError::config("the turtle commands were not generated"));
        }
        if self.config.angle == 0.0 {
            return Err(LsystemError::config("the production angle is zero"));
        }

        let mut cmds = cancel_turn_pairs(symbols);
        let mut turtle = TurtleState::at(DVec2::new(origin_x, 0.0));
        let mut stack = TurtleStack::default();
        let mut bbox = BoundingBox::seeded(turtle.position);
        let mut primitives = Vec::with_capacity(cmds.len());
        let mut polygon_open = false;

        let mut pos = 0;
        while pos < cmds.len() {
            let symbol = cmds[pos];
            match TurtleOp::from_symbol(symbol) {
                // --- MOVEMENT ---
                op @ (TurtleOp::Draw | TurtleOp::Move) => {
                    let from = turtle.position;
                    turtle.advance();
                    let to = turtle.position;
                    bbox.include(to);
                    primitives.push(if op == TurtleOp::Draw {
                        Primitive::Segment { from, to }
                    } else {
                        Primitive::Travel { from, to }
                    });
                }

                // --- HEADING ---
                TurtleOp::TurnLeft => turtle.turn(self.config.angle),
                TurtleOp::TurnRight => turtle.turn(-self.config.angle),
                TurtleOp::TurnAround => turtle.turn(180.0),
                TurtleOp::FaceNorth => turtle.heading = 90.0,
                TurtleOp::SetHeading => {
                    let (heading, close) = parse_heading(&cmds, pos)?;
                    turtle.heading = heading;
                    pos = close;
                }

                // --- FLOW ---
                TurtleOp::Push => stack.push(turtle),
                TurtleOp::Pop => {
                    turtle = stack.pop(pos)?;
                    primitives.push(Primitive::Restore {
                        to: turtle.position,
                    });
                }
                TurtleOp::BeginPolygon => {
                    if polygon_open {
                        return Err(LsystemError::config(format!(
                            "polygon opened at position {pos} while another is open"
                        )));
                    }
                    polygon_open = true;
                    primitives.push(Primitive::PolygonBegin {
                        origin: turtle.position,
                    });
                }
                TurtleOp::EndPolygon => {
                    if !polygon_open {
                        return Err(LsystemError::config(format!(
                            "polygon closed at position {pos} was never opened"
                        )));
                    }
                    polygon_open = false;
                    primitives.push(Primitive::PolygonEnd);
                }

                TurtleOp::Variable => {
                    strip_from(&mut cmds, pos, symbol);
                    continue;
                }
            }
            pos += 1;
        }

        if polygon_open {
            return Err(LsystemError::config("polygon was not closed"));
        }

        debug!(
            primitives = primitives.len(),
            x_min = bbox.x_min,
            x_max = bbox.x_max,
            y_min = bbox.y_min,
            y_max = bbox.y_max,
            "compiled drawing"
        );
        Ok(Drawing {
            primitives,
            bbox,
            origin_x,
        })
    }
}

/// Compiles `symbols` at `origin_x` with the given production angle.
pub fn compile(symbols: &str, origin_x: f64, angle: f64) -> Result<Drawing> {
    TurtleInterpreter::with_angle(angle).compile(symbols, origin_x)
}
