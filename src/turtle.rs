//! Turtle state, the branch stack and symbol operations.

use crate::error::{LsystemError, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The state of the drawing turtle.
///
/// Heading is in degrees and is never normalised; movement inspects it modulo
/// 360 instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current heading in degrees, counter-clockwise from `+X`.
    pub heading: f64,

    /// Current position of the pen.
    pub position: DVec2,
}

impl TurtleState {
    /// A turtle at `position` heading due east.
    pub fn at(position: DVec2) -> Self {
        Self {
            heading: 0.0,
            position,
        }
    }

    /// Moves one unit along the current heading.
    pub fn advance(&mut self) {
        self.position += unit_step(self.heading);
    }

    /// Adds `degrees` to the heading.
    pub fn turn(&mut self, degrees: f64) {
        self.heading += degrees;
    }
}

/// Unit displacement for `heading` degrees.
///
/// Axis-aligned headings move by exactly one unit on the matching axis so
/// long axis-aligned walks accumulate no trigonometric drift.
pub fn unit_step(heading: f64) -> DVec2 {
    let h = heading % 360.0;
    if h == 0.0 {
        DVec2::X
    } else if h == 90.0 || h == -270.0 {
        DVec2::Y
    } else if h == 180.0 || h == -180.0 {
        DVec2::NEG_X
    } else if h == 270.0 || h == -90.0 {
        DVec2::NEG_Y
    } else {
        let radians = heading.to_radians();
        DVec2::new(radians.cos(), radians.sin())
    }
}

/// LIFO of saved turtle states for `[` and `]`.
#[derive(Clone, Debug, Default)]
pub struct TurtleStack {
    saved: Vec<TurtleState>,
}

impl TurtleStack {
    pub fn push(&mut self, state: TurtleState) {
        self.saved.push(state);
    }

    /// Restores the most recently pushed state. `position` is reported when the
    /// stack is empty.
    pub fn pop(&mut self, position: usize) -> Result<TurtleState> {
        self.saved
            .pop()
            .ok_or(LsystemError::StackUnderflow { position })
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// Operations performed by the turtle for each symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurtleOp {
    // --- Movement ---
    /// Move forward drawing a line (`F`).
    Draw,
    /// Move forward without drawing (`f`).
    Move,

    // --- Heading ---
    /// Add the production angle (`+`).
    TurnLeft,
    /// Subtract the production angle (`-`).
    TurnRight,
    /// Add 180 degrees (`|`).
    TurnAround,
    /// Set the heading to 90 degrees (`$`).
    FaceNorth,
    /// Set the heading to the literal that follows (`(` … `)`).
    SetHeading,

    // --- Flow ---
    /// Save the turtle state (`[`).
    Push,
    /// Restore the most recently saved state (`]`).
    Pop,
    /// Start accumulating polygon vertices (`{`).
    BeginPolygon,
    /// Close and emit the polygon (`}`).
    EndPolygon,

    /// No geometric meaning; stripped from the rest of the stream.
    Variable,
}

impl TurtleOp {
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'F' => Self::Draw,
            'f' => Self::Move,
            '+' => Self::TurnLeft,
            '-' => Self::TurnRight,
            '|' => Self::TurnAround,
            '$' => Self::FaceNorth,
            '(' => Self::SetHeading,
            '[' => Self::Push,
            ']' => Self::Pop,
            '{' => Self::BeginPolygon,
            '}' => Self::EndPolygon,
            // A stray `)` outside a heading literal is dropped like a variable.
            _ => Self::Variable,
        }
    }
}

/// Parses the heading literal opening at `open`, e.g. `(-22.5)`.
///
/// Returns the heading and the index of the closing `)`.
pub fn parse_heading(symbols: &[char], open: usize) -> Result<(f64, usize)> {
    let malformed = || LsystemError::config("the specified angle is not syntactically well-formed");
    let start = open + 1;
    let len = symbols[start.min(symbols.len())..]
        .iter()
        .take_while(|c| matches!(c, '+' | '-' | '.' | '0'..='9'))
        .count();
    let close = start + len;
    if len == 0 || symbols.get(close) != Some(&')') {
        return Err(malformed());
    }
    let literal: String = symbols[start..close].iter().collect();
    let heading = literal.parse::<f64>().map_err(|_| malformed())?;
    Ok((heading, close))
}

/// Removes every occurrence of `symbol` from `symbols[from..]`.
pub fn strip_from(symbols: &mut Vec<char>, from: usize, symbol: char) {
    let mut tail = symbols.split_off(from);
    tail.retain(|&c| c != symbol);
    symbols.append(&mut tail);
}
