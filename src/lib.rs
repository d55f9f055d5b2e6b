//! # turtle-lsystems
//!
//! Turns Lindenmayer-system grammars into renderable vector geometry.
//!
//! The pipeline is a chain of pure functions, each consuming the previous
//! stage's output as an immutable value:
//!
//! 1. [`rewrite`] derives a [`SymbolString`] from an axiom and a [`RuleSet`]
//!    (deterministic, stochastic or context-sensitive).
//! 2. [`interpreter`] compiles the symbols into a [`Drawing`]: turtle
//!    primitives plus a bounding box.
//! 3. [`layout`] places several drawings left to right on a [`Canvas`].
//! 4. [`emit`] serializes a drawing or canvas as gnuplot directives or an
//!    HP-GL/2 pen-plotter stream.
//!
//! ```rust
//! use turtle_lsystems::{RuleSet, compile, derive, emit::hpgl};
//!
//! let rules = RuleSet::literal([("F", "F+F-F-F+F")]);
//! let symbols = derive(2, "F", &rules).unwrap();
//! let drawing = compile(&symbols, 0.0, 90.0).unwrap();
//! let program = hpgl::plot(&drawing, &hpgl::HpglOptions::default());
//! assert!(program.as_str().ends_with("PG;\n"));
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod geometry;
pub mod interpreter;
pub mod layout;
pub mod presets;
pub mod rewrite;
pub mod rules;
pub mod symbols;
pub mod turtle;

pub use config::*;
pub use error::*;
pub use geometry::*;
pub use interpreter::*;
pub use layout::*;
pub use rewrite::*;
pub use rules::*;
pub use symbols::*;
pub use turtle::*;
