//! Serializers for compiled drawings and canvases.
//!
//! * [`gnuplot`] – an ordered list of text directives for an external
//!   gnuplot process.
//! * [`hpgl`] – a byte-exact HP-GL/2 pen-plotter stream.
//!
//! Neither emitter renders anything itself.

pub mod gnuplot;
pub mod hpgl;

/// Fixed six-decimal rendering used by both streams.
pub(crate) fn fixed(value: f64) -> String {
    format!("{value:.6}")
}
