//! HP-GL/2 pen-plotter emitter.
//!
//! The stream is byte-exact:
//!
//! ```text
//! ESC%-1BBPIN;            enter HP-GL/2 and initialise
//! RO90;                   landscape (multi-plot only)
//! IRl,b,r,t;              margins in percent of the hard-clip window
//! SCx0,x1,y0,y1,{1|0};    isotropic (single) or anisotropic (multi) scaling
//! SP1;WU0;PWw;            pen 1, width in millimetres
//! PUx,y,x,y;PDx,y;...     coalesced pen runs
//! PG;                     page advance
//! ```
//!
//! Consecutive moves with the same pen state share one `PU`/`PD` command and
//! continue with bare `,x,y` pairs. Polygons are buffered with `PM0;` and
//! flushed with `PM2;EP;FP;`. Numbers use six decimals.

use super::fixed;
use crate::error::Result;
use crate::geometry::{Canvas, Drawing, Primitive};
use std::io::Write;

const ESC: char = '\u{1b}';
const ETX: char = '\u{3}';

/// Margin (percent) that keeps wide pen strokes from being clipped.
const MIN_MARGIN: f64 = 0.1;
/// Margin (percent) that leaves room for the title and labels.
const MAX_MARGIN: f64 = 3.0;
/// User-unit gap between the drawing and the title or labels.
const Y_NUDGE: f64 = 1.0;

/// Emitter settings.
#[derive(Clone, Debug)]
pub struct HpglOptions {
    /// Title centred at the top.
    pub title: Option<String>,
    /// Pen width in millimetres.
    pub pen_width: f64,
}

impl Default for HpglOptions {
    fn default() -> Self {
        Self {
            title: None,
            pen_width: 0.35,
        }
    }
}

impl HpglOptions {
    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// A complete HP-GL/2 program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HpglProgram(String);

impl HpglProgram {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Writes the program verbatim to a file, port or buffer.
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<()> {
        sink.write_all(self.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pen {
    Up,
    Down,
}

impl Pen {
    fn code(self) -> &'static str {
        match self {
            Pen::Up => "PU",
            Pen::Down => "PD",
        }
    }
}

/// Run-length coalescing of pen moves.
struct PenRuns {
    previous: Option<Pen>,
    out: String,
}

impl PenRuns {
    fn new() -> Self {
        Self {
            previous: None,
            out: String::new(),
        }
    }

    fn step(&mut self, pen: Pen, x: f64, y: f64) {
        let (x, y) = (fixed(x), fixed(y));
        match self.previous {
            Some(prev) if prev == pen => {
                self.out.push_str(&format!(",{x},{y}"));
            }
            Some(_) => {
                self.out.push_str(&format!(";\n{}{x},{y}", pen.code()));
            }
            None => {
                self.out.push_str(&format!("{}{x},{y}", pen.code()));
            }
        }
        self.previous = Some(pen);
    }

    fn mark(&mut self, directive: &str) {
        self.previous = None;
        self.out.push_str(";\n");
        self.out.push_str(directive);
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        self.out.push(';');
        self.out
    }
}

/// Pen commands for one drawing, starting with a pen-up move to its origin.
fn pen_commands(drawing: &Drawing) -> String {
    let mut runs = PenRuns::new();
    runs.step(Pen::Up, drawing.origin_x, 0.0);
    for primitive in &drawing.primitives {
        match *primitive {
            Primitive::Segment { to, .. } => runs.step(Pen::Down, to.x, to.y),
            Primitive::Travel { to, .. } | Primitive::Restore { to } => {
                runs.step(Pen::Up, to.x, to.y)
            }
            Primitive::PolygonBegin { .. } => runs.mark("PM0;"),
            Primitive::PolygonEnd => runs.mark("PM2;EP;FP;"),
        }
    }
    runs.finish()
}

fn margins(right: f64, bottom: f64, left: f64, top: f64) -> String {
    format!(
        "IR{},{},{},{};\n",
        fixed(right),
        fixed(bottom),
        fixed(left),
        fixed(top)
    )
}

fn scaling(x_min: f64, x_max: f64, y_min: f64, y_max: f64, isotropic: bool) -> String {
    format!(
        "SC{},{},{},{},{};\n",
        fixed(x_min),
        fixed(x_max),
        fixed(y_min),
        fixed(y_max),
        u8::from(isotropic)
    )
}

fn label(x: f64, y: f64, origin: u8, text: &str) -> String {
    format!("PU{},{};LO{origin};LB{text}{ETX};\n", fixed(x), fixed(y))
}

/// Emits a single plot, isotropically scaled and centred.
pub fn plot(drawing: &Drawing, options: &HpglOptions) -> HpglProgram {
    let title = options.title();
    let top = if title.is_some() { 100.0 - MAX_MARGIN } else { 100.0 - MIN_MARGIN };
    let b = drawing.bbox.squared();

    let mut out = format!("{ESC}%-1BBPIN;\n");
    out.push_str(&margins(MIN_MARGIN, MIN_MARGIN, 100.0 - MIN_MARGIN, top));
    out.push_str(&scaling(b.x_min, b.x_max, b.y_min, b.y_max, true));
    out.push_str(&format!("SP1;WU0;PW{};\n", fixed(options.pen_width)));
    out.push_str(&pen_commands(drawing));
    out.push('\n');
    if let Some(title) = title {
        out.push_str("IR;");
        out.push_str(&margins(MIN_MARGIN, MIN_MARGIN, 100.0 - MIN_MARGIN, 100.0 - MIN_MARGIN));
        out.push_str(&scaling(b.x_min, b.x_max, b.y_min, b.y_max, false));
        out.push_str(&label(0.5 * (b.x_min + b.x_max), b.y_max, 6, title));
    }
    out.push_str("PG;\n");
    HpglProgram(out)
}

/// Emits every subplot of `canvas` left to right in landscape orientation,
/// anisotropically scaled, with labels below each subplot.
pub fn multi_plot(canvas: &Canvas, options: &HpglOptions) -> HpglProgram {
    let title = options.title();
    let bottom = if canvas.has_labels() { MAX_MARGIN } else { MIN_MARGIN };
    let top = if title.is_some() { 100.0 - MAX_MARGIN } else { 100.0 - MIN_MARGIN };
    let b = canvas.bbox;

    let mut body = String::new();
    for subplot in &canvas.subplots {
        if !subplot.label.is_empty() {
            body.push_str(&label(subplot.origin_x, -Y_NUDGE, 16, &subplot.label));
        }
        body.push_str(&pen_commands(&subplot.drawing));
    }

    let mut out = format!("{ESC}%-1BBPIN;\n");
    out.push_str("RO90;\n");
    out.push_str(&margins(MIN_MARGIN, bottom, 100.0 - MIN_MARGIN, top));
    out.push_str(&scaling(b.x_min, b.x_max, b.y_min, b.y_max, false));
    out.push_str(&format!("SP1;WU0;PW{};\n", fixed(options.pen_width)));
    out.push_str(&body);
    out.push('\n');
    if let Some(title) = title {
        out.push_str(&label(0.5 * (b.x_min + b.x_max), b.y_max + Y_NUDGE, 14, title));
    }
    out.push_str("PG;");
    HpglProgram(out)
}
