//! Vector-command emitter producing gnuplot directives.
//!
//! Each drawn segment outside a polygon becomes a headless arrow, each
//! polygon run a filled `set object polygon`. Single plots are scaled
//! isometrically and centred; multi-plots are scaled anisometrically with the
//! subplots left to right.

use super::fixed;
use crate::error::{LsystemError, Result};
use crate::geometry::{BoundingBox, Canvas, Drawing, Primitive};
use regex::Regex;
use std::io::Write;
use std::sync::LazyLock;

const MIN_MARGIN: &str = "1";
const MAX_MARGIN: &str = "2";

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[a-fA-F0-9]{6}$").expect("hex colour pattern is valid"));

/// Terminal, output and styling directives for one script.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    /// Complete terminal directive, e.g. `set terminal png size 900,900`.
    pub terminal: String,
    /// Complete output directive, e.g. `set output "dragon.png"`.
    pub output: String,
    /// Title centred at the top; `None` leaves the top margin narrow.
    pub title: Option<String>,
    /// Line and fill colour: a gnuplot colour name or `#rrggbb`.
    pub line_color: String,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            terminal: "set terminal svg".to_owned(),
            output: "set output".to_owned(),
            title: None,
            line_color: "black".to_owned(),
        }
    }
}

impl PlotStyle {
    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

/// Checks colour syntax. Names are passed through to gnuplot unchecked.
pub fn validate_color(color: &str) -> Result<()> {
    if color.is_empty() || (color.contains('#') && !HEX_COLOR.is_match(color)) {
        return Err(LsystemError::config(format!(
            "the color name '{color}' is not valid"
        )));
    }
    Ok(())
}

/// An ordered list of gnuplot directives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GnuplotScript {
    commands: Vec<String>,
}

impl GnuplotScript {
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<String> {
        self.commands
    }

    /// The directives joined by newlines.
    pub fn to_script(&self) -> String {
        self.commands.join("\n")
    }

    /// Persists the script verbatim, e.g. for debugging a render.
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<()> {
        sink.write_all(self.to_script().as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

/// Emits a single isometric, centred plot.
pub fn plot(drawing: &Drawing, style: &PlotStyle) -> Result<GnuplotScript> {
    validate_color(&style.line_color)?;
    let color = &style.line_color;
    let top = if style.title().is_some() { MAX_MARGIN } else { MIN_MARGIN };

    let mut commands = preamble(style, MIN_MARGIN, top, true);
    if let Some(title) = style.title() {
        commands.push(format!(r#"set title "{title}" tc rgb "{color}""#));
    }
    draw_commands(drawing, color, &mut commands);

    let bbox = drawing.bbox;
    let (dx, dy) = bbox.square_offsets();
    push_ranges(&bbox, &mut commands);
    commands.push(format!(
        "set offset {},{},{},{}",
        fixed(dx),
        fixed(dx),
        fixed(dy),
        fixed(dy)
    ));
    push_trailer(color, &mut commands);
    Ok(GnuplotScript { commands })
}

/// Emits every subplot of `canvas` left to right, with optional labels.
pub fn multi_plot(canvas: &Canvas, style: &PlotStyle) -> Result<GnuplotScript> {
    validate_color(&style.line_color)?;
    let color = &style.line_color;
    let bottom = if canvas.has_labels() { MAX_MARGIN } else { MIN_MARGIN };
    let top = if style.title().is_some() { MAX_MARGIN } else { MIN_MARGIN };

    let mut commands = preamble(style, bottom, top, false);
    if let Some(title) = style.title() {
        commands.push(format!(r#"set title "{title}" tc rgb "{color}""#));
    }
    for subplot in &canvas.subplots {
        if !subplot.label.is_empty() {
            commands.push(format!(
                r#"set label "{}" at {},character 1 center front tc rgb "{color}""#,
                subplot.label,
                fixed(subplot.origin_x)
            ));
        }
        draw_commands(&subplot.drawing, color, &mut commands);
    }
    push_ranges(&canvas.bbox, &mut commands);
    push_trailer(color, &mut commands);
    Ok(GnuplotScript { commands })
}

fn preamble(style: &PlotStyle, bottom: &str, top: &str, square: bool) -> Vec<String> {
    let color = &style.line_color;
    let mut commands = vec![
        style.terminal.clone(),
        style.output.clone(),
        "unset border".to_owned(),
        "unset tics".to_owned(),
        format!("set bmargin {bottom}"),
        format!("set tmargin {top}"),
        format!("set rmargin {MIN_MARGIN}"),
        format!("set lmargin {MIN_MARGIN}"),
    ];
    if square {
        commands.push("set size square".to_owned());
    }
    commands.extend([
        "set autoscale fix".to_owned(),
        format!(r#"set style fill solid 1.0 border rgb "{color}""#),
        format!(r#"set style arrow 1 nohead lc rgb "{color}""#),
    ]);
    commands
}

fn push_ranges(bbox: &BoundingBox, commands: &mut Vec<String>) {
    commands.push(format!("set xrange [{}:{}]", fixed(bbox.x_min), fixed(bbox.x_max)));
    commands.push(format!("set yrange [{}:{}]", fixed(bbox.y_min), fixed(bbox.y_max)));
}

fn push_trailer(color: &str, commands: &mut Vec<String>) {
    commands.push("set parametric".to_owned());
    commands.push(format!(r#"plot 0,0 notitle lc rgb "{color}" lw 0"#));
    commands.push("quit".to_owned());
}

/// Arrows for free segments, one polygon object per polygon run.
fn draw_commands(drawing: &Drawing, color: &str, commands: &mut Vec<String>) {
    let mut polygon: Option<String> = None;
    for primitive in &drawing.primitives {
        match *primitive {
            Primitive::PolygonBegin { origin } => {
                polygon = Some(format!(
                    r#"set object polygon fc rgb "{color}" from {},{}"#,
                    fixed(origin.x),
                    fixed(origin.y)
                ));
            }
            Primitive::PolygonEnd => commands.extend(polygon.take()),
            Primitive::Segment { to, .. } | Primitive::Travel { to, .. } if polygon.is_some() => {
                if let Some(cmd) = polygon.as_mut() {
                    cmd.push_str(&format!(" to {},{}", fixed(to.x), fixed(to.y)));
                }
            }
            Primitive::Segment { from, to } => commands.push(format!(
                "set arrow as 1 from {},{} to {},{}",
                fixed(from.x),
                fixed(from.y),
                fixed(to.x),
                fixed(to.y)
            )),
            Primitive::Travel { .. } | Primitive::Restore { .. } => {}
        }
    }
}
