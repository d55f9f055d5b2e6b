//! A catalogue of classic L-systems.
//!
//! Sources: *The Algorithmic Beauty of Plants* (ABOP), Prusinkiewicz's
//! *Graphical applications of L-systems* (GALS) and *Lindenmayer Systems,
//! Fractals, and Plants* (LSFP).

use crate::config::LsystemConfig;
use crate::rules::RuleSet;

fn literal(name: &str, order: i64, angle: f64, axiom: &str, rules: &[(&str, &str)]) -> LsystemConfig {
    LsystemConfig::new(name, order, angle, axiom, RuleSet::literal(rules.iter().copied()))
}

pub fn dragon() -> LsystemConfig {
    literal("Dragon", 10, 90.0, "$FX", &[("X", "X-YF-"), ("Y", "+FX+Y")])
}

pub fn hilbert() -> LsystemConfig {
    literal(
        "Hilbert",
        6,
        90.0,
        "A",
        &[("A", "-BF+AFA+FB-"), ("B", "+AF-BFB-FA+")],
    )
}

pub fn koch_snowflake() -> LsystemConfig {
    literal("Koch Snowflake", 4, 60.0, "F++F++F", &[("F", "F-F++F-F")])
}

pub fn moore() -> LsystemConfig {
    literal(
        "Moore",
        5,
        90.0,
        "$LFL+F+LFL",
        &[("L", "-RF+LFL+FR-"), ("R", "+LF-RFR-FL+")],
    )
}

pub fn peano() -> LsystemConfig {
    literal(
        "Peano",
        4,
        90.0,
        "$X",
        &[("X", "XFYFX-F-YFXFY+F+XFYFX"), ("Y", "YFXFY+F+XFYFX-F-YFXFY")],
    )
}

pub fn penrose_p3() -> LsystemConfig {
    literal(
        "Penrose P3",
        5,
        36.0,
        "(18)[X]++[X]++[X]++[X]++[X]",
        &[
            ("W", "YF++ZF----XF[-YF----WF]++"),
            ("X", "+YF--ZF[---WF--XF]+"),
            ("Y", "-WF++XF[+++YF++ZF]-"),
            ("Z", "--YF++++WF[+ZF++++XF]--XF"),
            ("F", ""),
        ],
    )
}

pub fn quadratic_koch_island() -> LsystemConfig {
    literal("Quadratic Koch Island", 3, 90.0, "F+F+F+F", &[("F", "F-F+F+FFF-F-F+F")])
}

/// Uses inline heading literals such as `(-45)`.
pub fn sierpinski() -> LsystemConfig {
    literal(
        "Sierpinski",
        5,
        45.0,
        "$A--FB--FC--FD--F",
        &[
            ("A", "A(-45)FB+FFD(45)FA"),
            ("B", "B(-135)FC+FFA(-45)FB"),
            ("C", "C(135)FD+FFB(-135)FC"),
            ("D", "D(45)FA+FFC(135)FD"),
        ],
    )
}

pub fn sierpinski_arrowhead() -> LsystemConfig {
    literal(
        "Sierpinski Arrowhead",
        6,
        60.0,
        "XF",
        &[("X", "YF-XF-Y"), ("Y", "XF+YF+X")],
    )
}

/// Uses `f` to leave the carpet's holes undrawn.
pub fn sierpinski_carpet() -> LsystemConfig {
    literal(
        "Sierpinski Carpet",
        5,
        90.0,
        "(45)F",
        &[("F", "F+F-F-F-f+F+F+F-F"), ("f", "fff")],
    )
}

pub fn sierpinski_triangle() -> LsystemConfig {
    literal(
        "Sierpinski Triangle",
        6,
        60.0,
        "FXF++FF++FF",
        &[("X", "++FXF--FXF--FXF++"), ("F", "FF")],
    )
}

/// Hexagonal Gosper curve written as a pseudo-L-system with two-symbol
/// predecessors.
pub fn gosper_pseudo() -> LsystemConfig {
    literal(
        "ABOP Fig 1.11a(pseudo)",
        4,
        60.0,
        "$Fl",
        &[("Fl", "Fl+Fr++Fr-Fl--FlFl-Fr+"), ("Fr", "-Fl+FrFr++Fr+Fl--Fl-Fr")],
    )
}

pub fn abop_fig_1_24c() -> LsystemConfig {
    literal("ABOP Fig 1.24c", 4, 22.5, "$F", &[("F", "FF-[-F+F+F]+[+F-F-F]")])
}

pub fn abop_fig_1_24e() -> LsystemConfig {
    literal(
        "ABOP Fig 1.24e",
        7,
        25.7,
        "$X",
        &[("X", "F[+X][-X]FX"), ("F", "FF")],
    )
}

/// Turn-away symbol `|`.
pub fn gals_fig_1d() -> LsystemConfig {
    literal("GALS Fig 1d", 6, 90.0, "$F", &[("F", "F-FF|F-F")])
}

/// Filled polygon leaves. `"FX"` is declared before `"F"` so it shadows it.
pub fn gals_fig_4() -> LsystemConfig {
    literal(
        "GALS Fig 4",
        4,
        30.0,
        "$T",
        &[
            ("T", "R-[T]++[++L]R[--L]+[T]--T"),
            ("R", "F[++L][--L]F"),
            ("L", "[{-FX+FX+FX-|-FX+FX+FX}]"),
            ("FX", "FX"),
            ("F", "FF"),
        ],
    )
}

/// A fractal drawn as a single filled polygon.
pub fn lsfp_fig_2_9() -> LsystemConfig {
    literal(
        "LSFP Fig 2.9",
        3,
        60.0,
        "(-60){XF-F-XF-F-XF-F}",
        &[("X", "XF-F-XF+F+F+XF+F-F-F+F-F-F+X")],
    )
}

/// Every deterministic example above.
pub fn deterministic_catalogue() -> Vec<LsystemConfig> {
    vec![
        dragon(),
        hilbert(),
        koch_snowflake(),
        moore(),
        peano(),
        penrose_p3(),
        quadratic_koch_island(),
        sierpinski(),
        sierpinski_arrowhead(),
        sierpinski_carpet(),
        sierpinski_triangle(),
        gosper_pseudo(),
        abop_fig_1_24c(),
        abop_fig_1_24e(),
        gals_fig_1d(),
        gals_fig_4(),
        lsfp_fig_2_9(),
    ]
}

/// The stochastic bush of ABOP §1.7 with the given rule weights.
pub fn stochastic_bush(weights: [u32; 3]) -> LsystemConfig {
    LsystemConfig::new(
        format!("Stochastic(weights {},{},{})", weights[0], weights[1], weights[2]),
        5,
        25.7,
        "$F",
        RuleSet::weighted(["F[+F]F[-F]F", "F[+F]F", "F[-F]F"], weights.map(i64::from)),
    )
}

fn hogeweg_hesper(label: &str, order: i64, angle: f64, axiom: &str, table: [&str; 8]) -> LsystemConfig {
    const KEYS: [&str; 8] = [
        "0 < 0 > 0",
        "0 < 0 > 1",
        "0 < 1 > 0",
        "0 < 1 > 1",
        "1 < 0 > 0",
        "1 < 0 > 1",
        "1 < 1 > 0",
        "1 < 1 > 1",
    ];
    LsystemConfig::new(
        format!("Hogeweg and Hesper {label}"),
        order,
        angle,
        axiom,
        RuleSet::contextual(KEYS.into_iter().zip(table)),
    )
    .with_label(label)
}

/// The five context-sensitive plants of ABOP fig. 1.31, labelled `a`–`e`.
///
/// Successors are listed in key order `000, 001, 010, 011, 100, 101, 110, 111`
/// (left, strict predecessor, right).
pub fn hogeweg_hesper_plants() -> Vec<LsystemConfig> {
    vec![
        hogeweg_hesper("a", 30, 22.5, "$F1F1F1", ["0", "1[+F1F1]", "1", "1", "0", "1F1", "0", "0"]),
        hogeweg_hesper("b", 30, 22.5, "$F1F1F1", ["1", "1[-F1F1]", "1", "1", "0", "1F1", "1", "0"]),
        hogeweg_hesper("c", 26, 25.75, "$F1F1F1", ["0", "1", "0", "1[+F1F1]", "0", "1F1", "0", "0"]),
        hogeweg_hesper("d", 24, 25.75, "$F0F1F1", ["1", "0", "0", "1F1", "1", "1[+F1F1]", "1", "0"]),
        hogeweg_hesper("e", 30, 22.5, "$F1F1F1", ["0", "1[-F1F1]", "1", "1", "0", "1F1", "1", "0"]),
    ]
}
