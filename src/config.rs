//! Strongly-typed configuration for one L-system.
//!
//! A [`LsystemConfig`] bundles everything needed to derive and draw one
//! system. It loads from JSON:
//!
//! ```json
//! {
//!   "name": "Dragon",
//!   "order": 10,
//!   "angle": 90.0,
//!   "axiom": "$FX",
//!   "rules": { "kind": "literal", "rules": [["X", "X-YF-"], ["Y", "+FX+Y"]] }
//! }
//! ```

use crate::error::{LsystemError, Result};
use crate::geometry::Drawing;
use crate::interpreter::TurtleInterpreter;
use crate::layout::SubplotInput;
use crate::rewrite::{DeriveOptions, derive_with};
use crate::rules::RuleSet;
use crate::symbols::SymbolString;
use serde::{Deserialize, Serialize};

/// Parameters of one L-system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LsystemConfig {
    /// Display name, also used to build the plot title.
    pub name: String,
    /// Derivation length. Signed so that bad documents report a
    /// configuration error rather than a parse error.
    pub order: i64,
    /// Production angle in degrees.
    pub angle: f64,
    pub axiom: String,
    pub rules: RuleSet,
    /// Caption when drawn as a subplot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LsystemConfig {
    pub fn new(
        name: impl Into<String>,
        order: i64,
        angle: f64,
        axiom: impl Into<String>,
        rules: RuleSet,
    ) -> Self {
        Self {
            name: name.into(),
            order,
            angle,
            axiom: axiom.into(),
            rules,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Parses and validates a JSON document.
    pub fn from_json(document: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// The derivation order as an unsigned count.
    pub fn order(&self) -> Result<u32> {
        if self.order < 0 {
            return Err(LsystemError::config("curve order must be non-negative"));
        }
        u32::try_from(self.order)
            .map_err(|_| LsystemError::config(format!("curve order {} is too large", self.order)))
    }

    /// Checks every field without deriving anything.
    pub fn validate(&self) -> Result<()> {
        self.order()?;
        if self.axiom.is_empty() {
            return Err(LsystemError::config("axiom was not specified"));
        }
        if self.angle == 0.0 || !self.angle.is_finite() {
            return Err(LsystemError::config(format!(
                "the production angle {} is not usable",
                self.angle
            )));
        }
        self.rules.validate()
    }

    /// `"<name>(<order>)"`, the conventional plot title.
    pub fn title(&self) -> String {
        format!("{}({})", self.name, self.order)
    }

    pub fn derive(&self) -> Result<SymbolString> {
        self.derive_with(&DeriveOptions::default())
    }

    pub fn derive_with(&self, options: &DeriveOptions) -> Result<SymbolString> {
        self.validate()?;
        derive_with(self.order()?, &self.axiom, &self.rules, options)
    }

    /// Derives and compiles at origin 0.
    pub fn draw(&self, options: &DeriveOptions) -> Result<Drawing> {
        let symbols = self.derive_with(options)?;
        TurtleInterpreter::with_angle(self.angle).compile(&symbols, 0.0)
    }

    /// Derives and wraps the result for the layout planner.
    pub fn subplot(&self, options: &DeriveOptions) -> Result<SubplotInput> {
        let symbols = self.derive_with(options)?;
        let label = self.label.clone().unwrap_or_default();
        Ok(SubplotInput::new(symbols, self.angle).with_label(label))
    }
}
