//! Production rule sets for the three rewriting engines.
//!
//! Rule sets arrive as already-structured data. A [`RuleSet`] deserializes
//! from an internally tagged document:
//!
//! ```json
//! { "kind": "literal",    "rules": [["X", "X-YF-"], ["Y", "+FX+Y"]] }
//! { "kind": "weighted",   "rules": ["F[+F]F", "F[-F]F"], "weights": [3, 1] }
//! { "kind": "contextual", "rules": { "0 < 0 > 1": "1[+F1F1]" } }
//! ```

use crate::error::{LsystemError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// The only symbol rewritten by the weighted (stochastic) engine.
pub const WEIGHTED_PREDECESSOR: char = 'F';

static CONTEXT_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|1) < (0|1) > (0|1)$").expect("context key pattern is valid")
});

/// A rule set for one of the three engines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSet {
    /// Deterministic, context-free textual substitution.
    Literal(LiteralRules),
    /// Stochastic, context-free rewriting of `F`.
    Weighted(WeightedRules),
    /// Context-sensitive rewriting over the `0`/`1` alphabet.
    Contextual(ContextualRules),
}

impl RuleSet {
    /// Builds a literal rule set. Declaration order is significant.
    pub fn literal<K, V>(rules: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Literal(LiteralRules {
            rules: rules
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
    }

    /// Builds a weighted rule set from parallel rule and weight lists.
    pub fn weighted<R: Into<String>>(
        rules: impl IntoIterator<Item = R>,
        weights: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self::Weighted(WeightedRules {
            rules: rules.into_iter().map(Into::into).collect(),
            weights: weights.into_iter().collect(),
        })
    }

    /// Builds a contextual rule set from `"L < a > R"` keyed entries.
    pub fn contextual<K, V>(rules: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Contextual(ContextualRules {
            rules: rules
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
    }

    /// Checks the rule set without deriving anything.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Literal(r) => r.validate(),
            Self::Weighted(r) => r.active_weights().map(|_| ()),
            Self::Contextual(r) => r.compile().map(|_| ()),
        }
    }
}

/// Ordered literal substitutions.
///
/// At every position the keys are tried in declaration order and the first
/// match wins; unmatched characters are copied through.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiteralRules {
    pub rules: Vec<(String, String)>,
}

impl LiteralRules {
    pub fn validate(&self) -> Result<()> {
        if self.rules.iter().any(|(key, _)| key.is_empty()) {
            return Err(LsystemError::config("a literal rule has an empty key"));
        }
        Ok(())
    }
}

/// Candidate replacements for `F` and their selection weights.
///
/// Rule `i` is chosen with probability `weights[i] / sum(weights)`. Weights
/// beyond the number of rules are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedRules {
    pub rules: Vec<String>,
    /// Signed so that non-positive weights in a document report a
    /// configuration error rather than a parse error.
    pub weights: Vec<i64>,
}

impl WeightedRules {
    /// Returns the weights paired with a rule, after validation.
    ///
    /// Their sum must fit in a `u64`.
    pub fn active_weights(&self) -> Result<Vec<u64>> {
        if self.rules.is_empty() {
            return Err(LsystemError::config("rules were not specified"));
        }
        if self.weights.is_empty() {
            return Err(LsystemError::config("weights were not specified"));
        }
        if self.weights.len() < self.rules.len() {
            return Err(LsystemError::config(
                "fewer weights specified than the number of rules",
            ));
        }
        let mut total: u64 = 0;
        let mut active = Vec::with_capacity(self.rules.len());
        for &weight in &self.weights[..self.rules.len()] {
            let weight = u64::try_from(weight)
                .ok()
                .filter(|&w| w > 0)
                .ok_or_else(|| LsystemError::config("weights must be positive"))?;
            total = total
                .checked_add(weight)
                .ok_or_else(|| LsystemError::config("weights overflow"))?;
            active.push(weight);
        }
        Ok(active)
    }
}

/// Context-sensitive rules keyed by `"<0|1> < <0|1> > <0|1>"`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextualRules {
    pub rules: BTreeMap<String, String>,
}

impl ContextualRules {
    /// Parses every key into a [`ContextKey`].
    pub fn compile(&self) -> Result<ContextTable> {
        let mut table = HashMap::with_capacity(self.rules.len());
        for (key, replacement) in &self.rules {
            let caps = CONTEXT_KEY
                .captures(key)
                .filter(|_| !replacement.is_empty())
                .ok_or_else(|| {
                    LsystemError::config(format!("the rule '{key}' was not specified correctly"))
                })?;
            let bit = |i: usize| caps[i].chars().next().unwrap_or('0');
            table.insert(
                ContextKey {
                    left: bit(1),
                    strict: bit(2),
                    right: bit(3),
                },
                replacement.clone(),
            );
        }
        Ok(ContextTable { rules: table })
    }
}

/// Left neighbour, strict predecessor and right neighbour of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextKey {
    pub left: char,
    pub strict: char,
    pub right: char,
}

/// Validated lookup table for the contextual engine.
#[derive(Clone, Debug, Default)]
pub struct ContextTable {
    rules: HashMap<ContextKey, String>,
}

impl ContextTable {
    /// Looks up a rule. A missing neighbour never matches, so the symbol
    /// keeps its identity.
    pub fn get(&self, left: Option<char>, strict: char, right: Option<char>) -> Option<&str> {
        let key = ContextKey {
            left: left?,
            strict,
            right: right?,
        };
        self.rules.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
