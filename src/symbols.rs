//! Symbol strings and the fixed alphabet of turtle constants.
//!
//! Constants are `F f + - | $ ( ) [ ] { }`. Any other character is a
//! *variable*: it takes part in rewriting but carries no drawing meaning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Structural constants understood by the turtle compiler.
pub const CONSTANTS: [char; 12] = ['F', 'f', '+', '-', '|', '$', '(', ')', '[', ']', '{', '}'];

/// Returns `true` when `c` is one of the structural constants.
pub fn is_constant(c: char) -> bool {
    CONSTANTS.contains(&c)
}

/// An ordered sequence of symbols produced by one derivation generation.
///
/// A `SymbolString` is never edited in place; each generation builds a fresh
/// successor from its predecessor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolString(String);

impl SymbolString {
    pub fn new(symbols: impl Into<String>) -> Self {
        Self(symbols.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of symbols (not bytes).
    pub fn symbol_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Counts occurrences of a single symbol.
    pub fn count(&self, symbol: char) -> usize {
        self.0.chars().filter(|&c| c == symbol).count()
    }
}

impl Deref for SymbolString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SymbolString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for SymbolString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SymbolString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for SymbolString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Removes immediately adjacent cancelling turn pairs (`+-` or `-+`) until
/// none remain, so `"++--"` collapses to nothing. The result is a fixed point:
/// normalising it again changes nothing.
pub fn cancel_turn_pairs(symbols: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(symbols.len());
    for c in symbols.chars() {
        match (out.last().copied(), c) {
            (Some('+'), '-') | (Some('-'), '+') => {
                out.pop();
            }
            _ => out.push(c),
        }
    }
    out
}
