//! Error taxonomy shared by the rewrite engines, the turtle compiler, the
//! layout planner and the emitters.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LsystemError>;

/// Every contract violation surfaces as one of these variants. None of them
/// are transient, so callers should treat the failing call as atomic.
#[derive(Debug, Error)]
pub enum LsystemError {
    /// Invalid order, empty axiom, malformed rules, headings or polygons.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The contextual engine met a symbol outside `0 1 F + - $ [ ]`.
    #[error("the symbol '{symbol}' is not supported (position {position})")]
    UnsupportedSymbol { symbol: char, position: usize },

    /// A branch close with no matching open.
    #[error("unbalanced branch: ']' at position {position} has no saved turtle state")]
    StackUnderflow { position: usize },

    /// Mismatched parallel lists describing multiple subplots.
    #[error("layout input error: {0}")]
    LayoutInput(String),

    /// The derivation control stopped a runaway derivation.
    #[error("derivation aborted before generation {generation}: {reason}")]
    Aborted { generation: u32, reason: String },

    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl LsystemError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn layout(msg: impl Into<String>) -> Self {
        Self::LayoutInput(msg.into())
    }
}
