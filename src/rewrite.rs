//! Derivation of symbol strings from an axiom and a [`RuleSet`].
//!
//! The three engines share one derivation loop ([`derive_with`]); each engine
//! only knows how to build the successor of a single generation. Rules of
//! generation *n* are applied uniformly to the string of generation *n − 1*,
//! never to symbols inserted during the same sweep.

use crate::error::{LsystemError, Result};
use crate::rules::{
    ContextTable, ContextualRules, LiteralRules, RuleSet, WEIGHTED_PREDECESSOR, WeightedRules,
};
use crate::symbols::SymbolString;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, warn};

/// Builds the successor of one generation.
pub trait Rewriter {
    /// Appends the rewritten form of `current` to `next`.
    fn rewrite(&mut self, current: &str, next: &mut String) -> Result<()>;
}

/// Caller-side control over a derivation.
#[derive(Clone, Debug, Default)]
pub struct DeriveOptions {
    /// Seed for the stochastic engine. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Abort once a generation grows beyond this many bytes.
    pub max_symbols: Option<usize>,
    /// Abort if this instant has passed before a generation starts.
    pub deadline: Option<Instant>,
}

impl DeriveOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn check_deadline(&self, generation: u32) -> Result<()> {
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(abort(generation, "deadline exceeded".to_owned()));
        }
        Ok(())
    }

    fn check_growth(&self, generation: u32, len: usize) -> Result<()> {
        if let Some(limit) = self.max_symbols
            && len > limit
        {
            return Err(abort(
                generation,
                format!("{len} symbols exceeds the limit of {limit}"),
            ));
        }
        Ok(())
    }
}

fn abort(generation: u32, reason: String) -> LsystemError {
    warn!(generation, %reason, "derivation aborted");
    LsystemError::Aborted { generation, reason }
}

/// Derives `order` generations from `axiom` with default options.
///
/// Order 0 returns the axiom unchanged.
pub fn derive(order: u32, axiom: &str, rules: &RuleSet) -> Result<SymbolString> {
    derive_with(order, axiom, rules, &DeriveOptions::default())
}

/// Derives `order` generations from `axiom`.
///
/// Fails with [`LsystemError::Configuration`] for an empty axiom or invalid
/// rules, even when `order` is 0.
pub fn derive_with(
    order: u32,
    axiom: &str,
    rules: &RuleSet,
    options: &DeriveOptions,
) -> Result<SymbolString> {
    if axiom.is_empty() {
        return Err(LsystemError::config("axiom was not specified"));
    }
    match rules {
        RuleSet::Literal(r) => {
            derive_generations(LiteralRewriter::new(r)?, order, axiom, options)
        }
        RuleSet::Weighted(r) => {
            derive_generations(StochasticRewriter::new(r, options.seed)?, order, axiom, options)
        }
        RuleSet::Contextual(r) => {
            derive_generations(ContextualRewriter::new(r)?, order, axiom, options)
        }
    }
}

/// The derivation loop shared by every engine.
pub fn derive_generations<R: Rewriter>(
    mut rewriter: R,
    order: u32,
    axiom: &str,
    options: &DeriveOptions,
) -> Result<SymbolString> {
    let mut current = axiom.to_owned();
    for generation in 1..=order {
        options.check_deadline(generation)?;
        let mut next = String::with_capacity(current.len().saturating_mul(2));
        rewriter.rewrite(&current, &mut next)?;
        options.check_growth(generation, next.len())?;
        debug!(generation, symbols = next.len(), "derived generation");
        current = next;
    }
    Ok(SymbolString::from(current))
}

/// Deterministic context-free engine.
pub struct LiteralRewriter<'a> {
    rules: &'a [(String, String)],
}

impl<'a> LiteralRewriter<'a> {
    pub fn new(rules: &'a LiteralRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self { rules: &rules.rules })
    }
}

impl Rewriter for LiteralRewriter<'_> {
    fn rewrite(&mut self, current: &str, next: &mut String) -> Result<()> {
        let mut rest = current;
        while let Some(c) = rest.chars().next() {
            match self
                .rules
                .iter()
                .find(|(key, _)| rest.starts_with(key.as_str()))
            {
                Some((key, replacement)) => {
                    next.push_str(replacement);
                    rest = &rest[key.len()..];
                }
                None => {
                    next.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        Ok(())
    }
}

/// Stochastic context-free engine. Owns the single generator used for the
/// whole derivation.
pub struct StochasticRewriter<'a> {
    rules: &'a [String],
    sampler: WeightedIndex<u64>,
    rng: StdRng,
}

impl<'a> StochasticRewriter<'a> {
    pub fn new(rules: &'a WeightedRules, seed: Option<u64>) -> Result<Self> {
        let weights = rules.active_weights()?;
        let sampler = WeightedIndex::new(weights)
            .map_err(|e| LsystemError::config(format!("invalid weights: {e}")))?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            rules: &rules.rules,
            sampler,
            rng,
        })
    }
}

impl Rewriter for StochasticRewriter<'_> {
    fn rewrite(&mut self, current: &str, next: &mut String) -> Result<()> {
        for c in current.chars() {
            if c == WEIGHTED_PREDECESSOR {
                next.push_str(&self.rules[self.sampler.sample(&mut self.rng)]);
            } else {
                next.push(c);
            }
        }
        Ok(())
    }
}

/// Context-sensitive engine over the `0`/`1` alphabet.
///
/// Daughter branches do not belong to the context of their mother branch:
/// the left context skips whole closed sub-branches, and the right context
/// stops at the end of the current branch.
pub struct ContextualRewriter {
    table: ContextTable,
}

impl ContextualRewriter {
    pub fn new(rules: &ContextualRules) -> Result<Self> {
        Ok(Self {
            table: rules.compile()?,
        })
    }
}

impl Rewriter for ContextualRewriter {
    fn rewrite(&mut self, current: &str, next: &mut String) -> Result<()> {
        let symbols: Vec<char> = current.chars().collect();
        for (pos, &symbol) in symbols.iter().enumerate() {
            match symbol {
                'F' | '[' | ']' | '$' => next.push(symbol),
                '+' => next.push('-'),
                '-' => next.push('+'),
                '0' | '1' => {
                    let left = left_context(&symbols, pos)?;
                    let right = right_context(&symbols, pos)?;
                    match self.table.get(left, symbol, right) {
                        Some(replacement) => next.push_str(replacement),
                        None => next.push(symbol),
                    }
                }
                _ => {
                    return Err(LsystemError::UnsupportedSymbol {
                        symbol,
                        position: pos,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Nearest variable before `pos`, skipping closed sub-branches and climbing
/// out of the enclosing branch.
pub fn left_context(symbols: &[char], pos: usize) -> Result<Option<char>> {
    let mut i = pos;
    while i > 0 {
        i -= 1;
        match symbols[i] {
            'F' | '+' | '-' | '$' | '[' => {}
            ']' => {
                let close = i;
                let mut depth = 1usize;
                while depth != 0 {
                    if i == 0 {
                        return Err(LsystemError::StackUnderflow { position: close });
                    }
                    i -= 1;
                    match symbols[i] {
                        '[' => depth -= 1,
                        ']' => depth += 1,
                        _ => {}
                    }
                }
            }
            c @ ('0' | '1') => return Ok(Some(c)),
            c => {
                return Err(LsystemError::UnsupportedSymbol {
                    symbol: c,
                    position: i,
                });
            }
        }
    }
    Ok(None)
}

/// Nearest variable after `pos` within the current branch, skipping nested
/// side branches.
pub fn right_context(symbols: &[char], pos: usize) -> Result<Option<char>> {
    let mut i = pos + 1;
    while i < symbols.len() {
        match symbols[i] {
            'F' | '+' | '-' | '$' => {}
            ']' => return Ok(None),
            '[' => {
                let mut depth = 1usize;
                while depth != 0 {
                    i += 1;
                    match symbols.get(i) {
                        Some('[') => depth += 1,
                        Some(']') => depth -= 1,
                        Some(_) => {}
                        None => return Ok(None),
                    }
                }
            }
            c @ ('0' | '1') => return Ok(Some(c)),
            c => {
                return Err(LsystemError::UnsupportedSymbol {
                    symbol: c,
                    position: i,
                });
            }
        }
        i += 1;
    }
    Ok(None)
}
