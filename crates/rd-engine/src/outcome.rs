//! Outcome providers
//!
//! The stop index for every reel is decided before the reels start moving;
//! animation only plays the decision back. [`OutcomeProvider`] is the seam
//! between the two: production uses [`RandomOutcome`], tests and demo rigs
//! swap in [`ForcedOutcome`] or a scripted provider without touching the
//! engine.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rd_model::{ReelStrip, SymbolId};

/// Everything a provider may consult when deciding stops
pub struct OutcomeContext<'a> {
    /// Reel strips, left to right
    pub strips: &'a [Arc<ReelStrip>],
    /// Visible rows per reel
    pub rows: u8,
}

/// Decides the stop index for each reel of one spin.
pub trait OutcomeProvider: Send {
    fn decide_stops(&mut self, ctx: &OutcomeContext<'_>) -> Vec<usize>;
}

/// Uniform random stops from a seedable RNG.
pub struct RandomOutcome {
    rng: StdRng,
}

impl RandomOutcome {
    /// OS-seeded randomness
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic stream for replayable sessions
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOutcome {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeProvider for RandomOutcome {
    fn decide_stops(&mut self, ctx: &OutcomeContext<'_>) -> Vec<usize> {
        ctx.strips
            .iter()
            .map(|strip| self.rng.random_range(0..strip.len()))
            .collect()
    }
}

/// Forces a symbol into the window on the first `count` reels.
///
/// With `row` set, the symbol lands on that row of each forced reel (lining
/// up a payline win). With `row` unset, the landing row is staggered per
/// reel, which is the natural shape of a scatter trigger. Remaining reels
/// stay random but avoid showing the forced symbol on the target row, so the
/// forced count is exact.
pub struct ForcedOutcome {
    symbol: SymbolId,
    count: usize,
    row: Option<u8>,
    rng: StdRng,
}

impl ForcedOutcome {
    pub fn new(symbol: impl Into<SymbolId>, count: usize, row: Option<u8>) -> Self {
        Self {
            symbol: symbol.into(),
            count,
            row,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(symbol: impl Into<SymbolId>, count: usize, row: Option<u8>, seed: u64) -> Self {
        Self {
            symbol: symbol.into(),
            count,
            row,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Force a feature trigger: `count` scatters on staggered rows.
    pub fn scatter_trigger(scatter: impl Into<SymbolId>, count: usize) -> Self {
        Self::new(scatter, count, None)
    }

    fn row_for_reel(&self, reel: usize, rows: u8) -> usize {
        match self.row {
            Some(row) => row as usize,
            None => reel % rows as usize,
        }
    }
}

impl OutcomeProvider for ForcedOutcome {
    fn decide_stops(&mut self, ctx: &OutcomeContext<'_>) -> Vec<usize> {
        ctx.strips
            .iter()
            .enumerate()
            .map(|(reel, strip)| {
                let len = strip.len();
                let row = self.row_for_reel(reel, ctx.rows);
                if reel < self.count {
                    let positions = strip.positions_of(&self.symbol);
                    let Some(&pos) = positions.first() else {
                        log::warn!(
                            "forced symbol '{}' not on strip {}, falling back to random",
                            self.symbol,
                            reel
                        );
                        return self.rng.random_range(0..len);
                    };
                    // Stop so the symbol shows on the target row
                    (pos + len - (row % len)) % len
                } else {
                    // Keep the forced symbol off this reel's target row
                    for _ in 0..8 {
                        let stop = self.rng.random_range(0..len);
                        if strip.symbol_at(stop + row) != &self.symbol {
                            return stop;
                        }
                    }
                    self.rng.random_range(0..len)
                }
            })
            .collect()
    }
}
