//! Paytable — symbol → match count → payout multiplier

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::symbol::SymbolId;

/// Pay values for one symbol, indexed from 3-of-a-kind
/// (`pays[0]` = 3oak, `pays[1]` = 4oak, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaySchedule {
    pays: Vec<f64>,
}

impl PaySchedule {
    pub fn new(pays: &[f64]) -> Self {
        Self {
            pays: pays.to_vec(),
        }
    }

    /// Multiplier for a match count; zero below 3 or past the schedule.
    pub fn pay_for(&self, match_count: u8) -> f64 {
        if match_count < 3 {
            return 0.0;
        }
        let idx = (match_count - 3) as usize;
        self.pays.get(idx).copied().unwrap_or(0.0)
    }
}

/// The paytable: payout multipliers per symbol and match count, applied
/// against bet-per-line. Symbols without an entry (scatter included) pay
/// nothing on lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paytable {
    entries: HashMap<SymbolId, PaySchedule>,
}

impl Paytable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a symbol's pay schedule
    pub fn with_entry(mut self, symbol: impl Into<SymbolId>, pays: &[f64]) -> Self {
        self.entries.insert(symbol.into(), PaySchedule::new(pays));
        self
    }

    /// Schedule for a symbol, if it has one
    pub fn schedule(&self, symbol: &SymbolId) -> Option<&PaySchedule> {
        self.entries.get(symbol)
    }

    /// Multiplier for `match_count` of `symbol`; zero without an entry.
    pub fn pay_for(&self, symbol: &SymbolId, match_count: u8) -> f64 {
        self.entries
            .get(symbol)
            .map(|s| s.pay_for(match_count))
            .unwrap_or(0.0)
    }
}
