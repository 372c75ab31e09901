//! Session statistics

use serde::{Deserialize, Serialize};

/// Running aggregates over a session, fed by the engine as spins resolve.
/// Free spins count as spins with zero bet, so RTP stays an honest
/// win-over-wagered ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub spins: u64,
    pub winning_spins: u64,
    pub total_wagered: f64,
    pub total_won: f64,
    pub biggest_win: f64,
    pub feature_entries: u64,
    pub feature_retriggers: u64,
    pub free_spins_played: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolved spin
    pub fn record_spin(&mut self, bet: f64, win: f64, free: bool) {
        self.spins += 1;
        self.total_wagered += bet;
        self.total_won += win;
        if win > 0.0 {
            self.winning_spins += 1;
        }
        if win > self.biggest_win {
            self.biggest_win = win;
        }
        if free {
            self.free_spins_played += 1;
        }
    }

    pub fn record_feature_entry(&mut self) {
        self.feature_entries += 1;
    }

    pub fn record_retrigger(&mut self) {
        self.feature_retriggers += 1;
    }

    /// Return-to-player: total won over total wagered
    pub fn rtp(&self) -> f64 {
        if self.total_wagered <= 0.0 {
            0.0
        } else {
            self.total_won / self.total_wagered
        }
    }

    /// Fraction of spins that paid anything
    pub fn hit_rate(&self) -> f64 {
        if self.spins == 0 {
            0.0
        } else {
            self.winning_spins as f64 / self.spins as f64
        }
    }
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "spins:        {}", self.spins)?;
        writeln!(f, "wagered:      {:.2}", self.total_wagered)?;
        writeln!(f, "won:          {:.2}", self.total_won)?;
        writeln!(f, "rtp:          {:.2}%", self.rtp() * 100.0)?;
        writeln!(f, "hit rate:     {:.2}%", self.hit_rate() * 100.0)?;
        writeln!(f, "biggest win:  {:.2}", self.biggest_win)?;
        writeln!(
            f,
            "features:     {} entries, {} retriggers, {} free spins",
            self.feature_entries, self.feature_retriggers, self.free_spins_played
        )
    }
}
