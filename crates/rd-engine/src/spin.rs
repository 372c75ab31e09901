//! Spin cycle phases and intent outcomes

use serde::{Deserialize, Serialize};

/// Where the engine is in the spin cycle. Exactly one phase at a time; every
/// transition goes through the engine, never through ad-hoc flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinCycle {
    /// Waiting for input
    #[default]
    Idle,
    /// Reels in flight
    Spinning,
    /// All reels at rest, settle pause running
    Settling,
    /// Deriving the grid and evaluating wins
    Resolving,
    /// Win presentation (lines, rollup) playing out
    Presenting,
    /// Deciding what the next spin is (feature, autoplay, or idle)
    RoutingNext,
}

/// Why a spin was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinKind {
    /// Player pressed spin; bet is deducted
    Paid,
    /// Autoplay started it; bet is deducted
    Autoplay,
    /// Free spin; no deduction, feature multiplier applies
    Free,
}

impl SpinKind {
    /// Whether this spin deducts the bet from the balance
    pub fn is_paid(self) -> bool {
        !matches!(self, SpinKind::Free)
    }
}

/// Why a spin request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRejection {
    /// A spin cycle is already in progress
    AlreadySpinning,
    /// The cycle is between spins (settling, presenting, routing)
    Transitioning,
    /// Autoplay or free spins own the spin button right now
    ControlsLocked,
    /// Balance below the total bet
    InsufficientBalance,
}

/// Result of a spin request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinStart {
    Started,
    Rejected(SpinRejection),
}

/// Result of a bet change intent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BetChange {
    /// Moved to a new level
    Applied { bet_per_line: f64 },
    /// Already at the boundary level
    Clamped { bet_per_line: f64 },
    /// Bets cannot change mid-cycle or during a feature
    Locked,
}

/// Result of an autoplay toggle intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayToggle {
    /// Autoplay session began with this many spins queued
    Started { spins: u32 },
    /// Stop requested; session ends after the current spin resolves
    Stopping,
    /// Not available (e.g. insufficient balance)
    Unavailable,
}
