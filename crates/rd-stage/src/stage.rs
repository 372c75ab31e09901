//! Stage — the enum of canonical game-flow moments

use serde::{Deserialize, Serialize};

/// A winning payline as the presentation layer needs it: which line, which
/// symbol, how many in a row, how much it paid, and the exact grid cells
/// `(reel, row)` to highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinLineInfo {
    /// Payline index
    pub line_index: u8,
    /// Winning symbol identifier
    pub symbol: String,
    /// Consecutive match count from reel 0
    pub count: u8,
    /// Win amount for this line
    pub line_amount: f64,
    /// Cells to highlight, `(reel, row)`
    pub positions: Vec<(u8, u8)>,
}

/// Canonical game stage.
///
/// Every stage the core can emit, in the order they naturally occur within a
/// spin. The presentation layer subscribes to these; nothing here prescribes
/// how (or whether) a stage is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin accepted, bet committed, reels about to move
    SpinStart,

    /// A reel has started its spin animation
    ReelSpinning {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// A reel has come to rest, showing its final window
    ReelStop {
        /// Which reel stopped (0-indexed)
        reel_index: u8,
        /// Visible symbols on this reel, top to bottom
        #[serde(default)]
        symbols: Vec<String>,
    },

    /// All reels at rest, settle delay elapsed, wins being evaluated
    EvaluateWins,

    /// Spin fully resolved; controls may unlock (unless a feature chains on)
    SpinEnd,

    // ═══════════════════════════════════════════════════════════════════════
    // WIN PRESENTATION
    // ═══════════════════════════════════════════════════════════════════════
    /// Win celebration starting
    WinPresent {
        /// Total win amount for the spin
        win_amount: f64,
        /// Bet the win is measured against (for big/mega win text)
        bet_amount: f64,
        /// Number of winning lines
        line_count: u8,
    },

    /// Draw one winning line
    WinLineShow {
        /// Line descriptor with the cells to highlight
        line: WinLineInfo,
    },

    /// Win counter rollup starting
    RollupStart {
        /// Amount to count up to
        target_amount: f64,
    },

    /// Win counter rollup finished
    RollupEnd {
        /// Final displayed amount
        final_amount: f64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // FREE SPINS FEATURE
    // ═══════════════════════════════════════════════════════════════════════
    /// Free spins awarded; entry presentation begins
    FeatureEnter {
        /// Spins awarded
        awarded_spins: u32,
        /// Feature win multiplier
        multiplier: f64,
    },

    /// One free spin resolved within the feature
    FeatureStep {
        /// 1-based index of the spin just played
        spin_index: u32,
        /// Spins still remaining
        spins_remaining: u32,
        /// Running feature total
        feature_total: f64,
    },

    /// Additional spins granted mid-feature (no entry presentation replay)
    FeatureRetrigger {
        /// Spins added
        extra_spins: u32,
        /// New remaining counter
        spins_remaining: u32,
    },

    /// Feature over; present the total before returning control
    FeatureExit {
        /// Total feature win
        total_win: f64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // AUTOPLAY
    // ═══════════════════════════════════════════════════════════════════════
    /// Autoplay engaged
    AutoplayStart {
        /// Spins queued
        spins: u32,
    },

    /// Autoplay disengaged (counter exhausted, player stop, or funds)
    AutoplayStop {
        /// Spins left unplayed at the moment of stopping
        spins_remaining: u32,
    },
}

impl Stage {
    /// Stable uppercase name, for logs and event routing
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SpinStart => "SPIN_START",
            Self::ReelSpinning { .. } => "REEL_SPINNING",
            Self::ReelStop { .. } => "REEL_STOP",
            Self::EvaluateWins => "EVALUATE_WINS",
            Self::SpinEnd => "SPIN_END",
            Self::WinPresent { .. } => "WIN_PRESENT",
            Self::WinLineShow { .. } => "WIN_LINE_SHOW",
            Self::RollupStart { .. } => "ROLLUP_START",
            Self::RollupEnd { .. } => "ROLLUP_END",
            Self::FeatureEnter { .. } => "FEATURE_ENTER",
            Self::FeatureStep { .. } => "FEATURE_STEP",
            Self::FeatureRetrigger { .. } => "FEATURE_RETRIGGER",
            Self::FeatureExit { .. } => "FEATURE_EXIT",
            Self::AutoplayStart { .. } => "AUTOPLAY_START",
            Self::AutoplayStop { .. } => "AUTOPLAY_STOP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_are_stable() {
        assert_eq!(Stage::SpinStart.type_name(), "SPIN_START");
        assert_eq!(
            Stage::ReelStop {
                reel_index: 2,
                symbols: vec![]
            }
            .type_name(),
            "REEL_STOP"
        );
        assert_eq!(
            Stage::FeatureRetrigger {
                extra_spins: 5,
                spins_remaining: 9
            }
            .type_name(),
            "FEATURE_RETRIGGER"
        );
    }

    #[test]
    fn serializes_with_snake_case_tag() {
        let json = serde_json::to_string(&Stage::WinPresent {
            win_amount: 12.5,
            bet_amount: 2.5,
            line_count: 3,
        })
        .unwrap();
        assert!(json.contains("\"type\":\"win_present\""));
        assert!(json.contains("win_amount"));
    }
}
