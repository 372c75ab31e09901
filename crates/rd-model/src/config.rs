//! Game configuration — reel layout, pays, features and timing
//!
//! The config is loaded once and treated as immutable for the life of a
//! session. `validate()` runs after deserialization and before the engine is
//! built, so the runtime can index strips and paylines without re-checking.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payline::{standard_10_paylines, Payline};
use crate::paytable::Paytable;
use crate::strip::ReelStrip;
use crate::symbol::SymbolId;

/// Configuration validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config must define at least one reel strip")]
    NoStrips,
    #[error("reel strip {index} is shorter than the {rows}-row window")]
    StripTooShort { index: usize, rows: u8 },
    #[error("payline {index} does not fit a {reels}x{rows} grid")]
    InvalidPayline { index: u8, reels: u8, rows: u8 },
    #[error("bet_levels must be non-empty and strictly positive")]
    InvalidBetLevels,
    #[error("default_bet_per_line {0} is not one of the configured bet levels")]
    UnknownDefaultBet(f64),
    #[error("scatter symbol '{0}' does not appear on any reel strip")]
    ScatterMissing(SymbolId),
    #[error("feature must award at least one spin")]
    NoAwardedSpins,
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Spin timing parameters, all in milliseconds (speeds in positions/ms).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinTiming {
    /// Minimum spin duration before the first reel may begin stopping
    pub base_spin_ms: f64,
    /// Extra delay added per reel index, producing the left-to-right cascade
    pub stop_stagger_ms: f64,
    /// Duration of the deceleration tween into the stop position
    pub stop_tween_ms: f64,
    /// Settling pause after the last reel stops, before evaluation
    pub settle_buffer_ms: f64,
    /// Acceleration while ramping up, positions/ms per ms
    pub accel_per_ms: f64,
    /// Cruise speed, positions/ms
    pub max_speed: f64,
    /// Pause between consecutive automatic spins (autoplay, free spins)
    pub inter_spin_delay_ms: f64,
    /// Feature entry transition length
    pub feature_enter_ms: f64,
    /// Feature exit transition length
    pub feature_exit_ms: f64,
}

impl SpinTiming {
    /// Default presentation pace
    pub fn normal() -> Self {
        Self {
            base_spin_ms: 1000.0,
            stop_stagger_ms: 250.0,
            stop_tween_ms: 450.0,
            settle_buffer_ms: 120.0,
            accel_per_ms: 0.0001,
            max_speed: 0.03,
            inter_spin_delay_ms: 600.0,
            feature_enter_ms: 2000.0,
            feature_exit_ms: 1500.0,
        }
    }

    /// Compressed pace for turbo mode. Same phase structure, shorter
    /// durations and tighter stagger.
    pub fn turbo() -> Self {
        Self {
            base_spin_ms: 350.0,
            stop_stagger_ms: 80.0,
            stop_tween_ms: 200.0,
            settle_buffer_ms: 60.0,
            accel_per_ms: 0.0004,
            max_speed: 0.06,
            inter_spin_delay_ms: 200.0,
            feature_enter_ms: 800.0,
            feature_exit_ms: 600.0,
        }
    }

    /// When reel `index` is due to come to rest, measured from spin start.
    pub fn stop_deadline_ms(&self, spin_start_ms: f64, index: usize) -> f64 {
        spin_start_ms + self.base_spin_ms + index as f64 * self.stop_stagger_ms
    }
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self::normal()
    }
}

/// Free spins and autoplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSettings {
    /// The scatter symbol that triggers free spins
    pub scatter: SymbolId,
    /// Scatters anywhere on the grid needed to trigger (and retrigger)
    pub min_scatter_count: u8,
    /// Free spins awarded on entry
    pub awarded_spins: u32,
    /// Extra spins added on a retrigger
    pub retrigger_spins: u32,
    /// Whether scatters landed during free spins retrigger
    pub can_retrigger: bool,
    /// Win multiplier applied to every free spin
    pub feature_multiplier: f64,
    /// Spins queued by one autoplay activation
    pub autoplay_spins: u32,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            scatter: SymbolId::new("SCATTER"),
            min_scatter_count: 3,
            awarded_spins: 10,
            retrigger_spins: 5,
            can_retrigger: true,
            feature_multiplier: 2.0,
            autoplay_spins: 10,
        }
    }
}

/// Full game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Display name
    pub name: String,
    /// Visible rows per reel
    pub rows: u8,
    /// One strip per reel, left to right
    pub strips: Vec<ReelStrip>,
    /// Active paylines
    pub paylines: Vec<Payline>,
    /// Payout multipliers
    pub paytable: Paytable,
    /// Free spins and autoplay settings
    pub features: FeatureSettings,
    /// Normal-mode timing
    pub timing: SpinTiming,
    /// Turbo-mode timing
    pub turbo_timing: SpinTiming,
    /// Selectable bet-per-line values, ascending
    pub bet_levels: Vec<f64>,
    /// Initial bet-per-line
    pub default_bet_per_line: f64,
}

impl GameConfig {
    /// Number of reels
    pub fn reel_count(&self) -> usize {
        self.strips.len()
    }

    /// Total bet for a given bet-per-line
    pub fn total_bet(&self, bet_per_line: f64) -> f64 {
        bet_per_line * self.paylines.len() as f64
    }

    /// Check internal consistency. Run once at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strips.is_empty() {
            return Err(ConfigError::NoStrips);
        }
        for (index, strip) in self.strips.iter().enumerate() {
            if strip.len() < self.rows as usize {
                return Err(ConfigError::StripTooShort {
                    index,
                    rows: self.rows,
                });
            }
        }
        let reels = self.reel_count() as u8;
        for line in &self.paylines {
            if !line.is_valid_for(reels, self.rows) {
                return Err(ConfigError::InvalidPayline {
                    index: line.index,
                    reels,
                    rows: self.rows,
                });
            }
        }
        if self.bet_levels.is_empty() || self.bet_levels.iter().any(|&b| b <= 0.0) {
            return Err(ConfigError::InvalidBetLevels);
        }
        if !self.bet_levels.contains(&self.default_bet_per_line) {
            return Err(ConfigError::UnknownDefaultBet(self.default_bet_per_line));
        }
        if self
            .strips
            .iter()
            .all(|s| s.positions_of(&self.features.scatter).is_empty())
        {
            return Err(ConfigError::ScatterMissing(self.features.scatter.clone()));
        }
        if self.features.awarded_spins == 0 {
            return Err(ConfigError::NoAwardedSpins);
        }
        Ok(())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The stock 5×3, 10-line game used by the simulator and tests.
    pub fn standard_5x3() -> Self {
        let config = Self {
            name: "ReelDrive Classic".to_string(),
            rows: 3,
            strips: standard_strips(),
            paylines: standard_10_paylines(),
            paytable: standard_paytable(),
            features: FeatureSettings::default(),
            timing: SpinTiming::normal(),
            turbo_timing: SpinTiming::turbo(),
            bet_levels: vec![0.5, 1.0, 2.0, 5.0, 10.0],
            default_bet_per_line: 1.0,
        };
        debug_assert!(config.validate().is_ok());
        config
    }
}

fn standard_paytable() -> Paytable {
    Paytable::new()
        .with_entry("FACE1", &[20.0, 100.0, 500.0])
        .with_entry("FACE2", &[15.0, 75.0, 300.0])
        .with_entry("CUP", &[10.0, 50.0, 200.0])
        .with_entry("RING", &[8.0, 40.0, 150.0])
        .with_entry("SCARAB", &[5.0, 25.0, 100.0])
        .with_entry("ANKH", &[4.0, 20.0, 80.0])
        .with_entry("EYE", &[3.0, 15.0, 60.0])
        .with_entry("LOTUS", &[2.0, 10.0, 40.0])
}

/// Five 64-symbol strips. High pays get rarer toward the top of the table;
/// one scatter roughly every 16 positions, offset per reel so that scatters
/// rarely align in the same window.
fn standard_strips() -> Vec<ReelStrip> {
    const POOL: &[(&str, usize)] = &[
        ("LOTUS", 12),
        ("EYE", 11),
        ("ANKH", 10),
        ("SCARAB", 9),
        ("RING", 8),
        ("CUP", 6),
        ("FACE2", 5),
        ("FACE1", 3),
    ];

    (0..5)
        .map(|reel| {
            let mut ids: Vec<String> = Vec::with_capacity(64);
            let mut cursor = reel * 7; // offset so reels differ
            let flat: Vec<&str> = POOL
                .iter()
                .flat_map(|&(sym, n)| std::iter::repeat_n(sym, n))
                .collect();
            while ids.len() < 64 {
                // a scatter every 16th position, staggered by reel
                if ids.len() % 16 == (reel * 3) % 16 {
                    ids.push("SCATTER".to_string());
                } else {
                    ids.push(flat[cursor % flat.len()].to_string());
                    cursor += 5; // coprime stride spreads symbols out
                }
            }
            ReelStrip::from_ids(ids)
        })
        .collect()
}
