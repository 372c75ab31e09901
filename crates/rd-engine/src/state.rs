//! Game state and the single-mutation store
//!
//! All session state lives in one [`GameState`] value behind a lock, and the
//! only way to change it is [`Store::apply`] with a [`StateUpdate`] patch.
//! Controllers never hold references into the state; they build a patch and
//! hand it over, which keeps every transition observable at one log point and
//! gives each change a version number.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use rd_model::LineWin;

/// Full session state snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Player balance
    pub balance: f64,
    /// Bet per payline
    pub bet_per_line: f64,
    /// Bet per line × payline count, refreshed on every bet change
    pub total_bet: f64,
    /// A spin cycle is in progress (any phase between start and idle)
    pub is_spinning: bool,
    /// Autoplay session active (including while paused for a feature)
    pub is_autoplaying: bool,
    /// Autoplay spins not yet started
    pub autoplay_spins_remaining: u32,
    /// Turbo timing selected
    pub is_turbo_mode: bool,
    /// Currently inside free spins
    pub is_in_free_spins: bool,
    /// Free spins not yet started
    pub free_spins_remaining: u32,
    /// Accumulated win across the current (or last) free spins feature
    pub total_free_spins_win: f64,
    /// Total win of the last completed spin
    pub last_total_win: f64,
    /// Winning lines of the last completed spin
    pub winning_lines: Vec<LineWin>,
}

/// A partial update: only the fields present are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub balance: Option<f64>,
    pub bet_per_line: Option<f64>,
    pub total_bet: Option<f64>,
    pub is_spinning: Option<bool>,
    pub is_autoplaying: Option<bool>,
    pub autoplay_spins_remaining: Option<u32>,
    pub is_turbo_mode: Option<bool>,
    pub is_in_free_spins: Option<bool>,
    pub free_spins_remaining: Option<u32>,
    pub total_free_spins_win: Option<f64>,
    pub last_total_win: Option<f64>,
    pub winning_lines: Option<Vec<LineWin>>,
}

impl StateUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

macro_rules! merge_field {
    ($state:expr, $update:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $update.$field {
                $state.$field = value;
            }
        )+
    };
}

impl GameState {
    fn merge(&mut self, update: StateUpdate) {
        merge_field!(
            self,
            update,
            balance,
            bet_per_line,
            total_bet,
            is_spinning,
            is_autoplaying,
            autoplay_spins_remaining,
            is_turbo_mode,
            is_in_free_spins,
            free_spins_remaining,
            total_free_spins_win,
            last_total_win,
        );
        if let Some(lines) = update.winning_lines {
            self.winning_lines = lines;
        }
    }
}

/// Shared read handle to the live state
pub type SharedState = Arc<RwLock<GameState>>;

/// The store: owns the shared state, counts versions, applies patches.
#[derive(Debug)]
pub struct Store {
    shared: SharedState,
    version: u64,
}

impl Store {
    pub fn new(initial: GameState) -> Self {
        Self {
            shared: Arc::new(RwLock::new(initial)),
            version: 0,
        }
    }

    /// Apply a patch. This is the only mutation point for game state.
    pub fn apply(&mut self, update: StateUpdate) {
        if update.is_empty() {
            return;
        }
        self.version += 1;
        log::debug!("state v{}: {:?}", self.version, update);
        self.shared.write().merge(update);
    }

    /// Cheap clone of the current state
    pub fn snapshot(&self) -> GameState {
        self.shared.read().clone()
    }

    /// Read one value without cloning the whole state
    pub fn read<T>(&self, f: impl FnOnce(&GameState) -> T) -> T {
        f(&self.shared.read())
    }

    /// Handle the host UI can poll from another thread
    pub fn shared(&self) -> SharedState {
        Arc::clone(&self.shared)
    }

    /// Number of patches applied so far
    pub fn version(&self) -> u64 {
        self.version
    }
}
