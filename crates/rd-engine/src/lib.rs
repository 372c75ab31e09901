//! # rd-engine
//!
//! Spin orchestration for ReelDrive: deterministic reel state machines, a
//! single-mutation game state store, an explicit timer scheduler, and the
//! feature controllers (free spins, autoplay) that route one spin into the
//! next.
//!
//! The engine is clock-driven. The host calls [`GameEngine::tick`] with the
//! current time and the elapsed delta; everything else (stop deadlines,
//! settle pauses, inter-spin delays, feature transitions) is derived from
//! that clock through the [`sched::Scheduler`]. Nothing here sleeps, spawns
//! threads, or reads a wall clock, which is what makes the whole spin cycle
//! replayable in tests with a virtual clock.
//!
//! ```text
//!   intents ──► GameEngine ──► Scheduler (timers)
//!                  │   ▲
//!                  ▼   │
//!              ReelManager ──► SymbolGrid ──► evaluate_win
//!                  │                              │
//!                  ▼                              ▼
//!               Store.apply(StateUpdate) ◄── controllers
//! ```

pub mod autoplay;
pub mod engine;
pub mod error;
pub mod free_spins;
pub mod outcome;
pub mod reel;
pub mod reels;
pub mod sched;
pub mod spin;
pub mod state;
pub mod stats;

pub use autoplay::AutoplayController;
pub use engine::GameEngine;
pub use error::GridError;
pub use free_spins::FreeSpinsController;
pub use outcome::{ForcedOutcome, OutcomeContext, OutcomeProvider, RandomOutcome};
pub use reel::{Reel, ReelState};
pub use reels::ReelManager;
pub use sched::{Scheduler, TimerId, TimerTask};
pub use spin::{AutoplayToggle, BetChange, SpinCycle, SpinKind, SpinRejection, SpinStart};
pub use state::{GameState, SharedState, StateUpdate, Store};
pub use stats::SessionStats;
