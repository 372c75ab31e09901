//! # rd-model — Slot data model and win evaluation
//!
//! Everything in this crate is pure data or pure functions: symbols, circular
//! reel strips, payline shapes, the paytable, the derived symbol grid, and the
//! win evaluator. Nothing here keeps time, owns reels, or touches game state —
//! that is [`rd-engine`]'s job.
//!
//! ## Architecture
//!
//! ```text
//! GameConfig
//!     ├── Vec<ReelStrip>      (circular symbol sequences)
//!     ├── Vec<Payline>        (row path per reel)
//!     ├── Paytable            (symbol → match count → multiplier)
//!     ├── FeatureSettings     (scatter rules, free spins, autoplay)
//!     └── SpinTiming ×2       (normal / turbo constants)
//!
//! SymbolGrid (derived from stop indices)
//!     │
//!     v
//! evaluate_win(grid, paylines, paytable, scatter, bet) → WinResult
//! ```

pub mod config;
pub mod evaluate;
pub mod grid;
pub mod payline;
pub mod paytable;
pub mod strip;
pub mod symbol;

pub use config::*;
pub use evaluate::*;
pub use grid::*;
pub use payline::*;
pub use paytable::*;
pub use strip::*;
pub use symbol::*;
