//! # rd-stage — Canonical stage vocabulary for ReelDrive
//!
//! The spin engine never draws anything. Instead it emits [`StageEvent`]s — the
//! semantic moments of a spin (reel stops, win presentation, feature entry) —
//! and the presentation layer renders them however it likes.
//!
//! A Stage is NOT an animation and NOT an engine-internal transition. It is the
//! meaning of a moment in the game flow, addressed to whoever is watching.

pub mod event;
pub mod stage;

pub use event::*;
pub use stage::*;
