//! Engine errors

use thiserror::Error;

/// Failure to derive the symbol grid from the reel set.
///
/// The grid is only defined once every reel has snapped to its stop index;
/// asking earlier is an orchestration bug, so the engine logs it and recovers
/// to idle rather than evaluating a half-stopped window.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("reel {reel_index} is still moving, grid is undefined")]
    ReelMoving { reel_index: usize },
    #[error("reel {reel_index} has no stop index recorded")]
    MissingStop { reel_index: usize },
}
