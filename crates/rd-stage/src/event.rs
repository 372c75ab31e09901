//! StageEvent — a stage occurrence stamped with session time

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A [`Stage`] with the session timestamp at which it occurred.
///
/// Timestamps are milliseconds on the engine's clock (virtual in tests,
/// render-loop time in a live client), never wall-clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,
    /// Timestamp in milliseconds on the engine clock
    pub timestamp_ms: f64,
}

impl StageEvent {
    /// Create a new stage event
    pub fn new(stage: Stage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
        }
    }

    /// Stage type name, for logs
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}

/// Sort events by timestamp, preserving emission order for equal stamps.
/// Consumers replaying a drained batch rely on this ordering.
pub fn sort_by_timestamp(events: &mut [StageEvent]) {
    events.sort_by(|a, b| {
        a.timestamp_ms
            .partial_cmp(&b.timestamp_ms)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
