//! Reel set management

use std::sync::Arc;

use rd_model::{GameConfig, ReelStrip, SpinTiming, SymbolGrid};

use crate::error::GridError;
use crate::reel::{Reel, ReelState};

/// Owns the full reel set and fans the tick out to each reel.
///
/// The grid accessor is guarded: it refuses to produce a window while any
/// reel is in flight, which keeps evaluation from ever seeing a torn state.
#[derive(Debug)]
pub struct ReelManager {
    reels: Vec<Reel>,
    strips: Vec<Arc<ReelStrip>>,
    rows: u8,
}

impl ReelManager {
    pub fn from_config(config: &GameConfig) -> Self {
        let strips: Vec<Arc<ReelStrip>> =
            config.strips.iter().cloned().map(Arc::new).collect();
        let reels = strips
            .iter()
            .enumerate()
            .map(|(i, strip)| Reel::new(i, Arc::clone(strip)))
            .collect();
        Self {
            reels,
            strips,
            rows: config.rows,
        }
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn reel(&self, index: usize) -> &Reel {
        &self.reels[index]
    }

    pub fn strips(&self) -> &[Arc<ReelStrip>] {
        &self.strips
    }

    /// Start every reel and commit its stop, staggered left to right.
    pub fn start_spin(&mut self, stops: &[usize], spin_start_ms: f64, timing: &SpinTiming) {
        debug_assert_eq!(stops.len(), self.reels.len());
        for (reel, &stop) in self.reels.iter_mut().zip(stops) {
            reel.start_spin();
            let deadline = timing.stop_deadline_ms(spin_start_ms, reel.index());
            reel.request_stop(stop, deadline);
        }
    }

    /// Advance all reels. Returns whether any reel is still moving.
    pub fn update_all(&mut self, delta_ms: f64, now_ms: f64, timing: &SpinTiming) -> bool {
        let mut any_moving = false;
        for reel in &mut self.reels {
            reel.update(delta_ms, now_ms, timing);
            any_moving |= reel.is_moving();
        }
        any_moving
    }

    pub fn any_moving(&self) -> bool {
        self.reels.iter().any(Reel::is_moving)
    }

    /// Derive the visible window. Defined only when every reel is at rest
    /// with a recorded stop index.
    pub fn grid(&self) -> Result<SymbolGrid, GridError> {
        let mut stops = Vec::with_capacity(self.reels.len());
        for reel in &self.reels {
            if reel.is_moving() {
                return Err(GridError::ReelMoving {
                    reel_index: reel.index(),
                });
            }
            match reel.stop_index() {
                Some(stop) => stops.push(stop),
                None => {
                    return Err(GridError::MissingStop {
                        reel_index: reel.index(),
                    })
                }
            }
        }
        Ok(SymbolGrid::from_stops(&self.strips, &stops, self.rows))
    }

    /// The visible column of a stopped reel, top to bottom
    pub fn visible_column(&self, index: usize) -> Option<Vec<String>> {
        let reel = &self.reels[index];
        if reel.state() != ReelState::Stopped {
            return None;
        }
        let stop = reel.stop_index()?;
        Some(
            (0..self.rows as usize)
                .map(|row| reel.strip().symbol_at(stop + row).to_string())
                .collect(),
        )
    }
}
