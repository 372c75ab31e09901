//! Single reel state machine
//!
//! A reel moves through `Idle → Accelerating → Spinning → Decelerating →
//! Stopped` under a shared clock. Position is a float in strip units and is
//! purely presentational while moving; the authoritative outcome is the stop
//! index decided before the spin started. Deceleration is a fixed-duration
//! ease-out tween whose endpoint is congruent with the stop index, and the
//! final frame snaps the position to that index exactly, so no drift can
//! accumulate across spins.

use std::sync::Arc;

use rd_model::{ReelStrip, SpinTiming};

/// Lifecycle of one reel within a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelState {
    /// At rest between spins
    Idle,
    /// Ramping up to cruise speed
    Accelerating,
    /// Cruising at max speed, waiting for its stop deadline
    Spinning,
    /// Easing into the stop position
    Decelerating,
    /// Snapped onto the stop index, spin over
    Stopped,
}

#[derive(Debug, Clone, Copy)]
struct StopTween {
    start_ms: f64,
    duration_ms: f64,
    /// Unwrapped start position
    from: f64,
    /// Unwrapped end position, congruent with the stop index
    to: f64,
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// One reel: strip reference, float position, and spin lifecycle.
#[derive(Debug, Clone)]
pub struct Reel {
    index: usize,
    strip: Arc<ReelStrip>,
    position: f64,
    speed: f64,
    state: ReelState,
    stop_index: Option<usize>,
    target_stop_ms: Option<f64>,
    tween: Option<StopTween>,
}

impl Reel {
    pub fn new(index: usize, strip: Arc<ReelStrip>) -> Self {
        Self {
            index,
            strip,
            position: 0.0,
            speed: 0.0,
            state: ReelState::Idle,
            stop_index: None,
            target_stop_ms: None,
            tween: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> ReelState {
        self.state
    }

    /// Current strip position in symbol units, `[0, strip_len)`
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn strip(&self) -> &ReelStrip {
        &self.strip
    }

    /// The stop index this spin will land on, once requested
    pub fn stop_index(&self) -> Option<usize> {
        self.stop_index
    }

    /// Whether the reel is anywhere in flight
    pub fn is_moving(&self) -> bool {
        !matches!(self.state, ReelState::Idle | ReelState::Stopped)
    }

    /// Begin spinning. Clears the previous stop and starts the ramp.
    pub fn start_spin(&mut self) {
        self.state = ReelState::Accelerating;
        self.speed = 0.0;
        self.stop_index = None;
        self.target_stop_ms = None;
        self.tween = None;
    }

    /// Commit this spin's outcome: land on `stop_index`, at rest by
    /// `target_stop_ms` on the engine clock.
    pub fn request_stop(&mut self, stop_index: usize, target_stop_ms: f64) {
        debug_assert!(stop_index < self.strip.len());
        self.stop_index = Some(stop_index);
        self.target_stop_ms = Some(target_stop_ms);
    }

    /// Advance the reel by `delta_ms`. `now_ms` is the engine clock after the
    /// delta was applied.
    pub fn update(&mut self, delta_ms: f64, now_ms: f64, timing: &SpinTiming) {
        match self.state {
            ReelState::Idle | ReelState::Stopped => {}
            ReelState::Accelerating => {
                self.speed = (self.speed + timing.accel_per_ms * delta_ms).min(timing.max_speed);
                self.advance(delta_ms);
                if self.speed >= timing.max_speed {
                    self.state = ReelState::Spinning;
                }
                // A stop deadline can fall inside the ramp on turbo timing;
                // honor it rather than overshooting.
                self.maybe_begin_stop(now_ms, timing);
            }
            ReelState::Spinning => {
                self.advance(delta_ms);
                self.maybe_begin_stop(now_ms, timing);
            }
            ReelState::Decelerating => self.run_tween(now_ms),
        }
    }

    fn advance(&mut self, delta_ms: f64) {
        let len = self.strip.len() as f64;
        self.position = (self.position + self.speed * delta_ms).rem_euclid(len);
    }

    /// Enter the stop tween once the clock reaches `target - tween duration`.
    fn maybe_begin_stop(&mut self, now_ms: f64, timing: &SpinTiming) {
        let (Some(stop_index), Some(target_ms)) = (self.stop_index, self.target_stop_ms) else {
            return;
        };
        if now_ms < target_ms - timing.stop_tween_ms {
            return;
        }

        let len = self.strip.len() as f64;
        let duration_ms = (target_ms - now_ms).max(1.0).min(timing.stop_tween_ms);
        // Travel at least one symbol forward so the stop always reads as
        // motion, and land on the first position ahead of us congruent with
        // the stop index.
        let min_travel = (self.speed * duration_ms * 0.5).max(1.0);
        let base = stop_index as f64;
        let k = ((self.position + min_travel - base) / len).ceil().max(0.0);
        let to = base + k * len;

        self.tween = Some(StopTween {
            start_ms: now_ms,
            duration_ms,
            from: self.position,
            to,
        });
        self.state = ReelState::Decelerating;
        log::trace!(
            "reel {} decelerating: {:.2} -> {} over {:.0}ms",
            self.index,
            self.position,
            stop_index,
            duration_ms
        );
    }

    fn run_tween(&mut self, now_ms: f64) {
        let Some(tween) = self.tween else {
            // Unreachable by construction; recover instead of panicking.
            self.finish_stop();
            return;
        };
        let t = ((now_ms - tween.start_ms) / tween.duration_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            self.finish_stop();
            return;
        }
        let len = self.strip.len() as f64;
        let eased = ease_out_cubic(t);
        self.position = (tween.from + (tween.to - tween.from) * eased).rem_euclid(len);
        self.speed = 0.0;
    }

    /// Snap exactly onto the stop index. The float position is bit-exact
    /// with `stop_index as f64` from here on.
    fn finish_stop(&mut self) {
        if let Some(stop_index) = self.stop_index {
            self.position = stop_index as f64;
        }
        self.speed = 0.0;
        self.tween = None;
        self.state = ReelState::Stopped;
        log::trace!("reel {} stopped at {:?}", self.index, self.stop_index);
    }
}
