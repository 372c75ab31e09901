//! Autoplay controller
//!
//! Counts queued spins and carries the pause/resume handshake around a free
//! spins feature. A stop request is honored at the next routing point, never
//! mid-spin, and also cancels a pending resume.

#[derive(Debug, Default)]
pub struct AutoplayController {
    active: bool,
    spins_remaining: u32,
    stop_requested: bool,
    paused_for_feature: bool,
}

impl AutoplayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn spins_remaining(&self) -> u32 {
        self.spins_remaining
    }

    pub fn is_paused(&self) -> bool {
        self.paused_for_feature
    }

    /// Begin a session with `spins` queued
    pub fn start(&mut self, spins: u32) {
        self.active = true;
        self.spins_remaining = spins;
        self.stop_requested = false;
        self.paused_for_feature = false;
        log::info!("autoplay started: {spins} spins");
    }

    /// Ask the session to end at the next routing point
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Consume one spin as it starts
    pub fn begin_spin(&mut self) {
        debug_assert!(self.active && self.spins_remaining > 0);
        self.spins_remaining = self.spins_remaining.saturating_sub(1);
    }

    /// Whether the session should start another spin. `false` means the
    /// session is over and [`stop`] should be called.
    ///
    /// [`stop`]: AutoplayController::stop
    pub fn should_continue(&self, balance: f64, total_bet: f64) -> bool {
        if !self.active || self.stop_requested || self.spins_remaining == 0 {
            return false;
        }
        if balance < total_bet {
            log::info!("autoplay stopping: balance below total bet");
            return false;
        }
        true
    }

    /// Park the session while a feature plays out
    pub fn pause_for_feature(&mut self) {
        if self.active {
            self.paused_for_feature = true;
        }
    }

    /// Feature finished. Returns whether the session resumes; a stop request
    /// made during the feature wins and the session ends instead.
    pub fn resume_after_feature(&mut self) -> bool {
        if !self.paused_for_feature {
            return false;
        }
        self.paused_for_feature = false;
        if self.stop_requested || self.spins_remaining == 0 {
            self.stop();
            return false;
        }
        log::info!(
            "autoplay resuming: {} spins remaining",
            self.spins_remaining
        );
        true
    }

    /// End the session. Returns the spins left unplayed.
    pub fn stop(&mut self) -> u32 {
        let remaining = self.spins_remaining;
        self.active = false;
        self.spins_remaining = 0;
        self.stop_requested = false;
        self.paused_for_feature = false;
        log::info!("autoplay stopped: {remaining} spins unplayed");
        remaining
    }
}
