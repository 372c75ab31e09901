//! Free spins feature controller
//!
//! Tracks the feature's bookkeeping (spins remaining, accumulated win,
//! retriggers) and nothing else. The engine decides *when* to enter, step,
//! retrigger, and exit; this controller guarantees the counters stay
//! consistent across those calls.

use rd_model::FeatureSettings;

#[derive(Debug)]
pub struct FreeSpinsController {
    awarded_spins: u32,
    retrigger_spins: u32,
    can_retrigger: bool,
    multiplier: f64,

    active: bool,
    spins_remaining: u32,
    total_awarded: u32,
    spin_index: u32,
    total_win: f64,
}

impl FreeSpinsController {
    pub fn new(settings: &FeatureSettings) -> Self {
        Self {
            awarded_spins: settings.awarded_spins,
            retrigger_spins: settings.retrigger_spins,
            can_retrigger: settings.can_retrigger,
            multiplier: settings.feature_multiplier,
            active: false,
            spins_remaining: 0,
            total_awarded: 0,
            spin_index: 0,
            total_win: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn spins_remaining(&self) -> u32 {
        self.spins_remaining
    }

    /// Total spins granted this feature, entry plus retriggers
    pub fn total_awarded(&self) -> u32 {
        self.total_awarded
    }

    /// 1-based index of the free spin currently playing (0 before the first)
    pub fn spin_index(&self) -> u32 {
        self.spin_index
    }

    pub fn total_win(&self) -> f64 {
        self.total_win
    }

    /// Win multiplier while the feature is active, 1.0 otherwise
    pub fn multiplier(&self) -> f64 {
        if self.active { self.multiplier } else { 1.0 }
    }

    /// Enter the feature. Returns the number of spins awarded.
    pub fn enter(&mut self) -> u32 {
        debug_assert!(!self.active, "feature entered while already active");
        self.active = true;
        self.spins_remaining = self.awarded_spins;
        self.total_awarded = self.awarded_spins;
        self.spin_index = 0;
        self.total_win = 0.0;
        log::info!("free spins entered: {} spins awarded", self.awarded_spins);
        self.awarded_spins
    }

    /// Retrigger during the feature. Returns the extra spins granted, or
    /// `None` when retriggers are disabled.
    pub fn retrigger(&mut self) -> Option<u32> {
        if !self.active || !self.can_retrigger {
            return None;
        }
        self.spins_remaining += self.retrigger_spins;
        self.total_awarded += self.retrigger_spins;
        log::info!(
            "free spins retriggered: +{} ({} remaining)",
            self.retrigger_spins,
            self.spins_remaining
        );
        Some(self.retrigger_spins)
    }

    /// Consume one spin as it starts. Returns the 1-based spin index.
    pub fn begin_spin(&mut self) -> u32 {
        debug_assert!(self.active && self.spins_remaining > 0);
        self.spins_remaining = self.spins_remaining.saturating_sub(1);
        self.spin_index += 1;
        self.spin_index
    }

    /// Bank a resolved spin's (already multiplied) win
    pub fn record_win(&mut self, amount: f64) {
        self.total_win += amount;
    }

    /// All awarded spins have been played
    pub fn is_complete(&self) -> bool {
        self.active && self.spins_remaining == 0
    }

    /// Leave the feature. Returns the accumulated feature win.
    pub fn exit(&mut self) -> f64 {
        debug_assert!(self.active);
        self.active = false;
        let total = self.total_win;
        log::info!(
            "free spins over: {} spins played, {:.2} won",
            self.spin_index,
            total
        );
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FeatureSettings {
        FeatureSettings {
            awarded_spins: 3,
            retrigger_spins: 2,
            can_retrigger: true,
            feature_multiplier: 2.0,
            ..FeatureSettings::default()
        }
    }

    #[test]
    fn entry_awards_and_spins_count_down() {
        let mut fs = FreeSpinsController::new(&settings());
        assert!(!fs.is_active());
        assert_eq!(fs.multiplier(), 1.0);

        assert_eq!(fs.enter(), 3);
        assert!(fs.is_active());
        assert_eq!(fs.multiplier(), 2.0);

        assert_eq!(fs.begin_spin(), 1);
        assert_eq!(fs.begin_spin(), 2);
        assert_eq!(fs.spins_remaining(), 1);
        assert!(!fs.is_complete());
        assert_eq!(fs.begin_spin(), 3);
        assert!(fs.is_complete());
    }

    #[test]
    fn retrigger_extends_the_feature() {
        let mut fs = FreeSpinsController::new(&settings());
        fs.enter();
        fs.begin_spin();
        assert_eq!(fs.retrigger(), Some(2));
        assert_eq!(fs.spins_remaining(), 4);
        assert_eq!(fs.total_awarded(), 5);
    }

    #[test]
    fn retrigger_disabled_grants_nothing() {
        let mut cfg = settings();
        cfg.can_retrigger = false;
        let mut fs = FreeSpinsController::new(&cfg);
        fs.enter();
        assert_eq!(fs.retrigger(), None);
        assert_eq!(fs.spins_remaining(), 3);
    }

    #[test]
    fn exit_returns_banked_wins() {
        let mut fs = FreeSpinsController::new(&settings());
        fs.enter();
        fs.begin_spin();
        fs.record_win(10.0);
        fs.begin_spin();
        fs.record_win(4.5);
        fs.begin_spin();
        assert!(fs.is_complete());
        assert_eq!(fs.exit(), 14.5);
        assert!(!fs.is_active());
        assert_eq!(fs.multiplier(), 1.0);
    }

    #[test]
    fn re_entry_resets_counters() {
        let mut fs = FreeSpinsController::new(&settings());
        fs.enter();
        fs.begin_spin();
        fs.record_win(7.0);
        fs.begin_spin();
        fs.begin_spin();
        fs.exit();

        fs.enter();
        assert_eq!(fs.spins_remaining(), 3);
        assert_eq!(fs.total_win(), 0.0);
        assert_eq!(fs.spin_index(), 0);
    }
}
