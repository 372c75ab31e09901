//! Spin cycle orchestration
//!
//! [`GameEngine`] ties the pieces together: intents come in, the reel set
//! advances under the host clock, stops and settles are scheduled through the
//! timer queue, wins are evaluated on the settled grid, and the routing step
//! decides whether the next spin belongs to free spins, autoplay, or nobody.
//!
//! Presentation is communicated outward as a stream of [`StageEvent`]s that
//! the host drains each frame; the engine itself renders nothing.

use rd_model::{evaluate_win, GameConfig, ConfigError, SpinTiming, WinResult};
use rd_stage::{Stage, StageEvent, WinLineInfo};

use crate::autoplay::AutoplayController;
use crate::free_spins::FreeSpinsController;
use crate::outcome::{OutcomeContext, OutcomeProvider};
use crate::reel::ReelState;
use crate::reels::ReelManager;
use crate::sched::{Scheduler, TimerTask};
use crate::spin::{AutoplayToggle, BetChange, SpinCycle, SpinKind, SpinRejection, SpinStart};
use crate::state::{GameState, StateUpdate, Store};
use crate::stats::SessionStats;

pub struct GameEngine {
    config: GameConfig,
    store: Store,
    reels: ReelManager,
    sched: Scheduler,
    cycle: SpinCycle,
    free_spins: FreeSpinsController,
    autoplay: AutoplayController,
    outcome: Box<dyn OutcomeProvider>,
    stages: Vec<StageEvent>,
    stats: SessionStats,
    /// Timing locked in at spin start; a turbo toggle mid-spin only affects
    /// the next spin.
    active_timing: SpinTiming,
    current_kind: SpinKind,
    /// What kind of spin a pending `StartNextSpin` timer should begin
    pending_kind: Option<SpinKind>,
    reel_stop_emitted: Vec<bool>,
    spin_count: u64,
}

impl GameEngine {
    pub fn new(
        config: GameConfig,
        initial_balance: f64,
        outcome: Box<dyn OutcomeProvider>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let reels = ReelManager::from_config(&config);
        let free_spins = FreeSpinsController::new(&config.features);
        let store = Store::new(GameState {
            balance: initial_balance,
            bet_per_line: config.default_bet_per_line,
            total_bet: config.total_bet(config.default_bet_per_line),
            ..GameState::default()
        });
        let reel_count = config.reel_count();
        let active_timing = config.timing;
        Ok(Self {
            config,
            store,
            reels,
            sched: Scheduler::new(),
            cycle: SpinCycle::Idle,
            free_spins,
            autoplay: AutoplayController::new(),
            outcome,
            stages: Vec::new(),
            stats: SessionStats::new(),
            active_timing,
            current_kind: SpinKind::Paid,
            pending_kind: None,
            reel_stop_emitted: vec![false; reel_count],
            spin_count: 0,
        })
    }

    // ── accessors ──────────────────────────────────────────────────────

    pub fn cycle(&self) -> SpinCycle {
        self.cycle
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn reels(&self) -> &ReelManager {
        &self.reels
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn spin_count(&self) -> u64 {
        self.spin_count
    }

    /// Pull the presentation events produced since the last drain
    pub fn drain_stages(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.stages)
    }

    fn emit(&mut self, stage: Stage, now_ms: f64) {
        log::debug!("stage {} at {now_ms:.0}ms", stage.type_name());
        self.stages.push(StageEvent::new(stage, now_ms));
    }

    // ── clock ──────────────────────────────────────────────────────────

    /// Advance the engine. `now_ms` is the host clock after `delta_ms`
    /// elapsed. Call every frame; a large delta is fine, the reels and
    /// timers catch up deterministically.
    pub fn tick(&mut self, now_ms: f64, delta_ms: f64) {
        if self.cycle == SpinCycle::Spinning {
            let any_moving = self.reels.update_all(delta_ms, now_ms, &self.active_timing);

            for i in 0..self.reels.reel_count() {
                if !self.reel_stop_emitted[i]
                    && self.reels.reel(i).state() == ReelState::Stopped
                {
                    self.reel_stop_emitted[i] = true;
                    let symbols = self.reels.visible_column(i).unwrap_or_default();
                    self.emit(
                        Stage::ReelStop {
                            reel_index: i as u8,
                            symbols,
                        },
                        now_ms,
                    );
                }
            }

            if !any_moving {
                self.cycle = SpinCycle::Settling;
                self.sched.schedule(
                    now_ms + self.active_timing.settle_buffer_ms,
                    TimerTask::Settle,
                );
            }
        }

        for task in self.sched.pop_due(now_ms) {
            match task {
                TimerTask::Settle => self.resolve(now_ms),
                TimerTask::StartNextSpin => {
                    if let Some(kind) = self.pending_kind.take() {
                        self.begin_spin(now_ms, kind);
                    }
                }
                TimerTask::FeatureEnterDone => self.begin_spin(now_ms, SpinKind::Free),
                TimerTask::FeatureExitDone => self.after_feature_exit(now_ms),
            }
        }
    }

    // ── intents ────────────────────────────────────────────────────────

    /// Player pressed the spin button.
    pub fn spin_pressed(&mut self, now_ms: f64) -> SpinStart {
        if self.free_spins.is_active() || self.autoplay.is_active() {
            return SpinStart::Rejected(SpinRejection::ControlsLocked);
        }
        match self.cycle {
            SpinCycle::Idle => {}
            SpinCycle::Spinning => {
                return SpinStart::Rejected(SpinRejection::AlreadySpinning);
            }
            _ => return SpinStart::Rejected(SpinRejection::Transitioning),
        }
        let (balance, total_bet) = self.store.read(|s| (s.balance, s.total_bet));
        if balance < total_bet {
            return SpinStart::Rejected(SpinRejection::InsufficientBalance);
        }
        self.begin_spin(now_ms, SpinKind::Paid);
        SpinStart::Started
    }

    /// Step to the next bet level
    pub fn bet_increase(&mut self) -> BetChange {
        self.change_bet(1)
    }

    /// Step to the previous bet level
    pub fn bet_decrease(&mut self) -> BetChange {
        self.change_bet(-1)
    }

    fn change_bet(&mut self, direction: i32) -> BetChange {
        if self.cycle != SpinCycle::Idle
            || self.autoplay.is_active()
            || self.free_spins.is_active()
        {
            return BetChange::Locked;
        }
        let current = self.store.read(|s| s.bet_per_line);
        let levels = &self.config.bet_levels;
        let index = levels
            .iter()
            .position(|&b| b == current)
            .unwrap_or(0) as i32;
        let next = (index + direction).clamp(0, levels.len() as i32 - 1) as usize;
        let bet = levels[next];
        if bet == current {
            return BetChange::Clamped { bet_per_line: bet };
        }
        self.store.apply(StateUpdate {
            bet_per_line: Some(bet),
            total_bet: Some(self.config.total_bet(bet)),
            ..StateUpdate::default()
        });
        BetChange::Applied { bet_per_line: bet }
    }

    /// Flip turbo mode. Takes effect from the next spin; the spin in flight
    /// keeps the timing it started with.
    pub fn toggle_turbo(&mut self) -> bool {
        let turbo = !self.store.read(|s| s.is_turbo_mode);
        self.store.apply(StateUpdate {
            is_turbo_mode: Some(turbo),
            ..StateUpdate::default()
        });
        turbo
    }

    /// Start an autoplay session, or request a running one to stop.
    pub fn toggle_autoplay(&mut self, now_ms: f64) -> AutoplayToggle {
        if self.autoplay.is_active() {
            self.autoplay.request_stop();
            return AutoplayToggle::Stopping;
        }
        if self.cycle != SpinCycle::Idle || self.free_spins.is_active() {
            return AutoplayToggle::Unavailable;
        }
        let (balance, total_bet) = self.store.read(|s| (s.balance, s.total_bet));
        if balance < total_bet {
            return AutoplayToggle::Unavailable;
        }
        let spins = self.config.features.autoplay_spins;
        self.autoplay.start(spins);
        self.store.apply(StateUpdate {
            is_autoplaying: Some(true),
            autoplay_spins_remaining: Some(spins),
            ..StateUpdate::default()
        });
        self.emit(Stage::AutoplayStart { spins }, now_ms);
        self.begin_spin(now_ms, SpinKind::Autoplay);
        AutoplayToggle::Started { spins }
    }

    // ── spin cycle ─────────────────────────────────────────────────────

    fn begin_spin(&mut self, now_ms: f64, kind: SpinKind) {
        debug_assert!(
            matches!(self.cycle, SpinCycle::Idle | SpinCycle::RoutingNext),
            "spin started from {:?}",
            self.cycle
        );
        let state = self.store.snapshot();
        self.active_timing = if state.is_turbo_mode {
            self.config.turbo_timing
        } else {
            self.config.timing
        };

        let mut update = StateUpdate {
            is_spinning: Some(true),
            last_total_win: Some(0.0),
            winning_lines: Some(Vec::new()),
            ..StateUpdate::default()
        };
        if kind.is_paid() {
            update.balance = Some(state.balance - state.total_bet);
        }
        match kind {
            SpinKind::Free => {
                let spin_index = self.free_spins.begin_spin();
                update.free_spins_remaining = Some(self.free_spins.spins_remaining());
                self.emit(
                    Stage::FeatureStep {
                        spin_index,
                        spins_remaining: self.free_spins.spins_remaining(),
                        feature_total: self.free_spins.total_win(),
                    },
                    now_ms,
                );
            }
            SpinKind::Autoplay => {
                self.autoplay.begin_spin();
                update.autoplay_spins_remaining = Some(self.autoplay.spins_remaining());
            }
            SpinKind::Paid => {}
        }
        self.store.apply(update);

        let stops = self.outcome.decide_stops(&OutcomeContext {
            strips: self.reels.strips(),
            rows: self.config.rows,
        });
        log::debug!("spin {} ({kind:?}) stops {stops:?}", self.spin_count + 1);
        let timing = self.active_timing;
        self.reels.start_spin(&stops, now_ms, &timing);
        self.reel_stop_emitted.fill(false);
        self.spin_count += 1;
        self.current_kind = kind;
        self.cycle = SpinCycle::Spinning;

        self.emit(Stage::SpinStart, now_ms);
        for i in 0..self.reels.reel_count() {
            self.emit(Stage::ReelSpinning { reel_index: i as u8 }, now_ms);
        }
    }

    /// Settle fired: derive the grid, evaluate, present, and route.
    fn resolve(&mut self, now_ms: f64) {
        self.cycle = SpinCycle::Resolving;
        let grid = match self.reels.grid() {
            Ok(grid) => grid,
            Err(err) => {
                // Should be impossible once Settle has fired; recover to
                // idle instead of evaluating a torn window.
                log::error!("grid unavailable at resolve: {err}");
                self.cycle = SpinCycle::Idle;
                self.store.apply(StateUpdate {
                    is_spinning: Some(false),
                    ..StateUpdate::default()
                });
                return;
            }
        };
        self.emit(Stage::EvaluateWins, now_ms);

        let state = self.store.snapshot();
        let mut result = evaluate_win(
            &grid,
            &self.config.paylines,
            &self.config.paytable,
            &self.config.features.scatter,
            state.bet_per_line,
        );

        let multiplier = self.free_spins.multiplier();
        if multiplier != 1.0 {
            for win in &mut result.line_wins {
                win.win_amount *= multiplier;
            }
            result.total_win *= multiplier;
        }

        let bet = if self.current_kind.is_paid() {
            state.total_bet
        } else {
            0.0
        };
        let free = self.current_kind == SpinKind::Free;
        self.stats.record_spin(bet, result.total_win, free);
        if free {
            self.free_spins.record_win(result.total_win);
        }

        self.cycle = SpinCycle::Presenting;
        if result.is_win() {
            self.present_win(&result, state.total_bet, now_ms);
        }

        let mut update = StateUpdate {
            balance: Some(state.balance + result.total_win),
            last_total_win: Some(result.total_win),
            winning_lines: Some(result.line_wins.clone()),
            ..StateUpdate::default()
        };
        if free {
            update.total_free_spins_win = Some(self.free_spins.total_win());
        }
        self.store.apply(update);

        self.route_next(now_ms, &result);
    }

    fn present_win(&mut self, result: &WinResult, total_bet: f64, now_ms: f64) {
        self.emit(
            Stage::WinPresent {
                win_amount: result.total_win,
                bet_amount: total_bet,
                line_count: result.line_wins.len() as u8,
            },
            now_ms,
        );
        for win in &result.line_wins {
            self.emit(
                Stage::WinLineShow {
                    line: WinLineInfo {
                        line_index: win.line_index,
                        symbol: win.symbol.to_string(),
                        count: win.count,
                        line_amount: win.win_amount,
                        positions: win.positions.clone(),
                    },
                },
                now_ms,
            );
        }
        self.emit(
            Stage::RollupStart {
                target_amount: result.total_win,
            },
            now_ms,
        );
        self.emit(
            Stage::RollupEnd {
                final_amount: result.total_win,
            },
            now_ms,
        );
    }

    /// Decide what the resolved spin leads into: feature entry, retrigger,
    /// the next free or autoplay spin, or back to idle.
    fn route_next(&mut self, now_ms: f64, result: &WinResult) {
        self.cycle = SpinCycle::RoutingNext;
        let min_scatters = self.config.features.min_scatter_count;

        if result.qualifies_for_feature(min_scatters) {
            if self.free_spins.is_active() {
                if let Some(extra) = self.free_spins.retrigger() {
                    self.stats.record_retrigger();
                    self.store.apply(StateUpdate {
                        free_spins_remaining: Some(self.free_spins.spins_remaining()),
                        ..StateUpdate::default()
                    });
                    self.emit(
                        Stage::FeatureRetrigger {
                            extra_spins: extra,
                            spins_remaining: self.free_spins.spins_remaining(),
                        },
                        now_ms,
                    );
                }
            } else {
                self.enter_feature(now_ms);
                return;
            }
        }

        if self.free_spins.is_active() {
            if self.free_spins.is_complete() {
                self.exit_feature(now_ms);
            } else {
                self.pending_kind = Some(SpinKind::Free);
                self.sched.schedule(
                    now_ms + self.active_timing.inter_spin_delay_ms,
                    TimerTask::StartNextSpin,
                );
                self.emit(Stage::SpinEnd, now_ms);
            }
            return;
        }

        if self.autoplay.is_active() {
            let (balance, total_bet) = self.store.read(|s| (s.balance, s.total_bet));
            if self.autoplay.should_continue(balance, total_bet) {
                self.pending_kind = Some(SpinKind::Autoplay);
                self.sched.schedule(
                    now_ms + self.active_timing.inter_spin_delay_ms,
                    TimerTask::StartNextSpin,
                );
                self.emit(Stage::SpinEnd, now_ms);
                return;
            }
            self.stop_autoplay(now_ms);
        }

        self.emit(Stage::SpinEnd, now_ms);
        self.go_idle();
    }

    fn enter_feature(&mut self, now_ms: f64) {
        self.autoplay.pause_for_feature();
        let awarded = self.free_spins.enter();
        self.stats.record_feature_entry();
        self.store.apply(StateUpdate {
            is_in_free_spins: Some(true),
            free_spins_remaining: Some(awarded),
            total_free_spins_win: Some(0.0),
            ..StateUpdate::default()
        });
        self.emit(
            Stage::FeatureEnter {
                awarded_spins: awarded,
                multiplier: self.config.features.feature_multiplier,
            },
            now_ms,
        );
        self.sched.schedule(
            now_ms + self.active_timing.feature_enter_ms,
            TimerTask::FeatureEnterDone,
        );
        self.emit(Stage::SpinEnd, now_ms);
    }

    fn exit_feature(&mut self, now_ms: f64) {
        let total = self.free_spins.exit();
        self.store.apply(StateUpdate {
            is_in_free_spins: Some(false),
            free_spins_remaining: Some(0),
            total_free_spins_win: Some(total),
            ..StateUpdate::default()
        });
        self.emit(Stage::FeatureExit { total_win: total }, now_ms);
        self.sched.schedule(
            now_ms + self.active_timing.feature_exit_ms,
            TimerTask::FeatureExitDone,
        );
        self.emit(Stage::SpinEnd, now_ms);
    }

    /// Feature exit transition finished: resume autoplay or go idle.
    fn after_feature_exit(&mut self, now_ms: f64) {
        let was_paused = self.autoplay.is_paused();
        let unplayed = self.autoplay.spins_remaining();
        if was_paused && self.autoplay.resume_after_feature() {
            let (balance, total_bet) = self.store.read(|s| (s.balance, s.total_bet));
            if self.autoplay.should_continue(balance, total_bet) {
                self.begin_spin(now_ms, SpinKind::Autoplay);
                return;
            }
            self.stop_autoplay(now_ms);
        } else if was_paused {
            // session ended during the feature (stop request or exhausted)
            self.store.apply(StateUpdate {
                is_autoplaying: Some(false),
                autoplay_spins_remaining: Some(0),
                ..StateUpdate::default()
            });
            self.emit(
                Stage::AutoplayStop {
                    spins_remaining: unplayed,
                },
                now_ms,
            );
        }
        self.go_idle();
    }

    fn stop_autoplay(&mut self, now_ms: f64) {
        let remaining = self.autoplay.stop();
        self.store.apply(StateUpdate {
            is_autoplaying: Some(false),
            autoplay_spins_remaining: Some(0),
            ..StateUpdate::default()
        });
        self.emit(
            Stage::AutoplayStop {
                spins_remaining: remaining,
            },
            now_ms,
        );
    }

    /// Return control to the player. The spin's `SpinEnd` has already been
    /// emitted by whichever routing path led here.
    fn go_idle(&mut self) {
        self.cycle = SpinCycle::Idle;
        self.store.apply(StateUpdate {
            is_spinning: Some(false),
            ..StateUpdate::default()
        });
    }
}
