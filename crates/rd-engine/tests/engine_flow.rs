//! End-to-end spin cycle tests
//!
//! Everything runs under a virtual clock with scripted outcomes, so each
//! scenario is exact: known stops, known pays, known routing.

use std::collections::VecDeque;

use rd_engine::{
    AutoplayToggle, GameEngine, OutcomeContext, OutcomeProvider, SpinCycle, SpinStart,
};
use rd_model::{FeatureSettings, GameConfig, Payline, Paytable, ReelStrip, SpinTiming};
use rd_stage::StageEvent;

/// Stops that land FACE1 on the middle row of reels 0-2, broken by reel 3
const WIN_STOPS: [usize; 5] = [7, 7, 7, 0, 7];
/// Stops with no line win and no scatters in the window
const LOSS_STOPS: [usize; 5] = [0, 1, 0, 1, 0];
/// Stops that put a scatter in the window of reels 0-2
const SCATTER_STOPS: [usize; 5] = [3, 3, 3, 0, 0];

struct Scripted {
    queue: VecDeque<Vec<usize>>,
}

impl Scripted {
    fn new(spins: &[[usize; 5]]) -> Box<Self> {
        Box::new(Self {
            queue: spins.iter().map(|s| s.to_vec()).collect(),
        })
    }
}

impl OutcomeProvider for Scripted {
    fn decide_stops(&mut self, _ctx: &OutcomeContext<'_>) -> Vec<usize> {
        self.queue.pop_front().unwrap_or_else(|| LOSS_STOPS.to_vec())
    }
}

/// 5×3, one middle payline, 8-symbol strips. Position 4 is the scatter on
/// reels 0-2 and a dead symbol on reels 3-4, so scripted stops fully control
/// both line wins and scatter counts.
fn test_config() -> GameConfig {
    let strip =
        |x: &str| ReelStrip::from_ids(["FACE1", "CUP", "RING", "ANKH", x, "CUP", "RING", "ANKH"]);
    GameConfig {
        name: "flow-test".to_string(),
        rows: 3,
        strips: vec![
            strip("SCATTER"),
            strip("SCATTER"),
            strip("SCATTER"),
            strip("EYE"),
            strip("EYE"),
        ],
        paylines: vec![Payline::straight(0, 1, 5)],
        paytable: Paytable::new()
            .with_entry("FACE1", &[20.0, 100.0, 500.0])
            .with_entry("CUP", &[10.0, 50.0, 200.0])
            .with_entry("RING", &[8.0, 40.0, 150.0]),
        features: FeatureSettings {
            awarded_spins: 3,
            retrigger_spins: 2,
            can_retrigger: true,
            feature_multiplier: 2.0,
            autoplay_spins: 3,
            ..FeatureSettings::default()
        },
        timing: SpinTiming::normal(),
        turbo_timing: SpinTiming::turbo(),
        bet_levels: vec![0.5, 1.0, 2.0],
        default_bet_per_line: 1.0,
    }
}

fn engine_with(spins: &[[usize; 5]]) -> GameEngine {
    GameEngine::new(test_config(), 1000.0, Scripted::new(spins)).unwrap()
}

/// Tick until the cycle returns to idle, draining stages along the way.
fn run_until_idle(eng: &mut GameEngine, now: &mut f64, events: &mut Vec<StageEvent>) {
    loop {
        *now += 16.0;
        eng.tick(*now, 16.0);
        events.extend(eng.drain_stages());
        if eng.cycle() == SpinCycle::Idle && !eng.store().read(|s| s.is_spinning) {
            return;
        }
        assert!(*now < 300_000.0, "engine never settled");
    }
}

fn count(events: &[StageEvent], name: &str) -> usize {
    events.iter().filter(|e| e.type_name() == name).count()
}

#[test]
fn paid_win_credits_the_scaled_amount() {
    let mut eng = engine_with(&[WIN_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    assert_eq!(eng.spin_pressed(now), SpinStart::Started);
    events.extend(eng.drain_stages());
    run_until_idle(&mut eng, &mut now, &mut events);

    // FACE1 x3 pays 20 at bet-per-line 1.0; bet was 1.0 total
    let state = eng.store().snapshot();
    assert_eq!(state.balance, 1000.0 - 1.0 + 20.0);
    assert_eq!(state.last_total_win, 20.0);
    assert_eq!(state.winning_lines.len(), 1);
    assert_eq!(state.winning_lines[0].symbol.as_str(), "FACE1");
    assert_eq!(state.winning_lines[0].count, 3);
    assert!(!state.is_spinning);

    assert_eq!(count(&events, "WIN_PRESENT"), 1);
    assert_eq!(count(&events, "ROLLUP_END"), 1);
    assert_eq!(count(&events, "SPIN_END"), 1);
}

#[test]
fn losing_spin_presents_nothing() {
    let mut eng = engine_with(&[LOSS_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.spin_pressed(now);
    run_until_idle(&mut eng, &mut now, &mut events);

    assert_eq!(eng.store().read(|s| s.balance), 999.0);
    assert_eq!(count(&events, "WIN_PRESENT"), 0);
    assert_eq!(count(&events, "REEL_STOP"), 5);
    assert_eq!(count(&events, "SPIN_END"), 1);
}

#[test]
fn scatters_enter_run_and_exit_free_spins() {
    // Trigger spin, then one winning free spin and two losses
    let mut eng = engine_with(&[SCATTER_STOPS, WIN_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.spin_pressed(now);
    run_until_idle(&mut eng, &mut now, &mut events);

    let state = eng.store().snapshot();
    // Bet 1.0 deducted once; free spins cost nothing. FACE1 x3 pays 20,
    // doubled by the feature multiplier.
    assert_eq!(state.balance, 1000.0 - 1.0 + 40.0);
    assert_eq!(state.total_free_spins_win, 40.0);
    assert!(!state.is_in_free_spins);
    assert_eq!(state.free_spins_remaining, 0);

    assert_eq!(count(&events, "FEATURE_ENTER"), 1);
    assert_eq!(count(&events, "FEATURE_STEP"), 3);
    assert_eq!(count(&events, "FEATURE_EXIT"), 1);
    // 1 paid + 3 free
    assert_eq!(count(&events, "SPIN_START"), 4);
    assert_eq!(count(&events, "SPIN_END"), 4);
    assert_eq!(eng.stats().free_spins_played, 3);
    assert_eq!(eng.stats().feature_entries, 1);
}

#[test]
fn scatter_during_feature_retriggers() {
    // Trigger, then a scatter on the first free spin
    let mut eng = engine_with(&[SCATTER_STOPS, SCATTER_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.spin_pressed(now);
    run_until_idle(&mut eng, &mut now, &mut events);

    // 3 awarded + 2 retriggered = 5 free spins, one feature entry
    assert_eq!(count(&events, "FEATURE_ENTER"), 1);
    assert_eq!(count(&events, "FEATURE_RETRIGGER"), 1);
    assert_eq!(count(&events, "FEATURE_STEP"), 5);
    assert_eq!(count(&events, "FEATURE_EXIT"), 1);
    assert_eq!(eng.stats().free_spins_played, 5);
    assert_eq!(eng.stats().feature_retriggers, 1);
    assert!(!eng.store().read(|s| s.is_in_free_spins));
}

#[test]
fn retrigger_disabled_plays_only_awarded_spins() {
    let mut config = test_config();
    config.features.can_retrigger = false;
    let mut eng =
        GameEngine::new(config, 1000.0, Scripted::new(&[SCATTER_STOPS, SCATTER_STOPS])).unwrap();
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.spin_pressed(now);
    run_until_idle(&mut eng, &mut now, &mut events);

    assert_eq!(count(&events, "FEATURE_RETRIGGER"), 0);
    assert_eq!(count(&events, "FEATURE_STEP"), 3);
    assert_eq!(eng.stats().feature_retriggers, 0);
}

#[test]
fn autoplay_plays_exactly_the_queued_spins() {
    let mut eng = engine_with(&[LOSS_STOPS, LOSS_STOPS, LOSS_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    assert_eq!(eng.toggle_autoplay(now), AutoplayToggle::Started { spins: 3 });
    run_until_idle(&mut eng, &mut now, &mut events);

    assert_eq!(eng.spin_count(), 3);
    assert_eq!(eng.store().read(|s| s.balance), 997.0);
    assert_eq!(count(&events, "AUTOPLAY_START"), 1);
    assert_eq!(count(&events, "AUTOPLAY_STOP"), 1);
    assert_eq!(count(&events, "SPIN_START"), 3);
    assert_eq!(count(&events, "SPIN_END"), 3);
    assert!(!eng.store().read(|s| s.is_autoplaying));
}

#[test]
fn autoplay_pauses_for_the_feature_and_resumes() {
    // First autoplay spin triggers free spins; the remaining two play after
    let mut eng = engine_with(&[SCATTER_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.toggle_autoplay(now);
    run_until_idle(&mut eng, &mut now, &mut events);

    // 1 autoplay + 3 free + 2 autoplay
    assert_eq!(eng.spin_count(), 6);
    assert_eq!(count(&events, "FEATURE_ENTER"), 1);
    assert_eq!(count(&events, "FEATURE_EXIT"), 1);
    assert_eq!(count(&events, "AUTOPLAY_STOP"), 1);
    // Only the three autoplay spins paid
    assert_eq!(eng.stats().total_wagered, 3.0);
    assert!(!eng.store().read(|s| s.is_autoplaying));
}

#[test]
fn stop_request_during_feature_cancels_the_resume() {
    let mut eng = engine_with(&[SCATTER_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.toggle_autoplay(now);
    // Let the trigger spin land, then ask autoplay to stop mid-feature
    while !eng.store().read(|s| s.is_in_free_spins) {
        now += 16.0;
        eng.tick(now, 16.0);
        events.extend(eng.drain_stages());
        assert!(now < 60_000.0);
    }
    assert_eq!(eng.toggle_autoplay(now), AutoplayToggle::Stopping);

    run_until_idle(&mut eng, &mut now, &mut events);

    // 1 paid trigger + 3 free spins, no resume
    assert_eq!(eng.spin_count(), 4);
    assert_eq!(eng.stats().total_wagered, 1.0);
    assert!(!eng.store().read(|s| s.is_autoplaying));
    assert_eq!(count(&events, "AUTOPLAY_STOP"), 1);
}

#[test]
fn spin_press_is_locked_during_autoplay_and_features() {
    let mut eng = engine_with(&[SCATTER_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.toggle_autoplay(now);
    assert!(matches!(eng.spin_pressed(now), SpinStart::Rejected(_)));

    while !eng.store().read(|s| s.is_in_free_spins) {
        now += 16.0;
        eng.tick(now, 16.0);
        events.extend(eng.drain_stages());
        assert!(now < 60_000.0);
    }
    assert!(matches!(eng.spin_pressed(now), SpinStart::Rejected(_)));

    run_until_idle(&mut eng, &mut now, &mut events);
    assert_eq!(eng.spin_pressed(now), SpinStart::Started);
}

#[test]
fn stage_timestamps_never_go_backwards() {
    let mut eng = engine_with(&[SCATTER_STOPS, WIN_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.spin_pressed(now);
    run_until_idle(&mut eng, &mut now, &mut events);

    for pair in events.windows(2) {
        assert!(
            pair[0].timestamp_ms <= pair[1].timestamp_ms,
            "{} at {} after {} at {}",
            pair[1].type_name(),
            pair[1].timestamp_ms,
            pair[0].type_name(),
            pair[0].timestamp_ms
        );
    }
}

#[test]
fn reel_stops_cascade_in_order() {
    let mut eng = engine_with(&[LOSS_STOPS]);
    let mut now = 0.0;
    let mut events = Vec::new();

    eng.spin_pressed(now);
    run_until_idle(&mut eng, &mut now, &mut events);

    let stop_indices: Vec<u8> = events
        .iter()
        .filter_map(|e| match &e.stage {
            rd_stage::Stage::ReelStop { reel_index, .. } => Some(*reel_index),
            _ => None,
        })
        .collect();
    assert_eq!(stop_indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn turbo_session_settles_faster() {
    let mut normal = engine_with(&[LOSS_STOPS]);
    let mut turbo = engine_with(&[LOSS_STOPS]);
    turbo.toggle_turbo();

    let mut events = Vec::new();

    let mut now_normal = 0.0;
    normal.spin_pressed(now_normal);
    run_until_idle(&mut normal, &mut now_normal, &mut events);

    let mut now_turbo = 0.0;
    turbo.spin_pressed(now_turbo);
    run_until_idle(&mut turbo, &mut now_turbo, &mut events);

    assert!(now_turbo < now_normal);
}
