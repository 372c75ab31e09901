//! Headless session simulator
//!
//! Drives the engine under a virtual clock, printing the stage stream and a
//! session summary. Useful for eyeballing pacing changes and sanity-checking
//! RTP over long runs without a frontend.
//!
//! ```text
//! simulate --spins 1000 --seed 42 --turbo
//! ```

use clap::Parser;

use rd_engine::{ForcedOutcome, GameEngine, OutcomeProvider, RandomOutcome, SpinCycle, SpinStart};
use rd_model::GameConfig;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Run a headless slot session")]
struct Args {
    /// Number of spins to play
    #[arg(long, default_value_t = 100)]
    spins: u64,

    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Use turbo timing
    #[arg(long)]
    turbo: bool,

    /// Drive the session through autoplay instead of spin presses
    #[arg(long)]
    autoplay: bool,

    /// Starting balance
    #[arg(long, default_value_t = 10_000.0)]
    balance: f64,

    /// Force this symbol into the window every spin (e.g. SCATTER)
    #[arg(long)]
    force_symbol: Option<String>,

    /// How many reels the forced symbol lands on
    #[arg(long, default_value_t = 3)]
    force_count: usize,

    /// Print every stage event
    #[arg(long)]
    verbose: bool,
}

const TICK_MS: f64 = 16.0;

fn main() {
    env_logger::init();
    let args = Args::parse();

    let outcome: Box<dyn OutcomeProvider> = match (&args.force_symbol, args.seed) {
        (Some(symbol), Some(seed)) => Box::new(ForcedOutcome::seeded(
            symbol.as_str(),
            args.force_count,
            None,
            seed,
        )),
        (Some(symbol), None) => {
            Box::new(ForcedOutcome::scatter_trigger(symbol.as_str(), args.force_count))
        }
        (None, Some(seed)) => Box::new(RandomOutcome::seeded(seed)),
        (None, None) => Box::new(RandomOutcome::new()),
    };
    let mut engine = GameEngine::new(GameConfig::standard_5x3(), args.balance, outcome)
        .unwrap_or_else(|err| {
            eprintln!("invalid config: {err}");
            std::process::exit(1);
        });

    if args.turbo {
        engine.toggle_turbo();
    }

    let mut now = 0.0;
    while engine.spin_count() < args.spins {
        if engine.cycle() == SpinCycle::Idle && !engine.store().read(|s| s.is_spinning) {
            let started = if args.autoplay {
                !matches!(
                    engine.toggle_autoplay(now),
                    rd_engine::AutoplayToggle::Unavailable
                )
            } else {
                engine.spin_pressed(now) == SpinStart::Started
            };
            if !started {
                log::warn!("cannot start another spin, ending session early");
                break;
            }
        }

        now += TICK_MS;
        engine.tick(now, TICK_MS);

        for event in engine.drain_stages() {
            if args.verbose {
                println!("{:>10.0}ms  {}", event.timestamp_ms, event.type_name());
            }
        }

        if now > args.spins as f64 * 600_000.0 {
            log::error!("session wedged at {now:.0}ms, aborting");
            break;
        }
    }

    let state = engine.store().snapshot();
    println!("\n── session ──────────────────────────");
    println!("{}", engine.stats());
    println!("balance:      {:.2}", state.balance);
    println!("virtual time: {:.1}s", now / 1000.0);
}
