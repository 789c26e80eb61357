//! Pool Sim entry point
//!
//! Natively this runs a headless computer-vs-computer game and prints the
//! final table as JSON. In the browser the simulation is driven through the
//! `web` module instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::{Parser, ValueEnum};
    use pool_sim::ai::NearestLegalStrategy;
    use pool_sim::sim::{Controller, GameEvent, GameMode, TickInput};
    use pool_sim::{PoolGame, RandomTargetStrategy, SimConfig};

    #[derive(Debug, Clone, Copy, ValueEnum)]
    enum Strategy {
        /// Random ball, random power
        Random,
        /// Closest ball the rules want hit next
        Nearest,
    }

    #[derive(Parser, Debug)]
    #[command(name = "pool-sim", about = "Headless billiards simulation")]
    struct Args {
        /// Game mode: 8ball, 9ball or snooker
        #[arg(short, long, default_value = "8ball")]
        mode: String,

        /// RNG seed
        #[arg(short, long, default_value_t = 1)]
        seed: u64,

        /// Give up after this many ticks
        #[arg(long, default_value_t = 200_000)]
        max_ticks: u64,

        /// AI used by both players
        #[arg(long, value_enum, default_value_t = Strategy::Random)]
        strategy: Strategy,

        /// JSON file overriding simulation tunables
        #[arg(short, long)]
        config: Option<PathBuf>,
    }

    fn load_config(path: Option<&PathBuf>) -> Result<SimConfig, String> {
        let Some(path) = path else {
            return Ok(SimConfig::default());
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        SimConfig::from_json(&json).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }

    fn log_event(tick: u64, event: &GameEvent) {
        match event {
            // Too chatty for info
            GameEvent::Collision { .. } | GameEvent::NoticeDismissed { .. } => {
                log::trace!("[{}] {:?}", tick, event)
            }
            _ => log::debug!("[{}] {:?}", tick, event),
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let args = Args::parse();

        let Some(mode) = GameMode::from_str(&args.mode) else {
            eprintln!("Unknown mode '{}' (expected 8ball, 9ball or snooker)", args.mode);
            return ExitCode::FAILURE;
        };
        let config = match load_config(args.config.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        };

        let game = match PoolGame::new(config, mode, [Controller::Ai; 2], args.seed) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("Invalid config: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let mut game = match args.strategy {
            Strategy::Random => game.with_strategy(Box::new(RandomTargetStrategy::default())),
            Strategy::Nearest => game.with_strategy(Box::new(NearestLegalStrategy)),
        };

        log::info!("Pool Sim (native) starting: {} seed {}", mode.as_str(), args.seed);

        let input = TickInput::default();
        for _ in 0..args.max_ticks {
            let events = game.tick(&input);
            let now = game.state().time_ticks;
            for event in &events {
                log_event(now, event);
            }
            if game.is_over() {
                break;
            }
        }

        let turn = game.turn_state();
        match turn.outcome {
            Some(outcome) => log::info!(
                "Finished after {} shots: {:?}, scores {:?}",
                turn.shots_taken,
                outcome,
                turn.scores
            ),
            None => log::warn!("No result after {} ticks", args.max_ticks),
        }

        println!("{}", game.snapshot().to_json());
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point lives in pool_sim::web, this is just to satisfy the compiler
}
