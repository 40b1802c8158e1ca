//! Cat & Birds entry point
//!
//! The web build is driven from JavaScript through `cat_birds::web`. Natively
//! this runs a headless demo game with the autopilot at the wheel.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "cat-birds")]
#[command(about = "Play a headless Cat & Birds game with the autopilot")]
struct Args {
    /// Game seed; the same seed replays the same game
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Speed 1-10; defaults to the stored preference
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    speed: Option<u8>,

    /// JSON file overriding the default board and rules
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,

    /// Stop after this many ticks even if the cat is still alive
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u32,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use cat_birds::persistence::MemoryStore;
    use cat_birds::sim::{EndReason, GameEvent, choose_direction};
    use cat_birds::{Game, GamePhase, Speed, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let tuning = match &args.tuning {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed reading tuning {}", path.display()))?;
            Tuning::from_json(&json)
                .with_context(|| format!("invalid tuning {}", path.display()))?
        }
        None => Tuning::default(),
    };

    log::info!("Cat & Birds (native demo) starting...");
    let mut game = Game::new(tuning, MemoryStore::new(), args.seed);
    if let Some(speed) = args.speed {
        game.set_speed(Speed::new(speed));
    }
    game.start();

    let (mut birds, mut tuna, mut dogs) = (0u32, 0u32, 0u32);
    let mut reason = None;
    for _ in 0..args.max_ticks {
        let dir = choose_direction(game.session());
        game.request_direction(dir);
        let Some(result) = game.advance() else {
            break;
        };
        for event in &result.events {
            match event {
                GameEvent::BirdEaten { .. } => birds += 1,
                GameEvent::TunaEaten { .. } => tuna += 1,
                GameEvent::DogSpawned { .. } => dogs += 1,
                GameEvent::Died { reason: r } => reason = Some(*r),
                GameEvent::BoardCleared => reason = Some(EndReason::BoardFull),
                _ => {}
            }
        }
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    let session = game.session();
    println!(
        "score {} after {} ticks ({} birds, {} tuna, {} dogs met), cat length {}, ended: {}",
        session.score,
        session.time_ticks,
        birds,
        tuna,
        dogs,
        session.entities.snake.len(),
        match reason {
            Some(r) => format!("{r:?}"),
            None => "still alive".to_string(),
        }
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is `web::wasm_start`
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["cat-birds"]).unwrap();
        assert_eq!(args.seed, 1);
        assert_eq!(args.speed, None);
        assert!(args.tuning.is_none());
    }

    #[test]
    fn test_flags() {
        let args =
            Args::try_parse_from(["cat-birds", "--seed", "42", "--speed", "7", "--tuning", "b.json"])
                .unwrap();
        assert_eq!(args.seed, 42);
        assert_eq!(args.speed, Some(7));
        assert_eq!(args.tuning, Some(PathBuf::from("b.json")));
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(Args::try_parse_from(["cat-birds", "--seed", "abc"]).is_err());
        assert!(Args::try_parse_from(["cat-birds", "--speed", "0"]).is_err());
        assert!(Args::try_parse_from(["cat-birds", "--speed", "11"]).is_err());
        assert!(Args::try_parse_from(["cat-birds", "abc"]).is_err());
    }
}
