//! Game lifecycle
//!
//! Wraps the simulation in the menu / playing / paused / game-over state
//! machine and decides which operations each phase allows. The tick driver
//! (timer, animation frame, test loop) lives outside and simply calls
//! `advance` while the game is playing.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::settings::{Character, Settings, Speed};
use crate::sim::{Direction, GameSession, Snapshot, TickResult, advance};
use crate::tuning::Tuning;

/// Coarse lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; a backdrop session is shown but never ticks
    Menu,
    /// Active gameplay
    Playing,
    /// Session frozen, waiting to resume
    Paused,
    /// Run ended
    GameOver,
}

/// A game: current phase, the live session and everything persisted
pub struct Game<S: KeyValueStore> {
    phase: GamePhase,
    session: GameSession,
    tuning: Tuning,
    settings: Settings,
    high_score: HighScore,
    /// True if the last finished run set a new high score
    new_record: bool,
    store: S,
    /// Source of per-session seeds
    seeds: Pcg32,
}

impl<S: KeyValueStore> Game<S> {
    /// Create a game at the menu, loading preferences and high score
    pub fn new(tuning: Tuning, store: S, seed: u64) -> Self {
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);
        let mut seeds = Pcg32::seed_from_u64(seed);
        let session = GameSession::new(tuning.clone(), settings.speed.get(), seeds.random());
        Self {
            phase: GamePhase::Menu,
            session,
            tuning,
            settings,
            high_score,
            new_record: false,
            store,
            seeds,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Mutable session access for scripted setups
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.session)
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Interval the driver should tick at for the current speed
    pub fn tick_interval_ms(&self) -> u32 {
        self.settings.speed.tick_interval_ms()
    }

    /// Begin a new run from the menu or after a game over
    pub fn start(&mut self) -> bool {
        let seed = self.seeds.random();
        self.start_with_seed(seed)
    }

    /// Begin a new run with a known session seed
    pub fn start_with_seed(&mut self, seed: u64) -> bool {
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver => {}
            GamePhase::Playing | GamePhase::Paused => return false,
        }
        self.session = GameSession::new(self.tuning.clone(), self.settings.speed.get(), seed);
        // The cat sets off to the right straight away
        self.session.steer(Direction::Right);
        self.new_record = false;
        self.phase = GamePhase::Playing;
        log::info!(
            "Game started (seed {seed}, speed {}, cat {})",
            self.settings.speed.get(),
            self.settings.character.as_str()
        );
        true
    }

    /// Playing <-> Paused; ignored in other phases
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::Menu | GamePhase::GameOver => return false,
        };
        log::info!("{:?}", self.phase);
        true
    }

    /// Steer the cat; only honoured while playing
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.phase == GamePhase::Playing && self.session.steer(direction)
    }

    /// Run one tick. Returns `None` unless the game is playing.
    pub fn advance(&mut self) -> Option<TickResult> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let result = advance(&mut self.session);
        if result.terminal {
            self.finish();
        }
        Some(result)
    }

    fn finish(&mut self) {
        self.phase = GamePhase::GameOver;
        let score = self.session.score;
        self.new_record = self.high_score.submit(&mut self.store, score);
        log::info!(
            "Game over: score {score}, best {}{}",
            self.high_score.best(),
            if self.new_record { " (new record)" } else { "" }
        );
    }

    /// Leave the game-over screen for the menu
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        let seed = self.seeds.random();
        self.session = GameSession::new(self.tuning.clone(), self.settings.speed.get(), seed);
        self.phase = GamePhase::Menu;
        true
    }

    /// Change speed; the driver must re-read `tick_interval_ms` afterwards
    pub fn set_speed(&mut self, speed: Speed) {
        self.settings.speed = speed;
        self.session.speed = speed.get();
        self.settings.save(&mut self.store);
    }

    pub fn set_character(&mut self, character: Character) {
        self.settings.character = character;
        self.settings.save(&mut self.store);
    }
}
