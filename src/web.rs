//! Browser bindings
//!
//! The page owns the canvas, the overlays and `requestAnimationFrame`; it
//! forwards key presses and frame timestamps here and draws whatever
//! `snapshot_json` returns.

use wasm_bindgen::prelude::*;

use crate::game::{Game, GamePhase};
use crate::persistence::LocalStorage;
use crate::platform::{Intent, TickDriver};
use crate::settings::{Character, EATING_BODY, EATING_EARS, Speed};
use crate::sim::{GameEvent, choose_direction};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Cat & Birds starting...");
}

fn entropy_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (now << 20) ^ noise
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorage>,
    driver: TickDriver,
    /// Demo mode: the autopilot steers
    idle: bool,
    /// Frames left on the eating flash
    eating_frames: u32,
    last_events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame::wrap(Game::new(Tuning::default(), LocalStorage, entropy_seed()))
    }

    /// Game on a custom board from JSON; `undefined` if the JSON is rejected
    pub fn with_tuning(json: &str) -> Option<WebGame> {
        match Tuning::from_json(json) {
            Ok(tuning) => Some(WebGame::wrap(Game::new(tuning, LocalStorage, entropy_seed()))),
            Err(e) => {
                log::warn!("Rejected tuning: {e}");
                None
            }
        }
    }

    /// Forward a `KeyboardEvent.code`; true if the page should
    /// `preventDefault`
    pub fn key_down(&mut self, code: &str) -> bool {
        match Intent::from_key_code(code) {
            Some(intent) => {
                let was_playing = self.game.phase() == GamePhase::Playing;
                if intent.apply(&mut self.game) && !was_playing {
                    self.driver.reset();
                }
                true
            }
            None => false,
        }
    }

    /// Touch buttons and swipes arrive as "up" / "down" / "left" / "right"
    pub fn steer(&mut self, dir: &str) -> bool {
        use crate::sim::Direction;
        let dir = match dir {
            "up" => Direction::Up,
            "down" => Direction::Down,
            "left" => Direction::Left,
            "right" => Direction::Right,
            _ => return false,
        };
        self.game.request_direction(dir)
    }

    pub fn start(&mut self) -> bool {
        self.driver.reset();
        self.game.start()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.driver.reset();
        self.game.toggle_pause()
    }

    pub fn return_to_menu(&mut self) -> bool {
        self.game.return_to_menu()
    }

    pub fn set_idle(&mut self, idle: bool) {
        self.idle = idle;
        log::info!("Idle mode: {idle}");
    }

    pub fn set_speed(&mut self, speed: u8) {
        self.game.set_speed(Speed::new(speed));
        self.driver.set_interval(self.game.tick_interval_ms());
    }

    pub fn set_character(&mut self, key: &str) -> bool {
        match Character::from_key(key) {
            Some(c) => {
                self.game.set_character(c);
                true
            }
            None => false,
        }
    }

    /// Animation frame callback; returns true if the board changed
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.eating_frames = self.eating_frames.saturating_sub(1);
        if self.game.phase() != GamePhase::Playing {
            self.driver.reset();
            return false;
        }

        let due = self.driver.frame(now_ms);
        self.last_events.clear();
        for _ in 0..due {
            if self.idle {
                let dir = choose_direction(self.game.session());
                self.game.request_direction(dir);
            }
            let Some(result) = self.game.advance() else {
                break;
            };
            if result
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::BirdEaten { .. } | GameEvent::TunaEaten { .. }))
            {
                self.eating_frames = 10;
            }
            self.last_events.extend(result.events);
            if result.terminal {
                break;
            }
        }
        due > 0
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.game.phase())
    }

    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.game.high_score() as f64
    }

    pub fn is_new_record(&self) -> bool {
        self.game.is_new_record()
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.game.tick_interval_ms()
    }

    pub fn grid_width(&self) -> i32 {
        self.game.session().grid.width
    }

    pub fn grid_height(&self) -> i32 {
        self.game.session().grid.height
    }

    pub fn is_eating(&self) -> bool {
        self.eating_frames > 0
    }

    /// Board state as JSON for the renderer
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    /// Events from the last frame as JSON (for sounds and effects)
    pub fn events_json(&self) -> String {
        serde_json::to_string(&self.last_events).unwrap_or_default()
    }

    /// Palette of the selected cat, honouring the eating flash
    pub fn cat_palette_json(&self) -> String {
        let style = self.game.settings().character.style();
        let (body, ears) = if self.is_eating() {
            (EATING_BODY, EATING_EARS)
        } else {
            (style.body, style.ears)
        };
        serde_json::json!({
            "name": style.name,
            "personality": style.personality,
            "body": body,
            "ears": ears,
            "nose": style.nose,
            "feature": format!("{:?}", style.feature),
        })
        .to_string()
    }
}

impl WebGame {
    fn wrap(game: Game<LocalStorage>) -> WebGame {
        let driver = TickDriver::new(game.tick_interval_ms());
        WebGame {
            game,
            driver,
            idle: false,
            eating_frames: 0,
            last_events: Vec::new(),
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
