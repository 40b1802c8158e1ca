//! Input mapping
//!
//! Devices only need to produce an `Intent`; the game decides what each
//! intent means in the current phase.

use crate::game::{Game, GamePhase};
use crate::persistence::KeyValueStore;
use crate::sim::Direction;

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    /// Space: pause/resume while playing, start otherwise
    Action,
}

impl Intent {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Intent> {
        let intent = match code {
            "ArrowUp" | "KeyW" => Intent::Steer(Direction::Up),
            "ArrowDown" | "KeyS" => Intent::Steer(Direction::Down),
            "ArrowLeft" | "KeyA" => Intent::Steer(Direction::Left),
            "ArrowRight" | "KeyD" => Intent::Steer(Direction::Right),
            "Space" => Intent::Action,
            _ => return None,
        };
        Some(intent)
    }

    /// Apply to a game. Returns true if anything changed.
    pub fn apply<S: KeyValueStore>(self, game: &mut Game<S>) -> bool {
        match self {
            Intent::Steer(dir) => game.request_direction(dir),
            Intent::Action => match game.phase() {
                GamePhase::Playing | GamePhase::Paused => game.toggle_pause(),
                GamePhase::Menu | GamePhase::GameOver => game.start(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::tuning::Tuning;

    #[test]
    fn test_key_codes() {
        assert_eq!(
            Intent::from_key_code("ArrowUp"),
            Some(Intent::Steer(Direction::Up))
        );
        assert_eq!(
            Intent::from_key_code("KeyA"),
            Some(Intent::Steer(Direction::Left))
        );
        assert_eq!(Intent::from_key_code("Space"), Some(Intent::Action));
        assert_eq!(Intent::from_key_code("Enter"), None);
    }

    #[test]
    fn test_action_walks_the_lifecycle() {
        let mut game = Game::new(Tuning::default(), MemoryStore::new(), 9);
        assert!(Intent::Action.apply(&mut game));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(Intent::Action.apply(&mut game));
        assert_eq!(game.phase(), GamePhase::Paused);
        assert!(!Intent::Steer(Direction::Up).apply(&mut game));
        assert!(Intent::Action.apply(&mut game));
        assert!(Intent::Steer(Direction::Up).apply(&mut game));
        assert!(!Intent::Steer(Direction::Down).apply(&mut game));
    }
}
