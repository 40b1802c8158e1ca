//! Game settings and preferences
//!
//! Persisted separately from the high score, one scalar per key.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use crate::persistence::{KeyValueStore, keys, load_parsed};
use crate::tick_interval_ms;

/// Speed slider value, always within 1..=10
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Speed(u8);

impl Speed {
    /// Clamp any value into the slider range
    pub fn new(value: u8) -> Self {
        Self(value.clamp(MIN_SPEED, MAX_SPEED))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn tick_interval_ms(self) -> u32 {
        tick_interval_ms(self.0)
    }

    /// Menu preset bucket for this speed
    pub fn label(self) -> &'static str {
        match self.0 {
            0..=3 => "Chill",
            4..=6 => "Normal",
            _ => "Fast",
        }
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(DEFAULT_SPEED)
    }
}

/// Special drawing touch for a cat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFeature {
    Plain,
    TabbyStripes,
    Crown,
    GlowingEyes,
    FluffyCheeks,
}

/// Cosmetic description of a playable cat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatStyle {
    pub name: &'static str,
    pub personality: &'static str,
    /// Body gradient: primary, secondary, tertiary
    pub body: [&'static str; 3],
    pub ears: &'static str,
    pub nose: &'static str,
    pub feature: CatFeature,
}

/// Palette used by every cat mid-bite
pub const EATING_BODY: [&str; 3] = ["#ff3d6f", "#d4336f", "#b8246f"];
pub const EATING_EARS: &str = "#ffaa00";

/// Playable cats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Character {
    #[default]
    Blue,
    Orange,
    Pink,
    Black,
    White,
}

impl Character {
    pub const ALL: [Character; 5] = [
        Character::Blue,
        Character::Orange,
        Character::Pink,
        Character::Black,
        Character::White,
    ];

    /// Storage key value
    pub fn as_str(&self) -> &'static str {
        match self {
            Character::Blue => "blue",
            Character::Orange => "orange",
            Character::Pink => "pink",
            Character::Black => "black",
            Character::White => "white",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn style(&self) -> CatStyle {
        match self {
            Character::Blue => CatStyle {
                name: "Floopy",
                personality: "Playful & Energetic",
                body: ["#00d4ff", "#0099cc", "#006699"],
                ears: "#ff6b9d",
                nose: "#ff6b9d",
                feature: CatFeature::Plain,
            },
            Character::Orange => CatStyle {
                name: "Mochi",
                personality: "Clever & Cunning",
                body: ["#ff8c42", "#e6673d", "#cc4125"],
                ears: "#ff6b42",
                nose: "#ff4500",
                feature: CatFeature::TabbyStripes,
            },
            Character::Pink => CatStyle {
                name: "Pink",
                personality: "Special Cat",
                body: ["#ff69b4", "#e64aa3", "#cc2b92"],
                ears: "#ff1493",
                nose: "#ff1493",
                feature: CatFeature::Crown,
            },
            Character::Black => CatStyle {
                name: "Black",
                personality: "Special Cat",
                body: ["#4a4a4a", "#333333", "#1a1a1a"],
                ears: "#666666",
                nose: "#ff69b4",
                feature: CatFeature::GlowingEyes,
            },
            Character::White => CatStyle {
                name: "White",
                personality: "Special Cat",
                body: ["#ffffff", "#f0f0f0", "#d0d0d0"],
                ears: "#ffb6c1",
                nose: "#ff69b4",
                feature: CatFeature::FluffyCheeks,
            },
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub speed: Speed,
    pub character: Character,
}

impl Settings {
    /// Load preferences, falling back to defaults for anything missing
    pub fn load(store: &impl KeyValueStore) -> Self {
        let speed = load_parsed::<u8>(store, keys::SPEED)
            .map(Speed::new)
            .unwrap_or_default();
        let character = match store.get(keys::CHARACTER) {
            Ok(Some(raw)) => Character::from_key(&raw).unwrap_or_else(|| {
                log::warn!("Unknown cat {raw:?}, using default");
                Character::default()
            }),
            Ok(None) => Character::default(),
            Err(e) => {
                log::warn!("Could not read cat selection: {e}");
                Character::default()
            }
        };
        log::info!("Loaded settings: speed {}, cat {}", speed.get(), character.as_str());
        Self { speed, character }
    }

    /// Save preferences; failures only cost persistence
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let result = store
            .set(keys::SPEED, &self.speed.get().to_string())
            .and_then(|()| store.set(keys::CHARACTER, self.character.as_str()));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::persistence::tests::BrokenStore;

    #[test]
    fn test_speed_clamps() {
        assert_eq!(Speed::new(0).get(), 1);
        assert_eq!(Speed::new(11).get(), 10);
        assert_eq!(Speed::default().get(), 5);
        assert_eq!(Speed::new(10).tick_interval_ms(), 50);
        assert_eq!(Speed::new(2).label(), "Chill");
        assert_eq!(Speed::new(5).label(), "Normal");
        assert_eq!(Speed::new(8).label(), "Fast");
    }

    #[test]
    fn test_character_keys() {
        for c in Character::ALL {
            assert_eq!(Character::from_key(c.as_str()), Some(c));
        }
        assert_eq!(Character::from_key("Orange"), Some(Character::Orange));
        assert_eq!(Character::from_key("tiger"), None);
        assert_eq!(Character::Blue.style().name, "Floopy");
        assert_eq!(Character::Orange.style().name, "Mochi");
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            speed: Speed::new(8),
            character: Character::Orange,
        };
        settings.save(&mut store);
        assert_eq!(store.get(keys::SPEED), Ok(Some("8".to_string())));
        assert_eq!(store.get(keys::CHARACTER), Ok(Some("orange".to_string())));
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_settings_fallbacks() {
        let store = MemoryStore::new()
            .with_entry(keys::SPEED, "99")
            .with_entry(keys::CHARACTER, "tiger");
        let settings = Settings::load(&store);
        assert_eq!(settings.speed.get(), 10);
        assert_eq!(settings.character, Character::Blue);

        assert_eq!(Settings::load(&BrokenStore), Settings::default());
        // Must not panic
        Settings::default().save(&mut BrokenStore);
    }
}
