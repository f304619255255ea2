/// Optional gameplay tunables loaded from `road_racer.toml`.
///
/// Every field defaults to the matching compile-time constant, so a
/// minimal TOML can override just the values you care about. A missing
/// file is silently ignored; a file that fails to parse is reported on
/// stderr and the defaults are kept. Loading happens before the terminal
/// enters the alternate screen, so the warnings stay visible.
use serde::Deserialize;

use crate::constants::{ENEMY_BASE_SPEED, PLAYER_SPEED, ROAD_SPEED};

pub const CONFIG_FILE: &str = "road_racer.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Horizontal player movement per tick (logical px).
    pub player_speed: f32,
    /// Base enemy descent speed and homing cap per tick (logical px).
    pub enemy_base_speed: f32,
    /// Road scroll speed per tick (logical px).
    pub road_speed: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            enemy_base_speed: ENEMY_BASE_SPEED,
            road_speed: ROAD_SPEED,
        }
    }
}

impl Tunables {
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Tunables>(&contents) {
                Ok(tunables) => tunables.sanitized(),
                Err(e) => {
                    eprintln!("warning: failed to parse {path}: {e}; using defaults");
                    Tunables::default()
                }
            },
            // File not present — defaults apply; not an error.
            Err(_) => Tunables::default(),
        }
    }

    /// Speeds must be finite and non-negative: a negative player speed
    /// would invert the one-sided movement clamps and let the car leave
    /// the playfield. A bad value falls back to its default.
    fn sanitized(mut self) -> Self {
        let defaults = Tunables::default();
        if !valid_speed(self.player_speed) {
            eprintln!(
                "warning: ignoring invalid player_speed {}; using default",
                self.player_speed
            );
            self.player_speed = defaults.player_speed;
        }
        if !valid_speed(self.enemy_base_speed) {
            eprintln!(
                "warning: ignoring invalid enemy_base_speed {}; using default",
                self.enemy_base_speed
            );
            self.enemy_base_speed = defaults.enemy_base_speed;
        }
        if !valid_speed(self.road_speed) {
            eprintln!(
                "warning: ignoring invalid road_speed {}; using default",
                self.road_speed
            );
            self.road_speed = defaults.road_speed;
        }
        self
    }
}

fn valid_speed(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}
