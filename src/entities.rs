/// All game entity types — pure data, no logic.
use crate::constants::{ENEMY_H, ENEMY_W, PLAYER_H, PLAYER_W};

/// The player car. Size is fixed (`PLAYER_W`×`PLAYER_H`); `y` never
/// changes after round start.
#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: PLAYER_W,
            h: PLAYER_H,
        }
    }
}

/// An oncoming enemy car. All enemies share the same sprite size.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: ENEMY_W,
            h: ENEMY_H,
        }
    }
}

/// Axis-aligned rectangle with half-open extents: a rect covers
/// `[x, x+w) × [y, y+h)`, so rects that merely touch do not overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Which direction keys are held this tick. Both may be true at once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
}

/// Sound events produced by the simulation and the crash path. The audio
/// collaborator is fire-and-forget; when audio is unavailable these are
/// simply dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCue {
    /// An enemy scrolled off the bottom and re-entered at the top.
    Spawn,
    /// The player hit an enemy.
    Crash,
}

/// Full state of one round. Created at the menu→playing transition,
/// mutated every tick by `compute::tick`, discarded after the crash score
/// is persisted.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Always exactly `ENEMY_COUNT` entries.
    pub enemies: Vec<Enemy>,
    /// Whole seconds survived since round start. Non-decreasing.
    pub score: u32,
    /// Road scroll offset, always in `[0, SCREEN_H)`.
    pub road_y: f32,
    // Effective speeds for this round, resolved from `config::Tunables`.
    pub player_speed: f32,
    pub enemy_base_speed: f32,
    pub road_speed: f32,
}
