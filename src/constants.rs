//! Gameplay constants in the logical coordinate space.
//!
//! The simulation runs on a fixed 800×600 logical grid regardless of the
//! terminal size; the display layer scales positions to cells at render
//! time. Keeping the simulation resolution-independent means movement
//! speeds and the enemy AI behave identically on every terminal.

/// Logical playfield width.
pub const SCREEN_W: f32 = 800.0;

/// Logical playfield height. Also the wrap point for the road scroll
/// offset and the normalisation factor in the enemy speed formula.
pub const SCREEN_H: f32 = 600.0;

/// Player car sprite size (logical px).
pub const PLAYER_W: f32 = 50.0;
pub const PLAYER_H: f32 = 100.0;

/// Enemy car sprite size, shared by every enemy (logical px).
pub const ENEMY_W: f32 = 50.0;
pub const ENEMY_H: f32 = 100.0;

/// Fixed vertical position of the player car: near the bottom edge with a
/// 10 px margin.
pub const PLAYER_Y: f32 = SCREEN_H - PLAYER_H - 10.0;

/// Horizontal player movement per tick.
pub const PLAYER_SPEED: f32 = 5.0;

/// Base enemy descent speed per tick. The effective speed is scaled by
/// vertical proximity to the player (see `compute::tick`), and this value
/// also caps the per-tick horizontal homing step.
pub const ENEMY_BASE_SPEED: f32 = 3.0;

/// Road scroll speed per tick.
pub const ROAD_SPEED: f32 = 3.0;

/// Number of enemy cars on the road. Fixed for the lifetime of a round;
/// enemies are respawned at the top, never added or removed.
pub const ENEMY_COUNT: usize = 3;

/// How many scores the high-score screen shows, and the snapshot size the
/// legacy replace/remove operations work on.
pub const TOP_N: usize = 5;

/// How long the game freezes on the crash frame before the high-score
/// screen, in milliseconds.
pub const CRASH_PAUSE_MS: u64 = 1000;
