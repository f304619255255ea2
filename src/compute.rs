/// Pure simulation logic.
///
/// `tick` advances one round by exactly one frame, mutating the
/// `GameState` in place and returning whatever sound cues the frame
/// produced. All randomness comes through an injected RNG handle so
/// callers control determinism (tests use a seeded `StdRng`).
use std::time::Duration;

use rand::Rng;

use crate::config::Tunables;
use crate::constants::{
    ENEMY_COUNT, ENEMY_H, ENEMY_W, PLAYER_W, PLAYER_Y, SCREEN_H, SCREEN_W,
};
use crate::entities::{AudioCue, Enemy, GameState, InputSnapshot, Player};

/// Uniform random enemy column, inclusive over the full valid integer range.
fn random_enemy_x(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0..=(SCREEN_W - ENEMY_W) as i32) as f32
}

/// Build a fresh round: player centred at the bottom, enemies lined up
/// just above the top edge at random columns, score and scroll zeroed.
pub fn init_round(tunables: &Tunables, rng: &mut impl Rng) -> GameState {
    let enemies = (0..ENEMY_COUNT)
        .map(|_| Enemy {
            x: random_enemy_x(rng),
            y: -ENEMY_H,
        })
        .collect();
    GameState {
        player: Player {
            x: (SCREEN_W - PLAYER_W) / 2.0,
            y: PLAYER_Y,
        },
        enemies,
        score: 0,
        road_y: 0.0,
        player_speed: tunables.player_speed,
        enemy_base_speed: tunables.enemy_base_speed,
        road_speed: tunables.road_speed,
    }
}

/// Advance the simulation by one frame.
///
/// `elapsed` is the wall time since round start; the score is its floor in
/// whole seconds, so it is non-decreasing for monotonic input.
pub fn tick(
    state: &mut GameState,
    input: &InputSnapshot,
    elapsed: Duration,
    rng: &mut impl Rng,
) -> Vec<AudioCue> {
    let mut cues = Vec::new();

    // ── 1. Player movement — clamps are independent, both keys may apply ──
    if input.left {
        state.player.x = (state.player.x - state.player_speed).max(0.0);
    }
    if input.right {
        state.player.x = (state.player.x + state.player_speed).min(SCREEN_W - PLAYER_W);
    }

    // ── 2. Enemy AI ──────────────────────────────────────────────────────
    for enemy in &mut state.enemies {
        // Proximity-scaled descent: closer vertical alignment with the
        // player means a faster approach. Deliberately unclamped — at a
        // distance beyond SCREEN_H the bonus goes negative and the enemy
        // descends slower than the base speed.
        let distance_to_player = (enemy.y - state.player.y).abs();
        let vertical_speed =
            state.enemy_base_speed + (1.0 - distance_to_player / SCREEN_H) * 2.0;
        enemy.y += vertical_speed;

        // Horizontal homing toward the player, at most base speed per tick.
        if enemy.x < state.player.x {
            enemy.x += state.enemy_base_speed.min(state.player.x - enemy.x);
        } else if enemy.x > state.player.x {
            enemy.x -= state.enemy_base_speed.min(enemy.x - state.player.x);
        }
        enemy.x = enemy.x.clamp(0.0, SCREEN_W - ENEMY_W);

        // Respawn at the top once fully past the bottom edge.
        if enemy.y > SCREEN_H {
            enemy.y = -ENEMY_H;
            enemy.x = random_enemy_x(rng);
            cues.push(AudioCue::Spawn);
        }
    }

    // ── 3. Score: whole seconds survived ─────────────────────────────────
    state.score = elapsed.as_secs() as u32;

    // ── 4. Road scroll, wrapping at the screen height ────────────────────
    state.road_y += state.road_speed;
    if state.road_y >= SCREEN_H {
        state.road_y = 0.0;
    }

    cues
}

/// Index of the first enemy (list order) overlapping the player, if any.
/// Half-open rectangle intersection: touching edges do not count.
pub fn check_collision(player: &Player, enemies: &[Enemy]) -> Option<usize> {
    let player_rect = player.rect();
    enemies
        .iter()
        .position(|enemy| player_rect.overlaps(&enemy.rect()))
}
