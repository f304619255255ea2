/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; this module only translates
/// logical 800×600 coordinates into terminal cells and draw commands.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use road_racer::constants::{ENEMY_H, ENEMY_W, PLAYER_H, PLAYER_W, SCREEN_H, SCREEN_W};
use road_racer::entities::GameState;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_ROAD_EDGE: Color = Color::DarkGrey;
const C_LANE_DASH: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::Cyan;
const C_ENEMY: Color = Color::Red;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// Lane-marking geometry in logical px. One dash-plus-gap period; the road
// scroll offset shifts the phase so dashes travel downward.
const DASH_PERIOD: f32 = 80.0;
const DASH_LEN: f32 = 40.0;

// ── Coordinate mapping ────────────────────────────────────────────────────────

fn to_col(x: f32, cols: u16) -> i32 {
    (x / SCREEN_W * cols as f32) as i32
}

fn to_row(y: f32, rows: u16) -> i32 {
    (y / SCREEN_H * rows as f32) as i32
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_road(out, state, cols, rows)?;

    for enemy in &state.enemies {
        draw_car(out, enemy.x, enemy.y, ENEMY_W, ENEMY_H, C_ENEMY, cols, rows)?;
    }
    draw_car(
        out,
        state.player.x,
        state.player.y,
        PLAYER_W,
        PLAYER_H,
        C_PLAYER,
        cols,
        rows,
    )?;

    draw_hud(out, state)?;
    draw_controls_hint(out, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Road ──────────────────────────────────────────────────────────────────────

/// Scrolling road: solid shoulder lines at both edges and two dashed lane
/// separators. The dash pattern is tiled over the screen height with its
/// phase taken from `road_y`, so the markings move down the screen as the
/// offset grows — the terminal rendition of the two offset background
/// tiles.
fn draw_road<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let edge_left = 0;
    let edge_right = cols.saturating_sub(1) as i32;
    let lane_a = to_col(SCREEN_W / 3.0, cols);
    let lane_b = to_col(SCREEN_W * 2.0 / 3.0, cols);

    for row in 0..rows as i32 {
        let logical_y = (row as f32 + 0.5) / rows as f32 * SCREEN_H;
        out.queue(style::SetForegroundColor(C_ROAD_EDGE))?;
        out.queue(cursor::MoveTo(edge_left as u16, row as u16))?;
        out.queue(Print("┃"))?;
        out.queue(cursor::MoveTo(edge_right as u16, row as u16))?;
        out.queue(Print("┃"))?;

        if (logical_y - state.road_y).rem_euclid(DASH_PERIOD) < DASH_LEN {
            out.queue(style::SetForegroundColor(C_LANE_DASH))?;
            out.queue(cursor::MoveTo(lane_a as u16, row as u16))?;
            out.queue(Print("╎"))?;
            out.queue(cursor::MoveTo(lane_b as u16, row as u16))?;
            out.queue(Print("╎"))?;
        }
    }
    Ok(())
}

// ── Cars ──────────────────────────────────────────────────────────────────────

/// Draw a car as a filled block covering its logical footprint, clipped to
/// the screen. The top and bottom rows use half blocks for a rounded-off
/// silhouette.
#[allow(clippy::too_many_arguments)]
fn draw_car<W: Write>(
    out: &mut W,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: Color,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let x0 = to_col(x, cols);
    let x1 = to_col(x + w, cols).max(x0 + 1);
    let y0 = to_row(y, rows);
    let y1 = to_row(y + h, rows).max(y0 + 1);

    out.queue(style::SetForegroundColor(color))?;
    for row in y0..y1 {
        if row < 0 || row >= rows as i32 {
            continue;
        }
        let start = x0.max(0);
        let end = x1.min(cols as i32);
        if start >= end {
            continue;
        }
        let glyph = if row == y0 {
            "▄"
        } else if row == y1 - 1 {
            "▀"
        } else {
            "█"
        };
        out.queue(cursor::MoveTo(start as u16, row as u16))?;
        out.queue(Print(glyph.repeat((end - start) as usize)))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Score:{:>5}", state.score)))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Steer   Q : Quit"))?;
    Ok(())
}
