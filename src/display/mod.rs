/// Rendering layer.
///
/// `render` translates an immutable view of the game state into drawing
/// commands on a `Surface`.  No game logic is performed here; the surface
/// decides how commands reach the screen.

pub mod terminal;

use crate::entities::{GameState, GameStatus, Paint, Rect, Ship};
use crate::error::Result;

pub use terminal::TerminalSurface;

const C_PROJECTILE: Paint = Paint::Black;
const C_TEXT: Paint = Paint::Black;
const C_HEALTH_BACK: Paint = Paint::Red;
const C_HEALTH_FRONT: Paint = Paint::Green;

/// Health that fills a whole bar.  Both ships use the same scale, so the
/// enemy's bar starts out five times as wide as its hull.
const HEALTH_BAR_SCALE: i32 = 100;
const HEALTH_BAR_HEIGHT: i32 = 5;
const HEALTH_BAR_GAP: i32 = 10;

const RESULT_FONT_PX: u16 = 30;
const PROMPT_FONT_PX: u16 = 20;
const RESTART_PROMPT: &str = "Press 'R' to Restart";

/// A 2D drawing target in surface units.
pub trait Surface {
    /// Current `(width, height)`.
    fn size(&self) -> (i32, i32);
    fn clear(&mut self) -> Result<()>;
    fn fill_rect(&mut self, rect: Rect, paint: Paint) -> Result<()>;
    /// Draw text with its baseline-left corner at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: i32, y: i32, font_px: u16, paint: Paint) -> Result<()>;
    /// Push everything drawn since the last call to the screen.
    fn present(&mut self) -> Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<S: Surface>(surface: &mut S, state: &GameState) -> Result<()> {
    surface.clear()?;

    draw_ship(surface, &state.player)?;
    draw_ship(surface, &state.enemy)?;

    for p in state
        .player_projectiles
        .iter()
        .chain(state.enemy_projectiles.iter())
    {
        surface.fill_rect(p.rect(), C_PROJECTILE)?;
    }

    if state.status == GameStatus::Over {
        draw_game_over(surface, state)?;
    }

    surface.present()
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_ship<S: Surface>(surface: &mut S, ship: &Ship) -> Result<()> {
    surface.fill_rect(ship.rect(), ship.color)?;

    let bar_y = ship.y - HEALTH_BAR_GAP;
    surface.fill_rect(
        Rect::new(ship.x, bar_y, ship.width, HEALTH_BAR_HEIGHT),
        C_HEALTH_BACK,
    )?;
    surface.fill_rect(
        Rect::new(ship.x, bar_y, health_bar_width(ship), HEALTH_BAR_HEIGHT),
        C_HEALTH_FRONT,
    )
}

pub fn health_bar_width(ship: &Ship) -> i32 {
    (ship.width * ship.health / HEALTH_BAR_SCALE).max(0)
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<S: Surface>(surface: &mut S, state: &GameState) -> Result<()> {
    let Some(outcome) = state.outcome else {
        return Ok(());
    };
    let (width, height) = surface.size();
    let x = width / 2 - 100;
    let y = height / 2;

    surface.fill_text(outcome.message(), x, y, RESULT_FONT_PX, C_TEXT)?;
    surface.fill_text(RESTART_PROMPT, x, y + 40, PROMPT_FONT_PX, C_TEXT)
}
