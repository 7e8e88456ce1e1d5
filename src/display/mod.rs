//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and a read-only `Snapshot`.  No
//! game logic is performed; canvas coordinates are scaled onto whatever
//! terminal grid is available.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Foe, FoeKind, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_BULLET: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Canvas → terminal mapping ─────────────────────────────────────────────────

/// The bordered play area: row 0 is the HUD, row 1 and `height - 2` are the
/// border bars, the last row holds the controls hint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub left: u16,
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
    canvas_width: f32,
    canvas_height: f32,
}

impl Field {
    pub fn new(term_width: u16, term_height: u16, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            left: 1,
            top: 2,
            cols: term_width.saturating_sub(2).max(1),
            rows: term_height.saturating_sub(4).max(1),
            canvas_width,
            canvas_height,
        }
    }

    /// Cell span `(col, row, cols, rows)` covered by a canvas rectangle,
    /// clipped to the field. `None` when fully off-screen.
    pub fn cells(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(u16, u16, u16, u16)> {
        let sx = self.cols as f32 / self.canvas_width;
        let sy = self.rows as f32 / self.canvas_height;

        let c0 = (x * sx).floor().max(0.0);
        let r0 = (y * sy).floor().max(0.0);
        let c1 = ((x + w) * sx).ceil().min(self.cols as f32);
        let r1 = ((y + h) * sy).ceil().min(self.rows as f32);
        if c1 <= c0 || r1 <= r0 {
            return None;
        }
        Some((
            self.left + c0 as u16,
            self.top + r0 as u16,
            (c1 - c0) as u16,
            (r1 - r0) as u16,
        ))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snap: &Snapshot<'_>,
    term_width: u16,
    term_height: u16,
) -> std::io::Result<()> {
    let field = Field::new(term_width, term_height, snap.canvas_width, snap.canvas_height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, term_width, term_height)?;
    draw_hud(out, snap, term_width)?;

    for foe in snap.enemies.iter().chain(snap.bosses.iter()) {
        draw_foe(out, &field, foe)?;
    }
    for bullet in snap.bullets {
        fill(out, &field, bullet.x, bullet.y, snap.bullet_width, snap.bullet_height, "|", C_BULLET)?;
    }

    let p = snap.player;
    fill(out, &field, p.x, p.y, p.width, p.height, "▲", C_PLAYER)?;

    draw_controls_hint(out, term_height)?;

    if snap.game_over {
        draw_game_over(out, snap, term_width, term_height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, w: u16, h: u16) -> std::io::Result<()> {
    let inner = "─".repeat((w as usize).saturating_sub(2));

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", inner)))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", inner)))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(w.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot<'_>, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", snap.score)))?;

    out.queue(cursor::MoveTo(16, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("Health: {}", snap.health)))?;

    let level = format!("Level {}", snap.difficulty);
    let lx = width.saturating_sub(level.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_foe<W: Write>(out: &mut W, field: &Field, foe: &Foe) -> std::io::Result<()> {
    let (glyph, color) = match foe.kind {
        FoeKind::Grunt => ("▼", C_ENEMY),
        FoeKind::Boss => ("█", C_BOSS),
    };
    fill(out, field, foe.x, foe.y, foe.width, foe.height, glyph, color)
}

#[allow(clippy::too_many_arguments)]
fn fill<W: Write>(
    out: &mut W,
    field: &Field,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row, cols, rows)) = field.cells(x, y, w, h) else {
        return Ok(());
    };
    let line = glyph.repeat(cols as usize);

    out.queue(style::SetForegroundColor(color))?;
    for r in row..row + rows {
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snap: &Snapshot<'_>,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", snap.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_canvas_maps_to_full_field() {
        let field = Field::new(82, 24, 800.0, 600.0);
        assert_eq!(field.cells(0.0, 0.0, 800.0, 600.0), Some((1, 2, 80, 20)));
    }

    #[test]
    fn offscreen_rect_is_skipped() {
        let field = Field::new(82, 24, 800.0, 600.0);
        // enemy waiting above the top edge
        assert_eq!(field.cells(100.0, -30.0, 30.0, 30.0), None);
    }

    #[test]
    fn partially_visible_rect_is_clipped() {
        let field = Field::new(82, 24, 800.0, 600.0);
        let (_, row, _, rows) = field.cells(0.0, -15.0, 30.0, 30.0).unwrap();
        assert_eq!(row, 2);
        assert_eq!(rows, 1);
    }

    #[test]
    fn render_writes_hud_and_overlay() {
        let player = crate::entities::Player {
            x: 385.0,
            y: 540.0,
            width: 30.0,
            height: 30.0,
            speed: 5.0,
            health: 0,
        };
        let snap = Snapshot {
            player: &player,
            bullets: &[],
            enemies: &[],
            bosses: &[],
            score: 120,
            health: 0,
            difficulty: 1,
            canvas_width: 800.0,
            canvas_height: 600.0,
            bullet_width: 5.0,
            bullet_height: 10.0,
            game_over: true,
        };
        let mut buf: Vec<u8> = Vec::new();
        render(&mut buf, &snap, 82, 24).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Score: 120"));
        assert!(text.contains("GAME  OVER"));
    }
}
