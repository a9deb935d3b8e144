/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable snapshot of the
/// game.  No game logic is performed; this module only scales world units
/// onto the terminal grid and translates the snapshot into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use river_raid::entities::{GameOverCause, Rgb, TargetKind};
use river_raid::snapshot::{RenderState, TargetView};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_LAND: Color = Color::Green;
const C_WATER: Color = Color::DarkBlue;
const C_HUD_FUEL: Color = Color::Red;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLANE: Color = Color::White;
const C_MISSILE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Width of the fuel gauge in cells.
const GAUGE_CELLS: usize = 20;

/// Maps world units onto the terminal.  Row 0 holds the HUD and the last row
/// the controls hint; the river is drawn in between.
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f64,
    world_h: f64,
}

impl Viewport {
    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    fn col(&self, x: f64) -> i32 {
        (x / self.world_w * self.cols as f64).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        1 + (y / self.world_h * self.play_rows() as f64).floor() as i32
    }

    /// World screen-Y sampled by a terminal play row.
    fn world_y_of(&self, play_row: u16) -> f64 {
        play_row as f64 / self.play_rows() as f64 * self.world_h
    }

    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let (c, r) = (self.col(x), self.row(y));
        let on_screen = c >= 0 && c < self.cols as i32 && r >= 1 && r <= self.play_rows() as i32;
        on_screen.then_some((c as u16, r as u16))
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols` × `rows` terminal.
pub fn render<W: Write>(
    out: &mut W,
    snap: &RenderState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let view = Viewport {
        cols,
        rows,
        world_w: snap.screen_width,
        world_h: snap.screen_height,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_banks(out, snap, &view)?;
    for target in &snap.targets {
        draw_target(out, target, &view)?;
    }
    for missile in &snap.missiles {
        if let Some((c, r)) = view.cell(missile.x, missile.screen_y) {
            out.queue(cursor::MoveTo(c, r))?;
            out.queue(style::SetForegroundColor(C_MISSILE))?;
            out.queue(Print("|"))?;
        }
    }
    draw_plane(out, snap, &view)?;
    draw_hud(out, snap, &view)?;
    draw_controls_hint(out, &view)?;

    if let Some(cause) = snap.cause() {
        draw_game_over(out, snap, cause, &view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── River ─────────────────────────────────────────────────────────────────────

fn draw_banks<W: Write>(out: &mut W, snap: &RenderState, view: &Viewport) -> std::io::Result<()> {
    let Some(last) = snap.banks.len().checked_sub(1) else {
        return Ok(());
    };
    let cols = view.cols as i32;

    for play_row in 0..view.play_rows() {
        let idx = (view.world_y_of(play_row).round() as usize).min(last);
        let bank = &snap.banks[idx];
        let left = view.col(bank.left).clamp(0, cols);
        let right = (view.col(bank.right) + 1).clamp(left, cols);
        let row = play_row + 1;

        out.queue(cursor::MoveTo(0, row))?;
        out.queue(style::SetForegroundColor(C_LAND))?;
        out.queue(Print("█".repeat(left as usize)))?;
        out.queue(style::SetForegroundColor(C_WATER))?;
        out.queue(Print("~".repeat((right - left) as usize)))?;
        out.queue(style::SetForegroundColor(C_LAND))?;
        out.queue(Print("█".repeat((cols - right) as usize)))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_target<W: Write>(out: &mut W, target: &TargetView, view: &Viewport) -> std::io::Result<()> {
    let Some((c, r)) = view.cell(target.x, target.screen_y) else {
        return Ok(());
    };
    let glyph = match target.kind {
        TargetKind::Tanker => "T",
        TargetKind::Helicopter => "H",
        TargetKind::FuelDepot => "F",
        TargetKind::Bridge => "=",
    };
    out.queue(cursor::MoveTo(c, r))?;
    out.queue(style::SetForegroundColor(rgb(target.color)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_plane<W: Write>(out: &mut W, snap: &RenderState, view: &Viewport) -> std::io::Result<()> {
    if let Some((c, r)) = view.cell(snap.plane.x, snap.plane.y) {
        out.queue(cursor::MoveTo(c, r))?;
        out.queue(style::SetForegroundColor(C_PLANE))?;
        out.queue(Print("▲"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &RenderState, view: &Viewport) -> std::io::Result<()> {
    let ratio = if snap.max_fuel > 0.0 {
        (snap.fuel / snap.max_fuel).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * GAUGE_CELLS as f64).round() as usize;

    // Fuel gauge — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_FUEL))?;
    out.queue(Print(format!(
        "Fuel [{}{}] {:>5.1}",
        "■".repeat(filled),
        " ".repeat(GAUGE_CELLS - filled),
        snap.fuel
    )))?;

    // Score — right
    let score_text = format!("Score: {:>6}", snap.score);
    let sx = view
        .cols
        .saturating_sub(score_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Steer   SPACE : Fire   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snap: &RenderState,
    cause: GameOverCause,
    view: &Viewport,
) -> std::io::Result<()> {
    let reason = match cause {
        GameOverCause::BankCollision => "Crashed into the riverbank",
        GameOverCause::OutOfFuel => "Ran out of fuel",
    };
    let score_line = format!("Final Score: {}", snap.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (reason, Color::White),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
