//! Terminal host rendering: every crossterm write lives here.
//!
//! `TerminalSurface` rasterises the 800×600 field into a grid of coloured
//! cells; the remaining functions draw the HUD, menus and overlays straight
//! onto the terminal.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_fighter::assets::Sprite;
use space_fighter::compute::Hud;
use space_fighter::config::SessionConfig;
use space_fighter::entities::{BackgroundId, PersistMode, Rect, FIELD_HEIGHT, FIELD_WIDTH};
use space_fighter::render::{Rgb, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_BOMBS: Color = Color::DarkYellow;
const C_POWERUP_ACTIVE: Color = Color::Yellow;
const C_SHIELD: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Rows reserved outside the field: HUD on top, controls hint at the bottom.
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

fn term_colour(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Terminal surface ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: char,
    colour: Rgb,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    colour: Rgb(0, 0, 0),
};

/// A cell grid standing in for the canvas.
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    alpha: f64,
}

impl TerminalSurface {
    /// Build a surface for a terminal of `width` × `height` characters.
    pub fn new(width: u16, height: u16) -> Self {
        let cols = width.max(1);
        let rows = height.saturating_sub(HUD_ROWS + HINT_ROWS).max(1);
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            alpha: 1.0,
        }
    }

    pub fn fits(&self, width: u16, height: u16) -> bool {
        self.cols == width.max(1) && self.rows == height.saturating_sub(HUD_ROWS + HINT_ROWS).max(1)
    }

    /// Map a terminal cell to the field point at its centre.
    pub fn cell_to_field(&self, column: u16, row: u16) -> (f64, f64) {
        let row = row.saturating_sub(HUD_ROWS).min(self.rows - 1);
        let column = column.min(self.cols - 1);
        (
            (column as f64 + 0.5) * FIELD_WIDTH / self.cols as f64,
            (row as f64 + 0.5) * FIELD_HEIGHT / self.rows as f64,
        )
    }

    fn cell_span(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let sx = self.cols as f64 / FIELD_WIDTH;
        let sy = self.rows as f64 / FIELD_HEIGHT;
        let c0 = (rect.x * sx).floor().max(0.0);
        let r0 = (rect.y * sy).floor().max(0.0);
        let c1 = ((rect.x + rect.width) * sx).ceil().min(self.cols as f64);
        let r1 = ((rect.y + rect.height) * sy).ceil().min(self.rows as f64);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as usize, c1 as usize, r0 as usize, r1 as usize))
    }

    fn paint(&mut self, rect: Rect, glyph: char, colour: Rgb) {
        let Some((c0, c1, r0, r1)) = self.cell_span(rect) else {
            return;
        };
        let cols = self.cols as usize;
        for r in r0..r1 {
            for c in c0..c1 {
                self.cells[r * cols + c] = Cell { glyph, colour };
            }
        }
    }

    fn shade(&self) -> char {
        match self.alpha {
            a if a >= 0.95 => '█',
            a if a >= 0.6 => '▓',
            a if a >= 0.3 => '▒',
            _ => '░',
        }
    }

    /// Write the cell grid below the HUD row.
    pub fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let cols = self.cols as usize;
        for (r, line) in self.cells.chunks(cols).enumerate() {
            out.queue(cursor::MoveTo(0, r as u16 + HUD_ROWS))?;
            let mut current: Option<Rgb> = None;
            let mut run = String::with_capacity(cols);
            for cell in line {
                if current != Some(cell.colour) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    out.queue(style::SetForegroundColor(term_colour(cell.colour)))?;
                    current = Some(cell.colour);
                }
                run.push(cell.glyph);
            }
            out.queue(Print(&run))?;
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, rect: Rect, colour: Rgb) {
        // Sub-cell shapes (stars, sparks) read better as dots than blocks.
        let cell_w = FIELD_WIDTH / self.cols as f64;
        let cell_h = FIELD_HEIGHT / self.rows as f64;
        let glyph = if rect.width < cell_w / 2.0 && rect.height < cell_h / 2.0 {
            '•'
        } else {
            self.shade()
        };
        self.paint(rect, glyph, colour);
    }

    fn draw_image(&mut self, sprite: &Sprite, rect: Rect) {
        let Some(image) = sprite.image() else {
            return;
        };
        let glyph = if self.alpha >= 0.95 { '▓' } else { '░' };
        self.paint(rect, glyph, image.tint);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

pub fn draw_hud<W: Write>(out: &mut W, hud: &Hud, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    // Score, level, bombs on the left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}  ", hud.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(format!("Level:{:>2}  ", hud.level)))?;
    out.queue(style::SetForegroundColor(C_HUD_BOMBS))?;
    out.queue(Print(format!("Bombs:{}  ", hud.bombs)))?;

    // Active power-ups and lives, right-aligned
    let boost_tag = hud
        .boost_label()
        .map(|label| format!("[Weapon {label}] "))
        .unwrap_or_default();
    let shield_tag = hud
        .invincible_seconds
        .map(|secs| format!("[Shield {secs}s] "))
        .unwrap_or_default();
    let lives_str = format!("Lives:{}", "♥".repeat(hud.lives as usize));
    let right_len = boost_tag.chars().count() + shield_tag.chars().count() + lives_str.chars().count();

    let rx = width.saturating_sub(right_len as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    if !boost_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&boost_tag))?;
    }
    if !shield_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_SHIELD))?;
        out.queue(Print(&shield_tag))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

pub fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse / ←↑↓→ : Steer   SPACE : Bomb   ESC : Pause   Q : Quit"))?;
    Ok(())
}

// ── Centred boxes ─────────────────────────────────────────────────────────────

fn draw_centred<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

pub fn draw_menu<W: Write>(
    out: &mut W,
    settings: &SessionConfig,
    show_instructions: bool,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let mode = match settings.persist_mode {
        PersistMode::Permanent => "permanent (lost on hit)",
        PersistMode::Timed => "timed (15s per level)",
    };
    let background = match &settings.background {
        BackgroundId::Starfield => "starfield".to_string(),
        BackgroundId::Image(name) => name.clone(),
    };

    let mut lines: Vec<(String, Color)> = vec![
        ("★  SPACE  FIGHTER  ★".to_string(), Color::Cyan),
        (String::new(), Color::Reset),
        (format!("Weapon boosts: {mode}"), Color::Yellow),
        (format!("Background:    {background}"), Color::DarkGrey),
        (String::new(), Color::Reset),
        ("[ENTER] Start   [W] Weapon mode   [I] Instructions   [Q] Quit".to_string(), Color::White),
    ];

    if show_instructions {
        lines.extend([
            (String::new(), Color::Reset),
            ("Your ship follows the mouse and fires on its own.".to_string(), Color::Grey),
            ("Yellow box: weapon boost (up to x5)".to_string(), Color::Yellow),
            ("Green box:  5 seconds of invincibility".to_string(), Color::Green),
            ("Orange box: +1 bomb, SPACE clears the screen".to_string(), Color::DarkYellow),
            ("A new level every 1000 points.".to_string(), Color::Grey),
        ]);
    }

    draw_centred(out, &lines, width, height)?;
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

pub fn draw_pause<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Cyan),
        ("║       PAUSED       ║".to_string(), Color::Cyan),
        ("╚════════════════════╝".to_string(), Color::Cyan),
        ("ESC - Resume  M - Menu".to_string(), Color::White),
    ];
    draw_centred(out, &lines, width, height)
}

pub fn draw_game_over<W: Write>(out: &mut W, hud: &Hud, width: u16, height: u16) -> std::io::Result<()> {
    let lines = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>6}", hud.score), Color::Yellow),
        (format!("Final Level: {:>6}", hud.level), Color::Yellow),
        ("R - Play Again  M - Menu  Q - Quit".to_string(), Color::White),
    ];
    draw_centred(out, &lines, width, height)
}
