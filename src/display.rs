//! Terminal host — all terminal output lives here.
//!
//! The game draws onto a logical 800×600 surface. `TerminalRenderer`
//! scales that surface onto the terminal grid, records every draw call
//! into a cell buffer, and writes the whole buffer out once per frame.
//! Images are mapped to coloured glyphs by asset key.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    QueueableCommand,
};
use log::debug;
use platformer::assets::{ImageHandle, SoundHandle};
use platformer::geometry::Rect;
use platformer::host::{Audio, Color, Fill, Font, Renderer};

// ── Glyph palette ─────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::rgb(255, 255, 255);
const C_ENEMY: Color = Color::rgb(200, 30, 30);
const C_BOSS: Color = Color::rgb(170, 60, 200);
const C_SWORD: Color = Color::rgb(200, 200, 220);
const C_HEALTH: Color = Color::rgb(40, 200, 60);
const C_LIFE: Color = Color::rgb(230, 60, 160);
const C_ICON: Color = Color::rgb(200, 200, 200);

fn glyph(image: &ImageHandle) -> (char, Color) {
    match image.key.as_str() {
        "player" => ('@', C_PLAYER),
        "enemy" => ('M', C_ENEMY),
        "boss_enemy" => ('B', C_BOSS),
        "sword" => ('=', C_SWORD),
        "health_collectible" => ('+', C_HEALTH),
        "life_collectible" => ('♥', C_LIFE),
        "icons/left_arrow" => ('←', C_ICON),
        "icons/right_arrow" => ('→', C_ICON),
        "icons/up_arrow" => ('↑', C_ICON),
        "icons/space_bar" => ('_', C_ICON),
        _ => ('?', C_ICON),
    }
}

fn to_term(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::WHITE,
    bg: Color::BLACK,
};

pub struct TerminalRenderer {
    cols: u16,
    rows: u16,
    width: f32,
    height: f32,
    cells: Vec<Cell>,
}

impl TerminalRenderer {
    pub fn new(cols: u16, rows: u16, width: f32, height: f32) -> Self {
        TerminalRenderer {
            cols,
            rows,
            width,
            height,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        debug!("terminal resized to {}x{}", cols, rows);
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    fn px_per_col(&self) -> f32 {
        self.width / self.cols.max(1) as f32
    }

    fn px_per_row(&self) -> f32 {
        self.height / self.rows.max(1) as f32
    }

    /// Cell span `(col0, row0, col1, row1)` covered by `rect`, clipped to the
    /// grid. Non-empty rects always cover at least one cell.
    fn span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        let (pc, pr) = (self.px_per_col(), self.px_per_row());
        let c0 = (rect.left() / pc).floor();
        let r0 = (rect.top() / pr).floor();
        let c1 = (rect.right() / pc).ceil().max(c0 + 1.0);
        let r1 = (rect.bottom() / pr).ceil().max(r0 + 1.0);

        let clip = |v: f32, max: u16| v.clamp(0.0, max as f32) as u16;
        let span = (
            clip(c0, self.cols),
            clip(r0, self.rows),
            clip(c1, self.cols),
            clip(r1, self.rows),
        );
        (span.0 < span.2 && span.1 < span.3).then_some(span)
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> &mut Cell {
        let index = row as usize * self.cols as usize + col as usize;
        &mut self.cells[index]
    }

    /// Write the buffered frame to the terminal, changing colours only when
    /// they differ from the previous cell.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let mut current: Option<(Color, Color)> = None;
            let mut run = String::new();
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if current != Some((cell.fg, cell.bg)) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    out.queue(style::SetForegroundColor(to_term(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(to_term(cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                run.push(cell.ch);
            }
            out.queue(Print(&run))?;
        }

        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn screen_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) {
        for cell in &mut self.cells {
            *cell = Cell { bg: color, ..BLANK };
        }
    }

    fn draw_image(&mut self, image: &ImageHandle, at: Rect) {
        let Some((c0, r0, c1, r1)) = self.span(at) else {
            return;
        };
        let (ch, fg) = glyph(image);
        for row in r0..r1 {
            for col in c0..c1 {
                let cell = self.cell_mut(col, row);
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    fn draw_rect(&mut self, color: Color, rect: Rect, fill: Fill) {
        let Some((c0, r0, c1, r1)) = self.span(rect) else {
            return;
        };
        for row in r0..r1 {
            for col in c0..c1 {
                let edge = row == r0 || row + 1 == r1 || col == c0 || col + 1 == c1;
                if fill == Fill::Solid || edge {
                    *self.cell_mut(col, row) = Cell { bg: color, ..BLANK };
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, at: (f32, f32), color: Color, _font: Font) {
        let row = (at.1 / self.px_per_row()).floor();
        if row < 0.0 || row >= self.rows as f32 {
            return;
        }
        let start = (at.0 / self.px_per_col()).floor() as i32;
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i32;
            if col < 0 || col >= self.cols as i32 {
                continue;
            }
            let cell = self.cell_mut(col as u16, row as u16);
            cell.ch = ch;
            cell.fg = color;
        }
    }

    /// One glyph per character regardless of font size.
    fn text_width(&self, text: &str, _font: Font) -> f32 {
        text.chars().count() as f32 * self.px_per_col()
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// A terminal has no mixer: sounds are logged, and the game-over sound
/// rings the bell on the next presented frame.
#[derive(Default)]
pub struct TerminalAudio {
    music: Option<String>,
    bell: bool,
}

impl TerminalAudio {
    /// Returns and clears the pending bell.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }
}

impl Audio for TerminalAudio {
    fn play_sound(&mut self, sound: &SoundHandle) {
        debug!("sound: {}", sound.key);
        if sound.key == "game_over" {
            self.bell = true;
        }
    }

    fn play_music(&mut self, music: &SoundHandle) {
        debug!("music loop: {}", music.key);
        self.music = Some(music.key.clone());
    }

    fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            debug!("music stopped: {}", music);
        }
    }
}
