//! Contracts the game core consumes from its host environment.
//!
//! The core never talks to a terminal, window or sound device directly.
//! Everything it needs from the outside world goes through the three
//! traits below, so the simulation runs unchanged under the terminal
//! front-end and under test doubles.

use std::time::Instant;

use crate::assets::{ImageHandle, SoundHandle};
use crate::geometry::Rect;

// ── Drawing primitives ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const SKY_BLUE: Color = Color::rgb(135, 206, 235);
    pub const BROWN: Color = Color::rgb(139, 69, 19);
}

/// Text styles used by the game, largest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    Title,
    Subtitle,
    Hud,
    Label,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Solid,
    /// Outline of the given width in pixels.
    Stroke(u32),
}

// ── Host traits ──────────────────────────────────────────────────────────────

/// A drawable surface in screen-space pixels.
pub trait Renderer {
    /// Logical surface size `(width, height)`.
    fn screen_size(&self) -> (f32, f32);
    fn fill(&mut self, color: Color);
    fn draw_image(&mut self, image: &ImageHandle, at: Rect);
    fn draw_rect(&mut self, color: Color, rect: Rect, fill: Fill);
    fn draw_text(&mut self, text: &str, at: (f32, f32), color: Color, font: Font);
    /// Width in pixels `text` would occupy when drawn with `font`.
    fn text_width(&self, text: &str, font: Font) -> f32;
}

/// Fire-and-forget sound output.
pub trait Audio {
    fn play_sound(&mut self, sound: &SoundHandle);
    /// Starts looping background music.
    fn play_music(&mut self, music: &SoundHandle);
    fn stop_music(&mut self);
}

/// Monotonic millisecond counter.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ── Default implementations ──────────────────────────────────────────────────

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Audio sink that discards everything.
#[derive(Debug, Default)]
pub struct NullAudio;

impl Audio for NullAudio {
    fn play_sound(&mut self, _sound: &SoundHandle) {}
    fn play_music(&mut self, _music: &SoundHandle) {}
    fn stop_music(&mut self) {}
}
