//! Screen-space overlays: health / lives / score / timer, the control
//! legend and the game-over screen.

use crate::assets::{AssetCatalog, ImageHandle};
use crate::geometry::Rect;
use crate::host::{Color, Fill, Font, Renderer};
use crate::player::Player;
use crate::timer::Timer;

const HEALTH_BAR: Rect = Rect {
    x: 22.0,
    y: 22.0,
    width: 200.0,
    height: 20.0,
};
const ICON_SIZE: f32 = 24.0;

pub fn draw_hud(renderer: &mut dyn Renderer, player: &Player, timer: &Timer) {
    let (screen_width, _) = renderer.screen_size();

    renderer.draw_rect(Color::WHITE, Rect::new(20.0, 20.0, 204.0, 24.0), Fill::Solid);
    renderer.draw_rect(Color::RED, HEALTH_BAR, Fill::Solid);
    renderer.draw_rect(
        Color::GREEN,
        Rect::new(
            HEALTH_BAR.x,
            HEALTH_BAR.y,
            HEALTH_BAR.width * player.health_ratio(),
            HEALTH_BAR.height,
        ),
        Fill::Solid,
    );

    let lives = format!("Lives: {}", player.lives);
    renderer.draw_text(&lives, (20.0, 50.0), Color::WHITE, Font::Hud);
    let score = format!("Score: {}", player.score);
    renderer.draw_text(&score, (20.0, 80.0), Color::WHITE, Font::Hud);

    let time = format!("Time Left: {}s", timer.whole_seconds_left());
    let x = screen_width / 2.0 - renderer.text_width(&time, Font::Hud) / 2.0;
    renderer.draw_text(&time, (x, 20.0), Color::WHITE, Font::Hud);
}

// ── Control legend ────────────────────────────────────────────────────────────

pub struct ControlDisplay {
    controls: Vec<(ImageHandle, &'static str, (f32, f32))>,
}

impl ControlDisplay {
    /// Icons are decorative: missing ones become placeholders.
    pub fn new(catalog: &AssetCatalog, screen_width: f32) -> Self {
        let entries = [
            ("icons/left_arrow", "Move Left"),
            ("icons/right_arrow", "Move Right"),
            ("icons/up_arrow", "Jump"),
            ("icons/space_bar", "Shoot"),
        ];
        let x = screen_width - 200.0;
        let controls = entries
            .iter()
            .enumerate()
            .map(|(i, &(key, label))| {
                let icon = catalog.image_or_placeholder(key, ICON_SIZE, ICON_SIZE);
                (icon, label, (x, 20.0 + 40.0 * i as f32))
            })
            .collect();
        ControlDisplay { controls }
    }

    pub fn icons(&self) -> impl Iterator<Item = &ImageHandle> {
        self.controls.iter().map(|(icon, _, _)| icon)
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for (icon, label, (x, y)) in &self.controls {
            let at = Rect::new(*x, *y, ICON_SIZE, ICON_SIZE);
            if icon.is_placeholder() {
                renderer.draw_rect(Color::BLACK, at, Fill::Stroke(2));
            }
            renderer.draw_image(icon, at);
            renderer.draw_text(label, (x + 30.0, y + 5.0), Color::WHITE, Font::Label);
        }
    }
}

// ── Game over ─────────────────────────────────────────────────────────────────

pub fn draw_game_over(renderer: &mut dyn Renderer) {
    let (screen_width, _) = renderer.screen_size();
    renderer.fill(Color::BLACK);

    let lines: &[(&str, Color, Font, f32)] = &[
        ("Game Over", Color::RED, Font::Title, 200.0),
        ("Press R to Restart Game", Color::WHITE, Font::Subtitle, 300.0),
        ("Press L to Restart Level", Color::WHITE, Font::Subtitle, 350.0),
    ];
    for &(text, color, font, y) in lines {
        let x = screen_width / 2.0 - renderer.text_width(text, font) / 2.0;
        renderer.draw_text(text, (x, y), color, font);
    }
}
