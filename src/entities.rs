//! Static level pieces and projectiles.
//!
//! Everything the level or player owns in bulk implements [`Entity`], the
//! shared bounding-rect + draw capability used for collision and rendering.

use log::debug;

use crate::assets::ImageHandle;
use crate::camera::Camera;
use crate::geometry::Rect;
use crate::host::{Color, Fill, Renderer};
use crate::player::Player;

pub const PLATFORM_HEIGHT: f32 = 20.0;
pub const DOOR_WIDTH: f32 = 50.0;
pub const DOOR_HEIGHT: f32 = 80.0;

/// Pixels per frame.
pub const PROJECTILE_SPEED: f32 = 10.0;

const HEALTH_PICKUP: i32 = 20;
const PICKUP_SCORE: u32 = 50;

pub trait Entity {
    fn rect(&self) -> Rect;
    fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera);
}

/// Strict bounding-box overlap between two entities.
pub fn collide(a: &dyn Entity, b: &dyn Entity) -> bool {
    a.rect().colliderect(&b.rect())
}

// ── Platforms ─────────────────────────────────────────────────────────────────

/// Non-owning reference to a platform: its index in the level's platform list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlatformId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Platform {
            rect: Rect::new(x, y, width, PLATFORM_HEIGHT),
        }
    }
}

impl Entity for Platform {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        renderer.draw_rect(Color::BROWN, camera.apply(&self.rect), Fill::Solid);
    }
}

// ── Door ──────────────────────────────────────────────────────────────────────

/// Level exit. Touching it completes the level.
#[derive(Clone, Debug, PartialEq)]
pub struct Door {
    pub rect: Rect,
}

impl Door {
    pub fn new(x: f32, bottom: f32) -> Self {
        Door {
            rect: Rect::from_midbottom(x, bottom, DOOR_WIDTH, DOOR_HEIGHT),
        }
    }
}

impl Entity for Door {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        renderer.draw_rect(Color::BLUE, camera.apply(&self.rect), Fill::Solid);
    }
}

// ── Collectibles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Restores 20 health, capped at max.
    Health,
    /// Grants one extra life.
    Life,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    pub rect: Rect,
    pub kind: CollectibleKind,
    pub image: ImageHandle,
}

impl Collectible {
    pub fn new(center_x: f32, center_y: f32, kind: CollectibleKind, image: ImageHandle) -> Self {
        Collectible {
            rect: Rect::from_center(center_x, center_y, image.width, image.height),
            kind,
            image,
        }
    }

    /// Applies the pickup to `player`. Score is awarded even when the
    /// effect itself changes nothing (health pickup at full health).
    /// The owner must drop the collectible afterwards.
    pub fn apply_effect(&self, player: &mut Player) {
        match self.kind {
            CollectibleKind::Health => player.heal(HEALTH_PICKUP),
            CollectibleKind::Life => player.lives += 1,
        }
        player.score += PICKUP_SCORE;
        debug!("picked up {:?}, score {}", self.kind, player.score);
    }
}

impl Entity for Collectible {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        renderer.draw_image(&self.image, camera.apply(&self.rect));
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    /// Signed horizontal speed; the sign is the travel direction.
    pub speed: f32,
    pub image: ImageHandle,
}

impl Projectile {
    pub fn new(center_x: f32, center_y: f32, direction: i32, image: ImageHandle) -> Self {
        Projectile {
            rect: Rect::from_center(center_x, center_y, image.width, image.height),
            speed: PROJECTILE_SPEED * direction as f32,
            image,
        }
    }

    /// Moves one frame. Returns `false` once the projectile has left the
    /// horizontal span `[0, screen_width]` and should be dropped.
    pub fn update(&mut self, screen_width: f32) -> bool {
        self.rect.x += self.speed;
        !(self.rect.right() < 0.0 || self.rect.left() > screen_width)
    }
}

impl Entity for Projectile {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        renderer.draw_image(&self.image, camera.apply(&self.rect));
    }
}
