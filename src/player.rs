//! The controllable actor: movement, gravity, jumping, platform
//! collision, health / lives / score and shooting.

use log::debug;

use crate::assets::{play, GameAssets, ImageHandle, Sounds};
use crate::camera::Camera;
use crate::entities::{Entity, Platform, PlatformId, Projectile};
use crate::geometry::Rect;
use crate::host::{Audio, Renderer};

// ── Per-frame tuning (assumes the default tick rate) ────────────────────────

pub const PLAYER_SPEED: f32 = 5.0;
pub const MAX_HEALTH: i32 = 100;
pub const START_LIVES: u32 = 3;

const GRAVITY: f32 = 0.5;
const TERMINAL_VELOCITY: f32 = 10.0;
const AIR_CONTROL: f32 = 1.5;
const JUMP_VELOCITY: f32 = -15.0;
/// The starting platform sits further below the first stacked platform,
/// so jumping off it gets a boost.
const START_JUMP_VELOCITY: f32 = -25.0;

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub vel_y: f32,
    pub speed: f32,
    pub on_ground: bool,
    /// Facing: `1` right, `-1` left.
    pub direction: i32,
    pub health: i32,
    pub max_health: i32,
    pub lives: u32,
    pub score: u32,
    /// Platform stood on this frame, re-derived every update.
    pub current_platform: Option<PlatformId>,
    pub projectiles: Vec<Projectile>,
    pub move_left: bool,
    pub move_right: bool,
    screen_width: f32,
    image: ImageHandle,
    projectile_image: ImageHandle,
    sounds: Sounds,
}

impl Player {
    pub fn new(x: f32, y: f32, screen_width: f32, assets: &GameAssets) -> Self {
        Player {
            rect: Rect::new(x, y, assets.player.width, assets.player.height),
            vel_y: 0.0,
            speed: PLAYER_SPEED,
            on_ground: false,
            direction: 1,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            lives: START_LIVES,
            score: 0,
            current_platform: None,
            projectiles: Vec::new(),
            move_left: false,
            move_right: false,
            screen_width,
            image: assets.player.clone(),
            projectile_image: assets.projectile.clone(),
            sounds: assets.sounds.clone(),
        }
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    /// Advances one frame against `platforms`.
    ///
    /// Collision is resolved per platform against the prospective rect.
    /// The scan never breaks early, so every overlapping platform gets its
    /// say on `dx` and `dy` in list order.
    pub fn update(&mut self, platforms: &[Platform]) {
        let mut dx = 0.0;
        if self.move_left {
            dx = -self.speed;
            self.direction = -1;
        }
        // Checked second: with both keys held, right wins.
        if self.move_right {
            dx = self.speed;
            self.direction = 1;
        }

        // on_ground is still last frame's value here.
        if !self.on_ground {
            dx *= AIR_CONTROL;
        }

        self.vel_y = (self.vel_y + GRAVITY).min(TERMINAL_VELOCITY);
        let mut dy = self.vel_y;

        self.on_ground = false;
        self.current_platform = None;
        for (index, platform) in platforms.iter().enumerate() {
            if platform.rect.colliderect(&self.rect.moved(dx, 0.0)) {
                dx = 0.0;
            }
            if platform.rect.colliderect(&self.rect.moved(0.0, dy)) {
                if self.vel_y > 0.0 {
                    self.rect.set_bottom(platform.rect.top());
                    self.vel_y = 0.0;
                    self.on_ground = true;
                    self.current_platform = Some(PlatformId(index));
                } else if self.vel_y < 0.0 {
                    self.rect.set_top(platform.rect.bottom());
                    self.vel_y = 0.0;
                }
                dy = 0.0;
            }
        }

        self.rect.x += dx;
        self.rect.y += dy;

        let screen_width = self.screen_width;
        self.projectiles.retain_mut(|p| p.update(screen_width));
    }

    // ── Actions ──────────────────────────────────────────────────────────────

    /// No-op unless standing on a platform.
    pub fn jump(&mut self, starting_platform: PlatformId, audio: &mut dyn Audio) {
        if !self.on_ground {
            return;
        }
        self.vel_y = if self.current_platform == Some(starting_platform) {
            START_JUMP_VELOCITY
        } else {
            JUMP_VELOCITY
        };
        play(audio, &self.sounds.jump);
    }

    pub fn shoot(&mut self, audio: &mut dyn Audio) {
        let projectile = Projectile::new(
            self.rect.center_x(),
            self.rect.center_y(),
            self.direction,
            self.projectile_image.clone(),
        );
        self.projectiles.push(projectile);
        play(audio, &self.sounds.shoot);
    }

    /// Health may go below zero here; the level decides what that costs.
    pub fn take_damage(&mut self, amount: i32, audio: &mut dyn Audio) {
        self.health -= amount;
        play(audio, &self.sounds.player_hurt);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.health = self.max_health;
        debug!("player lost a life, {} left", self.lives);
    }

    /// Full reset for a new game: position, health, lives, score and
    /// projectiles.
    pub fn reset(&mut self, x: f32, y: f32) {
        self.rect.x = x;
        self.rect.y = y;
        self.health = self.max_health;
        self.lives = START_LIVES;
        self.score = 0;
        self.projectiles.clear();
    }

    /// Health as a fraction of max, clamped to `[0, 1]`.
    pub fn health_ratio(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

impl Entity for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        renderer.draw_image(&self.image, camera.apply(&self.rect));
        for projectile in &self.projectiles {
            projectile.draw(renderer, camera);
        }
    }
}
