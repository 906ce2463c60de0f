//! Patrolling enemies.
//!
//! Regular enemies walk back and forth across the platform they were
//! placed on; bosses sweep a fixed world-space range instead. Both are the
//! same type, distinguished by their [`Patrol`].

use crate::assets::{play, ImageHandle, SoundHandle};
use crate::camera::Camera;
use crate::entities::{Entity, Platform, PlatformId};
use crate::geometry::Rect;
use crate::host::{Audio, Color, Fill, Renderer};

pub const ENEMY_HEALTH: i32 = 50;
pub const ENEMY_SPEED: f32 = 1.0;
pub const BOSS_SPEED: f32 = 2.0;
pub const BOSS_RANGE: f32 = 800.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Patrol {
    /// Walks the platform it stands on.
    Platform(PlatformId),
    /// Sweeps `[left, right]` in world x, independent of any platform.
    Range { left: f32, right: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    pub direction: i32,
    pub health: i32,
    pub max_health: i32,
    pub patrol: Patrol,
    image: ImageHandle,
    hit_sound: Option<SoundHandle>,
}

impl Enemy {
    /// Regular enemy, bottom-centred at `(x, bottom)` and bound to `platform`.
    pub fn new(
        x: f32,
        bottom: f32,
        platform: PlatformId,
        image: ImageHandle,
        hit_sound: Option<SoundHandle>,
    ) -> Self {
        Enemy {
            rect: Rect::from_midbottom(x, bottom, image.width, image.height),
            speed: ENEMY_SPEED,
            direction: 1,
            health: ENEMY_HEALTH,
            max_health: ENEMY_HEALTH,
            patrol: Patrol::Platform(platform),
            image,
            hit_sound,
        }
    }

    /// Boss, bottom-centred at `(x, bottom)`, heading left first.
    pub fn boss(
        x: f32,
        bottom: f32,
        health: i32,
        image: ImageHandle,
        hit_sound: Option<SoundHandle>,
    ) -> Self {
        Enemy {
            rect: Rect::from_midbottom(x, bottom, image.width, image.height),
            speed: BOSS_SPEED,
            direction: -1,
            health,
            max_health: health,
            patrol: Patrol::Range {
                left: 0.0,
                right: BOSS_RANGE,
            },
            image,
            hit_sound,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.patrol, Patrol::Range { .. })
    }

    /// Damage dealt to the player per frame of overlap.
    pub fn contact_damage(&self) -> i32 {
        if self.is_boss() {
            10
        } else {
            5
        }
    }

    /// Score awarded to the player for the kill.
    pub fn kill_score(&self) -> u32 {
        if self.is_boss() {
            500
        } else {
            100
        }
    }

    pub fn update(&mut self, platforms: &[Platform]) {
        self.rect.x += self.speed * self.direction as f32;

        match self.patrol {
            Patrol::Platform(PlatformId(index)) => {
                // A dangling index would mean the level dropped a platform;
                // the enemy then just keeps walking.
                if let Some(platform) = platforms.get(index) {
                    if self.rect.left() < platform.rect.left()
                        || self.rect.right() > platform.rect.right()
                    {
                        self.direction = -self.direction;
                    }
                    self.rect.set_bottom(platform.rect.top());
                }
            }
            Patrol::Range { left, right } => {
                if self.rect.left() <= left || self.rect.right() >= right {
                    self.direction = -self.direction;
                }
            }
        }
    }

    /// Returns `true` once health has reached zero. The owner removes dead
    /// enemies from its live set.
    pub fn take_damage(&mut self, amount: i32, audio: &mut dyn Audio) -> bool {
        self.health -= amount;
        play(audio, &self.hit_sound);
        self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn health_ratio(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

impl Entity for Enemy {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        let at = camera.apply(&self.rect);
        renderer.draw_image(&self.image, at);

        let (gap, bar_height) = if self.is_boss() { (15.0, 10.0) } else { (10.0, 5.0) };
        let bar = Rect::new(at.x, at.y - gap, at.width, bar_height);
        renderer.draw_rect(Color::RED, bar, Fill::Solid);
        renderer.draw_rect(
            Color::GREEN,
            Rect::new(bar.x, bar.y, bar.width * self.health_ratio(), bar.height),
            Fill::Solid,
        );
    }
}
