//! Procedurally generated levels.
//!
//! A level owns its platforms, enemies, collectibles and door. It is
//! generated once from a random source and never turned into the next
//! level in place: the game replaces it with a fresh instance.

use log::{debug, info};
use rand::Rng;

use crate::assets::GameAssets;
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::entities::{collide, Collectible, CollectibleKind, Door, Entity, Platform, PlatformId};
use crate::host::{Audio, Color, Font, Renderer};
use crate::player::Player;

// ── Layout tables ─────────────────────────────────────────────────────────────

const MIN_ENEMIES: usize = 3;
const MAX_ENEMIES: usize = 6;
const EXTRA_PLATFORMS: usize = 2;

const START_PLATFORM_WIDTH: f32 = 300.0;
/// Height of the starting platform above the bottom of the screen.
const START_PLATFORM_LIFT: f32 = 50.0;
const MIN_PLATFORM_WIDTH: i32 = 200;
const MAX_PLATFORM_WIDTH: i32 = 400;
const VERTICAL_GAP: f32 = 150.0;

/// Horizontal inset of spawned enemies and of the player from a platform's
/// left edge.
const SPAWN_INSET: f32 = 50.0;
const ENEMY_DROP: f32 = 50.0;
const DOOR_INSET: f32 = 100.0;
const DOOR_LIFT: f32 = 50.0;
const COLLECTIBLE_LIFT: f32 = 100.0;

/// Every level whose number is a multiple of this gets a boss.
pub const BOSS_LEVEL_INTERVAL: u32 = 3;
const BOSS_HEALTH: i32 = 200;

pub const PROJECTILE_DAMAGE: i32 = 25;

const GUIDANCE_TEXT: &str = "Reach the door to complete the level!";
const GUIDANCE_TRIGGER_X: f32 = 100.0;
const GUIDANCE_LIFT: f32 = 40.0;

pub struct Level {
    pub level_number: u32,
    /// Index 0 is always the starting platform.
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub door: Option<Door>,
    pub is_completed: bool,
    /// `(text, trigger_x)`: shown while the player is left of `trigger_x`.
    pub guidance_messages: Vec<(String, f32)>,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Level {
    /// Generates level `level_number` and stands `player` on its starting
    /// platform.
    pub fn new(
        level_number: u32,
        player: &mut Player,
        assets: &GameAssets,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let mut level = Level {
            level_number,
            platforms: Vec::new(),
            enemies: Vec::new(),
            collectibles: Vec::new(),
            door: None,
            is_completed: false,
            guidance_messages: Vec::new(),
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        };
        level.generate(player, assets, rng);
        info!(
            "generated level {}: {} platforms, {} enemies",
            level.level_number,
            level.platforms.len(),
            level.enemies.len()
        );
        level
    }

    fn generate(&mut self, player: &mut Player, assets: &GameAssets, rng: &mut impl Rng) {
        let enemy_count = rng.gen_range(MIN_ENEMIES..=MAX_ENEMIES);
        let platform_count = enemy_count + EXTRA_PLATFORMS;

        // 1. Starting platform near the bottom.
        let start_y = self.screen_height - START_PLATFORM_LIFT;
        let start_x = rng.gen_range(0..=(self.screen_width - START_PLATFORM_WIDTH) as i32) as f32;
        self.platforms
            .push(Platform::new(start_x, start_y, START_PLATFORM_WIDTH));

        // 2. Stack the rest upwards. The first stacked platform sits two gaps
        //    above the start, which the boosted start jump covers.
        let mut previous_top = start_y - VERTICAL_GAP;
        for _ in 0..platform_count {
            let width = rng.gen_range(MIN_PLATFORM_WIDTH..=MAX_PLATFORM_WIDTH);
            let x = rng.gen_range(0..=(self.screen_width as i32 - width)) as f32;
            let y = previous_top - VERTICAL_GAP;
            self.platforms.push(Platform::new(x, y, width as f32));
            previous_top = y;
        }

        // 3. Enemies on any platform but the start; several may share one.
        for _ in 0..enemy_count {
            let index = rng.gen_range(1..self.platforms.len());
            let rect = self.platforms[index].rect;
            self.enemies.push(Enemy::new(
                rect.left() + SPAWN_INSET,
                rect.top() - ENEMY_DROP,
                PlatformId(index),
                assets.enemy.clone(),
                assets.sounds.enemy_hit.clone(),
            ));
        }

        // 4. Door on the topmost platform.
        let top = self.platforms[self.platforms.len() - 1].rect;
        let door = Door::new(top.right() - DOOR_INSET, top.top() - DOOR_LIFT);

        // 5. One health pickup above a random platform.
        let chosen = self.platforms[rng.gen_range(0..self.platforms.len())].rect;
        self.collectibles.push(Collectible::new(
            chosen.center_x(),
            chosen.top() - COLLECTIBLE_LIFT,
            CollectibleKind::Health,
            assets.health_collectible.clone(),
        ));

        // 6. Boss levels: a boss sweeping the top of the level and an extra
        //    life beside the door.
        if self.level_number % BOSS_LEVEL_INTERVAL == 0 {
            self.enemies.push(Enemy::boss(
                self.screen_width / 2.0,
                top.top(),
                BOSS_HEALTH,
                assets.boss.clone(),
                assets.sounds.enemy_hit.clone(),
            ));
            let life = &assets.life_collectible;
            self.collectibles.push(Collectible::new(
                door.rect.left() - life.width - 10.0,
                top.top() - life.height,
                CollectibleKind::Life,
                life.clone(),
            ));
        }
        self.door = Some(door);

        self.guidance_messages
            .push((GUIDANCE_TEXT.to_string(), GUIDANCE_TRIGGER_X));

        let start = self.platforms[0].rect;
        player.rect.set_bottom(start.top());
        player.rect.x = start.left() + SPAWN_INSET;
    }

    pub fn starting_platform(&self) -> PlatformId {
        PlatformId(0)
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    pub fn update(&mut self, player: &mut Player, audio: &mut dyn Audio) {
        for enemy in &mut self.enemies {
            enemy.update(&self.platforms);
        }

        // Contact damage every frame of overlap; there is no invulnerability
        // window.
        for enemy in &self.enemies {
            if collide(enemy, &*player) {
                player.take_damage(enemy.contact_damage(), audio);
            }
        }

        if player.health <= 0 {
            self.lose_life(player);
        }

        if player.rect.top() > self.screen_height {
            debug!("player fell out of level {}", self.level_number);
            self.lose_life(player);
        }

        if let Some(door) = &self.door {
            if !self.is_completed && collide(door, &*player) {
                info!("level {} complete", self.level_number);
                self.is_completed = true;
            }
        }

        let (touched, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.collectibles)
            .into_iter()
            .partition(|c| collide(c, &*player));
        for collectible in &touched {
            collectible.apply_effect(player);
        }
        self.collectibles = remaining;

        self.resolve_projectile_hits(player, audio);
    }

    /// Each projectile damages the first enemy it overlaps and is spent.
    fn resolve_projectile_hits(&mut self, player: &mut Player, audio: &mut dyn Audio) {
        let enemies = &mut self.enemies;
        let mut gained = 0;
        player.projectiles.retain(|projectile| {
            let Some(index) = enemies
                .iter()
                .position(|e| e.rect.colliderect(&projectile.rect))
            else {
                return true;
            };
            if enemies[index].take_damage(PROJECTILE_DAMAGE, audio) {
                let dead = enemies.remove(index);
                debug!("enemy killed, boss: {}", dead.is_boss());
                gained += dead.kill_score();
            }
            false
        });
        player.score += gained;
    }

    /// Costs a life; while lives remain the player respawns on the start
    /// platform. With none left the player is left as is for the game to
    /// notice.
    fn lose_life(&self, player: &mut Player) {
        player.lose_life();
        if player.lives > 0 {
            self.reset_player_position(player);
        }
    }

    pub fn reset_player_position(&self, player: &mut Player) {
        let start = self.platforms[self.starting_platform().0].rect;
        player.rect.set_bottom(start.top());
        player.rect.x = start.left() + SPAWN_INSET;
        player.health = player.max_health;
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    pub fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        for platform in &self.platforms {
            platform.draw(renderer, camera);
        }
        for enemy in &self.enemies {
            enemy.draw(renderer, camera);
        }
        for collectible in &self.collectibles {
            collectible.draw(renderer, camera);
        }
        if let Some(door) = &self.door {
            door.draw(renderer, camera);
        }
    }

    pub fn draw_guidance(&self, renderer: &mut dyn Renderer, camera: &Camera, player: &Player) {
        let at = camera.apply(&player.rect);
        for (message, trigger_x) in &self.guidance_messages {
            if player.rect.x < *trigger_x {
                renderer.draw_text(message, (at.x, at.y - GUIDANCE_LIFT), Color::YELLOW, Font::Hud);
            }
        }
    }
}
