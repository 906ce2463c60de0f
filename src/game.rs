//! Session orchestration.
//!
//! [`Game`] owns everything that lives for a whole session: the player,
//! the active level, camera, timer and the PLAYING / GAME_OVER state
//! machine. The host feeds it edge-triggered [`Action`]s and held movement
//! flags, then calls [`Game::update`] and [`Game::draw`] once per frame.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::{play, AssetCatalog, GameAssets};
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::entities::Entity;
use crate::error::AssetError;
use crate::host::{Audio, Clock, Color, Renderer};
use crate::hud::{draw_game_over, draw_hud, ControlDisplay};
use crate::level::Level;
use crate::player::Player;
use crate::timer::Timer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Discrete input events. Each one fires once per key press, never while
/// a key is merely held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Jump,
    Shoot,
    RestartLevel,
    RestartGame,
}

pub struct Game {
    pub player: Player,
    pub level: Level,
    pub camera: Camera,
    pub timer: Timer,
    pub status: GameStatus,
    pub level_number: u32,
    config: GameConfig,
    assets: GameAssets,
    controls: ControlDisplay,
    rng: StdRng,
    level_restart_requested: bool,
}

impl Game {
    /// Resolves assets and generates level 1. Fails only when a required
    /// sprite is missing from `catalog`.
    pub fn new(config: GameConfig, catalog: &AssetCatalog, clock: &dyn Clock) -> Result<Self, AssetError> {
        let assets = GameAssets::load(catalog)?;
        let controls = ControlDisplay::new(catalog, config.screen_width);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (x, y) = config.player_spawn();
        let mut player = Player::new(x, y, config.screen_width, &assets);
        let level = Level::new(1, &mut player, &assets, &config, &mut rng);
        let mut camera = Camera::new(config.screen_width, config.screen_height);
        camera.update(&player.rect);
        let timer = Timer::new(config.level_time_limit, clock.now_ms());

        Ok(Game {
            player,
            level,
            camera,
            timer,
            status: GameStatus::Playing,
            level_number: 1,
            config,
            assets,
            controls,
            rng,
            level_restart_requested: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Starts the background music loop.
    pub fn start(&mut self, audio: &mut dyn Audio) {
        if let Some(music) = &self.assets.sounds.music {
            audio.play_music(music);
        }
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn set_movement(&mut self, left: bool, right: bool) {
        self.player.move_left = left;
        self.player.move_right = right;
    }

    pub fn handle_action(&mut self, action: Action, clock: &dyn Clock, audio: &mut dyn Audio) {
        match (self.status, action) {
            (GameStatus::Playing, Action::Jump) => {
                self.player.jump(self.level.starting_platform(), audio);
            }
            (GameStatus::Playing, Action::Shoot) => self.player.shoot(audio),
            // Applied at the end of the next update.
            (GameStatus::Playing, Action::RestartLevel) => self.level_restart_requested = true,
            (GameStatus::Playing, Action::RestartGame) => {}
            (GameStatus::GameOver, Action::RestartGame) => {
                info!("restarting game");
                self.restart(1, clock);
                self.start(audio);
            }
            (GameStatus::GameOver, Action::RestartLevel) => {
                info!("restarting level {}", self.level_number);
                self.restart(self.level_number, clock);
                self.start(audio);
            }
            (GameStatus::GameOver, _) => {}
        }
    }

    // ── Frame step ───────────────────────────────────────────────────────────

    /// Advances one frame: player, level, camera, timer, then transitions.
    /// Does nothing while the game is over.
    pub fn update(&mut self, clock: &dyn Clock, audio: &mut dyn Audio) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.player.update(&self.level.platforms);
        self.level.update(&mut self.player, audio);
        self.camera.update(&self.player.rect);
        self.timer.update(clock.now_ms());

        if self.level.is_completed {
            self.level_number += 1;
            self.regenerate_level();
            self.timer.reset(self.config.level_time_limit, clock.now_ms());
        }

        if self.player.lives == 0 || self.timer.is_expired() {
            info!(
                "game over on level {} (lives {}, time left {:.1}s, score {})",
                self.level_number, self.player.lives, self.timer.time_left, self.player.score
            );
            self.status = GameStatus::GameOver;
            self.level_restart_requested = false;
            audio.stop_music();
            play(audio, &self.assets.sounds.game_over);
            return;
        }

        if self.level_restart_requested {
            self.level_restart_requested = false;
            info!("restarting level {}", self.level_number);
            self.restart(self.level_number, clock);
        }
    }

    /// Full player reset on a freshly generated `level_number`.
    fn restart(&mut self, level_number: u32, clock: &dyn Clock) {
        let (x, y) = self.config.player_spawn();
        self.player.reset(x, y);
        self.level_number = level_number;
        self.regenerate_level();
        self.timer.reset(self.config.level_time_limit, clock.now_ms());
        self.status = GameStatus::Playing;
    }

    /// Replaces the level wholesale; the old one's entities are dropped.
    fn regenerate_level(&mut self) {
        self.level = Level::new(
            self.level_number,
            &mut self.player,
            &self.assets,
            &self.config,
            &mut self.rng,
        );
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        match self.status {
            GameStatus::Playing => {
                renderer.fill(Color::SKY_BLUE);
                self.level.draw(renderer, &self.camera);
                self.player.draw(renderer, &self.camera);
                draw_hud(renderer, &self.player, &self.timer);
                self.controls.draw(renderer);
                self.level.draw_guidance(renderer, &self.camera, &self.player);
            }
            GameStatus::GameOver => draw_game_over(renderer),
        }
    }
}
