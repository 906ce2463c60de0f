use std::cell::Cell;

use platformer::assets::{AssetCatalog, ImageHandle, SoundHandle};
use platformer::config::GameConfig;
use platformer::error::AssetError;
use platformer::game::{Action, Game, GameStatus};
use platformer::geometry::Rect;
use platformer::host::{Audio, Clock, Color, Fill, Font, Renderer};

struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    fn new() -> Self {
        ManualClock { now: Cell::new(0) }
    }

    fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[derive(Default)]
struct RecordingAudio {
    log: Vec<String>,
}

impl Audio for RecordingAudio {
    fn play_sound(&mut self, sound: &SoundHandle) {
        self.log.push(sound.key.clone());
    }
    fn play_music(&mut self, music: &SoundHandle) {
        self.log.push(format!("music:{}", music.key));
    }
    fn stop_music(&mut self) {
        self.log.push("music:stop".to_string());
    }
}

#[derive(Debug, PartialEq)]
enum Op {
    Fill(Color),
    Image(String),
    Rect(Color, Rect),
    Text(String),
}

#[derive(Default)]
struct RecordingRenderer {
    ops: Vec<Op>,
}

impl Renderer for RecordingRenderer {
    fn screen_size(&self) -> (f32, f32) {
        (800.0, 600.0)
    }
    fn fill(&mut self, color: Color) {
        self.ops.push(Op::Fill(color));
    }
    fn draw_image(&mut self, image: &ImageHandle, _at: Rect) {
        self.ops.push(Op::Image(image.key.clone()));
    }
    fn draw_rect(&mut self, color: Color, rect: Rect, _fill: Fill) {
        self.ops.push(Op::Rect(color, rect));
    }
    fn draw_text(&mut self, text: &str, _at: (f32, f32), _color: Color, _font: Font) {
        self.ops.push(Op::Text(text.to_string()));
    }
    fn text_width(&self, text: &str, _font: Font) -> f32 {
        text.len() as f32 * 10.0
    }
}

fn make_game(clock: &ManualClock) -> Game {
    Game::new(GameConfig::new().with_seed(42), &AssetCatalog::builtin(), clock).unwrap()
}

/// Drives the game into GAME_OVER by running out the clock.
fn expire(game: &mut Game, clock: &ManualClock, audio: &mut RecordingAudio) {
    clock.set(clock.now_ms() + 120_500);
    game.update(clock, audio);
    assert_eq!(game.status, GameStatus::GameOver);
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_game_starts_playing_on_level_one() {
    let clock = ManualClock::new();
    let game = make_game(&clock);
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.level_number, 1);
    assert_eq!(game.level.level_number, 1);
    assert_eq!(game.player.lives, 3);
    assert_eq!(game.timer.time_left, 120.0);
}

#[test]
fn seeded_games_generate_identical_levels() {
    let clock = ManualClock::new();
    let a = make_game(&clock);
    let b = make_game(&clock);
    assert_eq!(a.level.platforms, b.level.platforms);
}

#[test]
fn missing_player_sprite_is_fatal() {
    let clock = ManualClock::new();
    let mut catalog = AssetCatalog::new();
    catalog.register_image("enemy", 40.0, 40.0);
    let result = Game::new(GameConfig::new(), &catalog, &clock);
    assert_eq!(
        result.err(),
        Some(AssetError::MissingImage("player".to_string()))
    );
}

#[test]
fn start_plays_background_music() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.start(&mut audio);
    assert_eq!(audio.log, vec!["music:background_music"]);
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn jump_action_from_start_platform() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.update(&clock, &mut audio);
    assert!(game.player.on_ground);

    game.handle_action(Action::Jump, &clock, &mut audio);
    assert_eq!(game.player.vel_y, -25.0);
    assert_eq!(audio.log, vec!["jump"]);
}

#[test]
fn shoot_action_spawns_projectile() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.handle_action(Action::Shoot, &clock, &mut audio);
    assert_eq!(game.player.projectiles.len(), 1);
}

#[test]
fn movement_flags_reach_the_player() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    game.set_movement(true, false);
    assert!(game.player.move_left);
    assert!(!game.player.move_right);
}

#[test]
fn restart_level_while_playing_applies_after_update() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.player.score = 77;
    game.player.lives = 2;

    game.handle_action(Action::RestartLevel, &clock, &mut audio);
    assert_eq!(game.player.score, 77);

    game.update(&clock, &mut audio);
    assert_eq!(game.player.score, 0);
    assert_eq!(game.player.lives, 3);
    assert_eq!(game.level_number, 1);
    assert_eq!(game.status, GameStatus::Playing);
}

#[test]
fn restart_game_is_ignored_while_playing() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.player.score = 10;
    game.handle_action(Action::RestartGame, &clock, &mut audio);
    game.update(&clock, &mut audio);
    assert_eq!(game.player.score, 10);
}

#[test]
fn completing_level_advances_and_keeps_stats() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.level.enemies.clear();
    game.player.score = 123;
    game.player.lives = 2;
    let door = game.level.door.as_ref().unwrap().rect;
    game.player.rect.x = door.x;
    game.player.rect.y = door.y;

    clock.set(10_000);
    game.update(&clock, &mut audio);

    assert_eq!(game.level_number, 2);
    assert_eq!(game.level.level_number, 2);
    assert!(!game.level.is_completed);
    assert!(game.player.score >= 123);
    assert_eq!(game.player.lives, 2);
    assert_eq!(game.timer.time_left, 120.0);
    assert_eq!(
        game.player.rect.bottom(),
        game.level.platforms[0].rect.top()
    );
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn losing_last_life_ends_game() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.player.lives = 1;
    game.player.health = 0;

    game.update(&clock, &mut audio);
    assert_eq!(game.status, GameStatus::GameOver);
    assert!(game.is_game_over());
    assert_eq!(game.player.lives, 0);
    assert_eq!(audio.log, vec!["music:stop", "game_over"]);

    // Frozen: further updates change nothing.
    let rect = game.player.rect;
    game.update(&clock, &mut audio);
    assert_eq!(game.player.rect, rect);
    assert_eq!(game.player.lives, 0);
}

#[test]
fn timer_expiry_ends_game_with_lives_left() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    expire(&mut game, &clock, &mut audio);
    assert_eq!(game.player.lives, 3);
    assert!(game.timer.time_left < 0.0);
}

#[test]
fn game_over_ignores_play_actions() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    expire(&mut game, &clock, &mut audio);

    game.handle_action(Action::Shoot, &clock, &mut audio);
    game.handle_action(Action::Jump, &clock, &mut audio);
    assert!(game.player.projectiles.is_empty());
    assert_eq!(game.status, GameStatus::GameOver);
}

#[test]
fn restart_game_from_game_over() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.level_number = 4;
    game.player.score = 500;
    expire(&mut game, &clock, &mut audio);

    audio.log.clear();
    game.handle_action(Action::RestartGame, &clock, &mut audio);
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.level_number, 1);
    assert_eq!(game.level.level_number, 1);
    assert_eq!(game.player.score, 0);
    assert_eq!(game.player.lives, 3);
    assert_eq!(game.timer.time_left, 120.0);
    assert_eq!(audio.log, vec!["music:background_music"]);
}

#[test]
fn restart_level_from_game_over_keeps_level_number() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    game.level_number = 2;
    expire(&mut game, &clock, &mut audio);

    game.handle_action(Action::RestartLevel, &clock, &mut audio);
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.level.level_number, 2);
    assert_eq!(game.player.lives, 3);
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[test]
fn playing_frame_has_world_and_hud() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    game.player.health = 50;
    let mut r = RecordingRenderer::default();
    game.draw(&mut r);

    assert_eq!(r.ops[0], Op::Fill(Color::SKY_BLUE));
    assert!(r.ops.contains(&Op::Image("player".to_string())));
    assert!(r.ops.contains(&Op::Rect(
        Color::GREEN,
        Rect::new(22.0, 22.0, 100.0, 20.0)
    )));
    assert!(r.ops.contains(&Op::Text("Lives: 3".to_string())));
    assert!(r.ops.contains(&Op::Text("Score: 0".to_string())));
    assert!(r.ops.contains(&Op::Text("Time Left: 120s".to_string())));
    for label in ["Move Left", "Move Right", "Jump", "Shoot"] {
        assert!(r.ops.contains(&Op::Text(label.to_string())));
    }
}

#[test]
fn hud_health_bar_never_goes_negative() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    game.player.health = -40;
    let mut r = RecordingRenderer::default();
    game.draw(&mut r);
    assert!(r.ops.contains(&Op::Rect(
        Color::GREEN,
        Rect::new(22.0, 22.0, 0.0, 20.0)
    )));
}

#[test]
fn game_over_frame_is_only_the_game_over_screen() {
    let clock = ManualClock::new();
    let mut game = make_game(&clock);
    let mut audio = RecordingAudio::default();
    expire(&mut game, &clock, &mut audio);

    let mut r = RecordingRenderer::default();
    game.draw(&mut r);
    assert_eq!(
        r.ops,
        vec![
            Op::Fill(Color::BLACK),
            Op::Text("Game Over".to_string()),
            Op::Text("Press R to Restart Game".to_string()),
            Op::Text("Press L to Restart Level".to_string()),
        ]
    );
}
