use platformer::assets::{AssetCatalog, GameAssets};
use platformer::camera::Camera;
use platformer::entities::{Collectible, CollectibleKind, Door, Projectile};
use platformer::geometry::Rect;
use platformer::player::Player;
use platformer::timer::Timer;

fn assets() -> GameAssets {
    GameAssets::load(&AssetCatalog::builtin()).unwrap()
}

fn player() -> Player {
    Player::new(100.0, 100.0, 800.0, &assets())
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.colliderect(&Rect::new(9.0, 9.0, 10.0, 10.0)));
    assert!(!a.colliderect(&Rect::new(10.0, 0.0, 10.0, 10.0))); // shares an edge
    assert!(!a.colliderect(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    assert!(!a.colliderect(&Rect::new(5.0, 5.0, 0.0, 0.0))); // empty
}

#[test]
fn rect_clamps_negative_size() {
    let r = Rect::new(0.0, 0.0, -5.0, 3.0);
    assert_eq!(r.width, 0.0);
    assert_eq!(r.height, 3.0);
}

#[test]
fn rect_anchors() {
    let r = Rect::from_midbottom(100.0, 200.0, 50.0, 80.0);
    assert_eq!((r.center_x(), r.bottom()), (100.0, 200.0));
    let c = Rect::from_center(10.0, 20.0, 4.0, 6.0);
    assert_eq!((c.center_x(), c.center_y()), (10.0, 20.0));
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_lives_until_fully_off_the_left() {
    let mut p = Projectile::new(25.0, 100.0, -1, assets().projectile); // x = 10, width 30
    assert!(p.update(800.0)); // x=0
    assert!(p.update(800.0)); // x=-10, right=20
    assert!(p.update(800.0)); // right=10
    assert!(p.update(800.0)); // right=0, not yet < 0
    assert!(!p.update(800.0)); // right=-10
}

#[test]
fn projectile_lives_until_past_the_right() {
    let mut p = Projectile::new(785.0, 100.0, 1, assets().projectile); // x = 770
    assert!(p.update(800.0)); // 780
    assert!(p.update(800.0)); // 790
    assert!(p.update(800.0)); // 800, not yet > 800
    assert!(!p.update(800.0)); // 810
}

// ── Collectible ───────────────────────────────────────────────────────────────

#[test]
fn health_pickup_is_clamped_and_scores() {
    let a = assets();
    let mut p = player();
    p.health = 90;
    Collectible::new(0.0, 0.0, CollectibleKind::Health, a.health_collectible).apply_effect(&mut p);
    assert_eq!(p.health, 100);
    assert_eq!(p.score, 50);
}

#[test]
fn health_pickup_at_full_health_still_scores() {
    let a = assets();
    let mut p = player();
    Collectible::new(0.0, 0.0, CollectibleKind::Health, a.health_collectible).apply_effect(&mut p);
    assert_eq!(p.health, 100);
    assert_eq!(p.score, 50);
}

#[test]
fn life_pickup_adds_a_life() {
    let a = assets();
    let mut p = player();
    Collectible::new(0.0, 0.0, CollectibleKind::Life, a.life_collectible).apply_effect(&mut p);
    assert_eq!(p.lives, 4);
    assert_eq!(p.score, 50);
}

#[test]
fn door_is_anchored_at_midbottom() {
    let d = Door::new(300.0, 100.0);
    assert_eq!(d.rect, Rect::new(275.0, 20.0, 50.0, 80.0));
}

// ── Camera ────────────────────────────────────────────────────────────────────

#[test]
fn camera_centres_target() {
    let mut cam = Camera::new(800.0, 600.0);
    let target = Rect::new(100.0, -500.0, 40.0, 60.0);
    cam.update(&target);
    assert_eq!(cam.offset, (120.0 - 400.0, -470.0 - 300.0));

    let on_screen = cam.apply(&target);
    assert_eq!(on_screen.center_x(), 400.0);
    assert_eq!(on_screen.center_y(), 300.0);
}

#[test]
fn camera_follows_instantly() {
    let mut cam = Camera::new(800.0, 600.0);
    cam.update(&Rect::new(0.0, 0.0, 40.0, 60.0));
    cam.update(&Rect::new(1000.0, 0.0, 40.0, 60.0));
    assert_eq!(cam.offset.0, 1020.0 - 400.0);
}

// ── Timer ─────────────────────────────────────────────────────────────────────

#[test]
fn timer_counts_down_from_absolute_start() {
    let mut t = Timer::new(120.0, 1_000);
    t.update(31_000);
    assert_eq!(t.time_left, 90.0);
    t.update(31_000);
    assert_eq!(t.time_left, 90.0); // repeated updates do not accumulate
    assert!(!t.is_expired());
}

#[test]
fn timer_expires_past_limit() {
    let mut t = Timer::new(120.0, 0);
    t.update(120_500);
    assert!(t.time_left < 0.0);
    assert!(t.is_expired());
    assert_eq!(t.whole_seconds_left(), 0);
}

#[test]
fn timer_reset_restarts_clock_and_limit() {
    let mut t = Timer::new(120.0, 0);
    t.update(100_000);
    t.reset(60.0, 100_000);
    assert_eq!(t.time_left, 60.0);
    t.update(110_500);
    assert_eq!(t.time_left, 49.5);
    assert_eq!(t.whole_seconds_left(), 49);
}
