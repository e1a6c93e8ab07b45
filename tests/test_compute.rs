use glam::Vec2;
use paperboy::assets::Assets;
use paperboy::compute::*;
use paperboy::consts::*;
use paperboy::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn assets() -> Assets {
    Assets::placeholders()
}

fn make_state(assets: &Assets) -> GameState {
    init_state(assets)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn house_at(assets: &Assets, x: f32, y: f32, lane: Lane) -> Target {
    Target {
        body: Body::new(
            Vec2::new(x, y),
            assets.size(assets.houses[0]),
            Vec2::new(-TARGET_SPEED, 0.0),
            assets.houses[0],
        ),
        lane,
    }
}

fn obstacle_at(assets: &Assets, x: f32, y: f32) -> Obstacle {
    Obstacle {
        body: Body::new(
            Vec2::new(x, y),
            assets.size(assets.obstacles[0]),
            Vec2::new(-3.0, 0.0),
            assets.obstacles[0],
        ),
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let a = assets();
    let s = make_state(&a);
    assert_eq!(s.player.body.pos, Vec2::new(50.0, 384.0));
    assert_eq!(s.player.lives, 3);
    assert_eq!(s.player.score, 0);
    assert_eq!(s.player.state(), PlayerState::Normal);
}

#[test]
fn init_state_empty_arenas() {
    let a = assets();
    let s = make_state(&a);
    assert!(s.projectiles.is_empty());
    assert!(s.obstacles.is_empty());
    assert!(s.targets.is_empty());
    assert!(s.background.decorations.is_empty());
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn init_state_lays_street_tiles() {
    let a = assets();
    let s = make_state(&a);
    assert_eq!(s.background.tiles, vec![0.0, 1024.0]);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn move_up_normal() {
    let a = assets();
    let s = make_state(&a);
    let s2 = move_player_up(&s);
    assert_eq!(s2.player.body.pos.y, 379.0); // step is 5
}

#[test]
fn move_down_normal() {
    let a = assets();
    let s = make_state(&a);
    let s2 = move_player_down(&s);
    assert_eq!(s2.player.body.pos.y, 389.0);
}

#[test]
fn move_up_clamps_at_band_top() {
    let a = assets();
    let mut s = make_state(&a);
    s.player.body.pos.y = PAPERBOY_MIN_Y + 2.0;
    let s2 = move_player_up(&s);
    assert_eq!(s2.player.body.pos.y, PAPERBOY_MIN_Y);
}

#[test]
fn move_down_clamps_at_band_bottom() {
    let a = assets();
    let mut s = make_state(&a);
    s.player.body.pos.y = s.player.max_y() - 1.0;
    let s2 = move_player_down(&s);
    assert_eq!(s2.player.body.pos.y, s.player.max_y());
}

#[test]
fn move_only_changes_y() {
    let a = assets();
    let s = make_state(&a);
    let s2 = move_player_down(&move_player_up(&s));
    assert_eq!(s2.player.body.pos, s.player.body.pos);
}

#[test]
fn move_does_not_mutate_original() {
    let a = assets();
    let s = make_state(&a);
    let _s2 = move_player_up(&s);
    let _s3 = move_player_down(&s);
    assert_eq!(s.player.body.pos.y, 384.0);
}

// ── throw_paper ───────────────────────────────────────────────────────────────

#[test]
fn throw_adds_paper_at_leading_edge() {
    let a = assets();
    let s = make_state(&a);
    let s2 = throw_paper(&s, Lane::Top, &a);
    assert_eq!(s2.projectiles.len(), 1);
    let p = &s2.projectiles[0];
    // right edge of the 30px placeholder, vertical centre
    assert_eq!(p.body.pos, Vec2::new(80.0, 399.0));
    assert_eq!(p.body.vel, Vec2::new(PAPER_SPEED, -PAPER_SPEED));
    assert_eq!(p.lane, Lane::Top);
}

#[test]
fn throw_bottom_heads_down() {
    let a = assets();
    let s = make_state(&a);
    let s2 = throw_paper(&s, Lane::Bottom, &a);
    assert_eq!(s2.projectiles[0].body.vel, Vec2::new(PAPER_SPEED, PAPER_SPEED));
    assert_eq!(s2.projectiles[0].lane, Lane::Bottom);
}

#[test]
fn throws_are_not_rate_limited() {
    let a = assets();
    let mut s = make_state(&a);
    for _ in 0..10 {
        s = throw_paper(&s, Lane::Top, &a);
    }
    assert_eq!(s.projectiles.len(), 10);
}

#[test]
fn throw_does_not_mutate_original() {
    let a = assets();
    let s = make_state(&a);
    let _ = throw_paper(&s, Lane::Bottom, &a);
    assert!(s.projectiles.is_empty());
}

#[test]
fn throw_ignored_after_game_over() {
    let a = assets();
    let mut s = make_state(&a);
    s.status = GameStatus::GameOver;
    let s2 = throw_paper(&s, Lane::Top, &a);
    assert!(s2.projectiles.is_empty());
}

// ── tick: frame counter & movement ────────────────────────────────────────────

#[test]
fn tick_increments_frame() {
    let a = assets();
    let mut s = make_state(&a);
    s.frame = 5;
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.frame, 6);
}

#[test]
fn tick_moves_paper() {
    let a = assets();
    let s = throw_paper(&make_state(&a), Lane::Top, &a);
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.projectiles[0].body.pos, Vec2::new(88.0, 391.0));
}

#[test]
fn tick_scrolls_street() {
    let a = assets();
    let s = make_state(&a);
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.background.tiles, vec![-3.0, 1021.0]);
}

#[test]
fn tick_discards_paper_off_screen() {
    let a = assets();
    let mut s = throw_paper(&make_state(&a), Lane::Top, &a);
    let mut rng = seeded_rng();
    // 399 / 8 frames to cross the top edge
    for _ in 0..60 {
        s = tick(&s, &a, &mut rng);
    }
    assert!(s.projectiles.is_empty());
}

#[test]
fn tick_does_not_mutate_original() {
    let a = assets();
    let s = throw_paper(&make_state(&a), Lane::Top, &a);
    let _ = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s.frame, 0);
    assert_eq!(s.projectiles[0].body.pos, Vec2::new(80.0, 399.0));
}

// ── tick: spawning ────────────────────────────────────────────────────────────

#[test]
fn tick_obstacle_spawns_after_interval() {
    let a = assets();
    let mut s = make_state(&a);
    let mut rng = seeded_rng();
    for _ in 0..OBSTACLE_SPAWN_INTERVAL {
        s = tick(&s, &a, &mut rng);
    }
    assert!(s.obstacles.is_empty());
    s = tick(&s, &a, &mut rng);
    assert_eq!(s.obstacles.len(), 1);
    assert_eq!(s.spawner.obstacle_timer, 0);
}

#[test]
fn tick_spawned_obstacle_enters_from_right() {
    let a = assets();
    let mut s = make_state(&a);
    s.spawner.obstacle_timer = OBSTACLE_SPAWN_INTERVAL;
    let s2 = tick(&s, &a, &mut seeded_rng());
    let o = &s2.obstacles[0];
    let speed = -o.body.vel.x;
    assert!((OBSTACLE_MIN_SPEED as f32..=OBSTACLE_MAX_SPEED as f32).contains(&speed));
    assert_eq!(o.body.pos.x, SCREEN_WIDTH - speed); // already moved once
    assert!(o.body.pos.y >= 115.0 && o.body.pos.y <= 576.0);
    assert_eq!(o.body.vel.y, 0.0);
}

#[test]
fn tick_target_spawns_after_interval_in_a_lane() {
    let a = assets();
    let mut s = make_state(&a);
    s.spawner.target_timer = TARGET_SPAWN_INTERVAL;
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.targets.len(), 1);
    let t = &s2.targets[0];
    assert_eq!(t.body.pos.x, SCREEN_WIDTH - TARGET_SPEED);
    assert_eq!(t.body.pos.y, t.lane.y());
    assert_eq!(s2.spawner.target_timer, 0);
}

#[test]
fn tick_no_spawn_before_interval() {
    let a = assets();
    let mut s = make_state(&a);
    s.spawner.obstacle_timer = OBSTACLE_SPAWN_INTERVAL - 1;
    s.spawner.target_timer = TARGET_SPAWN_INTERVAL - 1;
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert!(s2.obstacles.is_empty());
    assert!(s2.targets.is_empty());
}

#[test]
fn tick_is_deterministic_for_a_seed() {
    let a = assets();
    let mut s1 = make_state(&a);
    let mut s2 = make_state(&a);
    let (mut r1, mut r2) = (seeded_rng(), seeded_rng());
    for _ in 0..400 {
        s1 = tick(&s1, &a, &mut r1);
        s2 = tick(&s2, &a, &mut r2);
    }
    assert_eq!(s1, s2);
}

// ── tick: deliveries ──────────────────────────────────────────────────────────

#[test]
fn tick_matching_delivery_scores() {
    let a = assets();
    let mut s = make_state(&a);
    s.targets.push(house_at(&a, 85.0, 385.0, Lane::Top));
    let s = throw_paper(&s, Lane::Top, &a);
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.player.score, 1);
    assert_eq!(s2.player.lives, 3);
    assert!(s2.projectiles.is_empty());
    assert!(s2.targets.is_empty());
}

#[test]
fn tick_mismatched_lane_consumes_without_score() {
    let a = assets();
    let mut s = make_state(&a);
    s.targets.push(house_at(&a, 85.0, 385.0, Lane::Top));
    let s = throw_paper(&s, Lane::Bottom, &a);
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.player.score, 0);
    assert!(s2.projectiles.is_empty());
    assert!(s2.targets.is_empty());
}

// ── tick: obstacles & lives ───────────────────────────────────────────────────

#[test]
fn tick_obstacle_hit_costs_life_and_grants_invincibility() {
    let a = assets();
    let mut s = make_state(&a);
    s.obstacles.push(obstacle_at(&a, 63.0, 390.0));
    s.obstacles.push(obstacle_at(&a, 700.0, 200.0));
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.player.lives, 2);
    assert_eq!(s2.player.invincible_timer, INVINCIBLE_DURATION);
    assert!(s2.obstacles.is_empty()); // every obstacle cleared
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_invincible_player_passes_through() {
    let a = assets();
    let mut s = make_state(&a);
    s.player.lives = 2;
    s.player.invincible_timer = INVINCIBLE_DURATION;
    s.obstacles.push(obstacle_at(&a, 63.0, 390.0));
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.player.lives, 2);
    assert_eq!(s2.player.invincible_timer, INVINCIBLE_DURATION - 1);
    assert_eq!(s2.obstacles.len(), 1);
}

#[test]
fn tick_full_round_deliver_then_crash() {
    let a = assets();
    let mut rng = seeded_rng();

    // frame 1: a top-lane delivery
    let mut s = make_state(&a);
    s.targets.push(house_at(&a, 85.0, 385.0, Lane::Top));
    s = throw_paper(&s, Lane::Top, &a);
    s = tick(&s, &a, &mut rng);
    assert_eq!((s.player.score, s.player.lives), (1, 3));

    // frame 2: run into an obstacle
    s.obstacles.push(obstacle_at(&a, 63.0, 390.0));
    s = tick(&s, &a, &mut rng);
    assert_eq!((s.player.lives, s.player.invincible_timer), (2, 120));
    assert!(s.obstacles.is_empty());

    // frame 3: shielded, the obstacle survives
    s.obstacles.push(obstacle_at(&a, 63.0, 390.0));
    s = tick(&s, &a, &mut rng);
    assert_eq!((s.player.lives, s.player.invincible_timer), (2, 119));
    assert_eq!(s.obstacles.len(), 1);
    assert_eq!(s.player.score, 1);
}

#[test]
fn tick_game_over_on_last_life() {
    let a = assets();
    let mut s = make_state(&a);
    s.player.lives = 1;
    s.obstacles.push(obstacle_at(&a, 63.0, 390.0));
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.player.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.player.state(), PlayerState::Destroyed);
}

#[test]
fn tick_after_game_over_is_a_no_op() {
    let a = assets();
    let mut s = make_state(&a);
    s.player.lives = 1;
    s.obstacles.push(obstacle_at(&a, 63.0, 390.0));
    let over = tick(&s, &a, &mut seeded_rng());
    let later = tick(&over, &a, &mut seeded_rng());
    assert_eq!(later, over);
}

#[test]
fn tick_no_game_over_when_lives_above_zero() {
    let a = assets();
    let mut s = make_state(&a);
    s.player.lives = 2;
    s.obstacles.push(obstacle_at(&a, 63.0, 390.0));
    let s2 = tick(&s, &a, &mut seeded_rng());
    assert_eq!(s2.player.lives, 1);
    assert_eq!(s2.status, GameStatus::Playing);
}
