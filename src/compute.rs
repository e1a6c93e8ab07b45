//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the asset set and, where needed, an RNG handle) and
//! returns a brand-new `GameState`. Side effects are limited to the injected
//! RNG.

use glam::Vec2;
use rand::Rng;

use crate::assets::Assets;
use crate::background::ScrollingBackground;
use crate::collision::{self, PlayerHit};
use crate::consts::*;
use crate::entities::{
    compact, update_all, Body, GameState, GameStatus, Lane, Player, Projectile,
};
use crate::spawner::Spawner;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state
pub fn init_state(assets: &Assets) -> GameState {
    GameState {
        player: Player::new(assets.player, assets.size(assets.player)),
        projectiles: Vec::new(),
        obstacles: Vec::new(),
        targets: Vec::new(),
        background: ScrollingBackground::new(assets),
        spawner: Spawner::default(),
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_up(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.player.shift(-PAPERBOY_SPEED);
    next
}

pub fn move_player_down(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.player.shift(PAPERBOY_SPEED);
    next
}

/// A newspaper leaving the paperboy's leading edge, aimed at `lane`
pub fn new_projectile(player: &Player, lane: Lane, assets: &Assets) -> Projectile {
    let origin = player.bounds();
    Projectile {
        body: Body::new(
            Vec2::new(origin.right(), origin.center_y().floor()),
            assets.size(assets.paper),
            Vec2::new(PAPER_SPEED, lane.throw_dy()),
            assets.paper,
        ),
        lane,
    }
}

/// Throw one paper. No rate limit: every throw event makes exactly one.
pub fn throw_paper(state: &GameState, lane: Lane, assets: &Assets) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let mut next = state.clone();
    next.projectiles.push(new_projectile(&state.player, lane, assets));
    next
}

// ── Per-frame tick (RNG is injected) ────────────────────────────────────────

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, assets: &Assets, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Spawn ─────────────────────────────────────────────────────────────
    let spawned = next.spawner.tick(assets, rng);
    next.obstacles.extend(spawned.obstacle);
    next.targets.extend(spawned.target);

    // ── 2. Move ──────────────────────────────────────────────────────────────
    next.background.update(assets, rng);
    update_all(&mut next.projectiles);
    update_all(&mut next.obstacles);
    update_all(&mut next.targets);

    // ── 3. Collide ───────────────────────────────────────────────────────────
    let report = collision::resolve(&mut next);
    if report.deliveries > 0 {
        log::info!(
            "Delivered {} paper(s), score {}",
            report.deliveries,
            next.player.score
        );
    } else if report.targets_hit > 0 {
        log::debug!("Paper hit a house in the wrong lane");
    }
    match report.player {
        PlayerHit::Hit => log::info!("Hit an obstacle, {} lives left", next.player.lives),
        PlayerHit::Destroyed => {
            log::info!("Out of lives at frame {}, final score {}", next.frame, next.player.score);
            next.status = GameStatus::GameOver;
        }
        PlayerHit::Clear | PlayerHit::Shielded => {}
    }

    // ── 4. Compact arenas ────────────────────────────────────────────────────
    compact(&mut next.projectiles);
    compact(&mut next.obstacles);
    compact(&mut next.targets);

    next
}
