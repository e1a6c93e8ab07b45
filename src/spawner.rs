//! Timer-driven creation of obstacles and delivery targets.
//!
//! Factories take the asset set explicitly; the spawner never reaches for
//! global state. All randomness comes through the injected RNG.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::{Assets, DrawableId};
use crate::consts::*;
use crate::entities::{Body, Lane, Obstacle, Target};

/// Two independent frame counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spawner {
    pub obstacle_timer: u32,
    pub target_timer: u32,
}

/// What one spawner tick produced
#[derive(Debug, Default)]
pub struct Spawned {
    pub obstacle: Option<Obstacle>,
    pub target: Option<Target>,
}

impl Spawner {
    /// Advance both timers by one frame, spawning whichever ran out
    pub fn tick(&mut self, assets: &Assets, rng: &mut impl Rng) -> Spawned {
        self.obstacle_timer += 1;
        self.target_timer += 1;

        let mut spawned = Spawned::default();
        if self.obstacle_timer > OBSTACLE_SPAWN_INTERVAL {
            spawned.obstacle = Some(spawn_obstacle(assets, rng));
            self.obstacle_timer = 0;
        }
        if self.target_timer > TARGET_SPAWN_INTERVAL {
            let lane = if rng.gen_bool(0.5) { Lane::Top } else { Lane::Bottom };
            spawned.target = Some(spawn_target(lane, assets, rng));
            self.target_timer = 0;
        }
        spawned
    }
}

fn pick(pool: &[DrawableId], rng: &mut impl Rng) -> Option<DrawableId> {
    pool.choose(rng).copied()
}

/// An obstacle entering at the right edge, somewhere in the riding band,
/// with a random variant and speed.
pub fn spawn_obstacle(assets: &Assets, rng: &mut impl Rng) -> Obstacle {
    let drawable = pick(&assets.obstacles, rng).unwrap_or(assets.player);
    let y = rng.gen_range(PAPERBOY_MIN_Y as i32..=PAPERBOY_MAX_Y as i32) as f32;
    let speed = rng.gen_range(OBSTACLE_MIN_SPEED..=OBSTACLE_MAX_SPEED) as f32;
    log::debug!("Spawning obstacle at y={} speed={}", y, speed);
    Obstacle {
        body: Body::new(
            Vec2::new(SCREEN_WIDTH, y),
            assets.size(drawable),
            Vec2::new(-speed, 0.0),
            drawable,
        ),
    }
}

/// A delivery house entering at the right edge in `lane`
pub fn spawn_target(lane: Lane, assets: &Assets, rng: &mut impl Rng) -> Target {
    let drawable = pick(&assets.houses, rng).unwrap_or(assets.player);
    log::debug!("Spawning {:?} lane house", lane);
    Target {
        body: Body::new(
            Vec2::new(SCREEN_WIDTH, lane.y()),
            assets.size(drawable),
            Vec2::new(-TARGET_SPEED, 0.0),
            drawable,
        ),
        lane,
    }
}
