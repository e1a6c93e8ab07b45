//! Per-frame collision resolution.
//!
//! Runs after everything has moved and before dead entities are compacted
//! out of their arenas. Order matters: deliveries first, then the player.

use crate::consts::INVINCIBLE_DURATION;
use crate::entities::{Entity, GameState, Obstacle, Player, Projectile, Target};

/// Outcome of the player × obstacle step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerHit {
    /// Vulnerable and nothing touched
    Clear,
    /// Invincible this frame; the timer ticked down instead of checking
    Shielded,
    /// Lost a life, obstacles cleared, invincibility started
    Hit,
    /// Lost the last life
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionReport {
    /// Targets destroyed by papers this frame
    pub targets_hit: u32,
    /// Of those, how many were in the paper's lane
    pub deliveries: u32,
    pub player: PlayerHit,
}

/// Papers against houses.
///
/// A paper destroys every live house it overlaps. Each house in the paper's
/// lane is worth one delivery. The paper is spent once, however many houses
/// it hit. Returns (targets hit, deliveries).
pub fn resolve_deliveries(projectiles: &mut [Projectile], targets: &mut [Target]) -> (u32, u32) {
    let mut targets_hit = 0;
    let mut deliveries = 0;

    for paper in projectiles.iter_mut().filter(|p| p.is_alive()) {
        let paper_box = paper.bounds();
        let mut hit = false;
        for target in targets
            .iter_mut()
            .filter(|t| t.is_alive() && t.bounds().intersects(&paper_box))
        {
            target.kill();
            targets_hit += 1;
            if target.lane == paper.lane {
                deliveries += 1;
            }
            hit = true;
        }
        if hit {
            paper.kill();
        }
    }

    (targets_hit, deliveries)
}

/// Player against obstacles.
///
/// While invincible no check happens at all; the timer decays by one frame
/// instead. A vulnerable player touching any live obstacle loses a life.
/// If lives remain, every obstacle on screen is cleared and invincibility
/// starts.
pub fn resolve_player_hits(player: &mut Player, obstacles: &mut [Obstacle]) -> PlayerHit {
    if player.invincible_timer > 0 {
        player.invincible_timer -= 1;
        return PlayerHit::Shielded;
    }

    let player_box = player.bounds();
    let touched = obstacles
        .iter()
        .any(|o| o.is_alive() && o.bounds().intersects(&player_box));
    if !touched {
        return PlayerHit::Clear;
    }

    player.lives = player.lives.saturating_sub(1);
    if player.lives == 0 {
        return PlayerHit::Destroyed;
    }

    for obstacle in obstacles.iter_mut() {
        obstacle.kill();
    }
    player.invincible_timer = INVINCIBLE_DURATION;
    PlayerHit::Hit
}

/// Run both collision steps in order and apply the score
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let (targets_hit, deliveries) = resolve_deliveries(&mut state.projectiles, &mut state.targets);
    state.player.score += deliveries;

    let player = resolve_player_hits(&mut state.player, &mut state.obstacles);

    CollisionReport {
        targets_hit,
        deliveries,
        player,
    }
}
