//! All game entity types. Movement rules live with the entities; everything
//! that involves more than one entity lives in `compute` and `collision`.

use glam::Vec2;

use crate::assets::DrawableId;
use crate::background::ScrollingBackground;
use crate::consts::*;
use crate::spawner::Spawner;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap: rectangles that only share an edge don't intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Shared base shape ────────────────────────────────────────────────────────

/// Position, size, velocity and liveness shared by every moving entity
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub alive: bool,
    pub drawable: DrawableId,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2, drawable: DrawableId) -> Self {
        Self {
            pos,
            size,
            vel,
            alive: true,
            drawable,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// Per-frame behaviour of everything that moves on its own
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Move one frame and apply the destroy-on-exit rule
    fn update(&mut self);

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn bounds(&self) -> Rect {
        self.body().bounds()
    }

    fn kill(&mut self) {
        self.body_mut().alive = false;
    }
}

/// Advance every live entity in an arena by one frame
pub fn update_all<T: Entity>(arena: &mut [T]) {
    for entity in arena.iter_mut().filter(|e| e.is_alive()) {
        entity.update();
    }
}

/// Drop dead entries, keeping the survivors in order
pub fn compact<T: Entity>(arena: &mut Vec<T>) {
    arena.retain(|e| e.is_alive());
}

/// Shared rule for everything that scrolls in from the right
fn scroll_left(body: &mut Body) {
    body.advance();
    if body.bounds().right() < 0.0 {
        body.alive = false;
    }
}

// ── Lanes ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lane {
    Top,
    Bottom,
}

impl Lane {
    /// Y position of targets in this lane
    pub fn y(self) -> f32 {
        match self {
            Lane::Top => TOP_LANE_Y.floor(),
            Lane::Bottom => BOTTOM_LANE_Y.floor(),
        }
    }

    /// Vertical direction of a paper thrown at this lane
    pub fn throw_dy(self) -> f32 {
        match self {
            Lane::Top => -PAPER_SPEED,
            Lane::Bottom => PAPER_SPEED,
        }
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// A thrown newspaper
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    /// Lane the paper was aimed at, fixed at creation
    pub lane: Lane,
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self) {
        self.body.advance();
        let b = self.body.bounds();
        if b.left() > SCREEN_WIDTH || b.top() < 0.0 || b.bottom() > SCREEN_HEIGHT {
            self.body.alive = false;
        }
    }
}

// ── Obstacles & targets ──────────────────────────────────────────────────────

/// Something in the road: a vehicle, animal or pedestrian
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub body: Body,
}

impl Entity for Obstacle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self) {
        scroll_left(&mut self.body);
    }
}

/// A delivery house
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub body: Body,
    pub lane: Lane,
}

impl Entity for Target {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self) {
        scroll_left(&mut self.body);
    }
}

/// A hill or building drifting past behind the street. Never collides.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub body: Body,
}

impl Entity for Decoration {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self) {
        scroll_left(&mut self.body);
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Normal,
    /// Recently hit; obstacle collisions are ignored
    Invincible,
    /// Out of lives. Terminal.
    Destroyed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub score: u32,
    pub lives: u32,
    /// Frames of invincibility left; 0 means vulnerable
    pub invincible_timer: u32,
}

impl Player {
    pub fn new(drawable: DrawableId, size: Vec2) -> Self {
        Self {
            body: Body::new(
                Vec2::new(PAPERBOY_X, PAPERBOY_START_Y.floor()),
                size,
                Vec2::ZERO,
                drawable,
            ),
            score: 0,
            lives: STARTING_LIVES,
            invincible_timer: 0,
        }
    }

    pub fn state(&self) -> PlayerState {
        if self.lives == 0 {
            PlayerState::Destroyed
        } else if self.invincible_timer > 0 {
            PlayerState::Invincible
        } else {
            PlayerState::Normal
        }
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    /// Lowest allowed top edge: the sprite's bottom stays inside the band
    pub fn max_y(&self) -> f32 {
        (PAPERBOY_MAX_Y - self.body.size.y).max(PAPERBOY_MIN_Y)
    }

    /// Move vertically by `dy`, clamped to the riding band
    pub fn shift(&mut self, dy: f32) {
        self.body.pos.y = (self.body.pos.y + dy).clamp(PAPERBOY_MIN_Y, self.max_y());
    }
}

// ── Master game state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// The entire game state. Cloneable so the update functions in `compute`
/// can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// One arena per entity kind, compacted once per frame
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub targets: Vec<Target>,
    pub background: ScrollingBackground,
    pub spawner: Spawner,
    pub status: GameStatus,
    pub frame: u64,
}
