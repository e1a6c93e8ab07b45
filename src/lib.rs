//! Paperboy - a side-scrolling newspaper delivery arcade game
//!
//! Core modules:
//! - `entities`, `spawner`, `background`, `collision`, `compute`: the
//!   deterministic simulation (seeded RNG, fixed frame step)
//! - `assets`, `scene`, `display`: drawables and the terminal renderer
//! - `input`, `session`: input polling and the frame loop
//! - `config`, `error`: ambient plumbing

pub mod assets;
pub mod background;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod scene;
pub mod session;
pub mod spawner;

pub use config::Config;
pub use error::GameError;

/// Game configuration constants
pub mod consts {
    /// Logical screen size; everything is simulated in these units
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 768.0;

    /// Delivery lanes
    pub const TOP_LANE_Y: f32 = SCREEN_HEIGHT * 0.2;
    pub const BOTTOM_LANE_Y: f32 = SCREEN_HEIGHT * 0.6;

    /// Vertical band the paperboy may ride in
    pub const PAPERBOY_MIN_Y: f32 = SCREEN_HEIGHT * 0.15;
    pub const PAPERBOY_MAX_Y: f32 = SCREEN_HEIGHT * 0.75;
    pub const PAPERBOY_X: f32 = 50.0;
    pub const PAPERBOY_START_Y: f32 = SCREEN_HEIGHT / 2.0;
    /// Pixels per frame per held direction
    pub const PAPERBOY_SPEED: f32 = 5.0;

    pub const STARTING_LIVES: u32 = 3;
    /// Frames of invincibility after losing a life
    pub const INVINCIBLE_DURATION: u32 = 120;

    /// Newspaper speed on both axes
    pub const PAPER_SPEED: f32 = 8.0;

    /// Spawn timers fire once the counter exceeds these
    pub const OBSTACLE_SPAWN_INTERVAL: u32 = 120;
    pub const TARGET_SPAWN_INTERVAL: u32 = 180;
    pub const OBSTACLE_MIN_SPEED: i32 = 3;
    pub const OBSTACLE_MAX_SPEED: i32 = 7;
    pub const TARGET_SPEED: f32 = 3.0;

    /// Background scrolling
    pub const STREET_SCROLL_SPEED: f32 = 3.0;
    pub const SCENERY_SCROLL_SPEED: f32 = 2.0;
    pub const SCENERY_SPAWN_INTERVAL: u32 = 120;
    pub const SCENERY_SPAWN_CHANCE: f64 = 0.3;

    pub const TARGET_FPS: u32 = 60;

    /// HUD text anchors
    pub const SCORE_TEXT_POS: (f32, f32) = (10.0, 10.0);
    pub const LIVES_TEXT_POS: (f32, f32) = (10.0, 50.0);
}
