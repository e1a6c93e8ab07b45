//! Scrolling street and drifting scenery.
//!
//! The street is a chain of tiles of one image. Tiles scroll left together;
//! a tile that has fully left the screen is moved to the end of the chain,
//! so the visible width is always covered.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::{Assets, DrawableId};
use crate::consts::*;
use crate::entities::{compact, update_all, Body, Decoration};

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollingBackground {
    pub street: DrawableId,
    pub tile_width: f32,
    /// Left edge of every street tile
    pub tiles: Vec<f32>,
    pub decorations: Vec<Decoration>,
    pub decoration_timer: u32,
}

impl ScrollingBackground {
    pub fn new(assets: &Assets) -> Self {
        Self::with_tile(assets.street, assets.size(assets.street).x)
    }

    /// Lay out tiles from x=0 until they span twice the screen width.
    /// There are always at least two, so a wrapped tile never leaves a gap.
    pub fn with_tile(street: DrawableId, tile_width: f32) -> Self {
        let tile_width = tile_width.max(1.0);
        let mut tiles = vec![0.0];
        while let Some(&last) = tiles.last() {
            if last + tile_width >= SCREEN_WIDTH * 2.0 && tiles.len() >= 2 {
                break;
            }
            tiles.push(last + tile_width);
        }
        Self {
            street,
            tile_width,
            tiles,
            decorations: Vec::new(),
            decoration_timer: 0,
        }
    }

    pub fn update(&mut self, assets: &Assets, rng: &mut impl Rng) {
        for x in &mut self.tiles {
            *x -= STREET_SCROLL_SPEED;
        }
        // Wrap after the whole chain has moved so the relocated tile lands
        // flush against the current rightmost one.
        for i in 0..self.tiles.len() {
            if self.tiles[i] + self.tile_width < 0.0 {
                let rightmost = self.tiles.iter().copied().fold(f32::MIN, f32::max);
                self.tiles[i] = rightmost + self.tile_width;
            }
        }

        self.decoration_timer += 1;
        if self.decoration_timer > SCENERY_SPAWN_INTERVAL {
            self.add_random_scenery(assets, rng);
            self.decoration_timer = 0;
        }

        update_all(&mut self.decorations);
        compact(&mut self.decorations);
    }

    fn add_random_scenery(&mut self, assets: &Assets, rng: &mut impl Rng) {
        if !rng.gen_bool(SCENERY_SPAWN_CHANCE) {
            return;
        }
        let pool = assets.scenery_pool();
        let Some(&drawable) = pool.choose(rng) else {
            log::debug!("No scenery images to spawn");
            return;
        };
        let size = assets.size(drawable);
        let y = if rng.gen_bool(0.5) {
            0.0
        } else {
            SCREEN_HEIGHT - size.y
        };
        log::debug!("Spawning scenery {} at y={}", assets.get(drawable).name(), y);
        self.decorations.push(Decoration {
            body: Body::new(
                Vec2::new(SCREEN_WIDTH, y),
                size,
                Vec2::new(-SCENERY_SCROLL_SPEED, 0.0),
                drawable,
            ),
        });
    }

    /// True if some tile spans screen column `x`
    pub fn covers(&self, x: f32) -> bool {
        self.tiles
            .iter()
            .any(|&left| left <= x && x < left + self.tile_width)
    }
}
