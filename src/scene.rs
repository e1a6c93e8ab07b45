//! Renderer-neutral description of one frame.
//!
//! `compose` turns a `GameState` into an ordered list of draw commands plus
//! HUD text. Back-to-front: sky, scenery, street, grass, then the sprites.

use glam::Vec2;

use crate::assets::{Assets, DrawableId};
use crate::consts::*;
use crate::entities::{Entity, GameState};
use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub drawable: DrawableId,
    /// Top-left corner in screen units
    pub pos: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudText {
    pub text: String,
    pub pos: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub hud: Vec<HudText>,
}

impl Frame {
    fn draw(&mut self, drawable: DrawableId, pos: Vec2) {
        self.commands.push(DrawCommand { drawable, pos });
    }

    fn text(&mut self, text: String, (x, y): (f32, f32)) {
        self.hud.push(HudText {
            text,
            pos: Vec2::new(x, y),
        });
    }
}

/// A drawing surface
pub trait Renderer {
    fn present(&mut self, frame: &Frame, assets: &Assets) -> Result<(), GameError>;

    /// The surface changed size (in the renderer's own units)
    fn resize(&mut self, _cols: u16, _rows: u16) {}
}

pub fn compose(state: &GameState, assets: &Assets) -> Frame {
    let mut frame = Frame::default();

    frame.draw(assets.sky, Vec2::ZERO);
    for decoration in &state.background.decorations {
        frame.draw(decoration.body.drawable, decoration.body.pos);
    }

    let street_y = ((SCREEN_HEIGHT - assets.size(state.background.street).y) / 2.0).floor();
    for &x in &state.background.tiles {
        frame.draw(state.background.street, Vec2::new(x, street_y));
    }

    let grass_h = assets.size(assets.grass).y;
    frame.draw(assets.grass, Vec2::new(0.0, SCREEN_HEIGHT - grass_h));

    frame.draw(state.player.body.drawable, state.player.body.pos);
    let sprites = state
        .targets
        .iter()
        .map(|t| t.body())
        .chain(state.obstacles.iter().map(|o| o.body()))
        .chain(state.projectiles.iter().map(|p| p.body()))
        .filter(|b| b.alive);
    for body in sprites {
        frame.draw(body.drawable, body.pos);
    }

    frame.text(format!("Score: {}", state.player.score), SCORE_TEXT_POS);
    frame.text(format!("Lives: {}", state.player.lives), LIVES_TEXT_POS);
    frame
}
