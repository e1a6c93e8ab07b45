//! The game loop.
//!
//! One iteration is one frame: poll input → apply movement and throws →
//! tick (spawn, move, collide) → render → sleep out the rest of the frame
//! budget. A single `running` flag is checked at the top of each iteration.
//! A frame that fails (error or panic) is logged and ends the session; it is
//! never retried.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::Assets;
use crate::compute::{init_state, move_player_down, move_player_up, throw_paper, tick};
use crate::consts::TARGET_FPS;
use crate::entities::{GameState, GameStatus};
use crate::input::InputSource;
use crate::scene::{compose, Renderer};

/// Why a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Quit signal from the player
    Quit,
    /// Out of lives
    GameOver,
    /// A frame failed; see the log
    Aborted,
}

/// Run `f`, turning a panic into an error. The panic hook has already
/// logged the message and backtrace by the time this returns.
pub fn contain_panic<T>(what: &str, f: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(anyhow::anyhow!("panicked while {}: {}", what, message))
        }
    }
}

pub struct Session<I: InputSource, R: Renderer> {
    state: GameState,
    assets: Assets,
    input: I,
    renderer: R,
    rng: StdRng,
    frame_budget: Duration,
}

impl<I: InputSource, R: Renderer> Session<I, R> {
    pub fn new(assets: Assets, input: I, renderer: R, seed: u64) -> Self {
        Self {
            state: init_state(&assets),
            assets,
            input,
            renderer,
            rng: StdRng::seed_from_u64(seed),
            frame_budget: Duration::from_secs_f64(1.0 / TARGET_FPS as f64),
        }
    }

    /// Minimum wall time per frame; zero disables pacing
    pub fn with_frame_budget(mut self, budget: Duration) -> Self {
        self.frame_budget = budget;
        self
    }

    /// Start from a prepared state instead of a fresh game
    pub fn with_state(mut self, state: GameState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (GameState, R) {
        (self.state, self.renderer)
    }

    /// Run frames until quit, game over or a failed frame
    pub fn run(&mut self) -> Outcome {
        let mut running = true;
        let mut outcome = Outcome::Quit;

        while running {
            let frame_start = Instant::now();

            let what = format!("running frame {}", self.state.frame + 1);
            match contain_panic(&what, || self.step()) {
                Ok(None) => {}
                Ok(Some(end)) => {
                    outcome = end;
                    running = false;
                }
                Err(err) => {
                    log::error!("Error in game loop: {:?}", err);
                    outcome = Outcome::Aborted;
                    running = false;
                }
            }

            let elapsed = frame_start.elapsed();
            if running && elapsed < self.frame_budget {
                std::thread::sleep(self.frame_budget - elapsed);
            }
        }

        log::info!(
            "Session ended ({:?}) after {} frames: score {}, lives {}",
            outcome,
            self.state.frame,
            self.state.player.score,
            self.state.player.lives
        );
        outcome
    }

    /// One frame. `Some` when this frame ends the session; the frame itself
    /// is always completed first.
    pub fn step(&mut self) -> anyhow::Result<Option<Outcome>> {
        let frame = self.state.frame + 1;
        let input = self
            .input
            .poll(frame)
            .with_context(|| format!("polling input for frame {}", frame))?;

        if let Some((cols, rows)) = input.resized {
            self.renderer.resize(cols, rows);
        }

        for &lane in &input.throws {
            self.state = throw_paper(&self.state, lane, &self.assets);
        }
        if input.up {
            self.state = move_player_up(&self.state);
        }
        if input.down {
            self.state = move_player_down(&self.state);
        }
        self.state = tick(&self.state, &self.assets, &mut self.rng);

        let scene = compose(&self.state, &self.assets);
        self.renderer
            .present(&scene, &self.assets)
            .with_context(|| format!("rendering frame {}", frame))?;

        if self.state.status == GameStatus::GameOver {
            Ok(Some(Outcome::GameOver))
        } else if input.quit {
            Ok(Some(Outcome::Quit))
        } else {
            Ok(None)
        }
    }
}
