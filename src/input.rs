//! Input signals for one frame.
//!
//! Movement keys are *held*: the tracker records the frame of the last
//! press/repeat event for every key and treats a key as down while that
//! frame is recent. Throw and quit keys are *edge-triggered*: each press
//! event counts once.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper
//!   `Press` / `Repeat` / `Release` events. The first `Repeat` or `Release`
//!   switches the tracker over; from then on a key is held from its press
//!   until its release, with no expiry.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence,
//!   and a repeated `Press` of a key that is still held doesn't throw again.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Lane;
use crate::error::GameError;

/// Classic terminals: a key counts as held if its last press arrived within
/// this many frames (8 frames @ 60 FPS ≈ 133 ms, longer than the gap between
/// OS auto-repeats but shorter than the delay before the first repeat).
pub const HOLD_WINDOW: u64 = 8;

const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

/// Everything the game loop needs to know about input for one frame
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    /// One entry per throw key press, in arrival order
    pub throws: Vec<Lane>,
    pub quit: bool,
    /// New terminal size in cells
    pub resized: Option<(u16, u16)>,
}

/// Where the game loop gets its input from
pub trait InputSource {
    fn poll(&mut self, frame: u64) -> Result<FrameInput, GameError>;
}

/// Turns raw terminal events into per-frame input
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Held key → frame it was last seen (press or repeat)
    key_frame: HashMap<KeyCode, u64>,
    throws: Vec<Lane>,
    quit: bool,
    resized: Option<(u16, u16)>,
    /// Set once the terminal has sent a `Repeat` or `Release` event
    reports_release: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &Event, frame: u64) {
        match event {
            Event::Key(key) => self.handle_key(key, frame),
            Event::Resize(cols, rows) => self.resized = Some((*cols, *rows)),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, frame: u64) {
        match key.kind {
            // Press: record key + handle one-shot actions
            KeyEventKind::Press => {
                let already_down = self.is_down(key.code, frame);
                self.key_frame.insert(key.code, frame);
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.quit = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    // OS auto-repeat of a held throw key is not a new throw
                    KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') if !already_down => {
                        self.throws.push(Lane::Top)
                    }
                    KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') if !already_down => {
                        self.throws.push(Lane::Bottom)
                    }
                    _ => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.reports_release = true;
                self.key_frame.insert(key.code, frame);
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.reports_release = true;
                self.key_frame.remove(&key.code);
            }
        }
    }

    fn is_down(&self, key: KeyCode, frame: u64) -> bool {
        match self.key_frame.get(&key) {
            Some(_) if self.reports_release => true,
            Some(&last) => frame.saturating_sub(last) <= HOLD_WINDOW,
            None => false,
        }
    }

    /// True if any of `keys` is down: pressed and not yet released, or on a
    /// classic terminal, seen within the last `HOLD_WINDOW` frames
    pub fn is_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&key| self.is_down(key, frame))
    }

    /// Input for `frame`. Drains the queued throws and any pending resize;
    /// quit stays set once seen.
    pub fn snapshot(&mut self, frame: u64) -> FrameInput {
        FrameInput {
            up: self.is_held(&UP_KEYS, frame),
            down: self.is_held(&DOWN_KEYS, frame),
            throws: std::mem::take(&mut self.throws),
            quit: self.quit,
            resized: self.resized.take(),
        }
    }
}

/// Non-blocking terminal input: drains whatever events are pending at the
/// start of each frame, without a reader thread.
#[derive(Debug, Default)]
pub struct TerminalInput {
    keys: KeyTracker,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, frame: u64) -> Result<FrameInput, GameError> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.keys.handle(&event, frame);
        }
        Ok(self.keys.snapshot(frame))
    }
}
