//! Terminal renderer.
//!
//! A frame is rasterised onto a canvas with two pixels per terminal cell
//! (upper half-block glyph: foreground is the top pixel, background the
//! bottom one). Only cells that changed since the previous frame are
//! written.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;
use image::Rgb;

use crate::assets::{Assets, Drawable, WHITE};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::GameError;
use crate::scene::{Frame, Renderer};

const HALF_BLOCK: char = '▀';
const CLEAR_COLOR: Rgb<u8> = WHITE;

// ── HUD text style ───────────────────────────────────────────────────────────

/// How HUD text is drawn. The terminal supplies the font; only the colour
/// is ours to pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudStyle {
    pub color: Color,
}

impl Default for HudStyle {
    fn default() -> Self {
        Self {
            color: Color::Black,
        }
    }
}

impl HudStyle {
    /// Style from a configured colour name, falling back to the default
    pub fn from_name(name: &str) -> Self {
        match parse_color(name) {
            Some(color) => Self { color },
            None => {
                log::warn!("Unknown HUD colour {:?}, using default", name);
                Self::default()
            }
        }
    }
}

/// Named colour or `#rrggbb`
pub fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim().to_ascii_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }
    let color = match name.as_str() {
        "black" => Color::Black,
        "white" => Color::White,
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        "grey" | "gray" => Color::Grey,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        _ => return None,
    };
    Some(color)
}

fn to_color(Rgb([r, g, b]): Rgb<u8>) -> Color {
    Color::Rgb { r, g, b }
}

// ── Canvas ───────────────────────────────────────────────────────────────────

/// Low-resolution pixel grid the screen is rasterised onto
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb<u8>>,
}

impl Canvas {
    /// Canvas for a terminal of `cols` x `rows` cells
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize, rows as usize * 2)
    }

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![CLEAR_COLOR; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb<u8> {
        self.pixels[y * self.width + x]
    }

    /// Draw `drawable` with its top-left corner at `pos` (screen units).
    /// Each canvas pixel takes the drawable's colour under its centre.
    pub fn blit(&mut self, drawable: &Drawable, pos: Vec2) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let sx = self.width as f32 / SCREEN_WIDTH;
        let sy = self.height as f32 / SCREEN_HEIGHT;
        let size = drawable.size();

        let x0 = (pos.x * sx).floor().max(0.0) as usize;
        let x1 = ((pos.x + size.x) * sx).ceil().min(self.width as f32) as usize;
        let y0 = (pos.y * sy).floor().max(0.0) as usize;
        let y1 = ((pos.y + size.y) * sy).ceil().min(self.height as f32) as usize;

        for py in y0..y1 {
            let local_y = (py as f32 + 0.5) / sy - pos.y;
            if local_y < 0.0 || local_y >= size.y {
                continue;
            }
            for px in x0..x1 {
                let local_x = (px as f32 + 0.5) / sx - pos.x;
                if local_x < 0.0 || local_x >= size.x {
                    continue;
                }
                if let Some(color) = drawable.sample(local_x as u32, local_y as u32) {
                    self.pixels[py * self.width + px] = color;
                }
            }
        }
    }
}

/// Paint every draw command of `frame`, in order, onto a fresh canvas
pub fn rasterize(frame: &Frame, assets: &Assets, cols: u16, rows: u16) -> Canvas {
    let mut canvas = Canvas::for_terminal(cols, rows);
    for command in &frame.commands {
        canvas.blit(assets.get(command.drawable), command.pos);
    }
    canvas
}

/// Terminal cell for a screen-space position
fn cell_at(pos: Vec2, cols: u16, rows: u16) -> (u16, u16) {
    let col = (pos.x / SCREEN_WIDTH * cols as f32) as u16;
    let row = (pos.y / SCREEN_HEIGHT * rows as f32) as u16;
    (col.min(cols.saturating_sub(1)), row.min(rows.saturating_sub(1)))
}

// ── Terminal renderer ────────────────────────────────────────────────────────

type Cell = (Rgb<u8>, Rgb<u8>);

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    hud: HudStyle,
    /// What each cell currently shows; `None` forces a repaint
    shown: Vec<Option<Cell>>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16, hud: HudStyle) -> Self {
        Self {
            out,
            cols,
            rows,
            hud,
            shown: vec![None; cols as usize * rows as usize],
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_cells(&mut self, canvas: &Canvas) -> Result<(), GameError> {
        let mut last: Option<Cell> = None;
        for row in 0..self.rows as usize {
            // Column right after the last glyph written on this row
            let mut cursor_col: Option<usize> = None;
            for col in 0..self.cols as usize {
                let cell = (canvas.pixel(col, row * 2), canvas.pixel(col, row * 2 + 1));
                let index = row * self.cols as usize + col;
                if self.shown[index] == Some(cell) {
                    continue;
                }
                if cursor_col != Some(col) {
                    self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                }
                if last != Some(cell) {
                    self.out.queue(style::SetForegroundColor(to_color(cell.0)))?;
                    self.out.queue(style::SetBackgroundColor(to_color(cell.1)))?;
                    last = Some(cell);
                }
                self.out.queue(Print(HALF_BLOCK))?;
                self.shown[index] = Some(cell);
                cursor_col = Some(col + 1);
            }
        }
        Ok(())
    }

    fn draw_hud(&mut self, frame: &Frame, canvas: &Canvas) -> Result<(), GameError> {
        for line in &frame.hud {
            let (col, row) = cell_at(line.pos, self.cols, self.rows);
            let room = self.cols.saturating_sub(col) as usize;
            let text: String = line.text.chars().take(room).collect();
            if text.is_empty() {
                continue;
            }
            let background = canvas.pixel(col as usize, row as usize * 2);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(self.hud.color))?;
            self.out.queue(style::SetBackgroundColor(to_color(background)))?;
            self.out.queue(Print(&text))?;

            // Text covers these cells; repaint them next frame
            let start = row as usize * self.cols as usize + col as usize;
            for shown in &mut self.shown[start..start + text.chars().count()] {
                *shown = None;
            }
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn present(&mut self, frame: &Frame, assets: &Assets) -> Result<(), GameError> {
        if self.cols == 0 || self.rows == 0 {
            return Ok(());
        }
        let canvas = rasterize(frame, assets, self.cols, self.rows);
        self.draw_cells(&canvas)?;
        self.draw_hud(frame, &canvas)?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        log::debug!("Terminal resized to {}x{}", cols, rows);
        self.cols = cols;
        self.rows = rows;
        self.shown = vec![None; cols as usize * rows as usize];
        if let Err(err) = self.out.queue(terminal::Clear(terminal::ClearType::All)) {
            log::warn!("Couldn't clear terminal after resize: {}", err);
        }
    }
}
