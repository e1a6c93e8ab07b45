//! Drawable images and the placeholders that stand in for missing ones.
//!
//! Every image is decoded and scaled once, before the game loop starts.
//! Entities only ever hold a `DrawableId`; the renderer looks the pixels up
//! in `Assets` when it draws a frame.

use std::path::{Path, PathBuf};

use glam::Vec2;
use image::{imageops::FilterType, Rgb, Rgba, RgbaImage};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::GameError;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
const SKY_BLUE: Rgb<u8> = Rgb([135, 206, 235]);
const GRASS_GREEN: Rgb<u8> = Rgb([34, 139, 34]);
const ASPHALT: Rgb<u8> = Rgb([96, 96, 96]);

/// Pixels with less alpha than this are not drawn
const ALPHA_CUTOFF: u8 = 128;

// ── Sizes (width, height) ────────────────────────────────────────────────────

const PLAYER_SIZE: (u32, u32) = (100, 100);
const PLAYER_PLACEHOLDER: (u32, u32) = (30, 30);
const HOUSE_SIZE: (u32, u32) = (120, 120);
const HOUSE_PLACEHOLDER: (u32, u32) = (40, 40);
const PAPER_SIZE: (u32, u32) = (40, 40);
const PAPER_PLACEHOLDER: (u32, u32) = (10, 10);
const OBSTACLE_SIZE: (u32, u32) = (80, 80);
const OBSTACLE_PLACEHOLDER: (u32, u32) = (30, 30);
const HILL_SIZE: (u32, u32) = (300, 200);
const BUILDING_SIZE: (u32, u32) = (200, 300);
const SKY_SIZE: (u32, u32) = (SCREEN_WIDTH as u32, (SCREEN_HEIGHT * 0.4) as u32);
const GRASS_SIZE: (u32, u32) = (SCREEN_WIDTH as u32, (SCREEN_HEIGHT * 0.3) as u32);
const STREET_SIZE: (u32, u32) = (SCREEN_WIDTH as u32, (SCREEN_HEIGHT * 0.5) as u32);

/// Number of numbered house images (`house.png`, `house-2.png`, ...)
const HOUSE_VARIANTS: usize = 5;
const OBSTACLE_DIRS: [&str; 3] = ["vehicles", "animals", "people"];

// ── Drawables ────────────────────────────────────────────────────────────────

/// Handle into the `Assets` arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawableId(usize);

#[derive(Clone, Debug)]
enum Pixels {
    Image(RgbaImage),
    Solid(Rgb<u8>),
}

#[derive(Clone, Debug)]
pub struct Drawable {
    name: String,
    width: u32,
    height: u32,
    pixels: Pixels,
}

impl Drawable {
    /// A solid-colour rectangle, used wherever an image is missing
    pub fn solid(name: impl Into<String>, width: u32, height: u32, color: Rgb<u8>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pixels: Pixels::Solid(color),
        }
    }

    pub fn image(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            width: image.width(),
            height: image.height(),
            pixels: Pixels::Image(image),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.pixels, Pixels::Solid(_))
    }

    /// Colour at local pixel (x, y); `None` where transparent or outside
    pub fn sample(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        match &self.pixels {
            Pixels::Solid(color) => Some(*color),
            Pixels::Image(image) => {
                let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
                (a >= ALPHA_CUTOFF).then_some(Rgb([r, g, b]))
            }
        }
    }
}

/// Decode `path` and scale it to exactly `width` x `height`
pub fn load_scaled(path: &Path, width: u32, height: u32) -> Result<RgbaImage, GameError> {
    let image = image::open(path).map_err(|source| GameError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgba8())
}

// ── Asset set ────────────────────────────────────────────────────────────────

/// Everything the game draws, grouped by role.
///
/// Single-image roles always resolve to something drawable (an image or a
/// placeholder). The hill and building pools may be empty.
#[derive(Clone, Debug)]
pub struct Assets {
    drawables: Vec<Drawable>,
    pub player: DrawableId,
    pub houses: Vec<DrawableId>,
    pub obstacles: Vec<DrawableId>,
    pub paper: DrawableId,
    pub sky: DrawableId,
    pub hills: Vec<DrawableId>,
    pub buildings: Vec<DrawableId>,
    pub grass: DrawableId,
    pub street: DrawableId,
}

impl Assets {
    /// Load the asset tree under `root`. Never fails: anything missing or
    /// undecodable is logged and replaced with a placeholder.
    pub fn load(root: &Path) -> Self {
        log::info!("Loading assets from {}", root.display());
        let assets = Loader::new(Some(root.to_path_buf())).finish();
        let placeholders = assets.drawables.iter().filter(|d| d.is_placeholder()).count();
        log::info!(
            "Loaded {} drawables ({} placeholders)",
            assets.drawables.len(),
            placeholders
        );
        assets
    }

    /// Placeholder-only asset set (no disk access)
    pub fn placeholders() -> Self {
        Loader::new(None).finish()
    }

    pub fn get(&self, id: DrawableId) -> &Drawable {
        &self.drawables[id.0]
    }

    pub fn size(&self, id: DrawableId) -> Vec2 {
        self.get(id).size()
    }

    /// Register an extra drawable, e.g. to swap one role for a custom image
    pub fn add(&mut self, drawable: Drawable) -> DrawableId {
        self.drawables.push(drawable);
        DrawableId(self.drawables.len() - 1)
    }

    /// Hills followed by buildings: the decoration pool
    pub fn scenery_pool(&self) -> Vec<DrawableId> {
        self.hills.iter().chain(&self.buildings).copied().collect()
    }

}

struct Loader {
    root: Option<PathBuf>,
    drawables: Vec<Drawable>,
}

impl Loader {
    fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            drawables: Vec::new(),
        }
    }

    fn push(&mut self, drawable: Drawable) -> DrawableId {
        self.drawables.push(drawable);
        DrawableId(self.drawables.len() - 1)
    }

    fn placeholder(&mut self, name: &str, (w, h): (u32, u32), color: Rgb<u8>) -> DrawableId {
        self.push(Drawable::solid(name, w, h, color))
    }

    /// Load one file; `None` (after logging) if it's absent or corrupt
    fn file(&mut self, path: &Path, (w, h): (u32, u32)) -> Option<DrawableId> {
        match load_scaled(path, w, h) {
            Ok(image) => {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                log::debug!("Loaded {} ({}x{})", path.display(), w, h);
                Some(self.push(Drawable::image(name, image)))
            }
            Err(err) => {
                log::error!("{}", err);
                None
            }
        }
    }

    /// A required single-image role
    fn single(&mut self, rel: &[&str], size: (u32, u32)) -> Option<DrawableId> {
        let root = self.root.clone()?;
        let path = rel.iter().fold(root, |p, part| p.join(part));
        if !path.exists() {
            log::warn!("Missing asset {}, using placeholder", path.display());
            return None;
        }
        self.file(&path, size)
    }

    /// Sorted PNG files in `dir` whose file name passes `keep`
    fn scan(&self, dir: &[&str], keep: impl Fn(&str) -> bool) -> Vec<PathBuf> {
        let Some(root) = &self.root else {
            return Vec::new();
        };
        let dir = dir.iter().fold(root.clone(), |p, part| p.join(part));
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Can't read asset directory {}: {}", dir.display(), err);
                return Vec::new();
            }
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                let is_png = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                is_png && keep(&name)
            })
            .collect();
        files.sort();
        files
    }

    fn finish(mut self) -> Assets {
        let player = self
            .single(&["paperboy", "paper-boy.png"], PLAYER_SIZE)
            .unwrap_or_else(|| self.placeholder("paperboy", PLAYER_PLACEHOLDER, BLUE));

        let mut houses = Vec::new();
        if let Some(root) = self.root.clone() {
            for i in 0..HOUSE_VARIANTS {
                let file = if i == 0 {
                    "house.png".to_string()
                } else {
                    format!("house-{}.png", i + 1)
                };
                let path = root.join("delivery-houses").join(file);
                if path.exists() {
                    houses.extend(self.file(&path, HOUSE_SIZE));
                }
            }
            if houses.is_empty() {
                log::warn!("No house images found, using placeholder");
            }
        }
        if houses.is_empty() {
            houses.push(self.placeholder("house", HOUSE_PLACEHOLDER, GREEN));
        }

        let paper = self
            .single(&["newspapers", "newspaper.png"], PAPER_SIZE)
            .unwrap_or_else(|| self.placeholder("newspaper", PAPER_PLACEHOLDER, WHITE));

        let mut obstacles = Vec::new();
        for dir in OBSTACLE_DIRS {
            for path in self.scan(&[dir], |_| true) {
                obstacles.extend(self.file(&path, OBSTACLE_SIZE));
            }
        }
        if obstacles.is_empty() {
            if self.root.is_some() {
                log::warn!("No obstacle images found, using placeholders");
            }
            for (name, color) in [("obstacle-red", RED), ("obstacle-yellow", YELLOW), ("obstacle-green", GREEN)] {
                obstacles.push(self.placeholder(name, OBSTACLE_PLACEHOLDER, color));
            }
        }

        let sky = self
            .single(&["scenery", "sky.png"], SKY_SIZE)
            .unwrap_or_else(|| self.placeholder("sky", SKY_SIZE, SKY_BLUE));

        let mut hills = Vec::new();
        for path in self.scan(&["scenery"], |name| name.starts_with("hill")) {
            hills.extend(self.file(&path, HILL_SIZE));
        }
        let mut buildings = Vec::new();
        for path in self.scan(&["scenery"], |name| name.contains("building")) {
            buildings.extend(self.file(&path, BUILDING_SIZE));
        }

        let grass = self
            .single(&["scenery", "sky-and-grass.png"], GRASS_SIZE)
            .unwrap_or_else(|| self.placeholder("grass", GRASS_SIZE, GRASS_GREEN));
        let street = self
            .single(&["scenery", "street-3.png"], STREET_SIZE)
            .unwrap_or_else(|| self.placeholder("street", STREET_SIZE, ASPHALT));

        Assets {
            drawables: self.drawables,
            player,
            houses,
            obstacles,
            paper,
            sky,
            hills,
            buildings,
            grass,
            street,
        }
    }
}
