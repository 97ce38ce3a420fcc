//! Image assets: opaque sprite handles, the load-all-then-ready gate, and
//! background selection.
//!
//! A failed load is never fatal.  The handle simply reports not-loaded and
//! draw code falls back to primitive shapes.

use std::collections::HashMap;
use std::path::Path;

use tracing::{error, info, warn};

use crate::entities::{BackgroundId, SpriteKey};
use crate::error::{GameError, GameResult};
use crate::render::Rgb;

/// Every sprite the game needs before its first frame.
pub const REQUIRED_SPRITES: [(SpriteKey, &str); 3] = [
    (SpriteKey::Player, "player.png"),
    (SpriteKey::Enemy1, "enemy1.png"),
    (SpriteKey::Enemy2, "enemy2.png"),
];

/// Something a surface can draw, once it has finished loading.
pub trait ImageHandle {
    fn is_loaded(&self) -> bool;
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    /// Average colour of the opaque pixels.
    pub tint: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    image: Option<SpriteImage>,
}

impl Sprite {
    pub fn loaded(name: impl Into<String>, image: SpriteImage) -> Self {
        Self {
            name: name.into(),
            image: Some(image),
        }
    }

    /// A handle whose image never arrived.
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
        }
    }

    pub fn load(path: &Path) -> GameResult<Self> {
        let decoded = image::open(path)
            .map_err(|e| GameError::image(path, e))?
            .to_rgba8();

        let (mut r, mut g, mut b, mut n) = (0u64, 0u64, 0u64, 0u64);
        for px in decoded.pixels().filter(|px| px[3] > 0) {
            r += px[0] as u64;
            g += px[1] as u64;
            b += px[2] as u64;
            n += 1;
        }
        let tint = if n == 0 {
            Rgb(0, 0, 0)
        } else {
            Rgb((r / n) as u8, (g / n) as u8, (b / n) as u8)
        };

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::loaded(
            name,
            SpriteImage {
                width: decoded.width(),
                height: decoded.height(),
                tint,
            },
        ))
    }

    pub fn image(&self) -> Option<&SpriteImage> {
        self.image.as_ref()
    }
}

impl ImageHandle for Sprite {
    fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

// ── Asset store ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    sprites: HashMap<SpriteKey, Sprite>,
}

impl AssetStore {
    /// Load every required sprite from `dir`.
    ///
    /// Returns only once each sprite has either loaded or failed, so the
    /// caller can start its frame loop straight after.  Failures are logged
    /// and leave a not-loaded handle behind.
    pub fn load_all(dir: &Path) -> Self {
        let mut sprites = HashMap::new();
        for (key, file) in REQUIRED_SPRITES {
            let path = dir.join(file);
            let sprite = match Sprite::load(&path) {
                Ok(sprite) => {
                    info!(sprite = file, "image loaded");
                    sprite
                }
                Err(err) => {
                    error!("Failed to load image: {err}");
                    Sprite::missing(file)
                }
            };
            sprites.insert(key, sprite);
        }
        Self { sprites }
    }

    pub fn with_sprite(mut self, key: SpriteKey, sprite: Sprite) -> Self {
        self.sprites.insert(key, sprite);
        self
    }

    /// True once every required sprite has settled (loaded or failed).
    pub fn is_ready(&self) -> bool {
        REQUIRED_SPRITES
            .iter()
            .all(|(key, _)| self.sprites.contains_key(key))
    }

    /// The sprite for `key`, only if it actually loaded.
    pub fn drawable(&self, key: SpriteKey) -> Option<&Sprite> {
        self.sprites.get(&key).filter(|s| s.is_loaded())
    }

    /// `(file, loaded)` for each required sprite, for startup diagnostics.
    pub fn status(&self) -> Vec<(&'static str, bool)> {
        REQUIRED_SPRITES
            .iter()
            .map(|(key, file)| {
                let loaded = self.sprites.get(key).is_some_and(|s| s.is_loaded());
                (*file, loaded)
            })
            .collect()
    }
}

// ── Background ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Starfield,
    Image(Sprite),
}

/// Resolve a background selection.  An image that cannot be loaded reverts
/// the selection to the starfield; the returned id is what the session
/// should use.
pub fn load_background(id: &BackgroundId, dir: &Path) -> (Background, BackgroundId) {
    match id {
        BackgroundId::Starfield => (Background::Starfield, BackgroundId::Starfield),
        BackgroundId::Image(name) => match Sprite::load(&dir.join(name)) {
            Ok(sprite) => {
                info!(background = %name, "background image loaded");
                (Background::Image(sprite), id.clone())
            }
            Err(err) => {
                warn!("Failed to load background image {name}, using starfield: {err}");
                (Background::Starfield, BackgroundId::Starfield)
            }
        },
    }
}
