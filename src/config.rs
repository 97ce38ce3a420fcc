//! Session and host configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::entities::{BackgroundId, PersistMode};

pub const DEFAULT_FPS: u32 = 60;

/// Frame duration for a target rate; zero is treated as 1 FPS.
pub fn frame_for_fps(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps.max(1) as f64)
}

/// Inputs consumed when a session starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub persist_mode: PersistMode,
    pub background: BackgroundId,
}

/// Host configuration.
///
/// - `session`: weapon persistence and background for new sessions
/// - `asset_dir`: where `player.png`, `enemy1.png` and `enemy2.png` live
/// - `background_dir`: where named background images live
/// - `frame`: target frame duration of the scheduler
/// - `log_file`: tracing output (the terminal itself is busy)
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub asset_dir: PathBuf,
    pub background_dir: PathBuf,
    pub frame: Duration,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            asset_dir: PathBuf::from("image"),
            background_dir: PathBuf::from("background"),
            frame: frame_for_fps(DEFAULT_FPS),
            log_file: PathBuf::from("space_fighter.log"),
        }
    }
}
