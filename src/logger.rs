//! Tracing subscriber setup for the terminal host.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt::time, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{GameError, GameResult};

/// Crate directive used when `RUST_LOG` is unset or empty.
pub const DEFAULT_CRATE_DIRECTIVE: &str = if cfg!(debug_assertions) {
    "space_fighter=debug"
} else {
    "space_fighter=info"
};

/// Build the level filter from a `RUST_LOG` value.
///
/// A non-empty value is taken as-is.  Without one, everything logs at
/// `warn` and the game crate at [`DEFAULT_CRATE_DIRECTIVE`].
pub fn build_filter(rust_log: Option<&str>) -> GameResult<EnvFilter> {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => Ok(builder.parse(directives)?),
        None => Ok(builder
            .parse("")?
            .add_directive(DEFAULT_CRATE_DIRECTIVE.parse()?)),
    }
}

/// Install the global tracing subscriber, writing to `path`.
///
/// The terminal is in raw mode while the game runs, so log lines go to a
/// file rather than stderr.  See [`build_filter`] for how `RUST_LOG` is read.
pub fn init(path: &Path) -> GameResult<()> {
    let file = File::create(path).map_err(|e| GameError::io(path, e))?;
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref())?;

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(time::uptime())
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .map_err(|e| GameError::Logger(e.to_string()))
}
