//! Library error type.

use std::fmt;
use std::path::PathBuf;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug)]
pub enum GameError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    Logger(String),
}

impl GameError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Image {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on {}: {source}", path.display()),
            Self::Image { path, source } => {
                write!(f, "failed to decode image {}: {source}", path.display())
            }
            Self::Logger(reason) => write!(f, "logger setup failed: {reason}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Image { source, .. } => Some(source),
            Self::Logger(_) => None,
        }
    }
}

impl From<tracing_subscriber::filter::ParseError> for GameError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        Self::Logger(err.to_string())
    }
}
