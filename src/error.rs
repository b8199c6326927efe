//! Crate-wide error type.
//!
//! Startup code propagates these with `?` and aborts; code that runs inside
//! a tick logs them and degrades to a no-op instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read playlist library {path:?}: {source}")]
    LibraryIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse playlist library {path:?}: {source}")]
    LibraryParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The library parsed but its content is malformed (bad ids, duplicates, ...).
    #[error("invalid playlist library: {0}")]
    LibraryInvalid(String),

    #[error("invalid token id {0:?}")]
    InvalidToken(String),

    #[error("audio output unavailable: {0}")]
    AudioOutput(String),

    #[error("failed to load track {path:?}: {reason}")]
    TrackLoad { path: PathBuf, reason: String },

    #[error("display output failed: {0}")]
    Display(String),

    #[error("sensor read failed: {0}")]
    Sensor(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
