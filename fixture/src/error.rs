//! Error types for fixture generation, validation and file I/O.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::generate::MAX_WAVE_COUNT;

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors produced while generating, validating or persisting a fixture.
#[derive(Debug)]
#[non_exhaustive]
pub enum FixtureError {
    /// Spawn duration is negative, NaN or infinite.
    InvalidDuration { duration: f64 },

    /// Wave count is zero or above `MAX_WAVE_COUNT`.
    InvalidWaveCount { wave_count: u32 },

    /// Wave timeline is not finite or too short to give every wave a spawn time.
    InvalidTimeline { timeline: f64 },

    /// Reading or writing the fixture file failed.
    Io { path: PathBuf, source: io::Error },

    /// The fixture could not be serialized or parsed.
    Json(serde_json::Error),

    /// An entity spawns before its predecessor.
    Unsorted {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// Entity type is not one the server knows how to spawn.
    UnknownEntityType { index: usize, kind: u8 },

    /// Spawn time is negative or not finite.
    SpawnTimeOutOfRange { index: usize, spawn_time: f64 },

    /// Texture rect has a zero width or height.
    EmptyTextureRect { index: usize },

    /// Entity does not spawn from the off-screen column.
    OffscreenColumn { index: usize, x: i32, expected: i32 },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { duration } => {
                write!(f, "spawn duration must be finite and >= 0, got {duration}")
            }
            Self::InvalidWaveCount { wave_count } => {
                write!(
                    f,
                    "wave count must be between 1 and {MAX_WAVE_COUNT}, got {wave_count}"
                )
            }
            Self::InvalidTimeline { timeline } => {
                write!(
                    f,
                    "wave timeline must be finite and leave each wave at least 0.00001s, got {timeline}"
                )
            }
            Self::Io { path, source } => {
                write!(f, "i/o error on {}: {source}", path.display())
            }
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Unsorted {
                index,
                previous,
                current,
            } => {
                write!(
                    f,
                    "entity {index} spawns at {current}s, before previous entity at {previous}s"
                )
            }
            Self::UnknownEntityType { index, kind } => {
                write!(f, "entity {index} has unknown type {kind}")
            }
            Self::SpawnTimeOutOfRange { index, spawn_time } => {
                write!(f, "entity {index} has invalid spawn time {spawn_time}")
            }
            Self::EmptyTextureRect { index } => {
                write!(f, "entity {index} has an empty texture rect")
            }
            Self::OffscreenColumn { index, x, expected } => {
                write!(f, "entity {index} spawns at x={x}, expected x={expected}")
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FixtureError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
