//! Enemy spawn fixtures for server stress tests.
//!
//! A fixture is a JSON document listing enemy spawn events, ordered by spawn
//! time, that the game server loads and replays. This crate provides:
//!
//! - The fixture data model and its JSON shape
//! - Uniform and wave-clustered generators
//! - Summary statistics for generated fixtures
//! - Validation against the server loader's expectations
//!
//! # Design Principles
//!
//! - **Reproducible** - Generators take any [`rand::Rng`], so a seeded RNG
//!   yields identical fixtures.
//! - **Quiet** - The library never prints; progress goes through callbacks
//!   and diagnostics through `tracing`.

pub mod catalog;
mod error;
mod generate;
mod io;
mod summary;
mod types;
mod validate;

pub use error::{FixtureError, FixtureResult};
pub use generate::{
    generate_uniform, generate_uniform_with_progress, generate_waves, UniformConfig, WaveConfig,
    WaveWindow, DEFAULT_SPAWN_DURATION, DEFAULT_WAVE_COUNT, DEFAULT_WAVE_TIMELINE,
    MAX_WAVE_COUNT, PROGRESS_INTERVAL, UNIFORM_Y_RANGE, WAVE_Y_RANGE,
};
pub use io::{read_document, write_document};
pub use summary::{FixtureSummary, WaveSummary};
pub use types::{
    round_spawn_time, EntityRecord, FixtureDocument, SpriteDef, TextureRect, ENEMY_TYPE,
    MAX_KNOWN_TYPE, SPAWN_COLUMN, SPAWN_TIME_STEPS_PER_SECOND,
};
