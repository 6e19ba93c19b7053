//! Uniform and wave spawn generators.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use crate::catalog::{self, UNIFORM_SPRITES, WAVE_SPRITES};
use crate::error::{FixtureError, FixtureResult};
use crate::types::{
    round_spawn_time, EntityRecord, FixtureDocument, SpriteDef, SPAWN_TIME_STEPS_PER_SECOND,
};

/// Default spawn window for uniform fixtures, in seconds.
pub const DEFAULT_SPAWN_DURATION: f64 = 120.0;
/// Default number of waves.
pub const DEFAULT_WAVE_COUNT: u32 = 10;
/// Largest accepted wave count.
pub const MAX_WAVE_COUNT: u32 = 100_000;
/// Length of the timeline waves are laid out on, in seconds.
pub const DEFAULT_WAVE_TIMELINE: f64 = 120.0;
/// Progress is reported after every this many generated entities.
pub const PROGRESS_INTERVAL: usize = 1000;

/// Rows uniform enemies may spawn on.
pub const UNIFORM_Y_RANGE: RangeInclusive<i32> = 50..=1030;
/// Rows wave enemies may spawn on.
pub const WAVE_Y_RANGE: RangeInclusive<i32> = 100..=980;

/// Parameters for a uniformly random spawn schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformConfig {
    /// Number of entities to generate.
    pub entity_count: usize,
    /// Spawn times are drawn from `[0, spawn_duration]`.
    pub spawn_duration: f64,
}

impl Default for UniformConfig {
    fn default() -> Self {
        Self {
            entity_count: 0,
            spawn_duration: DEFAULT_SPAWN_DURATION,
        }
    }
}

impl UniformConfig {
    #[must_use]
    pub const fn new(entity_count: usize, spawn_duration: f64) -> Self {
        Self {
            entity_count,
            spawn_duration,
        }
    }

    pub fn validate(&self) -> FixtureResult<()> {
        if !self.spawn_duration.is_finite() || self.spawn_duration < 0.0 {
            return Err(FixtureError::InvalidDuration {
                duration: self.spawn_duration,
            });
        }
        Ok(())
    }
}

/// Parameters for a clustered wave schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    /// Requested entity total; truncated to a multiple of `wave_count`.
    pub entity_count: usize,
    pub wave_count: u32,
    /// Seconds of timeline split evenly between waves.
    pub timeline: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            entity_count: 0,
            wave_count: DEFAULT_WAVE_COUNT,
            timeline: DEFAULT_WAVE_TIMELINE,
        }
    }
}

impl WaveConfig {
    /// Creates a wave config on the default timeline.
    #[must_use]
    pub const fn new(entity_count: usize, wave_count: u32) -> Self {
        Self {
            entity_count,
            wave_count,
            timeline: DEFAULT_WAVE_TIMELINE,
        }
    }

    pub fn validate(&self) -> FixtureResult<()> {
        if !(1..=MAX_WAVE_COUNT).contains(&self.wave_count) {
            return Err(FixtureError::InvalidWaveCount {
                wave_count: self.wave_count,
            });
        }
        // Every window must hold at least one 5-decimal spawn time.
        let window = self.segment_duration() * 0.5;
        if !self.timeline.is_finite() || window < 1.0 / SPAWN_TIME_STEPS_PER_SECOND {
            return Err(FixtureError::InvalidTimeline {
                timeline: self.timeline,
            });
        }
        Ok(())
    }

    /// Entities spawned by each wave.
    #[must_use]
    pub fn entities_per_wave(&self) -> usize {
        match self.wave_count {
            0 => 0,
            waves => self.entity_count / waves as usize,
        }
    }

    /// Entities the generator will actually emit.
    #[must_use]
    pub fn total_entities(&self) -> usize {
        self.entities_per_wave() * self.wave_count as usize
    }

    /// Length of one wave's timeline segment.
    #[must_use]
    pub fn segment_duration(&self) -> f64 {
        self.timeline / f64::from(self.wave_count)
    }

    /// Spawn windows, one per wave, in timeline order.
    pub fn windows(&self) -> impl Iterator<Item = WaveWindow> {
        let segment = self.segment_duration();
        (0..self.wave_count).map(move |index| {
            let start = f64::from(index) * segment;
            WaveWindow {
                index,
                start,
                end: start + segment * 0.5,
            }
        })
    }
}

/// Spawn window of one wave: the first half of its timeline segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveWindow {
    pub index: u32,
    pub start: f64,
    pub end: f64,
}

impl WaveWindow {
    #[must_use]
    pub fn contains(&self, spawn_time: f64) -> bool {
        (self.start..=self.end).contains(&spawn_time)
    }
}

/// Generates a uniform fixture without progress reporting.
pub fn generate_uniform<R: Rng + ?Sized>(
    config: &UniformConfig,
    rng: &mut R,
) -> FixtureResult<FixtureDocument> {
    generate_uniform_with_progress(config, rng, |_, _| {})
}

/// Generates a uniform fixture.
///
/// `progress` is called with `(generated, total)` every [`PROGRESS_INTERVAL`]
/// entities, never for zero.
pub fn generate_uniform_with_progress<R, F>(
    config: &UniformConfig,
    rng: &mut R,
    mut progress: F,
) -> FixtureResult<FixtureDocument>
where
    R: Rng + ?Sized,
    F: FnMut(usize, usize),
{
    config.validate()?;
    debug!(
        entity_count = config.entity_count,
        spawn_duration = config.spawn_duration,
        "generating uniform fixture"
    );

    let mut entities = Vec::with_capacity(config.entity_count);
    for idx in 0..config.entity_count {
        if idx > 0 && idx % PROGRESS_INTERVAL == 0 {
            progress(idx, config.entity_count);
        }
        entities.push(sample_entity(
            &UNIFORM_SPRITES,
            UNIFORM_Y_RANGE,
            0.0,
            config.spawn_duration,
            rng,
        ));
    }

    debug!(count = entities.len(), "sorting entities by spawn time");
    Ok(FixtureDocument::from_entities(entities))
}

/// Generates a wave fixture.
pub fn generate_waves<R: Rng + ?Sized>(
    config: &WaveConfig,
    rng: &mut R,
) -> FixtureResult<FixtureDocument> {
    config.validate()?;
    let per_wave = config.entities_per_wave();
    debug!(
        wave_count = config.wave_count,
        per_wave,
        timeline = config.timeline,
        "generating wave fixture"
    );

    let mut entities = Vec::with_capacity(config.total_entities());
    for window in config.windows() {
        for _ in 0..per_wave {
            entities.push(sample_entity(
                &WAVE_SPRITES,
                WAVE_Y_RANGE,
                window.start,
                window.end,
                rng,
            ));
        }
    }

    debug!(count = entities.len(), "sorting entities by spawn time");
    Ok(FixtureDocument::from_entities(entities))
}

fn sample_entity<R: Rng + ?Sized>(
    catalog: &[SpriteDef],
    rows: RangeInclusive<i32>,
    earliest: f64,
    latest: f64,
    rng: &mut R,
) -> EntityRecord {
    let sprite = catalog::choose(catalog, rng).expect("sprite catalogs are non-empty");
    let y = rng.gen_range(rows);
    let spawn_time = sample_spawn_time(earliest, latest, rng);
    EntityRecord::enemy(sprite, y, spawn_time)
}

/// Samples a spawn time on the 5-decimal grid inside `[earliest, latest]`.
///
/// A window holding no grid point yields the grid point nearest `earliest`;
/// validated configs never produce one.
fn sample_spawn_time<R: Rng + ?Sized>(earliest: f64, latest: f64, rng: &mut R) -> f64 {
    let (first, last) = grid_steps(earliest, latest);
    if first > last {
        return round_spawn_time(earliest);
    }
    let raw = rng.gen_range(earliest..=latest);
    let step = (raw * SPAWN_TIME_STEPS_PER_SECOND).round().clamp(first, last);
    step / SPAWN_TIME_STEPS_PER_SECOND
}

/// First and last grid steps whose spawn time lies inside the window.
fn grid_steps(earliest: f64, latest: f64) -> (f64, f64) {
    let mut first = (earliest * SPAWN_TIME_STEPS_PER_SECOND).ceil();
    while first / SPAWN_TIME_STEPS_PER_SECOND < earliest {
        first += 1.0;
    }
    let mut last = (latest * SPAWN_TIME_STEPS_PER_SECOND).floor();
    while last / SPAWN_TIME_STEPS_PER_SECOND > latest {
        last -= 1.0;
    }
    (first, last)
}
