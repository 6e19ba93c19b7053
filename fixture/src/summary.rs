//! Post-generation statistics.

use serde::Serialize;

use crate::generate::WaveConfig;
use crate::types::FixtureDocument;

/// Statistics for a uniform fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureSummary {
    pub entity_count: usize,
    pub spawn_duration: f64,
    /// `None` when the fixture is empty.
    pub first_spawn: Option<f64>,
    pub last_spawn: Option<f64>,
    /// Entities per second; a zero duration counts as one second.
    pub avg_spawn_rate: f64,
}

impl FixtureSummary {
    #[must_use]
    pub fn from_document(doc: &FixtureDocument, spawn_duration: f64) -> Self {
        let entity_count = doc.len();
        let avg_spawn_rate = if spawn_duration > 0.0 {
            entity_count as f64 / spawn_duration
        } else {
            entity_count as f64
        };
        Self {
            entity_count,
            spawn_duration,
            first_spawn: doc.first_spawn(),
            last_spawn: doc.last_spawn(),
            avg_spawn_rate,
        }
    }
}

/// Statistics for a wave fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaveSummary {
    pub wave_count: u32,
    pub entities_per_wave: usize,
    pub entity_count: usize,
}

impl WaveSummary {
    #[must_use]
    pub fn from_document(doc: &FixtureDocument, config: &WaveConfig) -> Self {
        Self {
            wave_count: config.wave_count,
            entities_per_wave: config.entities_per_wave(),
            entity_count: doc.len(),
        }
    }
}
