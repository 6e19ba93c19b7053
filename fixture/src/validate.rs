//! Checks a fixture against what the server's enemy loader expects.

use crate::error::{FixtureError, FixtureResult};
use crate::types::{FixtureDocument, MAX_KNOWN_TYPE, SPAWN_COLUMN};

impl FixtureDocument {
    /// Validates document invariants, returning the first violation.
    pub fn validate(&self) -> FixtureResult<()> {
        let mut previous: Option<f64> = None;
        for (index, entity) in self.entities.iter().enumerate() {
            if !entity.spawn_time.is_finite() || entity.spawn_time < 0.0 {
                return Err(FixtureError::SpawnTimeOutOfRange {
                    index,
                    spawn_time: entity.spawn_time,
                });
            }
            if let Some(previous) = previous {
                if entity.spawn_time < previous {
                    return Err(FixtureError::Unsorted {
                        index,
                        previous,
                        current: entity.spawn_time,
                    });
                }
            }
            previous = Some(entity.spawn_time);

            if !(1..=MAX_KNOWN_TYPE).contains(&entity.kind) {
                return Err(FixtureError::UnknownEntityType {
                    index,
                    kind: entity.kind,
                });
            }
            if entity.x != SPAWN_COLUMN {
                return Err(FixtureError::OffscreenColumn {
                    index,
                    x: entity.x,
                    expected: SPAWN_COLUMN,
                });
            }
            if entity.texture_rect.is_empty() {
                return Err(FixtureError::EmptyTextureRect { index });
            }
        }
        Ok(())
    }
}
