//! Fixture document types.

use serde::{Deserialize, Serialize};

/// Entity type the server spawns as a basic enemy.
pub const ENEMY_TYPE: u8 = 1;

/// Highest entity type the server's enemy loader understands.
pub const MAX_KNOWN_TYPE: u8 = 4;

/// Horizontal spawn coordinate, just past the right edge of a 1920px screen.
pub const SPAWN_COLUMN: i32 = 1920;

/// Crop rectangle inside a sprite sheet, serialized as `[left, top, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct TextureRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl TextureRect {
    #[must_use]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns true if the rect covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<[i32; 4]> for TextureRect {
    fn from([left, top, width, height]: [i32; 4]) -> Self {
        Self::new(left, top, width, height)
    }
}

impl From<TextureRect> for [i32; 4] {
    fn from(rect: TextureRect) -> Self {
        [rect.left, rect.top, rect.width, rect.height]
    }
}

/// A sprite sheet and the crop the server animates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteDef {
    pub path: &'static str,
    pub rect: TextureRect,
}

/// One spawn event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(rename = "type")]
    pub kind: u8,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "spawnTime")]
    pub spawn_time: f64,
    #[serde(rename = "spritePath")]
    pub sprite_path: String,
    #[serde(rename = "textureRect")]
    pub texture_rect: TextureRect,
}

impl EntityRecord {
    /// Builds an enemy record spawning off-screen at row `y`.
    #[must_use]
    pub fn enemy(sprite: &SpriteDef, y: i32, spawn_time: f64) -> Self {
        Self {
            kind: ENEMY_TYPE,
            x: SPAWN_COLUMN,
            y,
            spawn_time,
            sprite_path: sprite.path.to_owned(),
            texture_rect: sprite.rect,
        }
    }
}

/// Top-level fixture document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureDocument {
    pub entities: Vec<EntityRecord>,
}

impl FixtureDocument {
    /// Builds a document, ordering entities by spawn time.
    ///
    /// The sort is stable, so entities sharing a spawn time keep their
    /// generation order.
    #[must_use]
    pub fn from_entities(mut entities: Vec<EntityRecord>) -> Self {
        sort_by_spawn_time(&mut entities);
        Self { entities }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Earliest spawn time, if any entity exists.
    #[must_use]
    pub fn first_spawn(&self) -> Option<f64> {
        self.entities.first().map(|entity| entity.spawn_time)
    }

    /// Latest spawn time, if any entity exists.
    #[must_use]
    pub fn last_spawn(&self) -> Option<f64> {
        self.entities.last().map(|entity| entity.spawn_time)
    }
}

pub(crate) fn sort_by_spawn_time(entities: &mut [EntityRecord]) {
    entities.sort_by(|a, b| a.spawn_time.total_cmp(&b.spawn_time));
}

/// Spawn times are kept on a grid of this many steps per second (5 decimals).
pub const SPAWN_TIME_STEPS_PER_SECOND: f64 = 100_000.0;

/// Rounds seconds to 5 decimal places.
#[must_use]
pub fn round_spawn_time(seconds: f64) -> f64 {
    (seconds * SPAWN_TIME_STEPS_PER_SECOND).round() / SPAWN_TIME_STEPS_PER_SECOND
}
