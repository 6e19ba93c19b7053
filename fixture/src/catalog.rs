//! Sprite catalogs enemies are drawn from.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{SpriteDef, TextureRect};

const ENEMY_RECT: TextureRect = TextureRect::new(0, 0, 33, 36);

/// Sprites used by uniform fixtures.
pub const UNIFORM_SPRITES: [SpriteDef; 4] = [
    SpriteDef {
        path: "assets/sprites/r-typesheet5.png",
        rect: ENEMY_RECT,
    },
    SpriteDef {
        path: "assets/sprites/r-typesheet9.png",
        rect: ENEMY_RECT,
    },
    SpriteDef {
        path: "assets/sprites/r-typesheet10.png",
        rect: ENEMY_RECT,
    },
    SpriteDef {
        path: "assets/sprites/r-typesheet11.png",
        rect: ENEMY_RECT,
    },
];

/// Sprites used by wave fixtures.
pub const WAVE_SPRITES: [SpriteDef; 3] = [
    UNIFORM_SPRITES[0],
    UNIFORM_SPRITES[1],
    UNIFORM_SPRITES[2],
];

/// Picks one sprite uniformly at random, or `None` for an empty catalog.
pub fn choose<'a, R: Rng + ?Sized>(
    catalog: &'a [SpriteDef],
    rng: &mut R,
) -> Option<&'a SpriteDef> {
    catalog.choose(rng)
}
