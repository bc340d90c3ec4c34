use alloc::boxed::Box;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// A tile about to be dropped into an empty cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub coords: Coord2,
    pub tile: Tile,
}

impl Placement {
    pub const fn new(coords: Coord2, tile: Tile) -> Self {
        Self { coords, tile }
    }
}

/// Source of spawned tiles.
pub trait TileGenerator {
    /// Chooses one of the `free` cells and the tile to put there.
    ///
    /// `free` is never empty. Returning `None` skips the spawn.
    fn next_placement(&mut self, free: &[Coord2]) -> Option<Placement>;
}

impl<G: TileGenerator + ?Sized> TileGenerator for &mut G {
    fn next_placement(&mut self, free: &[Coord2]) -> Option<Placement> {
        (**self).next_placement(free)
    }
}

impl<G: TileGenerator + ?Sized> TileGenerator for Box<G> {
    fn next_placement(&mut self, free: &[Coord2]) -> Option<Placement> {
        (**self).next_placement(free)
    }
}

/// How likely a spawned tile is a 4 rather than a 2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnDistribution {
    /// Fair coin between 2 and 4.
    Uniform,
    /// One 4 for every nine 2s.
    Classic,
}

impl SpawnDistribution {
    pub const fn four_probability(self) -> f64 {
        match self {
            Self::Uniform => 0.5,
            Self::Classic => 0.1,
        }
    }
}

impl Default for SpawnDistribution {
    fn default() -> Self {
        Self::Uniform
    }
}
