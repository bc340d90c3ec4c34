#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use snapshot::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod snapshot;
mod types;

/// Side length used when nothing else is requested.
pub const DEFAULT_GRID_SIZE: Coord = 4;

/// Smallest grid on which tiles can still slide.
pub const MIN_GRID_SIZE: Coord = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub spawn: SpawnDistribution,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, spawn: SpawnDistribution) -> Self {
        Self { size, spawn }
    }

    pub fn new(size: Coord, spawn: SpawnDistribution) -> Self {
        if size < MIN_GRID_SIZE {
            log::warn!(
                "Grid size {} is too small, clamped to {}",
                size,
                MIN_GRID_SIZE
            );
        }
        Self::new_unchecked(size.max(MIN_GRID_SIZE), spawn)
    }

    pub const fn total_cells(&self) -> usize {
        self.size as usize * self.size as usize
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_GRID_SIZE, SpawnDistribution::Uniform)
    }
}

/// Result of collapsing the grid in one direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Whether any cell changed.
    pub moved: bool,
    /// Sum of the tiles created by merges.
    pub score_delta: Score,
    /// Number of merges performed.
    pub merges: u16,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        self.moved
    }

    pub(crate) fn record_slide(&mut self) {
        self.moved = true;
    }

    pub(crate) fn record_merge(&mut self, merged: Tile) {
        self.moved = true;
        self.score_delta += Score::from(merged);
        self.merges += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_degenerate_size() {
        let config = GameConfig::new(1, SpawnDistribution::Classic);

        assert_eq!(config.size, MIN_GRID_SIZE);
        assert_eq!(config.spawn, SpawnDistribution::Classic);
        assert_eq!(config.total_cells(), 4);
    }

    #[test]
    fn default_config_is_classic_four_by_four_with_uniform_spawns() {
        let config = GameConfig::default();

        assert_eq!(config.size, 4);
        assert_eq!(config.spawn, SpawnDistribution::Uniform);
    }

    #[test]
    fn merge_records_post_merge_value() {
        let mut outcome = MoveOutcome::default();
        assert!(!outcome.has_update());

        outcome.record_merge(16);
        outcome.record_merge(4);

        assert!(outcome.has_update());
        assert_eq!(outcome.score_delta, 20);
        assert_eq!(outcome.merges, 2);
    }
}
