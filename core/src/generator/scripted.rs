use alloc::collections::VecDeque;

use super::*;

/// Replays a fixed list of placements, in order.
///
/// Placements aimed at an occupied cell are dropped with a warning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedTileGenerator {
    queue: VecDeque<Placement>,
}

impl ScriptedTileGenerator {
    pub fn new(placements: impl IntoIterator<Item = Placement>) -> Self {
        Self {
            queue: placements.into_iter().collect(),
        }
    }

    pub fn push(&mut self, placement: Placement) {
        self.queue.push_back(placement);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl TileGenerator for ScriptedTileGenerator {
    fn next_placement(&mut self, free: &[Coord2]) -> Option<Placement> {
        while let Some(placement) = self.queue.pop_front() {
            if free.contains(&placement.coords) {
                return Some(placement);
            }
            log::warn!(
                "Scripted placement at {:?} skipped, cell is occupied",
                placement.coords
            );
        }
        None
    }
}
