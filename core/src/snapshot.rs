use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of a game handed to whatever presents it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord,
    /// Row-major cell values, zero for empty cells.
    pub cells: Vec<Vec<Tile>>,
    pub score: Score,
    pub game_over: bool,
}

impl Snapshot {
    pub fn from_engine<G: TileGenerator>(engine: &GridEngine<G>) -> Self {
        Self {
            size: engine.size(),
            cells: engine.grid().to_rows(),
            score: engine.score(),
            game_over: engine.is_game_over(),
        }
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Score line, then one line per row with empty cells left blank.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;

        let width = self.max_tile().checked_ilog10().map_or(1, |d| d as usize + 1);
        for row in &self.cells {
            for (col, &tile) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                if tile == 0 {
                    write!(f, "{:>width$}", "")?;
                } else {
                    write!(f, "{tile:>width$}")?;
                }
            }
            writeln!(f)?;
        }

        if self.game_over {
            writeln!(f, "GAME OVER! Restart to play again")?;
        }
        Ok(())
    }
}
