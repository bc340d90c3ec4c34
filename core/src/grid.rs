use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square board of tiles indexed by `(row, column)`.
///
/// Serialized as a list of rows; deserialization goes through [`Grid::from_rows`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Grid {
    cells: Array2<Tile>,
}

impl Grid {
    /// Empty grid of `size` by `size` cells.
    ///
    /// Panics when `size` is below [`MIN_GRID_SIZE`].
    pub fn new(size: Coord) -> Self {
        assert!(
            size >= MIN_GRID_SIZE,
            "grid size {size} is below the minimum of {MIN_GRID_SIZE}"
        );
        Self {
            cells: Array2::default((size, size).to_nd_index()),
        }
    }

    /// Builds a grid from row-major values, validating shape and tile values.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        if size < usize::from(MIN_GRID_SIZE) {
            return Err(GameError::GridTooSmall);
        }
        if size > usize::from(Coord::MAX) || rows.iter().any(|row| row.as_ref().len() != size) {
            return Err(GameError::InvalidBoardShape);
        }
        if let Some(&bad) = rows
            .iter()
            .flat_map(|row| row.as_ref())
            .find(|&&value| !is_tile_value(value))
        {
            return Err(GameError::InvalidTileValue(bad));
        }

        Ok(Self {
            cells: Array2::from_shape_fn((size, size), |(row, col)| rows[row].as_ref()[col]),
        })
    }

    pub fn size(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn cells(&self) -> &Array2<Tile> {
        &self.cells
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|&(_, &tile)| tile == 0)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&tile| tile != 0).count()
    }

    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&tile| u64::from(tile)).sum()
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&tile| tile != 0)
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub(crate) fn place(&mut self, coords: Coord2, tile: Tile) {
        assert!(
            tile != 0 && is_tile_value(tile),
            "refusing to place invalid tile {tile}"
        );
        self.cells[coords.to_nd_index()] = tile;
    }

    /// Collapses every lane towards the edge `direction` points at.
    ///
    /// Each lane is scanned from its edge-most cell. A cell pulls in the
    /// nearest tile behind it: an empty cell takes it and keeps scanning, an
    /// equal tile merges and ends the scan, any other tile ends the scan.
    /// A merged tile is therefore never merged again in the same move.
    pub fn shift(&mut self, direction: Direction) -> MoveOutcome {
        let size = self.size();
        let mut outcome = MoveOutcome::default();

        for lane in 0..size {
            for near_step in 0..size - 1 {
                let near = lane_cell(direction, size, lane, near_step);
                for far_step in near_step + 1..size {
                    let far = lane_cell(direction, size, lane, far_step);
                    match Interaction::between(self[near], self[far]) {
                        Interaction::Skip => continue,
                        Interaction::Slide => {
                            let tile = self[far];
                            self.transfer(far, near, tile);
                            outcome.record_slide();
                        }
                        Interaction::Merge => {
                            let merged = self[far] * 2;
                            self.transfer(far, near, merged);
                            outcome.record_merge(merged);
                            break;
                        }
                        Interaction::Blocked => break,
                    }
                }
            }
        }

        outcome
    }

    /// Dry run of [`Grid::shift`], true when it would change anything.
    pub fn can_shift(&self, direction: Direction) -> bool {
        let size = self.size();

        (0..size).any(|lane| {
            (0..size - 1).any(|near_step| {
                let near = self[lane_cell(direction, size, lane, near_step)];
                (near_step + 1..size)
                    .map(|far_step| {
                        Interaction::between(near, self[lane_cell(direction, size, lane, far_step)])
                    })
                    .find(|&interaction| interaction != Interaction::Skip)
                    .is_some_and(|interaction| interaction != Interaction::Blocked)
            })
        })
    }

    fn transfer(&mut self, from: Coord2, to: Coord2, tile: Tile) {
        self.cells[to.to_nd_index()] = tile;
        self.cells[from.to_nd_index()] = 0;
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Grid {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<Grid> for Vec<Vec<Tile>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Interaction {
    /// Far cell is empty, look further.
    Skip,
    /// Near cell is empty and takes the far tile.
    Slide,
    /// Equal tiles combine into the near cell.
    Merge,
    /// Distinct tiles, or equal ones too large to double.
    Blocked,
}

impl Interaction {
    const fn between(near: Tile, far: Tile) -> Self {
        if far == 0 {
            Self::Skip
        } else if near == 0 {
            Self::Slide
        } else if near == far && near.checked_mul(2).is_some() {
            Self::Merge
        } else {
            Self::Blocked
        }
    }
}

/// Cell at `step` cells away from the edge `direction` points at.
const fn lane_cell(direction: Direction, size: Coord, lane: Coord, step: Coord) -> Coord2 {
    let last = size - 1;
    match direction {
        Direction::Left => (lane, step),
        Direction::Right => (lane, last - step),
        Direction::Up => (step, lane),
        Direction::Down => (last - step, lane),
    }
}
