use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Playing,
    GameOver,
}

impl EngineState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Playing
    }
}

/// One discrete input per turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Input {
    Move(Direction),
    Restart,
}

impl From<Direction> for Input {
    fn from(direction: Direction) -> Self {
        Self::Move(direction)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// No input this turn.
    Idle,
    /// The move was accepted and a tile possibly spawned.
    Moved {
        outcome: MoveOutcome,
        spawned: Option<Placement>,
    },
    /// The direction produced no change.
    Blocked,
    /// No move was possible, the game just ended.
    Ended,
    /// The game was already over, input ignored.
    Finished,
    /// The grid was reset.
    Restarted { spawned: Option<Placement> },
}

impl TurnOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use TurnOutcome::*;
        match self {
            Idle => false,
            Moved { .. } => true,
            Blocked => false,
            Ended => true,
            Finished => false,
            Restarted { .. } => true,
        }
    }
}

/// Owns the grid, the score and the tile source of one game session.
#[derive(Clone, Debug)]
pub struct GridEngine<G = RandomTileGenerator> {
    grid: Grid,
    score: Score,
    state: EngineState,
    generator: G,
}

impl GridEngine<RandomTileGenerator> {
    /// Fresh game whose spawns come from a seeded generator.
    pub fn from_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(
            config,
            RandomTileGenerator::from_seed(seed, config.spawn),
        )
    }
}

impl<G: TileGenerator> GridEngine<G> {
    /// Empty grid of the configured size with one spawned tile.
    pub fn new(config: GameConfig, generator: G) -> Self {
        let mut engine = Self::resume(Grid::new(config.size), 0, generator);
        engine.spawn_tile();
        engine
    }

    /// Continues from an existing grid and score, spawning nothing.
    pub fn resume(grid: Grid, score: Score, generator: G) -> Self {
        Self {
            grid,
            score,
            state: Default::default(),
            generator,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Tile {
        self.grid[coords]
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// Collapses the grid towards `direction` and adds the merge gains to the score.
    ///
    /// Does not spawn, callers spawn only when the outcome reports a move.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.grid.shift(direction);
        self.score += outcome.score_delta;
        log::trace!("move {} -> {:?}", direction, outcome);
        outcome
    }

    /// Whether any direction would change the grid.
    pub fn can_move(&self) -> bool {
        Direction::ALL.into_iter().any(|dir| self.can_move_in(dir))
    }

    pub fn can_move_in(&self, direction: Direction) -> bool {
        self.grid.can_shift(direction)
    }

    /// Drops a new tile into a free cell, if there is one.
    pub fn spawn_tile(&mut self) -> Option<Placement> {
        let free = self.grid.empty_cells();
        if free.is_empty() {
            return None;
        }

        let placement = self.generator.next_placement(&free)?;
        assert!(
            free.contains(&placement.coords),
            "generator picked occupied cell {:?}",
            placement.coords
        );
        self.grid.place(placement.coords, placement.tile);
        log::trace!("spawned {} at {:?}", placement.tile, placement.coords);
        Some(placement)
    }

    /// Empties the grid, zeroes the score and spawns one tile.
    pub fn reset(&mut self) -> Option<Placement> {
        self.grid.clear();
        self.score = 0;
        self.state = EngineState::Playing;
        log::debug!("game reset");
        self.spawn_tile()
    }

    /// Ends the game when no direction can move.
    pub fn check_game_over(&mut self) -> EngineState {
        if self.state.is_playing() && !self.can_move() {
            log::debug!("no moves left, final score {}", self.score);
            self.state = EngineState::GameOver;
        }
        self.state
    }

    /// Runs one turn of the control loop.
    ///
    /// Restart is honored in any state. Otherwise a finished game ignores
    /// input, a game without moves ends, and an accepted move spawns a tile
    /// only when it changed the grid.
    pub fn turn(&mut self, input: Option<Input>) -> TurnOutcome {
        use TurnOutcome::*;

        if let Some(Input::Restart) = input {
            let spawned = self.reset();
            return Restarted { spawned };
        }

        if self.state.is_finished() {
            return Finished;
        }

        if self.check_game_over().is_finished() {
            return Ended;
        }

        let Some(Input::Move(direction)) = input else {
            return Idle;
        };

        let outcome = self.apply_move(direction);
        if outcome.has_update() {
            let spawned = self.spawn_tile();
            Moved { outcome, spawned }
        } else {
            Blocked
        }
    }
}
