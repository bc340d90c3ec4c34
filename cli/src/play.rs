use twenty48_core::*;
use twenty48_protocol::{ReplayReport, TurnStats};

/// Order in which the self-play policy tries directions, keeping tiles in the top-left corner.
const PRIORITY: [Direction; 4] = [
    Direction::Left,
    Direction::Up,
    Direction::Right,
    Direction::Down,
];

/// First direction in [`PRIORITY`] that changes the grid.
fn pick_direction<G: TileGenerator>(engine: &GridEngine<G>) -> Option<Direction> {
    PRIORITY.into_iter().find(|&dir| engine.can_move_in(dir))
}

pub(crate) fn self_play(config: GameConfig, seed: u64, max_turns: usize) -> ReplayReport {
    let mut engine = GridEngine::from_seed(config, seed);
    let mut stats = TurnStats::default();

    while stats.turns < max_turns {
        let input = pick_direction(&engine).map(Input::Move);
        let outcome = engine.turn(input);
        stats.record(outcome);

        if matches!(outcome, TurnOutcome::Ended) {
            break;
        }
    }

    if !engine.is_game_over() {
        log::warn!("stopped after {} turns with moves left", stats.turns);
    }

    ReplayReport {
        seed,
        stats,
        snapshot: Snapshot::from_engine(&engine),
    }
}
