//! Replay scripts and reports exchanged with the engine from outside.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use twenty48_core::*;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid move token {token:?} at position {index}")]
    InvalidToken { index: usize, token: String },
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Malformed replay script")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Single scripted input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Left,
    Right,
    Up,
    Down,
    Restart,
}

impl From<Direction> for Token {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
        }
    }
}

impl From<Token> for Input {
    fn from(token: Token) -> Self {
        match token {
            Token::Left => Input::Move(Direction::Left),
            Token::Right => Input::Move(Direction::Right),
            Token::Up => Input::Move(Direction::Up),
            Token::Down => Input::Move(Direction::Down),
            Token::Restart => Input::Restart,
        }
    }
}

/// Parses moves written either as words (`"left up"`) or compactly (`"LLUR"`).
///
/// Words and letter runs may be mixed and separated by whitespace or commas.
pub fn parse_moves(text: &str) -> Result<Vec<Direction>> {
    let mut moves = Vec::new();
    let tokens = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty());

    for (index, token) in tokens.enumerate() {
        if let Ok(direction) = token.parse::<Direction>() {
            moves.push(direction);
            continue;
        }

        let letters: core::result::Result<Vec<Direction>, GameError> =
            token.chars().map(Direction::try_from).collect();
        match letters {
            Ok(letters) => moves.extend(letters),
            Err(_) => {
                return Err(ProtocolError::InvalidToken {
                    index,
                    token: token.to_owned(),
                });
            }
        }
    }

    Ok(moves)
}

/// A seeded game and the inputs to feed it, one per turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub config: GameConfig,
    pub seed: u64,
    pub inputs: Vec<Token>,
}

impl ReplayScript {
    pub fn new(config: GameConfig, seed: u64, inputs: Vec<Token>) -> Self {
        Self {
            config,
            seed,
            inputs,
        }
    }

    pub fn from_moves(config: GameConfig, seed: u64, moves: &str) -> Result<Self> {
        let inputs = parse_moves(moves)?.into_iter().map(Token::from).collect();
        Ok(Self::new(config, seed, inputs))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.config.size < MIN_GRID_SIZE {
            return Err(GameError::GridTooSmall.into());
        }
        Ok(())
    }
}

/// Running tally of turn outcomes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    pub turns: usize,
    pub moves_applied: usize,
    pub blocked: usize,
    pub merges: usize,
    pub tiles_spawned: usize,
    pub restarts: usize,
    /// Turn at which the last game ended, if it did.
    pub ended_at_turn: Option<usize>,
}

impl TurnStats {
    pub fn record(&mut self, outcome: TurnOutcome) {
        use TurnOutcome::*;

        self.turns += 1;
        match outcome {
            Idle | Finished => {}
            Moved { outcome, spawned } => {
                self.moves_applied += 1;
                self.merges += usize::from(outcome.merges);
                self.tiles_spawned += usize::from(spawned.is_some());
            }
            Blocked => self.blocked += 1,
            Ended => self.ended_at_turn = Some(self.turns),
            Restarted { spawned } => {
                self.restarts += 1;
                self.tiles_spawned += usize::from(spawned.is_some());
                self.ended_at_turn = None;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub seed: u64,
    pub stats: TurnStats,
    pub snapshot: Snapshot,
}

/// Feeds `inputs` to `engine`, one per turn.
pub fn drive<G, I>(engine: &mut GridEngine<G>, inputs: I) -> TurnStats
where
    G: TileGenerator,
    I: IntoIterator<Item = Input>,
{
    let mut stats = TurnStats::default();
    for input in inputs {
        let outcome = engine.turn(Some(input));
        log::debug!("turn {}: {:?} -> {:?}", stats.turns + 1, input, outcome);
        stats.record(outcome);
    }
    stats
}

/// Plays `script` on a freshly seeded engine.
///
/// The final snapshot is taken after checking for a terminal grid, so a
/// script whose last move fills the board reports the game as over.
pub fn run_replay(script: &ReplayScript) -> Result<ReplayReport> {
    script.validate()?;

    let mut engine = GridEngine::from_seed(script.config, script.seed);
    let stats = drive(&mut engine, script.inputs.iter().copied().map(Input::from));
    engine.check_game_over();

    Ok(ReplayReport {
        seed: script.seed,
        stats,
        snapshot: Snapshot::from_engine(&engine),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_and_word_moves() {
        use Direction::*;

        assert_eq!(parse_moves("LLUR").unwrap(), vec![Left, Left, Up, Right]);
        assert_eq!(
            parse_moves("left, down\tup ←").unwrap(),
            vec![Left, Down, Up, Left]
        );
        assert!(parse_moves("  ").unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_tokens_with_position() {
        let err = parse_moves("left LRX up").unwrap_err();

        match err {
            ProtocolError::InvalidToken { index, token } => {
                assert_eq!(index, 1);
                assert_eq!(token, "LRX");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn script_json_uses_plain_tokens() {
        let script = ReplayScript::from_json(
            r#"{ "config": { "size": 3, "spawn": "classic" }, "seed": 9, "inputs": ["left", "restart", "up"] }"#,
        )
        .unwrap();

        assert_eq!(
            script.config,
            GameConfig::new(3, SpawnDistribution::Classic)
        );
        assert_eq!(script.inputs, vec![Token::Left, Token::Restart, Token::Up]);
        assert_eq!(ReplayScript::from_json(&script.to_json().unwrap()).unwrap(), script);
    }

    #[test]
    fn script_without_config_uses_defaults() {
        let script = ReplayScript::from_json(r#"{ "seed": 1, "inputs": [] }"#).unwrap();

        assert_eq!(script.config, GameConfig::default());
    }

    #[test]
    fn script_with_degenerate_grid_is_rejected() {
        let err = ReplayScript::from_json(
            r#"{ "config": { "size": 1, "spawn": "uniform" }, "seed": 1, "inputs": [] }"#,
        )
        .unwrap_err();

        assert!(matches!(err, ProtocolError::Game(GameError::GridTooSmall)));
        assert!(matches!(
            ReplayScript::from_json("{").unwrap_err(),
            ProtocolError::Json(_)
        ));
    }

    #[test]
    fn replay_is_deterministic_per_seed() {
        let script = ReplayScript::from_moves(GameConfig::default(), 77, "LURDLURDLURD").unwrap();

        let first = run_replay(&script).unwrap();
        let second = run_replay(&script).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.stats.turns, 12);
        assert_eq!(first.stats.ended_at_turn, None);
        assert_eq!(first.stats.moves_applied + first.stats.blocked, 12);
        assert_eq!(
            first.snapshot.cells.iter().flatten().filter(|&&t| t != 0).count(),
            1 + first.stats.tiles_spawned - first.stats.merges
        );
    }

    #[test]
    fn restart_resets_score_and_tally_end() {
        let script = ReplayScript::new(
            GameConfig::default(),
            5,
            vec![Token::Left, Token::Right, Token::Restart],
        );

        let report = run_replay(&script).unwrap();

        assert_eq!(report.stats.restarts, 1);
        assert_eq!(report.snapshot.score, 0);
        assert_eq!(
            report.snapshot.cells.iter().flatten().filter(|&&t| t != 0).count(),
            1
        );
    }
}
