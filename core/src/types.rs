use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Single coordinate axis used for grid size and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Cell value, zero is an empty cell and anything else a power of two.
pub type Tile = u32;

/// Score accumulator.
pub type Score = u64;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Whether `value` may be stored in a grid cell.
pub const fn is_tile_value(value: Tile) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// Direction tiles travel in, towards the edge of the same name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector `(dx, dy)`, `dx` runs along columns and `dy` along rows.
    pub const fn to_vector(self) -> (i8, i8) {
        use Direction::*;
        match self {
            Left => (-1, 0),
            Right => (1, 0),
            Up => (0, -1),
            Down => (0, 1),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub const fn opposite(self) -> Self {
        use Direction::*;
        match self {
            Left => Right,
            Right => Left,
            Up => Down,
            Down => Up,
        }
    }

    pub const fn as_str(self) -> &'static str {
        use Direction::*;
        match self {
            Left => "left",
            Right => "right",
            Up => "up",
            Down => "down",
        }
    }
}

impl TryFrom<(i8, i8)> for Direction {
    type Error = GameError;

    fn try_from(vector: (i8, i8)) -> Result<Self> {
        use Direction::*;
        match vector {
            (-1, 0) => Ok(Left),
            (1, 0) => Ok(Right),
            (0, -1) => Ok(Up),
            (0, 1) => Ok(Down),
            _ => Err(GameError::InvalidDirection),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = GameError;

    fn try_from(c: char) -> Result<Self> {
        use Direction::*;
        match c {
            'l' | 'L' | '←' => Ok(Left),
            'r' | 'R' | '→' => Ok(Right),
            'u' | 'U' | '↑' => Ok(Up),
            'd' | 'D' | '↓' => Ok(Down),
            _ => Err(GameError::InvalidDirection),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::try_from(c);
        }

        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str().eq_ignore_ascii_case(s))
            .ok_or(GameError::InvalidDirection)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_vectors_round_trip_and_diagonals_are_rejected() {
        for dir in Direction::ALL {
            assert_eq!(Direction::try_from(dir.to_vector()), Ok(dir));
        }

        assert_eq!(
            Direction::try_from((0, 0)),
            Err(GameError::InvalidDirection)
        );
        assert_eq!(
            Direction::try_from((1, 1)),
            Err(GameError::InvalidDirection)
        );
        assert_eq!(
            Direction::try_from((2, 0)),
            Err(GameError::InvalidDirection)
        );
    }

    #[test]
    fn parses_words_letters_and_arrows() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" down ".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("u".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("→".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(GameError::InvalidDirection)
        );
        assert_eq!("".parse::<Direction>(), Err(GameError::InvalidDirection));
    }

    #[test]
    fn tile_values_are_zero_or_powers_of_two() {
        assert!(is_tile_value(0));
        assert!(is_tile_value(2));
        assert!(is_tile_value(2048));
        assert!(!is_tile_value(1));
        assert!(!is_tile_value(3));
        assert!(!is_tile_value(12));
    }

    #[test]
    fn opposite_flips_axis_direction() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.to_vector();
            assert_eq!(dir.opposite().to_vector(), (-dx, -dy));
            assert_eq!(dir.opposite().is_horizontal(), dir.is_horizontal());
        }
    }
}
