use serde::{Deserialize, Serialize};
use std::fmt;

use crate::piece::{
    Position, BLACK_BAR_POSITION, BLACK_OUT_POSITION, WHITE_BAR_POSITION, WHITE_OUT_POSITION,
};

/// The two sides of the board.
///
/// White travels from pip 0 up to pip 23 and bears off to 24, Black travels the
/// other way round and bears off to -1.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opponent_color(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Where a captured checker of this color waits for re-entry
    pub fn bar_position(&self) -> Position {
        match self {
            Self::White => WHITE_BAR_POSITION,
            Self::Black => BLACK_BAR_POSITION,
        }
    }

    /// Where a borne off checker of this color ends up
    pub fn out_position(&self) -> Position {
        match self {
            Self::White => WHITE_OUT_POSITION,
            Self::Black => BLACK_OUT_POSITION,
        }
    }

    /// Home quadrant pips, nearest to the edge last
    pub fn home_range(&self) -> std::ops::RangeInclusive<Position> {
        match self {
            Self::White => 18..=23,
            Self::Black => 0..=5,
        }
    }

    /// Entry pip for a checker coming back from the bar with the given die
    pub fn entry_position(&self, die: u8) -> Position {
        match self {
            Self::White => die as Position - 1,
            Self::Black => 24 - die as Position,
        }
    }

    /// Pip reached by a checker at `from` moving `die` pips forward, whether or
    /// not it stays on the board
    pub fn forward(&self, from: Position, die: u8) -> Position {
        match self {
            Self::White => from + die as Position,
            Self::Black => from - die as Position,
        }
    }

    /// Pips left to travel from `from` to this color's OUT position
    pub fn distance_to_out(&self, from: Position) -> Position {
        match self {
            Self::White => WHITE_OUT_POSITION - from,
            Self::Black => from - BLACK_OUT_POSITION,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}

/// Struct for storing player related data.
///
/// A player never changes once the game is set up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: Color,
}

impl Player {
    pub fn new(name: String, color: Color) -> Self {
        Player { name, color }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other() {
        assert_eq!(Color::White.opponent_color(), Color::Black);
        assert_eq!(Color::Black.opponent_color(), Color::White);
    }

    #[test]
    fn entry_positions() {
        assert_eq!(Color::White.entry_position(1), 0);
        assert_eq!(Color::White.entry_position(6), 5);
        assert_eq!(Color::Black.entry_position(1), 23);
        assert_eq!(Color::Black.entry_position(6), 18);
    }

    #[test]
    fn distance_to_out() {
        assert_eq!(Color::White.distance_to_out(18), 6);
        assert_eq!(Color::White.distance_to_out(23), 1);
        assert_eq!(Color::Black.distance_to_out(0), 1);
        assert_eq!(Color::Black.distance_to_out(5), 6);
    }

    #[test]
    fn display() {
        let player = Player::new("Ada".into(), Color::Black);
        assert_eq!(format!("{}", player), "Ada (Black)");
    }
}
