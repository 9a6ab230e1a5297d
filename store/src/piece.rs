use serde::{Deserialize, Serialize};

use crate::player::Color;
use crate::Error;

/// Position code of a checker.
///
/// - `0..=23` : pip on the board, 0 is Black's innermost home pip, 23 is White's
/// - `24` : White borne off
/// - `-1` : Black borne off
/// - `25` : White on the bar
/// - `-2` : Black on the bar
pub type Position = i8;

pub const WHITE_OUT_POSITION: Position = 24;
pub const BLACK_OUT_POSITION: Position = -1;
pub const WHITE_BAR_POSITION: Position = 25;
pub const BLACK_BAR_POSITION: Position = -2;

/// Checkers per color, for the whole life of a game
pub const CHECKERS_PER_COLOR: usize = 15;

pub fn is_valid_position(position: Position) -> bool {
    (BLACK_BAR_POSITION..=WHITE_BAR_POSITION).contains(&position)
}

pub fn is_on_board(position: Position) -> bool {
    (0..24).contains(&position)
}

pub fn is_bar(position: Position) -> bool {
    position == WHITE_BAR_POSITION || position == BLACK_BAR_POSITION
}

pub fn is_out(position: Position) -> bool {
    position == WHITE_OUT_POSITION || position == BLACK_OUT_POSITION
}

/// Check a position code received from outside the engine
pub fn check_position(position: Position) -> Result<Position, Error> {
    if is_valid_position(position) {
        Ok(position)
    } else {
        Err(Error::FieldInvalid)
    }
}

/// A single checker. It is never created or removed during a game, only moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub position: Position,
}

impl Piece {
    pub fn new(color: Color, position: Position) -> Self {
        Piece { color, position }
    }

    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    pub fn is_on_bar(&self) -> bool {
        self.position == self.color.bar_position()
    }

    pub fn is_out(&self) -> bool {
        self.position == self.color.out_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_ranges() {
        assert!(is_valid_position(-2));
        assert!(is_valid_position(25));
        assert!(!is_valid_position(-3));
        assert!(!is_valid_position(26));
        assert!(is_on_board(0) && is_on_board(23));
        assert!(!is_on_board(24) && !is_on_board(-1));
        assert!(is_bar(25) && is_bar(-2) && !is_bar(24));
        assert!(is_out(24) && is_out(-1) && !is_out(25));
        assert_eq!(check_position(30), Err(Error::FieldInvalid));
        assert_eq!(check_position(12), Ok(12));
    }

    #[test]
    fn bar_and_out_by_color() {
        let mut piece = Piece::new(Color::White, 3);
        assert!(!piece.is_on_bar());
        piece.move_to(WHITE_BAR_POSITION);
        assert!(piece.is_on_bar());
        piece.move_to(WHITE_OUT_POSITION);
        assert!(piece.is_out());

        // the other color's bar is not ours
        let black = Piece::new(Color::Black, WHITE_BAR_POSITION);
        assert!(!black.is_on_bar());
    }
}
