/// This module contains the error definition for the Backgammon game.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holds all the reasons a command can be rejected.
///
/// A rejected command never changes the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    /// Game has already ended
    GameEnded,
    /// Command not allowed in the current turn phase
    WrongPhase,
    /// Not your turn
    NotYourTurn,
    /// Checkers on the bar must come back first
    MustReenterFromBar,
    /// Destination not reachable with the remaining dice
    IllegalDestination,
    /// Destination held by two or more opposing checkers
    BlockedPoint,
    /// No dice left this turn
    NoDiceAvailable,
    /// No checker selected
    NoPieceSelected,
    /// No checker of yours at that position
    PieceNotFound,
    /// Invalid field
    FieldInvalid,
    /// Dice Invalid
    DiceInvalid,
}

// implement Error trait
impl std::error::Error for Error {}

// implement Display trait
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::GameEnded => write!(f, "Game has already ended"),
            Error::WrongPhase => write!(f, "Not allowed at this stage of the turn"),
            Error::NotYourTurn => write!(f, "Not your turn"),
            Error::MustReenterFromBar => write!(f, "You must re-enter pieces from the bar first"),
            Error::IllegalDestination => write!(f, "Invalid move"),
            Error::BlockedPoint => write!(f, "Point blocked by two or more opponent pieces"),
            Error::NoDiceAvailable => write!(f, "No dice left"),
            Error::NoPieceSelected => write!(f, "Select a piece first"),
            Error::PieceNotFound => write!(f, "No piece of yours there"),
            Error::FieldInvalid => write!(f, "Invalid field"),
            Error::DiceInvalid => write!(f, "Invalid dice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", Error::GameEnded), "Game has already ended");
        assert_eq!(format!("{}", Error::NotYourTurn), "Not your turn");
        assert_eq!(
            format!("{}", Error::MustReenterFromBar),
            "You must re-enter pieces from the bar first"
        );
        assert_eq!(format!("{}", Error::IllegalDestination), "Invalid move");
        assert_eq!(
            format!("{}", Error::BlockedPoint),
            "Point blocked by two or more opponent pieces"
        );
        assert_eq!(format!("{}", Error::FieldInvalid), "Invalid field");
        assert_eq!(format!("{}", Error::DiceInvalid), "Invalid dice");
    }
}
