//! # Backgammon move legality
use crate::board::{Board, PieceId};
use crate::piece::{check_position, is_on_board, Position};
use crate::player::Color;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A checker move: where from, where to, and the die it uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerMove {
    from: Position,
    to: Position,
    die: u8,
}

impl CheckerMove {
    pub fn new(from: Position, to: Position, die: u8) -> Result<Self, Error> {
        check_position(from)?;
        check_position(to)?;
        if !(1..=6).contains(&die) {
            return Err(Error::DiceInvalid);
        }
        Ok(CheckerMove { from, to, die })
    }

    pub fn get_from(&self) -> Position {
        self.from
    }

    pub fn get_to(&self) -> Position {
        self.to
    }

    pub fn get_die(&self) -> u8 {
        self.die
    }

    pub fn is_exit(&self) -> bool {
        crate::piece::is_out(self.to)
    }

    pub fn is_entry(&self) -> bool {
        crate::piece::is_bar(self.from)
    }
}

impl fmt::Display for CheckerMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let from = if self.is_entry() {
            "bar".to_string()
        } else {
            self.from.to_string()
        };
        let to = if self.is_exit() {
            "off".to_string()
        } else {
            self.to.to_string()
        };
        write!(f, "{} -> {} ({})", from, to, self.die)
    }
}

/// Outcome of a successful legality check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCheck {
    /// die value consumed by the move
    pub die: u8,
    /// lone opposing checker sent to the bar by the move
    pub capture: Option<PieceId>,
}

/// Movement rules, for any holder of a board and of the dice left to play.
///
/// None of these methods mutate anything: they tell whether a move is legal
/// and which die it consumes.
pub trait MoveRules {
    fn board(&self) -> &Board;
    /// die values not yet played this turn, in rolling order
    fn available_moves(&self) -> &[u8];

    /// Whether a checker of `color` may land on `target`.
    ///
    /// Returns the checker captured by landing there, if any.
    fn point_open(&self, color: Color, target: Position) -> Result<Option<PieceId>, Error> {
        let ids = self.board().piece_ids_at(target);
        match ids.first().and_then(|id| self.board().piece(*id)) {
            None => Ok(None),
            Some(piece) if piece.color == color => Ok(None),
            Some(_) if ids.len() == 1 => Ok(Some(ids[0])),
            Some(_) => Err(Error::BlockedPoint),
        }
    }

    /// Check a move of a `color` checker from `from` to `to` with the dice left.
    fn check_move(&self, color: Color, from: Position, to: Position) -> Result<MoveCheck, Error> {
        check_position(to)?;
        if self.board().top_piece(color, from).is_none() {
            return Err(Error::PieceNotFound);
        }
        if self.available_moves().is_empty() {
            return Err(Error::NoDiceAvailable);
        }
        let bar = color.bar_position();
        if from != bar && self.board().bar_count(color) > 0 {
            return Err(Error::MustReenterFromBar);
        }

        if from == bar {
            self.check_entry(color, to)
        } else if to == color.out_position() {
            self.check_bear_off(color, from)
        } else {
            self.check_step(color, from, to)
        }
    }

    /// Re-entry from the bar: the first die whose entry pip is `to` is used
    fn check_entry(&self, color: Color, to: Position) -> Result<MoveCheck, Error> {
        let die = *self
            .available_moves()
            .iter()
            .find(|die| color.entry_position(**die) == to)
            .ok_or(Error::IllegalDestination)?;
        let capture = self.point_open(color, to)?;
        Ok(MoveCheck { die, capture })
    }

    /// Bearing off. Needs every checker in the home quadrant.
    ///
    /// A die matching the exact distance is used if there is one. Otherwise the
    /// first larger die is used, provided no checker of the same color sits
    /// between `from` and the edge.
    fn check_bear_off(&self, color: Color, from: Position) -> Result<MoveCheck, Error> {
        if !self.board().all_home(color) || !color.home_range().contains(&from) {
            return Err(Error::IllegalDestination);
        }
        let exact = color.distance_to_out(from) as u8;
        let dice = self.available_moves();
        let die = if dice.contains(&exact) {
            exact
        } else if !self.board().has_pieces_nearer_out(color, from) {
            *dice
                .iter()
                .find(|die| **die > exact)
                .ok_or(Error::IllegalDestination)?
        } else {
            return Err(Error::IllegalDestination);
        };
        Ok(MoveCheck { die, capture: None })
    }

    /// Plain move between two pips, forward by exactly one die
    fn check_step(&self, color: Color, from: Position, to: Position) -> Result<MoveCheck, Error> {
        if !is_on_board(from) || !is_on_board(to) {
            return Err(Error::IllegalDestination);
        }
        let distance = match color {
            Color::White => to - from,
            Color::Black => from - to,
        };
        if distance <= 0 || !self.available_moves().contains(&(distance as u8)) {
            return Err(Error::IllegalDestination);
        }
        let capture = self.point_open(color, to)?;
        Ok(MoveCheck {
            die: distance as u8,
            capture,
        })
    }

    /// Every move `color` could play right now.
    ///
    /// With checkers on the bar, only re-entries are listed.
    fn legal_moves(&self, color: Color) -> Vec<CheckerMove> {
        let bar = color.bar_position();
        let mut origins: Vec<Position> = if self.board().bar_count(color) > 0 {
            vec![bar]
        } else {
            self.board()
                .pieces()
                .iter()
                .filter(|piece| piece.color == color && is_on_board(piece.position))
                .map(|piece| piece.position)
                .collect()
        };
        origins.sort_unstable();
        origins.dedup();

        let mut dice = self.available_moves().to_vec();
        dice.sort_unstable();
        dice.dedup();

        let mut moves = Vec::new();
        for from in origins {
            let mut targets: Vec<Position> = dice
                .iter()
                .map(|die| {
                    let to = if from == bar {
                        color.entry_position(*die)
                    } else {
                        color.forward(from, *die)
                    };
                    if is_on_board(to) {
                        to
                    } else {
                        color.out_position()
                    }
                })
                .collect();
            targets.sort_unstable();
            targets.dedup();
            for to in targets {
                if let Ok(check) = self.check_move(color, from, to) {
                    moves.push(CheckerMove {
                        from,
                        to,
                        die: check.die,
                    });
                }
            }
        }
        moves
    }

    fn has_any_valid_move(&self, color: Color) -> bool {
        !self.legal_moves(color).is_empty()
    }
}
