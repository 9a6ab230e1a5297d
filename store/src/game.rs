//! # Play a Backgammon Game
use crate::board::{Board, PieceId};
use crate::dice::Dice;
use crate::moves::{MoveCheck, MoveRules};
use crate::piece::{check_position, is_bar, is_on_board, Position, CHECKERS_PER_COLOR};
use crate::player::{Color, Player};
use crate::Error;
use log::{debug, info, warn};

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The different stages a game can be in. (not to be confused with the entire "GameState")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    InGame,
    Ended,
}

/// The different phases a game turn can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingRoll,
    DiceRolled,
    /// the game was won on the last move, nothing is left to play
    TurnComplete,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub white_name: String,
    pub black_name: String,
    pub first_player: Color,
    /// seed for the dice, for reproducible games
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            white_name: "Player 1".into(),
            black_name: "Player 2".into(),
            first_player: Color::White,
            seed: None,
        }
    }
}

/// An event that progresses the GameState forward
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Deserialize)]
pub enum GameEvent {
    RollResult { color: Color, dice: Dice },
    Select { color: Color, position: Position },
    Move { color: Color, to: Position },
    NewGame,
}

/// What happened while consuming an event, for the players' information.
///
/// Signals carry no rules state: everything they tell can also be read back
/// from the [`GameState`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Deserialize)]
pub enum Signal {
    InvalidMove(Error),
    DoublesRolled(u8),
    /// `color` cannot use its remaining dice and loses them. `turn_skipped` is
    /// set when no checker was moved at all this turn.
    NoValidMoves {
        color: Color,
        turn_skipped: bool,
        discarded: Vec<u8>,
    },
    PieceCaptured { color: Color, from: Position },
    PieceBorneOff { color: Color },
    TurnPassed { to: Color },
    GameOver { winner: Color },
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Signal::InvalidMove(error) => write!(f, "Invalid move: {}", error),
            Signal::DoublesRolled(value) => {
                write!(f, "Doubles! You can move 4 times with {}", value)
            }
            Signal::NoValidMoves {
                color,
                turn_skipped: true,
                ..
            } => write!(f, "No valid moves available for {}. Turn skipped.", color),
            Signal::NoValidMoves {
                color, discarded, ..
            } => write!(
                f,
                "No valid moves available for {} with remaining dice {:?}. Turn skipped.",
                color, discarded
            ),
            Signal::PieceCaptured { color, from } => {
                write!(f, "{} piece on {} sent to the bar", color, from)
            }
            Signal::PieceBorneOff { color } => write!(f, "{} piece borne off", color),
            Signal::TurnPassed { to } => write!(f, "{} to play", to),
            Signal::GameOver { winner } => write!(f, "{} wins! All pieces are out!", winner),
        }
    }
}

/// Represents a Backgammon game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub stage: Stage,
    pub turn_phase: TurnPhase,
    pub board: Board,
    pub active_color: Color,
    white: Player,
    black: Player,
    first_player: Color,
    /// last dice pair rolled this turn
    pub dice: Option<Dice>,
    /// dice values not played yet
    available_moves: Vec<u8>,
    selected: Option<PieceId>,
    winner: Option<Color>,
    /// true until a checker is moved in the current turn
    untouched_turn: bool,
}

// implement Display trait
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        s.push_str(&format!(
            "Stage: {:?} / {:?}\n",
            self.stage, self.turn_phase
        ));
        s.push_str(&format!("Who plays: {}\n", self.who_plays()));
        s.push_str(&format!("Dice: {:?}\n", self.dice));
        s.push_str(&format!("Available moves: {:?}\n", self.available_moves));
        s.push_str(&format!("Board:\n{}", self.board));
        write!(f, "{}", s)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl MoveRules for GameState {
    fn board(&self) -> &Board {
        &self.board
    }

    fn available_moves(&self) -> &[u8] {
        &self.available_moves
    }
}

impl GameState {
    /// Create a new game, checkers on their starting pips
    pub fn new(config: &GameConfig) -> Self {
        Self {
            stage: Stage::InGame,
            turn_phase: TurnPhase::AwaitingRoll,
            board: Board::new(),
            active_color: config.first_player,
            white: Player::new(config.white_name.clone(), Color::White),
            black: Player::new(config.black_name.clone(), Color::Black),
            first_player: config.first_player,
            dice: None,
            available_moves: Vec::new(),
            selected: None,
            winner: None,
            untouched_turn: true,
        }
    }

    // -------------------------------------------------------------------------
    //                        accessors
    // -------------------------------------------------------------------------

    pub fn who_plays(&self) -> &Player {
        self.player(self.active_color)
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Position of the selected checker
    pub fn selected(&self) -> Option<Position> {
        self.selected
            .and_then(|id| self.board.piece(id))
            .map(|piece| piece.position)
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Calculate game state id :
    pub fn to_string_id(&self) -> String {
        // Pieces placement -> 80 bits (2 x (15 + 25))
        let mut pos_bits = self.board.to_gnupg_pos_id(self.active_color);

        // active player -> 1 bit
        // white : 0
        // black : 1
        pos_bits.push(match self.active_color {
            Color::White => '0',
            Color::Black => '1',
        });

        // phase -> 2 bits
        pos_bits.push_str(match self.turn_phase {
            TurnPhase::AwaitingRoll => "00",
            TurnPhase::DiceRolled => "01",
            TurnPhase::TurnComplete => "10",
        });

        // dice roll -> 6 bits
        let dice_bits = self
            .dice
            .map(|dice| dice.to_bits_string())
            .unwrap_or_else(|| "000000".into());
        pos_bits.push_str(&dice_bits);

        pos_bits = format!("{:0>90}", pos_bits);
        let pos_u8 = pos_bits
            .as_bytes()
            .chunks(6)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0u8, |acc, bit| (acc << 1) | u8::from(*bit == b'1'))
            })
            .collect::<Vec<u8>>();
        general_purpose::STANDARD.encode(pos_u8)
    }

    // ----------------------------------------------------------------------------------
    //                          Rules checks
    // ----------------------------------------------------------------------------------

    fn check_in_game(&self) -> Result<(), Error> {
        if self.stage == Stage::Ended {
            return Err(Error::GameEnded);
        }
        Ok(())
    }

    fn check_turn(&self, color: Color) -> Result<(), Error> {
        self.check_in_game()?;
        if color != self.active_color {
            return Err(Error::NotYourTurn);
        }
        Ok(())
    }

    /// Whether `color` may roll now
    pub fn check_can_roll(&self, color: Color) -> Result<(), Error> {
        self.check_turn(color)?;
        if self.turn_phase != TurnPhase::AwaitingRoll {
            return Err(Error::WrongPhase);
        }
        Ok(())
    }

    /// Resolve a selection to the checker picked up
    fn check_select(&self, color: Color, position: Position) -> Result<PieceId, Error> {
        self.check_turn(color)?;
        if self.turn_phase == TurnPhase::TurnComplete {
            return Err(Error::WrongPhase);
        }
        let position = check_position(position)?;
        let bar = color.bar_position();
        if position != bar && self.board.bar_count(color) > 0 {
            return Err(Error::MustReenterFromBar);
        }
        if !is_on_board(position) && !is_bar(position) {
            return Err(Error::PieceNotFound);
        }
        self.board
            .top_piece(color, position)
            .ok_or(Error::PieceNotFound)
    }

    /// Check a move of the selected checker to `to`
    fn check_event_move(&self, color: Color, to: Position) -> Result<(PieceId, MoveCheck), Error> {
        self.check_turn(color)?;
        if self.turn_phase != TurnPhase::DiceRolled {
            return Err(Error::WrongPhase);
        }
        let id = self.selected.ok_or(Error::NoPieceSelected)?;
        let from = self
            .board
            .piece(id)
            .map(|piece| piece.position)
            .ok_or(Error::NoPieceSelected)?;
        let check = self.check_move(color, from, to)?;
        Ok((id, check))
    }

    /// Determines whether an event is valid considering the current GameState
    pub fn validate(&self, event: &GameEvent) -> Result<(), Error> {
        use GameEvent::*;
        match event {
            RollResult { color, dice } => {
                self.check_can_roll(*color)?;
                Dice::new(dice.values.0, dice.values.1)?;
            }
            Select { color, position } => {
                self.check_select(*color, *position)?;
            }
            Move { color, to } => {
                self.check_event_move(*color, *to)?;
            }
            NewGame => {}
        }

        // We couldn't find anything wrong with the event so it must be good
        Ok(())
    }

    // ----------------------------------------------------------------------------------
    //                   State updates
    // ----------------------------------------------------------------------------------

    /// Consumes an event, modifying the GameState.
    ///
    /// The event is validated first, a rejected event leaves the state untouched.
    pub fn consume(&mut self, event: &GameEvent) -> Result<Vec<Signal>, Error> {
        use GameEvent::*;
        let result = match event {
            RollResult { color, dice } => self.roll_with(*color, *dice),
            Select { color, position } => self.select_piece(*color, *position).map(|_| vec![]),
            Move { color, to } => self.move_selected(*color, *to),
            NewGame => {
                self.new_game();
                Ok(vec![])
            }
        };
        if let Err(error) = &result {
            warn!("{:?} rejected: {}", event, error);
        }
        result
    }

    /// Put everything back to the start of a game, same players
    pub fn new_game(&mut self) {
        self.board.init();
        self.stage = Stage::InGame;
        self.turn_phase = TurnPhase::AwaitingRoll;
        self.active_color = self.first_player;
        self.dice = None;
        self.available_moves.clear();
        self.selected = None;
        self.winner = None;
        self.untouched_turn = true;
        info!("New game, {} starts", self.who_plays());
    }

    /// Roll result for `color`.
    ///
    /// If the dice cannot be played at all, the turn is passed right away.
    pub fn roll_with(&mut self, color: Color, dice: Dice) -> Result<Vec<Signal>, Error> {
        self.check_can_roll(color)?;
        let dice = Dice::new(dice.values.0, dice.values.1)?;

        debug!("{} rolled {}", color, dice.to_display_string());
        self.dice = Some(dice);
        self.available_moves = dice.moves();
        self.turn_phase = TurnPhase::DiceRolled;
        self.untouched_turn = true;

        let mut signals = Vec::new();
        if dice.is_double() {
            signals.push(Signal::DoublesRolled(dice.values.0));
        }
        if !self.has_any_valid_move(color) {
            signals.extend(self.forfeit_turn());
        }
        Ok(signals)
    }

    /// Pick up a checker of `color` at `position` (the top one of the stack)
    pub fn select_piece(&mut self, color: Color, position: Position) -> Result<PieceId, Error> {
        let id = self.check_select(color, position)?;
        debug!("{} selected piece on {}", color, position);
        self.selected = Some(id);
        Ok(id)
    }

    /// Move the selected checker of the active player to `to`
    pub fn attempt_move(&mut self, to: Position) -> Result<Vec<Signal>, Error> {
        self.move_selected(self.active_color, to)
    }

    fn move_selected(&mut self, color: Color, to: Position) -> Result<Vec<Signal>, Error> {
        let (id, check) = self.check_event_move(color, to)?;
        let from = self.selected().unwrap_or(to);
        let mut signals = Vec::new();

        if let Some(captured) = check.capture {
            if let Some(piece) = self.board.piece(captured).copied() {
                self.board.move_piece(captured, piece.color.bar_position());
                info!("{} piece on {} captured", piece.color, to);
                signals.push(Signal::PieceCaptured {
                    color: piece.color,
                    from: to,
                });
            }
        }
        self.board.move_piece(id, to);
        if to == color.out_position() {
            signals.push(Signal::PieceBorneOff { color });
        }
        self.use_die(check.die);
        self.selected = None;
        self.untouched_turn = false;
        debug!("{} moved {} -> {} with {}", color, from, to, check.die);

        if self.board.out_count(color) == CHECKERS_PER_COLOR {
            self.stage = Stage::Ended;
            self.turn_phase = TurnPhase::TurnComplete;
            self.winner = Some(color);
            self.available_moves.clear();
            info!("{} wins", self.player(color));
            signals.push(Signal::GameOver { winner: color });
            return Ok(signals);
        }

        if self.available_moves.is_empty() {
            signals.push(self.switch_active_player());
        } else if !self.has_any_valid_move(color) {
            signals.extend(self.forfeit_turn());
        }
        Ok(signals)
    }

    /// Remove one instance of a played die
    fn use_die(&mut self, die: u8) {
        if let Some(index) = self.available_moves.iter().position(|d| *d == die) {
            self.available_moves.remove(index);
        }
    }

    /// Drop the remaining dice and hand over
    fn forfeit_turn(&mut self) -> Vec<Signal> {
        let color = self.active_color;
        let discarded = std::mem::take(&mut self.available_moves);
        info!("{} cannot play {:?}, turn skipped", color, discarded);
        vec![
            Signal::NoValidMoves {
                color,
                turn_skipped: self.untouched_turn,
                discarded,
            },
            self.switch_active_player(),
        ]
    }

    pub fn switch_active_player(&mut self) -> Signal {
        self.active_color = self.active_color.opponent_color();
        self.turn_phase = TurnPhase::AwaitingRoll;
        self.dice = None;
        self.available_moves.clear();
        self.selected = None;
        self.untouched_turn = true;
        info!("{} to play", self.who_plays());
        Signal::TurnPassed {
            to: self.active_color,
        }
    }
}
