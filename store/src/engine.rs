//! # Command surface of one backgammon game
//!
//! [`Game`] owns the rules state and the dice. A front-end sends it the
//! player's intents (roll, select, move, new game), reads back the state after
//! each command, and shows the returned [`Signal`]s.
use crate::board::Board;
use crate::dice::{Dice, DiceRoller};
use crate::game::{GameConfig, GameEvent, GameState, Signal, TurnPhase};
use crate::moves::{CheckerMove, MoveRules};
use crate::piece::{Piece, Position};
use crate::player::{Color, Player};
use log::warn;

#[derive(Debug)]
pub struct Game {
    state: GameState,
    dice_roller: DiceRoller,
    config: GameConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::new(&config),
            dice_roller: DiceRoller::new(config.seed),
            config,
        }
    }

    /// Validate and apply an event, turning a rejection into
    /// [`Signal::InvalidMove`]
    pub fn handle_event(&mut self, event: &GameEvent) -> Vec<Signal> {
        match self.state.consume(event) {
            Ok(signals) => signals,
            Err(error) => vec![Signal::InvalidMove(error)],
        }
    }

    /// Roll the dice for the player to move
    pub fn roll_dice(&mut self) -> Vec<Signal> {
        let color = self.state.active_color;
        // no roll is drawn for a refused command, so seeded games stay reproducible
        if let Err(error) = self.state.check_can_roll(color) {
            warn!("{} cannot roll: {}", color, error);
            return vec![Signal::InvalidMove(error)];
        }
        let dice = self.dice_roller.roll();
        self.handle_event(&GameEvent::RollResult { color, dice })
    }

    /// Play dice thrown outside the engine, e.g. physical dice
    pub fn roll_with(&mut self, dice: Dice) -> Vec<Signal> {
        self.handle_event(&GameEvent::RollResult {
            color: self.state.active_color,
            dice,
        })
    }

    pub fn select_piece(&mut self, color: Color, position: Position) -> Vec<Signal> {
        self.handle_event(&GameEvent::Select { color, position })
    }

    pub fn attempt_move(&mut self, to: Position) -> Vec<Signal> {
        self.handle_event(&GameEvent::Move {
            color: self.state.active_color,
            to,
        })
    }

    /// Throw the current game away and start a fresh one with the same settings
    pub fn new_game(&mut self) -> Vec<Signal> {
        self.state = GameState::new(&self.config);
        vec![]
    }

    // -------------------------------------------------------------------------
    //                        queries
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.state.turn_phase
    }

    pub fn current_player(&self) -> &Player {
        self.state.who_plays()
    }

    pub fn available_moves(&self) -> &[u8] {
        MoveRules::available_moves(&self.state)
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn pieces(&self) -> &[Piece] {
        self.state.board.pieces()
    }

    pub fn all_white_home(&self) -> bool {
        self.state.board.all_white_home()
    }

    pub fn all_black_home(&self) -> bool {
        self.state.board.all_black_home()
    }

    pub fn legal_moves(&self) -> Vec<CheckerMove> {
        self.state.legal_moves(self.state.active_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Stage;
    use crate::Error;

    fn seeded() -> Game {
        Game::new(GameConfig {
            seed: Some(2024),
            ..GameConfig::default()
        })
    }

    #[test]
    fn roll_fills_available_moves() {
        let mut game = seeded();
        let signals = game.roll_dice();
        // white always has a move from the starting position, the dice stay
        let dice = game.state().dice;
        match dice {
            Some(dice) if dice.is_double() => {
                assert!(signals.contains(&Signal::DoublesRolled(dice.values.0)));
                assert_eq!(game.available_moves().len(), 4);
            }
            Some(dice) => {
                assert_eq!(game.available_moves(), &[dice.values.0, dice.values.1]);
            }
            None => panic!("dice expected after rolling"),
        }
        assert_eq!(game.turn_phase(), TurnPhase::DiceRolled);
    }

    #[test]
    fn second_roll_is_refused() {
        let mut game = seeded();
        game.roll_dice();
        let moves = game.available_moves().to_vec();
        assert_eq!(
            game.roll_dice(),
            vec![Signal::InvalidMove(Error::WrongPhase)]
        );
        assert_eq!(game.available_moves(), moves.as_slice());
    }

    #[test]
    fn seeded_games_replay_identically() {
        let mut first = seeded();
        let mut second = seeded();
        for _ in 0..5 {
            first.roll_dice();
            second.roll_dice();
            assert_eq!(first.state(), second.state());
            first.new_game();
            second.new_game();
        }
    }

    #[test]
    fn commands_and_queries() {
        let mut game = Game::default();
        assert_eq!(game.current_player().color, Color::White);
        assert!(!game.all_white_home());
        assert!(!game.all_black_home());
        assert_eq!(game.pieces().len(), 30);

        game.roll_with(Dice { values: (6, 5) });
        assert!(game.select_piece(Color::White, 0).is_empty());
        assert_eq!(
            game.attempt_move(5),
            vec![Signal::InvalidMove(Error::BlockedPoint)]
        );
        assert!(game.legal_moves().iter().all(|m| m.get_to() != 5));
        assert!(game.attempt_move(6).is_empty());
        assert_eq!(game.available_moves(), &[5]);
        assert_eq!(game.board().count_at(6), 1);
    }

    #[test]
    fn new_game_starts_over() {
        let mut game = Game::new(GameConfig {
            first_player: Color::Black,
            ..GameConfig::default()
        });
        game.roll_with(Dice { values: (2, 1) });
        assert_eq!(game.turn_phase(), TurnPhase::DiceRolled);
        game.new_game();
        assert_eq!(game.turn_phase(), TurnPhase::AwaitingRoll);
        assert_eq!(game.state().stage, Stage::InGame);
        assert_eq!(game.current_player().color, Color::Black);
        assert_eq!(game.config().first_player, Color::Black);
    }
}
