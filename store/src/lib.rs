mod game;
pub use game::{GameConfig, GameEvent, GameState, Signal, Stage, TurnPhase};

mod engine;
pub use engine::Game;

mod moves;
pub use moves::{CheckerMove, MoveCheck, MoveRules};

mod player;
pub use player::{Color, Player};

mod piece;
pub use piece::{
    Piece, Position, BLACK_BAR_POSITION, BLACK_OUT_POSITION, CHECKERS_PER_COLOR,
    WHITE_BAR_POSITION, WHITE_OUT_POSITION,
};

mod error;
pub use error::Error;

mod board;
pub use board::{Board, PieceId};

mod dice;
pub use dice::{Dice, DiceRoller};
