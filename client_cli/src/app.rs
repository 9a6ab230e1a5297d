use store::{Dice, Game, GameConfig, Position, Signal};

const COMMANDS: &str = "\
roll              roll the dice
dice A B          play dice rolled by hand
select POS|bar    pick up a checker
move POS|off      move the picked up checker
FROM TO           select and move in one go
moves             list the legal moves
state             show the game state
id                show the game state id
new               start a new game
quit              leave";

// Application.
#[derive(Debug, Default)]
pub struct App {
    // should the application exit?
    pub should_quit: bool,
    pub game: Game,
    // what the last command had to say
    notices: Vec<String>,
}

impl App {
    // Constructs a new instance of [`App`].
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config),
            should_quit: false,
            notices: vec![],
        }
    }

    pub fn input(&mut self, input: &str) {
        self.notices.clear();
        let words: Vec<&str> = input.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] => self.quit(),
            ["help"] => self.notices.push(COMMANDS.to_string()),
            ["state"] => self.notices.push(self.game.state().to_string()),
            ["id"] => self.notices.push(self.game.state().to_string_id()),
            ["moves"] => self.show_moves(),
            ["new"] => {
                let signals = self.game.new_game();
                self.report(signals);
            }
            ["roll"] => {
                let signals = self.game.roll_dice();
                self.report(signals);
            }
            ["dice", first, second] => self.inject_dice(first, second),
            ["select", position] => {
                if let Some(position) = self.parse_position(position) {
                    self.select(position);
                }
            }
            ["move", position] => {
                if let Some(position) = self.parse_position(position) {
                    let signals = self.game.attempt_move(position);
                    self.report(signals);
                }
            }
            [from, to] => self.play(from, to),
            _ => self.notices.push(format!("unknown command : {}", input)),
        }
        if !self.should_quit {
            println!("{}", self.display());
        }
    }

    // Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    fn report(&mut self, signals: Vec<Signal>) {
        self.notices
            .extend(signals.iter().map(|signal| signal.to_string()));
    }

    fn show_moves(&mut self) {
        let moves = self.game.legal_moves();
        if moves.is_empty() {
            self.notices.push("no legal move".into());
        } else {
            let moves: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
            self.notices.push(moves.join(", "));
        }
    }

    fn inject_dice(&mut self, first: &str, second: &str) {
        match (first.parse(), second.parse()) {
            (Ok(first), Ok(second)) => {
                let signals = self.game.roll_with(Dice {
                    values: (first, second),
                });
                self.report(signals);
            }
            _ => self
                .notices
                .push(format!("invalid dice : {} {}", first, second)),
        }
    }

    /// `bar` and `off` name the bar and the bear-off tray of the player to move
    fn parse_position(&mut self, word: &str) -> Option<Position> {
        let color = self.game.current_player().color;
        let position = match word {
            "bar" => Some(color.bar_position()),
            "off" => Some(color.out_position()),
            _ => word.parse().ok(),
        };
        if position.is_none() {
            self.notices.push(format!("invalid position : {}", word));
        }
        position
    }

    fn select(&mut self, position: Position) -> bool {
        let color = self.game.current_player().color;
        let signals = self.game.select_piece(color, position);
        let selected = signals.is_empty();
        self.report(signals);
        selected
    }

    fn play(&mut self, from: &str, to: &str) {
        let (Some(from), Some(to)) = (self.parse_position(from), self.parse_position(to)) else {
            return;
        };
        if self.select(from) {
            let signals = self.game.attempt_move(to);
            self.report(signals);
        }
    }

    pub fn display(&self) -> String {
        let state = self.game.state();
        let mut output = "-------------------------------".to_owned();
        output += format!(
            "\n{:?} > {} > {:?}",
            state.stage,
            self.game.current_player(),
            state.turn_phase
        )
        .as_str();

        output += "\nRolled dice : ";
        match state.dice {
            Some(dice) => {
                output += format!(
                    "{} :: to play {:?}",
                    dice.to_display_string(),
                    self.game.available_moves()
                )
                .as_str();
            }
            None => output += "-",
        }
        if let Some(position) = state.selected() {
            output += format!("\nSelected : {}", position).as_str();
        }

        output += "\n-------------------------------\n";
        output += &state.board.to_display_grid(5);
        for notice in &self.notices {
            output += notice;
            output += "\n";
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use store::{Color, Error, TurnPhase, WHITE_BAR_POSITION};

    #[test]
    fn test_display() {
        let expected = "-------------------------------
InGame > Player 1 (White) > AwaitingRoll
Rolled dice : -
-------------------------------
 12 13 14 15 16 17 | 18 19 20 21 22 23
  X           O    |  O              X
  X           O    |  O              X
  X           O    |  O
  X                |  O
  X                |  O
-------------------+------------------
  O                |  X
  O                |  X
  O           X    |  X
  O           X    |  X              O
  O           X    |  X              O
 11 10  9  8  7  6 |  5  4  3  2  1  0
Bar: White 0, Black 0 | Out: White 0, Black 0
";
        let app = App::default();
        assert_eq!(app.display(), expected);
    }

    #[test]
    fn test_move() {
        let expected = "-------------------------------
InGame > Player 2 (Black) > AwaitingRoll
Rolled dice : -
-------------------------------
 12 13 14 15 16 17 | 18 19 20 21 22 23
  X           O    |  O              X
  X           O    |  O              X
  X           O    |  O
  X                |  O
  X                |  O
-------------------+------------------
  6                |  X
  O                |  X
  O           X    |  X
  O           X    |  X
  O           X    |  X              O
 11 10  9  8  7  6 |  5  4  3  2  1  0
Bar: White 0, Black 0 | Out: White 0, Black 0
Black to play
";
        let mut app = App::default();
        app.input("dice 6 5");
        app.input("0 6");
        app.input("6 11");
        assert_eq!(app.display(), expected);
    }

    #[test]
    fn test_dice_line() {
        let mut app = App::default();
        app.input("dice 6 5");
        app.input("select 0");
        let display = app.display();
        let lines: Vec<&str> = display.lines().collect();
        assert_eq!(lines[1], "InGame > Player 1 (White) > DiceRolled");
        assert_eq!(lines[2], "Rolled dice : 6 & 5 :: to play [6, 5]");
        assert_eq!(lines[3], "Selected : 0");
    }

    #[test]
    fn rejected_commands_are_reported() {
        let mut app = App::default();
        app.input("move 3");
        assert_eq!(
            app.notices(),
            &[Signal::InvalidMove(Error::WrongPhase).to_string()]
        );
        app.input("dice 6 5");
        app.input("0 5");
        assert_eq!(
            app.notices(),
            &["Invalid move: Point blocked by two or more opponent pieces".to_string()]
        );
        app.input("dice 9 x");
        assert_eq!(app.notices(), &["invalid dice : 9 x".to_string()]);
        app.input("select nowhere");
        assert_eq!(app.notices(), &["invalid position : nowhere".to_string()]);
        app.input("fly away now");
        assert_eq!(app.notices(), &["unknown command : fly away now".to_string()]);
        assert_eq!(app.game.turn_phase(), TurnPhase::DiceRolled);
    }

    #[test]
    fn moves_and_bar_words() {
        let mut app = App::default();
        app.input("dice 1 2");
        app.input("moves");
        assert!(app.notices()[0].contains("0 -> 1 (1)"));
        assert!(app.notices()[0].contains("18 -> 20 (2)"));

        assert_eq!(app.parse_position("bar"), Some(WHITE_BAR_POSITION));
        assert_eq!(app.parse_position("off"), Some(24));
        assert_eq!(app.parse_position("-2"), Some(-2));
    }

    #[test]
    fn new_and_quit() {
        let mut app = App::new(GameConfig {
            first_player: Color::Black,
            ..GameConfig::default()
        });
        app.input("roll");
        app.input("new");
        assert_eq!(app.game.turn_phase(), TurnPhase::AwaitingRoll);
        assert_eq!(app.game.current_player().color, Color::Black);
        app.input("id");
        assert_eq!(app.notices(), &[app.game.state().to_string_id()]);
        assert!(!app.should_quit);
        app.input("quit");
        assert!(app.should_quit);
    }
}
