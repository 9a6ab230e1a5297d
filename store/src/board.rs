use crate::piece::{
    check_position, is_on_board, Piece, Position, BLACK_BAR_POSITION, BLACK_OUT_POSITION,
    CHECKERS_PER_COLOR, WHITE_BAR_POSITION, WHITE_OUT_POSITION,
};
use crate::player::Color;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a checker in the board collection. Stable for the whole game.
pub type PieceId = usize;

/// Starting stacks: (color, pip, count)
const STARTING_LAYOUT: [(Color, Position, usize); 8] = [
    (Color::White, 0, 2),
    (Color::Black, 5, 5),
    (Color::Black, 7, 3),
    (Color::White, 11, 5),
    (Color::Black, 12, 5),
    (Color::White, 16, 3),
    (Color::White, 18, 5),
    (Color::Black, 23, 2),
];

/// Represents the Backgammon board
///
/// The board only stores where each of the 30 checkers is. It enforces no rule
/// on its own: deciding whether a move is legal is the job of
/// [`MoveRules`](crate::MoveRules).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
}

impl Default for Board {
    fn default() -> Self {
        let mut board = Board { pieces: Vec::new() };
        board.init();
        board
    }
}

// implement Display trait
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_display_grid(5))
    }
}

impl Board {
    /// Create a new board
    pub fn new() -> Self {
        Board::default()
    }

    /// Put all the checkers back on their starting pips
    pub fn init(&mut self) {
        self.pieces = STARTING_LAYOUT
            .iter()
            .flat_map(|(color, position, count)| {
                std::iter::repeat(Piece::new(*color, *position)).take(*count)
            })
            .collect();
    }

    /// Build a board from explicit checker positions.
    ///
    /// Each color gets its listed positions, the remaining checkers of that color
    /// are considered borne off.
    pub fn from_positions(white: &[Position], black: &[Position]) -> Result<Self, Error> {
        let mut pieces = Vec::with_capacity(2 * CHECKERS_PER_COLOR);
        for (color, positions) in [(Color::White, white), (Color::Black, black)] {
            if positions.len() > CHECKERS_PER_COLOR {
                return Err(Error::FieldInvalid);
            }
            for position in positions {
                let position = check_position(*position)?;
                let foreign = color.opponent_color();
                if position == foreign.bar_position() || position == foreign.out_position() {
                    return Err(Error::FieldInvalid);
                }
                pieces.push(Piece::new(color, position));
            }
            let out = color.out_position();
            pieces.extend(
                std::iter::repeat(Piece::new(color, out)).take(CHECKERS_PER_COLOR - positions.len()),
            );
        }
        Ok(Board { pieces })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    /// All checkers at a position, in collection order
    pub fn pieces_at(&self, position: Position) -> Vec<&Piece> {
        self.pieces
            .iter()
            .filter(|piece| piece.position == position)
            .collect()
    }

    pub fn piece_ids_at(&self, position: Position) -> Vec<PieceId> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_id, piece)| piece.position == position)
            .map(|(id, _piece)| id)
            .collect()
    }

    /// The checker a player picks up from a stack: the last one placed there
    pub fn top_piece(&self, color: Color, position: Position) -> Option<PieceId> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_id, piece)| piece.color == color && piece.position == position)
            .map(|(id, _piece)| id)
            .last()
    }

    /// Relocate a checker, without any check
    pub fn move_piece(&mut self, id: PieceId, position: Position) {
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.move_to(position);
        }
    }

    pub fn count_at(&self, position: Position) -> usize {
        self.pieces
            .iter()
            .filter(|piece| piece.position == position)
            .count()
    }

    /// Number of checkers at a position and the color owning them, if any
    pub fn get_field_checkers(&self, position: Position) -> (usize, Option<Color>) {
        let pieces = self.pieces_at(position);
        (pieces.len(), pieces.first().map(|piece| piece.color))
    }

    pub fn bar_count(&self, color: Color) -> usize {
        self.color_count_at(color, color.bar_position())
    }

    pub fn out_count(&self, color: Color) -> usize {
        self.color_count_at(color, color.out_position())
    }

    fn color_count_at(&self, color: Color, position: Position) -> usize {
        self.pieces
            .iter()
            .filter(|piece| piece.color == color && piece.position == position)
            .count()
    }

    /// All White checkers still in play and not on the bar are on pips 18 to 23
    pub fn all_white_home(&self) -> bool {
        self.pieces
            .iter()
            .filter(|piece| piece.color == Color::White && piece.position < WHITE_OUT_POSITION)
            .all(|piece| (18..=23).contains(&piece.position))
    }

    /// All Black checkers still in play and not on the bar are on pips 0 to 5
    pub fn all_black_home(&self) -> bool {
        self.pieces
            .iter()
            .filter(|piece| piece.color == Color::Black && piece.position > BLACK_OUT_POSITION)
            .all(|piece| (0..=5).contains(&piece.position))
    }

    pub fn all_home(&self, color: Color) -> bool {
        match color {
            Color::White => self.all_white_home(),
            Color::Black => self.all_black_home(),
        }
    }

    /// White checkers on a pip strictly above `position`
    pub fn has_pieces_higher_than(&self, position: Position) -> bool {
        self.pieces.iter().any(|piece| {
            piece.color == Color::White
                && piece.position > position
                && piece.position < WHITE_OUT_POSITION
        })
    }

    /// Black checkers on a pip strictly below `position`
    pub fn has_pieces_lower_than(&self, position: Position) -> bool {
        self.pieces.iter().any(|piece| {
            piece.color == Color::Black && piece.position < position && piece.position >= 0
        })
    }

    /// Checkers of `color` sitting between `position` and the edge they bear off to
    pub fn has_pieces_nearer_out(&self, color: Color, position: Position) -> bool {
        match color {
            Color::White => self.has_pieces_higher_than(position),
            Color::Black => self.has_pieces_lower_than(position),
        }
    }

    /// Placement bits, in the style of the GNU Backgammon position id.
    ///
    /// For each color, starting with `first`: one `1` per checker on each pip,
    /// from the color's innermost home pip outwards, then its bar, each pip
    /// closed by a `0`. Borne off checkers are not encoded.
    pub fn to_gnupg_pos_id(&self, first: Color) -> String {
        let mut bits = String::new();
        for color in [first, first.opponent_color()] {
            let pips: Vec<Position> = match color {
                Color::White => (0..24).rev().collect(),
                Color::Black => (0..24).collect(),
            };
            for position in pips.into_iter().chain([color.bar_position()]) {
                let count = self.color_count_at(color, position);
                bits.push_str(&"1".repeat(count));
                bits.push('0');
            }
        }
        bits
    }

    /// ASCII rendering, `col_size` rows per half board.
    ///
    /// White checkers are drawn `O`, Black ones `X`. A stack taller than
    /// `col_size` shows its count in the last row.
    pub fn to_display_grid(&self, col_size: usize) -> String {
        let top: Vec<Position> = (12..24).collect();
        let bottom: Vec<Position> = (0..12).rev().collect();

        let mut lines = vec![Self::pips_line(&top)];
        lines.extend(self.half_rows(&top, col_size));
        lines.push(format!("{}-+{}", "-".repeat(18), "-".repeat(18)));
        let mut bottom_rows = self.half_rows(&bottom, col_size);
        bottom_rows.reverse();
        lines.extend(bottom_rows);
        lines.push(Self::pips_line(&bottom));
        lines.push(format!(
            "Bar: White {}, Black {} | Out: White {}, Black {}",
            self.count_at(WHITE_BAR_POSITION),
            self.count_at(BLACK_BAR_POSITION),
            self.count_at(WHITE_OUT_POSITION),
            self.count_at(BLACK_OUT_POSITION),
        ));

        let mut output = lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<&str>>()
            .join("\n");
        output.push('\n');
        output
    }

    fn pips_line(pips: &[Position]) -> String {
        let cells: Vec<String> = pips.iter().map(|pip| format!("{:>3}", pip)).collect();
        format!("{} |{}", cells[..6].concat(), cells[6..].concat())
    }

    /// One row of cells per stack level, nearest to the board edge first
    fn half_rows(&self, pips: &[Position], col_size: usize) -> Vec<String> {
        if col_size == 0 {
            return vec![];
        }
        // one input row per pip, holding its stack
        let mut columns = Vec::with_capacity(pips.len() * col_size);
        for pip in pips {
            let (count, color) = self.get_field_checkers(*pip);
            for level in 0..col_size {
                let cell = match color {
                    Some(_) if count > col_size && level == col_size - 1 => {
                        Cell::Count(count as u8)
                    }
                    Some(color) if level < count => Cell::Checker(color),
                    _ => Cell::Empty,
                };
                columns.push(cell);
            }
        }
        let mut rows = vec![Cell::Empty; columns.len()];
        transpose::transpose(&columns, &mut rows, col_size, pips.len());

        rows.chunks(pips.len())
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|cell| format!("{:>3}", cell)).collect();
                format!("{} |{}", cells[..6].concat(), cells[6..].concat())
            })
            .collect()
    }

    /// Check that the board still holds 15 checkers per color, each on a valid
    /// position.
    pub fn is_consistent(&self) -> bool {
        [Color::White, Color::Black].iter().all(|color| {
            let own: Vec<&Piece> = self.pieces.iter().filter(|p| p.color == *color).collect();
            own.len() == CHECKERS_PER_COLOR
                && own.iter().all(|piece| {
                    is_on_board(piece.position) || piece.is_on_bar() || piece.is_out()
                })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Empty,
    Checker(Color),
    Count(u8),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Cell::Empty => String::new(),
            Cell::Checker(Color::White) => "O".to_string(),
            Cell::Checker(Color::Black) => "X".to_string(),
            Cell::Count(count) => count.to_string(),
        };
        f.pad(&s)
    }
}
