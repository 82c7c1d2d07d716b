use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::types::{Cell, Player, Position};

pub const MIN_BOARD_SIZE: usize = 2;
pub const MAX_BOARD_SIZE: usize = 64;

/// `(dx, dy)` steps for the eight compass directions.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Square Reversi board, side length in `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`,
/// stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the starting position.
    ///
    /// Even sizes use the classic four-square cross around the center.
    /// Odd sizes put one black piece on the center square and a white piece
    /// on each orthogonal neighbor.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        let mut board = Self::empty(size)?;
        let mid = size / 2;

        if size % 2 == 0 {
            board.put(mid - 1, mid - 1, Cell::White);
            board.put(mid, mid - 1, Cell::Black);
            board.put(mid - 1, mid, Cell::Black);
            board.put(mid, mid, Cell::White);
        } else {
            board.put(mid, mid, Cell::Black);
            for (dx, dy) in [(0, -1), (-1, 0), (1, 0), (0, 1)] {
                if let Some((x, y)) = board.step(mid, mid, dx, dy) {
                    board.put(x, y, Cell::White);
                }
            }
        }

        Ok(board)
    }

    /// All-empty board.
    pub fn empty(size: usize) -> Result<Self, EngineError> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn cell(&self, pos: Position) -> Result<Cell, EngineError> {
        let idx = self.checked_index(pos)?;
        Ok(self.cells[idx])
    }

    /// Whether `player` may place a piece at `pos`.
    pub fn is_legal(&self, pos: Position, player: Player) -> Result<bool, EngineError> {
        Ok(self.count_flips(pos, player)? > 0)
    }

    /// Number of opponent pieces a placement at `pos` would flip.
    /// Zero for occupied squares and for squares with no capturing line.
    pub fn count_flips(&self, pos: Position, player: Player) -> Result<usize, EngineError> {
        let idx = self.checked_index(pos)?;
        if !self.cells[idx].is_empty() {
            return Ok(0);
        }

        Ok(DIRECTIONS
            .iter()
            .map(|&dir| self.capture_len(pos.x, pos.y, dir, player))
            .sum())
    }

    /// Legal placements for `player` in row-major order (y, then x).
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        let mut moves = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                if self.cells[self.index(x, y)].is_empty() && self.captures_any(x, y, player) {
                    moves.push(Position::new(x, y));
                }
            }
        }
        moves
    }

    pub fn has_legal_move(&self, player: Player) -> bool {
        (0..self.size).any(|y| {
            (0..self.size)
                .any(|x| self.cells[self.index(x, y)].is_empty() && self.captures_any(x, y, player))
        })
    }

    /// Places a piece and flips every captured line.
    ///
    /// Returns the flipped squares, walking the directions in a fixed order.
    /// The board is left untouched when the move is illegal.
    pub fn place(&mut self, pos: Position, player: Player) -> Result<Vec<Position>, EngineError> {
        let idx = self.checked_index(pos)?;
        if !self.cells[idx].is_empty() {
            return Err(EngineError::IllegalMove(pos));
        }

        let mut flips = Vec::new();
        for (dx, dy) in DIRECTIONS {
            let run = self.capture_len(pos.x, pos.y, (dx, dy), player);
            let (mut x, mut y) = (pos.x, pos.y);
            for _ in 0..run {
                // capture_len only counts squares that are on the board.
                let Some(next) = self.step(x, y, dx, dy) else {
                    break;
                };
                (x, y) = next;
                flips.push(Position::new(x, y));
            }
        }

        if flips.is_empty() {
            return Err(EngineError::IllegalMove(pos));
        }

        let own = player.cell();
        self.cells[idx] = own;
        for flip in &flips {
            let i = self.index(flip.x, flip.y);
            self.cells[i] = own;
        }

        Ok(flips)
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                Cell::Empty => (black, white),
            })
    }

    #[cfg(test)]
    pub(crate) fn empty_count(&self) -> usize {
        let (black, white) = self.count();
        self.cells.len() - black - white
    }

    /// Row-major cells as `u8` where 0=empty, 1=black, 2=white.
    pub fn to_vec(&self) -> Vec<u8> {
        self.cells.iter().map(|&cell| u8::from(cell)).collect()
    }

    fn captures_any(&self, x: usize, y: usize, player: Player) -> bool {
        DIRECTIONS
            .iter()
            .any(|&dir| self.capture_len(x, y, dir, player) > 0)
    }

    /// Opponent pieces captured along one direction from `(x, y)`.
    ///
    /// Walks while squares hold the opponent. The run counts only if it is
    /// non-empty and ends on one of `player`'s pieces; hitting an empty square
    /// or the edge first yields zero.
    fn capture_len(&self, x: usize, y: usize, (dx, dy): (isize, isize), player: Player) -> usize {
        let mut run = 0;
        let mut cursor = self.step(x, y, dx, dy);

        while let Some((cx, cy)) = cursor {
            match self.cells[self.index(cx, cy)].owner() {
                Some(owner) if owner == player => return run,
                Some(_) => run += 1,
                None => return 0,
            }
            cursor = self.step(cx, cy, dx, dy);
        }

        0
    }

    fn step(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.size && ny < self.size).then_some((nx, ny))
    }

    fn put(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    fn checked_index(&self, pos: Position) -> Result<usize, EngineError> {
        if !self.contains(pos) {
            return Err(EngineError::InvalidArgument(format!(
                "position {pos} is outside a {0}x{0} board",
                self.size
            )));
        }
        Ok(self.index(pos.x, pos.y))
    }
}

/// Parses one row per line: `B`/`X` black, `W`/`O` white, `.`/`-` empty.
/// Whitespace inside a row and blank lines are ignored.
impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(parse_cell)
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let size = rows.len();
        check_size(size)?;
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(EngineError::InvalidArgument(format!(
                "row {y} has {} cells, expected {size}",
                row.len()
            )));
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_size(size: usize) -> Result<(), EngineError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        return Err(EngineError::InvalidArgument(format!(
            "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}, got {size}"
        )));
    }
    Ok(())
}

fn parse_cell(c: char) -> Result<Cell, EngineError> {
    match c {
        '.' | '-' => Ok(Cell::Empty),
        'B' | 'b' | 'X' | 'x' => Ok(Cell::Black),
        'W' | 'w' | 'O' | 'o' => Ok(Cell::White),
        other => Err(EngineError::InvalidArgument(format!(
            "unexpected board character {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn even_sizes_start_with_classic_cross() {
        for size in [2, 4, 6, 8, 10] {
            let board = Board::new(size).unwrap();
            let mid = size / 2;

            assert_eq!(board.count(), (2, 2), "size {size}");
            assert_eq!(board.cell(pos(mid - 1, mid - 1)).unwrap(), Cell::White);
            assert_eq!(board.cell(pos(mid, mid - 1)).unwrap(), Cell::Black);
            assert_eq!(board.cell(pos(mid - 1, mid)).unwrap(), Cell::Black);
            assert_eq!(board.cell(pos(mid, mid)).unwrap(), Cell::White);
        }
    }

    #[test]
    fn odd_sizes_start_with_center_and_four_neighbors() {
        let board = Board::new(5).unwrap();

        assert_eq!(board.count(), (1, 4));
        assert_eq!(board.cell(pos(2, 2)).unwrap(), Cell::Black);
        for p in [pos(2, 1), pos(1, 2), pos(3, 2), pos(2, 3)] {
            assert_eq!(board.cell(p).unwrap(), Cell::White);
        }
    }

    #[test]
    fn sizes_outside_the_supported_range_are_rejected() {
        assert!(matches!(Board::new(1), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(Board::new(0), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(
            Board::new(MAX_BOARD_SIZE + 1),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(Board::new(40_000), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(
            Board::new(1usize << 32),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(Board::empty(usize::MAX), Err(EngineError::InvalidArgument(_))));

        let largest = Board::new(MAX_BOARD_SIZE).unwrap();
        assert_eq!(largest.size(), MAX_BOARD_SIZE);
        assert_eq!(largest.count(), (2, 2));
    }

    #[test]
    fn t01_initial_black_legal_moves_are_row_major() {
        let board = Board::new(8).unwrap();

        assert_eq!(
            board.legal_moves(Player::Black),
            vec![pos(3, 2), pos(2, 3), pos(5, 4), pos(4, 5)]
        );
        assert!(board.has_legal_move(Player::Black));
    }

    #[test]
    fn odd_board_black_moves_flank_the_neighbors() {
        let board = Board::new(5).unwrap();

        assert_eq!(
            board.legal_moves(Player::Black),
            vec![pos(2, 0), pos(0, 2), pos(4, 2), pos(2, 4)]
        );
        assert!(!board.has_legal_move(Player::White));
    }

    #[test]
    fn place_flips_opponent_stones_and_updates_counts() {
        let mut board = Board::new(8).unwrap();

        let flips = board.place(pos(2, 3), Player::Black).unwrap();

        assert_eq!(flips, vec![pos(3, 3)]);
        assert_eq!(board.count(), (4, 1));
        assert_eq!(board.empty_count(), 59);
        assert_eq!(board.cell(pos(2, 3)).unwrap(), Cell::Black);
        assert_eq!(board.cell(pos(3, 3)).unwrap(), Cell::Black);
        assert_eq!(board.cell(pos(4, 4)).unwrap(), Cell::White);
    }

    #[test]
    fn illegal_place_returns_error_and_keeps_board_unchanged() {
        let mut board = Board::new(8).unwrap();
        let before = board.clone();

        assert_eq!(
            board.place(pos(0, 0), Player::Black),
            Err(EngineError::IllegalMove(pos(0, 0)))
        );
        assert_eq!(
            board.place(pos(3, 3), Player::Black),
            Err(EngineError::IllegalMove(pos(3, 3)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_range_coordinates_are_invalid_arguments() {
        let mut board = Board::new(4).unwrap();

        assert!(matches!(board.cell(pos(4, 0)), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(
            board.is_legal(pos(0, 4), Player::Black),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            board.place(pos(9, 9), Player::Black),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn lines_that_run_off_the_edge_or_hit_empty_do_not_capture() {
        let board: Board = "
            . W W W
            . . . .
            . W . .
            . B . .
        "
        .parse()
        .unwrap();

        // East from (0,0) runs off the edge.
        assert_eq!(board.count_flips(pos(0, 0), Player::Black).unwrap(), 0);
        // East from (0,2) hits an empty square.
        assert_eq!(board.count_flips(pos(0, 2), Player::Black).unwrap(), 0);
        // South from (1,1) captures; north from it runs off the edge.
        assert_eq!(board.count_flips(pos(1, 1), Player::Black).unwrap(), 1);
        assert_eq!(board.legal_moves(Player::Black), vec![pos(1, 1)]);
    }

    #[test]
    fn flip_count_sums_every_capturing_direction() {
        let board: Board = "
            B . B . .
            . W W . .
            B W . W B
            . . . . .
            . . B . .
        "
        .parse()
        .unwrap();

        // North, north-west, east and west capture one each. South hits empty.
        assert_eq!(board.count_flips(pos(2, 2), Player::Black).unwrap(), 4);

        let mut after = board.clone();
        let flips = after.place(pos(2, 2), Player::Black).unwrap();
        assert_eq!(flips.len(), 4);
        for p in [pos(1, 1), pos(2, 1), pos(1, 2), pos(3, 2)] {
            assert!(flips.contains(&p));
            assert_eq!(after.cell(p).unwrap(), Cell::Black);
        }
        assert_eq!(after.count(), (10, 0));
    }

    #[test]
    fn legality_flip_count_and_placement_agree_on_every_square() {
        let mut board = Board::new(6).unwrap();
        for mv in [pos(2, 1), pos(1, 1), pos(1, 2)] {
            let player = if board.is_legal(mv, Player::Black).unwrap() {
                Player::Black
            } else {
                Player::White
            };
            board.place(mv, player).unwrap();
        }

        for player in [Player::Black, Player::White] {
            let legal = board.legal_moves(player);
            for y in 0..6 {
                for x in 0..6 {
                    let p = pos(x, y);
                    let flips = board.count_flips(p, player).unwrap();
                    assert_eq!(board.is_legal(p, player).unwrap(), flips > 0);
                    assert_eq!(legal.contains(&p), flips > 0);

                    let mut copy = board.clone();
                    match copy.place(p, player) {
                        Ok(flipped) => assert_eq!(flipped.len(), flips),
                        Err(_) => assert_eq!(flips, 0),
                    }
                }
            }
        }
    }

    #[test]
    fn parse_and_display_round_trip_a_fixture() {
        let text = "B W .\n. x o\n- . B\n";
        let board: Board = text.parse().unwrap();

        assert_eq!(board.size(), 3);
        assert_eq!(board.count(), (3, 2));
        assert_eq!(board.to_string(), "BW.\n.BW\n..B\n");
        assert_eq!(board.to_vec(), vec![1, 2, 0, 0, 1, 2, 0, 0, 1]);
    }

    #[test]
    fn malformed_fixtures_are_rejected() {
        assert!("B".parse::<Board>().is_err());
        assert!("BW\nB".parse::<Board>().is_err());
        assert!("BW\nBZ".parse::<Board>().is_err());
    }
}
