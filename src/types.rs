use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_BOARD_SIZE: usize = 8;

/// A board coordinate. `x` is the column, `y` the row, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }
}

/// 0 = empty, 1 = black, 2 = white.
impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl Winner {
    /// Winner by piece count.
    pub fn from_counts(black: usize, white: usize) -> Self {
        if black > white {
            Winner::Black
        } else if white > black {
            Winner::White
        } else {
            Winner::Draw
        }
    }
}

/// Strength of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiLevel {
    /// No computer opponent; both seats are human.
    #[default]
    None,
    /// Uniformly random legal move.
    Novice,
    /// Coin flip between `Novice` and `Master` on every decision.
    Amateur,
    /// Greedy one-ply: the move that flips the most pieces.
    Master,
}

impl FromStr for AiLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(AiLevel::None),
            "novice" => Ok(AiLevel::Novice),
            "amateur" => Ok(AiLevel::Amateur),
            "master" => Ok(AiLevel::Master),
            other => Err(EngineError::InvalidArgument(format!(
                "unknown AI level: {other:?}"
            ))),
        }
    }
}

impl FromStr for Player {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Player::Black),
            "white" => Ok(Player::White),
            other => Err(EngineError::InvalidArgument(format!(
                "unknown seat: {other:?}"
            ))),
        }
    }
}

/// Which seat the computer plays and how strongly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub level: AiLevel,
    pub seat: Player,
}

impl AiConfig {
    pub fn new(level: AiLevel, seat: Player) -> Self {
        Self { level, seat }
    }

    /// Returns the level to play at when `player` is to move, or `None` when
    /// that seat is human.
    pub fn level_for(&self, player: Player) -> Option<AiLevel> {
        (self.level != AiLevel::None && self.seat == player).then_some(self.level)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            level: AiLevel::None,
            seat: Player::White,
        }
    }
}

/// Session configuration accepted from the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
    pub ai: AiConfig,
    /// Seed for the AI random stream. Wall clock when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            ai: AiConfig::default(),
            seed: None,
        }
    }
}

/// Public game state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub size: usize,
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: Player,
    pub black_count: usize,
    pub white_count: usize,
    pub valid_moves: Vec<Position>,
    pub is_game_over: bool,
    pub winner: Option<Winner>,
    pub last_move: Option<Position>,
    /// Squares flipped by `last_move`. Empty before the first move.
    pub flipped: Vec<Position>,
    /// Player whose turn was skipped by the last turn advance.
    pub passed: Option<Player>,
    pub ai: AiConfig,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Winner,
    pub black_count: usize,
    pub white_count: usize,
}
