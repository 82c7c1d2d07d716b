use rand::Rng;
use tracing::debug;

use crate::board::Board;
use crate::types::{AiLevel, Player, Position};

/// Picks a move for `player` at the given level.
///
/// Returns `None` for `AiLevel::None` or when `moves` is empty. `moves` is
/// expected in row-major order; both the random index and the greedy
/// tie-break depend on it.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    moves: &[Position],
    level: AiLevel,
    rng: &mut R,
) -> Option<Position> {
    let choice = match level {
        AiLevel::None => None,
        AiLevel::Novice => random_move(moves, rng),
        AiLevel::Master => greedy_move(board, player, moves),
        AiLevel::Amateur => {
            if rng.random_bool(0.5) {
                greedy_move(board, player, moves)
            } else {
                random_move(moves, rng)
            }
        }
    };

    if let Some(mv) = choice {
        debug!(?level, %player, x = mv.x, y = mv.y, candidates = moves.len(), "ai move selected");
    }
    choice
}

/// Uniform pick over `moves`.
pub fn random_move<R: Rng + ?Sized>(moves: &[Position], rng: &mut R) -> Option<Position> {
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}

/// The move flipping the most pieces. The first candidate wins ties.
pub fn greedy_move(board: &Board, player: Player, moves: &[Position]) -> Option<Position> {
    let mut best: Option<(Position, usize)> = None;

    for &mv in moves {
        let flips = board.count_flips(mv, player).unwrap_or(0);
        if best.is_none_or(|(_, max)| flips > max) {
            best = Some((mv, flips));
        }
    }

    best.map(|(mv, _)| mv)
}
