pub mod strategy;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::board::Board;
use crate::types::{AiLevel, Player, Position};

pub use strategy::{greedy_move, random_move, select_move};

/// Chooses a move for the computer seat. Implementations must not mutate
/// game state; the engine applies the returned move itself.
pub trait MoveSelector {
    fn select_move(
        &mut self,
        board: &Board,
        player: Player,
        moves: &[Position],
        level: AiLevel,
    ) -> Option<Position>;
}

/// The three built-in tiers driven by one injectable random stream.
#[derive(Debug, Clone)]
pub struct TieredSelector<R = StdRng> {
    rng: R,
}

impl TieredSelector<StdRng> {
    /// Reproducible stream for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeds from the wall clock. Works the same in the browser.
    pub fn from_clock() -> Self {
        Self::seeded(clock_seed())
    }
}

impl<R: Rng> TieredSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for TieredSelector<R> {
    fn select_move(
        &mut self,
        board: &Board,
        player: Player,
        moves: &[Position],
        level: AiLevel,
    ) -> Option<Position> {
        select_move(board, player, moves, level, &mut self.rng)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
