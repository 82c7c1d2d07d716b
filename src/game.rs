use tracing::{debug, info};

use crate::ai::{MoveSelector, TieredSelector};
use crate::board::Board;
use crate::error::EngineError;
use crate::types::{AiConfig, AiLevel, GameConfig, GameResult, Player, Position, Snapshot, Winner};

/// One position of a game plus everything derived from it.
///
/// Operations never mutate `self`; they return the next state, so a failed
/// call leaves the caller's value exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    game_over: bool,
    valid_moves: Vec<Position>,
    ai: AiConfig,
    last_move: Option<Position>,
    flipped: Vec<Position>,
    passed: Option<Player>,
}

impl GameState {
    /// Fresh game on a `size`x`size` board with Black to move.
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Ok(Self::from_board(Board::new(size)?, Player::Black))
    }

    /// Builds a state around an arbitrary position. The usual pass and
    /// game-over rules are applied before returning.
    pub fn from_board(board: Board, current_player: Player) -> Self {
        let mut state = Self {
            board,
            current_player,
            game_over: false,
            valid_moves: Vec::new(),
            ai: AiConfig::default(),
            last_move: None,
            flipped: Vec::new(),
            passed: None,
        };
        state.settle_turn();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Legal moves for the player to move, row-major. Empty once over.
    pub fn legal_moves(&self) -> &[Position] {
        &self.valid_moves
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// `None` while the game is in progress.
    pub fn winner(&self) -> Option<Winner> {
        self.game_over.then(|| {
            let (black, white) = self.board.count();
            Winner::from_counts(black, white)
        })
    }

    /// Returns `(black_count, white_count)`.
    pub fn piece_counts(&self) -> (usize, usize) {
        self.board.count()
    }

    pub fn ai(&self) -> &AiConfig {
        &self.ai
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn flipped(&self) -> &[Position] {
        &self.flipped
    }

    pub fn passed(&self) -> Option<Player> {
        self.passed
    }

    /// Plays `pos` for the player to move, then lets the AI seat answer.
    ///
    /// Fails with `IllegalMove` when the game is over or `pos` is not legal,
    /// and with `InvalidArgument` when `pos` is off the board.
    pub fn apply_move<S>(&self, pos: Position, selector: &mut S) -> Result<Self, EngineError>
    where
        S: MoveSelector + ?Sized,
    {
        let mut next = self.clone();
        next.play(pos)?;
        next.run_ai(selector)?;
        Ok(next)
    }

    /// Replaces the AI configuration. If the AI seat is now to move, it
    /// plays right away.
    pub fn configure_ai<S>(&self, ai: AiConfig, selector: &mut S) -> Result<Self, EngineError>
    where
        S: MoveSelector + ?Sized,
    {
        let mut next = self.clone();
        next.ai = ai;
        next.run_ai(selector)?;
        Ok(next)
    }

    pub fn snapshot(&self) -> Snapshot {
        let (black_count, white_count) = self.board.count();
        Snapshot {
            size: self.board.size(),
            board: self.board.to_vec(),
            current_player: self.current_player,
            black_count,
            white_count,
            valid_moves: self.valid_moves.clone(),
            is_game_over: self.game_over,
            winner: self.winner(),
            last_move: self.last_move,
            flipped: self.flipped.clone(),
            passed: self.passed,
            ai: self.ai,
        }
    }

    /// Final score, once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        let winner = self.winner()?;
        let (black_count, white_count) = self.board.count();
        Some(GameResult {
            winner,
            black_count,
            white_count,
        })
    }

    fn play(&mut self, pos: Position) -> Result<(), EngineError> {
        if !self.board.contains(pos) {
            return Err(EngineError::InvalidArgument(format!(
                "position {pos} is outside a {0}x{0} board",
                self.board.size()
            )));
        }
        if self.game_over || !self.valid_moves.contains(&pos) {
            return Err(EngineError::IllegalMove(pos));
        }

        let mover = self.current_player;
        let flipped = self.board.place(pos, mover)?;
        debug!(player = %mover, x = pos.x, y = pos.y, flipped = flipped.len(), "move applied");

        self.last_move = Some(pos);
        self.flipped = flipped;
        self.current_player = mover.opponent();
        self.settle_turn();
        Ok(())
    }

    /// Recomputes the legal set for the player to move, passing the turn
    /// back once if that player is blocked and ending the game if both are.
    fn settle_turn(&mut self) {
        self.passed = None;
        self.valid_moves = self.board.legal_moves(self.current_player);
        if !self.valid_moves.is_empty() {
            return;
        }

        let blocked = self.current_player;
        self.current_player = blocked.opponent();
        self.valid_moves = self.board.legal_moves(self.current_player);

        if self.valid_moves.is_empty() {
            self.game_over = true;
            let (black, white) = self.board.count();
            info!(black, white, winner = ?Winner::from_counts(black, white), "game over");
        } else {
            self.passed = Some(blocked);
            info!(player = %blocked, "no legal move, turn passes");
        }
    }

    /// Lets the AI seat move for as long as it is the player to move.
    /// Every move adds a piece, so this terminates.
    fn run_ai<S>(&mut self, selector: &mut S) -> Result<(), EngineError>
    where
        S: MoveSelector + ?Sized,
    {
        while !self.game_over {
            let Some(level) = self.ai.level_for(self.current_player) else {
                break;
            };

            let choice = selector
                .select_move(&self.board, self.current_player, &self.valid_moves, level)
                .ok_or(EngineError::SelectorFailed)?;
            if !self.valid_moves.contains(&choice) {
                return Err(EngineError::SelectorFailed);
            }

            self.play(choice)?;
        }
        Ok(())
    }
}

/// A running game session: the current state plus the AI's random stream.
pub struct GameInstance {
    state: GameState,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    /// Uses the built-in selector, seeded from `config.seed` or the clock.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        let selector = match config.seed {
            Some(seed) => TieredSelector::seeded(seed),
            None => TieredSelector::from_clock(),
        };
        Self::with_selector(config, Box::new(selector))
    }

    pub fn with_selector(
        config: GameConfig,
        mut selector: Box<dyn MoveSelector>,
    ) -> Result<Self, EngineError> {
        let state = GameState::new(config.size)?.configure_ai(config.ai, selector.as_mut())?;
        Ok(Self { state, selector })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn place(&mut self, x: usize, y: usize) -> Result<(), EngineError> {
        self.state = self
            .state
            .apply_move(Position::new(x, y), self.selector.as_mut())?;
        Ok(())
    }

    pub fn configure_ai(&mut self, ai: AiConfig) -> Result<(), EngineError> {
        self.state = self.state.configure_ai(ai, self.selector.as_mut())?;
        Ok(())
    }

    pub fn set_ai_level(&mut self, level: AiLevel) -> Result<(), EngineError> {
        let ai = AiConfig {
            level,
            ..*self.state.ai()
        };
        self.configure_ai(ai)
    }

    pub fn set_ai_seat(&mut self, seat: Player) -> Result<(), EngineError> {
        let ai = AiConfig {
            seat,
            ..*self.state.ai()
        };
        self.configure_ai(ai)
    }

    /// New game at the current size. The AI settings carry over.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.resize(self.state.board().size())
    }

    pub fn resize(&mut self, size: usize) -> Result<(), EngineError> {
        let ai = *self.state.ai();
        self.state = GameState::new(size)?.configure_ai(ai, self.selector.as_mut())?;
        info!(size, "game restarted");
        Ok(())
    }
}
