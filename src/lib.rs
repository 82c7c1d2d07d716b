use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use ai::{MoveSelector, TieredSelector};
pub use board::Board;
pub use error::EngineError;
pub use game::{GameInstance, GameState};
pub use types::{
    AiConfig, AiLevel, Cell, GameConfig, GameResult, Player, Position, Snapshot, Winner,
};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
