use wasm_bindgen::prelude::*;

use crate::game::GameInstance;
use crate::types::{AiLevel, GameConfig, Player};

/// Browser-facing handle on one game session.
#[wasm_bindgen]
pub struct ReversiGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl ReversiGame {
    /// `config` is `{ size?, ai?: { level?, seat? }, seed? }`, or
    /// `undefined`/`null` for an 8x8 game with no AI.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReversiGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: GameInstance::new(config)?,
        })
    }

    pub fn play(&mut self, x: usize, y: usize) -> Result<(), JsError> {
        self.inner.place(x, y)?;
        Ok(())
    }

    /// `"none" | "novice" | "amateur" | "master"`.
    pub fn set_ai_level(&mut self, level: &str) -> Result<(), JsError> {
        let level: AiLevel = level.parse()?;
        self.inner.set_ai_level(level)?;
        Ok(())
    }

    /// `"black" | "white"`.
    pub fn set_ai_seat(&mut self, seat: &str) -> Result<(), JsError> {
        let seat: Player = seat.parse()?;
        self.inner.set_ai_seat(seat)?;
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), JsError> {
        self.inner.restart()?;
        Ok(())
    }

    pub fn resize(&mut self, size: usize) -> Result<(), JsError> {
        self.inner.resize(size)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.state().snapshot())?)
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.inner.state().legal_moves())?)
    }

    /// `{ winner, black_count, white_count }`, or `undefined` mid-game.
    pub fn result(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.state().result())?)
    }

    pub fn is_over(&self) -> bool {
        self.inner.state().is_over()
    }
}
