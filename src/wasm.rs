//! JavaScript bindings for browser front ends.

use wasm_bindgen::prelude::*;

use crate::config::GameSettings;
use crate::game::GameSession;

/// A game session owned by JavaScript.
#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// Creates a session from a settings object shaped like [`GameSettings`].
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<WasmGame, JsError> {
        let settings: GameSettings = serde_wasm_bindgen::from_value(settings)?;
        let session = GameSession::new(settings)?;
        Ok(Self { session })
    }

    /// Standard black-first game on a `rows x columns` board.
    pub fn standard(rows: usize, columns: usize) -> Result<WasmGame, JsError> {
        let session = GameSession::standard(rows, columns)?;
        Ok(Self { session })
    }

    /// Full snapshot of the board, both players and the game status.
    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.to_game_state())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.session.legal_moves())?)
    }

    #[wasm_bindgen(js_name = isLegalMove)]
    pub fn is_legal_move(&self, row: usize, col: usize) -> bool {
        self.session.is_legal_move(row, col)
    }

    /// Applies a move for the active player and returns the new state.
    pub fn place(&mut self, row: usize, col: usize) -> Result<JsValue, JsError> {
        self.session.apply_move(row, col)?;
        self.state()
    }

    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        self.session.reset();
        self.state()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    #[wasm_bindgen(js_name = winnerMessage)]
    pub fn winner_message(&self) -> Option<String> {
        self.session.winner_message()
    }
}
