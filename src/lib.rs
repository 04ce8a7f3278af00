use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod player;
pub mod types;
pub mod wasm;

pub use board::{Board, Cell};
pub use config::{GameSettings, PlayerConfig};
pub use error::{MoveError, SettingsError};
pub use game::GameSession;
pub use player::Player;
pub use types::{CellState, CellView, GameState, GameStatus, Outcome, PieceColor, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
