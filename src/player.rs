use serde::Serialize;

use crate::config::PlayerConfig;
use crate::types::{PieceColor, Position};

/// Live record of one player within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub(crate) id: u8,
    pub(crate) color: PieceColor,
    pub(crate) goes_first: bool,
    pub(crate) has_turn: bool,
    pub(crate) piece_count: usize,
    pub(crate) has_valid_move: bool,
    pub(crate) is_winner: bool,
    pub(crate) starting_indices: Vec<Position>,
    pub(crate) is_bot: bool,
}

impl Player {
    /// Fresh record holding exactly its starting pieces. The first mover
    /// starts with the turn.
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            id: config.id,
            color: config.color,
            goes_first: config.goes_first,
            has_turn: config.goes_first,
            piece_count: config.starting_indices.len(),
            has_valid_move: false,
            is_winner: false,
            starting_indices: config.starting_indices.clone(),
            is_bot: config.is_bot,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn color(&self) -> PieceColor {
        self.color
    }

    pub fn goes_first(&self) -> bool {
        self.goes_first
    }

    pub fn has_turn(&self) -> bool {
        self.has_turn
    }

    pub fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Result of the latest legal-move scan for this player.
    pub fn has_valid_move(&self) -> bool {
        self.has_valid_move
    }

    pub fn is_winner(&self) -> bool {
        self.is_winner
    }

    pub fn starting_indices(&self) -> &[Position] {
        &self.starting_indices
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    /// Still holding exactly the starting pieces.
    pub fn is_at_start(&self) -> bool {
        self.piece_count == self.starting_indices.len()
    }

    /// Restores the starting count and clears per-game flags.
    pub(crate) fn reset(&mut self) {
        self.piece_count = self.starting_indices.len();
        self.has_turn = self.goes_first;
        self.has_valid_move = false;
        self.is_winner = false;
    }
}
