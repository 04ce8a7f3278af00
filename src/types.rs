use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Player;

/// A board coordinate, 0-indexed from the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps one cell along `(dr, dc)`, or `None` when the step leaves a
    /// `rows x columns` grid.
    pub fn step(self, (dr, dc): (isize, isize), rows: usize, columns: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < columns).then_some(Self { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The two piece colors. Each player owns exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    Black,
    White,
}

impl PieceColor {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "color")]
pub enum CellState {
    #[default]
    Empty,
    Occupied(PieceColor),
}

impl CellState {
    pub fn color(self) -> Option<PieceColor> {
        match self {
            Self::Empty => None,
            Self::Occupied(color) => Some(color),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// No move has been made: both players still hold their starting count.
    InitialStart,
    InProgress,
    GameOver,
}

/// Final result once the session reaches [`GameStatus::GameOver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner(PieceColor),
    Draw,
}

impl Outcome {
    /// Message shown to the players when the game ends.
    pub fn message(self) -> String {
        match self {
            Self::Winner(color) => format!("{color} Wins!"),
            Self::Draw => "Draw!".to_string(),
        }
    }
}

/// One cell as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub has_element: bool,
    pub color: Option<PieceColor>,
    /// Placing the active player's piece here is currently legal.
    pub can_be_selected: bool,
}

/// Public game state handed to the presentation layer after every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub rows: usize,
    pub columns: usize,
    /// Row-major cell views, `rows * columns` long.
    pub cells: Vec<CellView>,
    pub players: [Player; 2],
    pub current_color: PieceColor,
    pub status: GameStatus,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the last turn switch skipped a player with no legal move.
    /// - `false` otherwise.
    pub is_pass: bool,
    /// Cells recolored by the most recent move, empty after creation or reset.
    pub flipped: Vec<Position>,
    pub winner_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stays_inside_grid() {
        let origin = Position::new(0, 0);

        assert_eq!(origin.step((-1, 0), 8, 8), None);
        assert_eq!(origin.step((0, -1), 8, 8), None);
        assert_eq!(origin.step((1, 1), 8, 8), Some(Position::new(1, 1)));
        assert_eq!(Position::new(7, 3).step((1, 0), 8, 8), None);
        assert_eq!(Position::new(1, 5).step((0, 1), 2, 6), None);
    }

    #[test]
    fn outcome_messages_name_the_winning_color() {
        assert_eq!(Outcome::Winner(PieceColor::Black).message(), "black Wins!");
        assert_eq!(Outcome::Winner(PieceColor::White).message(), "white Wins!");
        assert_eq!(Outcome::Draw.message(), "Draw!");
    }

    #[test]
    fn cell_state_exposes_color_only_when_occupied() {
        assert_eq!(CellState::Empty.color(), None);
        assert!(CellState::Empty.is_empty());
        assert_eq!(
            CellState::Occupied(PieceColor::White).color(),
            Some(PieceColor::White)
        );
    }
}
