use crate::types::{PieceColor, Position};

/// Errors raised while building a session from [`GameSettings`].
///
/// [`GameSettings`]: crate::config::GameSettings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("board must be at least 2x2, got {rows}x{columns}")]
    Dimensions { rows: usize, columns: usize },

    #[error("board of {rows}x{columns} exceeds the {max} cell limit")]
    TooLarge {
        rows: usize,
        columns: usize,
        max: usize,
    },

    #[error("both players use the color {0}")]
    DuplicateColor(PieceColor),

    #[error("exactly one player must go first, found {0}")]
    FirstPlayer(usize),

    #[error("player {player} starts outside the board at {position}")]
    StartingIndexOutOfBounds { player: u8, position: Position },

    #[error("starting cell {0} is claimed twice")]
    OverlappingStart(Position),

    #[error("failed to parse settings TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Reasons a move attempt is rejected. A rejected move leaves the session
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell ({row}, {col}) is outside the {rows}x{columns} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },

    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("placing {color} at ({row}, {col}) captures nothing")]
    NoCapture {
        row: usize,
        col: usize,
        color: PieceColor,
    },

    #[error("game is already over")]
    GameOver,
}
