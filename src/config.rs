use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::types::{PieceColor, Position};

const STANDARD_SIZE: usize = 8;
/// Largest board accepted from settings, 256x256.
pub const MAX_CELLS: usize = 1 << 16;

static STANDARD: Lazy<GameSettings> =
    Lazy::new(|| GameSettings::standard(STANDARD_SIZE, STANDARD_SIZE));

/// Static description of one player, supplied when a session is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub id: u8,
    pub color: PieceColor,
    pub goes_first: bool,
    /// Cells this player occupies before the first move.
    pub starting_indices: Vec<Position>,
    /// Carried for front ends; the engine never plays on its own.
    #[serde(default)]
    pub is_bot: bool,
}

/// Immutable input to session creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub rows: usize,
    pub columns: usize,
    pub players: [PlayerConfig; 2],
}

impl Default for GameSettings {
    /// Standard 8x8 game, black first.
    fn default() -> Self {
        STANDARD.clone()
    }
}

impl GameSettings {
    /// Two-player settings with the centred diamond opening: white on the
    /// main diagonal of the centre block, black on the anti-diagonal.
    pub fn standard(rows: usize, columns: usize) -> Self {
        let row_mid = rows.div_ceil(2);
        let col_mid = columns.div_ceil(2);
        let at = |dr: usize, dc: usize| {
            Position::new(row_mid.saturating_sub(1) + dr, col_mid.saturating_sub(1) + dc)
        };

        Self {
            rows,
            columns,
            players: [
                PlayerConfig {
                    id: 1,
                    color: PieceColor::Black,
                    goes_first: true,
                    starting_indices: vec![at(0, 1), at(1, 0)],
                    is_bot: false,
                },
                PlayerConfig {
                    id: 2,
                    color: PieceColor::White,
                    goes_first: false,
                    starting_indices: vec![at(0, 0), at(1, 1)],
                    is_bot: false,
                },
            ],
        }
    }

    /// Parses and validates settings from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Saturates instead of overflowing; validated settings never exceed
    /// [`MAX_CELLS`].
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Validate dimensions, colors, first-player choice and starting layout.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.rows < 2 || self.columns < 2 {
            return Err(SettingsError::Dimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if !matches!(self.rows.checked_mul(self.columns), Some(cells) if cells <= MAX_CELLS) {
            return Err(SettingsError::TooLarge {
                rows: self.rows,
                columns: self.columns,
                max: MAX_CELLS,
            });
        }

        let [first, second] = &self.players;
        if first.color == second.color {
            return Err(SettingsError::DuplicateColor(first.color));
        }

        let first_movers = self.players.iter().filter(|p| p.goes_first).count();
        if first_movers != 1 {
            return Err(SettingsError::FirstPlayer(first_movers));
        }

        let mut claimed = HashSet::new();
        for player in &self.players {
            for &position in &player.starting_indices {
                if position.row >= self.rows || position.col >= self.columns {
                    return Err(SettingsError::StartingIndexOutOfBounds {
                        player: player.id,
                        position,
                    });
                }
                if !claimed.insert(position) {
                    return Err(SettingsError::OverlappingStart(position));
                }
            }
        }

        Ok(())
    }
}
