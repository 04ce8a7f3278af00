use std::fmt;

use crate::config::PlayerConfig;
use crate::types::{CellState, PieceColor, Position};

pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One grid position. The position is fixed when the board is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    state: CellState,
}

impl Cell {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn has_element(&self) -> bool {
        !self.state.is_empty()
    }

    pub fn color(&self) -> Option<PieceColor> {
        self.state.color()
    }
}

/// `rows x columns` grid of cells stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board of empty cells, each tagged with its own position.
    pub fn new(rows: usize, columns: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..columns).map(move |col| Position::new(row, col)))
            .map(|position| Cell {
                position,
                state: CellState::Empty,
            })
            .collect();

        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Places every player's starting pieces. Seeding is trusted input:
    /// no legality checks are made, positions are validated by the settings.
    pub fn seed(&mut self, players: &[PlayerConfig]) {
        for player in players {
            for &pos in &player.starting_indices {
                debug_assert!(self.contains(pos), "starting index {pos:?} out of range");
                self.set(pos, CellState::Occupied(player.color));
            }
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.columns
    }

    /// Bounds-checked lookup.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index_of(Position::new(row, col))
            .map(|idx| &self.cells[idx])
    }

    /// State of the cell at `pos`, `None` when off the board.
    pub fn state_at(&self, pos: Position) -> Option<CellState> {
        self.get(pos.row, pos.col).map(Cell::state)
    }

    /// Overwrites one cell. Returns `false` and leaves the board untouched
    /// when `pos` is off the board.
    pub fn set(&mut self, pos: Position, state: CellState) -> bool {
        match self.index_of(pos) {
            Some(idx) => {
                self.cells[idx].state = state;
                true
            }
            None => false,
        }
    }

    /// Recolors every listed cell to `color`.
    pub fn recolor(&mut self, positions: &[Position], color: PieceColor) {
        for &pos in positions {
            self.set(pos, CellState::Occupied(color));
        }
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells holding a piece of `color`.
    pub fn count(&self, color: PieceColor) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.color() == Some(color))
            .count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.has_element()).count()
    }

    /// Returns true when placing `active` at `pos` captures at least one
    /// opponent piece. Walks each ray and stops at the first that qualifies.
    pub fn is_legal_move(&self, pos: Position, active: PieceColor) -> bool {
        if self.state_at(pos) != Some(CellState::Empty) {
            return false;
        }

        let opponent = active.opponent();
        DIRECTIONS.iter().any(|&dir| {
            let mut found_opponent = false;
            let mut next = pos.step(dir, self.rows, self.columns);

            while let Some(square) = next {
                match self.state_at(square) {
                    Some(CellState::Occupied(color)) if color == opponent => {
                        found_opponent = true;
                    }
                    Some(CellState::Occupied(color)) if color == active && found_opponent => {
                        return true;
                    }
                    _ => break,
                }
                next = square.step(dir, self.rows, self.columns);
            }

            false
        })
    }

    /// All empty cells where `active` has a legal move, in row-major order.
    pub fn legal_moves(&self, active: PieceColor) -> Vec<Position> {
        self.cells
            .iter()
            .map(Cell::position)
            .filter(|&pos| self.is_legal_move(pos, active))
            .collect()
    }

    /// Whether `active` has any legal move. Stops at the first one found.
    pub fn has_legal_move(&self, active: PieceColor) -> bool {
        self.cells
            .iter()
            .any(|cell| self.is_legal_move(cell.position(), active))
    }

    /// Opponent cells captured along one ray from `origin`.
    ///
    /// The run is returned only when it is properly flanked: one or more
    /// opponent cells followed by an `active` cell. A ray that leaves the
    /// board or reaches an empty cell first yields an empty run.
    pub fn flank_run(
        &self,
        origin: Position,
        dir: (isize, isize),
        active: PieceColor,
    ) -> Vec<Position> {
        let opponent = active.opponent();
        let mut run = Vec::new();
        let mut next = origin.step(dir, self.rows, self.columns);

        while let Some(square) = next {
            match self.state_at(square) {
                Some(CellState::Occupied(color)) if color == opponent => run.push(square),
                Some(CellState::Occupied(_)) if !run.is_empty() => return run,
                _ => break,
            }
            next = square.step(dir, self.rows, self.columns);
        }

        Vec::new()
    }

    /// Every opponent cell captured by placing `active` at `origin`.
    pub fn collect_flips(&self, origin: Position, active: PieceColor) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .flat_map(|&dir| self.flank_run(origin, dir, active))
            .collect()
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.columns + pos.col)
    }

    /// Builds a board from rows of `B`, `W` and `.`.
    #[cfg(test)]
    pub(crate) fn from_diagram(lines: &[&str]) -> Self {
        let rows = lines.len();
        let columns = lines.first().map_or(0, |line| line.len());
        let mut board = Self::new(rows, columns);

        for (row, line) in lines.iter().enumerate() {
            assert_eq!(line.len(), columns, "ragged diagram row {row}");
            for (col, ch) in line.chars().enumerate() {
                let state = match ch {
                    'B' => CellState::Occupied(PieceColor::Black),
                    'W' => CellState::Occupied(PieceColor::White),
                    _ => CellState::Empty,
                };
                board.set(Position::new(row, col), state);
            }
        }

        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.chunks(self.columns.max(1)).enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let symbol = match cell.state {
                    CellState::Empty => '.',
                    CellState::Occupied(PieceColor::Black) => 'B',
                    CellState::Occupied(PieceColor::White) => 'W',
                };
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}
