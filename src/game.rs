use tracing::{debug, instrument, warn};

use crate::board::Board;
use crate::config::GameSettings;
use crate::error::{MoveError, SettingsError};
use crate::player::Player;
use crate::types::{CellState, CellView, GameState, GameStatus, Outcome, PieceColor, Position};

/// One game: a board, two players and whose turn it is.
///
/// Every method completes immediately. Rejected moves leave the session
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    settings: GameSettings,
    board: Board,
    players: [Player; 2],
    current: usize,
    status: GameStatus,
    /// Legal moves of the active player, row-major.
    legal_moves: Vec<Position>,
    outcome: Option<Outcome>,
    is_pass: bool,
    flipped: Vec<Position>,
}

impl GameSession {
    #[instrument(skip(settings), fields(rows = settings.rows, columns = settings.columns))]
    pub fn new(settings: GameSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut board = Board::new(settings.rows, settings.columns);
        board.seed(&settings.players);
        let players = [
            Player::from_config(&settings.players[0]),
            Player::from_config(&settings.players[1]),
        ];

        let mut session = Self {
            current: first_mover(&players),
            settings,
            board,
            players,
            status: GameStatus::InitialStart,
            legal_moves: Vec::new(),
            outcome: None,
            is_pass: false,
            flipped: Vec::new(),
        };
        session.refresh();
        debug!(status = ?session.status, "session created");

        Ok(session)
    }

    /// Standard two-player game with the centred diamond opening.
    pub fn standard(rows: usize, columns: usize) -> Result<Self, SettingsError> {
        Self::new(GameSettings::standard(rows, columns))
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[self.opponent_index()]
    }

    pub fn current_color(&self) -> PieceColor {
        self.current_player().color
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// `true` when the last turn switch skipped a player with no legal move.
    pub fn is_pass(&self) -> bool {
        self.is_pass
    }

    /// Cells recolored by the most recent move.
    pub fn last_flipped(&self) -> &[Position] {
        &self.flipped
    }

    /// Cells where the active player may place a piece, row-major.
    pub fn legal_moves(&self) -> &[Position] {
        &self.legal_moves
    }

    /// Read-only query: may the active player place a piece at `(row, col)`?
    pub fn is_legal_move(&self, row: usize, col: usize) -> bool {
        !self.is_game_over()
            && self
                .board
                .is_legal_move(Position::new(row, col), self.current_color())
    }

    /// Final result, available once the game is over.
    pub fn winner(&self) -> Option<Outcome> {
        self.outcome
    }

    /// `"<color> Wins!"` or `"Draw!"` once the game is over.
    pub fn winner_message(&self) -> Option<String> {
        self.outcome.map(Outcome::message)
    }

    pub fn empty_count(&self) -> usize {
        self.board.empty_count()
    }

    /// Places the active player's piece at `(row, col)`, flips every flanked
    /// run and passes the turn.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] without touching the session when the game is
    /// over, the cell is off the board or occupied, or the move captures
    /// nothing.
    #[instrument(skip(self), fields(color = %self.current_color()))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        if let Err(err) = self.check_move(row, col) {
            warn!(%err, "move rejected");
            return Err(err);
        }

        let pos = Position::new(row, col);
        let active = self.current_color();
        let flips = self.board.collect_flips(pos, active);
        debug_assert!(!flips.is_empty(), "legal move without captures");

        let opponent = self.opponent_index();
        self.board.set(pos, CellState::Occupied(active));
        self.players[self.current].piece_count += 1;

        self.board.recolor(&flips, active);
        self.players[self.current].piece_count += flips.len();
        self.players[opponent].piece_count -= flips.len();
        debug!(flipped = flips.len(), "move applied");

        self.flipped = flips;
        self.switch_turn();

        Ok(())
    }

    /// Hands the turn to the other player. When the new active player has no
    /// legal move and the game is still running, the turn is handed straight
    /// back and the skip is recorded as a pass.
    #[instrument(skip(self))]
    pub fn switch_turn(&mut self) {
        self.toggle_turn();
        self.is_pass = false;
        self.refresh();

        if !self.is_game_over() && !self.current_player().has_valid_move {
            debug!(skipped = %self.current_color(), "no legal move, passing");
            self.toggle_turn();
            self.is_pass = true;
            self.refresh();
        }
    }

    /// Rebuilds the board from the session settings and restores both
    /// players to their starting state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.current = first_mover(&self.players);

        self.board = Board::new(self.settings.rows, self.settings.columns);
        self.board.seed(&self.settings.players);

        self.outcome = None;
        self.is_pass = false;
        self.flipped.clear();
        self.refresh();
    }

    /// Snapshot for the presentation layer.
    pub fn to_game_state(&self) -> GameState {
        let (rows, columns) = self.board.dimensions();
        let cells = self
            .board
            .cells()
            .map(|cell| {
                let pos = cell.position();
                CellView {
                    row: pos.row,
                    col: pos.col,
                    has_element: cell.has_element(),
                    color: cell.color(),
                    can_be_selected: self.legal_moves.binary_search(&pos).is_ok(),
                }
            })
            .collect();

        GameState {
            rows,
            columns,
            cells,
            players: self.players.clone(),
            current_color: self.current_color(),
            status: self.status,
            is_game_over: self.is_game_over(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            winner_message: self.winner_message(),
        }
    }

    fn check_move(&self, row: usize, col: usize) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }

        let (rows, columns) = self.board.dimensions();
        let cell = self.board.get(row, col).ok_or(MoveError::OutOfBounds {
            row,
            col,
            rows,
            columns,
        })?;
        if cell.has_element() {
            return Err(MoveError::Occupied { row, col });
        }

        let color = self.current_color();
        if !self.board.is_legal_move(cell.position(), color) {
            return Err(MoveError::NoCapture { row, col, color });
        }

        Ok(())
    }

    fn opponent_index(&self) -> usize {
        1 - self.current
    }

    fn toggle_turn(&mut self) {
        self.current = self.opponent_index();
        for (idx, player) in self.players.iter_mut().enumerate() {
            player.has_turn = idx == self.current;
        }
    }

    /// Rescans legal moves for both players, then recomputes the status and
    /// settles the winner when the game has just ended.
    fn refresh(&mut self) {
        let opponent = self.opponent_index();
        let legal = self.board.legal_moves(self.current_color());
        self.players[self.current].has_valid_move = !legal.is_empty();
        self.players[opponent].has_valid_move =
            self.board.has_legal_move(self.players[opponent].color);
        self.status = self.compute_status();

        self.legal_moves = if self.is_game_over() { Vec::new() } else { legal };

        if self.is_game_over() && self.outcome.is_none() {
            self.settle_winner();
        }
    }

    fn compute_status(&self) -> GameStatus {
        let placed: usize = self.players.iter().map(|p| p.piece_count).sum();
        if placed == self.settings.cell_count() {
            return GameStatus::GameOver;
        }

        if self.players.iter().all(Player::is_at_start) {
            return GameStatus::InitialStart;
        }

        if self.players.iter().all(|p| !p.has_valid_move) {
            GameStatus::GameOver
        } else {
            GameStatus::InProgress
        }
    }

    fn settle_winner(&mut self) {
        let [first, second] = &mut self.players;
        let outcome = match first.piece_count.cmp(&second.piece_count) {
            std::cmp::Ordering::Greater => {
                first.is_winner = true;
                Outcome::Winner(first.color)
            }
            std::cmp::Ordering::Less => {
                second.is_winner = true;
                Outcome::Winner(second.color)
            }
            std::cmp::Ordering::Equal => Outcome::Draw,
        };
        debug!(?outcome, "game over");
        self.outcome = Some(outcome);
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current: PieceColor) {
        for player in &mut self.players {
            player.piece_count = board.count(player.color);
        }
        self.current = if self.players[0].color == current { 0 } else { 1 };
        for (idx, player) in self.players.iter_mut().enumerate() {
            player.has_turn = idx == self.current;
        }
        self.board = board;
        self.outcome = None;
        self.is_pass = false;
        self.flipped.clear();
        self.refresh();
    }
}

fn first_mover(players: &[Player; 2]) -> usize {
    if players[0].goes_first { 0 } else { 1 }
}
