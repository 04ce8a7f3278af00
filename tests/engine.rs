use flanking::{
    CellState, GameSession, GameSettings, GameStatus, Outcome, PieceColor, PlayerConfig,
    Position,
};

fn cells(session: &GameSession) -> Vec<CellState> {
    session.board().cells().map(|cell| cell.state()).collect()
}

fn assert_conserved(session: &GameSession) {
    let (rows, columns) = session.board().dimensions();
    let counted: usize = session.players().iter().map(|p| p.piece_count()).sum();
    assert_eq!(counted + session.empty_count(), rows * columns);
}

/// Settings whose starting layout is drawn with `B`, `W` and `.`; black moves first.
fn settings_from_diagram(lines: &[&str]) -> GameSettings {
    let pieces = |symbol: char| -> Vec<Position> {
        lines
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(move |&(_, ch)| ch == symbol)
                    .map(move |(col, _)| Position::new(row, col))
            })
            .collect()
    };

    GameSettings {
        rows: lines.len(),
        columns: lines[0].len(),
        players: [
            PlayerConfig {
                id: 1,
                color: PieceColor::Black,
                goes_first: true,
                starting_indices: pieces('B'),
                is_bot: false,
            },
            PlayerConfig {
                id: 2,
                color: PieceColor::White,
                goes_first: false,
                starting_indices: pieces('W'),
                is_bot: false,
            },
        ],
    }
}

/// Plays the first legal move each turn until the game ends, checking the
/// engine's invariants after every move.
fn play_out(mut session: GameSession) -> GameSession {
    let (rows, columns) = session.board().dimensions();

    for _ in 0..rows * columns {
        if session.is_game_over() {
            break;
        }

        let mover = session.current_color();
        let target = *session
            .legal_moves()
            .first()
            .expect("a running game always offers the active player a move");
        let expected_flips = session.board().collect_flips(target, mover);
        let before = cells(&session);
        let placed_before: usize = session.players().iter().map(|p| p.piece_count()).sum();

        session.apply_move(target.row, target.col).unwrap();

        // Only the placed cell and the flanked runs change.
        let after = cells(&session);
        for (idx, (old, new)) in before.iter().zip(&after).enumerate() {
            let pos = Position::new(idx / columns, idx % columns);
            if pos == target {
                assert_eq!(*old, CellState::Empty);
                assert_eq!(*new, CellState::Occupied(mover));
            } else if expected_flips.contains(&pos) {
                assert_eq!(*old, CellState::Occupied(mover.opponent()));
                assert_eq!(*new, CellState::Occupied(mover));
            } else {
                assert_eq!(old, new, "untouched cell {pos:?} changed");
            }
        }

        let placed_after: usize = session.players().iter().map(|p| p.piece_count()).sum();
        assert_eq!(placed_after, placed_before + 1);
        assert_eq!(session.last_flipped().len(), expected_flips.len());
        assert_conserved(&session);
        assert_eq!(
            session.players().iter().filter(|p| p.has_turn()).count(),
            1
        );
        if !session.is_game_over() {
            if session.is_pass() {
                assert_eq!(session.current_color(), mover);
            } else {
                assert_eq!(session.current_color(), mover.opponent());
            }
        }
    }

    session
}

#[test]
fn standard_game_plays_to_completion() {
    let session = play_out(GameSession::standard(8, 8).unwrap());

    assert_eq!(session.status(), GameStatus::GameOver);
    assert!(session.legal_moves().is_empty());

    let [black, white] = session.players();
    let expected = match black.piece_count().cmp(&white.piece_count()) {
        std::cmp::Ordering::Greater => Outcome::Winner(PieceColor::Black),
        std::cmp::Ordering::Less => Outcome::Winner(PieceColor::White),
        std::cmp::Ordering::Equal => Outcome::Draw,
    };
    assert_eq!(session.winner(), Some(expected));
    assert_eq!(session.winner_message(), Some(expected.message()));
    assert_eq!(
        session.players().iter().filter(|p| p.is_winner()).count(),
        usize::from(expected != Outcome::Draw)
    );
}

#[test]
fn rectangular_games_play_to_completion() {
    for (rows, columns) in [(4, 6), (6, 4), (4, 4), (10, 8)] {
        let session = play_out(GameSession::standard(rows, columns).unwrap());
        assert!(session.is_game_over(), "{rows}x{columns} did not finish");
    }
}

#[test]
fn game_over_follows_board_rules() {
    let session = play_out(GameSession::standard(6, 6).unwrap());
    let full = session.empty_count() == 0;
    let stalled = session
        .players()
        .iter()
        .all(|p| session.board().legal_moves(p.color()).is_empty());

    assert!(full || stalled);
}

#[test]
fn reset_after_full_game_restores_opening() {
    let settings = GameSettings::standard(8, 8);
    let fresh = GameSession::new(settings.clone()).unwrap();
    let mut session = play_out(GameSession::new(settings).unwrap());

    session.reset();

    assert_eq!(session, fresh);
    assert_eq!(session.status(), GameStatus::InitialStart);
    assert!(session.winner().is_none());
    for player in session.players() {
        assert_eq!(player.piece_count(), player.starting_indices().len());
        assert!(!player.is_winner());
    }
    assert_eq!(cells(&session), cells(&fresh));
}

#[test]
fn opening_scenario_from_toml_settings() {
    let settings = GameSettings::from_toml_str(
        r#"
rows = 8
columns = 8

[[players]]
id = 1
color = "black"
goes_first = true
starting_indices = [{ row = 3, col = 4 }, { row = 4, col = 3 }]

[[players]]
id = 2
color = "white"
goes_first = false
starting_indices = [{ row = 3, col = 3 }, { row = 4, col = 4 }]
"#,
    )
    .unwrap();
    let mut session = GameSession::new(settings).unwrap();

    session.apply_move(2, 3).unwrap();

    let state = session.to_game_state();
    assert_eq!(state.players[0].piece_count(), 4);
    assert_eq!(state.players[1].piece_count(), 1);
    assert!(state.players[1].has_turn());
    assert_eq!(state.flipped, vec![Position::new(3, 3)]);
    assert_eq!(state.cells[3 * 8 + 3].color, Some(PieceColor::Black));
}

#[test]
fn multi_ray_capture_flips_only_flanked_runs() {
    let settings = settings_from_diagram(&[
        "B.B.B", //
        ".WWW.", //
        "BW.WW", //
        ".WWW.", //
        "B....",
    ]);
    let mut session = GameSession::new(settings).unwrap();

    session.apply_move(2, 2).unwrap();

    // Five rays close on black; right runs off the board, down and
    // down-right end on empty cells.
    assert_eq!(
        session.board().to_string(),
        "B.B.B\n\
         .BBB.\n\
         BBBWW\n\
         .BWW.\n\
         B...."
    );
    assert_eq!(session.players()[0].piece_count(), 11);
    assert_eq!(session.players()[1].piece_count(), 4);
    assert_eq!(session.last_flipped().len(), 5);
    assert_eq!(session.current_color(), PieceColor::White);
    assert_conserved(&session);
}
