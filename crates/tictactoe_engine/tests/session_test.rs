//! Tests for the session state machine.

use tictactoe_engine::{
    Board, GameSession, MoveOutcome, Phase, Player, PlayerNames, Position, Rejection, Square,
    Verdict, WIN_LINES,
};

fn started() -> GameSession {
    let mut session = GameSession::new();
    session.start(PlayerNames::default());
    session
}

fn play(session: &mut GameSession, indices: &[usize]) -> Vec<MoveOutcome> {
    indices.iter().map(|&i| session.apply_index(i)).collect()
}

#[test]
fn test_new_session_awaits_start() {
    let mut session = GameSession::new();
    assert_eq!(*session.phase(), Phase::AwaitingStart);
    assert!(!session.is_active());
    assert_eq!(
        session.apply_index(4),
        MoveOutcome::Ignored(Rejection::Inactive)
    );
    assert_eq!(*session.board(), Board::new());
    assert_eq!(session.status_text(), "Enter player names to start");
}

#[test]
fn test_top_row_win_scenario() {
    let mut session = started();
    let outcomes = play(&mut session, &[0, 3, 1, 4, 2]);

    let x = Square::Occupied(Player::X);
    let o = Square::Occupied(Player::O);
    let e = Square::Empty;
    assert_eq!(session.board().squares(), &[x, x, x, o, o, e, e, e, e]);

    let last = outcomes.last().copied().expect("five moves");
    match last.verdict() {
        Some(Verdict::Won(win)) => {
            assert_eq!(win.player, Player::X);
            assert_eq!(win.line.indices(), [0, 1, 2]);
        }
        other => panic!("Expected a win, got {other:?}"),
    }
    assert_eq!(last.winning_line().map(|l| l.indices()), Some([0, 1, 2]));
    assert_eq!(*session.phase(), Phase::Won);
    assert!(!session.is_active());
    assert_eq!(session.winner(), Some(Player::X));
    assert_eq!(session.status_text(), "Player X Wins!");
    assert_eq!(session.result_message().as_deref(), Some("Player X Wins!"));
}

#[test]
fn test_full_board_draw_scenario() {
    let mut session = started();
    let outcomes = play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

    for outcome in &outcomes[..8] {
        assert!(matches!(
            outcome.verdict(),
            Some(Verdict::Continue { .. })
        ));
    }
    assert_eq!(outcomes[8].verdict(), Some(Verdict::Draw));
    assert_eq!(*session.phase(), Phase::Drawn);
    assert_eq!(session.winner(), None);
    assert_eq!(*session.winning_line(), None);
    assert_eq!(session.status_text(), "Draw!");
    assert_eq!(session.result_message().as_deref(), Some("It's a Draw!"));
}

#[test]
fn test_turns_alternate() {
    let mut session = started();
    assert_eq!(*session.active_player(), Player::X);
    assert_eq!(
        session.apply_move(Position::Center).verdict(),
        Some(Verdict::Continue { next: Player::O })
    );
    assert_eq!(*session.active_player(), Player::O);
    assert_eq!(session.status_text(), "Player O's Turn");
    session.apply_move(Position::TopLeft);
    assert_eq!(*session.active_player(), Player::X);
    assert!(session.board().is_balanced());
}

#[test]
fn test_occupied_square_is_ignored() {
    let mut session = started();
    session.apply_move(Position::Center);
    let before = session.clone();

    let outcome = session.apply_move(Position::Center);

    assert_eq!(
        outcome,
        MoveOutcome::Ignored(Rejection::Occupied(Position::Center))
    );
    assert_eq!(session, before);
}

#[test]
fn test_moves_after_win_are_ignored() {
    let mut session = started();
    play(&mut session, &[0, 3, 1, 4, 2]);
    let before = session.clone();

    assert_eq!(
        session.apply_index(8),
        MoveOutcome::Ignored(Rejection::Inactive)
    );
    assert_eq!(session, before);
}

#[test]
fn test_off_board_index_is_ignored() {
    let mut session = started();
    let before = session.clone();
    assert_eq!(
        session.apply_index(9),
        MoveOutcome::Ignored(Rejection::OutOfRange(9))
    );
    assert_eq!(session, before);
}

#[test]
fn test_restart_resets_from_any_phase() {
    let mut won = started();
    play(&mut won, &[0, 3, 1, 4, 2]);
    let mut drawn = started();
    play(&mut drawn, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    let mut midgame = started();
    play(&mut midgame, &[4]);

    for session in [&mut won, &mut drawn, &mut midgame] {
        session.restart();
        assert_eq!(*session.board(), Board::new());
        assert_eq!(*session.active_player(), Player::X);
        assert!(session.is_active());
        assert_eq!(*session.winning_line(), None);
        assert!(session.history().is_empty());
    }
}

#[test]
fn test_restart_keeps_names() {
    let mut session = GameSession::new();
    session.start(PlayerNames::from_input("Ada", "Grace"));
    play(&mut session, &[0, 3, 1, 4, 2]);
    assert_eq!(session.status_text(), "Ada Wins!");

    session.restart();
    assert_eq!(session.status_text(), "Ada's Turn");
}

#[test]
fn test_o_can_win() {
    let mut session = GameSession::new();
    session.start(PlayerNames::from_input("", "Grace"));
    play(&mut session, &[0, 2, 1, 4, 8, 6]);
    assert_eq!(session.winner(), Some(Player::O));
    assert_eq!(session.winning_line().map(|l| l.indices()), Some([2, 4, 6]));
    assert_eq!(session.result_message().as_deref(), Some("Grace Wins!"));
}

#[test]
fn test_evaluate_terminal_reports_every_line() {
    for line in WIN_LINES {
        for player in [Player::X, Player::O] {
            let mut board = Board::new();
            for pos in line.positions() {
                board.set(pos, Square::Occupied(player));
            }
            let mut session = GameSession::from_board(board, player);
            match session.evaluate_terminal() {
                Verdict::Won(win) => {
                    assert_eq!(win.player, player);
                    assert_eq!(win.line, line);
                }
                other => panic!("Expected win on {:?}, got {other:?}", line.indices()),
            }
            assert_eq!(*session.winning_line(), Some(line));
            assert!(!session.is_active());
        }
    }
}

#[test]
fn test_full_board_without_line_is_draw_not_win() {
    // X O X / X O O / O X X
    let marks = [
        Player::X,
        Player::O,
        Player::X,
        Player::X,
        Player::O,
        Player::O,
        Player::O,
        Player::X,
        Player::X,
    ];
    let board = Board::from_squares(marks.map(Square::Occupied));
    let mut session = GameSession::from_board(board, Player::X);
    assert_eq!(session.evaluate_terminal(), Verdict::Draw);
    assert_eq!(session.winner(), None);
}

#[test]
fn test_evaluate_terminal_is_stable_after_game_over() {
    let mut session = started();
    play(&mut session, &[0, 3, 1, 4, 2]);
    let first = session.evaluate_terminal();
    let second = session.evaluate_terminal();
    assert_eq!(first, second);
    assert!(first.is_terminal());
}

#[test]
fn test_session_serializes() {
    let mut session = started();
    play(&mut session, &[4, 0]);
    let json = serde_json::to_string(&session).expect("serialize");
    let back: GameSession = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, session);
}
