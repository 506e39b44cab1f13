//! Integration tests for the board command loop and its notifications

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use tetris_board::core::{
    Board, BoardConfig, BoardEvent, BoardSnapshot, EventLog, FixedSequence, PositionedPiece,
    ProgressTracker, SnapshotError,
};
use tetris_board::types::{Command, Point, Rotation, ShapeKind};

fn started(kinds: &[ShapeKind]) -> (Board, Rc<RefCell<EventLog>>) {
    let mut board = Board::new(BoardConfig::default(), FixedSequence::new(kinds.to_vec()));
    let log = Rc::new(RefCell::new(EventLog::new()));
    board.subscribe(Box::new(log.clone()));
    board.clear();
    (board, log)
}

/// Put `cells` and an active piece on a started board, then forget the events it caused
fn arrange(
    board: &mut Board,
    log: &Rc<RefCell<EventLog>>,
    cells: &[(usize, usize)],
    active: PositionedPiece,
) {
    let mut snap = board.snapshot();
    for &(x, y) in cells {
        snap.cells[y * snap.width + x] = Some(ShapeKind::L);
    }
    snap.active = Some(active.into());
    board.restore(&snap).unwrap();
    log.borrow_mut().take();
}

#[test]
fn test_game_lifecycle() {
    let mut board = Board::new(BoardConfig::default(), FixedSequence::repeat(ShapeKind::T));
    assert!(!board.is_running());
    assert!(!board.is_game_over());
    assert!(board.next_piece().is_none());

    board.clear();
    assert!(board.is_running());
    assert_eq!(board.active().unwrap().kind(), ShapeKind::T);
    assert_eq!(board.next_piece(), Some(ShapeKind::T));
}

#[test]
fn test_clear_event_order() {
    let (_board, log) = started(&[ShapeKind::S, ShapeKind::Z]);
    let log = log.borrow();

    assert_eq!(
        log.names(),
        vec!["game_over", "next_piece_changed", "board_changed"]
    );
    assert_eq!(log.events()[0], BoardEvent::GameOver(false));
    assert_eq!(log.events()[1], BoardEvent::NextPieceChanged(ShapeKind::Z));

    let board = log.last_board().unwrap();
    assert_eq!(board.active.unwrap().kind, ShapeKind::S);
    assert_eq!(board.next, Some(ShapeKind::Z));
    assert!(!board.game_over);
}

#[test]
fn test_accepted_move_emits_one_board_change() {
    let (mut board, log) = started(&[ShapeKind::T]);
    log.borrow_mut().take();

    assert!(board.left());
    let events = log.borrow_mut().take();
    assert_eq!(events.len(), 1);
    match &events[0] {
        BoardEvent::BoardChanged(snap) => {
            assert_eq!(snap.active.unwrap().x, 2);
            assert_eq!(snap.active.unwrap().y, 17);
        }
        other => panic!("expected BoardChanged, got {:?}", other),
    }
}

#[test]
fn test_rejected_move_is_silent() {
    let (mut board, log) = started(&[ShapeKind::T]);
    log.borrow_mut().take();

    for _ in 0..3 {
        assert!(board.left());
    }
    assert!(!board.left());
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(board.active().unwrap().anchor(), Point::new(0, 17));
}

#[test]
fn test_rotation_against_right_wall_rejected() {
    let (mut board, log) = started(&[ShapeKind::I]);
    assert!(board.rotate_cw());
    for _ in 0..6 {
        assert!(board.right());
    }
    assert!(!board.right());
    let vertical = board.active().unwrap();
    assert_eq!(vertical.anchor(), Point::new(9, 16));
    log.borrow_mut().take();

    // Either turn would lay the piece out past column 9
    assert!(!board.rotate_cw());
    assert!(!board.rotate_ccw());
    assert!(log.borrow().is_empty());
    assert_eq!(board.active().unwrap(), vertical);
}

#[test]
fn test_rotation_allowed_at_spawn() {
    let (mut board, log) = started(&[ShapeKind::T]);
    log.borrow_mut().take();

    assert!(board.rotate_cw());
    assert!(board.active().unwrap().rotation().is_transposed());
    assert_eq!(board.active().unwrap().anchor(), Point::new(3, 17));
    assert!(board.rotate_ccw());
    assert!(!board.active().unwrap().rotation().is_transposed());
    assert_eq!(log.borrow().names(), vec!["board_changed", "board_changed"]);
}

#[test]
fn test_down_locks_only_after_resting() {
    let (mut board, log) = started(&[ShapeKind::O]);
    for _ in 0..18 {
        assert!(board.down());
    }
    assert_eq!(board.active().unwrap().anchor(), Point::new(4, 0));
    assert!(!board.can_move(0, -1));
    assert_eq!(board.grid().filled_count(), 0);
    log.borrow_mut().take();

    assert!(board.down());
    assert_eq!(board.grid().filled_count(), 4);
    assert_eq!(
        log.borrow().names(),
        vec!["lines_completed", "next_piece_changed", "board_changed"]
    );
    assert_eq!(log.borrow().events()[0], BoardEvent::LinesCompleted(0));
}

#[test]
fn test_step_matches_down() {
    let (mut board, _log) = started(&[ShapeKind::J]);
    let before = board.active().unwrap();
    assert!(board.step());
    assert_eq!(board.active().unwrap(), before.down());
    assert!(board.apply(Command::Step));
    assert_eq!(board.active().unwrap(), before.down().down());
}

#[test]
fn test_drop_locks_at_ghost_position() {
    let (mut board, log) = started(&[ShapeKind::Z, ShapeKind::I]);
    let ghost = board.ghost().unwrap();
    log.borrow_mut().take();

    assert!(board.drop());
    for p in ghost.board_points() {
        assert_eq!(board.cell(p.x, p.y), Some(Some(ShapeKind::Z)));
    }
    // Only the lock is reported, not each row of the fall
    assert_eq!(
        log.borrow().names(),
        vec!["lines_completed", "next_piece_changed", "board_changed"]
    );
    assert_eq!(board.active().unwrap().kind(), ShapeKind::I);
}

#[test]
fn test_single_line_clear_shifts_rows() {
    let (mut board, log) = started(&[ShapeKind::I]);
    let mut cells: Vec<(usize, usize)> = (0..6).map(|x| (x, 0)).collect();
    cells.push((2, 1));
    arrange(
        &mut board,
        &log,
        &cells,
        PositionedPiece::new(ShapeKind::I, Point::new(6, 10)),
    );

    assert!(board.drop());

    let events = log.borrow_mut().take();
    assert_eq!(events[0], BoardEvent::LinesCompleted(1));
    assert_eq!(board.grid().filled_count(), 1);
    assert_eq!(board.cell(2, 0), Some(Some(ShapeKind::L)));
    assert_eq!(board.cell(2, 1), Some(None));
    assert!(board.is_running());
}

#[test]
fn test_multi_line_clear_reports_count() {
    let (mut board, log) = started(&[ShapeKind::I]);
    let mut cells = Vec::new();
    for y in 0..4 {
        for x in 0..9 {
            cells.push((x, y));
        }
    }
    cells.push((0, 4));
    arrange(
        &mut board,
        &log,
        &cells,
        PositionedPiece::with_rotation(ShapeKind::I, Point::new(9, 10), Rotation::Quarter),
    );

    assert!(board.drop());
    assert_eq!(log.borrow().events()[0], BoardEvent::LinesCompleted(4));
    assert_eq!(board.grid().filled_count(), 1);
    assert_eq!(board.cell(0, 0), Some(Some(ShapeKind::L)));
}

#[test]
fn test_game_over_when_spawn_blocked() {
    let (mut board, log) = started(&[ShapeKind::O]);
    let mut cells = Vec::new();
    for y in 18..20 {
        for x in 1..10 {
            cells.push((x, y));
        }
    }
    arrange(
        &mut board,
        &log,
        &cells,
        PositionedPiece::new(ShapeKind::O, Point::new(4, 0)),
    );

    assert!(board.drop());
    assert_eq!(
        log.borrow().names(),
        vec!["lines_completed", "next_piece_changed", "game_over"]
    );
    assert_eq!(
        log.borrow().events().last(),
        Some(&BoardEvent::GameOver(true))
    );
    assert!(board.is_game_over());
    assert!(board.active().is_none());
    log.borrow_mut().take();

    // Every move is a no-op until the next clear
    let filled = board.grid().filled_count();
    for command in [
        Command::Left,
        Command::Right,
        Command::Down,
        Command::Drop,
        Command::RotateCw,
        Command::RotateCcw,
        Command::Step,
    ] {
        assert!(!board.apply(command), "{} accepted after game over", command.as_str());
    }
    assert!(log.borrow().is_empty());
    assert_eq!(board.grid().filled_count(), filled);
    assert!(board.ghost().is_none());
}

#[test]
fn test_clear_after_game_over_starts_fresh() {
    let sequence = vec![ShapeKind::I, ShapeKind::O, ShapeKind::O, ShapeKind::O];
    let mut board = Board::new(BoardConfig::new(2, 2), FixedSequence::new(sequence));
    let log = Rc::new(RefCell::new(EventLog::new()));
    board.subscribe(Box::new(log.clone()));

    // An I piece is wider than the board, so the first spawn already fails
    board.clear();
    assert!(board.is_game_over());
    assert_eq!(
        log.borrow().names(),
        vec!["game_over", "next_piece_changed", "game_over", "board_changed"]
    );
    assert_eq!(log.borrow().events()[2], BoardEvent::GameOver(true));
    // The reset grid is still reported
    let reset = log.borrow().last_board().cloned().unwrap();
    assert!(reset.cells.iter().all(|c| c.is_none()));
    assert!(reset.game_over);
    assert!(reset.active.is_none());
    log.borrow_mut().take();

    board.clear();
    assert!(board.is_running());
    assert_eq!(board.active().unwrap().kind(), ShapeKind::O);
    assert_eq!(board.active().unwrap().anchor(), Point::new(0, 0));
    assert_eq!(
        log.borrow().names(),
        vec!["game_over", "next_piece_changed", "board_changed"]
    );
    assert_eq!(log.borrow().events()[0], BoardEvent::GameOver(false));
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut board = Board::new(BoardConfig::default(), FixedSequence::repeat(ShapeKind::L));
    let first = Rc::new(RefCell::new(EventLog::new()));
    let second = Rc::new(RefCell::new(EventLog::new()));
    let id = board.subscribe(Box::new(first.clone()));
    board.subscribe(Box::new(second.clone()));

    board.clear();
    assert_eq!(first.borrow().len(), 3);
    assert_eq!(second.borrow().len(), 3);

    assert!(board.unsubscribe(id));
    assert!(!board.unsubscribe(id));
    board.left();
    assert_eq!(first.borrow().len(), 3);
    assert_eq!(second.borrow().len(), 4);
}

#[test]
fn test_boards_do_not_share_subscribers() {
    let log = Rc::new(RefCell::new(EventLog::new()));
    let mut watched = Board::new(BoardConfig::default(), FixedSequence::repeat(ShapeKind::T));
    let mut other = Board::new(BoardConfig::default(), FixedSequence::repeat(ShapeKind::T));
    watched.subscribe(Box::new(log.clone()));

    other.clear();
    other.drop();
    assert!(log.borrow().is_empty());

    watched.clear();
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn test_channel_observer_receives_events() {
    let (tx, rx) = mpsc::channel();
    let mut board = Board::new(BoardConfig::default(), FixedSequence::repeat(ShapeKind::O));
    board.subscribe(Box::new(tx));

    board.clear();
    board.drop();

    let received: Vec<BoardEvent> = rx.try_iter().collect();
    let names: Vec<_> = received.iter().map(BoardEvent::name).collect();
    assert_eq!(
        names,
        vec![
            "game_over",
            "next_piece_changed",
            "board_changed",
            "lines_completed",
            "next_piece_changed",
            "board_changed",
        ]
    );
}

#[test]
fn test_progress_tracker_follows_clears() {
    let (mut board, log) = started(&[ShapeKind::I]);
    let progress = Rc::new(RefCell::new(ProgressTracker::new()));
    board.subscribe(Box::new(progress.clone()));

    let cells: Vec<(usize, usize)> = (0..6).map(|x| (x, 0)).collect();
    arrange(
        &mut board,
        &log,
        &cells,
        PositionedPiece::new(ShapeKind::I, Point::new(6, 10)),
    );
    board.drop();

    let progress = progress.borrow();
    assert_eq!(progress.lines(), 1);
    assert_eq!(progress.pieces_locked(), 1);
    assert_eq!(progress.level(), 0);
    assert_eq!(progress.step_interval_ms(), 1000);
}

#[test]
fn test_restore_rejects_bad_snapshots() {
    let (mut board, _log) = started(&[ShapeKind::T]);
    let good = board.snapshot();

    let small = Board::new(BoardConfig::new(4, 4), FixedSequence::repeat(ShapeKind::T));
    assert!(matches!(
        board.restore(&small.snapshot()),
        Err(SnapshotError::DimensionMismatch { .. })
    ));

    let mut short = good.clone();
    short.cells.pop();
    assert!(matches!(
        board.restore(&short),
        Err(SnapshotError::CellCount { .. })
    ));

    let mut full_row: BoardSnapshot = good.clone();
    for x in 0..10 {
        full_row.cells[x] = Some(ShapeKind::I);
    }
    assert_eq!(board.restore(&full_row), Err(SnapshotError::CompleteRow(0)));

    let mut collides = good.clone();
    collides.cells[18 * 10 + 4] = Some(ShapeKind::I);
    assert_eq!(board.restore(&collides), Err(SnapshotError::ActiveCollides));

    let mut over = good.clone();
    over.game_over = true;
    assert_eq!(
        board.restore(&over),
        Err(SnapshotError::ActiveAfterGameOver)
    );

    // Failed restores leave the board untouched
    assert_eq!(board.snapshot(), good);
}
