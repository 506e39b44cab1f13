//! Piece geometry tests - shape table and rotation

use std::collections::HashSet;

use tetris_board::core::{get_shape, Board, BoardConfig, FixedSequence, PositionedPiece};
use tetris_board::types::{Point, Rotation, ShapeKind};

fn point_set(points: [Point; 4]) -> HashSet<Point> {
    points.into_iter().collect()
}

#[test]
fn test_every_shape_has_four_distinct_blocks_in_its_box() {
    for kind in ShapeKind::ALL {
        let shape = get_shape(kind);
        assert_eq!(shape.kind(), kind);
        assert!(shape.is_well_formed(), "{:?} is malformed", kind);
        assert_eq!(point_set(shape.points()).len(), 4);
    }
}

#[test]
fn test_rotations_stay_inside_enclosing_square() {
    for kind in ShapeKind::ALL {
        let w = get_shape(kind).width();
        for rotation in Rotation::ALL {
            let piece = PositionedPiece::with_rotation(kind, Point::new(0, 0), rotation);
            let points = piece.local_points();
            assert_eq!(point_set(points).len(), 4, "{:?} {:?}", kind, rotation);
            for p in points {
                assert!((0..w).contains(&p.x) && (0..w).contains(&p.y));
            }
        }
    }
}

#[test]
fn test_square_never_changes_under_rotation() {
    let o = PositionedPiece::new(ShapeKind::O, Point::new(4, 4));
    let spawn = point_set(o.board_points());
    let mut piece = o;
    for _ in 0..4 {
        piece = piece.rotate_cw();
        assert_eq!(point_set(piece.board_points()), spawn);
    }
}

#[test]
fn test_four_clockwise_turns_are_identity() {
    for kind in ShapeKind::ALL {
        let start = PositionedPiece::new(kind, Point::new(2, 2));
        let turned = start.rotate_cw().rotate_cw().rotate_cw().rotate_cw();
        assert_eq!(turned, start);
        assert_eq!(start.rotate_cw().rotate_ccw(), start);
    }
}

#[test]
fn test_i_quarter_turn_is_vertical() {
    let piece = PositionedPiece::with_rotation(ShapeKind::I, Point::new(0, 0), Rotation::Quarter);
    let expected = point_set([
        Point::new(0, 3),
        Point::new(0, 2),
        Point::new(0, 1),
        Point::new(0, 0),
    ]);
    assert_eq!(point_set(piece.local_points()), expected);
    assert_eq!(piece.width(), 1);
    assert_eq!(piece.height(), 4);
}

#[test]
fn test_t_quarter_turn_points_right() {
    let piece = PositionedPiece::with_rotation(ShapeKind::T, Point::new(0, 0), Rotation::Quarter);
    let expected = point_set([
        Point::new(1, 1),
        Point::new(0, 2),
        Point::new(0, 1),
        Point::new(0, 0),
    ]);
    assert_eq!(point_set(piece.local_points()), expected);
}

#[test]
fn test_transforms_leave_receiver_untouched() {
    let piece = PositionedPiece::new(ShapeKind::Z, Point::new(3, 5));
    let _ = piece.left().down().rotate_cw();
    assert_eq!(piece.anchor(), Point::new(3, 5));
    assert_eq!(piece.rotation(), Rotation::None);
}

#[test]
fn test_left_then_right_returns_to_start() {
    let mut board = Board::new(BoardConfig::default(), FixedSequence::repeat(ShapeKind::T));
    board.clear();
    let start = board.active().unwrap();

    assert!(board.left());
    assert_eq!(board.active().unwrap().anchor(), Point::new(2, 17));
    assert!(board.right());
    assert_eq!(board.active().unwrap(), start);
}
