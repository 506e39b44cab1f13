//! Pieces module - the seven shape definitions and their rotation geometry
//!
//! Each shape is described once, in its spawn orientation, by four block offsets inside
//! a tight bounding box (y up). Rotated layouts are computed on demand by remapping each
//! offset inside the `width x width` square that encloses the box, so the table itself is
//! never mutated and never handed out by reference to mutable storage.

use crate::types::{Color, Point, Rotation, ShapeKind, BLOCKS_PER_PIECE};

/// Block offsets of one shape in spawn orientation
pub type ShapeOffsets = [Point; BLOCKS_PER_PIECE];

/// Immutable shape data: local block offsets, bounding box and display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    kind: ShapeKind,
    offsets: ShapeOffsets,
    width: i32,
    height: i32,
    color: Color,
}

impl PieceShape {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Fresh copy of the spawn-orientation block offsets
    pub fn points(&self) -> ShapeOffsets {
        self.offsets
    }

    /// Bounding box width in spawn orientation
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Bounding box height in spawn orientation
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Every offset lies inside `[0, width) x [0, height)`
    pub fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self
                .offsets
                .iter()
                .all(|p| (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y))
    }
}

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// Shape table, indexed in `ShapeKind::ALL` order
static SHAPES: [PieceShape; 7] = [
    PieceShape {
        kind: ShapeKind::I,
        offsets: [p(0, 0), p(1, 0), p(2, 0), p(3, 0)],
        width: 4,
        height: 1,
        color: Color::rgb(0, 240, 240),
    },
    PieceShape {
        kind: ShapeKind::J,
        offsets: [p(0, 1), p(0, 0), p(1, 0), p(2, 0)],
        width: 3,
        height: 2,
        color: Color::rgb(0, 0, 240),
    },
    PieceShape {
        kind: ShapeKind::L,
        offsets: [p(2, 1), p(0, 0), p(1, 0), p(2, 0)],
        width: 3,
        height: 2,
        color: Color::rgb(240, 160, 0),
    },
    PieceShape {
        kind: ShapeKind::O,
        offsets: [p(0, 0), p(1, 0), p(0, 1), p(1, 1)],
        width: 2,
        height: 2,
        color: Color::rgb(240, 240, 0),
    },
    PieceShape {
        kind: ShapeKind::S,
        offsets: [p(0, 0), p(1, 0), p(1, 1), p(2, 1)],
        width: 3,
        height: 2,
        color: Color::rgb(0, 240, 0),
    },
    PieceShape {
        kind: ShapeKind::T,
        offsets: [p(1, 1), p(0, 0), p(1, 0), p(2, 0)],
        width: 3,
        height: 2,
        color: Color::rgb(160, 0, 240),
    },
    PieceShape {
        kind: ShapeKind::Z,
        offsets: [p(0, 1), p(1, 1), p(1, 0), p(2, 0)],
        width: 3,
        height: 2,
        color: Color::rgb(240, 0, 0),
    },
];

/// Get the shape data for a piece kind
pub fn get_shape(kind: ShapeKind) -> &'static PieceShape {
    let index = match kind {
        ShapeKind::I => 0,
        ShapeKind::J => 1,
        ShapeKind::L => 2,
        ShapeKind::O => 3,
        ShapeKind::S => 4,
        ShapeKind::T => 5,
        ShapeKind::Z => 6,
    };
    &SHAPES[index]
}

/// Remap one spawn-orientation offset into the given rotation.
///
/// `width` is the shape's bounding-box width; rotation happens inside the
/// `width x width` square anchored at the local origin.
pub fn rotate_local(point: Point, rotation: Rotation, width: i32) -> Point {
    match rotation {
        Rotation::None => point,
        Rotation::Quarter => Point::new(point.y, width - point.x - 1),
        Rotation::Half => Point::new(width - point.x - 1, width - point.y - 1),
        Rotation::ThreeQuarter => Point::new(width - point.y - 1, point.x),
    }
}

/// Local block positions of `kind` in `rotation`. The square shape ignores rotation.
pub fn rotated_points(kind: ShapeKind, rotation: Rotation) -> ShapeOffsets {
    let shape = get_shape(kind);
    debug_assert!(shape.is_well_formed(), "malformed shape data for {:?}", kind);

    let mut points = shape.points();
    if kind.is_square() {
        return points;
    }
    for point in &mut points {
        *point = rotate_local(*point, rotation, shape.width);
    }
    points
}
