//! Positioned piece - a shape placed on the board at an anchor and rotation
//!
//! `PositionedPiece` is a `Copy` value. Every transform returns a new piece and leaves
//! the receiver untouched, which is what lets the board compute a candidate move,
//! test it, and only then commit it.

use std::fmt;

use crate::pieces::{get_shape, rotated_points, PieceShape, ShapeOffsets};
use crate::types::{Point, Rotation, ShapeKind, BLOCKS_PER_PIECE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionedPiece {
    kind: ShapeKind,
    anchor: Point,
    rotation: Rotation,
}

impl PositionedPiece {
    /// Piece in spawn orientation at `anchor`
    pub fn new(kind: ShapeKind, anchor: Point) -> Self {
        Self::with_rotation(kind, anchor, Rotation::None)
    }

    pub fn with_rotation(kind: ShapeKind, anchor: Point, rotation: Rotation) -> Self {
        Self {
            kind,
            anchor,
            rotation,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn shape(&self) -> &'static PieceShape {
        get_shape(self.kind)
    }

    pub fn rotate_cw(&self) -> Self {
        Self {
            rotation: self.rotation.clockwise(),
            ..*self
        }
    }

    pub fn rotate_ccw(&self) -> Self {
        Self {
            rotation: self.rotation.counter_clockwise(),
            ..*self
        }
    }

    pub fn left(&self) -> Self {
        self.translate(-1, 0)
    }

    pub fn right(&self) -> Self {
        self.translate(1, 0)
    }

    /// One row down (y decreases)
    pub fn down(&self) -> Self {
        self.translate(0, -1)
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            anchor: self.anchor.translate(dx, dy),
            ..*self
        }
    }

    /// Block positions in the piece's own rotated frame
    pub fn local_points(&self) -> ShapeOffsets {
        rotated_points(self.kind, self.rotation)
    }

    /// Block positions in absolute grid coordinates
    pub fn board_points(&self) -> ShapeOffsets {
        let mut points = self.local_points();
        for point in &mut points {
            *point = point.offset(self.anchor);
        }
        points
    }

    /// Bounding box width after accounting for 90°/270° transposition
    pub fn width(&self) -> i32 {
        let shape = self.shape();
        if self.rotation.is_transposed() {
            shape.height()
        } else {
            shape.width()
        }
    }

    /// Bounding box height after accounting for 90°/270° transposition
    pub fn height(&self) -> i32 {
        let shape = self.shape();
        if self.rotation.is_transposed() {
            shape.width()
        } else {
            shape.height()
        }
    }
}

impl fmt::Display for PositionedPiece {
    /// Anchor on the first line, then the rotated frame drawn top row first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.anchor)?;
        let frame = BLOCKS_PER_PIECE as i32;
        let points = self.local_points();
        for y in (0..frame).rev() {
            for x in 0..frame {
                let filled = points.contains(&Point::new(x, y));
                f.write_str(if filled { "[ ]" } else { "   " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
