use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::PositionedPiece;
use crate::types::{Cell, Point, Rotation, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl ActiveSnapshot {
    pub fn to_piece(self) -> PositionedPiece {
        PositionedPiece::with_rotation(self.kind, Point::new(self.x, self.y), self.rotation)
    }
}

impl From<PositionedPiece> for ActiveSnapshot {
    fn from(value: PositionedPiece) -> Self {
        let anchor = value.anchor();
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            x: anchor.x,
            y: anchor.y,
        }
    }
}

/// Everything an observer needs to draw the board. Independent of the engine once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, bottom row first
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<ShapeKind>,
    pub game_over: bool,
}

impl BoardSnapshot {
    /// Locked cell at (x, y); None when out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Board points of the active piece, if any
    pub fn active_points(&self) -> Option<[Point; 4]> {
        self.active.map(|a| a.to_piece().board_points())
    }
}

impl fmt::Display for BoardSnapshot {
    /// Top row first; locked blocks as shape letters, the active piece as `@`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.active_points();
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let here = Point::new(x as i32, y as i32);
                let ch = if active.is_some_and(|pts| pts.contains(&here)) {
                    '@'
                } else {
                    match self.cell(x, y).flatten() {
                        Some(kind) => kind.as_char(),
                        None => '.',
                    }
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Why a snapshot could not be restored onto a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    CellCount {
        expected: usize,
        found: usize,
    },
    CompleteRow(usize),
    ActiveCollides,
    ActiveAfterGameOver,
}

impl SnapshotError {
    pub fn code(self) -> &'static str {
        match self {
            SnapshotError::DimensionMismatch { .. } | SnapshotError::CellCount { .. } => {
                "invalid_dimensions"
            }
            SnapshotError::CompleteRow(_) => "complete_row",
            SnapshotError::ActiveCollides | SnapshotError::ActiveAfterGameOver => "invalid_active",
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::DimensionMismatch { expected, found } => write!(
                f,
                "snapshot is {}x{}, board is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            SnapshotError::CellCount { expected, found } => {
                write!(f, "snapshot has {} cells, expected {}", found, expected)
            }
            SnapshotError::CompleteRow(y) => write!(f, "row {} is complete", y),
            SnapshotError::ActiveCollides => {
                f.write_str("active piece overlaps the stack or leaves the grid")
            }
            SnapshotError::ActiveAfterGameOver => {
                f.write_str("a finished game cannot have an active piece")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
