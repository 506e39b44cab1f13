//! Grid module - cell storage for locked blocks
//!
//! The grid is `width x height` cells, each empty or holding the kind of the piece whose
//! block was locked there. Uses a flat row-major vector sized once at construction.
//! Coordinates: (x, y) where x grows to the right and y grows upward; row 0 is the floor.

use crate::piece::PositionedPiece;
use crate::types::{Cell, Point, MAX_DIMENSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x), bottom row first
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or larger than `MAX_DIMENSION`.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {}x{}",
            width,
            height
        );
        assert!(
            width <= MAX_DIMENSION && height <= MAX_DIMENSION,
            "grid dimensions must not exceed {}, got {}x{}",
            MAX_DIMENSION,
            width,
            height
        );
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Get cell at position (x, y).
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y).
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_vacant(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Every block of `piece` is inside the grid on an empty cell
    pub fn fits(&self, piece: &PositionedPiece) -> bool {
        piece
            .board_points()
            .iter()
            .all(|p: &Point| self.is_vacant(p.x, p.y))
    }

    /// Write the blocks of `piece` into the grid.
    /// Returns false (and writes nothing) if the piece does not fit
    pub fn lock(&mut self, piece: &PositionedPiece) -> bool {
        if !self.fits(piece) {
            return false;
        }
        let kind = piece.kind();
        for p in piece.board_points() {
            self.set(p.x, p.y, Some(kind));
        }
        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|cells| cells.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Rows from the floor up
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Remove every full row and compact the rest downward, refilling the top with
    /// empty rows. Returns the number of rows removed.
    ///
    /// Two-pointer pass with no allocation: incomplete rows keep their relative order.
    pub fn clear_full_rows(&mut self) -> u32 {
        let width = self.width;
        let mut write_y = 0usize;
        let mut cleared = 0u32;

        // Scan from bottom to top
        for read_y in 0..self.height {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
            write_y += 1;
        }

        // Clear the remaining rows at the top
        for cell in &mut self.cells[write_y * width..] {
            *cell = None;
        }

        cleared
    }

    /// Height of the stack in column `x` (index of the highest filled cell + 1, 0 if empty)
    pub fn column_height(&self, x: usize) -> usize {
        if x >= self.width {
            return 0;
        }
        (0..self.height)
            .rev()
            .find(|&y| self.cells[y * self.width + x].is_some())
            .map_or(0, |y| y + 1)
    }

    /// Get a reference to the internal cells (bottom row first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build from flat cells (bottom row first). Returns None on a size mismatch
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Option<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return None;
        }
        if cells.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }
}
