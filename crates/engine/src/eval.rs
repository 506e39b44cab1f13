//! Landing enumeration and a simple stack heuristic for autoplay.
//!
//! Candidates come from dropping each rotation straight down from the top edge in every
//! column; `apply_place` still has to reach them through real commands, so a candidate
//! hidden behind a taller column fails with `XBlocked` rather than being placed.

use crate::core::{Board, Grid, PositionedPiece};
use crate::place::Placement;
use crate::types::{Point, Rotation};

/// Stack shape after a hypothetical lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridFeatures {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub lines: u32,
}

impl GridFeatures {
    pub fn measure(grid: &Grid, lines: u32) -> Self {
        let heights: Vec<usize> = (0..grid.width()).map(|x| grid.column_height(x)).collect();

        let holes = heights
            .iter()
            .enumerate()
            .map(|(x, &h)| {
                (0..h)
                    .filter(|&y| grid.get(x as i32, y as i32) == Some(None))
                    .count()
            })
            .sum::<usize>();

        let bumpiness = heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum::<usize>();

        Self {
            aggregate_height: heights.iter().sum::<usize>() as u32,
            holes: holes as u32,
            bumpiness: bumpiness as u32,
            lines,
        }
    }

    /// Higher is better
    pub fn score(&self) -> f64 {
        -0.51 * self.aggregate_height as f64 + 0.76 * self.lines as f64
            - 0.36 * self.holes as f64
            - 0.18 * self.bumpiness as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub placement: Placement,
    /// Resting position
    pub piece: PositionedPiece,
    pub features: GridFeatures,
}

/// Every distinct landing of the active piece reachable by a straight drop from the top
pub fn landing_placements(board: &Board) -> Vec<Landing> {
    let Some(active) = board.active().filter(|_| board.is_running()) else {
        return Vec::new();
    };

    let grid = board.grid();
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut seen: Vec<[Point; 4]> = Vec::new();
    let mut landings = Vec::new();

    for rotation in Rotation::ALL {
        let oriented = PositionedPiece::with_rotation(active.kind(), Point::new(0, 0), rotation);
        let local = oriented.local_points();
        let min_x = local.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = local.iter().map(|p| p.x).max().unwrap_or(0);
        let max_y = local.iter().map(|p| p.y).max().unwrap_or(0);

        for x in -min_x..width - max_x {
            let mut piece = oriented.translate(x, height - 1 - max_y);
            if !grid.fits(&piece) {
                continue;
            }
            while grid.fits(&piece.down()) {
                piece = piece.down();
            }

            let mut cells = piece.board_points();
            cells.sort_by_key(|p| (p.x, p.y));
            if seen.contains(&cells) {
                continue;
            }
            seen.push(cells);

            let mut after = grid.clone();
            after.lock(&piece);
            let lines = after.clear_full_rows();
            landings.push(Landing {
                placement: Placement { rotation, x },
                piece,
                features: GridFeatures::measure(&after, lines),
            });
        }
    }

    landings
}

/// Highest scoring landing, if the game is running
pub fn best_placement(board: &Board) -> Option<Placement> {
    landing_placements(board)
        .into_iter()
        .max_by(|a, b| a.features.score().total_cmp(&b.features.score()))
        .map(|landing| landing.placement)
}
