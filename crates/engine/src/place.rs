use std::fmt;

use log::trace;

use crate::core::{Board, PositionedPiece};
use crate::types::Rotation;

/// Target orientation and anchor column for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub rotation: Rotation,
    pub x: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotRunning,
    NoActive,
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotRunning => "not_running",
            PlaceError::NoActive
            | PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotRunning => "game is over",
            PlaceError::NoActive => "no active piece",
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::XOutOfBounds => "target x would place piece out of bounds",
            PlaceError::XBlocked => "could not move to target x due to collision",
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Rotate/descend plan found by simulating on piece values
struct RotationPlan {
    descents: u32,
    clockwise: bool,
    turns: u8,
}

/// Find the shortest rotation into `target`, descending a row at a time while the
/// rotation is blocked (typically by an overhang of the stack).
fn plan_rotation(board: &Board, start: PositionedPiece, target: Rotation) -> Option<RotationPlan> {
    let cur = start.rotation().quarter_turns() as i8;
    let tgt = target.quarter_turns() as i8;
    let cw = (tgt - cur).rem_euclid(4) as u8;
    let ccw = (cur - tgt).rem_euclid(4) as u8;

    let mut plans = [(true, cw), (false, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let grid = board.grid();
    let mut piece = start;
    let mut descents = 0u32;
    loop {
        for (clockwise, turns) in plans {
            let mut probe = piece;
            let mut ok = true;
            for _ in 0..turns {
                probe = if clockwise {
                    probe.rotate_cw()
                } else {
                    probe.rotate_ccw()
                };
                if !grid.fits(&probe) {
                    ok = false;
                    break;
                }
            }
            if ok {
                return Some(RotationPlan {
                    descents,
                    clockwise,
                    turns,
                });
            }
        }

        let lower = piece.down();
        if !grid.fits(&lower) {
            return None;
        }
        piece = lower;
        descents += 1;
    }
}

/// Drive the active piece to `placement` with ordinary commands, then drop it.
///
/// On error the board may already have accepted some moves; the piece is never locked
/// by a failed placement.
pub fn apply_place(board: &mut Board, placement: Placement) -> Result<(), PlaceError> {
    if board.is_game_over() {
        return Err(PlaceError::NotRunning);
    }
    let Some(active) = board.active() else {
        return Err(PlaceError::NoActive);
    };

    let plan =
        plan_rotation(board, active, placement.rotation).ok_or(PlaceError::RotationBlocked)?;
    for _ in 0..plan.descents {
        board.down();
    }
    for _ in 0..plan.turns {
        let rotated = if plan.clockwise {
            board.rotate_cw()
        } else {
            board.rotate_ccw()
        };
        if !rotated {
            return Err(PlaceError::RotationBlocked);
        }
    }

    let Some(active) = board.active() else {
        return Err(PlaceError::NoActive);
    };

    // Validate x bounds based on the rotated shape
    let local = active.local_points();
    let min_dx = local.iter().map(|p| p.x).min().unwrap_or(0);
    let max_dx = local.iter().map(|p| p.x).max().unwrap_or(0);
    if placement.x + min_dx < 0 || placement.x + max_dx >= board.width() as i32 {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = placement.x - active.anchor().x;
    for _ in 0..dx.abs() {
        let moved = if dx > 0 { board.right() } else { board.left() };
        if !moved {
            let at = board.active().map(|p| p.anchor()).unwrap_or_default();
            trace!("placement {:?} blocked at {}", placement, at);
            return Err(PlaceError::XBlocked);
        }
    }

    board.drop();
    Ok(())
}
