//! Progress module - line and level bookkeeping driven purely by board events
//!
//! The tracker is an ordinary observer: it never touches the board. Hosts read
//! `step_interval_ms` to decide how often to send `step`.

use log::info;

use crate::event::{BoardEvent, BoardObserver};
use crate::types::{BASE_STEP_MS, LINES_PER_LEVEL, MIN_STEP_MS, STEP_DECREMENT_MS};

/// Suggested step interval for a level
pub fn step_interval_ms(level: u32) -> u32 {
    BASE_STEP_MS
        .saturating_sub(level.saturating_mul(STEP_DECREMENT_MS))
        .max(MIN_STEP_MS)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    lines: u32,
    level: u32,
    pieces_locked: u32,
    game_over: bool,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Locks observed, counted from `LinesCompleted` (emitted once per lock)
    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn step_interval_ms(&self) -> u32 {
        step_interval_ms(self.level)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl BoardObserver for ProgressTracker {
    fn on_event(&mut self, event: &BoardEvent) {
        match *event {
            BoardEvent::LinesCompleted(count) => {
                self.pieces_locked += 1;
                self.lines += count;
                let level = self.lines / LINES_PER_LEVEL;
                if level > self.level {
                    info!(
                        "level {} reached after {} lines, step interval {}ms",
                        level,
                        self.lines,
                        step_interval_ms(level)
                    );
                }
                self.level = level;
            }
            BoardEvent::GameOver(true) => self.game_over = true,
            BoardEvent::GameOver(false) => self.reset(),
            BoardEvent::BoardChanged(_) | BoardEvent::NextPieceChanged(_) => {}
        }
    }
}
