//! Board module - the rule engine
//!
//! Owns the grid, the active and queued pieces and the game-over flag, and turns
//! driver commands into state changes plus notifications. Every command computes a
//! candidate piece with a pure transform, tests it against the grid, and commits it
//! only if it fits; nothing is ever corrected after the fact.

use log::{debug, info, trace};

use crate::config::BoardConfig;
use crate::event::{BoardEvent, BoardObserver, SubscriptionId, Subscribers};
use crate::grid::Grid;
use crate::piece::PositionedPiece;
use crate::pieces::get_shape;
use crate::rng::PieceProvider;
use crate::snapshot::{ActiveSnapshot, BoardSnapshot, SnapshotError};
use crate::types::{Cell, Command, Point, ShapeKind};

pub struct Board {
    grid: Grid,
    active: Option<PositionedPiece>,
    next: Option<ShapeKind>,
    game_over: bool,
    provider: Box<dyn PieceProvider>,
    subscribers: Subscribers,
}

impl Board {
    /// Create an idle board. No piece exists until `clear` (or `Command::Start`).
    ///
    /// # Panics
    ///
    /// Panics if the configured dimensions are zero or too large; use
    /// [`BoardConfig::validated`] first when they come from user input.
    pub fn new(config: BoardConfig, provider: impl PieceProvider + 'static) -> Self {
        Self {
            grid: Grid::new(config.width, config.height),
            active: None,
            next: None,
            game_over: false,
            provider: Box::new(provider),
            subscribers: Subscribers::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Locked cell at (x, y); None when out of bounds
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.get(x, y)
    }

    pub fn active(&self) -> Option<PositionedPiece> {
        self.active
    }

    pub fn next_piece(&self) -> Option<ShapeKind> {
        self.next
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// A game is in progress and accepts moves
    pub fn is_running(&self) -> bool {
        !self.game_over && self.active.is_some()
    }

    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) -> SubscriptionId {
        self.subscribers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Reset to an empty grid and spawn the first piece
    pub fn clear(&mut self) {
        self.grid.clear();
        self.game_over = false;
        self.active = None;
        self.next = Some(self.provider.next_shape());
        info!("new game on {}x{} board", self.width(), self.height());

        self.emit(BoardEvent::GameOver(false));
        self.spawn_next();
        if self.game_over {
            // Observers still need the emptied grid when the first spawn fails
            self.emit_board_changed();
        }
    }

    pub fn left(&mut self) -> bool {
        self.try_transform(PositionedPiece::left)
    }

    pub fn right(&mut self) -> bool {
        self.try_transform(PositionedPiece::right)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_transform(PositionedPiece::rotate_cw)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_transform(PositionedPiece::rotate_ccw)
    }

    /// Move down one row, or lock the piece if it has landed.
    /// Returns false only when no game is running.
    pub fn down(&mut self) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let candidate = active.down();
        if self.grid.fits(&candidate) {
            self.active = Some(candidate);
            self.emit_board_changed();
        } else {
            self.lock_active();
        }
        true
    }

    /// Gravity tick from the host's timer
    pub fn step(&mut self) -> bool {
        self.down()
    }

    /// Descend until blocked, then lock
    pub fn drop(&mut self) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        self.active = Some(self.landing_of(active));
        self.lock_active();
        true
    }

    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => {
                self.clear();
                true
            }
            Command::Left => self.left(),
            Command::Right => self.right(),
            Command::Down => self.down(),
            Command::Drop => self.drop(),
            Command::RotateCw => self.rotate_cw(),
            Command::RotateCcw => self.rotate_ccw(),
            Command::Step => self.step(),
        }
    }

    /// Where the active piece would come to rest on `drop`
    pub fn ghost(&self) -> Option<PositionedPiece> {
        self.playable_piece().map(|piece| self.landing_of(piece))
    }

    /// Check if the active piece can move in the given direction
    pub fn can_move(&self, dx: i32, dy: i32) -> bool {
        self.playable_piece()
            .is_some_and(|piece| self.grid.fits(&piece.translate(dx, dy)))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self.grid.cells().to_vec(),
            active: self.active.map(ActiveSnapshot::from),
            next: self.next,
            game_over: self.game_over,
        }
    }

    /// Replace grid and piece state with a previously taken snapshot.
    ///
    /// The board keeps its piece provider and subscribers. Observers receive the
    /// restored state as if it had just been reached; `GameOver` is only emitted when the
    /// flag changes, so a restore is never mistaken for a new game.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) -> Result<(), SnapshotError> {
        let expected = (self.grid.width(), self.grid.height());
        let found = (snapshot.width, snapshot.height);
        if expected != found {
            return Err(SnapshotError::DimensionMismatch { expected, found });
        }

        let grid = Grid::from_cells(snapshot.width, snapshot.height, snapshot.cells.clone())
            .ok_or(SnapshotError::CellCount {
                expected: snapshot.width * snapshot.height,
                found: snapshot.cells.len(),
            })?;
        if let Some(y) = (0..grid.height()).find(|&y| grid.is_row_full(y)) {
            return Err(SnapshotError::CompleteRow(y));
        }

        let active = snapshot.active.map(ActiveSnapshot::to_piece);
        if let Some(piece) = active {
            if snapshot.game_over {
                return Err(SnapshotError::ActiveAfterGameOver);
            }
            if !grid.fits(&piece) {
                return Err(SnapshotError::ActiveCollides);
            }
        }

        let was_over = self.game_over;
        self.grid = grid;
        self.active = active;
        self.next = snapshot.next;
        self.game_over = snapshot.game_over;
        debug!(
            "restored {}x{} board with {} filled cells",
            snapshot.width,
            snapshot.height,
            self.grid.filled_count()
        );

        if self.game_over != was_over {
            self.emit(BoardEvent::GameOver(self.game_over));
        }
        if let Some(next) = self.next {
            self.emit(BoardEvent::NextPieceChanged(next));
        }
        self.emit_board_changed();
        Ok(())
    }

    /// Active piece, unless the game has ended
    fn playable_piece(&self) -> Option<PositionedPiece> {
        if self.game_over {
            return None;
        }
        self.active
    }

    fn try_transform(&mut self, transform: impl Fn(&PositionedPiece) -> PositionedPiece) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let candidate = transform(&active);
        if !self.grid.fits(&candidate) {
            trace!(
                "rejected {:?} to {} rotation {:?}",
                candidate.kind(),
                candidate.anchor(),
                candidate.rotation()
            );
            return false;
        }

        self.active = Some(candidate);
        self.emit_board_changed();
        true
    }

    /// Lowest position reachable by moving straight down. At most `height` iterations.
    fn landing_of(&self, mut piece: PositionedPiece) -> PositionedPiece {
        loop {
            let candidate = piece.down();
            if !self.grid.fits(&candidate) {
                return piece;
            }
            piece = candidate;
        }
    }

    /// Commit the active piece, clear rows, and spawn the queued piece
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let locked = self.grid.lock(&piece);
        debug_assert!(locked, "active piece must always fit the grid");

        let lines = self.grid.clear_full_rows();
        debug!(
            "locked {:?} at {} rotation {:?}, {} line(s) completed",
            piece.kind(),
            piece.anchor(),
            piece.rotation(),
            lines
        );

        self.emit(BoardEvent::LinesCompleted(lines));
        self.spawn_next();
    }

    /// Promote the queued piece, queue another, and place the new active piece
    fn spawn_next(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.provider.next_shape(),
        };
        let queued = self.provider.next_shape();
        self.next = Some(queued);
        self.emit(BoardEvent::NextPieceChanged(queued));

        let piece = self.spawn_piece(kind);
        if self.grid.fits(&piece) {
            debug!("spawned {:?} at {}, next {:?}", kind, piece.anchor(), queued);
            self.active = Some(piece);
            self.emit_board_changed();
        } else {
            info!(
                "game over: {:?} cannot spawn at {} ({} filled cells)",
                kind,
                piece.anchor(),
                self.grid.filled_count()
            );
            self.game_over = true;
            self.active = None;
            self.emit(BoardEvent::GameOver(true));
        }
    }

    /// Spawn placement: centered horizontally, with the whole `width x width` rotation
    /// square inside the grid so the new piece can turn immediately
    fn spawn_piece(&self, kind: ShapeKind) -> PositionedPiece {
        let shape = get_shape(kind);
        let width = self.grid.width() as i32;
        let height = self.grid.height() as i32;
        let x = ((width - shape.width()) / 2).max(0);
        let y = (height - shape.width()).max(0);
        PositionedPiece::new(kind, Point::new(x, y))
    }

    fn emit(&mut self, event: BoardEvent) {
        self.subscribers.emit(&event);
    }

    fn emit_board_changed(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.emit(BoardEvent::BoardChanged(snapshot));
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("grid", &self.grid)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("game_over", &self.game_over)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
