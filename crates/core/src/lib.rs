//! Core game logic module - pure, deterministic, and testable
//!
//! This crate is the rule engine of the falling-block game: it owns the grid, the
//! active and queued pieces, and every movement, rotation, collision, locking,
//! line-clearing and game-over rule. It has **no dependencies** on rendering, input
//! devices, clocks or audio:
//!
//! - **Command-driven**: every public operation completes (including notifications)
//!   before it returns; there is no background work
//! - **Clockless**: gravity is just `step`, invoked by the host at whatever cadence it likes
//! - **Deterministic**: piece selection is an injected [`PieceProvider`]
//! - **Observable**: state changes are pushed to subscribed [`BoardObserver`]s as
//!   [`BoardEvent`]s
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shape definitions and rotation geometry
//! - [`piece`]: `PositionedPiece`, an immutable shape + anchor + rotation
//! - [`grid`]: cell storage, collision test, row compaction
//! - [`board`]: the engine (commands, locking, spawning, game over)
//! - [`event`]: notifications and the per-board subscription list
//! - [`snapshot`]: serializable board state carried by `BoardChanged`
//! - [`rng`]: piece providers (7-bag, uniform, fixed sequence)
//! - [`progress`]: line/level tracking observer
//! - [`config`]: board dimensions
//!
//! # Game Rules
//!
//! - Illegal moves are silently rejected; they are not errors
//! - A piece that cannot move down locks; complete rows are removed together
//! - New pieces spawn centered at the top with room to rotate; a spawn that collides ends
//!   the game
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use tetris_board_core::{Board, BoardConfig, FixedSequence, ProgressTracker};
//! use tetris_board_types::{Command, ShapeKind};
//!
//! let mut board = Board::new(BoardConfig::default(), FixedSequence::repeat(ShapeKind::O));
//! let progress = Rc::new(RefCell::new(ProgressTracker::new()));
//! board.subscribe(Box::new(progress.clone()));
//!
//! board.apply(Command::Start);
//! board.apply(Command::Left);
//! board.apply(Command::Drop);
//!
//! assert_eq!(board.grid().filled_count(), 4);
//! assert_eq!(progress.borrow().pieces_locked(), 1);
//! assert!(board.is_running());
//! ```

pub mod board;
pub mod config;
pub mod event;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod progress;
pub mod rng;
pub mod snapshot;

pub use tetris_board_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{BoardConfig, ConfigError};
pub use event::{BoardEvent, BoardObserver, EventLog, SubscriptionId, Subscribers};
pub use grid::Grid;
pub use piece::PositionedPiece;
pub use pieces::{get_shape, rotate_local, PieceShape};
pub use progress::{step_interval_ms, ProgressTracker};
pub use rng::{FixedSequence, PieceProvider, SevenBag, SimpleRng, UniformRandom};
pub use snapshot::{ActiveSnapshot, BoardSnapshot, SnapshotError};
