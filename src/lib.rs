//! Falling-block board rules (workspace facade crate).
//!
//! This package re-exports the `tetris_board::{types,core,engine}` public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use tetris_board_core as core;
pub use tetris_board_engine as engine;
pub use tetris_board_types as types;
