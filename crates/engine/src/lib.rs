//! Placement helpers for automated drivers.
//!
//! Optional tooling on top of `tetris-board-core`: nothing in the core crate depends on it.
//! Everything here talks to the board through its public command surface; the engine
//! itself stays the single authority on what is legal.

pub mod eval;
pub mod place;

pub use tetris_board_core as core;
pub use tetris_board_types as types;

pub use eval::{best_placement, landing_placements, GridFeatures, Landing};
pub use place::{apply_place, PlaceError, Placement};
