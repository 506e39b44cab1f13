//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used by the rule engine and by
//! anything observing it. All types are plain `Copy` data with no behavior beyond
//! their own arithmetic, so they can be handed to observers freely: a caller can
//! never reach back into engine state through them.
//!
//! # Coordinates
//!
//! The grid uses a y-up coordinate system:
//!
//! - **x**: columns, `0` is the leftmost column
//! - **y**: rows, `0` is the bottom row; "down" decreases y
//!
//! # Default Dimensions
//!
//! | Constant | Value |
//! |----------|-------|
//! | `DEFAULT_BOARD_WIDTH` | 10 |
//! | `DEFAULT_BOARD_HEIGHT` | 20 |
//!
//! # Step Cadence
//!
//! The engine has no clock. Hosts that want the classic speed-up derive a step
//! interval from the level (see `tetris_board_core::progress`):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 850ms |
//! | 2 | 700ms |
//! | ... | -150ms per level |
//! | 7+ | 50ms floor |
//!
//! # Examples
//!
//! ```
//! use tetris_board_types::{Command, Point, Rotation, ShapeKind};
//!
//! let p = Point::new(3, 4).translate(-1, 0);
//! assert_eq!(p, Point::new(2, 4));
//!
//! assert_eq!(Rotation::None.clockwise(), Rotation::Quarter);
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Command::from_str("rotateCw"), Some(Command::RotateCw));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Largest accepted board dimension (either axis)
pub const MAX_DIMENSION: usize = i16::MAX as usize;

/// Every piece is made of exactly four blocks
pub const BLOCKS_PER_PIECE: usize = 4;

/// Completed lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 5;

/// Suggested step interval at level 0
pub const BASE_STEP_MS: u32 = 1000;

/// Step interval reduction per level
pub const STEP_DECREMENT_MS: u32 = 150;

/// Fastest suggested step interval
pub const MIN_STEP_MS: u32 = 50;

/// Immutable 2D integer coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// New point shifted by (dx, dy)
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// New point shifted by another point's coordinates
    pub const fn offset(self, by: Point) -> Self {
        self.translate(by.x, by.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of a piece, measured clockwise from its spawn orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Quarter,
        Rotation::Half,
        Rotation::ThreeQuarter,
    ];

    /// Advance 90° clockwise (wraps)
    pub fn clockwise(self) -> Self {
        match self {
            Rotation::None => Rotation::Quarter,
            Rotation::Quarter => Rotation::Half,
            Rotation::Half => Rotation::ThreeQuarter,
            Rotation::ThreeQuarter => Rotation::None,
        }
    }

    /// Retreat 90° counter-clockwise (wraps)
    pub fn counter_clockwise(self) -> Self {
        match self {
            Rotation::None => Rotation::ThreeQuarter,
            Rotation::ThreeQuarter => Rotation::Half,
            Rotation::Half => Rotation::Quarter,
            Rotation::Quarter => Rotation::None,
        }
    }

    /// Number of clockwise quarter turns from spawn (0..=3)
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 1,
            Rotation::Half => 2,
            Rotation::ThreeQuarter => 3,
        }
    }

    /// True when the footprint is transposed (90° or 270°)
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Quarter | Rotation::ThreeQuarter)
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "0" => Some(Rotation::None),
            "quarter" | "90" => Some(Rotation::Quarter),
            "half" | "180" => Some(Rotation::Half),
            "three_quarter" | "threequarter" | "270" => Some(Rotation::ThreeQuarter),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::None => "none",
            Rotation::Quarter => "quarter",
            Rotation::Half => "half",
            Rotation::ThreeQuarter => "three_quarter",
        }
    }
}

/// The seven four-block piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// The square piece never changes its cells when rotated
    pub fn is_square(self) -> bool {
        self == ShapeKind::O
    }

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, as drawn in text dumps
    pub fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
            ShapeKind::O => 'O',
            ShapeKind::S => 'S',
            ShapeKind::T => 'T',
            ShapeKind::Z => 'Z',
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
        }
    }
}

/// Display color of a shape. Opaque to the engine; passed through for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Cell on the grid (None = empty, Some = block of a locked piece of that kind)
pub type Cell = Option<ShapeKind>;

/// Discrete commands a driver can send to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Clear the grid and spawn the first piece (also "new game")
    Start,
    Left,
    Right,
    Down,
    Drop,
    RotateCw,
    RotateCcw,
    /// Gravity tick; same effect as `Down`, sent by the host's timer
    Step,
}

impl Command {
    /// Parse command from string (for scripted drivers)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" | "clear" | "newgame" => Some(Command::Start),
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "down" => Some(Command::Down),
            "drop" => Some(Command::Drop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "step" => Some(Command::Step),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Left => "left",
            Command::Right => "right",
            Command::Down => "down",
            Command::Drop => "drop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Step => "step",
        }
    }
}
