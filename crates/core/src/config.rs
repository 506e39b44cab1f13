//! Board configuration

use std::fmt;

use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_DIMENSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl BoardConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check the dimensions before handing them to `Board::new`, which panics on bad input
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroWidth,
    ZeroHeight,
    TooLarge { width: usize, height: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroWidth => f.write_str("board width must be at least 1"),
            ConfigError::ZeroHeight => f.write_str("board height must be at least 1"),
            ConfigError::TooLarge { width, height } => write!(
                f,
                "board {}x{} exceeds the maximum dimension {}",
                width, height, MAX_DIMENSION
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
