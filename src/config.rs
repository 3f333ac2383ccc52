use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default grid width.
pub const DEFAULT_GRID_WIDTH: u16 = 11;

/// Default grid height.
pub const DEFAULT_GRID_HEIGHT: u16 = 11;

/// Default number of segments a new snake starts with.
pub const DEFAULT_INIT_LENGTH: usize = 3;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when either dimension is zero.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
    }
}

/// Parameters for a new game. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub init_length: usize,
    pub wrap: bool,
    pub seed: Option<u64>,
}

impl GameConfig {
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(raw: &str) -> io::Result<Self> {
        serde_json::from_str(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            init_length: DEFAULT_INIT_LENGTH,
            wrap: false,
            seed: None,
        }
    }
}

/// Loads a game configuration from a JSON file.
///
/// Returns `Err` when the file cannot be read or does not parse.
pub fn load_config(path: &Path) -> io::Result<GameConfig> {
    let raw = fs::read_to_string(path)?;
    GameConfig::from_json_str(&raw)
}
