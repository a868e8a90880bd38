//! Scene construction settings

use super::{Config, ConfigError};
use crate::scene::SceneError;
use serde::{Deserialize, Serialize};

/// Grid resolution of the canvas: how many cells across and down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    columns: u32,
    rows: u32,
}

impl GridSettings {
    /// Create grid settings; both dimensions must be positive
    pub fn new(columns: u32, rows: u32) -> Result<Self, SceneError> {
        if columns == 0 || rows == 0 {
            return Err(SceneError::InvalidArgument(format!(
                "grid dimensions must be positive, got {columns}x{rows}"
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Number of columns
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows
    pub fn rows(&self) -> u32 {
        self.rows
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self { columns: 16, rows: 16 }
    }
}

/// Everything a scene needs at construction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fraction of the viewport the canvas may occupy, in `(0, 1]`
    pub canvas_fraction: f32,

    /// Cell size in pixels until the canvas is first fitted to a viewport
    pub initial_cell_pixels: u32,

    /// Viewport to fit the canvas to right after construction
    pub viewport: Option<(u32, u32)>,

    /// Grid resolution
    pub grid: GridSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_fraction: 1.0,
            initial_cell_pixels: 32,
            viewport: None,
            grid: GridSettings::default(),
        }
    }
}

impl Config for SceneConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid.columns, self.grid.rows
            )));
        }
        if !(self.canvas_fraction > 0.0 && self.canvas_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas_fraction must be in (0, 1], got {}",
                self.canvas_fraction
            )));
        }
        if self.initial_cell_pixels == 0 {
            return Err(ConfigError::Invalid("initial_cell_pixels must be positive".to_string()));
        }
        Ok(())
    }
}
