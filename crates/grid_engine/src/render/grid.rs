//! Grid-to-pixel geometry of the canvas

use crate::config::{GridSettings, SceneConfig};
use crate::foundation::math::PixelRect;

/// Pixel size of the grid and of the canvas built on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    settings: GridSettings,
    canvas_fraction: f32,
    cell_pixels: f32,
}

impl GridMetrics {
    /// Metrics for `settings` with a fixed starting cell size
    pub fn new(settings: GridSettings, canvas_fraction: f32, cell_pixels: f32) -> Self {
        Self { settings, canvas_fraction, cell_pixels }
    }

    /// Metrics described by a scene config (before any viewport fit)
    #[allow(clippy::cast_precision_loss)]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.grid, config.canvas_fraction, config.initial_cell_pixels as f32)
    }

    /// Grid resolution
    pub fn settings(&self) -> GridSettings {
        self.settings
    }

    /// Pixel length of one cell
    pub fn cell_pixels(&self) -> f32 {
        self.cell_pixels
    }

    /// Convert grid units to pixels
    pub fn scale_to_grid(&self, units: f32) -> f32 {
        units * self.cell_pixels
    }

    /// Canvas width in pixels
    #[allow(clippy::cast_precision_loss)]
    pub fn canvas_width(&self) -> f32 {
        self.scale_to_grid(self.settings.columns() as f32)
    }

    /// Canvas height in pixels
    #[allow(clippy::cast_precision_loss)]
    pub fn canvas_height(&self) -> f32 {
        self.scale_to_grid(self.settings.rows() as f32)
    }

    /// Rectangle in pixels for a rectangle in grid units
    pub fn grid_rect(&self, x: f32, y: f32, width: f32, height: f32) -> PixelRect {
        PixelRect::new(
            self.scale_to_grid(x),
            self.scale_to_grid(y),
            self.scale_to_grid(width),
            self.scale_to_grid(height),
        )
    }

    /// Pick the largest whole-pixel cell size that fits the grid into the
    /// allowed fraction of the viewport.
    ///
    /// A viewport too small for one pixel per cell yields a zero cell size.
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(&mut self, viewport_width: u32, viewport_height: u32) {
        let width = viewport_width as f32 * self.canvas_fraction / self.settings.columns() as f32;
        let height = viewport_height as f32 * self.canvas_fraction / self.settings.rows() as f32;
        self.cell_pixels = width.min(height).floor();
    }
}
