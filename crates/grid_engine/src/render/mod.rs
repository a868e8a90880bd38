//! Renderer collaborator
//!
//! The scene core only needs two things from a renderer: the grid-to-pixel
//! scale (for hit-testing) and a surface entities can draw on during the
//! draw pass. Rasterization itself is up to the implementation; the engine
//! ships [`CommandRenderer`], which records draw calls instead of
//! rasterizing them.

mod commands;
mod grid;

pub use commands::{CommandRenderer, DrawCommand};
pub use grid::GridMetrics;

use crate::entity::{Entity, Sprite};
use crate::foundation::math::{PixelRect, Point2};
use std::fmt;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Opaque color from RGB channels
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#RRGGBB`, uppercase, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Outline drawn around a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line width in pixels
    pub width: f32,
    /// Line color
    pub color: Color,
}

impl Default for Stroke {
    fn default() -> Self {
        Self { width: 2.0, color: Color::BLACK }
    }
}

/// Opaque reference to an image the renderer knows how to draw
///
/// Loading is the renderer's business; the engine only passes handles
/// around.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(String);

impl ImageHandle {
    /// Handle for the image at `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    /// Source the handle refers to
    pub fn source(&self) -> &str {
        &self.0
    }
}

/// Drawing surface and grid scale used by the scene
///
/// Primitive methods take raw canvas pixels unless their name says `grid`.
pub trait Renderer {
    /// Grid geometry in use
    fn grid(&self) -> &GridMetrics;

    /// Mutable grid geometry
    fn grid_mut(&mut self) -> &mut GridMetrics;

    /// Convert grid units to pixels
    fn scale_to_grid(&self, units: f32) -> f32 {
        self.grid().scale_to_grid(units)
    }

    /// Pixel length of one grid cell
    fn grid_pixel_length(&self) -> f32 {
        self.grid().cell_pixels()
    }

    /// Resize the canvas to fit a viewport of the given size
    fn fit_canvas(&mut self, viewport_width: u32, viewport_height: u32) {
        self.grid_mut().fit(viewport_width, viewport_height);
        let grid = self.grid();
        log::info!(
            "Canvas fitted to {}x{} viewport: cell {}px, canvas {}x{}px",
            viewport_width,
            viewport_height,
            grid.cell_pixels(),
            grid.canvas_width(),
            grid.canvas_height()
        );
    }

    /// Clear the whole canvas
    fn clear_frame(&mut self);

    /// Fill the whole canvas with a color
    fn fill(&mut self, color: Color);

    /// Fill a pixel rectangle, optionally outlined
    fn draw_rect(&mut self, rect: PixelRect, color: Color, stroke: Option<Stroke>);

    /// Fill a circle given in pixels
    fn draw_circle(&mut self, center: Point2, radius: f32, color: Color);

    /// Draw an image stretched over a pixel rectangle
    fn draw_image(&mut self, image: &ImageHandle, rect: PixelRect);

    /// Fill a rectangle given in grid units
    fn draw_grid_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, stroke: Option<Stroke>) {
        let rect = self.grid().grid_rect(x, y, width, height);
        self.draw_rect(rect, color, stroke);
    }

    /// Fill the circle inscribed in the grid square of side `size` at `(x, y)`
    fn draw_grid_circle(&mut self, x: f32, y: f32, size: f32, color: Color) {
        let radius = self.scale_to_grid(size / 2.0);
        let center = Point2::new(self.scale_to_grid(x) + radius, self.scale_to_grid(y) + radius);
        self.draw_circle(center, radius, color);
    }

    /// Stretch an image over the whole canvas
    fn draw_background_image(&mut self, image: &ImageHandle) {
        let grid = self.grid();
        let rect = PixelRect::new(0.0, 0.0, grid.canvas_width(), grid.canvas_height());
        self.draw_image(image, rect);
    }

    /// Draw a sprite's image over its grid rectangle
    fn draw_sprite(&mut self, sprite: &Sprite) {
        if let Some(image) = sprite.image() {
            let core = sprite.core();
            let rect = self.grid().grid_rect(core.x(), core.y(), core.width(), core.height());
            self.draw_image(image, rect);
        }
    }
}
