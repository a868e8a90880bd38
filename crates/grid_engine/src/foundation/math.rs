//! Math utilities and types
//!
//! Provides the 2D math types used by entities, the renderer and hit-testing.

pub use nalgebra::Vector2;

/// 2D vector type (grid units for entity position and size)
pub type Vec2 = Vector2<f32>;

/// 2D point type in raw canvas pixels
pub type Point2 = nalgebra::Point2<f32>;

/// Integer grid cell coordinate delivered to click handlers
pub type GridPoint = nalgebra::Point2<i32>;

/// Check whether `a` lies within `[min, max]`, both bounds inclusive.
pub fn is_in_range(a: f32, min: f32, max: f32) -> bool {
    a >= min && a <= max
}

/// Axis-aligned rectangle in raw canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl PixelRect {
    /// Create a rectangle from its top-left corner and extent
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (`x + width`)
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive containment on both axes: points on any edge are inside.
    pub fn contains(&self, point: Point2) -> bool {
        is_in_range(point.x, self.x, self.max_x()) && is_in_range(point.y, self.y, self.max_y())
    }
}

/// Convert a raw pixel point to the grid cell containing it.
///
/// Each component is divided by the pixel length of one cell and floored.
#[allow(clippy::cast_possible_truncation)]
pub fn pixel_to_grid(point: Point2, cell_pixels: f32) -> GridPoint {
    GridPoint::new(
        (point.x / cell_pixels).floor() as i32,
        (point.y / cell_pixels).floor() as i32,
    )
}
