//! Recording renderer

use super::{Color, GridMetrics, ImageHandle, Renderer, Stroke};
use crate::foundation::math::{PixelRect, Point2};

/// A draw call captured by [`CommandRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Canvas cleared
    Clear,
    /// Canvas filled with a color
    Fill(Color),
    /// Rectangle filled
    Rect {
        /// Pixel rectangle
        rect: PixelRect,
        /// Fill color
        color: Color,
        /// Optional outline
        stroke: Option<Stroke>,
    },
    /// Circle filled
    Circle {
        /// Center in pixels
        center: Point2,
        /// Radius in pixels
        radius: f32,
        /// Fill color
        color: Color,
    },
    /// Image stretched over a rectangle
    Image {
        /// Image drawn
        image: ImageHandle,
        /// Pixel rectangle
        rect: PixelRect,
    },
}

/// Renderer that records draw calls in order instead of rasterizing them
///
/// Used by headless runs and tests; a platform backend can also replay the
/// recorded list onto a real surface once per frame.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    grid: GridMetrics,
    commands: Vec<DrawCommand>,
}

impl CommandRenderer {
    /// Create an empty recorder using the given grid geometry
    pub fn new(grid: GridMetrics) -> Self {
        Self { grid, commands: Vec::new() }
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand over the recorded commands and start a fresh list
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for CommandRenderer {
    fn grid(&self) -> &GridMetrics {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut GridMetrics {
        &mut self.grid
    }

    fn clear_frame(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn draw_rect(&mut self, rect: PixelRect, color: Color, stroke: Option<Stroke>) {
        self.commands.push(DrawCommand::Rect { rect, color, stroke });
    }

    fn draw_circle(&mut self, center: Point2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn draw_image(&mut self, image: &ImageHandle, rect: PixelRect) {
        self.commands.push(DrawCommand::Image { image: image.clone(), rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridSettings;
    use crate::entity::Sprite;

    fn renderer() -> CommandRenderer {
        CommandRenderer::new(GridMetrics::new(GridSettings::new(4, 4).unwrap(), 1.0, 32.0))
    }

    #[test]
    fn test_grid_primitives_are_scaled() {
        let mut renderer = renderer();
        renderer.draw_grid_rect(1.0, 1.0, 2.0, 1.0, Color::WHITE, None);
        renderer.draw_grid_circle(0.0, 0.0, 1.0, Color::BLACK);

        assert_eq!(
            renderer.commands(),
            &[
                DrawCommand::Rect { rect: PixelRect::new(32.0, 32.0, 64.0, 32.0), color: Color::WHITE, stroke: None },
                DrawCommand::Circle { center: Point2::new(16.0, 16.0), radius: 16.0, color: Color::BLACK },
            ]
        );
    }

    #[test]
    fn test_background_covers_canvas() {
        let mut renderer = renderer();
        let image = ImageHandle::new("sky.png");
        renderer.draw_background_image(&image);

        assert_eq!(
            renderer.take_commands(),
            vec![DrawCommand::Image { image, rect: PixelRect::new(0.0, 0.0, 128.0, 128.0) }]
        );
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_sprite_without_image_draws_nothing() {
        let mut renderer = renderer();
        renderer.draw_sprite(&Sprite::new(0.0, 0.0, 1.0, 1.0));
        assert!(renderer.commands().is_empty());

        let sprite = Sprite::new(1.0, 0.0, 1.0, 2.0).with_image(ImageHandle::new("ship.png"));
        renderer.draw_sprite(&sprite);
        assert_eq!(
            renderer.commands(),
            &[DrawCommand::Image { image: ImageHandle::new("ship.png"), rect: PixelRect::new(32.0, 0.0, 32.0, 64.0) }]
        );
    }

    #[test]
    fn test_fit_canvas_through_trait() {
        let mut renderer = renderer();
        renderer.fit_canvas(400, 200);
        assert!((renderer.grid_pixel_length() - 50.0).abs() < f32::EPSILON);
    }
}
