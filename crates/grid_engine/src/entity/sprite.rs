//! Image-backed entity with a visibility toggle

use super::{Capabilities, Entity, EntityCore, EntityKind, EntityResult};
use crate::render::{ImageHandle, Renderer};
use crate::scene::SceneContext;

/// Entity that draws an image over its grid rectangle
///
/// Sprites start hidden. A hidden sprite draws nothing and is ignored by
/// pointer hit-testing.
#[derive(Debug, Clone)]
pub struct Sprite {
    core: EntityCore,
    image: Option<ImageHandle>,
    visible: bool,
}

impl Sprite {
    /// Create a hidden sprite without an image
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_core(EntityCore::new(x, y, width, height))
    }

    /// Wrap an existing core
    pub fn from_core(core: EntityCore) -> Self {
        Self { core, image: None, visible: false }
    }

    /// Builder form of [`set_image`](Self::set_image)
    #[must_use]
    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self
    }

    /// Image drawn when visible
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    /// Replace the image
    pub fn set_image(&mut self, image: ImageHandle) -> &mut Self {
        self.image = Some(image);
        self
    }

    /// Show or hide
    pub fn set_visible(&mut self, visible: bool) -> &mut Self {
        self.visible = visible;
        self
    }

    /// Flip visibility
    pub fn switch_visible(&mut self) -> &mut Self {
        self.visible = !self.visible;
        self
    }
}

impl Entity for Sprite {
    fn kind(&self) -> EntityKind {
        EntityKind::SPRITE
    }

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::RENDERS_IMAGE
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn on_draw(&mut self, renderer: &mut dyn Renderer, _ctx: &mut SceneContext) -> EntityResult {
        if self.visible {
            renderer.draw_sprite(self);
        }
        Ok(())
    }
}
