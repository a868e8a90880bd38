//! Hit-testing of entities against a pointer position

use crate::entity::{Capabilities, EntityCore};
use crate::foundation::math::PixelRect;
use crate::render::Renderer;
use crate::scene::EntityView;

/// Whether an entity can be hit at all
///
/// Disabled entities, hidden image-rendering entities and entities with a
/// zero width or height are never hit.
#[allow(clippy::float_cmp)]
pub fn is_hit_candidate(view: &EntityView<'_>) -> bool {
    let core = view.core();
    let hidden = view.capabilities().contains(Capabilities::RENDERS_IMAGE) && !view.is_visible();
    view.is_enabled() && !hidden && core.width() != 0.0 && core.height() != 0.0
}

/// Pixel bounding box of an entity on the renderer's grid
pub fn hit_box(core: &EntityCore, renderer: &dyn Renderer) -> PixelRect {
    PixelRect::new(
        renderer.scale_to_grid(core.x()),
        renderer.scale_to_grid(core.y()),
        renderer.scale_to_grid(core.width()),
        renderer.scale_to_grid(core.height()),
    )
}
