//! Pointer input
//!
//! A click arrives in raw canvas pixels. The dispatcher scans the sorted
//! entities from the top down, skipping the bottom-most one, and hands the
//! click (converted to grid cells) to the first entity whose box contains
//! it. An entity that returns `false` lets the click fall through to the
//! next hit below it.

mod picking;

pub use picking::{hit_box, is_hit_candidate};

use crate::entity::EntityId;
use crate::foundation::math::{pixel_to_grid, Point2};
use crate::render::Renderer;
use crate::scene::{Fault, FaultReporter, Hook, SceneContext};

/// Pointer click at canvas-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    /// Horizontal offset in pixels
    pub x: f32,
    /// Vertical offset in pixels
    pub y: f32,
}

impl PointerClick {
    /// Click at `(x, y)`
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Position as a point
    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// What became of a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The entity with this id returned `true` from `on_mouse_click`
    Handled(EntityId),
    /// Nobody handled the click
    Dropped,
}

/// Routes pointer clicks to entities
#[derive(Debug, Default, Clone, Copy)]
pub struct InputDispatcher;

impl InputDispatcher {
    /// Create a dispatcher
    pub fn new() -> Self {
        Self
    }

    /// Dispatch one click
    ///
    /// Errors from `on_mouse_click` are reported as faults and count as
    /// "not handled".
    pub fn dispatch(
        &self,
        click: PointerClick,
        ctx: &mut SceneContext,
        renderer: &dyn Renderer,
        faults: &mut dyn FaultReporter,
    ) -> ClickOutcome {
        let cell_pixels = renderer.grid_pixel_length();
        if cell_pixels <= 0.0 {
            log::trace!("Click at ({}, {}) dropped: canvas has no cells", click.x, click.y);
            return ClickOutcome::Dropped;
        }

        let point = click.position();
        let snapshot = ctx.registry().snapshot();
        for &key in snapshot.iter().skip(1).rev() {
            let Some(view) = ctx.registry().view(key) else {
                continue;
            };
            if !is_hit_candidate(&view) || !hit_box(view.core(), renderer).contains(point) {
                continue;
            }

            let grid_point = pixel_to_grid(point, cell_pixels);
            let Some(invocation) = ctx.invoke(key, |entity, ctx| entity.on_mouse_click(grid_point, ctx)) else {
                continue;
            };
            let (kind, id) = (invocation.kind, invocation.id);
            if let Some(Err(error)) = invocation.teardown {
                faults.report(Fault { hook: Hook::OnDestroy, kind, id, error });
            }
            match invocation.result {
                Ok(true) => return ClickOutcome::Handled(id),
                Ok(false) => {}
                Err(error) => faults.report(Fault { hook: Hook::OnMouseClick, kind, id, error }),
            }
        }

        log::trace!("Click at ({}, {}) dropped", click.x, click.y);
        ClickOutcome::Dropped
    }
}
