//! Entity model
//!
//! An entity is a positioned, orderable unit of behavior. Concrete entity
//! types own an [`EntityCore`] with the shared state and implement the
//! [`Entity`] trait, overriding only the callbacks they care about.
//!
//! ## Lifecycle
//!
//! ```text
//! constructed ──add──▶ registered ──destroy──▶ dropped
//!                │                  │
//!             on_start          on_destroy
//! ```
//!
//! While registered, the frame scheduler calls `update`, `fixed_update` and
//! (when a redraw was requested) `on_draw` once per tick, and the input
//! dispatcher calls `on_mouse_click` for hits.

mod entity_core;
mod game_object;
mod sprite;

pub use entity_core::EntityCore;
pub use game_object::GameObject;
pub use sprite::Sprite;

pub use crate::scene::{EntityError, EntityResult};

use crate::foundation::math::GridPoint;
use crate::render::Renderer;
use crate::scene::SceneContext;
use rand::Rng;
use std::any::Any;
use std::fmt;

/// Opaque entity identity, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId([u32; 4]);

impl EntityId {
    /// Generate a fresh random id
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self([rng.gen(), rng.gen(), rng.gen(), rng.gen()])
    }

    /// Build an id from explicit parts (fixtures, persisted scenes)
    pub const fn from_parts(parts: [u32; 4]) -> Self {
        Self(parts)
    }

    /// The raw parts of this id
    pub const fn parts(&self) -> [u32; 4] {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}-{b}-{c}-{d}")
    }
}

/// Explicit kind tag of an entity type
///
/// Registration labels an entity with its kind name, and `by_kind` queries
/// match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityKind(&'static str);

impl EntityKind {
    /// Kind of [`GameObject`]
    pub const GAME_OBJECT: Self = Self::new("GameObject");

    /// Kind of [`Sprite`]
    pub const SPRITE: Self = Self::new("Sprite");

    /// Declare a kind
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Kind name
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

bitflags::bitflags! {
    /// Optional capabilities an entity exposes beyond the base callbacks
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Renders an image and has a visibility toggle; hidden entities
        /// are not hit by pointer clicks
        const RENDERS_IMAGE = 1 << 0;
    }
}

/// Upcast helper so registry users can reach the concrete entity type
pub trait AsAny: Any {
    /// `&self` as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// `&mut self` as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior set of a scene entity
///
/// Every callback has a no-op default; `on_mouse_click` defaults to "not
/// handled". Returning `Err` from a frame callback is a fault: it is
/// reported with the entity's kind and id and the frame goes on.
#[allow(unused_variables)]
pub trait Entity: AsAny {
    /// Kind tag of this entity type
    fn kind(&self) -> EntityKind;

    /// Shared entity state
    fn core(&self) -> &EntityCore;

    /// Mutable shared entity state
    fn core_mut(&mut self) -> &mut EntityCore;

    /// Capabilities beyond the base callbacks
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Visibility, only consulted for entities with [`Capabilities::RENDERS_IMAGE`]
    fn is_visible(&self) -> bool {
        true
    }

    /// Called once, right after the entity joined the registry
    fn on_start(&mut self, ctx: &mut SceneContext) -> EntityResult {
        Ok(())
    }

    /// Called once, right before the entity leaves the registry
    fn on_destroy(&mut self, ctx: &mut SceneContext) -> EntityResult {
        Ok(())
    }

    /// First callback of every tick; `delta_time` is in milliseconds
    fn update(&mut self, delta_time: f64, ctx: &mut SceneContext) -> EntityResult {
        Ok(())
    }

    /// Second callback of every tick; `delta_time` is in milliseconds
    fn fixed_update(&mut self, delta_time: f64, ctx: &mut SceneContext) -> EntityResult {
        Ok(())
    }

    /// Called in ticks that follow a redraw request
    fn on_draw(&mut self, renderer: &mut dyn Renderer, ctx: &mut SceneContext) -> EntityResult {
        Ok(())
    }

    /// Called when a click lands inside the entity; return `true` to stop
    /// the click from reaching entities below
    fn on_mouse_click(&mut self, position: GridPoint, ctx: &mut SceneContext) -> EntityResult<bool> {
        Ok(false)
    }

    /// Identity
    fn id(&self) -> EntityId {
        self.core().id()
    }

    /// Whether the entity takes part in frame passes and hit-testing
    fn is_enabled(&self) -> bool {
        self.core().is_enabled()
    }
}
