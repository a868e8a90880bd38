//! Plain entity with no behavior of its own

use super::{Entity, EntityCore, EntityKind};

/// Positioned entity whose callbacks are all no-ops
///
/// Useful as a backdrop, a placeholder, or a building block that other
/// code moves around through the registry.
#[derive(Debug, Clone)]
pub struct GameObject {
    core: EntityCore,
}

impl GameObject {
    /// Create a game object at `(x, y)` with the given extent, in grid units
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { core: EntityCore::new(x, y, width, height) }
    }

    /// Wrap an existing core
    pub fn from_core(core: EntityCore) -> Self {
        Self { core }
    }
}

impl Entity for GameObject {
    fn kind(&self) -> EntityKind {
        EntityKind::GAME_OBJECT
    }

    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}
