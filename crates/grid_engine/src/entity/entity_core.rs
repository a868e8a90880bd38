//! Shared state of every entity

use super::EntityId;
use crate::foundation::math::Vec2;

/// Label an entity carries until it is registered
pub const DEFAULT_NAME: &str = "New GameObject";

/// Identity, flags, ordering and geometry shared by all entity types
///
/// Position and size are in grid units. Setters return `&mut Self` so they
/// can be chained.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCore {
    id: EntityId,
    enabled: bool,
    name: String,
    tag: Option<String>,
    sorting_order: i32,
    position: Vec2,
    size: Vec2,
}

impl EntityCore {
    /// Create an enabled core with a fresh random id
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::with_id(EntityId::random(), x, y, width, height)
    }

    /// Create an enabled core with an explicit id
    pub fn with_id(id: EntityId, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            enabled: true,
            name: DEFAULT_NAME.to_string(),
            tag: None,
            sorting_order: 0,
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Builder form of [`set_sorting_order`](Self::set_sorting_order)
    #[must_use]
    pub fn with_sorting_order(mut self, order: i32) -> Self {
        self.sorting_order = order;
        self
    }

    /// Builder form of [`set_tag`](Self::set_tag)
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Builder form of [`set_enabled`](Self::set_enabled)
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Identity
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Whether the entity takes part in frame passes and hit-testing
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Display label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional tag
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Update/draw priority; lower runs first
    pub fn sorting_order(&self) -> i32 {
        self.sorting_order
    }

    /// X coordinate in grid units
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Y coordinate in grid units
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Width in grid units
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Height in grid units
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Position as a vector
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Width and height as a vector
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Enable or disable
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    /// Rename; registration overwrites the name with the kind name
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Set the tag
    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = Some(tag.into());
        self
    }

    /// Remove the tag
    pub fn clear_tag(&mut self) -> &mut Self {
        self.tag = None;
        self
    }

    /// Change the sorting order.
    ///
    /// The registry does not resort by itself; call
    /// `SceneContext::update_sorting_layer` afterwards.
    pub fn set_sorting_order(&mut self, order: i32) -> &mut Self {
        self.sorting_order = order;
        self
    }

    /// Shift the position by `(dx, dy)`
    pub fn move_by(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.position += Vec2::new(dx, dy);
        self
    }

    /// Jump to `(x, y)`
    pub fn go_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the X coordinate
    pub fn set_x(&mut self, x: f32) -> &mut Self {
        self.position.x = x;
        self
    }

    /// Set the Y coordinate
    pub fn set_y(&mut self, y: f32) -> &mut Self {
        self.position.y = y;
        self
    }

    /// Set the width
    pub fn set_width(&mut self, width: f32) -> &mut Self {
        self.size.x = width;
        self
    }

    /// Set the height
    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.size.y = height;
        self
    }
}
