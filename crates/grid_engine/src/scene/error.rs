//! Scene error types

use crate::entity::{EntityId, EntityKind};
use std::fmt;

/// Entity callback a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// `on_start`
    OnStart,
    /// `on_destroy`
    OnDestroy,
    /// `update`
    Update,
    /// `fixed_update`
    FixedUpdate,
    /// `on_draw`
    OnDraw,
    /// `on_mouse_click`
    OnMouseClick,
}

impl Hook {
    /// Callback name as it appears on [`Entity`](crate::entity::Entity)
    pub const fn name(self) -> &'static str {
        match self {
            Self::OnStart => "on_start",
            Self::OnDestroy => "on_destroy",
            Self::Update => "update",
            Self::FixedUpdate => "fixed_update",
            Self::OnDraw => "on_draw",
            Self::OnMouseClick => "on_mouse_click",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contract violations reported by scene operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// An entity with this id is already registered
    #[error("Cannot add entity {0}: an entity with this id is already registered")]
    DuplicateIdentity(EntityId),

    /// No registered entity has this id
    #[error("Entity {0} is not registered")]
    NotFound(EntityId),

    /// Sorted index outside the registry
    #[error("Index {index} is out of range for {len} entities")]
    RangeError {
        /// Requested index
        index: usize,
        /// Number of registered entities
        len: usize,
    },

    /// Argument rejected by a constructor or utility
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `on_start` or `on_destroy` failed while adding or destroying
    #[error("{kind} [{id}] failed in {hook}: {source}")]
    Lifecycle {
        /// Failing callback
        hook: Hook,
        /// Kind of the entity
        kind: EntityKind,
        /// Id of the entity
        id: EntityId,
        /// Error the callback returned
        source: EntityError,
    },
}

/// Error returned by entity callbacks
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EntityError {
    /// Failure described by the entity itself
    #[error("{0}")]
    Custom(String),

    /// A scene operation made from inside the callback failed
    #[error(transparent)]
    Scene(Box<SceneError>),
}

impl EntityError {
    /// Build a [`EntityError::Custom`]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

impl From<SceneError> for EntityError {
    fn from(err: SceneError) -> Self {
        Self::Scene(Box::new(err))
    }
}

/// Result of an entity callback
pub type EntityResult<T = ()> = Result<T, EntityError>;
