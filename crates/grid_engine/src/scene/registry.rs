//! Scene registry
//!
//! Entities live in a slot map keyed by [`EntityKey`], with an id index and
//! a [`SortingIndex`] giving the update/draw order. While one of its
//! callbacks runs, an entity is checked out of its slot; the slot then
//! keeps a copy of the entity's core so queries still see it.

use super::{SceneError, SortingIndex};
use crate::entity::{Capabilities, Entity, EntityCore, EntityId, EntityKind};
use crate::foundation::collections::{EntityKey, HandleMap};
use std::collections::HashMap;
use std::fmt;

/// How to find the entity a destroy call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyTarget {
    /// By identity
    Id(EntityId),
    /// By position in the sorted order
    Index(usize),
}

impl From<EntityId> for DestroyTarget {
    fn from(id: EntityId) -> Self {
        Self::Id(id)
    }
}

impl From<usize> for DestroyTarget {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&dyn Entity> for DestroyTarget {
    fn from(entity: &dyn Entity) -> Self {
        Self::Id(entity.id())
    }
}

enum Residency {
    Resident(Box<dyn Entity>),
    CheckedOut { core: EntityCore, visible: bool },
}

struct Slot {
    kind: EntityKind,
    capabilities: Capabilities,
    residency: Residency,
    doomed: bool,
}

impl Slot {
    fn core(&self) -> &EntityCore {
        match &self.residency {
            Residency::Resident(entity) => entity.core(),
            Residency::CheckedOut { core, .. } => core,
        }
    }

    fn view(&self) -> EntityView<'_> {
        let (entity, visible) = match &self.residency {
            Residency::Resident(entity) => (Some(&**entity), entity.is_visible()),
            Residency::CheckedOut { visible, .. } => (None, *visible),
        };
        EntityView {
            kind: self.kind,
            capabilities: self.capabilities,
            core: self.core(),
            visible,
            entity,
        }
    }
}

/// Read-only look at a registered entity
///
/// An entity whose callback is running right now is *busy*: its view shows
/// the core as it was when the callback began and [`entity`](Self::entity)
/// returns `None`.
#[derive(Clone, Copy)]
pub struct EntityView<'a> {
    kind: EntityKind,
    capabilities: Capabilities,
    core: &'a EntityCore,
    visible: bool,
    entity: Option<&'a dyn Entity>,
}

impl<'a> EntityView<'a> {
    /// Kind tag
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Capabilities declared at registration
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Shared state
    pub fn core(&self) -> &'a EntityCore {
        self.core
    }

    /// Identity
    pub fn id(&self) -> EntityId {
        self.core.id()
    }

    /// Label
    pub fn name(&self) -> &'a str {
        self.core.name()
    }

    /// Enabled flag
    pub fn is_enabled(&self) -> bool {
        self.core.is_enabled()
    }

    /// Visibility (always true without [`Capabilities::RENDERS_IMAGE`])
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True while one of the entity's callbacks is running
    pub fn is_busy(&self) -> bool {
        self.entity.is_none()
    }

    /// The entity itself, unless busy
    pub fn entity(&self) -> Option<&'a dyn Entity> {
        self.entity
    }

    /// The entity as its concrete type, unless busy or of another type
    pub fn downcast<T: Entity>(&self) -> Option<&'a T> {
        self.entity?.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for EntityView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityView")
            .field("kind", &self.kind)
            .field("core", self.core)
            .field("busy", &self.is_busy())
            .finish()
    }
}

/// Owner of all entities of a scene
#[derive(Default)]
pub struct SceneRegistry {
    slots: HandleMap<Slot>,
    ids: HashMap<EntityId, EntityKey>,
    order: SortingIndex,
    // A resort ran while some entity was checked out
    resort_pending: bool,
}

impl SceneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether an entity with this id is registered
    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains_key(&id)
    }

    /// Entity by id
    pub fn by_id(&self, id: EntityId) -> Option<EntityView<'_>> {
        self.ids.get(&id).and_then(|key| self.view(*key))
    }

    /// Entities of a kind, in sorted order
    pub fn by_kind(&self, kind: EntityKind) -> Vec<EntityView<'_>> {
        self.iter().filter(|view| view.kind() == kind).collect()
    }

    /// Entities exposing all of `capabilities`, in sorted order
    pub fn by_capability(&self, capabilities: Capabilities) -> Vec<EntityView<'_>> {
        self.iter().filter(|view| view.capabilities().contains(capabilities)).collect()
    }

    /// Entities with exactly this label
    pub fn by_name(&self, name: &str) -> Vec<EntityView<'_>> {
        self.iter().filter(|view| view.name() == name).collect()
    }

    /// Entities with exactly this tag; untagged entities never match
    pub fn by_tag(&self, tag: &str) -> Vec<EntityView<'_>> {
        self.iter().filter(|view| view.core().tag() == Some(tag)).collect()
    }

    /// Every entity, in sorted order
    pub fn all(&self) -> Vec<EntityView<'_>> {
        self.iter().collect()
    }

    /// Entities in sorted order
    pub fn iter(&self) -> impl Iterator<Item = EntityView<'_>> + '_ {
        self.order.keys().iter().filter_map(move |key| self.view(*key))
    }

    /// Entity at a sorted position
    pub fn get(&self, index: usize) -> Option<EntityView<'_>> {
        self.order.get(index).and_then(|key| self.view(key))
    }

    /// Sorted position of an entity
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        let key = self.ids.get(&id)?;
        self.order.keys().iter().position(|k| k == key)
    }

    /// Mutable access to an entity that is not busy
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut dyn Entity> {
        let key = self.ids.get(&id)?;
        match &mut self.slots.get_mut(*key)?.residency {
            Residency::Resident(entity) => Some(&mut **entity),
            Residency::CheckedOut { .. } => None,
        }
    }

    /// Entity as its concrete type
    pub fn get_as<T: Entity>(&self, id: EntityId) -> Option<&T> {
        self.by_id(id)?.downcast::<T>()
    }

    /// Mutable entity as its concrete type
    pub fn get_as_mut<T: Entity>(&mut self, id: EntityId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    /// Recompute the sorted order from current sorting orders
    ///
    /// An entity whose callback is running is sorted by its core as it was
    /// when the callback began, so the sort is repeated once every entity is
    /// checked back in.
    pub fn resort(&mut self) {
        let slots = &self.slots;
        self.order.resort(|key| slots.get(key).map_or(0, |slot| slot.core().sorting_order()));
        self.resort_pending = self.has_checked_out();
    }

    fn has_checked_out(&self) -> bool {
        self.slots
            .values()
            .any(|slot| matches!(slot.residency, Residency::CheckedOut { .. }))
    }

    pub(crate) fn insert(&mut self, mut entity: Box<dyn Entity>) -> Result<EntityKey, SceneError> {
        let id = entity.id();
        if self.ids.contains_key(&id) {
            return Err(SceneError::DuplicateIdentity(id));
        }

        let kind = entity.kind();
        entity.core_mut().set_name(kind.name());
        let key = self.slots.insert(Slot {
            kind,
            capabilities: entity.capabilities(),
            residency: Residency::Resident(entity),
            doomed: false,
        });
        self.ids.insert(id, key);
        self.order.push(key);
        self.resort();

        log::debug!("Registered {} [{}]", kind, id);
        Ok(key)
    }

    pub(crate) fn remove(&mut self, key: EntityKey) -> bool {
        let Some(slot) = self.slots.remove(key) else {
            return false;
        };
        let id = slot.core().id();
        self.ids.remove(&id);
        self.order.remove(key);
        self.resort();

        log::debug!("Removed {} [{}]", slot.kind, id);
        true
    }

    pub(crate) fn resolve(&self, target: DestroyTarget) -> Result<EntityKey, SceneError> {
        match target {
            DestroyTarget::Id(id) => self.ids.get(&id).copied().ok_or(SceneError::NotFound(id)),
            DestroyTarget::Index(index) => self.order.get(index).ok_or(SceneError::RangeError {
                index,
                len: self.order.len(),
            }),
        }
    }

    pub(crate) fn view(&self, key: EntityKey) -> Option<EntityView<'_>> {
        self.slots.get(key).map(Slot::view)
    }

    pub(crate) fn snapshot(&self) -> Vec<EntityKey> {
        self.order.snapshot()
    }

    pub(crate) fn is_busy(&self, key: EntityKey) -> bool {
        self.slots
            .get(key)
            .is_some_and(|slot| matches!(slot.residency, Residency::CheckedOut { .. }))
    }

    /// Take the entity out of its slot so a callback can borrow the scene
    pub(crate) fn check_out(&mut self, key: EntityKey) -> Option<Box<dyn Entity>> {
        let slot = self.slots.get_mut(key)?;
        let Residency::Resident(entity) = &slot.residency else {
            return None;
        };
        let parked = Residency::CheckedOut {
            core: entity.core().clone(),
            visible: entity.is_visible(),
        };
        match std::mem::replace(&mut slot.residency, parked) {
            Residency::Resident(entity) => Some(entity),
            Residency::CheckedOut { .. } => None,
        }
    }

    /// Put a checked-out entity back; returns whether it was destroyed meanwhile
    pub(crate) fn check_in(&mut self, key: EntityKey, entity: Box<dyn Entity>) -> bool {
        let doomed = match self.slots.get_mut(key) {
            Some(slot) => {
                slot.residency = Residency::Resident(entity);
                std::mem::take(&mut slot.doomed)
            }
            None => false,
        };
        if self.resort_pending && !self.has_checked_out() {
            log::trace!("Repeating a resort requested during a callback");
            self.resort();
        }
        doomed
    }

    pub(crate) fn mark_doomed(&mut self, key: EntityKey) {
        if let Some(slot) = self.slots.get_mut(key) {
            slot.doomed = true;
        }
    }
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
