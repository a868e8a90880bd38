//! Scene context handed to every entity callback

use super::{DestroyTarget, EntityResult, FrameState, Hook, SceneError, SceneRegistry};
use crate::audio::{AudioPlayer, SilentAudio};
use crate::config::GridSettings;
use crate::entity::{Entity, EntityId, EntityKind};
use crate::foundation::collections::EntityKey;

/// Outcome of running one callback on a checked-out entity
pub(crate) struct Invocation<R> {
    pub kind: EntityKind,
    pub id: EntityId,
    pub result: EntityResult<R>,
    /// Result of the deferred `on_destroy` if the entity was destroyed
    /// while its callback ran
    pub teardown: Option<EntityResult>,
}

/// Everything an entity may touch while one of its callbacks runs
///
/// Owns the registry, the frame loop state, the grid settings and the audio
/// player. Entity callbacks get `&mut SceneContext`; the entity whose
/// callback is running is checked out of the registry for the duration.
pub struct SceneContext {
    registry: SceneRegistry,
    frame: FrameState,
    grid: GridSettings,
    audio: Box<dyn AudioPlayer>,
}

impl SceneContext {
    /// Empty scene on a grid of the given resolution
    pub fn new(grid: GridSettings) -> Self {
        Self {
            registry: SceneRegistry::new(),
            frame: FrameState::default(),
            grid,
            audio: Box::new(SilentAudio),
        }
    }

    /// Entities of the scene
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Mutable entities of the scene
    pub fn registry_mut(&mut self) -> &mut SceneRegistry {
        &mut self.registry
    }

    /// Frame loop state
    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut FrameState {
        &mut self.frame
    }

    /// Grid resolution
    pub fn grid_settings(&self) -> GridSettings {
        self.grid
    }

    /// Sound output
    pub fn audio(&mut self) -> &mut dyn AudioPlayer {
        self.audio.as_mut()
    }

    /// Replace the sound output
    pub fn set_audio(&mut self, audio: Box<dyn AudioPlayer>) {
        self.audio = audio;
    }

    /// Ask for a draw pass in the current or next tick
    pub fn request_redraw(&mut self) {
        self.frame.request_redraw();
    }

    /// Stop the frame loop after the current tick
    pub fn stop(&mut self) {
        self.frame.stop();
    }

    /// Whether the frame loop is running
    pub fn is_running(&self) -> bool {
        self.frame.is_running()
    }

    /// Duration of the last tick in milliseconds
    pub fn frame_time(&self) -> f64 {
        self.frame.frame_time()
    }

    /// Register an entity and run its `on_start`
    ///
    /// The entity is labeled with its kind name and is visible to queries
    /// while `on_start` runs. If `on_start` fails the entity stays registered
    /// and the failure is returned.
    pub fn add<E: Entity>(&mut self, entity: E) -> Result<EntityId, SceneError> {
        self.add_boxed(Box::new(entity))
    }

    /// [`add`](Self::add) for an already boxed entity
    pub fn add_boxed(&mut self, entity: Box<dyn Entity>) -> Result<EntityId, SceneError> {
        let id = entity.id();
        let key = self.registry.insert(entity)?;
        let Some(invocation) = self.invoke(key, |entity, ctx| entity.on_start(ctx)) else {
            return Ok(id);
        };

        let Invocation { kind, result, teardown, .. } = invocation;
        result.map_err(|source| SceneError::Lifecycle { hook: Hook::OnStart, kind, id, source })?;
        if let Some(Err(source)) = teardown {
            return Err(SceneError::Lifecycle { hook: Hook::OnDestroy, kind, id, source });
        }
        Ok(id)
    }

    /// Run `on_destroy` on an entity, then remove it
    ///
    /// Destroying an entity whose own callback is running is deferred until
    /// that callback returns. If `on_destroy` fails the entity stays
    /// registered and the failure is returned.
    pub fn destroy(&mut self, target: impl Into<DestroyTarget>) -> Result<(), SceneError> {
        let key = self.registry.resolve(target.into())?;
        if self.registry.is_busy(key) {
            log::debug!("Deferring destroy of a busy entity until its callback returns");
            self.registry.mark_doomed(key);
            return Ok(());
        }

        let Some(view) = self.registry.view(key) else {
            return Ok(());
        };
        let (kind, id) = (view.kind(), view.id());
        match self.tear_down(key) {
            Some(Err(source)) => Err(SceneError::Lifecycle { hook: Hook::OnDestroy, kind, id, source }),
            _ => Ok(()),
        }
    }

    /// Resort entities after sorting orders were changed directly
    pub fn update_sorting_layer(&mut self) {
        self.registry.resort();
    }

    /// Check an entity out, run `f` on it, check it back in and carry out a
    /// destroy requested meanwhile. `None` if the entity is gone or busy.
    pub(crate) fn invoke<R>(
        &mut self,
        key: EntityKey,
        f: impl FnOnce(&mut dyn Entity, &mut Self) -> EntityResult<R>,
    ) -> Option<Invocation<R>> {
        let mut entity = self.registry.check_out(key)?;
        let (kind, id) = (entity.kind(), entity.id());
        let result = f(entity.as_mut(), self);

        let doomed = self.registry.check_in(key, entity);
        let teardown = if doomed { self.tear_down(key) } else { None };
        Some(Invocation { kind, id, result, teardown })
    }

    fn tear_down(&mut self, key: EntityKey) -> Option<EntityResult> {
        let mut entity = self.registry.check_out(key)?;
        let result = entity.on_destroy(self);
        match result {
            Ok(()) => {
                self.registry.remove(key);
            }
            Err(_) => {
                self.registry.check_in(key, entity);
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityCore, EntityError, GameObject};

    fn context() -> SceneContext {
        SceneContext::new(GridSettings::default())
    }

    #[test]
    fn test_add_and_destroy_by_index() {
        let mut ctx = context();
        let low = ctx.add(GameObject::from_core(EntityCore::new(0.0, 0.0, 1.0, 1.0).with_sorting_order(-1))).unwrap();
        let high = ctx.add(GameObject::new(0.0, 0.0, 1.0, 1.0)).unwrap();

        ctx.destroy(0_usize).unwrap();
        assert!(!ctx.registry().contains(low));
        assert!(ctx.registry().contains(high));
        assert_eq!(ctx.destroy(5_usize), Err(SceneError::RangeError { index: 5, len: 1 }));
    }

    #[test]
    fn test_destroy_twice_fails() {
        let mut ctx = context();
        let id = ctx.add(GameObject::new(0.0, 0.0, 1.0, 1.0)).unwrap();

        ctx.destroy(id).unwrap();
        assert_eq!(ctx.destroy(id), Err(SceneError::NotFound(id)));
    }

    struct Stubborn {
        core: EntityCore,
    }

    impl Entity for Stubborn {
        fn kind(&self) -> EntityKind {
            EntityKind::new("Stubborn")
        }

        fn core(&self) -> &EntityCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut EntityCore {
            &mut self.core
        }

        fn on_destroy(&mut self, _ctx: &mut SceneContext) -> EntityResult {
            Err(EntityError::custom("not leaving"))
        }
    }

    #[test]
    fn test_failed_on_destroy_keeps_entity() {
        let mut ctx = context();
        let id = ctx.add(Stubborn { core: EntityCore::new(0.0, 0.0, 1.0, 1.0) }).unwrap();

        let err = ctx.destroy(id).unwrap_err();
        assert!(matches!(err, SceneError::Lifecycle { hook: Hook::OnDestroy, .. }));
        assert!(ctx.registry().by_id(id).is_some_and(|view| !view.is_busy()));
    }

    #[test]
    fn test_destroy_by_reference() {
        let mut ctx = context();
        let object = GameObject::new(0.0, 0.0, 1.0, 1.0);
        let id = ctx.add(object.clone()).unwrap();

        ctx.destroy(&object as &dyn Entity).unwrap();
        assert!(ctx.registry().is_empty());
        assert!(!ctx.registry().contains(id));
    }
}
