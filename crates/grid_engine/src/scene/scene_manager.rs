//! Scene manager
//!
//! One value per active scene, tying the registry and frame state
//! ([`SceneContext`]) to the renderer, the frame scheduler, the input
//! dispatcher and the fault reporter. Platform glue forwards frame
//! callbacks to [`on_frame`](SceneManager::on_frame) and pointer clicks to
//! [`click`](SceneManager::click).

use super::{
    DestroyTarget, FaultReporter, FrameKind, FrameScheduler, FrameSource, FrameState, LogFaultReporter, SceneContext,
    SceneError, SceneRegistry,
};
use crate::audio::AudioPlayer;
use crate::config::{Config, GridSettings, SceneConfig};
use crate::entity::{Entity, EntityId};
use crate::foundation::time::Clock;
use crate::input::{ClickOutcome, InputDispatcher, PointerClick};
use crate::render::{GridMetrics, Renderer};

/// A scene and the collaborators that drive it
pub struct SceneManager<R: Renderer> {
    ctx: SceneContext,
    renderer: R,
    scheduler: FrameScheduler,
    input: InputDispatcher,
    faults: Box<dyn FaultReporter>,
}

impl<R: Renderer> SceneManager<R> {
    /// Build an empty, stopped scene
    ///
    /// The renderer's grid is reset to the one `config` describes and, if
    /// the config names a viewport, fitted to it. Faults go to the log until
    /// [`with_faults`](Self::with_faults) says otherwise.
    pub fn new(
        config: &SceneConfig,
        mut renderer: R,
        clock: Box<dyn Clock>,
        frames: Box<dyn FrameSource>,
    ) -> Result<Self, SceneError> {
        config.validate().map_err(|err| SceneError::InvalidArgument(err.to_string()))?;

        *renderer.grid_mut() = GridMetrics::from_config(config);
        if let Some((width, height)) = config.viewport {
            renderer.fit_canvas(width, height);
        }

        Ok(Self {
            ctx: SceneContext::new(config.grid),
            renderer,
            scheduler: FrameScheduler::new(clock, frames),
            input: InputDispatcher::new(),
            faults: Box::new(LogFaultReporter),
        })
    }

    /// Send faults to `faults`
    #[must_use]
    pub fn with_faults(mut self, faults: Box<dyn FaultReporter>) -> Self {
        self.faults = faults;
        self
    }

    /// Play sounds through `audio`
    #[must_use]
    pub fn with_audio(mut self, audio: Box<dyn AudioPlayer>) -> Self {
        self.ctx.set_audio(audio);
        self
    }

    /// Start the frame loop
    pub fn start(&mut self) {
        self.scheduler.start(self.ctx.frame_mut());
    }

    /// Stop the frame loop
    pub fn stop(&mut self) {
        self.ctx.stop();
    }

    /// Platform frame callback
    pub fn on_frame(&mut self, kind: FrameKind) {
        self.scheduler
            .on_frame(kind, &mut self.ctx, &mut self.renderer, self.faults.as_mut());
    }

    /// Run one tick at an explicit timestamp in milliseconds
    pub fn tick(&mut self, timestamp: f64) {
        self.scheduler
            .tick(timestamp, &mut self.ctx, &mut self.renderer, self.faults.as_mut());
    }

    /// Run a draw pass in the current or next tick
    pub fn request_redraw(&mut self) {
        self.ctx.request_redraw();
    }

    /// Pointer click at canvas pixel `(x, y)`
    pub fn click(&mut self, x: f32, y: f32) -> ClickOutcome {
        self.input
            .dispatch(PointerClick::new(x, y), &mut self.ctx, &self.renderer, self.faults.as_mut())
    }

    /// Refit the canvas to a resized viewport
    pub fn fit_canvas(&mut self, viewport_width: u32, viewport_height: u32) {
        self.renderer.fit_canvas(viewport_width, viewport_height);
    }

    /// See [`SceneContext::add`]
    pub fn add<E: Entity>(&mut self, entity: E) -> Result<EntityId, SceneError> {
        self.ctx.add(entity)
    }

    /// See [`SceneContext::add_boxed`]
    pub fn add_boxed(&mut self, entity: Box<dyn Entity>) -> Result<EntityId, SceneError> {
        self.ctx.add_boxed(entity)
    }

    /// See [`SceneContext::destroy`]
    pub fn destroy(&mut self, target: impl Into<DestroyTarget>) -> Result<(), SceneError> {
        self.ctx.destroy(target)
    }

    /// See [`SceneContext::update_sorting_layer`]
    pub fn update_sorting_layer(&mut self) {
        self.ctx.update_sorting_layer();
    }

    /// Entities of the scene
    pub fn registry(&self) -> &SceneRegistry {
        self.ctx.registry()
    }

    /// Mutable entities of the scene
    pub fn registry_mut(&mut self) -> &mut SceneRegistry {
        self.ctx.registry_mut()
    }

    /// The context entity callbacks receive
    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    /// Mutable context
    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.ctx
    }

    /// Frame loop state
    pub fn frame(&self) -> &FrameState {
        self.ctx.frame()
    }

    /// Whether the frame loop is running
    pub fn is_running(&self) -> bool {
        self.ctx.is_running()
    }

    /// Grid resolution
    pub fn grid_settings(&self) -> GridSettings {
        self.ctx.grid_settings()
    }

    /// The renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable renderer
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
