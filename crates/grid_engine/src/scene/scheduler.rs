//! Frame scheduler
//!
//! ```text
//!            start()            Prime frame
//!  Stopped ──────────▶ Starting ───────────▶ Running ──┐ Tick frame:
//!     ▲                    │                    ▲      │ update, fixed_update,
//!     └──── stop() ────────┴────────────────────┴──────┘ on_draw if requested
//! ```
//!
//! Every tick walks one snapshot of the sorted order. A disabled entity
//! ends the whole tick: no further entity is called in that pass or in the
//! passes after it, and no next tick is requested. The loop then stays
//! `Running` with nothing scheduled, so [`FrameScheduler::start`] refuses
//! until the loop is stopped.

use super::{EntityResult, Fault, FaultReporter, FrameKind, FrameSource, Hook, SceneContext};
use crate::entity::Entity;
use crate::foundation::collections::EntityKey;
use crate::foundation::time::Clock;
use crate::render::Renderer;

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No ticks are scheduled
    #[default]
    Stopped,
    /// Started, waiting for the priming frame
    Starting,
    /// Each tick schedules the next one
    Running,
}

/// Timing and redraw state of one scene's frame loop
#[derive(Debug, Clone, Default)]
pub struct FrameState {
    state: RunState,
    last_timestamp: f64,
    frame_time: f64,
    redraw_requested: bool,
    tick_pending: bool,
}

impl FrameState {
    /// Current loop state
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Whether ticks keep scheduling themselves
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Timestamp of the last tick in milliseconds
    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }

    /// Duration of the last tick in milliseconds
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    /// Whether the next tick runs a draw pass
    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Run a draw pass in the current or next tick
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Stop the loop; a tick already requested from the platform still runs
    pub fn stop(&mut self) {
        log::warn!("Stopped the frame loop! Restarting it will cause a time skip.");
        self.state = RunState::Stopped;
    }

    fn advance(&mut self, timestamp: f64) -> f64 {
        let delta_time = timestamp - self.last_timestamp;
        self.last_timestamp = timestamp;
        self.frame_time = delta_time;
        delta_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassOutcome {
    Completed,
    ShortCircuited,
}

/// Drives the per-frame passes from platform frame callbacks
pub struct FrameScheduler {
    clock: Box<dyn Clock>,
    frames: Box<dyn FrameSource>,
}

impl FrameScheduler {
    /// Scheduler reading time from `clock` and asking `frames` for callbacks
    pub fn new(clock: Box<dyn Clock>, frames: Box<dyn FrameSource>) -> Self {
        Self { clock, frames }
    }

    /// Start the loop via one priming frame
    ///
    /// Warns and does nothing if the loop is already starting or running.
    pub fn start(&mut self, frame: &mut FrameState) {
        if frame.state != RunState::Stopped {
            log::warn!("Cannot start a new frame loop while one exists.");
            return;
        }
        frame.state = RunState::Starting;
        self.frames.request_frame(FrameKind::Prime);
        log::info!("Frame loop starting");
    }

    /// Handle a platform frame callback
    pub fn on_frame(
        &mut self,
        kind: FrameKind,
        ctx: &mut SceneContext,
        renderer: &mut dyn Renderer,
        faults: &mut dyn FaultReporter,
    ) {
        match kind {
            FrameKind::Prime => self.prime(ctx.frame_mut()),
            FrameKind::Tick => {
                let timestamp = self.clock.now_ms();
                self.tick(timestamp, ctx, renderer, faults);
            }
        }
    }

    fn prime(&mut self, frame: &mut FrameState) {
        if frame.state != RunState::Starting {
            log::debug!("Ignoring priming frame while {:?}", frame.state);
            return;
        }
        if !frame.tick_pending {
            frame.tick_pending = true;
            self.frames.request_frame(FrameKind::Tick);
        }
        frame.state = RunState::Running;
    }

    /// Run one tick at `timestamp` (milliseconds)
    ///
    /// Requests the next tick if the loop is still running afterwards and
    /// the tick was not cut short by a disabled entity.
    pub fn tick(
        &mut self,
        timestamp: f64,
        ctx: &mut SceneContext,
        renderer: &mut dyn Renderer,
        faults: &mut dyn FaultReporter,
    ) {
        let frame = ctx.frame_mut();
        frame.tick_pending = false;
        let delta_time = frame.advance(timestamp);

        let snapshot = ctx.registry().snapshot();
        if Self::run_passes(&snapshot, delta_time, ctx, renderer, faults) == PassOutcome::ShortCircuited {
            // No next tick; the state stays Running until stop()
            log::debug!("Tick at {:.3}ms ended early on a disabled entity, frame loop halted", timestamp);
            return;
        }

        let frame = ctx.frame_mut();
        if frame.is_running() && !frame.tick_pending {
            frame.tick_pending = true;
            self.frames.request_frame(FrameKind::Tick);
        }
    }

    fn run_passes(
        snapshot: &[EntityKey],
        delta_time: f64,
        ctx: &mut SceneContext,
        renderer: &mut dyn Renderer,
        faults: &mut dyn FaultReporter,
    ) -> PassOutcome {
        let update = Self::run_pass(snapshot, Hook::Update, ctx, faults, |entity, ctx| {
            entity.update(delta_time, ctx)
        });
        if update == PassOutcome::ShortCircuited {
            return update;
        }

        let fixed = Self::run_pass(snapshot, Hook::FixedUpdate, ctx, faults, |entity, ctx| {
            entity.fixed_update(delta_time, ctx)
        });
        if fixed == PassOutcome::ShortCircuited || !ctx.frame().redraw_requested() {
            return fixed;
        }

        ctx.frame_mut().redraw_requested = false;
        Self::run_pass(snapshot, Hook::OnDraw, ctx, faults, |entity, ctx| entity.on_draw(renderer, ctx))
    }

    fn run_pass(
        snapshot: &[EntityKey],
        hook: Hook,
        ctx: &mut SceneContext,
        faults: &mut dyn FaultReporter,
        mut call: impl FnMut(&mut dyn Entity, &mut SceneContext) -> EntityResult,
    ) -> PassOutcome {
        for &key in snapshot {
            // Destroyed earlier in this tick
            let Some(view) = ctx.registry().view(key) else {
                continue;
            };
            if !view.is_enabled() {
                return PassOutcome::ShortCircuited;
            }

            let Some(invocation) = ctx.invoke(key, |entity, ctx| call(entity, ctx)) else {
                continue;
            };
            let (kind, id) = (invocation.kind, invocation.id);
            if let Err(error) = invocation.result {
                faults.report(Fault { hook, kind, id, error });
            }
            if let Some(Err(error)) = invocation.teardown {
                faults.report(Fault { hook: Hook::OnDestroy, kind, id, error });
            }
        }
        PassOutcome::Completed
    }
}
