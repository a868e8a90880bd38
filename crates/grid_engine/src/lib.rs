//! # Grid Engine
//!
//! A small 2D scene engine for grid-based canvas games.
//!
//! ## Features
//!
//! - **Scene Registry**: entities kept in sorting order, with lifecycle callbacks
//! - **Frame Scheduler**: update and fixed-update passes every tick, draw passes on request
//! - **Input Dispatch**: pointer clicks routed to the topmost entity they hit
//! - **Pluggable Platform**: clock, frame callbacks, renderer and audio are injected
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use grid_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SceneConfig::load_from_file("scene.toml")?;
//!     let frames = QueuedFrameSource::new();
//!     let renderer = CommandRenderer::new(GridMetrics::from_config(&config));
//!     let mut scene = SceneManager::new(
//!         &config,
//!         renderer,
//!         Box::new(SystemClock::new()),
//!         Box::new(frames.clone()),
//!     )?;
//!
//!     scene.add(GameObject::new(2.0, 3.0, 1.0, 1.0))?;
//!     scene.request_redraw();
//!     scene.start();
//!     while let Some(frame) = frames.pop() {
//!         scene.on_frame(frame);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod audio;
pub mod config;
pub mod entity;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        audio::{AudioPlayer, QueuedAudio, SilentAudio},
        config::{Config, ConfigError, GridSettings, SceneConfig},
        entity::{Capabilities, Entity, EntityCore, EntityId, EntityKind, GameObject, Sprite},
        foundation::{
            math::{GridPoint, Point2, Vec2},
            time::{Clock, ManualClock, SystemClock},
        },
        input::ClickOutcome,
        render::{Color, CommandRenderer, DrawCommand, GridMetrics, ImageHandle, Renderer, Stroke},
        scene::{
            DestroyTarget, EntityError, EntityResult, Fault, FaultLog, FaultReporter, FrameKind, FrameSource,
            LogFaultReporter, QueuedFrameSource, SceneContext, SceneError, SceneManager,
        },
    };
}
