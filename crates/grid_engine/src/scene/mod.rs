//! Scene core
//!
//! The registry owning a scene's entities, the frame scheduler driving
//! them, fault reporting, and the [`SceneManager`] facade tying them to a
//! renderer and to pointer input.

mod context;
mod error;
mod faults;
mod frames;
mod registry;
mod scene_manager;
mod scene_tests;
mod scheduler;
mod sorting;

pub use context::SceneContext;
pub use error::{EntityError, EntityResult, Hook, SceneError};
pub use faults::{Fault, FaultLog, FaultReporter, LogFaultReporter};
pub use frames::{FrameKind, FrameSource, QueuedFrameSource};
pub use registry::{DestroyTarget, EntityView, SceneRegistry};
pub use scene_manager::SceneManager;
pub use scheduler::{FrameScheduler, FrameState, RunState};
pub use sorting::SortingIndex;
