//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and grid geometry helpers
//! - Handle-based collections
//! - Time sources
//! - Random helpers
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod random;
pub mod logging;
