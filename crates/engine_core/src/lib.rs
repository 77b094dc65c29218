//! Core engine types and utilities for Starmarket.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial helpers
//! - Time management
//! - The trailing camera rig
//! - Small timer components (lifetimes, cooldowns)

pub mod camera;
pub mod components;
pub mod time;
pub mod transform;

pub use camera::*;
pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3};
