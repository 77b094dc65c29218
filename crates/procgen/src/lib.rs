//! Procedural generation for the market universe and the asteroid field.

pub mod markets;
pub mod obstacles;

pub use markets::*;
pub use obstacles::*;
