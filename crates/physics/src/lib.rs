//! Arcade flight model and per-frame spatial queries for Starmarket.

pub mod collision;
pub mod flight;
pub mod proximity;

pub use collision::*;
pub use flight::*;
pub use proximity::*;
