//! Notifications raised by the per-frame simulation tick.

use glam::Vec3;
use procgen::MarketId;

/// Something consumers (HUD, minimap, audio, logging) may react to.
///
/// `ShipMoved` is raised every tick; every other variant is edge-triggered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    ShipMoved { position: Vec3 },
    WarpChanged { warping: bool },
    NearestMarketChanged {
        previous: Option<MarketId>,
        current: Option<MarketId>,
    },
    /// Raw overlap with an obstacle. Fire-and-forget; may repeat every tick
    /// while the ship stays inside.
    Collision { obstacle: usize },
    /// Debounced impact warning derived from collisions.
    ImpactAlert,
}

impl SimEvent {
    /// True for events worth a log line (everything but the per-tick move).
    pub fn is_notable(&self) -> bool {
        !matches!(self, SimEvent::ShipMoved { .. })
    }
}
