//! Per-frame proximity queries: which market is in interaction range, and
//! whether the ship is touching an asteroid.

use glam::Vec3;
use procgen::{Market, MarketId, ObstacleField};
use serde::{Deserialize, Serialize};

use crate::collision::{first_collision, CollisionHit};

/// Radii used by the per-frame scans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityTuning {
    /// A market strictly closer than this can be interacted with.
    pub detection_radius: f32,
    /// Base ship-vs-asteroid distance; squared and scaled per obstacle.
    pub collision_threshold: f32,
}

impl Default for ProximityTuning {
    fn default() -> Self {
        Self {
            detection_radius: 25.0,
            collision_threshold: 3.0,
        }
    }
}

/// Closest market strictly inside `radius`, with its distance.
///
/// Linear in the number of markets; ties keep the earlier market.
pub fn nearest_market(markets: &[Market], position: Vec3, radius: f32) -> Option<(&Market, f32)> {
    let mut nearest = None;
    let mut min_dist = radius;
    for market in markets {
        let dist = market.position.distance(position);
        if dist < min_dist {
            min_dist = dist;
            nearest = Some((market, dist));
        }
    }
    nearest
}

/// Raw result of one proximity pass. Carries no edge information; see
/// [`NearestTracker`] for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProximityReport {
    pub nearest: Option<MarketId>,
    pub nearest_distance: Option<f32>,
    pub collision: Option<CollisionHit>,
}

/// Run both scans for the ship at `position`.
pub fn scan(
    position: Vec3,
    markets: &[Market],
    field: &ObstacleField,
    tuning: &ProximityTuning,
) -> ProximityReport {
    let nearest = nearest_market(markets, position, tuning.detection_radius);
    ProximityReport {
        nearest: nearest.map(|(m, _)| m.id),
        nearest_distance: nearest.map(|(_, d)| d),
        collision: first_collision(field, position, tuning.collision_threshold),
    }
}

/// Identity change of the nearest market between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestChanged {
    pub previous: Option<MarketId>,
    pub current: Option<MarketId>,
}

/// Remembers last frame's nearest market and reports only identity changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestTracker {
    last: Option<MarketId>,
}

impl NearestTracker {
    pub fn current(&self) -> Option<MarketId> {
        self.last
    }

    /// What `observe` would report, without updating.
    pub fn diff(&self, nearest: Option<MarketId>) -> Option<NearestChanged> {
        (nearest != self.last).then_some(NearestChanged {
            previous: self.last,
            current: nearest,
        })
    }

    pub fn observe(&mut self, nearest: Option<MarketId>) -> Option<NearestChanged> {
        let change = self.diff(nearest);
        if let Some(change) = change {
            log::debug!(
                "Nearest market {:?} -> {:?}",
                change.previous.map(|id| id.to_string()),
                change.current.map(|id| id.to_string())
            );
        }
        self.last = nearest;
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procgen::{MarketCategory, MarketUniverse, Obstacle};

    fn market_at(id: u32, position: Vec3) -> Market {
        let mut market = MarketUniverse::generate(id as u64, 1).markets.remove(0);
        market.id = MarketId(id);
        market.category = MarketCategory::Btc;
        market.position = position;
        market
    }

    #[test]
    fn picks_closest_market_in_range() {
        let markets = vec![
            market_at(0, Vec3::new(20.0, 0.0, 0.0)),
            market_at(1, Vec3::new(0.0, 10.0, 0.0)),
            market_at(2, Vec3::new(0.0, 0.0, 100.0)),
        ];
        let (m, d) = nearest_market(&markets, Vec3::ZERO, 25.0).unwrap();
        assert_eq!(m.id, MarketId(1));
        assert!((d - 10.0).abs() < 1e-5);
    }

    #[test]
    fn detection_radius_is_exclusive() {
        let markets = vec![market_at(0, Vec3::new(25.0, 0.0, 0.0))];
        assert!(nearest_market(&markets, Vec3::ZERO, 25.0).is_none());
        assert!(nearest_market(&markets, Vec3::new(0.5, 0.0, 0.0), 25.0).is_some());
    }

    #[test]
    fn ties_keep_first_market() {
        let markets = vec![
            market_at(4, Vec3::new(5.0, 0.0, 0.0)),
            market_at(5, Vec3::new(-5.0, 0.0, 0.0)),
        ];
        let (m, _) = nearest_market(&markets, Vec3::ZERO, 25.0).unwrap();
        assert_eq!(m.id, MarketId(4));
    }

    #[test]
    fn empty_world_has_no_nearest() {
        assert!(nearest_market(&[], Vec3::ZERO, 25.0).is_none());
        let report = scan(
            Vec3::ZERO,
            &[],
            &ObstacleField::default(),
            &ProximityTuning::default(),
        );
        assert_eq!(report, ProximityReport::default());
    }

    #[test]
    fn tracker_reports_only_identity_changes() {
        let mut tracker = NearestTracker::default();
        assert_eq!(tracker.observe(None), None);
        assert_eq!(tracker.observe(None), None);

        let change = tracker.observe(Some(MarketId(3))).unwrap();
        assert_eq!(change.previous, None);
        assert_eq!(change.current, Some(MarketId(3)));
        assert_eq!(tracker.observe(Some(MarketId(3))), None);

        let change = tracker.observe(Some(MarketId(8))).unwrap();
        assert_eq!(change.previous, Some(MarketId(3)));
        assert_eq!(tracker.observe(None).unwrap().current, None);
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn scan_combines_both_queries() {
        let markets = vec![market_at(0, Vec3::new(0.0, 0.0, -12.0))];
        let field = ObstacleField::from_obstacles(vec![Obstacle {
            position: Vec3::new(1.0, 0.0, 0.0),
            scale: 1.0,
            rotation: glam::Quat::IDENTITY,
        }]);
        let report = scan(Vec3::ZERO, &markets, &field, &ProximityTuning::default());
        assert_eq!(report.nearest, Some(MarketId(0)));
        assert!((report.nearest_distance.unwrap() - 12.0).abs() < 1e-5);
        assert_eq!(report.collision.map(|c| c.index), Some(0));
    }
}
