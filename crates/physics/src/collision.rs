//! Ship-versus-asteroid overlap test.

use glam::Vec3;
use procgen::ObstacleField;

/// The obstacle a collision pass stopped at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionHit {
    /// Index into the obstacle field.
    pub index: usize,
    pub distance_squared: f32,
}

/// First obstacle the ship overlaps, scanning in field order.
///
/// An obstacle is hit when `d² < threshold² * scale`. The scan stops at the
/// first hit, so a pass yields at most one collision even when several
/// obstacles overlap the ship.
pub fn first_collision(field: &ObstacleField, position: Vec3, threshold: f32) -> Option<CollisionHit> {
    let threshold_sq = threshold * threshold;
    field.iter().enumerate().find_map(|(index, obstacle)| {
        let distance_squared = position.distance_squared(obstacle.position);
        (distance_squared < threshold_sq * obstacle.scale).then_some(CollisionHit {
            index,
            distance_squared,
        })
    })
}
