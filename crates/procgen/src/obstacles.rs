//! Asteroid field: a fixed ring of obstacles around the spawn point.

use glam::{EulerRot, Quat, Vec3};
use rand::prelude::*;

/// Obstacles per session.
pub const OBSTACLE_COUNT: usize = 500;
/// Inner radius of the ring; keeps the spawn point clear.
const RING_INNER: f32 = 30.0;
/// Ring width beyond the inner radius.
const RING_WIDTH: f32 = 200.0;
/// Total vertical thickness of the ring.
const RING_HEIGHT: f32 = 50.0;
const SCALE_MIN: f32 = 0.5;
const SCALE_RANGE: f32 = 2.0;

/// A single asteroid. Immutable after generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Vec3,
    /// Size factor; also widens the collision threshold.
    pub scale: f32,
    /// Cosmetic orientation for the renderer.
    pub rotation: Quat,
}

/// The static obstacle set for a session.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Scatter `count` obstacles in a flat ring (a navigable disc rather
    /// than a solid ball).
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let obstacles: Vec<Obstacle> = (0..count)
            .map(|_| {
                let radius = RING_INNER + rng.gen::<f32>() * RING_WIDTH;
                let angle = rng.gen::<f32>() * std::f32::consts::TAU;
                let y = (rng.gen::<f32>() - 0.5) * RING_HEIGHT;
                let scale = SCALE_MIN + rng.gen::<f32>() * SCALE_RANGE;
                let rotation = Quat::from_euler(
                    EulerRot::XYZ,
                    rng.gen::<f32>() * std::f32::consts::PI,
                    rng.gen::<f32>() * std::f32::consts::PI,
                    0.0,
                );
                Obstacle {
                    position: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
                    scale,
                    rotation,
                }
            })
            .collect();

        log::info!("Generated asteroid field with {} obstacles", obstacles.len());
        Self { obstacles }
    }

    /// Build a field from explicit obstacles (scripted scenes, tests).
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_has_fixed_size() {
        let field = ObstacleField::generate(1, OBSTACLE_COUNT);
        assert_eq!(field.len(), 500);
    }

    #[test]
    fn obstacles_lie_in_the_ring() {
        let field = ObstacleField::generate(77, OBSTACLE_COUNT);
        for o in field.iter() {
            let horizontal = Vec3::new(o.position.x, 0.0, o.position.z).length();
            assert!(horizontal >= RING_INNER - 1e-3);
            assert!(horizontal <= RING_INNER + RING_WIDTH + 1e-3);
            assert!(o.position.y.abs() <= RING_HEIGHT / 2.0);
            assert!(o.scale >= SCALE_MIN && o.scale <= SCALE_MIN + SCALE_RANGE);
        }
    }

    #[test]
    fn spawn_point_is_clear() {
        let field = ObstacleField::generate(5, OBSTACLE_COUNT);
        assert!(field.iter().all(|o| o.position.length() >= RING_INNER - 1e-3));
    }
}
