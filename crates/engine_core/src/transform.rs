//! Transform component and utilities for spatial positioning.

use glam::{Quat, Vec3};

/// A 3D transform representing position and rotation.
///
/// Ships, cameras and markers never scale, so unlike a general scene-graph
/// node there is no scale component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a transform from a position and yaw/pitch angles (radians).
    ///
    /// Yaw turns around world Y, pitch then tilts around the yawed X axis.
    pub fn from_yaw_pitch(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            rotation: yaw_pitch_rotation(yaw, pitch),
        }
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Map a point from this transform's local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

/// Rotation for the given yaw (around Y) and pitch (around local X), in radians.
///
/// Composed as `Ry(yaw) * Rx(pitch)`: yaw turns around world up and pitch
/// tilts the already-yawed nose. This is not the `Rx(pitch) * Ry(yaw)` that
/// an XYZ Euler rotation produces; with pitch applied first, turning while
/// nosed up would roll the heading around the wrong axis.
pub fn yaw_pitch_rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_faces_negative_z() {
        let t = Transform::default();
        assert!((t.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((t.transform_point(Vec3::Y) - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn positive_yaw_turns_left() {
        let t = Transform::from_yaw_pitch(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.0);
        // Facing -Z, a quarter turn counter-clockwise (seen from above) faces -X.
        assert!((t.forward() - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn positive_pitch_noses_up() {
        let t = Transform::from_yaw_pitch(Vec3::ZERO, 0.0, 0.3);
        assert!(t.forward().y > 0.0);
    }

    #[test]
    fn yaw_is_applied_in_world_space() {
        // Nosed up, a quarter yaw keeps the climb angle and swings the heading to -X.
        let pitch = 0.4;
        let fwd = yaw_pitch_rotation(std::f32::consts::FRAC_PI_2, pitch) * Vec3::NEG_Z;
        assert!((fwd.y - pitch.sin()).abs() < 1e-5);
        assert!((fwd.x + pitch.cos()).abs() < 1e-5);
        assert!(fwd.z.abs() < 1e-5);
    }

    #[test]
    fn transform_point_applies_rotation_then_offset() {
        let t = Transform::from_yaw_pitch(Vec3::new(10.0, 0.0, 0.0), std::f32::consts::PI, 0.0);
        let p = t.transform_point(Vec3::new(0.0, 8.0, 20.0));
        assert!((p - Vec3::new(10.0, 8.0, -20.0)).length() < 1e-4);
    }
}
