//! Third-person chase camera that trails the ship.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Reference frame rate the smoothing factors are expressed in.
const REFERENCE_HZ: f32 = 60.0;

/// Chase-camera tuning. Smoothing factors are "fraction of the remaining gap
/// closed per 60 Hz frame".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Offset from the ship in ship-local space while cruising.
    pub offset: Vec3,
    /// Offset while warping (higher and further back).
    pub warp_offset: Vec3,
    pub follow_smoothing: f32,
    /// Smaller than `follow_smoothing` so the camera lags more in warp.
    pub warp_follow_smoothing: f32,
    pub fov_degrees: f32,
    pub warp_fov_degrees: f32,
    pub fov_smoothing: f32,
    /// How far ahead of the ship the camera aims.
    pub look_ahead: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 8.0, 20.0),
            warp_offset: Vec3::new(0.0, 12.0, 40.0),
            follow_smoothing: 0.1,
            warp_follow_smoothing: 0.05,
            fov_degrees: 75.0,
            warp_fov_degrees: 110.0,
            fov_smoothing: 0.05,
            look_ahead: 10.0,
        }
    }
}

/// Convert a per-reference-frame lerp factor into one for an arbitrary `dt`,
/// so the camera converges at the same rate regardless of frame rate.
pub fn frame_smoothing(per_frame: f32, dt: f32) -> f32 {
    let per_frame = per_frame.clamp(0.0, 1.0);
    let frames = (dt * REFERENCE_HZ).max(0.0);
    1.0 - (1.0 - per_frame).powf(frames)
}

/// Camera state derived every frame from the ship transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    /// Point the camera looks at (slightly ahead of the ship).
    pub look_target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 30.0),
            look_target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl CameraRig {
    /// Where the camera wants to sit for the given ship pose.
    pub fn target_position(ship: &Transform, warping: bool, tuning: &CameraTuning) -> Vec3 {
        let offset = if warping { tuning.warp_offset } else { tuning.offset };
        ship.transform_point(offset)
    }

    /// Compute next frame's camera from the ship pose. Pure: `self` is untouched.
    pub fn follow(&self, ship: &Transform, warping: bool, dt: f32, tuning: &CameraTuning) -> Self {
        let target = Self::target_position(ship, warping, tuning);
        let follow = if warping {
            tuning.warp_follow_smoothing
        } else {
            tuning.follow_smoothing
        };
        let position = self.position.lerp(target, frame_smoothing(follow, dt));

        let target_fov = if warping {
            tuning.warp_fov_degrees
        } else {
            tuning.fov_degrees
        };
        let t = frame_smoothing(tuning.fov_smoothing, dt);
        let fov_degrees = self.fov_degrees + (target_fov - self.fov_degrees) * t;

        Self {
            position,
            look_target: ship.position + ship.forward() * tuning.look_ahead,
            fov_degrees,
            ..*self
        }
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn smoothing_matches_per_frame_factor_at_reference_rate() {
        assert!((frame_smoothing(0.1, DT) - 0.1).abs() < 1e-5);
        assert_eq!(frame_smoothing(0.1, 0.0), 0.0);
        // Two half-frames close the same gap as one full frame.
        let half = frame_smoothing(0.1, DT / 2.0);
        let combined = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((combined - 0.1).abs() < 1e-5);
    }

    #[test]
    fn camera_trails_behind_and_above_ship() {
        let tuning = CameraTuning::default();
        let ship = Transform::default();
        let mut rig = CameraRig::default();
        for _ in 0..600 {
            rig = rig.follow(&ship, false, DT, &tuning);
        }
        assert!((rig.position - Vec3::new(0.0, 8.0, 20.0)).length() < 0.01);
        // Looks ahead of the ship, not at it.
        assert!((rig.look_target - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn warp_pulls_camera_back_and_widens_fov() {
        let tuning = CameraTuning::default();
        let ship = Transform::default();
        let mut rig = CameraRig::default();
        for _ in 0..900 {
            rig = rig.follow(&ship, true, DT, &tuning);
        }
        assert!((rig.position - Vec3::new(0.0, 12.0, 40.0)).length() < 0.05);
        assert!((rig.fov_degrees - 110.0).abs() < 0.05);
    }

    #[test]
    fn warp_follow_lags_more_than_cruise() {
        let tuning = CameraTuning::default();
        let ship = Transform::from_yaw_pitch(Vec3::new(100.0, 0.0, 0.0), 0.0, 0.0);
        let rig = CameraRig::default();
        let cruise = rig.follow(&ship, false, DT, &tuning);
        let warp = rig.follow(&ship, true, DT, &tuning);
        let cruise_moved = (cruise.position - rig.position).length();
        let warp_moved = (warp.position - rig.position).length();
        assert!(warp_moved < cruise_moved);
    }

    #[test]
    fn fov_eases_toward_target() {
        let tuning = CameraTuning::default();
        let rig = CameraRig::default().follow(&Transform::default(), true, DT, &tuning);
        assert!(rig.fov_degrees > 75.0 && rig.fov_degrees < 110.0);
        assert!((rig.fov_degrees - (75.0 + 35.0 * 0.05)).abs() < 1e-3);
    }
}
