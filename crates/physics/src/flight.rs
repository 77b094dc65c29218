//! Arcade flight model: yaw/pitch steering, thrust, brake and warp.
//!
//! Forgiving by intent: no angular momentum, no lateral drift, speed is a
//! single scalar along the nose.

use engine_core::{yaw_pitch_rotation, Transform};
use glam::Vec3;
use input::{ControlAxis, ControlState};
use serde::{Deserialize, Serialize};

/// Acceleration / drag / top speed for one flight mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightProfile {
    /// Speed gained per second of thrust. Braking uses twice this.
    pub acceleration: f32,
    /// Speed lost per second when coasting.
    pub friction: f32,
    pub max_speed: f32,
}

impl FlightProfile {
    pub const CRUISE: FlightProfile = FlightProfile {
        acceleration: 20.0,
        friction: 2.0,
        max_speed: 30.0,
    };

    pub const WARP: FlightProfile = FlightProfile {
        acceleration: 150.0,
        friction: 1.0,
        max_speed: 300.0,
    };
}

/// Flight model tuning, loaded from the game config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub cruise: FlightProfile,
    pub warp: FlightProfile,
    /// Yaw rate in radians per second.
    pub yaw_rate: f32,
    /// Pitch rate in radians per second.
    pub pitch_rate: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            cruise: FlightProfile::CRUISE,
            warp: FlightProfile::WARP,
            yaw_rate: 2.0,
            pitch_rate: 1.0,
        }
    }
}

impl FlightTuning {
    pub fn profile(&self, warping: bool) -> &FlightProfile {
        if warping {
            &self.warp
        } else {
            &self.cruise
        }
    }
}

/// Ship kinematic state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightState {
    pub position: Vec3,
    /// Heading in radians, wrapped to [0, TAU).
    pub yaw: f32,
    /// Nose angle in radians, wrapped to [0, TAU). Loops are allowed.
    pub pitch: f32,
    /// Forward speed, never negative.
    pub speed: f32,
    pub warping: bool,
}

/// Result of advancing the flight model by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightStep {
    pub state: FlightState,
    /// `Some(new_flag)` only on the frame the warp flag flips.
    pub warp_changed: Option<bool>,
}

impl FlightState {
    pub fn transform(&self) -> Transform {
        Transform::from_yaw_pitch(self.position, self.yaw, self.pitch)
    }

    pub fn forward(&self) -> Vec3 {
        self.transform().forward()
    }

    /// Advance one frame. Pure: returns the next state instead of mutating.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn step(&self, controls: &ControlState, dt: f32, tuning: &FlightTuning) -> FlightStep {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let warping = controls.is_held(ControlAxis::Warp);
        let profile = tuning.profile(warping);

        // Opposite inputs cancel by being applied in sequence.
        let mut yaw = self.yaw;
        let mut pitch = self.pitch;
        if controls.is_held(ControlAxis::TurnLeft) {
            yaw += tuning.yaw_rate * dt;
        }
        if controls.is_held(ControlAxis::TurnRight) {
            yaw -= tuning.yaw_rate * dt;
        }
        if controls.is_held(ControlAxis::PitchUp) {
            pitch += tuning.pitch_rate * dt;
        }
        if controls.is_held(ControlAxis::PitchDown) {
            pitch -= tuning.pitch_rate * dt;
        }
        let yaw = yaw.rem_euclid(std::f32::consts::TAU);
        let pitch = pitch.rem_euclid(std::f32::consts::TAU);

        let mut speed = self.speed;
        if controls.is_held(ControlAxis::Thrust) || warping {
            speed = (speed + profile.acceleration * dt).min(profile.max_speed);
        } else if controls.is_held(ControlAxis::Brake) {
            speed = (speed - profile.acceleration * 2.0 * dt).max(0.0);
        } else {
            speed = (speed - profile.friction * dt).max(0.0);
        }
        // Dropping out of warp snaps to the cruise ceiling.
        let speed = speed.clamp(0.0, profile.max_speed);

        let forward = yaw_pitch_rotation(yaw, pitch) * Vec3::NEG_Z;
        let position = self.position + forward * speed * dt;

        FlightStep {
            state: FlightState {
                position,
                yaw,
                pitch,
                speed,
                warping,
            },
            warp_changed: (warping != self.warping).then_some(warping),
        }
    }
}

/// Sole owner of the ship state; everything else reads snapshots.
#[derive(Debug, Clone, Default)]
pub struct FlightController {
    state: FlightState,
    pub tuning: FlightTuning,
}

impl FlightController {
    pub fn new(tuning: FlightTuning) -> Self {
        Self {
            state: FlightState::default(),
            tuning,
        }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    /// Compute the next frame without committing it.
    pub fn preview(&self, controls: &ControlState, dt: f32) -> FlightStep {
        self.state.step(controls, dt, &self.tuning)
    }

    /// Commit a previously computed step.
    pub fn commit(&mut self, step: &FlightStep) {
        if let Some(warping) = step.warp_changed {
            log::debug!("Warp drive {}", if warping { "engaged" } else { "disengaged" });
        }
        self.state = step.state;
    }

    /// Advance and commit in one go.
    pub fn update(&mut self, controls: &ControlState, dt: f32) -> FlightStep {
        let step = self.preview(controls, dt);
        self.commit(&step);
        step
    }
}
