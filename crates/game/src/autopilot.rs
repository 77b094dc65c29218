//! Scripted pilot for the headless demo: flies to the closest unscanned
//! market, opens it, scans it, closes the panel, repeats.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use input::{ControlAxis, ControlState};
use procgen::MarketId;

use crate::events::SimEvent;
use crate::session::Session;

/// Heading error (radians) under which the pilot opens the throttle.
const ALIGN_TOLERANCE: f32 = 0.5;
/// Heading error under which warp is allowed.
const WARP_TOLERANCE: f32 = 0.1;
/// Warp only for long hauls.
const WARP_DISTANCE: f32 = 120.0;
const APPROACH_DISTANCE: f32 = 15.0;
const BRAKE_DISTANCE: f32 = 20.0;
const BRAKE_SPEED: f32 = 2.0;
/// Misaligned turns above this speed brake to keep the turning circle tight.
const TURN_SPEED: f32 = 10.0;

/// What the pilot wants to do this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PilotCommand {
    pub controls: ControlState,
    pub interact: bool,
    pub scan: bool,
    pub close_panel: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    target: Option<MarketId>,
}

/// Wrap an angle to [-PI, PI).
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Yaw and pitch that point the ship's nose along `dir`.
fn heading_to(dir: Vec3) -> (f32, f32) {
    let dir = dir.normalize_or_zero();
    ((-dir.x).atan2(-dir.z), dir.y.clamp(-1.0, 1.0).asin())
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<MarketId> {
        self.target
    }

    /// Decide this frame's command from the session's committed state.
    pub fn command(&mut self, session: &Session) -> PilotCommand {
        let progress = session.progress();
        let brake = ControlState::from_held(&[ControlAxis::Brake]);

        if let Some(selected) = progress.selected() {
            let scanned = progress.is_scanned(selected);
            return PilotCommand {
                controls: brake,
                scan: !scanned,
                close_panel: scanned,
                ..PilotCommand::default()
            };
        }

        if let Some(nearest) = session.nearest() {
            if !progress.is_scanned(nearest.id) {
                self.target = Some(nearest.id);
                return PilotCommand {
                    controls: brake,
                    interact: true,
                    ..PilotCommand::default()
                };
            }
        }

        let ship = session.ship();
        let still_valid = self.target.is_some_and(|id| !progress.is_scanned(id));
        if !still_valid {
            self.target = session
                .markets()
                .iter()
                .filter(|m| !progress.is_scanned(m.id))
                .min_by(|a, b| {
                    a.position
                        .distance_squared(ship.position)
                        .total_cmp(&b.position.distance_squared(ship.position))
                })
                .map(|m| m.id);
            if let Some(id) = self.target {
                log::debug!("Autopilot heading for {}", id);
            }
        }

        let Some(target) = self
            .target
            .and_then(|id| session.markets().iter().find(|m| m.id == id))
        else {
            return PilotCommand {
                controls: brake,
                ..PilotCommand::default()
            };
        };

        let to_target = target.position - ship.position;
        let distance = to_target.length();
        let (yaw, pitch) = heading_to(to_target);
        let yaw_error = wrap_angle(yaw - ship.yaw);
        let pitch_error = wrap_angle(pitch - ship.pitch);
        let misalignment = yaw_error.abs().max(pitch_error.abs());

        let mut controls = ControlState::idle();
        if yaw_error.abs() > 0.01 {
            let axis = if yaw_error > 0.0 {
                ControlAxis::TurnLeft
            } else {
                ControlAxis::TurnRight
            };
            controls.set(axis, true);
        }
        if pitch_error.abs() > 0.01 {
            let axis = if pitch_error > 0.0 {
                ControlAxis::PitchUp
            } else {
                ControlAxis::PitchDown
            };
            controls.set(axis, true);
        }

        if distance < BRAKE_DISTANCE && ship.speed > BRAKE_SPEED {
            controls.set(ControlAxis::Brake, true);
        } else if misalignment < ALIGN_TOLERANCE {
            if distance > APPROACH_DISTANCE {
                controls.set(ControlAxis::Thrust, true);
            }
            if distance > WARP_DISTANCE && misalignment < WARP_TOLERANCE {
                controls.set(ControlAxis::Warp, true);
            }
        } else if ship.speed > TURN_SPEED {
            controls.set(ControlAxis::Brake, true);
        }

        PilotCommand {
            controls,
            ..PilotCommand::default()
        }
    }

    /// Run one frame: decide, tick the session, then apply discrete actions.
    pub fn drive(&mut self, session: &mut Session, dt: f32) -> Vec<SimEvent> {
        let command = self.command(session);
        let events = session.tick(&command.controls, dt);
        if command.interact {
            session.interact();
        }
        if command.scan {
            session.confirm_scan();
        }
        if command.close_panel {
            session.close_panel();
        }
        events
    }
}
