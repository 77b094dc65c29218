//! One play session: owns the world, the ship and the progress state, and
//! advances them one frame at a time.
//!
//! A tick computes everything from the previous frame's committed state and
//! commits it all at the end, so no reader ever sees a half-updated frame.

use std::time::Duration;

use engine_core::{CameraRig, CameraTuning, Time};
use input::ControlState;
use physics::{FlightController, FlightState, NearestTracker, ProximityReport, ProximityTuning};
use procgen::{Market, MarketId, MarketUniverse, ObstacleField};

use crate::config::GameConfig;
use crate::events::SimEvent;
use crate::hud::HudData;
use crate::progress::{GameProgress, ScanReport};
use crate::state::{CollisionAlert, GameMessages};

/// Longest frame the simulation will integrate in one tick (seconds).
/// Stalls longer than this are clipped so the ship never tunnels through rocks.
pub const MAX_FRAME_DT: f32 = 0.25;

pub struct Session {
    universe: MarketUniverse,
    obstacles: ObstacleField,
    flight: FlightController,
    camera: CameraRig,
    camera_tuning: CameraTuning,
    proximity_tuning: ProximityTuning,
    tracker: NearestTracker,
    last_report: ProximityReport,
    alert: CollisionAlert,
    progress: GameProgress,
    messages: GameMessages,
    time: Time,
}

impl Session {
    /// Generate a fresh world from `config`. Uses the configured seed when
    /// present, otherwise a random one.
    pub fn new(config: &GameConfig) -> Self {
        let seed = config.world.seed.unwrap_or_else(rand::random);
        let universe = MarketUniverse::generate(seed, config.world.market_count);
        let obstacles = ObstacleField::generate(seed.wrapping_add(1), config.world.obstacle_count);
        log::info!(
            "World seed {}: {} markets, {} asteroids",
            seed,
            universe.markets.len(),
            obstacles.len()
        );
        Self::with_world(config, universe, obstacles)
    }

    /// Start a session in an already built world.
    pub fn with_world(config: &GameConfig, universe: MarketUniverse, obstacles: ObstacleField) -> Self {
        Self {
            universe,
            obstacles,
            flight: FlightController::new(config.flight),
            camera: CameraRig {
                fov_degrees: config.camera.fov_degrees,
                ..CameraRig::default()
            },
            camera_tuning: config.camera,
            proximity_tuning: config.proximity,
            tracker: NearestTracker::default(),
            last_report: ProximityReport::default(),
            alert: CollisionAlert::new(&config.alerts),
            progress: GameProgress::default(),
            messages: GameMessages::new(),
            time: Time::new(),
        }
    }

    /// Advance one frame with the controls held during it.
    pub fn tick(&mut self, controls: &ControlState, dt: f32) -> Vec<SimEvent> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };

        // Compute from last frame's committed state.
        let step = self.flight.preview(controls, dt);
        let ship = step.state.transform();
        let camera = self
            .camera
            .follow(&ship, step.state.warping, dt, &self.camera_tuning);
        let report = physics::scan(
            step.state.position,
            &self.universe.markets,
            &self.obstacles,
            &self.proximity_tuning,
        );
        let nearest_change = self.tracker.diff(report.nearest);
        let now = self.time.elapsed_seconds() + dt;

        let mut events = vec![SimEvent::ShipMoved {
            position: step.state.position,
        }];
        if let Some(warping) = step.warp_changed {
            events.push(SimEvent::WarpChanged { warping });
        }
        if let Some(change) = nearest_change {
            events.push(SimEvent::NearestMarketChanged {
                previous: change.previous,
                current: change.current,
            });
        }
        if let Some(hit) = report.collision {
            events.push(SimEvent::Collision { obstacle: hit.index });
        }

        // Commit.
        self.flight.commit(&step);
        self.camera = camera;
        self.tracker.observe(report.nearest);
        self.last_report = report;
        self.time.advance(Duration::from_secs_f32(dt));

        self.alert.update(dt);
        if report.collision.is_some() && self.alert.on_collision(now) {
            events.push(SimEvent::ImpactAlert);
            self.messages.warning("IMPACT WARNING");
        }
        if step.warp_changed == Some(true) {
            self.messages.info("WARP DRIVE ENGAGED");
        }
        if let Some(market) = nearest_change
            .and_then(|c| c.current)
            .and_then(|id| self.universe.get(id))
        {
            self.messages
                .info(format!("TARGET LOCK: {}", market.category));
        }
        self.messages.update(dt);

        events
    }

    /// Focus the market in range, replacing any open panel. Returns false
    /// when nothing is in range.
    pub fn interact(&mut self) -> bool {
        match self.tracker.current().and_then(|id| self.universe.get(id)) {
            Some(market) => {
                self.progress.select_market(market);
                true
            }
            None => false,
        }
    }

    /// Focus any market by id (e.g. clicked on the radar).
    pub fn select_market(&mut self, id: MarketId) -> bool {
        match self.universe.get(id) {
            Some(market) => {
                self.progress.select_market(market);
                true
            }
            None => false,
        }
    }

    pub fn close_panel(&mut self) {
        self.progress.clear_selection();
    }

    /// Scan the selected market. `None` when nothing is selected or the
    /// market was already scanned.
    pub fn confirm_scan(&mut self) -> Option<ScanReport> {
        let id = self.progress.selected()?;
        let market = self.universe.get(id)?;
        let report = self.progress.confirm_scan(market)?;

        self.messages
            .success(format!("Analysis complete: +{} pts", report.points_awarded));
        if report.rank_changed {
            self.messages.success(format!("Rank up: {}", report.title));
        }
        for quest in self
            .progress
            .quests()
            .iter()
            .filter(|q| report.completed_quests.contains(&q.id))
        {
            self.messages
                .success(format!("Quest complete: {} (+{} reward)", quest.title, quest.reward));
        }
        Some(report)
    }

    pub fn ship(&self) -> &FlightState {
        self.flight.state()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn markets(&self) -> &[Market] {
        &self.universe.markets
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn seed(&self) -> u64 {
        self.universe.seed
    }

    /// Market in interaction range as of the last tick.
    pub fn nearest(&self) -> Option<&Market> {
        self.tracker.current().and_then(|id| self.universe.get(id))
    }

    pub fn last_report(&self) -> &ProximityReport {
        &self.last_report
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    pub fn messages(&self) -> &GameMessages {
        &self.messages
    }

    pub fn alert_active(&self) -> bool {
        self.alert.is_active()
    }

    /// Ticks simulated so far.
    pub fn frames(&self) -> u64 {
        self.time.frame_count()
    }

    /// Simulated seconds since the session started.
    pub fn elapsed(&self) -> f32 {
        self.time.elapsed_seconds()
    }

    pub fn hud(&self) -> HudData {
        HudData::build(
            &self.progress,
            self.ship(),
            self.markets(),
            self.nearest(),
            self.alert_active(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use input::ControlAxis;
    use procgen::Obstacle;

    const DT: f32 = 1.0 / 60.0;

    fn session_with(markets: &[Vec3], obstacles: Vec<Obstacle>) -> Session {
        let mut universe = MarketUniverse::generate(5, markets.len());
        for (m, p) in universe.markets.iter_mut().zip(markets) {
            m.position = *p;
        }
        Session::with_world(
            &GameConfig::default(),
            universe,
            ObstacleField::from_obstacles(obstacles),
        )
    }

    fn notable(events: &[SimEvent]) -> Vec<SimEvent> {
        events.iter().copied().filter(SimEvent::is_notable).collect()
    }

    #[test]
    fn configured_seed_is_reproducible() {
        let mut config = GameConfig::default();
        config.world.seed = Some(77);
        let a = Session::new(&config);
        let b = Session::new(&config);
        assert_eq!(a.seed(), 77);
        let layout = |s: &Session| s.markets().iter().map(|m| (m.id, m.position)).collect::<Vec<_>>();
        assert_eq!(layout(&a), layout(&b));
        assert_eq!(a.obstacles().len(), 500);
    }

    #[test]
    fn idle_tick_only_moves() {
        let mut session = session_with(&[], Vec::new());
        let events = session.tick(&ControlState::idle(), DT);
        assert_eq!(events, vec![SimEvent::ShipMoved { position: Vec3::ZERO }]);
    }

    #[test]
    fn warp_change_fires_once_per_edge() {
        let mut session = session_with(&[], Vec::new());
        let warp = ControlState::from_held(&[ControlAxis::Warp]);
        let mut changes = Vec::new();
        for _ in 0..5 {
            changes.extend(notable(&session.tick(&warp, DT)));
        }
        for _ in 0..5 {
            changes.extend(notable(&session.tick(&ControlState::idle(), DT)));
        }
        assert_eq!(
            changes,
            vec![
                SimEvent::WarpChanged { warping: true },
                SimEvent::WarpChanged { warping: false },
            ]
        );
        assert!(session.ship().speed <= session.flight.tuning.cruise.max_speed);
    }

    #[test]
    fn nearest_change_reported_only_on_change() {
        let mut session = session_with(&[Vec3::new(0.0, 0.0, -10.0)], Vec::new());
        let id = session.markets()[0].id;
        let first = notable(&session.tick(&ControlState::idle(), DT));
        assert_eq!(
            first,
            vec![SimEvent::NearestMarketChanged {
                previous: None,
                current: Some(id),
            }]
        );
        assert!(notable(&session.tick(&ControlState::idle(), DT)).is_empty());
        assert_eq!(session.nearest().map(|m| m.id), Some(id));
        assert_eq!(session.messages().visible().len(), 1);
    }

    #[test]
    fn interact_needs_market_in_range() {
        let mut session = session_with(&[Vec3::new(0.0, 0.0, -100.0)], Vec::new());
        session.tick(&ControlState::idle(), DT);
        assert!(!session.interact());

        let mut session = session_with(&[Vec3::new(0.0, 0.0, -10.0)], Vec::new());
        session.tick(&ControlState::idle(), DT);
        assert!(session.interact());
        assert!(session.interact());
        assert!(session.hud().proximity.is_none());
        assert!(session.hud().panel.is_some());
    }

    #[test]
    fn interact_refocuses_open_panel_on_market_in_range() {
        let mut session = session_with(
            &[Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, -500.0)],
            Vec::new(),
        );
        let near = session.markets()[0].id;
        let far = session.markets()[1].id;
        assert!(session.select_market(far));

        session.tick(&ControlState::idle(), DT);
        assert!(session.interact());
        assert_eq!(session.progress().selected(), Some(near));
        assert_eq!(session.hud().panel.map(|p| p.market), Some(near));
    }

    #[test]
    fn scanning_through_session_is_idempotent() {
        let mut session = session_with(&[Vec3::new(0.0, 0.0, -10.0)], Vec::new());
        assert!(session.confirm_scan().is_none());

        session.tick(&ControlState::idle(), DT);
        session.interact();
        let report = session.confirm_scan().expect("first scan");
        assert_eq!(report.total_points, 50);
        assert!(session.confirm_scan().is_none());
        assert_eq!(session.progress().player().points, 50);

        session.close_panel();
        assert_eq!(session.progress().selected(), None);
        assert!(session.hud().proximity.is_some());
    }

    #[test]
    fn select_unknown_market_is_ignored() {
        let mut session = session_with(&[Vec3::ZERO], Vec::new());
        assert!(!session.select_market(MarketId(999)));
        assert!(session.select_market(session.markets()[0].id));
    }

    #[test]
    fn collisions_repeat_but_alert_is_debounced() {
        let rock = Obstacle {
            position: Vec3::ZERO,
            scale: 1.0,
            rotation: Quat::IDENTITY,
        };
        let mut session = session_with(&[], vec![rock]);
        let mut collisions = 0;
        let mut alerts = 0;
        for _ in 0..60 {
            for event in session.tick(&ControlState::idle(), DT) {
                match event {
                    SimEvent::Collision { obstacle } => {
                        assert_eq!(obstacle, 0);
                        collisions += 1;
                    }
                    SimEvent::ImpactAlert => alerts += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(collisions, 60);
        assert_eq!(alerts, 2);
    }

    #[test]
    fn alert_clears_after_leaving_rock() {
        let rock = Obstacle {
            position: Vec3::ZERO,
            scale: 1.0,
            rotation: Quat::IDENTITY,
        };
        let mut session = session_with(&[], vec![rock]);
        session.tick(&ControlState::idle(), DT);
        assert!(session.alert_active());
        let thrust = ControlState::from_held(&[ControlAxis::Thrust]);
        for _ in 0..120 {
            session.tick(&thrust, DT);
        }
        assert!(session.last_report().collision.is_none());
        assert!(!session.alert_active());
    }

    #[test]
    fn long_frames_are_clipped() {
        let mut session = session_with(&[], Vec::new());
        session.tick(&ControlState::idle(), 10.0);
        assert!((session.elapsed() - MAX_FRAME_DT).abs() < 1e-4);
        session.tick(&ControlState::idle(), f32::NAN);
        assert!((session.elapsed() - MAX_FRAME_DT).abs() < 1e-4);
        assert_eq!(session.frames(), 2);
    }

    #[test]
    fn camera_trails_ship() {
        let mut session = session_with(&[], Vec::new());
        let thrust = ControlState::from_held(&[ControlAxis::Thrust]);
        for _ in 0..120 {
            session.tick(&thrust, DT);
        }
        let ship = session.ship().position;
        assert!(ship.z < 0.0);
        assert!(session.camera().position.z > ship.z);
        assert!(session.camera().look_target.z < ship.z);
    }
}
