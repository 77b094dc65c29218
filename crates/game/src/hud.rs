//! HUD (Heads-Up Display) data: profile card, quest log, radar minimap,
//! proximity prompt and market panel.
//!
//! Everything here is derived; a renderer draws it and throws it away.

use glam::Vec3;
use physics::FlightState;
use procgen::{Market, MarketId, PlanetTraits};

use crate::progress::GameProgress;
use crate::state::InteractPrompt;

/// World units from the ship to the radar edge.
pub const RADAR_RANGE: f32 = 200.0;
/// Points per XP bar fill.
const XP_BAR_SPAN: u32 = 500;

/// Profile card in the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCard {
    pub title: &'static str,
    pub level: u32,
    pub points: u32,
    /// Fill of the XP bar in [0, 1).
    pub xp_fraction: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestRow {
    pub title: String,
    pub description: String,
    pub progress_fraction: f32,
    pub completed: bool,
}

/// A market dot on the radar, in percent of the radar's width/height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapBlip {
    pub market: MarketId,
    pub x_percent: f32,
    pub y_percent: f32,
    pub color: [u8; 3],
    /// Ship is close enough for the planet's "in range" highlight.
    pub nearby: bool,
}

/// "Target lock" banner shown while a market is in range and no panel is open.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityPrompt {
    pub market: MarketId,
    pub headline: String,
    pub prompt: InteractPrompt,
}

/// Detail panel for the selected market.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPanel {
    pub market: MarketId,
    pub category: &'static str,
    pub question: String,
    pub description: String,
    pub volume: u64,
    pub end_date: String,
    pub yes_percent: u8,
    pub no_percent: u8,
    pub scanned: bool,
    /// Planet look (size, rings, glow) for the panel's preview.
    pub planet: PlanetTraits,
}

impl MarketPanel {
    pub fn from_market(market: &Market, scanned: bool) -> Self {
        Self {
            market: market.id,
            category: market.category.label(),
            question: market.question.clone(),
            description: market.description.clone(),
            volume: market.volume,
            end_date: market.end_date.clone(),
            yes_percent: market.yes_percent(),
            no_percent: market.no_percent(),
            scanned,
            planet: market.traits(),
        }
    }
}

/// All HUD data for a frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudData {
    pub profile: ProfileCard,
    pub quests: Vec<QuestRow>,
    pub minimap: Vec<MinimapBlip>,
    pub proximity: Option<ProximityPrompt>,
    pub panel: Option<MarketPanel>,
    pub impact_alert: bool,
    pub speed: f32,
    pub warping: bool,
}

impl HudData {
    /// Assemble the HUD from the latest committed state.
    pub fn build(
        progress: &GameProgress,
        ship: &FlightState,
        markets: &[Market],
        nearest: Option<&Market>,
        impact_alert: bool,
    ) -> Self {
        let player = progress.player();
        let selected = progress
            .selected()
            .and_then(|id| markets.iter().find(|m| m.id == id));

        Self {
            profile: ProfileCard {
                title: player.title,
                level: player.level,
                points: player.points,
                xp_fraction: (player.points % XP_BAR_SPAN) as f32 / XP_BAR_SPAN as f32,
            },
            quests: progress
                .quests()
                .iter()
                .map(|q| QuestRow {
                    title: q.title.clone(),
                    description: q.description.clone(),
                    progress_fraction: q.fraction(),
                    completed: q.completed,
                })
                .collect(),
            minimap: minimap_blips(ship.position, markets, RADAR_RANGE),
            proximity: match (nearest, selected) {
                (Some(market), None) => Some(ProximityPrompt {
                    market: market.id,
                    headline: format!("TARGET LOCK: {}", market.category),
                    prompt: InteractPrompt::new("Access Market Data"),
                }),
                _ => None,
            },
            panel: selected.map(|m| MarketPanel::from_market(m, progress.is_scanned(m.id))),
            impact_alert,
            speed: ship.speed,
            warping: ship.warping,
        }
    }
}

/// Map a world coordinate onto the radar axis: the ship sits at 50%, the
/// radar edge is `range` away.
pub fn radar_coord(value: f32, center: f32, range: f32) -> f32 {
    50.0 + (value - center) / range * 50.0
}

/// Top-down radar: world X maps to radar X, world Z to radar Y. Markets
/// outside the square are dropped.
pub fn minimap_blips(ship: Vec3, markets: &[Market], range: f32) -> Vec<MinimapBlip> {
    markets
        .iter()
        .filter_map(|market| {
            let x = radar_coord(market.position.x, ship.x, range);
            let y = radar_coord(market.position.z, ship.z, range);
            let inside = (0.0..=100.0).contains(&x) && (0.0..=100.0).contains(&y);
            inside.then_some(MinimapBlip {
                market: market.id,
                x_percent: x,
                y_percent: y,
                color: market.color,
                nearby: market.is_nearby(ship),
            })
        })
        .collect()
}
