//! Market universe generation: prediction markets placed as planets in
//! category sectors.

use std::fmt;

use chrono::{DateTime, Utc};
use glam::Vec3;
use rand::prelude::*;

/// Radius of the shell each market is scattered on around its sector base.
pub const SECTOR_SPREAD: f32 = 40.0;
/// Markets closer than this to an already placed market are re-rolled.
pub const MIN_SEPARATION: f32 = 15.0;
/// Placement attempts before a too-close position is accepted anyway.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;
/// Inclusive lower bound of generated volume.
pub const VOLUME_MIN: u64 = 5_000;
/// Number of distinct volume values (volume < VOLUME_MIN + VOLUME_SPAN).
pub const VOLUME_SPAN: u64 = 1_000_000;
/// Upper bound of the end-date offset, in milliseconds (about 115 days).
const END_DATE_SPAN_MS: i64 = 10_000_000_000;
/// Ship distance under which a planet is flagged "in range" for highlighting.
pub const NEARBY_DISTANCE: f32 = 20.0;
/// Smallest planet radius; busier markets grow with log10(volume).
const MIN_PLANET_SIZE: f32 = 1.5;

/// Market category; each one owns a sector of space and a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketCategory {
    Btc,
    Eth,
    Sol,
    Defi,
    Nft,
    Politics,
    Sports,
}

impl MarketCategory {
    pub const ALL: [MarketCategory; 7] = [
        MarketCategory::Btc,
        MarketCategory::Eth,
        MarketCategory::Sol,
        MarketCategory::Defi,
        MarketCategory::Nft,
        MarketCategory::Politics,
        MarketCategory::Sports,
    ];

    /// Ticker-style label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            MarketCategory::Btc => "BTC",
            MarketCategory::Eth => "ETH",
            MarketCategory::Sol => "SOL",
            MarketCategory::Defi => "DEFI",
            MarketCategory::Nft => "NFT",
            MarketCategory::Politics => "POLITICS",
            MarketCategory::Sports => "SPORTS",
        }
    }

    /// Center of this category's sector. Sectors are far enough apart that
    /// each category reads as its own galaxy.
    pub fn sector_base(self) -> Vec3 {
        match self {
            MarketCategory::Btc => Vec3::new(100.0, 0.0, 0.0),
            MarketCategory::Eth => Vec3::new(-80.0, 40.0, 40.0),
            MarketCategory::Sol => Vec3::new(0.0, -100.0, 50.0),
            MarketCategory::Defi => Vec3::new(60.0, -60.0, -60.0),
            MarketCategory::Nft => Vec3::new(-50.0, 80.0, -30.0),
            MarketCategory::Politics => Vec3::new(0.0, 150.0, 0.0),
            MarketCategory::Sports => Vec3::new(120.0, -50.0, 100.0),
        }
    }

    /// Display color (sRGB).
    pub fn color(self) -> [u8; 3] {
        match self {
            MarketCategory::Btc => [0xF7, 0x93, 0x1A],
            MarketCategory::Eth => [0x62, 0x7E, 0xEA],
            MarketCategory::Sol => [0x14, 0xF1, 0x95],
            MarketCategory::Defi => [0xE9, 0x1E, 0x63],
            MarketCategory::Nft => [0x9C, 0x27, 0xB0],
            MarketCategory::Politics => [0xFF, 0xD7, 0x00],
            MarketCategory::Sports => [0xFF, 0x45, 0x00],
        }
    }
}

impl fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unique market identifier. Displays as `mkt-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarketId(pub u32);

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mkt-{}", self.0)
    }
}

/// A prediction market rendered as a planet. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub id: MarketId,
    pub category: MarketCategory,
    pub volume: u64,
    /// Probability-like price of the YES outcome, in [0, 1].
    pub yes_price: f32,
    pub question: String,
    pub description: String,
    pub end_date: String,
    pub position: Vec3,
    pub color: [u8; 3],
}

/// Cosmetic planet traits derived from a market.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetTraits {
    /// Planet radius, `max(1.5, log10(volume) / 2.5)`.
    pub size: f32,
    pub has_rings: bool,
    pub is_gas_giant: bool,
    /// Green when the market leans YES, red otherwise.
    pub glow_color: [u8; 3],
}

impl Market {
    /// YES share as a whole percentage.
    pub fn yes_percent(&self) -> u8 {
        (self.yes_price.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn no_percent(&self) -> u8 {
        100 - self.yes_percent()
    }

    /// Whether the ship is close enough for the "in range" highlight.
    pub fn is_nearby(&self, ship: Vec3) -> bool {
        self.position.distance(ship) < NEARBY_DISTANCE
    }

    pub fn traits(&self) -> PlanetTraits {
        PlanetTraits {
            size: ((self.volume.max(1) as f32).log10() / 2.5).max(MIN_PLANET_SIZE),
            has_rings: self.id.0 % 3 == 0,
            is_gas_giant: self.id.0 % 2 == 0,
            glow_color: if self.yes_price > 0.5 {
                [0x0A, 0xFF, 0x68]
            } else {
                [0xFF, 0x2A, 0x2A]
            },
        }
    }
}

/// The generated set of markets for a session.
#[derive(Debug, Clone)]
pub struct MarketUniverse {
    pub seed: u64,
    pub markets: Vec<Market>,
}

impl MarketUniverse {
    /// Generate `count` markets from `seed`, dated relative to now.
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let markets = generate_markets(&mut rng, count, Utc::now());
        Self { seed, markets }
    }

    /// Look up a market by id.
    pub fn get(&self, id: MarketId) -> Option<&Market> {
        self.markets.iter().find(|m| m.id == id)
    }
}

/// Generate `count` markets using `rng`. End dates are offsets from `now`.
///
/// Placement is best-effort: a market that cannot find a spot at least
/// [`MIN_SEPARATION`] away from the others within [`MAX_PLACEMENT_ATTEMPTS`]
/// keeps its last candidate position.
pub fn generate_markets<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<Market> {
    let mut markets: Vec<Market> = Vec::with_capacity(count);
    let mut crowded = 0usize;

    for i in 0..count {
        let category = MarketCategory::ALL[rng.gen_range(0..MarketCategory::ALL.len())];
        let volume = VOLUME_MIN + rng.gen_range(0..VOLUME_SPAN);
        let yes_price = rng.gen::<f32>();

        let base = category.sector_base();
        let mut attempts = 0;
        let position = loop {
            let candidate = base + random_on_sphere(rng, SECTOR_SPREAD);
            attempts += 1;
            if !too_close(candidate, &markets, MIN_SEPARATION) {
                break candidate;
            }
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                crowded += 1;
                break candidate;
            }
        };

        let offset_ms = rng.gen_range(0..END_DATE_SPAN_MS);
        let end_date = (now + chrono::Duration::milliseconds(offset_ms))
            .format("%-m/%-d/%Y")
            .to_string();

        markets.push(Market {
            id: MarketId(i as u32),
            category,
            volume,
            yes_price,
            question: generate_question(rng, category),
            description: format!(
                "Market regarding {} outcomes. Resolves based on official data sources.",
                category.label().to_lowercase()
            ),
            end_date,
            position,
            color: category.color(),
        });
    }

    log::info!(
        "Generated {} markets across {} sectors ({} placed without full separation)",
        markets.len(),
        MarketCategory::ALL.len(),
        crowded
    );
    markets
}

/// Uniformly distributed point on a sphere of `radius` around the origin.
fn random_on_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * std::f32::consts::TAU;
    let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

fn too_close(pos: Vec3, placed: &[Market], min_distance: f32) -> bool {
    placed.iter().any(|m| m.position.distance(pos) < min_distance)
}

fn generate_question<R: Rng + ?Sized>(rng: &mut R, category: MarketCategory) -> String {
    match category {
        MarketCategory::Politics => {
            let candidates = ["Candidate A", "Candidate B", "The Incumbent"];
            let who = candidates[rng.gen_range(0..candidates.len())];
            format!("Will {} win the election?", who)
        }
        MarketCategory::Sports => {
            let teams = ["Lions", "Eagles", "Sharks", "Dragons"];
            let team = teams[rng.gen_range(0..teams.len())];
            format!("Will the {} win the championship?", team)
        }
        _ => {
            let target = rng.gen::<f64>() * 5000.0 + 100.0;
            format!("Will {} hit ${:.2} by Q4?", category, target)
        }
    }
}
