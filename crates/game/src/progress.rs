//! Player progression: scans, points, rank titles and quests.
//!
//! Only discrete actions mutate this state (selecting a market, confirming a
//! scan); the per-frame loop never touches it.

use procgen::{Market, MarketId};

/// Points granted the first time a market is scanned.
pub const SCAN_REWARD: u32 = 50;
/// Volume a market must exceed for the whale quest.
pub const HIGH_VOLUME_THRESHOLD: u64 = 500_000;

/// Rank titles by minimum points, ascending.
pub const RANK_TABLE: [(u32, &str); 4] = [
    (0, "Rookie Rover"),
    (100, "Star Cadet"),
    (500, "Galactic Voyager"),
    (1000, "Cosmic Oracle"),
];

/// Rank title for a points total. Monotonic in `points`.
pub fn rank_title(points: u32) -> &'static str {
    RANK_TABLE
        .iter()
        .rev()
        .find(|(min, _)| points >= *min)
        .map_or(RANK_TABLE[0].1, |(_, title)| *title)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestType {
    Explore,
    Predict,
}

/// How a scan advances a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestObjective {
    /// +1 per distinct market scanned.
    VisitMarkets,
    /// Satisfied in one step by scanning a market whose volume exceeds `min_volume`.
    HighVolume { min_volume: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target: u32,
    pub progress: u32,
    pub completed: bool,
    pub reward: u32,
    pub quest_type: QuestType,
    pub objective: QuestObjective,
}

impl Quest {
    /// Quest state after `market` is scanned. Completed quests are returned unchanged.
    pub fn advanced_by(&self, market: &Market) -> Quest {
        if self.completed {
            return self.clone();
        }
        let progress = match self.objective {
            QuestObjective::VisitMarkets => self.progress.saturating_add(1),
            QuestObjective::HighVolume { min_volume } if market.volume > min_volume => {
                self.progress.max(1)
            }
            QuestObjective::HighVolume { .. } => self.progress,
        };
        Quest {
            progress,
            completed: progress >= self.target,
            ..self.clone()
        }
    }

    /// Progress toward the target in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.target == 0 {
            return 1.0;
        }
        (self.progress as f32 / self.target as f32).min(1.0)
    }
}

/// The quest log every session starts with.
pub fn initial_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: "q1".into(),
            title: "Void Explorer".into(),
            description: "Fly to and analyze 3 different markets.".into(),
            target: 3,
            progress: 0,
            completed: false,
            reward: 150,
            quest_type: QuestType::Explore,
            objective: QuestObjective::VisitMarkets,
        },
        Quest {
            id: "q2".into(),
            title: "Whale Watcher".into(),
            description: "Find a market with over $500k volume.".into(),
            target: 1,
            progress: 0,
            completed: false,
            reward: 300,
            quest_type: QuestType::Explore,
            objective: QuestObjective::HighVolume {
                min_volume: HIGH_VOLUME_THRESHOLD,
            },
        },
    ]
}

/// Player profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub level: u32,
    pub points: u32,
    pub title: &'static str,
    /// Scanned markets in scan order; each id appears once.
    pub scanned: Vec<MarketId>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            level: 1,
            points: 0,
            title: rank_title(0),
            scanned: Vec::new(),
        }
    }
}

impl PlayerState {
    pub fn has_scanned(&self, id: MarketId) -> bool {
        self.scanned.contains(&id)
    }
}

/// What a successful scan changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub market: MarketId,
    pub points_awarded: u32,
    pub total_points: u32,
    pub title: &'static str,
    pub rank_changed: bool,
    /// Ids of quests that completed with this scan.
    pub completed_quests: Vec<String>,
}

/// Authoritative non-visual game state.
#[derive(Debug, Clone)]
pub struct GameProgress {
    player: PlayerState,
    quests: Vec<Quest>,
    selected: Option<MarketId>,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new(initial_quests())
    }
}

impl GameProgress {
    pub fn new(quests: Vec<Quest>) -> Self {
        Self {
            player: PlayerState::default(),
            quests,
            selected: None,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Market focused in the detail panel.
    pub fn selected(&self) -> Option<MarketId> {
        self.selected
    }

    pub fn is_scanned(&self, id: MarketId) -> bool {
        self.player.has_scanned(id)
    }

    /// Focus `market` for detail display. Player state is untouched.
    pub fn select_market(&mut self, market: &Market) {
        self.selected = Some(market.id);
    }

    /// Close the detail panel.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Record a scan of `market`. Returns `None` (and changes nothing) when
    /// the market was already scanned.
    pub fn confirm_scan(&mut self, market: &Market) -> Option<ScanReport> {
        if self.player.has_scanned(market.id) {
            return None;
        }

        let points = self.player.points.saturating_add(SCAN_REWARD);
        let title = rank_title(points);
        let mut scanned = self.player.scanned.clone();
        scanned.push(market.id);
        let player = PlayerState {
            points,
            title,
            scanned,
            ..self.player.clone()
        };

        let quests: Vec<Quest> = self.quests.iter().map(|q| q.advanced_by(market)).collect();
        let completed_quests: Vec<String> = quests
            .iter()
            .zip(&self.quests)
            .filter(|(new, old)| new.completed && !old.completed)
            .map(|(new, _)| new.id.clone())
            .collect();

        let report = ScanReport {
            market: market.id,
            points_awarded: SCAN_REWARD,
            total_points: points,
            title,
            rank_changed: title != self.player.title,
            completed_quests,
        };

        // Commit both bundles together so readers never see half a scan.
        self.player = player;
        self.quests = quests;
        log::info!(
            "Scanned {} (+{} pts, {} total, {})",
            market.id,
            SCAN_REWARD,
            points,
            title
        );
        Some(report)
    }
}
