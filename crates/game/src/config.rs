//! Game configuration (world size, flight feel, camera, alerts, demo run).
//! Loaded from `starmarket.ron` at startup.

use engine_core::CameraTuning;
use physics::{FlightTuning, ProximityTuning};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the current directory.
pub const CONFIG_FILE: &str = "starmarket.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Size and seeding of the generated universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub market_count: usize,
    pub obstacle_count: usize,
    /// Fixed world seed; a fresh random seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            market_count: 50,
            obstacle_count: procgen::OBSTACLE_COUNT,
            seed: None,
        }
    }
}

/// Impact alert timing, in seconds of simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Minimum gap between two raised alerts.
    pub min_interval: f32,
    /// How long a raised alert stays on screen.
    pub duration: f32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            min_interval: 0.5,
            duration: 0.3,
        }
    }
}

/// Headless demo run settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated seconds to fly.
    pub duration_secs: f32,
    /// Simulation rate.
    pub tick_hz: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            duration_secs: 180.0,
            tick_hz: 60.0,
        }
    }
}

/// Highest accepted tick rate; faster settings are clipped.
pub const MAX_TICK_HZ: f32 = 1000.0;

impl DemoConfig {
    /// Tick rate clipped to [1, MAX_TICK_HZ]; non-finite rates fall back to
    /// the default 60 Hz.
    pub fn effective_tick_hz(&self) -> f32 {
        if self.tick_hz.is_finite() {
            self.tick_hz.clamp(1.0, MAX_TICK_HZ)
        } else {
            DemoConfig::default().tick_hz
        }
    }

    /// Seconds per tick.
    pub fn step_seconds(&self) -> f32 {
        1.0 / self.effective_tick_hz()
    }

    /// Number of ticks needed to cover `duration_secs`. Negative or
    /// non-finite durations run no ticks.
    pub fn tick_count(&self) -> u64 {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return 0;
        }
        (self.duration_secs * self.effective_tick_hz()).ceil() as u64
    }
}

/// Game settings. Every section falls back to defaults when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub flight: FlightTuning,
    pub camera: CameraTuning,
    pub proximity: ProximityTuning,
    pub alerts: AlertConfig,
    pub demo: DemoConfig,
}

impl GameConfig {
    /// Parse a config from RON text.
    pub fn from_ron_str(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    /// Load config from an explicit path.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from `starmarket.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        match Self::try_load(&path) {
            Ok(c) => c,
            Err(ConfigError::Io { .. }) => Self::default(),
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Pretty RON text in the format `load` reads.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}
