//! Starmarket game layer: session loop, player progression, HUD data and
//! configuration on top of the flight model and world generator.

pub mod autopilot;
pub mod config;
pub mod events;
pub mod hud;
pub mod progress;
pub mod session;
pub mod state;

pub use autopilot::{Autopilot, PilotCommand};
pub use config::{ConfigError, GameConfig, CONFIG_FILE};
pub use events::SimEvent;
pub use hud::HudData;
pub use progress::{rank_title, GameProgress, PlayerState, Quest, ScanReport};
pub use session::Session;
pub use state::{CollisionAlert, GameMessage, GameMessages, InteractPrompt};
