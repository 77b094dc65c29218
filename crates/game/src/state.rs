//! Short-lived presentation state: interaction prompts, the impact alert,
//! and the on-screen message log.

use engine_core::{Cooldown, Lifetime};

use crate::config::AlertConfig;

// ── Interaction prompts ────────────────────────────────────────────────────

/// Key label shown in prompts. Change here to update all interact prompts.
pub const INTERACT_KEY: &str = "E";

/// One on-screen interaction prompt: "[key] action" (e.g. "[E] Access Market Data").
#[derive(Debug, Clone, PartialEq)]
pub struct InteractPrompt {
    pub key: &'static str,
    pub action: String,
}

impl InteractPrompt {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            key: INTERACT_KEY,
            action: action.into(),
        }
    }

    /// Build the full prompt string for overlay (e.g. "[E] Access Market Data").
    pub fn display_text(&self) -> String {
        format!("[{}] {}", self.key, self.action)
    }
}

// ── Impact alert ───────────────────────────────────────────────────────────

/// Debounced collision warning. Collisions arrive every tick while the ship
/// overlaps a rock; the alert is raised at most once per `min_interval` and
/// stays up for `duration`.
#[derive(Debug, Clone)]
pub struct CollisionAlert {
    cooldown: Cooldown,
    duration: f32,
    visible: Option<Lifetime>,
}

impl CollisionAlert {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            cooldown: Cooldown::new(config.min_interval),
            duration: config.duration,
            visible: None,
        }
    }

    /// Age the visible alert by `dt`.
    pub fn update(&mut self, dt: f32) {
        if let Some(life) = &mut self.visible {
            if life.update(dt) {
                self.visible = None;
            }
        }
    }

    /// Report a collision at simulation time `now`. Returns true when a new
    /// alert is raised.
    pub fn on_collision(&mut self, now: f32) -> bool {
        if self.cooldown.try_trigger(now) {
            self.visible = Some(Lifetime::new(self.duration));
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.visible.is_some()
    }
}

// ── Message log ────────────────────────────────────────────────────────────

/// One line in the on-screen message log.
#[derive(Debug, Clone)]
pub struct GameMessage {
    pub text: String,
    pub color: [f32; 4],
    pub time_remaining: f32,
}

/// Manages the on-screen message log displayed over the game view.
#[derive(Debug, Clone)]
pub struct GameMessages {
    pub messages: Vec<GameMessage>,
    pub max_visible: usize,
    default_duration: f32,
}

impl Default for GameMessages {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMessages {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_visible: 6,
            default_duration: 4.0,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, color: [f32; 4]) {
        self.messages.push(GameMessage {
            text: text.into(),
            color,
            time_remaining: self.default_duration,
        });
        if self.messages.len() > 50 {
            self.messages.remove(0);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, [1.0, 1.0, 1.0, 1.0]);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, [0.3, 1.0, 0.3, 1.0]);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(text, [1.0, 0.9, 0.3, 1.0]);
    }

    pub fn update(&mut self, dt: f32) {
        for msg in &mut self.messages {
            msg.time_remaining -= dt;
        }
        self.messages.retain(|m| m.time_remaining > 0.0);
    }

    /// Newest messages, at most `max_visible`, oldest first.
    pub fn visible(&self) -> &[GameMessage] {
        let start = self.messages.len().saturating_sub(self.max_visible);
        &self.messages[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_text() {
        let prompt = InteractPrompt::new("Access Market Data");
        assert_eq!(prompt.display_text(), "[E] Access Market Data");
    }

    #[test]
    fn alert_is_debounced_and_expires() {
        let mut alert = CollisionAlert::new(&AlertConfig::default());
        assert!(alert.on_collision(1.0));
        assert!(alert.is_active());
        alert.update(0.1);
        assert!(!alert.on_collision(1.1));
        alert.update(0.25);
        assert!(!alert.is_active());
        assert!(!alert.on_collision(1.45));
        assert!(alert.on_collision(1.6));
        assert!(alert.is_active());
    }

    #[test]
    fn messages_expire_and_cap_visible() {
        let mut log = GameMessages::new();
        for i in 0..10 {
            log.info(format!("line {}", i));
        }
        assert_eq!(log.visible().len(), 6);
        assert_eq!(log.visible()[5].text, "line 9");
        log.update(5.0);
        assert!(log.visible().is_empty());
    }
}
