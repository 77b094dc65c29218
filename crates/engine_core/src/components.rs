//! Small timer components shared by gameplay systems.

/// Remaining-time counter for temporary state (alerts, messages, effects).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Tick down. Returns true once the lifetime has expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Minimum interval between repeated triggers of the same effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub interval: f32,
    /// Time stamp (seconds) of the last accepted trigger.
    last_trigger: Option<f32>,
}

impl Cooldown {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last_trigger: None,
        }
    }

    /// Try to trigger at time `now` (seconds). Succeeds when more than
    /// `interval` has passed since the last accepted trigger.
    pub fn try_trigger(&mut self, now: f32) -> bool {
        let ready = match self.last_trigger {
            Some(last) => now - last > self.interval,
            None => true,
        };
        if ready {
            self.last_trigger = Some(now);
        }
        ready
    }

    pub fn last_trigger(&self) -> Option<f32> {
        self.last_trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_expires_after_duration() {
        let mut life = Lifetime::new(0.3);
        assert!(!life.update(0.2));
        assert!(life.update(0.2));
        assert!(life.is_expired());
    }

    #[test]
    fn cooldown_suppresses_rapid_repeats() {
        let mut cd = Cooldown::new(0.5);
        assert!(cd.try_trigger(1.0));
        assert!(!cd.try_trigger(1.2));
        assert!(!cd.try_trigger(1.5));
        assert!(cd.try_trigger(1.6));
        assert_eq!(cd.last_trigger(), Some(1.6));
    }
}
