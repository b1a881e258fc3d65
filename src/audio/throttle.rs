use std::time::{Duration, Instant};

/// Rate limit for the distraction cue: at most one alert per cooldown
/// window, however often the classifier reports new events.
#[derive(Debug, Clone)]
pub struct AlertThrottle {
    cooldown: Duration,
    last_fired: Option<Instant>,
}

impl AlertThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fired: None,
        }
    }

    /// Returns true when the cue may fire now, and records the fire time.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_fired {
            if now.duration_since(last) < self.cooldown {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }
}

impl Default for AlertThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}
