use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pose::PoseThresholds;

/// Tunable policy for a focus monitor instance.
///
/// The two shipped variants of this feature differ only in whether pausing
/// also saves; that fork is a flag here, not duplicated control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitorConfig {
    /// Fire a save of the current aggregate whenever the session pauses.
    pub auto_save_on_pause: bool,
    /// Accumulator period. One second in production; tests shrink it.
    pub tick_interval_ms: u64,
    /// Minimum spacing between audio cues.
    pub alert_cooldown_ms: u64,
    /// Bound on camera/detector startup, so a hung acquisition cannot leave
    /// the session in a connecting state forever.
    pub camera_start_timeout_ms: u64,
    pub thresholds: PoseThresholds,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            auto_save_on_pause: true,
            tick_interval_ms: 1_000,
            alert_cooldown_ms: 2_000,
            camera_start_timeout_ms: 10_000,
            thresholds: PoseThresholds::default(),
        }
    }
}

impl MonitorConfig {
    /// Read a config file, falling back to defaults when it is absent or
    /// unreadable as JSON.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read monitor config from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_default())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn alert_cooldown(&self) -> Duration {
        Duration::from_millis(self.alert_cooldown_ms)
    }

    pub fn camera_start_timeout(&self) -> Duration {
        Duration::from_millis(self.camera_start_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_policy() {
        let config = MonitorConfig::default();
        assert!(config.auto_save_on_pause);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.alert_cooldown(), Duration::from_secs(2));
        assert_eq!(config.camera_start_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = MonitorConfig::load_or_default(Path::new("/nonexistent/monitor.json"))
            .expect("missing file is not an error");
        assert_eq!(config.tick_interval_ms, 1_000);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: MonitorConfig =
            serde_json::from_str(r#"{ "autoSaveOnPause": false, "alertCooldownMs": 5000 }"#)
                .unwrap();
        assert!(!config.auto_save_on_pause);
        assert_eq!(config.alert_cooldown_ms, 5_000);
        assert_eq!(config.tick_interval_ms, 1_000);
        assert!((config.thresholds.horizontal - 0.045).abs() < f64::EPSILON);
    }
}
