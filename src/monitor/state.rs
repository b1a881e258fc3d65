use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audio::AlertThrottle;
use crate::models::SessionSummary;
use crate::pose::{HeadDirection, PoseClassification};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MonitorStatus {
    Idle,
    Active,
    Paused,
}

impl Default for MonitorStatus {
    fn default() -> Self {
        MonitorStatus::Idle
    }
}

/// The accounting record for one monitoring session.
///
/// Two producers feed it: the frame loop (via [`SessionState::observe_pose`])
/// at camera rate, and the 1 Hz ticker (via [`SessionState::tick`]). A brief
/// distraction between two ticks is remembered by a held-over latch that
/// only the tick clears, so it still costs that second's focus credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub status: MonitorStatus,
    pub session_id: Option<String>,
    pub camera_on: bool,
    pub head_direction: HeadDirection,
    pub distracted_now: bool,
    pub distraction_count: u32,
    pub focus_seconds: u64,
    pub total_seconds: u64,
    pub session_started_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    distracted_this_second: bool,
    #[serde(skip)]
    alert_throttle: AlertThrottle,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: MonitorStatus::Idle,
            session_id: None,
            camera_on: false,
            head_direction: HeadDirection::Forward,
            distracted_now: false,
            distraction_count: 0,
            focus_seconds: 0,
            total_seconds: 0,
            session_started_at: None,
            distracted_this_second: false,
            alert_throttle: AlertThrottle::default(),
        }
    }
}

impl SessionState {
    pub fn new(alert_cooldown: Duration) -> Self {
        Self {
            alert_throttle: AlertThrottle::new(alert_cooldown),
            ..Self::default()
        }
    }

    /// First-ever activation: stamps identity and start time, then runs.
    pub fn activate(&mut self, session_id: String, started_at: DateTime<Utc>) {
        self.session_id = Some(session_id);
        self.session_started_at = Some(started_at);
        self.status = MonitorStatus::Active;
    }

    /// Back to Active from Paused; the original start time is kept.
    pub fn resume(&mut self) {
        self.status = MonitorStatus::Active;
    }

    pub fn pause(&mut self) {
        self.status = MonitorStatus::Paused;
    }

    /// Zero every counter and drop the session identity. The camera flag is
    /// left alone: resetting the numbers does not release the pipeline.
    pub fn reset(&mut self) {
        self.status = MonitorStatus::Idle;
        self.session_id = None;
        self.session_started_at = None;
        self.distraction_count = 0;
        self.focus_seconds = 0;
        self.total_seconds = 0;
        self.distracted_now = false;
        self.distracted_this_second = false;
    }

    pub fn set_camera(&mut self, on: bool) {
        self.camera_on = on;
        if !on {
            self.distracted_now = false;
            self.head_direction = HeadDirection::Forward;
        }
    }

    /// Fold one frame's classification into the session.
    ///
    /// Returns true when this frame *enters* the distracted state; a
    /// continuous distraction counts once, not once per frame. While the
    /// session is not active only the displayed label moves; counters,
    /// latch and alerts stay untouched.
    pub fn observe_pose(&mut self, pose: &PoseClassification) -> bool {
        self.head_direction = pose.direction;

        if pose.distracted && self.status == MonitorStatus::Active {
            self.distracted_this_second = true;
            let new_event = !self.distracted_now;
            self.distracted_now = true;
            if new_event {
                self.distraction_count += 1;
            }
            new_event
        } else {
            self.distracted_now = false;
            false
        }
    }

    /// One firing of the 1 Hz accumulator. The second is credited to focus
    /// only if no frame reported a distraction since the previous tick.
    pub fn tick(&mut self) {
        if self.status != MonitorStatus::Active {
            return;
        }
        self.total_seconds += 1;
        if !self.distracted_this_second {
            self.focus_seconds += 1;
        }
        self.distracted_this_second = false;
    }

    /// Whether the audio cue may fire for a new distraction event.
    pub fn should_alert(&mut self, now: Instant) -> bool {
        self.alert_throttle.try_fire(now)
    }

    /// Whole-number focus percentage for display. An untouched session
    /// reads as fully focused.
    pub fn focus_percentage(&self) -> u32 {
        if self.total_seconds == 0 {
            100
        } else {
            (self.focus_seconds as f64 / self.total_seconds as f64 * 100.0).round() as u32
        }
    }

    /// The persistable aggregate, or `None` when there is nothing worth
    /// saving yet (never started, or no full second accumulated).
    pub fn summary(&self) -> Option<SessionSummary> {
        let started_at = self.session_started_at?;
        if self.total_seconds == 0 {
            return None;
        }

        Some(SessionSummary {
            started_at,
            total_duration_seconds: self.total_seconds,
            focus_duration_seconds: self.focus_seconds,
            distraction_count: self.distraction_count,
            focus_percentage: self.focus_seconds as f64 / self.total_seconds as f64 * 100.0,
        })
    }
}
