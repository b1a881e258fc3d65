use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one monitoring session, in the exact shape the
/// backend's study-session endpoint accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub total_duration_seconds: u64,
    pub focus_duration_seconds: u64,
    pub distraction_count: u32,
    /// Unrounded percentage; the UI shows a rounded value, the backend
    /// stores the float.
    pub focus_percentage: f64,
}
