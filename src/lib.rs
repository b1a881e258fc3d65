//! Webcam-based focus session monitoring.
//!
//! An external face-landmark detector feeds frames in; this crate
//! classifies head pose, debounces distraction events, accounts focused
//! and total seconds on a 1 Hz tick, throttles an audio cue, and saves a
//! session summary to the platform backend.

pub mod audio;
pub mod camera;
pub mod models;
pub mod monitor;
pub mod persist;
pub mod pose;
mod utils;

pub use audio::{AlertPlayer, AlertThrottle};
pub use camera::{CameraController, CameraFrame, FrameSource};
pub use models::SessionSummary;
pub use monitor::{FocusMonitor, MonitorConfig, MonitorStatus, SessionState};
pub use persist::{BackendClient, NullSink, SummarySink};
pub use pose::{
    classify, FaceLandmarks, HeadDirection, LandmarkPoint, PoseClassification, PoseThresholds,
};
