use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use focusmeter::{
    CameraFrame, FaceLandmarks, FocusMonitor, FrameSource, LandmarkPoint, MonitorConfig,
    MonitorStatus, NullSink, SessionSummary, SummarySink,
};

/// Feeds a fixed sequence of frames, then keeps the stream open until the
/// loop is cancelled.
struct ScriptedSource {
    frames: VecDeque<CameraFrame>,
    frame_gap: Duration,
    fail_attach: bool,
    attached: Arc<AtomicBool>,
    detached: Arc<AtomicBool>,
}

impl ScriptedSource {
    fn new(frames: Vec<CameraFrame>) -> Self {
        Self {
            frames: frames.into(),
            frame_gap: Duration::from_millis(5),
            fail_attach: false,
            attached: Arc::new(AtomicBool::new(false)),
            detached: Arc::new(AtomicBool::new(false)),
        }
    }

    fn failing() -> Self {
        let mut source = Self::new(Vec::new());
        source.fail_attach = true;
        source
    }
}

#[async_trait]
impl FrameSource for ScriptedSource {
    async fn attach(&mut self) -> Result<()> {
        if self.fail_attach {
            bail!("camera permission denied");
        }
        self.attached.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn next_frame(&mut self) -> Option<CameraFrame> {
        tokio::time::sleep(self.frame_gap).await;
        match self.frames.pop_front() {
            Some(frame) => Some(frame),
            None => {
                // Script exhausted: stay open until cancelled.
                tokio::time::sleep(Duration::from_secs(3600)).await;
                None
            }
        }
    }

    async fn detach(&mut self) {
        self.detached.store(true, Ordering::SeqCst);
    }
}

struct RecordingSink {
    saved: Mutex<Vec<SessionSummary>>,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            saved: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SummarySink for RecordingSink {
    async fn save_summary(&self, summary: &SessionSummary) -> Result<()> {
        self.saved.lock().await.push(summary.clone());
        Ok(())
    }
}

fn forward_face() -> CameraFrame {
    CameraFrame::Face(FaceLandmarks::new(
        LandmarkPoint::new(0.5, 0.5),
        LandmarkPoint::new(0.4, 0.5),
        LandmarkPoint::new(0.6, 0.5),
    ))
}

fn turned_face() -> CameraFrame {
    CameraFrame::Face(FaceLandmarks::new(
        LandmarkPoint::new(0.6, 0.5),
        LandmarkPoint::new(0.4, 0.5),
        LandmarkPoint::new(0.6, 0.5),
    ))
}

fn fast_config() -> MonitorConfig {
    MonitorConfig {
        tick_interval_ms: 25,
        ..MonitorConfig::default()
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[tokio::test]
async fn a_run_of_distracted_frames_counts_one_event() {
    init_logging();

    let source = ScriptedSource::new(vec![turned_face(); 10]);
    let monitor = FocusMonitor::new(fast_config(), Box::new(source), Arc::new(NullSink));

    monitor.start().await.expect("start");
    tokio::time::sleep(Duration::from_millis(150)).await;

    let state = monitor.snapshot().await;
    assert_eq!(state.status, MonitorStatus::Active);
    assert!(state.camera_on);
    assert_eq!(state.distraction_count, 1);
    assert!(state.distracted_now);

    monitor.shutdown().await;
}

#[tokio::test]
async fn pause_freezes_the_counters() {
    init_logging();

    let source = ScriptedSource::new(vec![forward_face(); 200]);
    let monitor = FocusMonitor::new(fast_config(), Box::new(source), Arc::new(NullSink));

    monitor.start().await.expect("start");
    tokio::time::sleep(Duration::from_millis(120)).await;
    let paused = monitor.pause().await.expect("pause");
    assert_eq!(paused.status, MonitorStatus::Paused);
    assert!(paused.total_seconds >= 1);

    // Several tick periods later, nothing has moved.
    tokio::time::sleep(Duration::from_millis(200)).await;
    let later = monitor.snapshot().await;
    assert_eq!(later.total_seconds, paused.total_seconds);
    assert_eq!(later.focus_seconds, paused.focus_seconds);
    assert_eq!(later.distraction_count, paused.distraction_count);

    monitor.shutdown().await;
}

#[tokio::test]
async fn pause_auto_saves_and_reset_zeroes() {
    init_logging();

    let sink = RecordingSink::new();
    let source = ScriptedSource::new(vec![forward_face(); 200]);
    let monitor = FocusMonitor::new(fast_config(), Box::new(source), sink.clone());

    let started = monitor.start().await.expect("start");
    assert!(started.session_started_at.is_some());

    tokio::time::sleep(Duration::from_millis(130)).await;
    monitor.pause().await.expect("pause");
    tokio::time::sleep(Duration::from_millis(100)).await;

    {
        let saved = sink.saved.lock().await;
        assert_eq!(saved.len(), 1);
        let summary = &saved[0];
        assert!(summary.total_duration_seconds >= 1);
        assert!(summary.focus_duration_seconds <= summary.total_duration_seconds);
        assert_eq!(summary.distraction_count, 0);
    }

    monitor.reset().await;
    let state = monitor.snapshot().await;
    assert_eq!(state.status, MonitorStatus::Idle);
    assert_eq!(state.total_seconds, 0);
    assert_eq!(state.focus_seconds, 0);
    assert_eq!(state.session_started_at, None);
    // Reset does not detach the pipeline.
    assert!(state.camera_on);

    monitor.shutdown().await;
}

#[tokio::test]
async fn resume_keeps_the_original_start_time() {
    init_logging();

    let source = ScriptedSource::new(vec![forward_face(); 200]);
    let mut config = fast_config();
    config.auto_save_on_pause = false;
    let monitor = FocusMonitor::new(config, Box::new(source), Arc::new(NullSink));

    let started = monitor.start().await.expect("start");
    tokio::time::sleep(Duration::from_millis(60)).await;
    monitor.pause().await.expect("pause");

    let resumed = monitor.start().await.expect("resume");
    assert_eq!(resumed.session_started_at, started.session_started_at);
    assert_eq!(resumed.session_id, started.session_id);

    monitor.shutdown().await;
}

#[tokio::test]
async fn failed_camera_start_leaves_the_session_idle() {
    init_logging();

    let monitor = FocusMonitor::new(
        fast_config(),
        Box::new(ScriptedSource::failing()),
        Arc::new(NullSink),
    );

    let err = monitor.start().await.expect_err("attach must fail");
    assert!(err.to_string().contains("camera start failed"));

    let state = monitor.snapshot().await;
    assert_eq!(state.status, MonitorStatus::Idle);
    assert!(!state.camera_on);
    assert_eq!(state.session_started_at, None);

    monitor.shutdown().await;
}

#[tokio::test]
async fn save_without_accumulated_time_is_skipped() {
    init_logging();

    let sink = RecordingSink::new();
    let source = ScriptedSource::new(Vec::new());
    let monitor = FocusMonitor::new(fast_config(), Box::new(source), sink.clone());

    monitor.save().await.expect("skip is not an error");
    assert!(sink.saved.lock().await.is_empty());
}

#[tokio::test]
async fn shutdown_releases_the_camera_on_every_path() {
    init_logging();

    let source = ScriptedSource::new(vec![forward_face(); 50]);
    let attached = source.attached.clone();
    let detached = source.detached.clone();
    let monitor = FocusMonitor::new(fast_config(), Box::new(source), Arc::new(NullSink));

    monitor.start().await.expect("start");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(attached.load(Ordering::SeqCst));

    monitor.shutdown().await;
    assert!(detached.load(Ordering::SeqCst));

    let state = monitor.snapshot().await;
    assert!(!state.camera_on);
    assert_ne!(state.status, MonitorStatus::Active);
}

#[tokio::test]
async fn stop_camera_is_refused_while_active_and_allowed_after() {
    init_logging();

    let source = ScriptedSource::new(vec![forward_face(); 50]);
    let detached = source.detached.clone();
    let mut config = fast_config();
    config.auto_save_on_pause = false;
    let monitor = FocusMonitor::new(config, Box::new(source), Arc::new(NullSink));

    monitor.start().await.expect("start");
    assert!(monitor.stop_camera().await.is_err());

    monitor.pause().await.expect("pause");
    monitor.stop_camera().await.expect("stop after pause");
    assert!(detached.load(Ordering::SeqCst));
    assert!(!monitor.snapshot().await.camera_on);

    monitor.shutdown().await;
}
