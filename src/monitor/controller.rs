use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{error, info};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use uuid::Uuid;

use crate::audio::AlertPlayer;
use crate::camera::{CameraController, FrameSource};
use crate::persist::SummarySink;

use super::{MonitorConfig, MonitorStatus, SessionState};

/// Orchestrates one focus-monitoring session: camera acquisition, the 1 Hz
/// accumulator, the audio cue, and the final summary save.
///
/// The controller is the sole owner of the session state, the camera
/// pipeline and the audio handle; the frame loop and the ticker reach the
/// state only through its update operations.
#[derive(Clone)]
pub struct FocusMonitor {
    state: Arc<Mutex<SessionState>>,
    camera: Arc<Mutex<CameraController>>,
    audio: AlertPlayer,
    sink: Arc<dyn SummarySink>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    config: MonitorConfig,
}

impl FocusMonitor {
    pub fn new(
        config: MonitorConfig,
        source: Box<dyn FrameSource>,
        sink: Arc<dyn SummarySink>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(config.alert_cooldown()))),
            camera: Arc::new(Mutex::new(CameraController::new(source))),
            audio: AlertPlayer::new(),
            sink,
            ticker: Arc::new(Mutex::new(None)),
            config,
        }
    }

    /// Start a new session, or resume a paused one. Attaches the camera
    /// pipeline first when it is not already running; if that fails the
    /// session stays where it was and the error surfaces to the caller.
    pub async fn start(&self) -> Result<SessionState> {
        {
            let state = self.state.lock().await;
            if state.status == MonitorStatus::Active {
                bail!("session already active");
            }
        }

        {
            let mut camera = self.camera.lock().await;
            if !camera.is_attached() {
                camera
                    .attach(
                        self.state.clone(),
                        self.audio.clone(),
                        self.config.thresholds.clone(),
                        self.config.camera_start_timeout(),
                    )
                    .await?;
                self.state.lock().await.set_camera(true);
            }
        }

        {
            let mut state = self.state.lock().await;
            if state.session_started_at.is_none() {
                let session_id = Uuid::new_v4().to_string();
                info!("focus session {session_id} starting");
                state.activate(session_id, Utc::now());
            } else {
                info!(
                    "focus session {} resuming",
                    state.session_id.as_deref().unwrap_or("<unknown>")
                );
                state.resume();
            }
        }

        self.spawn_ticker().await;

        Ok(self.snapshot().await)
    }

    /// Pause accounting. The status flips under the state lock before the
    /// ticker is torn down, so no tick can move the counters once this
    /// returns. The camera stays attached for a quick resume.
    pub async fn pause(&self) -> Result<SessionState> {
        {
            let mut state = self.state.lock().await;
            if state.status != MonitorStatus::Active {
                bail!("no active session to pause");
            }
            state.pause();
        }

        self.cancel_ticker().await;

        if self.config.auto_save_on_pause {
            let monitor = self.clone();
            tokio::spawn(async move {
                if let Err(err) = monitor.save().await {
                    error!("auto-save on pause failed: {err:#}");
                }
            });
        }

        Ok(self.snapshot().await)
    }

    /// Zero all counters and return to Idle. The camera pipeline is left
    /// attached; nothing is saved.
    pub async fn reset(&self) {
        self.state.lock().await.reset();
        self.cancel_ticker().await;
    }

    /// Persist the current aggregate through the summary sink. A session
    /// that never started, or accumulated no full second, is skipped
    /// without error. Failures are reported, never retried, and the local
    /// counters are left untouched either way.
    pub async fn save(&self) -> Result<()> {
        let summary = { self.state.lock().await.summary() };

        let Some(summary) = summary else {
            info!("skipping save: no session time accumulated");
            return Ok(());
        };

        self.sink
            .save_summary(&summary)
            .await
            .context("failed to save session summary")?;

        info!(
            "session summary saved: {}s total, {}s focused, {} distractions",
            summary.total_duration_seconds,
            summary.focus_duration_seconds,
            summary.distraction_count
        );
        Ok(())
    }

    /// Detach the camera pipeline while no session is running.
    pub async fn stop_camera(&self) -> Result<()> {
        {
            let state = self.state.lock().await;
            if state.status == MonitorStatus::Active {
                bail!("cannot stop the camera while a session is active");
            }
        }

        self.camera.lock().await.detach().await?;
        self.state.lock().await.set_camera(false);
        Ok(())
    }

    /// Orderly teardown: halt the ticker, release the camera, release the
    /// audio thread. Runs the same regardless of which state the session
    /// was in; Drop impls on the camera controller and audio handle
    /// backstop the cancellation if this is never called.
    pub async fn shutdown(&self) {
        {
            let mut state = self.state.lock().await;
            if state.status == MonitorStatus::Active {
                state.pause();
            }
        }

        self.cancel_ticker().await;

        if let Err(err) = self.camera.lock().await.detach().await {
            error!("camera detach failed during shutdown: {err:#}");
        }
        self.state.lock().await.set_camera(false);

        self.audio.shutdown();
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let tick_interval = self.config.tick_interval();

        let handle = tokio::spawn(async move {
            // First tick one full period after start; late ticks are
            // delayed rather than bunched.
            let mut interval =
                time::interval_at(time::Instant::now() + tick_interval, tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let mut guard = state.lock().await;
                if guard.status != MonitorStatus::Active {
                    break;
                }
                guard.tick();
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }
}
