use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::audio::AlertPlayer;
use crate::monitor::SessionState;
use crate::pose::PoseThresholds;

use super::frame_loop::frame_loop;
use super::source::FrameSource;

/// Owns the camera/landmark pipeline for one monitoring session.
///
/// The source is held here while idle and moves into the frame-loop task
/// while attached; detaching cancels the loop, joins it, and takes the
/// source back so the pipeline can be re-attached later.
pub struct CameraController {
    source: Option<Box<dyn FrameSource>>,
    handle: Option<JoinHandle<Box<dyn FrameSource>>>,
    cancel_token: Option<CancellationToken>,
}

impl CameraController {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source: Some(source),
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Acquire the camera (bounded by `start_timeout`) and spawn the frame
    /// loop. On failure the source stays available for a retry.
    pub async fn attach(
        &mut self,
        state: Arc<Mutex<SessionState>>,
        audio: AlertPlayer,
        thresholds: PoseThresholds,
        start_timeout: Duration,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("camera already attached");
        }

        let mut source = self
            .source
            .take()
            .ok_or_else(|| anyhow!("frame source is not available"))?;

        match tokio::time::timeout(start_timeout, source.attach()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                self.source = Some(source);
                return Err(err.context("camera start failed"));
            }
            Err(_) => {
                self.source = Some(source);
                bail!(
                    "camera start timed out after {}ms",
                    start_timeout.as_millis()
                );
            }
        }

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(frame_loop(
            source,
            state,
            audio,
            thresholds,
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Stop the frame loop and release the camera. Idempotent.
    pub async fn detach(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            let source = handle
                .await
                .context("frame loop task failed to join")?;
            self.source = Some(source);
        }

        Ok(())
    }
}

impl Drop for CameraController {
    fn drop(&mut self) {
        // Backstop: if the controller is dropped without an orderly detach,
        // the frame loop still gets its cancel signal and releases the
        // camera on its own task.
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}
