use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::audio::AlertPlayer;
use crate::monitor::SessionState;
use crate::pose::{classify, PoseThresholds};

use super::source::{CameraFrame, FrameSource};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// Per-frame classification loop. Runs until the stream ends or the token
/// is cancelled, then releases the camera and hands the source back.
pub(crate) async fn frame_loop(
    mut source: Box<dyn FrameSource>,
    state: Arc<Mutex<SessionState>>,
    audio: AlertPlayer,
    thresholds: PoseThresholds,
    cancel_token: CancellationToken,
) -> Box<dyn FrameSource> {
    loop {
        tokio::select! {
            frame = source.next_frame() => {
                match frame {
                    Some(CameraFrame::Face(landmarks)) => {
                        let pose = classify(&landmarks, &thresholds);
                        log_debug!(
                            "frame classified: {} (distracted={})",
                            pose.direction.as_str(),
                            pose.distracted
                        );

                        let should_alert = {
                            let mut guard = state.lock().await;
                            let new_event = guard.observe_pose(&pose);
                            if new_event {
                                log_info!(
                                    "distraction #{}: {}",
                                    guard.distraction_count,
                                    pose.direction.as_str()
                                );
                            }
                            new_event && guard.should_alert(Instant::now())
                        };

                        if should_alert {
                            if let Err(err) = audio.play_cue() {
                                log_warn!("distraction cue failed: {err}");
                            }
                        }
                    }
                    Some(CameraFrame::NoFace) => {
                        // No face this frame: keep the prior label and flags.
                    }
                    None => {
                        log_info!("landmark stream ended");
                        break;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("frame loop shutting down");
                break;
            }
        }
    }

    source.detach().await;
    source
}
