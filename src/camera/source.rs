use anyhow::Result;
use async_trait::async_trait;

use crate::pose::FaceLandmarks;

/// One frame's worth of detector output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraFrame {
    /// Landmarks for the primary detected face.
    Face(FaceLandmarks),
    /// The detector ran but found no face; the session holds its prior
    /// label and flags.
    NoFace,
}

/// The external camera + face-landmark pipeline.
///
/// Implementations wrap whatever detector the embedder runs (MediaPipe over
/// a webcam, a test script, a recorded trace). The engine drives it as a
/// pull stream: `next_frame` resolves whenever the detector has produced a
/// frame, at whatever rate the camera delivers.
#[async_trait]
pub trait FrameSource: Send {
    /// Acquire the camera and start the detector. Permission and
    /// initialization failures surface here.
    async fn attach(&mut self) -> Result<()>;

    /// The next frame, or `None` once the stream has ended for good.
    async fn next_frame(&mut self) -> Option<CameraFrame>;

    /// Release the camera. Called exactly once per successful attach, on
    /// every exit path of the frame loop.
    async fn detach(&mut self);
}
