mod frame_loop;

pub mod controller;
pub mod source;

pub use controller::CameraController;
pub use source::{CameraFrame, FrameSource};
