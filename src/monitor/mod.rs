pub mod config;
pub mod controller;
pub mod state;

pub use config::MonitorConfig;
pub use controller::FocusMonitor;
pub use state::{MonitorStatus, SessionState};
