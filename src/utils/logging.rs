//! Logging macros for frame-rate code paths, gated on a module-level
//! `ENABLE_LOGS` const so per-frame diagnostics can be switched off in one
//! place without touching the log filter.
//!
//! ```rust
//! // In the module:
//! const ENABLE_LOGS: bool = true;
//!
//! use focusmeter::{log_debug, log_info};
//!
//! log_debug!("per-frame detail");
//! log_info!("loop lifecycle event");
//! ```

/// Debug-level logging, gated on the calling module's `ENABLE_LOGS` const.
/// Meant for per-frame detail that would otherwise flood the log at camera
/// rate.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

/// Info-level logging, gated on the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn-level logging, gated on the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}
