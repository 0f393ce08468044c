//! Process-wide debug logging toggle.
//!
//! Search and rebuild diagnostics are emitted through the `log` facade at
//! debug level, but only while the toggle is on. The toggle starts from the
//! `GEOINDEX_DEBUG` environment variable and can be flipped at runtime with
//! [`set_debug_logging`]. It never changes query results.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable read once to seed the toggle.
pub const DEBUG_ENV_VAR: &str = "GEOINDEX_DEBUG";

static DEBUG_LOGGING: Lazy<AtomicBool> = Lazy::new(|| AtomicBool::new(env_enabled()));

fn env_enabled() -> bool {
    std::env::var(DEBUG_ENV_VAR)
        .map(|value| matches!(value.trim(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Turn engine diagnostics on or off for the whole process.
pub fn set_debug_logging(enabled: bool) {
    DEBUG_LOGGING.store(enabled, Ordering::Relaxed);
}

/// Whether engine diagnostics are currently emitted.
pub fn debug_logging_enabled() -> bool {
    DEBUG_LOGGING.load(Ordering::Relaxed)
}

/// `log::debug!` gated on the process-wide toggle.
macro_rules! geo_debug {
    ($($arg:tt)*) => {
        if $crate::logging::debug_logging_enabled() {
            log::debug!($($arg)*);
        }
    };
}

pub(crate) use geo_debug;
