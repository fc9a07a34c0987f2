//! Logging macros gated on a module-level `ENABLE_LOGS` flag.
//!
//! Usage:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_debug, log_info, log_warn};
//!
//! log_debug!("clustering {} entries", 12);
//! ```
//!
//! Every module that calls these macros must define `ENABLE_LOGS`.

/// Debug-level logging, used by the hot clustering path.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

/// Initialize `env_logger` for the binary.
///
/// `RUST_LOG` wins when set. Otherwise the filter is `info`, or `debug`
/// when `JOURNAL_MAP_DEBUG` is `1`/`true`.
pub fn init_logging() {
    let debug_mode = std::env::var("JOURNAL_MAP_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let level = if debug_mode {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}
