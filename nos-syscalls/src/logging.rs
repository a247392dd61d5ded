//! Unified logging support for nos-syscalls
//!
//! This module provides a unified logging interface that handles the
//! optional `log` feature without requiring repetitive #[cfg] attributes
//! throughout the codebase.

/// Unified trace-level logging
#[macro_export]
macro_rules! sys_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
    }
}

/// Unified debug-level logging
#[macro_export]
macro_rules! sys_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
    }
}

/// Unified warn-level logging
#[macro_export]
macro_rules! sys_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::warn!($($arg)*);
    }
}
