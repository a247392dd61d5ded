//! Logging support for nos-memory-management
//!
//! These macros forward to the `log` crate when the `log` feature is
//! enabled and compile to nothing otherwise.

/// Trace-level logging
macro_rules! mm_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
    }
}

/// Debug-level logging
macro_rules! mm_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
    }
}

/// Warn-level logging
macro_rules! mm_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::warn!($($arg)*);
    }
}
