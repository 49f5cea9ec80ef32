//! Verbosity global and the `displaylevel!` macro.

use std::sync::atomic::{AtomicU32, Ordering};

/// 1 = fatal/usage messages only (default); 2+ = increasingly verbose
/// (auto-resolved filenames, per-anchor offsets, pass statistics).
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(1);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print to stderr at or below the configured verbosity.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
