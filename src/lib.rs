// Global debug flag - can be toggled at runtime (e.g. by a host app shortcut)
use std::sync::atomic::AtomicBool;
pub static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Debug print macro - only prints if DEBUG_ENABLED is true
// Compiled out entirely in release builds
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if $crate::DEBUG_ENABLED.load(std::sync::atomic::Ordering::Relaxed) {
            println!($($arg)*);
        }
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {};
}

// Logging - feature-gated, compiles to nothing without --features logging
// Routed through the `log` facade so hosts pick the sink (env_logger in glyph-dump)

// Disabled: compiles to nothing
#[cfg(not(feature = "logging"))]
#[inline(always)]
pub fn log(_msg: &str) {}

// Enabled: forwarded to the log facade at info level
#[cfg(feature = "logging")]
pub fn log(msg: &str) {
    log::info!("{}", msg);
}

pub mod text;
pub mod types;

// Re-export commonly used items from submodules
pub use text::{
    BoxBackend, CosmicBackend, FontBackend, GlyphBitmap, LayoutError, LayoutOutcome, TextContext,
};
pub use types::*;
