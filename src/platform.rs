//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock milliseconds for the frame loop
//! - Seed derivation for new sessions
//! - Logging initialization

/// Milliseconds since an arbitrary epoch, monotonic enough for frame pacing
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Clock-derived seed for a fresh session
pub fn seed_from_clock() -> u64 {
    now_ms() as u64 ^ 0x9e37_79b9_7f4a_7c15
}

/// Install the logger once; browser console on wasm32, env_logger elsewhere
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
