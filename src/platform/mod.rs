//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (frame deltas)
//! - Run seeds

/// Wall-clock milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Wall-clock milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Fresh seed from OS entropy
pub fn random_seed() -> u64 {
    rand::random()
}
