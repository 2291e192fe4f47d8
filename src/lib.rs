//! Math Hammer - whack-a-mole with arithmetic
//!
//! Core modules:
//! - `sim`: Deterministic round/scoring state machine (questions, board, power-ups)
//! - `grading`: Final score to title/comment mapping
//! - `feedback`: Sound/celebration signals for the presentation layer
//! - `persistence`: Key-value storage collaborator (LocalStorage on web)
//! - `settings`: Player-selected configuration
//! - `game`: Host facade tying the above together

pub mod error;
pub mod feedback;
pub mod game;
pub mod grading;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, PersistenceError};
pub use game::Game;
pub use grading::{Grade, grade_for};
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (round countdown resolution)
    pub const TICK_MS: u64 = 50;
    /// Maximum ticks processed per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Time to answer one question
    pub const QUESTION_TIMEOUT_MS: u64 = 3000;
    /// Extra answer time granted on low-end devices
    pub const LOW_END_TIMEOUT_BONUS_MS: u64 = 1000;
    /// Round countdown drain rate in percent (ICE_CREAM slows it to 80)
    pub const NORMAL_DRAIN_PERCENT: u64 = 100;
    pub const ICE_CREAM_DRAIN_PERCENT: u64 = 80;

    /// Lives
    pub const BASE_MAX_LIVES: u8 = 5;
    pub const TIME_LIMITED_MAX_LIVES: u8 = 3;
    /// Lives restored by LIFE_POTION (capped at max)
    pub const LIFE_POTION_LIVES: u8 = 3;
    /// Lives granted by a revive
    pub const REVIVE_LIVES: u8 = 1;

    /// Global countdown for TimeLimited mode
    pub const TIME_LIMIT_SECS: u32 = 120;
    /// Length of the ad that precedes a revive
    pub const AD_COUNTDOWN_SECS: u32 = 3;

    /// Board
    pub const BOARD_CELLS: usize = 9;
    pub const DISTRACTOR_COUNT: usize = 2;
    /// Hardened moles appear once this many questions were answered
    pub const HARDEN_MIN_CORRECT: u32 = 5;
    pub const HARDEN_CHANCE: f64 = 0.2;
    pub const HARDENED_HITS: u8 = 2;
    /// Bombs appear once more than this many questions were answered
    pub const BOMB_MIN_CORRECT: u32 = 3;
    pub const BOMB_CHANCE: f64 = 0.3;

    /// Combo at which the board enters fever mode
    pub const FEVER_COMBO: u32 = 15;

    /// Minimum gap between two celebration bursts
    pub const CELEBRATION_THROTTLE_MS: u64 = 600;
    pub const CELEBRATION_PARTICLES: u32 = 60;
    pub const LOW_END_CELEBRATION_PARTICLES: u32 = 30;

    /// Ticks per second of simulated time
    pub const TICKS_PER_SEC: u32 = (1000 / TICK_MS) as u32;
}

/// Format whole seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
