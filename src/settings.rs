//! Player settings and device profile
//!
//! Persisted as JSON next to the high score.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;
use crate::sim::{Difficulty, GameMode, PlayMode, SessionConfig};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Run selection ===
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub play_mode: PlayMode,

    // === Device ===
    /// Slower hardware gets more answer time, fewer particles and no sound
    pub low_end_device: bool,

    // === Rules ===
    /// Mistake shields granted at every fresh start
    pub mistake_shields: u8,

    // === Audio ===
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Mixed,
            difficulty: Difficulty::Hard,
            play_mode: PlayMode::Unlimited,
            low_end_device: false,
            mistake_shields: 0,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "math_hammer_settings";

    /// Per-question answer window
    pub fn question_timeout_ms(&self) -> u64 {
        if self.low_end_device {
            QUESTION_TIMEOUT_MS + LOW_END_TIMEOUT_BONUS_MS
        } else {
            QUESTION_TIMEOUT_MS
        }
    }

    /// Particles per celebration burst
    pub fn celebration_particles(&self) -> u32 {
        if self.low_end_device {
            LOW_END_CELEBRATION_PARTICLES
        } else {
            CELEBRATION_PARTICLES
        }
    }

    /// Sound plays only when enabled and the device is not low-end
    pub fn sound_active(&self) -> bool {
        self.sound_enabled && !self.low_end_device
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            question_timeout_ms: self.question_timeout_ms(),
            mistake_shields: self.mistake_shields,
        }
    }

    /// Load settings, falling back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Corrupt settings, using defaults: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unavailable, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings. Failure is logged only.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Settings not serialized: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}
