//! Best net score, persisted as a plain integer string.
//!
//! Read failures and corrupt values count as zero; write failures are logged and
//! otherwise ignored.

use crate::error::PersistenceError;
use crate::persistence::KeyValueStore;

/// Persisted best net score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: i64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "math_hammer_highscore";

    pub fn new(best: i64) -> Self {
        Self { best }
    }

    /// Load from the store, degrading to zero
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match Self::parse(&raw) {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(e) => {
                    log::warn!("Ignoring high score: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("High score unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Decode a stored value
    fn parse(raw: &str) -> Result<i64, PersistenceError> {
        raw.trim()
            .parse::<i64>()
            .map_err(|e| PersistenceError::Corrupt {
                key: Self::STORAGE_KEY.to_string(),
                reason: format!("{:?}: {}", raw, e),
            })
    }

    /// Write to the store. Failure is not fatal.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        match store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("High score not saved: {}", e),
        }
    }

    /// Raise the best score if `net` beats it. Returns true on improvement.
    pub fn record(&mut self, net: i64) -> bool {
        if net > self.best {
            self.best = net;
            true
        } else {
            false
        }
    }
}
