//! Purchasable power-ups and the ledger of active ones

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Slows the round countdown
    IceCream,
    /// Instantly restores lives
    LifePotion,
    /// Hardened moles fall in one hit
    Pan,
    /// Highlights the correct mole
    GoldenLight,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::IceCream,
        PowerUpKind::LifePotion,
        PowerUpKind::Pan,
        PowerUpKind::GoldenLight,
    ];

    /// Static catalog entry for this kind
    pub fn definition(&self) -> &'static PowerUpDefinition {
        match self {
            PowerUpKind::IceCream => &CATALOG[0],
            PowerUpKind::LifePotion => &CATALOG[1],
            PowerUpKind::Pan => &CATALOG[2],
            PowerUpKind::GoldenLight => &CATALOG[3],
        }
    }
}

impl FromStr for PowerUpKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "icecream" | "ice_cream" => Ok(PowerUpKind::IceCream),
            "lifepotion" | "life_potion" => Ok(PowerUpKind::LifePotion),
            "pan" => Ok(PowerUpKind::Pan),
            "goldenlight" | "golden_light" => Ok(PowerUpKind::GoldenLight),
            _ => Err(ConfigError::UnknownPowerUp(s.to_string())),
        }
    }
}

/// Read-only catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerUpDefinition {
    pub kind: PowerUpKind,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u32,
    /// 0 = instant one-shot effect
    pub duration_secs: u32,
}

impl PowerUpDefinition {
    pub fn is_instant(&self) -> bool {
        self.duration_secs == 0
    }
}

pub const CATALOG: [PowerUpDefinition; 4] = [
    PowerUpDefinition {
        kind: PowerUpKind::IceCream,
        name: "Ice Cream",
        description: "Question countdown runs slower for 1 minute",
        cost: 80,
        duration_secs: 60,
    },
    PowerUpDefinition {
        kind: PowerUpKind::LifePotion,
        name: "Life Potion",
        description: "Restores 3 lives",
        cost: 100,
        duration_secs: 0,
    },
    PowerUpDefinition {
        kind: PowerUpKind::Pan,
        name: "Frying Pan",
        description: "Helmeted moles go down in a single hit for 1 minute",
        cost: 50,
        duration_secs: 60,
    },
    PowerUpDefinition {
        kind: PowerUpKind::GoldenLight,
        name: "Golden Light",
        description: "The correct mole glows for 30 seconds",
        cost: 150,
        duration_secs: 30,
    },
];

/// A running duration-bearing power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    /// Session clock (ms) at activation
    pub activated_at_ms: u64,
    pub duration_secs: u32,
}

impl ActivePowerUp {
    pub fn expires_at_ms(&self) -> u64 {
        self.activated_at_ms + self.duration_secs as u64 * 1000
    }

    pub fn covers(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms()
    }
}

/// Active power-ups, queried by value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUpLedger {
    entries: Vec<ActivePowerUp>,
}

impl PowerUpLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any entry of `kind` covers `now_ms`
    pub fn is_active(&self, kind: PowerUpKind, now_ms: u64) -> bool {
        self.entries
            .iter()
            .any(|p| p.kind == kind && p.covers(now_ms))
    }

    /// Record a duration-bearing activation. Stacks with existing entries.
    pub fn push(&mut self, kind: PowerUpKind, now_ms: u64) {
        let def = kind.definition();
        if def.is_instant() {
            return;
        }
        self.entries.push(ActivePowerUp {
            kind,
            activated_at_ms: now_ms,
            duration_secs: def.duration_secs,
        });
    }

    /// Drop expired entries, returns how many were removed
    pub fn prune_expired(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|p| p.covers(now_ms));
        before - self.entries.len()
    }

    /// Whole seconds until the last covering entry of `kind` ends
    pub fn remaining_secs(&self, kind: PowerUpKind, now_ms: u64) -> u32 {
        self.entries
            .iter()
            .filter(|p| p.kind == kind && p.covers(now_ms))
            .map(|p| (p.expires_at_ms() - now_ms).div_ceil(1000) as u32)
            .max()
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[ActivePowerUp] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_kinds() {
        for kind in PowerUpKind::ALL {
            assert_eq!(kind.definition().kind, kind);
        }
        assert!(PowerUpKind::LifePotion.definition().is_instant());
        assert_eq!(PowerUpKind::GoldenLight.definition().cost, 150);
    }

    #[test]
    fn test_expiry_window() {
        let mut ledger = PowerUpLedger::new();
        ledger.push(PowerUpKind::Pan, 1_000);
        assert!(ledger.is_active(PowerUpKind::Pan, 1_000));
        assert!(ledger.is_active(PowerUpKind::Pan, 60_999));
        assert!(!ledger.is_active(PowerUpKind::Pan, 61_000));
        assert!(!ledger.is_active(PowerUpKind::IceCream, 1_000));
    }

    #[test]
    fn test_instant_kinds_are_not_recorded() {
        let mut ledger = PowerUpLedger::new();
        ledger.push(PowerUpKind::LifePotion, 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_stacked_entries() {
        let mut ledger = PowerUpLedger::new();
        ledger.push(PowerUpKind::GoldenLight, 0);
        ledger.push(PowerUpKind::GoldenLight, 20_000);
        assert_eq!(ledger.entries().len(), 2);
        assert!(ledger.is_active(PowerUpKind::GoldenLight, 40_000));
        assert_eq!(ledger.remaining_secs(PowerUpKind::GoldenLight, 40_000), 10);
    }

    #[test]
    fn test_prune_is_idempotent() {
        let mut ledger = PowerUpLedger::new();
        ledger.push(PowerUpKind::GoldenLight, 0);
        ledger.push(PowerUpKind::IceCream, 0);
        assert_eq!(ledger.prune_expired(30_000), 1);
        assert_eq!(ledger.prune_expired(30_000), 0);
        assert_eq!(ledger.entries().len(), 1);
        assert_eq!(ledger.entries()[0].kind, PowerUpKind::IceCream);
    }
}
