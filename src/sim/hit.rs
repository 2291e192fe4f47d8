//! Hit resolution: scoring, combos, helmets, bombs and the shared error path

use serde::{Deserialize, Serialize};

use super::board::HazardKind;
use super::powerup::PowerUpKind;
use super::state::{EndReason, GameEvent, GameStatus, Mistake, Session};
use crate::consts::BOARD_CELLS;
use crate::error::{ConfigError, Result};

/// Point bracket for a combo length
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComboTier {
    /// Combo 1-5
    Base,
    /// Combo 6-10
    Hot,
    /// Combo 11-20
    Blazing,
    /// Combo 21+
    Inferno,
}

impl ComboTier {
    pub fn for_combo(combo: u32) -> Self {
        match combo {
            0..=5 => ComboTier::Base,
            6..=10 => ComboTier::Hot,
            11..=20 => ComboTier::Blazing,
            _ => ComboTier::Inferno,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            ComboTier::Base => 5,
            ComboTier::Hot => 10,
            ComboTier::Blazing => 15,
            ComboTier::Inferno => 20,
        }
    }
}

/// What a selection did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HitOutcome {
    /// Not playing, or the hole was empty
    Ignored,
    /// Helmet took the hit, mole stays up
    Clang { hits_remaining: u8 },
    /// Correct mole cleared, next round started
    Cleared { points: u32, combo: u32 },
    /// Went through the error path
    Missed {
        mistake: Mistake,
        shielded: bool,
        game_over: bool,
    },
}

impl Session {
    /// Strike the mole at `index`
    pub fn select_cell(&mut self, index: usize) -> Result<HitOutcome> {
        if index >= BOARD_CELLS {
            return Err(ConfigError::CellOutOfRange(index));
        }
        if self.status != GameStatus::Playing {
            return Ok(HitOutcome::Ignored);
        }
        let cell = self.board.cells[index];
        if !cell.active {
            return Ok(HitOutcome::Ignored);
        }

        if cell.is_bomb() {
            self.emit(GameEvent::Explosion);
            return Ok(self.register_mistake(Mistake::Explosion));
        }
        if !cell.is_correct {
            return Ok(self.register_mistake(Mistake::Wrong));
        }

        let pan = self.is_power_up_active(PowerUpKind::Pan);
        if cell.hazard == HazardKind::Hardened && cell.hits_remaining > 1 && !pan {
            let hits_remaining = cell.hits_remaining - 1;
            self.board.cells[index].hits_remaining = hits_remaining;
            self.emit(GameEvent::Clang { cell: index });
            return Ok(HitOutcome::Clang { hits_remaining });
        }

        Ok(self.award_hit())
    }

    fn award_hit(&mut self) -> HitOutcome {
        self.combo += 1;
        let tier = ComboTier::for_combo(self.combo);
        let points = tier.points();
        self.score += points;
        self.gross_score += points;
        self.max_combo = self.max_combo.max(self.combo);
        self.correct_count += 1;
        self.last_award = Some(tier);
        self.emit(GameEvent::Whack {
            points,
            combo: self.combo,
        });

        self.start_round();

        HitOutcome::Cleared {
            points,
            combo: self.combo,
        }
    }

    /// Shared path for wrong picks, timeouts and bombs.
    ///
    /// A shield, when present, absorbs the life cost and nothing else. Without one
    /// a bomb empties the life pool and any other mistake costs one life.
    pub(crate) fn register_mistake(&mut self, mistake: Mistake) -> HitOutcome {
        self.emit(GameEvent::Mistake(mistake));
        self.combo = 0;

        if self.mistake_shields > 0 {
            self.mistake_shields -= 1;
            self.emit(GameEvent::ShieldUsed {
                remaining: self.mistake_shields,
            });
            self.start_round();
            return HitOutcome::Missed {
                mistake,
                shielded: true,
                game_over: false,
            };
        }

        self.lives = match mistake {
            Mistake::Explosion => 0,
            _ => self.lives.saturating_sub(1),
        };

        let game_over = self.lives == 0;
        if game_over {
            self.end_game(EndReason::from(mistake));
        } else {
            self.start_round();
        }

        HitOutcome::Missed {
            mistake,
            shielded: false,
            game_over,
        }
    }
}
