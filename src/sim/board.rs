//! The 3x3 mole board and the round composer

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::question::{Difficulty, GameMode, Question, generate_distractors, generate_question};
use crate::consts::*;

/// Mole variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HazardKind {
    #[default]
    Normal,
    /// No value, striking it costs the life pool
    Bomb,
    /// Wears a helmet, needs two hits unless PAN is active
    Hardened,
}

/// One hole on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    pub index: usize,
    pub active: bool,
    pub value: Option<u32>,
    pub is_correct: bool,
    pub hazard: HazardKind,
    pub hits_remaining: u8,
    pub highlighted: bool,
}

impl BoardCell {
    /// Hidden, empty hole
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            active: false,
            value: None,
            is_correct: false,
            hazard: HazardKind::Normal,
            hits_remaining: 1,
            highlighted: false,
        }
    }

    pub fn bomb(index: usize) -> Self {
        Self {
            active: true,
            hazard: HazardKind::Bomb,
            ..Self::empty(index)
        }
    }

    pub fn is_bomb(&self) -> bool {
        self.hazard == HazardKind::Bomb
    }
}

/// Fixed nine-cell board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cells: [BoardCell; BOARD_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: std::array::from_fn(BoardCell::empty),
        }
    }
}

impl Board {
    pub fn cell(&self, index: usize) -> Option<&BoardCell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut BoardCell> {
        self.cells.get_mut(index)
    }

    /// Index of the cell holding the answer
    pub fn correct_index(&self) -> Option<usize> {
        self.cells
            .iter()
            .find(|c| c.active && c.is_correct)
            .map(|c| c.index)
    }

    pub fn bomb_index(&self) -> Option<usize> {
        self.cells.iter().find(|c| c.active && c.is_bomb()).map(|c| c.index)
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.active).count()
    }

    /// Hide every mole
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Power-up state sampled when a round is composed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundModifiers {
    pub pan: bool,
    pub golden_light: bool,
}

/// A freshly composed round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub question: Question,
    pub board: Board,
}

/// Compose the next round's question and board.
///
/// Three numeric moles (answer + two distractors) take the first three slots of a
/// shuffled hole order; the fourth slot may hold a bomb. Hardening and bombs only
/// unlock as `correct_count` grows.
pub fn compose_round<R: Rng + ?Sized>(
    mode: GameMode,
    difficulty: Difficulty,
    correct_count: u32,
    modifiers: RoundModifiers,
    rng: &mut R,
) -> Round {
    let question = generate_question(mode, difficulty, rng);
    let [d1, d2] = generate_distractors(question.answer, rng);

    let mut holes: [usize; BOARD_CELLS] = std::array::from_fn(|i| i);
    holes.shuffle(rng);

    let mut spots = [(question.answer, true), (d1, false), (d2, false)];
    spots.shuffle(rng);

    let mut board = Board::default();
    for (&(value, is_correct), &hole) in spots.iter().zip(holes.iter()) {
        let hardened = correct_count >= HARDEN_MIN_CORRECT && rng.random_bool(HARDEN_CHANCE);
        let hits_remaining = if hardened && !modifiers.pan {
            HARDENED_HITS
        } else {
            1
        };
        board.cells[hole] = BoardCell {
            index: hole,
            active: true,
            value: Some(value),
            is_correct,
            hazard: if hardened {
                HazardKind::Hardened
            } else {
                HazardKind::Normal
            },
            hits_remaining,
            highlighted: is_correct && modifiers.golden_light,
        };
    }

    if correct_count > BOMB_MIN_CORRECT && rng.random_bool(BOMB_CHANCE) {
        let hole = holes[spots.len()];
        board.cells[hole] = BoardCell::bomb(hole);
    }

    Round { question, board }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn compose(seed: u64, correct_count: u32, modifiers: RoundModifiers) -> Round {
        let mut rng = Pcg32::seed_from_u64(seed);
        compose_round(GameMode::Mixed, Difficulty::Hard, correct_count, modifiers, &mut rng)
    }

    #[test]
    fn test_exactly_one_correct_cell() {
        for seed in 0..200 {
            let round = compose(seed, seed as u32 % 12, RoundModifiers::default());
            let correct: Vec<_> = round.board.cells.iter().filter(|c| c.is_correct).collect();
            assert_eq!(correct.len(), 1);
            assert!(correct[0].active);
            assert_eq!(correct[0].value, Some(round.question.answer));
        }
    }

    #[test]
    fn test_numeric_cells_and_values() {
        for seed in 0..100 {
            let round = compose(seed, 10, RoundModifiers::default());
            let numeric: Vec<_> = round
                .board
                .cells
                .iter()
                .filter(|c| c.active && !c.is_bomb())
                .collect();
            assert_eq!(numeric.len(), 3);
            let mut values: Vec<u32> = numeric.iter().filter_map(|c| c.value).collect();
            values.sort_unstable();
            values.dedup();
            assert_eq!(values.len(), 3);
        }
    }

    #[test]
    fn test_no_hazards_early() {
        for seed in 0..200 {
            let round = compose(seed, 3, RoundModifiers::default());
            assert!(round.board.bomb_index().is_none());
            assert!(
                round
                    .board
                    .cells
                    .iter()
                    .all(|c| c.hazard == HazardKind::Normal && c.hits_remaining == 1)
            );
            assert_eq!(round.board.active_count(), 3);
        }
    }

    #[test]
    fn test_hazards_appear_later() {
        let mut bombs = 0;
        let mut hardened = 0;
        for seed in 0..300 {
            let round = compose(seed, 8, RoundModifiers::default());
            if let Some(idx) = round.board.bomb_index() {
                bombs += 1;
                let bomb = round.board.cells[idx];
                assert_eq!(bomb.value, None);
                assert!(!bomb.is_correct);
                assert_eq!(round.board.active_count(), 4);
            }
            for cell in round.board.cells.iter().filter(|c| c.hazard == HazardKind::Hardened) {
                hardened += 1;
                assert_eq!(cell.hits_remaining, HARDENED_HITS);
            }
        }
        assert!(bombs > 0);
        assert!(hardened > 0);
    }

    #[test]
    fn test_pan_collapses_hardened_hits() {
        let modifiers = RoundModifiers {
            pan: true,
            golden_light: false,
        };
        let mut hardened = 0;
        for seed in 0..300 {
            let round = compose(seed, 8, modifiers);
            for cell in round.board.cells.iter().filter(|c| c.hazard == HazardKind::Hardened) {
                hardened += 1;
                assert_eq!(cell.hits_remaining, 1);
            }
        }
        assert!(hardened > 0);
    }

    #[test]
    fn test_golden_light_highlights_answer_only() {
        let modifiers = RoundModifiers {
            pan: false,
            golden_light: true,
        };
        let round = compose(42, 0, modifiers);
        for cell in &round.board.cells {
            assert_eq!(cell.highlighted, cell.is_correct);
        }
        let plain = compose(42, 0, RoundModifiers::default());
        assert!(plain.board.cells.iter().all(|c| !c.highlighted));
    }

    #[test]
    fn test_same_seed_same_board() {
        assert_eq!(compose(9, 6, RoundModifiers::default()), compose(9, 6, RoundModifiers::default()));
    }
}
