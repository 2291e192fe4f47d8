//! Arithmetic question and distractor generation

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::DISTRACTOR_COUNT;
use crate::error::ConfigError;

/// Which operators a run draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    AddSub,
    MulDiv,
    #[default]
    Mixed,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::AddSub => "AddSub",
            GameMode::MulDiv => "MulDiv",
            GameMode::Mixed => "Mixed",
        }
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "addsub" | "add_sub" => Ok(GameMode::AddSub),
            "muldiv" | "mul_div" => Ok(GameMode::MulDiv),
            "mixed" => Ok(GameMode::Mixed),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Operand bounds preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Simple,
    #[default]
    Hard,
    Master,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Simple => "Simple",
            Difficulty::Hard => "Hard",
            Difficulty::Master => "Master",
        }
    }

    /// Exclusive-ish upper bound for addition/subtraction operands
    pub fn add_sub_max(&self) -> u32 {
        match self {
            Difficulty::Simple => 10,
            Difficulty::Hard => 25,
            Difficulty::Master => 100,
        }
    }

    /// Upper bound for multiplication/division factors
    pub fn mul_div_max(&self) -> u32 {
        match self {
            Difficulty::Simple => 5,
            Difficulty::Hard => 9,
            Difficulty::Master => 15,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(Difficulty::Simple),
            "hard" => Ok(Difficulty::Hard),
            "master" => Ok(Difficulty::Master),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '×',
            Operator::Div => '÷',
        }
    }

    fn pick<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> Self {
        match mode {
            GameMode::AddSub => {
                if rng.random_bool(0.5) {
                    Operator::Add
                } else {
                    Operator::Sub
                }
            }
            GameMode::MulDiv => {
                if rng.random_bool(0.5) {
                    Operator::Mul
                } else {
                    Operator::Div
                }
            }
            GameMode::Mixed => {
                const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];
                ALL[rng.random_range(0..ALL.len())]
            }
        }
    }
}

/// One round's question. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub operator: Operator,
    pub left: u32,
    pub right: u32,
    pub answer: u32,
}

impl Question {
    /// Build a question from caller operands. `None` when the result would not be
    /// a non-negative whole number (negative difference, zero divisor, remainder).
    pub fn checked(operator: Operator, left: u32, right: u32) -> Option<Self> {
        let answer = match operator {
            Operator::Add => left.checked_add(right)?,
            Operator::Sub => left.checked_sub(right)?,
            Operator::Mul => left.checked_mul(right)?,
            Operator::Div => {
                if right == 0 || left % right != 0 {
                    return None;
                }
                left / right
            }
        };
        Some(Self {
            operator,
            left,
            right,
            answer,
        })
    }

    /// Operands must already satisfy the generator's bounds
    pub(crate) fn new(operator: Operator, left: u32, right: u32) -> Self {
        let answer = match operator {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => left / right,
        };
        Self {
            operator,
            left,
            right,
            answer,
        }
    }

    /// Human-readable prompt, e.g. `7 × 3 = ?`
    pub fn display_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.left, self.operator.symbol(), self.right)
    }
}

/// Generate a question for the given mode and difficulty
pub fn generate_question<R: Rng + ?Sized>(mode: GameMode, difficulty: Difficulty, rng: &mut R) -> Question {
    let add_max = difficulty.add_sub_max();
    let mul_max = difficulty.mul_div_max();

    match Operator::pick(mode, rng) {
        Operator::Add => {
            // Sum stays strictly below the bound
            let a = rng.random_range(1..add_max);
            let b = rng.random_range(0..add_max - a);
            Question::new(Operator::Add, a, b)
        }
        Operator::Sub => {
            let a = rng.random_range(1..add_max);
            let b = rng.random_range(0..=a);
            Question::new(Operator::Sub, a, b)
        }
        Operator::Mul => {
            let a = rng.random_range(2..=mul_max);
            let b = rng.random_range(1..mul_max);
            Question::new(Operator::Mul, a, b)
        }
        Operator::Div => {
            // Built from the quotient so there is never a remainder
            let divisor = rng.random_range(2..=mul_max);
            let quotient = rng.random_range(1..mul_max);
            Question::new(Operator::Div, divisor * quotient, divisor)
        }
    }
}

/// Attempts before falling back to fixed offsets
const MAX_DISTRACTOR_ATTEMPTS: u32 = 64;

/// Two distinct, non-negative wrong answers within ±5 of `correct`
pub fn generate_distractors<R: Rng + ?Sized>(correct: u32, rng: &mut R) -> [u32; DISTRACTOR_COUNT] {
    let mut picked: Vec<u32> = Vec::with_capacity(DISTRACTOR_COUNT);

    for _ in 0..MAX_DISTRACTOR_ATTEMPTS {
        if picked.len() == DISTRACTOR_COUNT {
            break;
        }
        let magnitude = rng.random_range(1..=5i64);
        let offset = if rng.random_bool(0.5) { magnitude } else { -magnitude };
        let candidate = correct as i64 + offset;
        if candidate < 0 {
            continue;
        }
        let candidate = candidate as u32;
        if !picked.contains(&candidate) {
            picked.push(candidate);
        }
    }

    let mut fallback = correct + 6;
    while picked.len() < DISTRACTOR_COUNT {
        if !picked.contains(&fallback) {
            log::debug!("Distractor fallback {} for answer {}", fallback, correct);
            picked.push(fallback);
        }
        fallback += 1;
    }

    [picked[0], picked[1]]
}
