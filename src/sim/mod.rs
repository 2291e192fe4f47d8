//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies

pub mod board;
pub mod hit;
pub mod powerup;
pub mod question;
pub mod session;
pub mod state;
pub mod tick;

pub use board::{Board, BoardCell, HazardKind, Round, RoundModifiers, compose_round};
pub use hit::{ComboTier, HitOutcome};
pub use powerup::{ActivePowerUp, CATALOG, PowerUpDefinition, PowerUpKind, PowerUpLedger};
pub use question::{
    Difficulty, GameMode, Operator, Question, generate_distractors, generate_question,
};
pub use state::{
    EndReason, GameEvent, GameStatus, Mistake, PlayMode, PowerUpView, Session, SessionConfig,
    SessionSnapshot,
};
pub use tick::{advance, tick};
