//! Session state and core simulation types
//!
//! Everything a round, a run and its timers need lives on [`Session`]. Timers
//! are plain counters advanced by [`super::tick`], so there is no callback that
//! can outlive the state it reads.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, BoardCell};
use super::hit::ComboTier;
use super::powerup::{PowerUpKind, PowerUpLedger};
use super::question::{Difficulty, GameMode, Question};
use crate::consts::*;
use crate::grading::Grade;

/// Overall session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Menu, no active round
    #[default]
    Idle,
    /// Round active, countdown running
    Playing,
    /// Run ended, waiting for menu or revive
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    #[default]
    Unlimited,
    /// 120 second global clock, 3 lives
    TimeLimited,
}

impl PlayMode {
    pub fn max_lives(&self) -> u8 {
        match self {
            PlayMode::Unlimited => BASE_MAX_LIVES,
            PlayMode::TimeLimited => TIME_LIMITED_MAX_LIVES,
        }
    }
}

impl std::str::FromStr for PlayMode {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unlimited" => Ok(PlayMode::Unlimited),
            "timelimited" | "time_limited" => Ok(PlayMode::TimeLimited),
            _ => Err(crate::error::ConfigError::UnknownPlayMode(s.to_string())),
        }
    }
}

/// A gameplay error that goes through the shared error path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mistake {
    Wrong,
    Timeout,
    Explosion,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Wrong,
    Timeout,
    Explosion,
    TimeUp,
}

impl From<Mistake> for EndReason {
    fn from(m: Mistake) -> Self {
        match m {
            Mistake::Wrong => EndReason::Wrong,
            Mistake::Timeout => EndReason::Timeout,
            Mistake::Explosion => EndReason::Explosion,
        }
    }
}

/// Signals for the presentation layer, drained by the host after each call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// A new board popped up
    LevelStart { round: u64 },
    /// Correct mole cleared
    Whack { points: u32, combo: u32 },
    /// Helmet absorbed a hit
    Clang { cell: usize },
    /// Bomb struck
    Explosion,
    /// Wrong mole, timeout or bomb
    Mistake(Mistake),
    /// A mistake shield absorbed the life cost
    ShieldUsed { remaining: u8 },
    PowerUpActivated(PowerUpKind),
    GameOver { reason: EndReason, net_score: i64 },
    /// Net score beat the stored high score
    NewHighScore(i64),
    AdStarted,
    Revived,
}

/// Per-round countdown. Progress is kept in integer units so the expiry tick is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundCountdown {
    budget: u64,
    remaining: u64,
    drain: u64,
}

impl RoundCountdown {
    pub fn new(timeout_ms: u64, drain_percent: u64) -> Self {
        let budget = timeout_ms * 100;
        Self {
            budget,
            remaining: budget,
            drain: TICK_MS * drain_percent,
        }
    }

    /// Advance one tick. Returns true when the countdown had already run dry.
    pub fn step(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining = self.remaining.saturating_sub(self.drain);
        false
    }

    /// Remaining share in percent (100 = fresh)
    pub fn progress(&self) -> f32 {
        if self.budget == 0 {
            return 0.0;
        }
        (self.remaining as f64 * 100.0 / self.budget as f64) as f32
    }
}

/// Fires every `period_ticks` ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ticks: u32,
    elapsed: u32,
}

impl Interval {
    pub fn every_secs(secs: u32) -> Self {
        Self {
            period_ticks: (secs * TICKS_PER_SEC).max(1),
            elapsed: 0,
        }
    }

    pub fn step(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period_ticks {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

/// Every timer the session owns. Dropping a handle cancels it.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pub round: Option<RoundCountdown>,
    pub global: Option<Interval>,
    pub prune: Option<Interval>,
    pub ad: Option<Interval>,
}

impl Timers {
    /// Cancel the three gameplay timers. Safe to call when already stopped.
    pub fn cancel_play(&mut self) {
        self.round = None;
        self.global = None;
        self.prune = None;
    }

    pub fn cancel_all(&mut self) {
        self.cancel_play();
        self.ad = None;
    }

    pub fn any_play_armed(&self) -> bool {
        self.round.is_some() || self.global.is_some() || self.prune.is_some()
    }
}

/// Per-session tuning taken from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub question_timeout_ms: u64,
    /// Shields granted at every fresh start
    pub mistake_shields: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            question_timeout_ms: QUESTION_TIMEOUT_MS,
            mistake_shields: 0,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub config: SessionConfig,
    pub status: GameStatus,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub play_mode: PlayMode,
    /// Spendable balance (awards minus purchases)
    pub score: u32,
    /// Everything ever awarded this run
    pub gross_score: u32,
    /// Points spent on power-ups this run
    pub power_up_spend: u32,
    pub high_score: i64,
    pub new_high_score: bool,
    pub lives: u8,
    pub max_lives: u8,
    pub combo: u32,
    pub max_combo: u32,
    pub correct_count: u32,
    pub mistake_shields: u8,
    /// Seconds left on the TimeLimited clock
    pub global_time_left: u32,
    pub question: Option<Question>,
    pub board: Board,
    pub power_ups: PowerUpLedger,
    /// Rounds composed so far, used to tag level-start events
    pub round_id: u64,
    pub last_award: Option<ComboTier>,
    pub end_reason: Option<EndReason>,
    pub exploded: bool,
    pub last_question: Option<Question>,
    pub grade: Option<Grade>,
    pub revive_used: bool,
    pub ad_seconds_left: u32,
    /// Simulated milliseconds since the session was created
    pub clock_ms: u64,
    pub timers: Timers,
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session with the given seed
    pub fn new(seed: u64, config: SessionConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            status: GameStatus::Idle,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            play_mode: PlayMode::default(),
            score: 0,
            gross_score: 0,
            power_up_spend: 0,
            high_score: 0,
            new_high_score: false,
            lives: BASE_MAX_LIVES,
            max_lives: BASE_MAX_LIVES,
            combo: 0,
            max_combo: 0,
            correct_count: 0,
            mistake_shields: 0,
            global_time_left: TIME_LIMIT_SECS,
            question: None,
            board: Board::default(),
            power_ups: PowerUpLedger::new(),
            round_id: 0,
            last_award: None,
            end_reason: None,
            exploded: false,
            last_question: None,
            grade: None,
            revive_used: false,
            ad_seconds_left: 0,
            clock_ms: 0,
            timers: Timers::default(),
            events: Vec::new(),
        }
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Gross score minus power-up spend
    pub fn net_score(&self) -> i64 {
        self.gross_score as i64 - self.power_up_spend as i64
    }

    pub fn is_power_up_active(&self, kind: PowerUpKind) -> bool {
        self.power_ups.is_active(kind, self.clock_ms)
    }

    pub fn is_watching_ad(&self) -> bool {
        self.timers.ad.is_some()
    }

    pub fn round_progress(&self) -> f32 {
        self.timers.round.map(|r| r.progress()).unwrap_or(0.0)
    }

    pub fn fever(&self) -> bool {
        self.combo >= FEVER_COMBO
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Remaining time of an active power-up, for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub remaining_secs: u32,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub status: GameStatus,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub play_mode: PlayMode,
    pub score: u32,
    pub net_score: i64,
    pub high_score: i64,
    pub new_high_score: bool,
    pub lives: u8,
    pub max_lives: u8,
    pub combo: u32,
    pub max_combo: u32,
    pub correct_count: u32,
    pub mistake_shields: u8,
    pub fever: bool,
    pub question: Option<String>,
    pub round_progress: f32,
    pub cells: Vec<BoardCell>,
    /// `m:ss`, TimeLimited only
    pub time_left: Option<String>,
    pub power_ups: Vec<PowerUpView>,
    pub last_award: Option<ComboTier>,
    pub end_reason: Option<EndReason>,
    pub exploded: bool,
    pub last_question: Option<String>,
    pub grade: Option<Grade>,
    pub watching_ad: bool,
    pub ad_seconds_left: u32,
    pub can_revive: bool,
}
