//! Session lifecycle: Idle -> Playing -> GameOver -> Idle, plus the one-off revive

use super::board::{RoundModifiers, compose_round};
use super::powerup::PowerUpKind;
use super::question::{Difficulty, GameMode};
use super::state::{
    EndReason, GameEvent, GameStatus, Interval, PlayMode, PowerUpView, RoundCountdown, Session,
    SessionSnapshot,
};
use crate::consts::*;
use crate::format_clock;
use crate::grading::grade_for;

impl Session {
    /// Fresh start. Resets every per-run counter and arms the run's timers.
    pub fn start_session(&mut self, mode: GameMode, difficulty: Difficulty, play_mode: PlayMode) {
        self.timers.cancel_all();

        self.mode = mode;
        self.difficulty = difficulty;
        self.play_mode = play_mode;
        self.status = GameStatus::Playing;
        self.score = 0;
        self.gross_score = 0;
        self.power_up_spend = 0;
        self.new_high_score = false;
        self.max_lives = play_mode.max_lives();
        self.lives = self.max_lives;
        self.combo = 0;
        self.max_combo = 0;
        self.correct_count = 0;
        self.mistake_shields = self.config.mistake_shields;
        self.global_time_left = TIME_LIMIT_SECS;
        self.power_ups.clear();
        self.last_award = None;
        self.end_reason = None;
        self.exploded = false;
        self.last_question = None;
        self.grade = None;
        self.revive_used = false;
        self.ad_seconds_left = 0;

        self.arm_run_timers();

        log::info!(
            "Session started: {} / {} / {:?} (seed {})",
            mode.as_str(),
            difficulty.as_str(),
            play_mode,
            self.seed
        );

        self.start_round();
    }

    /// Arm the power-up prune tick and, in TimeLimited mode, the global clock
    fn arm_run_timers(&mut self) {
        self.timers.prune = Some(Interval::every_secs(1));
        self.timers.global = match self.play_mode {
            PlayMode::TimeLimited => Some(Interval::every_secs(1)),
            PlayMode::Unlimited => None,
        };
    }

    /// Compose a new board and restart the round countdown.
    /// The previous countdown is dropped before the new one is armed.
    pub(crate) fn start_round(&mut self) {
        self.timers.round = None;

        let modifiers = RoundModifiers {
            pan: self.is_power_up_active(PowerUpKind::Pan),
            golden_light: self.is_power_up_active(PowerUpKind::GoldenLight),
        };
        let drain = if self.is_power_up_active(PowerUpKind::IceCream) {
            ICE_CREAM_DRAIN_PERCENT
        } else {
            NORMAL_DRAIN_PERCENT
        };

        let (mode, difficulty, correct_count) = (self.mode, self.difficulty, self.correct_count);
        let round = compose_round(mode, difficulty, correct_count, modifiers, self.rng());

        self.round_id += 1;
        log::debug!(
            "Round {}: {} (answer {}, correct so far {})",
            self.round_id,
            round.question,
            round.question.answer,
            correct_count
        );

        self.question = Some(round.question);
        self.board = round.board;
        self.timers.round = Some(RoundCountdown::new(self.config.question_timeout_ms, drain));
        self.emit(GameEvent::LevelStart {
            round: self.round_id,
        });
    }

    /// Enter GameOver: stop every gameplay timer, settle the score and grade it
    pub(crate) fn end_game(&mut self, reason: EndReason) {
        self.timers.cancel_play();

        self.status = GameStatus::GameOver;
        self.end_reason = Some(reason);
        self.exploded = reason == EndReason::Explosion;
        self.last_question = self.question.take();
        self.board.reset();

        let net = self.net_score();
        let grade = grade_for(net);
        self.grade = Some(grade);

        if net > self.high_score {
            self.high_score = net;
            self.new_high_score = true;
            self.emit(GameEvent::NewHighScore(net));
        }

        log::info!(
            "Game over ({:?}): net score {} [{}], max combo {}",
            reason,
            net,
            grade.title,
            self.max_combo
        );
        self.emit(GameEvent::GameOver {
            reason,
            net_score: net,
        });
    }

    /// Back to the menu from any state. Cancels every timer.
    pub fn return_to_menu(&mut self) {
        self.timers.cancel_all();
        self.status = GameStatus::Idle;
        self.question = None;
        self.board.reset();
        self.ad_seconds_left = 0;
    }

    /// Buy a power-up with the spendable balance. Only possible while playing.
    pub fn activate_power_up(&mut self, kind: PowerUpKind) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let def = kind.definition();
        if self.score < def.cost {
            return false;
        }

        self.score -= def.cost;
        self.power_up_spend += def.cost;

        match kind {
            PowerUpKind::LifePotion => {
                self.lives = (self.lives + LIFE_POTION_LIVES).min(self.max_lives);
            }
            _ => self.power_ups.push(kind, self.clock_ms),
        }

        log::debug!("Power-up {} activated (-{} pts)", def.name, def.cost);
        self.emit(GameEvent::PowerUpActivated(kind));
        true
    }

    /// Whether the summary screen may offer a revive
    pub fn can_revive(&self) -> bool {
        self.status == GameStatus::GameOver
            && !self.revive_used
            && !self.is_watching_ad()
            && self.end_reason != Some(EndReason::TimeUp)
    }

    /// Start the ad countdown that precedes a revive
    pub fn request_revive(&mut self) -> bool {
        if !self.can_revive() {
            return false;
        }
        self.timers.ad = Some(Interval::every_secs(1));
        self.ad_seconds_left = AD_COUNTDOWN_SECS;
        self.emit(GameEvent::AdStarted);
        true
    }

    /// Leave GameOver with one life and a fresh round
    pub(crate) fn revive(&mut self) {
        self.timers.ad = None;
        self.ad_seconds_left = 0;
        self.revive_used = true;

        self.status = GameStatus::Playing;
        self.lives = REVIVE_LIVES;
        self.exploded = false;
        self.end_reason = None;
        self.grade = None;
        self.new_high_score = false;
        self.combo = 0;

        self.arm_run_timers();
        log::info!("Revived with {} life", self.lives);
        self.emit(GameEvent::Revived);
        self.start_round();
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        let power_ups = PowerUpKind::ALL
            .iter()
            .filter(|k| self.is_power_up_active(**k))
            .map(|&kind| PowerUpView {
                kind,
                remaining_secs: self.power_ups.remaining_secs(kind, self.clock_ms),
            })
            .collect();

        SessionSnapshot {
            status: self.status,
            mode: self.mode,
            difficulty: self.difficulty,
            play_mode: self.play_mode,
            score: self.score,
            net_score: self.net_score(),
            high_score: self.high_score,
            new_high_score: self.new_high_score,
            lives: self.lives,
            max_lives: self.max_lives,
            combo: self.combo,
            max_combo: self.max_combo,
            correct_count: self.correct_count,
            mistake_shields: self.mistake_shields,
            fever: self.fever(),
            question: self.question.as_ref().map(|q| q.display_text()),
            round_progress: self.round_progress(),
            cells: self.board.cells.to_vec(),
            time_left: match self.play_mode {
                PlayMode::TimeLimited => Some(format_clock(self.global_time_left)),
                PlayMode::Unlimited => None,
            },
            power_ups,
            last_award: self.last_award,
            end_reason: self.end_reason,
            exploded: self.exploded,
            last_question: self.last_question.as_ref().map(|q| q.display_text()),
            grade: self.grade,
            watching_ad: self.is_watching_ad(),
            ad_seconds_left: self.ad_seconds_left,
            can_revive: self.can_revive(),
        }
    }
}
