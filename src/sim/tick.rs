//! Fixed timestep tick
//!
//! Advances the session clock by [`TICK_MS`] and services the session's timers in
//! a fixed order: ad countdown, power-up pruning, global clock, round countdown.
//! Every timer reads the live session, so an expiry always acts on the round
//! that is actually on the board.

use super::state::{EndReason, GameStatus, Mistake, Session};
use crate::consts::*;

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session) {
    session.clock_ms += TICK_MS;

    let ad_fired = session.timers.ad.as_mut().is_some_and(|t| t.step());
    if ad_fired {
        session.ad_seconds_left = session.ad_seconds_left.saturating_sub(1);
        if session.ad_seconds_left == 0 {
            session.revive();
            return;
        }
    }

    if session.status != GameStatus::Playing {
        return;
    }

    let prune_fired = session.timers.prune.as_mut().is_some_and(|t| t.step());
    if prune_fired {
        let removed = session.power_ups.prune_expired(session.clock_ms);
        if removed > 0 {
            log::debug!("{} power-up(s) expired", removed);
        }
    }

    let global_fired = session.timers.global.as_mut().is_some_and(|t| t.step());
    if global_fired {
        if session.global_time_left <= 1 {
            session.global_time_left = 0;
            session.end_game(EndReason::TimeUp);
            return;
        }
        session.global_time_left -= 1;
    }

    let round_expired = session.timers.round.as_mut().is_some_and(|t| t.step());
    if round_expired {
        session.timers.round = None;
        session.register_mistake(Mistake::Timeout);
    }
}

/// Run `n` ticks
pub fn advance(session: &mut Session, n: u32) {
    for _ in 0..n {
        tick(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameEvent;
    use crate::sim::powerup::PowerUpKind;
    use crate::sim::question::{Difficulty, GameMode};
    use crate::sim::state::{PlayMode, SessionConfig};

    /// Ticks until the default 3000 ms countdown expires
    const TIMEOUT_TICKS: u32 = (QUESTION_TIMEOUT_MS / TICK_MS) as u32 + 1;

    fn fresh(play_mode: PlayMode) -> Session {
        let mut s = Session::new(2024, SessionConfig::default());
        s.start_session(GameMode::Mixed, Difficulty::Hard, play_mode);
        s
    }

    #[test]
    fn test_round_timeout() {
        let mut s = fresh(PlayMode::Unlimited);
        s.combo = 3;
        let round = s.round_id;

        advance(&mut s, TIMEOUT_TICKS - 1);
        assert_eq!(s.round_id, round);
        assert_eq!(s.round_progress(), 0.0);
        assert_eq!(s.lives, BASE_MAX_LIVES);

        tick(&mut s);
        assert_eq!(s.round_id, round + 1);
        assert_eq!(s.lives, BASE_MAX_LIVES - 1);
        assert_eq!(s.combo, 0);
        assert_eq!(s.round_progress(), 100.0);
        assert!(s.drain_events().contains(&GameEvent::Mistake(Mistake::Timeout)));
    }

    #[test]
    fn test_progress_drains() {
        let mut s = fresh(PlayMode::Unlimited);
        assert_eq!(s.round_progress(), 100.0);
        advance(&mut s, 30);
        assert!((s.round_progress() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_ice_cream_slows_countdown() {
        let mut s = fresh(PlayMode::Unlimited);
        s.score = 100;
        assert!(s.activate_power_up(PowerUpKind::IceCream));
        s.start_round();
        let round = s.round_id;

        // 80% drain stretches 3000 ms to 3750 ms
        advance(&mut s, 75);
        assert_eq!(s.round_id, round);
        tick(&mut s);
        assert_eq!(s.round_id, round + 1);
    }

    #[test]
    fn test_timeout_on_last_life_ends_game() {
        let mut s = fresh(PlayMode::Unlimited);
        s.lives = 1;
        advance(&mut s, TIMEOUT_TICKS);
        assert_eq!(s.status, GameStatus::GameOver);
        assert_eq!(s.end_reason, Some(EndReason::Timeout));
        assert!(!s.timers.any_play_armed());
    }

    #[test]
    fn test_time_up_ignores_lives() {
        let mut s = fresh(PlayMode::TimeLimited);
        // Shields keep timeouts from draining lives while the clock runs out
        s.mistake_shields = u8::MAX;
        advance(&mut s, TIME_LIMIT_SECS * TICKS_PER_SEC - 1);
        assert_eq!(s.status, GameStatus::Playing);
        assert_eq!(s.global_time_left, 1);

        tick(&mut s);
        assert_eq!(s.status, GameStatus::GameOver);
        assert_eq!(s.end_reason, Some(EndReason::TimeUp));
        assert_eq!(s.lives, TIME_LIMITED_MAX_LIVES);
        assert_eq!(s.global_time_left, 0);
    }

    #[test]
    fn test_power_ups_pruned() {
        let mut s = fresh(PlayMode::Unlimited);
        s.mistake_shields = u8::MAX;
        s.score = 200;
        assert!(s.activate_power_up(PowerUpKind::GoldenLight));
        advance(&mut s, 30 * TICKS_PER_SEC);
        assert!(s.power_ups.is_empty());
        assert!(!s.is_power_up_active(PowerUpKind::GoldenLight));
    }

    #[test]
    fn test_nothing_ticks_after_game_over() {
        let mut s = fresh(PlayMode::TimeLimited);
        s.end_game(EndReason::Wrong);
        let time_left = s.global_time_left;
        let round = s.round_id;
        advance(&mut s, 200);
        assert_eq!(s.global_time_left, time_left);
        assert_eq!(s.round_id, round);
    }

    #[test]
    fn test_ad_countdown_revives() {
        let mut s = fresh(PlayMode::TimeLimited);
        s.end_game(EndReason::Explosion);
        assert!(s.request_revive());
        assert_eq!(s.ad_seconds_left, AD_COUNTDOWN_SECS);

        advance(&mut s, AD_COUNTDOWN_SECS * TICKS_PER_SEC - 1);
        assert_eq!(s.status, GameStatus::GameOver);
        assert_eq!(s.ad_seconds_left, 1);

        tick(&mut s);
        assert_eq!(s.status, GameStatus::Playing);
        assert_eq!(s.lives, REVIVE_LIVES);
        assert!(s.timers.global.is_some());
        assert!(!s.is_watching_ad());
        assert!(s.drain_events().contains(&GameEvent::Revived));
    }

    #[test]
    fn test_menu_cancels_ad() {
        let mut s = fresh(PlayMode::Unlimited);
        s.end_game(EndReason::Wrong);
        assert!(s.request_revive());
        s.return_to_menu();
        advance(&mut s, AD_COUNTDOWN_SECS * TICKS_PER_SEC * 2);
        assert_eq!(s.status, GameStatus::Idle);
    }
}
