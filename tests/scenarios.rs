// End-to-end scenarios driven through the public session API.
// Boards are nudged directly where a scenario needs a specific layout.

use math_hammer::consts::*;
use math_hammer::sim::{
    BoardCell, Difficulty, EndReason, GameMode, GameStatus, HazardKind, HitOutcome, Mistake,
    PlayMode, PowerUpKind, Session, SessionConfig, tick,
};

fn start(seed: u64, mode: GameMode, difficulty: Difficulty, play_mode: PlayMode) -> Session {
    let mut s = Session::new(seed, SessionConfig::default());
    s.start_session(mode, difficulty, play_mode);
    s
}

/// Strip helmets and bombs so the next hit on the answer always clears
fn plain_board(s: &mut Session) {
    for cell in s.board.cells.iter_mut() {
        if cell.is_bomb() {
            *cell = BoardCell::empty(cell.index);
        } else {
            cell.hazard = HazardKind::Normal;
            cell.hits_remaining = 1;
        }
    }
}

fn hit_answer(s: &mut Session) -> HitOutcome {
    let idx = s.board.correct_index().expect("board has an answer");
    s.select_cell(idx).expect("index in range")
}

#[test]
fn six_correct_hits_reach_the_second_tier() {
    let mut s = start(11, GameMode::AddSub, Difficulty::Hard, PlayMode::Unlimited);
    for _ in 0..6 {
        plain_board(&mut s);
        assert!(matches!(hit_answer(&mut s), HitOutcome::Cleared { .. }));
    }
    assert_eq!(s.combo, 6);
    assert_eq!(s.score, 35);
    assert_eq!(s.lives, 5);
}

#[test]
fn bomb_on_last_life_ends_the_run() {
    let mut s = start(12, GameMode::Mixed, Difficulty::Simple, PlayMode::Unlimited);
    s.lives = 1;
    s.board.cells[4] = BoardCell::bomb(4);
    s.select_cell(4).unwrap();
    assert_eq!(s.lives, 0);
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.end_reason, Some(EndReason::Explosion));
    assert!(s.exploded);
}

#[test]
fn life_potion_caps_at_max_lives() {
    let mut s = start(13, GameMode::Mixed, Difficulty::Hard, PlayMode::Unlimited);
    s.score = 150;
    s.lives = 2;
    assert_eq!(s.max_lives, 5);
    assert!(s.activate_power_up(PowerUpKind::LifePotion));
    assert_eq!(s.score, 50);
    assert_eq!(s.lives, 5);
    assert!(s.power_ups.is_empty());
}

#[test]
fn pan_clears_hardened_answer_in_one_hit() {
    let mut s = start(14, GameMode::MulDiv, Difficulty::Hard, PlayMode::Unlimited);
    s.score = 50;
    assert!(s.activate_power_up(PowerUpKind::Pan));

    plain_board(&mut s);
    let idx = s.board.correct_index().unwrap();
    s.board.cells[idx].hazard = HazardKind::Hardened;
    s.board.cells[idx].hits_remaining = HARDENED_HITS;
    let round = s.round_id;

    assert!(matches!(s.select_cell(idx).unwrap(), HitOutcome::Cleared { .. }));
    assert_eq!(s.round_id, round + 1);
}

#[test]
fn global_clock_ends_run_with_lives_left() {
    let mut s = start(15, GameMode::AddSub, Difficulty::Simple, PlayMode::TimeLimited);
    let mut ticks = 0;
    while s.status == GameStatus::Playing {
        tick(&mut s);
        ticks += 1;
        if ticks % 10 == 0 && s.status == GameStatus::Playing {
            plain_board(&mut s);
            hit_answer(&mut s);
        }
        assert!(ticks <= TIME_LIMIT_SECS * TICKS_PER_SEC, "clock never ran out");
    }
    assert_eq!(ticks, TIME_LIMIT_SECS * TICKS_PER_SEC);
    assert_eq!(s.end_reason, Some(EndReason::TimeUp));
    assert_eq!(s.lives, TIME_LIMITED_MAX_LIVES);
}

#[test]
fn mistakes_reset_combo() {
    let mut s = start(16, GameMode::Mixed, Difficulty::Hard, PlayMode::Unlimited);
    for mistake in [Mistake::Wrong, Mistake::Timeout, Mistake::Explosion] {
        s.lives = 5;
        plain_board(&mut s);
        hit_answer(&mut s);
        plain_board(&mut s);
        hit_answer(&mut s);
        assert_eq!(s.combo, 2);

        match mistake {
            Mistake::Wrong => {
                let idx = s
                    .board
                    .cells
                    .iter()
                    .find(|c| c.active && !c.is_correct && !c.is_bomb())
                    .unwrap()
                    .index;
                s.select_cell(idx).unwrap();
            }
            Mistake::Timeout => {
                while s.combo > 0 {
                    tick(&mut s);
                }
            }
            Mistake::Explosion => {
                s.mistake_shields = 1;
                s.board.cells[0] = BoardCell::bomb(0);
                s.select_cell(0).unwrap();
            }
        }
        assert_eq!(s.combo, 0, "{mistake:?}");
        assert_eq!(s.status, GameStatus::Playing);
    }
}

#[test]
fn net_score_subtracts_spend_and_high_score_only_rises() {
    let mut s = start(17, GameMode::AddSub, Difficulty::Simple, PlayMode::Unlimited);
    s.high_score = 1_000;
    for _ in 0..12 {
        plain_board(&mut s);
        hit_answer(&mut s);
    }
    let gross = s.gross_score;
    assert!(s.activate_power_up(PowerUpKind::Pan));
    assert_eq!(s.net_score(), gross as i64 - 50);

    s.lives = 1;
    s.board.cells[0] = BoardCell::bomb(0);
    s.select_cell(0).unwrap();
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(s.high_score, 1_000);
    assert!(!s.new_high_score);
}

#[test]
fn revive_once_after_ad() {
    let mut s = start(18, GameMode::Mixed, Difficulty::Hard, PlayMode::Unlimited);
    s.lives = 1;
    s.board.cells[0] = BoardCell::bomb(0);
    s.select_cell(0).unwrap();
    assert!(s.request_revive());
    for _ in 0..AD_COUNTDOWN_SECS * TICKS_PER_SEC {
        tick(&mut s);
    }
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.lives, 1);
    assert_eq!(s.combo, 0);
    assert!(s.question.is_some());

    s.board.cells[0] = BoardCell::bomb(0);
    s.select_cell(0).unwrap();
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(!s.request_revive());
}
