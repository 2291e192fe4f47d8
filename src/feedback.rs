//! Feedback signals for the audio and particle layers
//!
//! The core only names the cue; rendering it as sound or confetti is up to the
//! [`FeedbackSink`] the host plugs in.

use serde::Serialize;

use crate::consts::CELEBRATION_THROTTLE_MS;
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundEffect {
    /// Correct mole cleared
    Whack,
    /// Helmet absorbed a hit
    Clang,
    /// Wrong mole or timeout
    Error,
    /// Bomb struck
    Explosion,
    /// New board popped up
    LevelStart,
}

/// Receives cues from the game
pub trait FeedbackSink {
    fn play(&mut self, effect: SoundEffect);
    fn celebrate(&mut self, particles: u32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("sound {:?}", effect);
    }

    fn celebrate(&mut self, particles: u32) {
        log::trace!("celebration ({} particles)", particles);
    }
}

/// Sink that drops everything
#[derive(Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn play(&mut self, _effect: SoundEffect) {}
    fn celebrate(&mut self, _particles: u32) {}
}

/// At most one celebration per window
#[derive(Debug, Clone, Copy, Default)]
pub struct CelebrationThrottle {
    last_ms: Option<u64>,
}

impl CelebrationThrottle {
    /// Returns true and records `now_ms` if a burst is allowed
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        match self.last_ms {
            Some(last) if now_ms.saturating_sub(last) < CELEBRATION_THROTTLE_MS => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Turns game events into sink calls
#[derive(Debug, Clone)]
pub struct FeedbackRouter {
    pub sound_enabled: bool,
    pub particles: u32,
    throttle: CelebrationThrottle,
}

impl FeedbackRouter {
    pub fn new(sound_enabled: bool, particles: u32) -> Self {
        Self {
            sound_enabled,
            particles,
            throttle: CelebrationThrottle::default(),
        }
    }

    pub fn route<S: FeedbackSink + ?Sized>(&mut self, events: &[GameEvent], now_ms: u64, sink: &mut S) {
        for event in events {
            let effect = match event {
                GameEvent::LevelStart { .. } => Some(SoundEffect::LevelStart),
                GameEvent::Whack { .. } => {
                    if self.throttle.try_fire(now_ms) {
                        sink.celebrate(self.particles);
                    }
                    Some(SoundEffect::Whack)
                }
                GameEvent::Clang { .. } => Some(SoundEffect::Clang),
                GameEvent::Explosion => Some(SoundEffect::Explosion),
                GameEvent::Mistake(_) => Some(SoundEffect::Error),
                _ => None,
            };
            match effect {
                Some(effect) if self.sound_enabled => sink.play(effect),
                _ => {}
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingSink;
    use super::*;
    use crate::sim::Mistake;

    #[test]
    fn test_throttle_window() {
        let mut t = CelebrationThrottle::default();
        assert!(t.try_fire(1_000));
        assert!(!t.try_fire(1_599));
        assert!(t.try_fire(1_600));
    }

    #[test]
    fn test_route_maps_events() {
        let mut router = FeedbackRouter::new(true, 60);
        let mut sink = RecordingSink::default();
        let events = [
            GameEvent::Explosion,
            GameEvent::Mistake(Mistake::Explosion),
            GameEvent::LevelStart { round: 2 },
            GameEvent::Clang { cell: 4 },
            GameEvent::Revived,
        ];
        router.route(&events, 0, &mut sink);
        assert_eq!(
            sink.sounds,
            vec![
                SoundEffect::Explosion,
                SoundEffect::Error,
                SoundEffect::LevelStart,
                SoundEffect::Clang
            ]
        );
        assert!(sink.celebrations.is_empty());
    }

    #[test]
    fn test_celebrations_are_rate_limited() {
        let mut router = FeedbackRouter::new(true, 30);
        let mut sink = RecordingSink::default();
        let whack = [GameEvent::Whack { points: 5, combo: 1 }];
        router.route(&whack, 100, &mut sink);
        router.route(&whack, 300, &mut sink);
        router.route(&whack, 800, &mut sink);
        assert_eq!(sink.celebrations, vec![30, 30]);
        assert_eq!(sink.sounds.len(), 3);
    }

    #[test]
    fn test_muted_still_celebrates() {
        let mut router = FeedbackRouter::new(false, 60);
        let mut sink = RecordingSink::default();
        router.route(&[GameEvent::Whack { points: 5, combo: 1 }], 0, &mut sink);
        assert!(sink.sounds.is_empty());
        assert_eq!(sink.celebrations, vec![60]);
    }
}
