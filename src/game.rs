//! Host facade
//!
//! Owns the session plus its collaborators (storage, feedback sink) and turns
//! variable frame deltas into fixed ticks. Renderers talk to this type only.

use crate::consts::*;
use crate::error::ConfigError;
use crate::feedback::{FeedbackRouter, FeedbackSink};
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{
    Difficulty, GameEvent, GameMode, HitOutcome, PlayMode, PowerUpKind, Session, SessionSnapshot,
    tick,
};

pub struct Game<S: KeyValueStore, F: FeedbackSink> {
    session: Session,
    settings: Settings,
    store: S,
    sink: F,
    router: FeedbackRouter,
    high_score: HighScore,
    /// Unconsumed frame time
    accumulator_ms: f64,
    /// Events not yet collected by the host
    pending: Vec<GameEvent>,
}

impl<S: KeyValueStore, F: FeedbackSink> Game<S, F> {
    pub fn new(store: S, sink: F, seed: u64) -> Self {
        let settings = Settings::load(&store);
        let high_score = HighScore::load(&store);
        let mut session = Session::new(seed, settings.session_config());
        session.high_score = high_score.best;
        Self {
            session,
            router: FeedbackRouter::new(settings.sound_active(), settings.celebration_particles()),
            settings,
            store,
            sink,
            high_score,
            accumulator_ms: 0.0,
            pending: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sink(&self) -> &F {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut F {
        &mut self.sink
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_score(&self) -> i64 {
        self.high_score.best
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Replace and persist settings. Takes effect at the next fresh start.
    pub fn update_settings(&mut self, settings: Settings) {
        settings.save(&mut self.store);
        self.router = FeedbackRouter::new(settings.sound_active(), settings.celebration_particles());
        self.settings = settings;
    }

    /// Fresh start with the given selection (remembered in settings)
    pub fn start_session(&mut self, mode: GameMode, difficulty: Difficulty, play_mode: PlayMode) {
        if (mode, difficulty, play_mode)
            != (self.settings.mode, self.settings.difficulty, self.settings.play_mode)
        {
            let settings = Settings {
                mode,
                difficulty,
                play_mode,
                ..self.settings.clone()
            };
            self.update_settings(settings);
        }

        // A failed read must not lower the best already known
        let stored = HighScore::load(&self.store);
        self.high_score.record(stored.best);
        self.session.high_score = self.high_score.best;
        self.session.config = self.settings.session_config();
        self.accumulator_ms = 0.0;
        self.session.start_session(mode, difficulty, play_mode);
        self.flush();
    }

    pub fn select_cell(&mut self, index: usize) -> Result<HitOutcome, ConfigError> {
        let outcome = self.session.select_cell(index)?;
        self.flush();
        Ok(outcome)
    }

    pub fn activate_power_up(&mut self, kind: PowerUpKind) -> bool {
        let ok = self.session.activate_power_up(kind);
        self.flush();
        ok
    }

    pub fn return_to_menu(&mut self) {
        self.session.return_to_menu();
        self.accumulator_ms = 0.0;
        self.flush();
    }

    pub fn request_revive(&mut self) -> bool {
        let ok = self.session.request_revive();
        self.flush();
        ok
    }

    /// Feed elapsed wall time; runs as many fixed ticks as fit.
    /// Returns the number of ticks run.
    pub fn update(&mut self, dt_ms: f64) -> u32 {
        if !dt_ms.is_finite() {
            log::warn!("Ignoring non-finite frame delta {}", dt_ms);
            return 0;
        }
        let max_frame = (TICK_MS * MAX_SUBSTEPS as u64) as f64;
        self.accumulator_ms += dt_ms.clamp(0.0, max_frame);

        let mut substeps = 0;
        while self.accumulator_ms >= TICK_MS as f64 && substeps < MAX_SUBSTEPS {
            tick(&mut self.session);
            self.accumulator_ms -= TICK_MS as f64;
            substeps += 1;
        }
        if substeps > 0 {
            self.flush();
        }
        substeps
    }

    /// Take events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Route session events to feedback and persist a new high score
    fn flush(&mut self) {
        let events = self.session.drain_events();
        if events.is_empty() {
            return;
        }
        self.router.route(&events, self.session.clock_ms, &mut self.sink);
        for event in &events {
            if let GameEvent::NewHighScore(net) = *event {
                if self.high_score.record(net) {
                    self.high_score.save(&mut self.store);
                }
            }
        }
        self.pending.extend(events);
    }
}
