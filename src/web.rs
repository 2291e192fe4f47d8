//! Browser bindings
//!
//! Exposes the game to JavaScript. State crosses the boundary as JSON; sound and
//! celebration cues are queued for the page to play on its own schedule.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::feedback::{FeedbackSink, SoundEffect};
use crate::game::Game;
use crate::persistence::LocalStorage;
use crate::platform;
use crate::sim::{CATALOG, Difficulty, GameMode, PlayMode, PowerUpKind};

/// A cue waiting for the page
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type")]
enum Cue {
    Sound { effect: SoundEffect },
    Celebration { particles: u32 },
}

/// Sink that queues cues for JavaScript
#[derive(Debug, Default)]
struct CueQueue {
    cues: Vec<Cue>,
}

impl FeedbackSink for CueQueue {
    fn play(&mut self, effect: SoundEffect) {
        self.cues.push(Cue::Sound { effect });
    }

    fn celebrate(&mut self, particles: u32) {
        self.cues.push(Cue::Celebration { particles });
    }
}

fn to_js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js_err)
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorage, CueQueue>,
    last_frame_ms: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = platform::random_seed();
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            game: Game::new(LocalStorage, CueQueue::default(), seed),
            last_frame_ms: None,
        }
    }

    /// Identifiers are the enum names, e.g. `("ADD_SUB", "HARD", "TIME_LIMITED")`
    #[wasm_bindgen(js_name = startSession)]
    pub fn start_session(&mut self, mode: &str, difficulty: &str, play_mode: &str) -> Result<(), JsValue> {
        let mode: GameMode = mode.parse().map_err(to_js_err)?;
        let difficulty: Difficulty = difficulty.parse().map_err(to_js_err)?;
        let play_mode: PlayMode = play_mode.parse().map_err(to_js_err)?;
        self.game.start_session(mode, difficulty, play_mode);
        Ok(())
    }

    /// Returns the hit outcome as JSON
    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&mut self, index: usize) -> Result<String, JsValue> {
        let outcome = self.game.select_cell(index).map_err(to_js_err)?;
        to_json(&outcome)
    }

    #[wasm_bindgen(js_name = activatePowerUp)]
    pub fn activate_power_up(&mut self, kind: &str) -> Result<bool, JsValue> {
        let kind: PowerUpKind = kind.parse().map_err(to_js_err)?;
        Ok(self.game.activate_power_up(kind))
    }

    #[wasm_bindgen(js_name = returnToMenu)]
    pub fn return_to_menu(&mut self) {
        self.game.return_to_menu();
    }

    #[wasm_bindgen(js_name = requestRevive)]
    pub fn request_revive(&mut self) -> bool {
        self.game.request_revive()
    }

    /// Call once per animation frame
    pub fn frame(&mut self) {
        let now = platform::now_ms();
        let dt = self.last_frame_ms.map(|last| now - last).unwrap_or(0.0);
        self.last_frame_ms = Some(now);
        self.game.update(dt);
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        to_json(&self.game.snapshot())
    }

    /// Cues produced since the last call
    #[wasm_bindgen(js_name = drainCuesJson)]
    pub fn drain_cues_json(&mut self) -> Result<String, JsValue> {
        let cues = std::mem::take(&mut self.game.sink_mut().cues);
        to_json(&cues)
    }

    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        to_json(&self.game.drain_events())
    }

    #[wasm_bindgen(js_name = catalogJson)]
    pub fn catalog_json(&self) -> Result<String, JsValue> {
        to_json(&CATALOG)
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Math Hammer starting...");
}
