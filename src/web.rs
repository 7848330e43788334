//! Browser host bindings
//!
//! Exposes a session to JavaScript. The page owns the canvas, draws from
//! `snapshot_json()` once per frame and maps pointer events into simulation
//! space before forwarding them.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::sim::{GameEvent, Session};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already initialized by an earlier module instance
        return;
    }
    log::info!("Puc Rush starting...");
}

/// A session plus the bits of host state the page needs
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    high_scores: HighScores,
    /// Final score waiting to be picked up by the page
    game_over: Option<u64>,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebSession {
        WebSession {
            session: Session::new(seed),
            high_scores: HighScores::new(),
            game_over: None,
        }
    }

    /// Call from requestAnimationFrame with its timestamp
    pub fn tick(&mut self, now: f64) {
        self.session.tick(now);
        for event in self.session.drain_events() {
            if let GameEvent::GameOver { final_score } = event {
                self.high_scores.add_score(final_score, js_sys::Date::now());
                self.game_over = Some(final_score);
            }
        }
    }

    pub fn press_at(&mut self, x: f32, y: f32) {
        self.session.press_at(x, y);
    }

    pub fn move_at(&mut self, x: f32, y: f32) {
        self.session.move_at(x, y);
    }

    pub fn release_at(&mut self, x: f32, y: f32) {
        self.session.release_at(x, y);
    }

    pub fn restart(&mut self) {
        self.game_over = None;
        self.session.restart();
    }

    /// Current snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Final score, once per finished session
    pub fn take_game_over(&mut self) -> Option<f64> {
        self.game_over.take().map(|score| score as f64)
    }

    pub fn high_scores_json(&self) -> Result<String, JsValue> {
        self.high_scores
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
