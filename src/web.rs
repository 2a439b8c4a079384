//! Browser bindings
//!
//! The page owns the canvas, the DOM and `requestAnimationFrame`; it calls
//! into these handles with elapsed time and key events and draws the JSON
//! view it gets back.

use wasm_bindgen::prelude::*;

use crate::chase::{Animal, ChaseKey, ChaseSession};
use crate::settings::Settings;
use crate::snake::{SnakeCommand, SnakeSession};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("heart-arcade {} loaded", env!("CARGO_PKG_VERSION"));
}

fn session_seed(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64)
}

/// Serialize a view, logging instead of throwing on failure
fn to_json<T: serde::Serialize>(view: &T) -> String {
    match serde_json::to_string(view) {
        Ok(json) => json,
        Err(err) => {
            log::error!("Failed to serialize view: {err}");
            String::from("null")
        }
    }
}

#[wasm_bindgen]
pub struct SnakeHandle {
    session: SnakeSession,
}

#[wasm_bindgen]
impl SnakeHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SnakeHandle {
        let settings = Settings::load();
        let seed = session_seed(&settings);
        SnakeHandle {
            session: SnakeSession::new(settings.snake, seed),
        }
    }

    /// Feed elapsed wall time; returns the events as JSON
    pub fn advance(&mut self, dt_ms: f64) -> String {
        let events = self.session.advance(dt_ms.max(0.0) as u64);
        to_json(&events)
    }

    /// `KeyboardEvent.key`; returns true when the key was consumed
    pub fn key_down(&mut self, key: &str) -> bool {
        match SnakeCommand::from_key(key) {
            Some(command) => {
                self.session.handle(command);
                true
            }
            None => false,
        }
    }

    pub fn view_json(&self) -> String {
        to_json(&self.session.view())
    }
}

#[wasm_bindgen]
pub struct ChaseHandle {
    session: ChaseSession,
}

#[wasm_bindgen]
impl ChaseHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChaseHandle {
        let settings = Settings::load();
        let seed = session_seed(&settings);
        ChaseHandle {
            session: ChaseSession::new(settings.chase, seed),
        }
    }

    pub fn animals() -> Vec<String> {
        Animal::ALL.iter().map(|a| a.as_str().to_string()).collect()
    }

    pub fn select_animal(&mut self, name: &str) -> bool {
        self.session.select_animal_named(name)
    }

    /// One animation frame; returns the events as JSON
    pub fn frame(&mut self, dt_ms: f64) -> String {
        let events = self.session.advance(dt_ms.max(0.0) as u64);
        to_json(&events)
    }

    /// `KeyboardEvent.code`; returns true when the key was consumed
    pub fn key_down(&mut self, code: &str) -> bool {
        match ChaseKey::from_code(code) {
            Some(key) => {
                self.session.key_down(key);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        match ChaseKey::from_code(code) {
            Some(key) => {
                self.session.key_up(key);
                true
            }
            None => false,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    pub fn view_json(&self) -> String {
        to_json(&self.session.view())
    }
}
