//! WASM bridge module for JavaScript interop
//!
//! The page owns the canvas and the animation loop. It passes a draw callback
//! that receives each frame as JSON, then calls `frame()` from
//! `requestAnimationFrame` for as long as it returns true. Lifecycle events
//! go to the optional `on_event` callback.

use crate::{
    Config, Difficulty, Direction, Event, Game, ManualScheduler, Mode, Side, Surface, View, Viewport,
};
use wasm_bindgen::prelude::*;

/// Surface backed by JavaScript callbacks
struct JsSurface {
    viewport: Viewport,
    draw: Option<js_sys::Function>,
    on_event: Option<js_sys::Function>,
}

impl JsSurface {
    fn call(callback: &js_sys::Function, json: &str) {
        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(json)) {
            log::warn!("surface callback failed: {:?}", e);
        }
    }
}

impl Surface for JsSurface {
    fn viewport(&self) -> Option<Viewport> {
        self.draw.as_ref().map(|_| self.viewport)
    }

    fn present(&mut self, view: &View) {
        if let Some(draw) = &self.draw {
            match serde_json::to_string(view) {
                Ok(json) => Self::call(draw, &json),
                Err(e) => log::warn!("failed to serialize view: {}", e),
            }
        }
    }

    fn notify(&mut self, event: &Event) {
        if let Some(on_event) = &self.on_event {
            match serde_json::to_string(event) {
                Ok(json) => Self::call(on_event, &json),
                Err(e) => log::warn!("failed to serialize event: {}", e),
            }
        }
    }
}

fn parse_config(config_json: &str) -> Config {
    if config_json.trim().is_empty() {
        return Config::default();
    }
    // Fall back to defaults on a malformed config
    serde_json::from_str(config_json).unwrap_or_else(|e| {
        log::warn!("failed to parse config JSON, using defaults: {}", e);
        Config::default()
    })
}

fn parse_side(side: &str) -> Option<Side> {
    match side {
        "left" => Some(Side::Left),
        "right" => Some(Side::Right),
        _ => None,
    }
}

/// WASM-compatible wrapper around the core Game engine
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game<JsSurface>,
    scheduler: ManualScheduler,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a match drawing through `draw`. Fails without a draw callback.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: String,
        width: f32,
        height: f32,
        draw: Option<js_sys::Function>,
        on_event: Option<js_sys::Function>,
    ) -> Result<WasmGame, JsValue> {
        let config = parse_config(&config_json);
        let surface = JsSurface {
            viewport: Viewport::new(width, height),
            draw,
            on_event,
        };

        let inner = Game::new(config, surface).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("WasmGame created on {}x{} field", width, height);

        Ok(WasmGame {
            inner,
            scheduler: ManualScheduler::new(),
        })
    }

    /// Begin play: `mode` is "ai" or "versus". Unknown difficulty names fall
    /// back to medium.
    pub fn start(&mut self, mode: &str, difficulty: Option<String>) {
        let mode = match mode {
            "ai" => Mode::Ai(
                difficulty
                    .as_deref()
                    .and_then(Difficulty::from_str)
                    .unwrap_or_default(),
            ),
            _ => Mode::Versus,
        };
        self.inner.start(mode, &mut self.scheduler);
    }

    /// Run one frame if one was requested. Returns true when the page should
    /// request another animation frame.
    pub fn frame(&mut self) -> bool {
        if self.scheduler.take() {
            self.inner.frame(&mut self.scheduler);
        }
        self.scheduler.is_pending()
    }

    /// Key press/release for `side` ("left" or "right")
    pub fn set_directional_input(&mut self, side: &str, up: bool, pressed: bool) {
        let Some(side) = parse_side(side) else {
            log::debug!("unknown side {:?}", side);
            return;
        };
        let direction = if up { Direction::Up } else { Direction::Down };
        self.inner.set_directional_input(side, direction, pressed);
    }

    pub fn toggle_pause(&mut self) {
        self.inner.toggle_pause();
    }

    /// Reflow for a host `available_width` pixels wide
    pub fn fit(&mut self, available_width: f32) {
        if let Some(viewport) = Viewport::fit(available_width) {
            self.inner.resize(viewport.width, viewport.height);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    /// Play again after game over
    pub fn restart(&mut self) {
        self.inner.restart(&mut self.scheduler);
    }

    /// Tear the match down and release its callbacks
    pub fn stop(self) {
        let WasmGame {
            inner,
            mut scheduler,
        } = self;
        drop(inner.stop(&mut scheduler));
    }

    /// Get the current game view as JSON string
    pub fn view_json(&self) -> String {
        serde_json::to_string(&self.inner.view()).unwrap_or_else(|e| {
            log::warn!("failed to serialize view: {}", e);
            "{}".to_string()
        })
    }

    pub fn mode_label(&self) -> String {
        self.inner.mode().label()
    }

    pub fn winner_label(&self) -> Option<String> {
        self.inner.winner_label().map(str::to_string)
    }

    /// Get the current tick number
    pub fn get_tick(&self) -> u32 {
        self.inner.tick
    }

    /// Check if the game is currently advancing
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }

    /// Get a human-readable status string
    pub fn status_string(&self) -> String {
        self.inner.status_string().to_string()
    }
}

/// Create a default config as JSON string (utility for JavaScript)
#[wasm_bindgen]
pub fn default_config_json() -> String {
    serde_json::to_string_pretty(&Config::default()).unwrap_or_else(|_| "{}".to_string())
}

/// Initialize WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Pong WASM module initialized");
}
