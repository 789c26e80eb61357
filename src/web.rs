//! Browser bridge
//!
//! Exposes [`PoolGame`] to JavaScript. The page owns the canvas and the
//! animation loop; it calls `tick` once per frame and draws from the JSON
//! snapshot.

use glam::DVec2;
use wasm_bindgen::prelude::*;

use crate::config::SimConfig;
use crate::game::PoolGame;
use crate::sim::{Controller, GameMode, Player, TickInput};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Already initialised when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pool Sim starting...");
}

fn parse_mode(mode: &str) -> Result<GameMode, JsValue> {
    GameMode::from_str(mode).ok_or_else(|| JsValue::from_str(&format!("unknown mode '{mode}'")))
}

fn player_from_index(index: u8) -> Result<Player, JsValue> {
    match index {
        0 => Ok(Player::One),
        1 => Ok(Player::Two),
        _ => Err(JsValue::from_str("player must be 0 or 1")),
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: PoolGame,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// `config_json` may be empty for the default tunables
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, vs_computer: bool, seed: u64, config_json: &str) -> Result<WebGame, JsValue> {
        let mode = parse_mode(mode)?;
        let config = if config_json.trim().is_empty() {
            SimConfig::default()
        } else {
            SimConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let second = if vs_computer {
            Controller::Ai
        } else {
            Controller::Human
        };
        let game = PoolGame::new(config, mode, [Controller::Human, second], seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame {
            game,
            input: TickInput::default(),
        })
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.input.aim = Some(DVec2::new(x, y));
    }

    pub fn pointer_down(&mut self) {
        self.input.press = true;
    }

    pub fn pointer_up(&mut self) {
        self.input.release = true;
    }

    /// Run one frame and return its events as a JSON array
    pub fn tick(&mut self) -> String {
        let events = self.game.tick(&self.input);
        // Edge-triggered inputs last one frame
        self.input.press = false;
        self.input.release = false;
        serde_json::to_string(&events).unwrap_or_default()
    }

    pub fn shoot(&mut self, player: u8, dx: f64, dy: f64, power: f64) -> Result<bool, JsValue> {
        let player = player_from_index(player)?;
        Ok(self.game.apply_shot(player, DVec2::new(dx, dy), power))
    }

    pub fn reset(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = parse_mode(mode)?;
        self.input = TickInput::default();
        self.game.reset(mode);
        Ok(())
    }

    /// Bodies, turn state and notice as JSON
    pub fn snapshot(&self) -> String {
        self.game.snapshot().to_json()
    }
}
