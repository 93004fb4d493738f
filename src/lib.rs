//! Koi IK - Wasm Core
//!
//! A fish whose head chases the pointer. The spine is a follow-the-leader IK
//! chain; body, fins, tail and eyes are rebuilt from it every frame as a draw
//! list and replayed on a 2D canvas.

pub mod chain;
pub mod creature;
pub mod draw;
pub mod frame;
pub mod math;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
mod fish_constants;
#[cfg(target_arch = "wasm32")]
mod state;

use wasm_bindgen::prelude::*;

pub use chain::Chain;
pub use creature::{Creature, CreatureConfig, Curvature, HeadOrientation};
pub use draw::{DrawCommand, DrawTarget, Rgba};
pub use glam::Vec2;

#[cfg(target_arch = "wasm32")]
pub use canvas::{init, init_with_config, init_with_preset};
#[cfg(target_arch = "wasm32")]
pub use frame::{start_loop, stop_loop};

cfg_if::cfg_if! {
    if #[cfg(all(target_arch = "wasm32", debug_assertions))] {
        const LOG_LEVEL: log::Level = log::Level::Debug;
    } else if #[cfg(target_arch = "wasm32")] {
        const LOG_LEVEL: log::Level = log::Level::Info;
    }
}

/// Route `log` output to the browser console (safe to call repeatedly)
#[cfg(target_arch = "wasm32")]
pub(crate) fn init_logging() {
    console_log::init_with_level(LOG_LEVEL).ok();
}

/// Move the steering target, in canvas pixels
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_pointer(x: f32, y: f32) {
    state::with_app_state_mut(|app| app.pointer = Vec2::new(x, y));
}

/// Advance and draw a single frame
/// Use this instead of start_loop() when JS drives the timing (e.g. requestAnimationFrame)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn render_frame() {
    state::with_app_state_mut(|app| app.step());
}

/// Spine joint positions flattened to [x0, y0, x1, y1, ...]
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_joint_positions() -> Vec<f32> {
    state::with_app_state(|app| bytemuck::cast_slice::<Vec2, f32>(app.creature.spine().joints()).to_vec())
        .unwrap_or_default()
}

/// The current frame's draw list as plain JS objects
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_draw_commands() -> Result<JsValue, JsValue> {
    let commands = state::with_app_state(|app| app.creature.draw_commands()).unwrap_or_default();
    serde_wasm_bindgen::to_value(&commands).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Names accepted by init_with_preset()
#[wasm_bindgen]
pub fn preset_names() -> Vec<String> {
    CreatureConfig::preset_names().map(String::from).collect()
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(msg: &str) {
    log::info!("{}", msg);
}
