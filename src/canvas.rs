//! Canvas 2D rendering module
//!
//! Replays the creature's draw list on a `CanvasRenderingContext2d` and owns
//! the WASM entry points that set everything up.

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::creature::{Creature, CreatureConfig};
use crate::draw::{DrawCommand, DrawTarget};
use crate::fish_constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::math::Vec2;
use crate::state::{initialize_app_state, AppState, PointerListener};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    /// Grab the 2D context of `canvas`
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn draw(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(0.0, 0.0, self.width, self.height);
            }
            DrawCommand::Polygon {
                points,
                fill,
                outline,
                thickness,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();

                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill();
                if *thickness > 0.0 {
                    ctx.set_stroke_style_str(&outline.to_css());
                    ctx.set_line_width(*thickness as f64);
                    ctx.stroke();
                }
            }
            DrawCommand::Rect {
                center,
                size,
                rotation,
                fill,
            } => {
                ctx.save();
                ctx.translate(center.x as f64, center.y as f64)?;
                ctx.rotate(*rotation as f64)?;
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_rect(
                    -size.x as f64 / 2.0,
                    -size.y as f64 / 2.0,
                    size.x as f64,
                    size.y as f64,
                );
                ctx.restore();
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
            } => {
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill();
            }
        }
        Ok(())
    }
}

impl DrawTarget for CanvasRenderer {
    fn submit(&mut self, command: &DrawCommand) {
        if let Err(e) = self.draw(command) {
            log::warn!("Canvas draw failed: {:?}", e);
        }
    }
}

fn find_canvas(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("Canvas not found: {}", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("Not a canvas"))
}

fn init_with(canvas_id: &str, config: CreatureConfig) -> Result<(), JsValue> {
    // Set up panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    crate::init_logging();

    let canvas = find_canvas(canvas_id)?;

    // Fall back to the reference world size when the canvas has no layout yet
    let width = match canvas.client_width() {
        w if w > 0 => w as u32,
        _ => WORLD_WIDTH as u32,
    };
    let height = match canvas.client_height() {
        h if h > 0 => h as u32,
        _ => WORLD_HEIGHT as u32,
    };
    canvas.set_width(width);
    canvas.set_height(height);

    let renderer = CanvasRenderer::from_canvas(&canvas)?;
    let listener = PointerListener::attach(canvas)?;

    let origin = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    let creature = Creature::new(origin, config);
    initialize_app_state(AppState::new(creature, renderer, Some(listener)));

    log::info!("Canvas initialized ({}x{})", width, height);
    Ok(())
}

/// Create the reference fish on the canvas with id `canvas_id`
#[wasm_bindgen]
pub fn init(canvas_id: &str) -> Result<(), JsValue> {
    init_with(canvas_id, CreatureConfig::default())
}

/// Create a fish from one of the embedded presets
#[wasm_bindgen]
pub fn init_with_preset(canvas_id: &str, preset: &str) -> Result<(), JsValue> {
    let config = CreatureConfig::preset(preset)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown preset: {}", preset)))?;
    init_with(canvas_id, config)
}

/// Create a fish from a (possibly partial) JSON config
#[wasm_bindgen]
pub fn init_with_config(canvas_id: &str, json: &str) -> Result<(), JsValue> {
    crate::init_logging();
    let config = CreatureConfig::from_json(json).map_err(|e| {
        log::warn!("Rejected creature config: {}", e);
        JsValue::from_str(&e)
    })?;
    init_with(canvas_id, config)
}
