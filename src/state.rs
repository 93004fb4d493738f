//! Centralized application state with context passing pattern
//!
//! `AppState` owns the single creature, the canvas renderer and the latest
//! pointer position. Core functions take explicit references
//! (`frame::run_frame(&mut Creature, Vec2, &mut impl DrawTarget)`); the WASM
//! bindings are thin wrappers that pull what they need out of `AppState`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::canvas::CanvasRenderer;
use crate::creature::Creature;
use crate::math::Vec2;

/// `mousemove` handler kept alive for as long as the state that owns it.
/// Unregisters itself from the canvas when dropped.
pub struct PointerListener {
    canvas: HtmlCanvasElement,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl PointerListener {
    /// Track the pointer over `canvas` in canvas pixel coordinates
    pub fn attach(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(|event: MouseEvent| {
            let pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            with_app_state_mut(|app| app.pointer = pointer);
        });
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        Ok(Self { canvas, closure })
    }
}

impl Drop for PointerListener {
    fn drop(&mut self) {
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

/// Functions should take explicit references to what they need, not access
/// this struct directly via globals.
pub struct AppState {
    /// The one simulated creature
    pub creature: Creature,
    /// Canvas 2D draw target
    pub renderer: CanvasRenderer,
    /// Latest pointer position, the creature's steering target
    pub pointer: Vec2,
    /// Whether the timed frame loop should keep rescheduling itself
    pub running: bool,
    _listener: Option<PointerListener>,
}

impl AppState {
    /// Start with the pointer resting on the creature's head
    pub fn new(
        creature: Creature,
        renderer: CanvasRenderer,
        listener: Option<PointerListener>,
    ) -> Self {
        let pointer = creature.spine().head();
        Self {
            creature,
            renderer,
            pointer,
            running: false,
            _listener: listener,
        }
    }

    /// Advance and draw one frame towards the current pointer
    pub fn step(&mut self) {
        crate::frame::run_frame(&mut self.creature, self.pointer, &mut self.renderer);
    }
}

// Global state access, thin wrapper for WASM bindings only
thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

/// Execute a closure with immutable access to AppState
///
/// Returns None if AppState is not initialized
pub fn with_app_state<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&AppState) -> R,
{
    APP_STATE.with(|state| {
        let borrowed = state.borrow();
        borrowed.as_ref().map(f)
    })
}

/// Execute a closure with mutable access to AppState
///
/// Returns None if AppState is not initialized
pub fn with_app_state_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut AppState) -> R,
{
    APP_STATE.with(|state| {
        let mut borrowed = state.borrow_mut();
        borrowed.as_mut().map(f)
    })
}

/// Install a fresh AppState, dropping (and detaching) any previous one
///
/// Called once per init
pub fn initialize_app_state(app: AppState) {
    let previous = APP_STATE.with(|state| state.borrow_mut().replace(app));
    if previous.is_some() {
        log::info!("Replaced existing creature");
    }
}
