//! Per-frame pipeline and the browser's fixed-delay frame loop

use crate::creature::Creature;
use crate::draw::DrawTarget;
use crate::math::Vec2;

/// One frame: steer towards `pointer`, solve the spine, replay the anatomy
/// into `target` back to front, present.
pub fn run_frame<T: DrawTarget>(creature: &mut Creature, pointer: Vec2, target: &mut T) {
    creature.resolve(pointer);
    for command in creature.draw_commands() {
        target.submit(&command);
    }
    target.present();
}

#[cfg(target_arch = "wasm32")]
pub use browser::{start_loop, stop_loop};

/// Fixed-delay loop: after each frame, sleep `frame_delay_ms` and go again.
/// No catch-up; a slow frame simply pushes the next one back.
#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::{Cell, RefCell};

    use wasm_bindgen::prelude::*;

    use crate::state::with_app_state_mut;

    thread_local! {
        static FRAME_LOOP: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
        // Handle of the timeout that will run the next tick, if one is queued
        static PENDING: Cell<Option<i32>> = const { Cell::new(None) };
    }

    fn schedule(delay_ms: u32) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let handle = FRAME_LOOP.with(|slot| {
            let slot = slot.borrow();
            let Some(tick) = slot.as_ref() else {
                return Ok(None);
            };
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref(),
                    delay_ms as i32,
                )
                .map(Some)
        })?;
        PENDING.with(|pending| pending.set(handle));
        Ok(())
    }

    /// Drop a queued tick left over from a stopped loop
    fn cancel_pending() {
        let Some(handle) = PENDING.with(Cell::take) else {
            return;
        };
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle);
        }
    }

    fn tick() {
        PENDING.with(|pending| pending.set(None));
        // Cancellation is observed here, at the top of the iteration
        let delay = with_app_state_mut(|app| {
            if !app.running {
                return None;
            }
            app.step();
            Some(app.creature.config().frame_delay_ms)
        })
        .flatten();

        match delay {
            Some(delay) => {
                if let Err(e) = schedule(delay) {
                    log::error!("Failed to schedule next frame: {:?}", e);
                }
            }
            None => log::info!("Frame loop stopped"),
        }
    }

    /// Start drawing a frame every `frame_delay_ms`
    #[wasm_bindgen]
    pub fn start_loop() -> Result<(), JsValue> {
        let delay = with_app_state_mut(|app| {
            let already_running = app.running;
            app.running = true;
            (!already_running).then(|| app.creature.config().frame_delay_ms)
        })
        .ok_or_else(|| JsValue::from_str("Not initialized"))?;

        let Some(delay) = delay else {
            return Ok(());
        };

        FRAME_LOOP.with(|slot| {
            slot.borrow_mut()
                .get_or_insert_with(|| Closure::<dyn FnMut()>::new(tick));
        });
        cancel_pending();
        log::info!("Frame loop started ({} ms per frame)", delay);
        schedule(0)
    }

    /// Stop after the frame currently in flight
    #[wasm_bindgen]
    pub fn stop_loop() {
        with_app_state_mut(|app| app.running = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::CreatureConfig;
    use crate::draw::{DrawCommand, Recorder};

    #[test]
    fn test_frame_submits_full_draw_list_then_presents() {
        let mut fish = Creature::new(Vec2::new(400.0, 300.0), CreatureConfig::default());
        let mut recorder = Recorder::default();

        run_frame(&mut fish, Vec2::new(10.0, 10.0), &mut recorder);

        assert_eq!(recorder.frames, 1);
        assert_eq!(recorder.commands.len(), 10);
        assert!(matches!(recorder.commands[0], DrawCommand::Clear { .. }));
        assert_eq!(recorder.commands, fish.draw_commands());
    }

    #[test]
    fn test_frames_move_head_towards_pointer() {
        let mut fish = Creature::new(Vec2::new(400.0, 300.0), CreatureConfig::default());
        let mut recorder = Recorder::default();
        let pointer = Vec2::new(100.0, 300.0);

        let start = fish.spine().head().distance(pointer);
        for _ in 0..20 {
            run_frame(&mut fish, pointer, &mut recorder);
        }
        assert_eq!(recorder.frames, 20);
        assert!(fish.spine().head().distance(pointer) < start);
    }
}
