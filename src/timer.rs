//! Browser `setInterval` backing the playback scheduler.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use waterfall_core::playback::TimerHandle;
use waterfall_core::Action;

use crate::state::{dispatch, AppState};

pub struct IntervalTimer {
    id: Option<i32>,
    callback: Closure<dyn FnMut()>,
}

impl TimerHandle for IntervalTimer {
    fn cancel(self) {
        if let (Some(id), Some(win)) = (self.id, web_sys::window()) {
            win.clear_interval_with_handle(id);
        }
        // Auto-stop cancels from inside this very callback, so the closure
        // is released on a later turn rather than while it is running.
        let callback = self.callback;
        wasm_bindgen_futures::spawn_local(async move {
            drop(callback);
        });
    }
}

/// Returns a spawner that starts a repeating playback tick for `state`.
pub fn interval_spawner(state: AppState) -> impl FnOnce(u32) -> IntervalTimer {
    move |period_ms| {
        let callback = Closure::<dyn FnMut()>::new(move || {
            dispatch(state, Action::PlaybackTick);
        });
        let id = match web_sys::window() {
            Some(win) => match win.set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::error!("setInterval failed: {:?}", e);
                    None
                }
            },
            None => {
                log::error!("No window object");
                None
            }
        };
        IntervalTimer { id, callback }
    }
}
