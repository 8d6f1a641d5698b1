// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use web_sys::wasm_bindgen::JsCast;
use web_sys::wasm_bindgen::closure::Closure;

use crate::ticks::{TickCallback, TickSource};

/// Ticks on the browser's `requestAnimationFrame`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrameTicks;

impl AnimationFrameTicks {
    pub fn new() -> Self {
        AnimationFrameTicks
    }
}

impl TickSource for AnimationFrameTicks {
    fn request_next_tick(&self, callback: TickCallback) {
        request_animation_frame(callback);
    }
}

fn request_animation_frame(callback: TickCallback) {
    let Some(window) = web_sys::window() else {
        logwise::error_sync!("No window found; dropping animation frame request");
        return;
    };
    let closure = Closure::once_into_js(move || callback());
    if let Err(err) = window.request_animation_frame(closure.unchecked_ref()) {
        logwise::error_sync!(
            "Failed to request animation frame: {err}",
            err = logwise::privacy::LogIt(&err)
        );
    }
}
