// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Per-frame tick sources.

A tick source fires a callback once, on the next frame boundary.  Continued ticking requires a
new request each frame.  In the browser this is `requestAnimationFrame`
(see [crate::web::AnimationFrameTicks]); native render loops can use [TickQueue].
*/

use std::cell::RefCell;
use std::fmt::{Debug, Formatter};

/// A one-shot tick callback.
pub type TickCallback = Box<dyn FnOnce()>;

pub trait TickSource {
    /// Arranges for `callback` to run once on the next frame boundary.
    fn request_next_tick(&self, callback: TickCallback);
}

/**
A tick source driven by the host's render loop.

Call [TickQueue::tick] once per frame.  Callbacks requested while a tick is running are deferred
to the following tick.
*/
#[derive(Default)]
pub struct TickQueue {
    pending: RefCell<Vec<TickCallback>>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback requested before this call.  Returns how many ran.
    pub fn tick(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let ran = due.len();
        for callback in due {
            callback();
        }
        ran
    }

    /// Number of callbacks waiting for the next tick.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl TickSource for TickQueue {
    fn request_next_tick(&self, callback: TickCallback) {
        self.pending.borrow_mut().push(callback);
    }
}

impl Debug for TickQueue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickQueue")
            .field("pending", &self.pending())
            .finish()
    }
}
