// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! A listener table for [super::MediaSource] implementors.

use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};

use super::{Listener, ListenerId, MediaEvent};

/**
Bookkeeping for `add_listener`/`remove_listener`/dispatch.

Dispatch snapshots the registered listeners before calling any of them, so a listener may add or
remove listeners (including itself) while an event is being delivered.
*/
#[derive(Default)]
pub struct Listeners {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(MediaEvent, ListenerId, Listener)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, event: MediaEvent, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.entries.borrow_mut().push((event, id, listener));
        id
    }

    /// Returns whether a registration was removed.  Unknown ids are ignored.
    pub fn remove(&self, event: MediaEvent, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(e, i, _)| !(*e == event && *i == id));
        entries.len() != before
    }

    /// Calls every listener registered for `event`.
    pub fn dispatch(&self, event: MediaEvent) {
        let snapshot: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .filter(|(e, _, _)| *e == event)
            .map(|(_, _, l)| l.clone())
            .collect();
        for listener in snapshot {
            listener();
        }
    }

    pub fn count(&self, event: MediaEvent) -> usize {
        self.entries.borrow().iter().filter(|(e, _, _)| *e == event).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Debug for Listeners {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.borrow();
        f.debug_list()
            .entries(entries.iter().map(|(e, i, _)| (e, i)))
            .finish()
    }
}
