// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};

use web_sys::HtmlVideoElement;
use web_sys::wasm_bindgen::closure::Closure;
use web_sys::wasm_bindgen::{JsCast, JsValue};

use crate::media::{
    IdentityScope, Listener, ListenerId, MediaEvent, MediaSource, ReadyState, SourceId,
};

/// The element attribute holding the token for `scope`.
fn identity_attribute(scope: IdentityScope) -> String {
    format!("data-moving-images-id-{scope}")
}

struct Registration {
    event: MediaEvent,
    id: ListenerId,
    closure: Closure<dyn FnMut()>,
}

/**
A [MediaSource] over an `HTMLVideoElement`.

Each listener becomes a DOM event listener; they are all removed when this value is dropped.

Identity tokens are stored as `data-` attributes on the element itself, so two wrappers around the
same element resolve to the same texture.
*/
pub struct HtmlVideoSource {
    video: HtmlVideoElement,
    next_listener: Cell<u64>,
    registrations: RefCell<Vec<Registration>>,
    play_rejected: Closure<dyn FnMut(JsValue)>,
}

impl HtmlVideoSource {
    pub fn new(video: HtmlVideoElement) -> Self {
        let play_rejected = Closure::<dyn FnMut(JsValue)>::new(|err: JsValue| {
            //typically NotAllowedError: autoplay was blocked until a user gesture
            logwise::warn_sync!(
                "video playback was refused: {err}",
                err = logwise::privacy::LogIt(&err)
            );
        });
        HtmlVideoSource {
            video,
            next_listener: Cell::new(0),
            registrations: RefCell::new(Vec::new()),
            play_rejected,
        }
    }

    /// The wrapped element, for backends that upload from it directly.
    pub fn element(&self) -> &HtmlVideoElement {
        &self.video
    }

    fn detach(&self, registration: &Registration) {
        if let Err(err) = self.video.remove_event_listener_with_callback(
            registration.event.dom_name(),
            registration.closure.as_ref().unchecked_ref(),
        ) {
            logwise::error_sync!(
                "Failed to remove {event} listener: {err}",
                event = logwise::privacy::LogIt(&registration.event),
                err = logwise::privacy::LogIt(&err)
            );
        }
    }
}

impl MediaSource for HtmlVideoSource {
    fn ready_state(&self) -> ReadyState {
        ReadyState::from_raw(self.video.ready_state())
    }

    fn video_width(&self) -> u32 {
        self.video.video_width()
    }

    fn video_height(&self) -> u32 {
        self.video.video_height()
    }

    fn play(&self) {
        match self.video.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.play_rejected);
            }
            Err(err) => {
                logwise::error_sync!("play() failed: {err}", err = logwise::privacy::LogIt(&err));
            }
        }
    }

    fn add_listener(&self, event: MediaEvent, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_listener.get());
        self.next_listener.set(self.next_listener.get() + 1);
        let closure = Closure::<dyn FnMut()>::new(move || listener());
        if let Err(err) = self
            .video
            .add_event_listener_with_callback(event.dom_name(), closure.as_ref().unchecked_ref())
        {
            logwise::error_sync!(
                "Failed to add {event} listener: {err}",
                event = logwise::privacy::LogIt(&event),
                err = logwise::privacy::LogIt(&err)
            );
        }
        self.registrations
            .borrow_mut()
            .push(Registration { event, id, closure });
        id
    }

    fn remove_listener(&self, event: MediaEvent, id: ListenerId) {
        let removed = {
            let mut registrations = self.registrations.borrow_mut();
            registrations
                .iter()
                .position(|r| r.event == event && r.id == id)
                .map(|index| registrations.remove(index))
        };
        if let Some(registration) = removed {
            self.detach(&registration);
        }
    }

    fn identity(&self, scope: IdentityScope) -> Option<SourceId> {
        self.video
            .get_attribute(&identity_attribute(scope))
            .map(SourceId::from)
    }

    fn set_identity(&self, scope: IdentityScope, identity: Option<SourceId>) {
        let name = identity_attribute(scope);
        let result = match identity {
            Some(identity) => self.video.set_attribute(&name, identity.as_str()),
            None => self.video.remove_attribute(&name),
        };
        if let Err(err) = result {
            logwise::error_sync!(
                "Failed to update {name}: {err}",
                name = logwise::privacy::LogIt(&name),
                err = logwise::privacy::LogIt(&err)
            );
        }
    }
}

impl Drop for HtmlVideoSource {
    fn drop(&mut self) {
        let registrations = std::mem::take(&mut *self.registrations.borrow_mut());
        for registration in &registrations {
            self.detach(registration);
        }
    }
}

impl Debug for HtmlVideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlVideoSource")
            .field("ready_state", &self.ready_state())
            .field("listeners", &self.registrations.borrow().len())
            .finish()
    }
}
