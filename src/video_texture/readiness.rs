// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Deciding when the first frame is extractable.

use std::rc::Rc;

use super::{TextureState, VideoTexture};
use crate::media::{MediaEvent, MediaSource};

impl VideoTexture {
    /// Resolves readiness immediately when possible, otherwise waits for the source to buffer.
    pub(super) fn attach_readiness(&self) {
        let Some(source) = self.source() else {
            return;
        };
        if source.is_decodable() {
            logwise::trace_sync!("video source is already decodable");
            self.become_ready(&source);
            return;
        }
        self.advance(TextureState::Buffering);
        let can_play = self.subscribe(&source, MediaEvent::CanPlay, Self::on_can_play);
        let can_play_through = self.subscribe(&source, MediaEvent::CanPlayThrough, Self::on_can_play);
        self.readiness_subscriptions
            .borrow_mut()
            .extend([can_play, can_play_through]);
    }

    fn on_can_play(&self) {
        if self.state.get() != TextureState::Buffering {
            logwise::trace_sync!(
                "ignoring readiness signal in state {state}",
                state = logwise::privacy::LogIt(&self.state.get())
            );
            return;
        }
        let Some(source) = self.source() else {
            return;
        };
        self.become_ready(&source);
    }

    fn become_ready(&self, source: &Rc<dyn MediaSource>) {
        Self::unsubscribe_all(source, &self.readiness_subscriptions);
        self.width.set(source.video_width());
        self.height.set(source.video_height());
        self.advance(TextureState::Ready);
        logwise::info_sync!(
            "video texture ready at {width}x{height}",
            width = self.width.get(),
            height = self.height.get()
        );

        source.play();
        //play() may dispatch synchronously, and a listener may have torn us down
        if self.is_destroyed() {
            return;
        }
        if !self.has_loaded.get() {
            self.has_loaded.set(true);
            self.emit_loaded();
        }
    }

    fn emit_loaded(&self) {
        let waiters = std::mem::take(&mut *self.loaded_waiters.borrow_mut());
        for waiter in waiters {
            waiter.send(true);
        }
        let observers = std::mem::take(&mut *self.loaded_observers.borrow_mut());
        for observer in observers {
            observer(self);
        }
    }

    /// Moves to `next` if it is later than the current state.
    pub(super) fn advance(&self, next: TextureState) {
        if next > self.state.get() {
            self.state.set(next);
        }
    }
}
