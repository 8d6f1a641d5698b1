// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Play/pause driven uploads.

Ticks are requested one at a time: each delivered tick requests the next one before uploading.
Pausing bumps `tick_generation`, so the request already in flight finds itself stale and neither
uploads nor re-requests.  This keeps at most one live request per texture even across rapid
play/pause/play sequences.
*/

use super::{TextureState, VideoTexture};
use crate::media::MediaEvent;

impl VideoTexture {
    pub(super) fn attach_playback(&self) {
        let Some(source) = self.source() else {
            return;
        };
        let play = self.subscribe(&source, MediaEvent::Play, Self::on_play_start);
        let pause = self.subscribe(&source, MediaEvent::Pause, Self::on_play_stop);
        self.playback_subscriptions.borrow_mut().extend([play, pause]);
    }

    fn on_play_start(&self) {
        if self.is_destroyed() || self.auto_update.get() {
            return;
        }
        self.auto_update.set(true);
        self.request_tick();
    }

    fn on_play_stop(&self) {
        if !self.auto_update.get() {
            return;
        }
        self.auto_update.set(false);
        self.cancel_ticks();
    }

    /// Invalidates any tick request in flight.
    pub(super) fn cancel_ticks(&self) {
        self.tick_generation.set(self.tick_generation.get().wrapping_add(1));
    }

    fn request_tick(&self) {
        let generation = self.tick_generation.get();
        let this = self.this.clone();
        self.ticks.request_next_tick(Box::new(move || {
            if let Some(texture) = this.upgrade() {
                texture.on_tick(generation);
            }
        }));
    }

    fn on_tick(&self, generation: u64) {
        if !self.auto_update.get() || generation != self.tick_generation.get() {
            logwise::trace_sync!("dropping stale tick");
            return;
        }
        self.request_tick();
        if self.state.get() == TextureState::Ready {
            self.upload();
        }
    }

    /**
    Uploads the current frame now, outside the tick schedule.

    Does nothing unless the texture is [TextureState::Ready].
    */
    pub fn update(&self) {
        if self.state.get() == TextureState::Ready {
            self.upload();
        }
    }

    fn upload(&self) {
        let base = self.base.borrow_mut().take();
        if let Some(mut base) = base {
            base.update();
            //put it back unless we were destroyed while uploading
            if self.is_destroyed() {
                base.destroy();
            } else {
                *self.base.borrow_mut() = Some(base);
            }
        }
    }
}
