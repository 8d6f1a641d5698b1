// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Teardown.

use super::{TextureState, VideoTexture};

impl VideoTexture {
    /**
    Releases the texture.

    Removes all listeners from the source, drops the identity-cache entry, clears the source's
    identity token for this registry (so wrapping it again creates a fresh texture) and destroys
    the base texture.  Tokens other registries stored on the source are untouched.
    Pending `loaded()` futures resolve to `false`.

    Calling this more than once is harmless.  It also runs when the last reference is dropped.
    */
    pub fn destroy(&self) {
        if self.is_destroyed() {
            return;
        }
        self.state.set(TextureState::Destroyed);
        self.auto_update.set(false);
        self.cancel_ticks();

        let source = self.source.borrow_mut().take();
        if let Some(source) = source {
            Self::unsubscribe_all(&source, &self.readiness_subscriptions);
            Self::unsubscribe_all(&source, &self.playback_subscriptions);
            if let Some(identity) = source.identity(self.scope) {
                //a token now owned by another live texture is left alone
                let owned_elsewhere = match self.cache.upgrade() {
                    Some(cache) => {
                        let mut cache = cache.borrow_mut();
                        let removed = cache.remove_if(identity.as_str(), self as *const Self);
                        logwise::trace_sync!("released cache entry, removed={removed}", removed = removed);
                        !removed && cache.contains(identity.as_str())
                    }
                    None => false,
                };
                if !owned_elsewhere {
                    source.set_identity(self.scope, None);
                }
            }
        }

        let base = self.base.borrow_mut().take();
        if let Some(mut base) = base {
            base.destroy();
        }

        let waiters = std::mem::take(&mut *self.loaded_waiters.borrow_mut());
        for waiter in waiters {
            waiter.send(false);
        }
        self.loaded_observers.borrow_mut().clear();
        logwise::trace_sync!("video texture destroyed");
    }
}
