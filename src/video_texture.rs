// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! A texture whose pixels come from a playing video.

A [VideoTexture] wraps one [MediaSource] and one [BaseTexture].  It does three things:

* **Readiness** (`readiness`): a network video is not decodable when it is created.  The texture
  waits for the source's first `canplay`/`canplaythrough`, then reads the dimensions, starts
  playback and fires its "loaded" notification exactly once.
* **Scheduling** (`scheduler`): while the source is playing, the texture re-requests a tick every
  frame and uploads the current frame on each.  Pausing drops the pending request, so a paused or
  not-yet-playing video costs nothing per frame.
* **Teardown** (`lifecycle`): [VideoTexture::destroy] removes every listener, the identity-cache
  entry and the base texture.  Dropping the last reference does the same.

Textures are created through [crate::VideoTextures], which guarantees that one source is never
wrapped twice.

# Re-entrancy

Collaborators may call back synchronously: `play()` may dispatch `play` before it returns, and a
loaded observer may destroy the texture.  No `RefCell` borrow is held across such a call.
*/

mod lifecycle;
mod readiness;
mod scheduler;

use std::cell::{Cell, RefCell};
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::rc::{Rc, Weak};

use crate::cache::TextureCache;
use crate::media::{IdentityScope, ListenerId, MediaEvent, MediaSource, SourceId};
use crate::texture::{BaseTexture, ScaleMode};
use crate::ticks::TickSource;

/// Where a [VideoTexture] is in its life.  States only advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextureState {
    /// Constructed, readiness not yet evaluated.
    Uninitialized,
    /// Waiting for the source to buffer enough to play.
    Buffering,
    /// Frames can be extracted; dimensions are known.
    Ready,
    /// Torn down.  Terminal.
    Destroyed,
}

pub(crate) type VideoTextureCache = RefCell<TextureCache<VideoTexture>>;

type LoadedObserver = Box<dyn FnOnce(&VideoTexture)>;

#[derive(Debug, Clone, Copy)]
struct Subscription {
    event: MediaEvent,
    id: ListenerId,
}

pub struct VideoTexture {
    this: Weak<VideoTexture>,
    source: RefCell<Option<Rc<dyn MediaSource>>>,
    base: RefCell<Option<Box<dyn BaseTexture>>>,
    cache: Weak<VideoTextureCache>,
    scope: IdentityScope,
    ticks: Rc<dyn TickSource>,
    scale_mode: ScaleMode,
    state: Cell<TextureState>,
    auto_update: Cell<bool>,
    //bumped whenever outstanding tick requests must be ignored
    tick_generation: Cell<u64>,
    has_loaded: Cell<bool>,
    width: Cell<u32>,
    height: Cell<u32>,
    readiness_subscriptions: RefCell<Vec<Subscription>>,
    playback_subscriptions: RefCell<Vec<Subscription>>,
    loaded_observers: RefCell<Vec<LoadedObserver>>,
    loaded_waiters: RefCell<Vec<r#continue::Sender<bool>>>,
}

impl VideoTexture {
    /**
    Wraps `source` without listening to it yet.

    The texture stays [TextureState::Uninitialized] until [VideoTexture::attach].
    */
    pub(crate) fn new(
        source: Rc<dyn MediaSource>,
        base: Box<dyn BaseTexture>,
        scale_mode: ScaleMode,
        ticks: Rc<dyn TickSource>,
        cache: Weak<VideoTextureCache>,
        scope: IdentityScope,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| VideoTexture {
            this: this.clone(),
            source: RefCell::new(Some(source)),
            base: RefCell::new(Some(base)),
            cache,
            scope,
            ticks,
            scale_mode,
            state: Cell::new(TextureState::Uninitialized),
            auto_update: Cell::new(false),
            tick_generation: Cell::new(0),
            has_loaded: Cell::new(false),
            width: Cell::new(0),
            height: Cell::new(0),
            readiness_subscriptions: RefCell::new(Vec::new()),
            playback_subscriptions: RefCell::new(Vec::new()),
            loaded_observers: RefCell::new(Vec::new()),
            loaded_waiters: RefCell::new(Vec::new()),
        })
    }

    /**
    Subscribes to the source and evaluates readiness, so the texture may be
    [TextureState::Ready] (and loaded) when this returns.

    Listeners may fire before this returns; callers publish the texture first.
    */
    pub(crate) fn attach(&self) {
        self.attach_playback();
        self.attach_readiness();
    }

    pub fn state(&self) -> TextureState {
        self.state.get()
    }

    pub fn is_ready(&self) -> bool {
        self.state.get() == TextureState::Ready
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.get() == TextureState::Destroyed
    }

    /// Whether the "loaded" notification has fired.
    pub fn has_loaded(&self) -> bool {
        self.has_loaded.get()
    }

    /// Whether the texture is currently re-uploading every tick.
    pub fn auto_update(&self) -> bool {
        self.auto_update.get()
    }

    /// Width of the video in pixels, 0 until ready.
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    /// Height of the video in pixels, 0 until ready.
    pub fn height(&self) -> u32 {
        self.height.get()
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale_mode
    }

    /// The wrapped source, `None` once destroyed.
    pub fn source(&self) -> Option<Rc<dyn MediaSource>> {
        self.source.borrow().clone()
    }

    /// The identity token the wrapped source carries for this texture's registry.
    pub fn identity(&self) -> Option<SourceId> {
        self.source().and_then(|s| s.identity(self.scope))
    }

    /**
    Runs `f` against the base texture if it is of type `T`.

    Returns `None` after destruction or when the backend type differs.
    */
    pub fn with_base_texture<T: BaseTexture, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let base = self.base.borrow();
        let any: &dyn std::any::Any = &**base.as_ref()?;
        any.downcast_ref::<T>().map(f)
    }

    /**
    Registers an observer for the "loaded" notification.

    If the texture already loaded, `observer` runs immediately.  Observers registered on a
    destroyed texture that never loaded are dropped without running.
    */
    pub fn on_loaded(&self, observer: impl FnOnce(&VideoTexture) + 'static) {
        if self.has_loaded.get() {
            observer(self);
        } else if !self.is_destroyed() {
            self.loaded_observers.borrow_mut().push(Box::new(observer));
        }
    }

    /**
    Resolves when the texture loads (`true`) or is destroyed before loading (`false`).
    */
    pub fn loaded(&self) -> impl Future<Output = bool> + use<> {
        let (sender, receiver) = r#continue::continuation();
        if self.has_loaded.get() {
            sender.send(true);
        } else if self.is_destroyed() {
            sender.send(false);
        } else {
            self.loaded_waiters.borrow_mut().push(sender);
        }
        async move { receiver.await }
    }

    fn subscribe(
        &self,
        source: &Rc<dyn MediaSource>,
        event: MediaEvent,
        on_event: fn(&VideoTexture),
    ) -> Subscription {
        let this = self.this.clone();
        let id = source.add_listener(
            event,
            Rc::new(move || {
                if let Some(texture) = this.upgrade() {
                    on_event(&texture);
                }
            }),
        );
        logwise::trace_sync!("subscribed to {event}", event = logwise::privacy::LogIt(&event));
        Subscription { event, id }
    }

    fn unsubscribe_all(source: &Rc<dyn MediaSource>, subscriptions: &RefCell<Vec<Subscription>>) {
        let taken = std::mem::take(&mut *subscriptions.borrow_mut());
        for subscription in taken {
            source.remove_listener(subscription.event, subscription.id);
            logwise::trace_sync!(
                "unsubscribed from {event}",
                event = logwise::privacy::LogIt(&subscription.event)
            );
        }
    }
}

impl Debug for VideoTexture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoTexture")
            .field("state", &self.state.get())
            .field("identity", &self.identity())
            .field("width", &self.width.get())
            .field("height", &self.height.get())
            .field("scale_mode", &self.scale_mode)
            .field("auto_update", &self.auto_update.get())
            .field("has_loaded", &self.has_loaded.get())
            .finish()
    }
}

impl Drop for VideoTexture {
    fn drop(&mut self) {
        self.destroy();
    }
}
