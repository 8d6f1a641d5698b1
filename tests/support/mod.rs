// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use moving_images::media::{
    IdentityScope, Listener, ListenerId, Listeners, MediaEvent, MediaLoader, MediaSource,
    ReadyState, SourceId, VideoFrame, VideoUrl,
};
use moving_images::texture::{BaseTexture, ScaleMode, TextureAllocator};
use moving_images::{Error, TickQueue, VideoTextures};

/// A scripted media source.
#[derive(Debug, Default)]
pub struct FakeVideo {
    pub listeners: Listeners,
    ready_state: Cell<ReadyState>,
    width: Cell<u32>,
    height: Cell<u32>,
    identities: RefCell<HashMap<IdentityScope, SourceId>>,
    frame: RefCell<Option<VideoFrame>>,
    plays: Cell<usize>,
    //when set, play() dispatches `play` before returning, like a source with data on hand
    dispatch_on_play: Cell<bool>,
}

impl FakeVideo {
    /// A source that has nothing buffered yet.
    pub fn buffering() -> Rc<Self> {
        Rc::new(FakeVideo::default())
    }

    /// A source that can already play, at `width`x`height`.
    pub fn decodable(width: u32, height: u32) -> Rc<Self> {
        let video = FakeVideo::default();
        video.ready_state.set(ReadyState::HaveEnoughData);
        video.width.set(width);
        video.height.set(height);
        Rc::new(video)
    }

    pub fn set_buffered(&self, ready_state: ReadyState, width: u32, height: u32) {
        self.ready_state.set(ready_state);
        self.width.set(width);
        self.height.set(height);
    }

    /// The frame handed to backends that upload from CPU memory.
    pub fn set_frame(&self, frame: Option<VideoFrame>) {
        *self.frame.borrow_mut() = frame;
    }

    pub fn dispatch_on_play(&self, dispatch: bool) {
        self.dispatch_on_play.set(dispatch);
    }

    pub fn fire(&self, event: MediaEvent) {
        self.listeners.dispatch(event);
    }

    pub fn listener_count(&self, event: MediaEvent) -> usize {
        self.listeners.count(event)
    }

    pub fn readiness_listener_count(&self) -> usize {
        self.listener_count(MediaEvent::CanPlay) + self.listener_count(MediaEvent::CanPlayThrough)
    }

    pub fn plays(&self) -> usize {
        self.plays.get()
    }
}

impl MediaSource for FakeVideo {
    fn ready_state(&self) -> ReadyState {
        self.ready_state.get()
    }
    fn video_width(&self) -> u32 {
        self.width.get()
    }
    fn video_height(&self) -> u32 {
        self.height.get()
    }
    fn play(&self) {
        self.plays.set(self.plays.get() + 1);
        if self.dispatch_on_play.get() {
            self.listeners.dispatch(MediaEvent::Play);
        }
    }
    fn add_listener(&self, event: MediaEvent, listener: Listener) -> ListenerId {
        self.listeners.add(event, listener)
    }
    fn remove_listener(&self, event: MediaEvent, id: ListenerId) {
        self.listeners.remove(event, id);
    }
    fn identity(&self, scope: IdentityScope) -> Option<SourceId> {
        self.identities.borrow().get(&scope).cloned()
    }
    fn set_identity(&self, scope: IdentityScope, identity: Option<SourceId>) {
        let mut identities = self.identities.borrow_mut();
        match identity {
            Some(identity) => {
                identities.insert(scope, identity);
            }
            None => {
                identities.remove(&scope);
            }
        }
    }
    fn current_frame(&self) -> Option<VideoFrame> {
        self.frame.borrow().clone()
    }
}

/// What the counting allocator and its textures observed.
#[derive(Debug, Default)]
pub struct Counters {
    pub allocations: Cell<usize>,
    pub uploads: Cell<usize>,
    pub destroys: Cell<usize>,
    pub scale_modes: RefCell<Vec<ScaleMode>>,
}

#[derive(Debug)]
pub struct CountingTexture {
    counters: Rc<Counters>,
}

impl BaseTexture for CountingTexture {
    fn update(&mut self) {
        self.counters.uploads.set(self.counters.uploads.get() + 1);
    }
    fn destroy(&mut self) {
        self.counters.destroys.set(self.counters.destroys.get() + 1);
    }
}

#[derive(Debug, Default)]
pub struct CountingAllocator {
    pub counters: Rc<Counters>,
    pub fail: Cell<bool>,
}

impl TextureAllocator for CountingAllocator {
    fn allocate(
        &self,
        _source: &Rc<dyn MediaSource>,
        scale_mode: ScaleMode,
    ) -> Result<Box<dyn BaseTexture>, Error> {
        if self.fail.get() {
            return Err(Error::Allocate("out of memory".to_string()));
        }
        self.counters.allocations.set(self.counters.allocations.get() + 1);
        self.counters.scale_modes.borrow_mut().push(scale_mode);
        Ok(Box::new(CountingTexture {
            counters: self.counters.clone(),
        }))
    }
}

/// Hands out a prepared [FakeVideo] and records what it was asked to load.
#[derive(Debug, Default)]
pub struct FakeLoader {
    pub next: RefCell<Option<Rc<FakeVideo>>>,
    pub requests: RefCell<Vec<Vec<VideoUrl>>>,
}

impl MediaLoader for FakeLoader {
    fn load(&self, candidates: &[VideoUrl]) -> Result<Rc<dyn MediaSource>, Error> {
        self.requests.borrow_mut().push(candidates.to_vec());
        let video: Rc<dyn MediaSource> = self.next.borrow().clone().ok_or(Error::NoSource)?;
        Ok(video)
    }
}

/// A registry wired to fakes.
pub struct Harness {
    pub ticks: Rc<TickQueue>,
    pub allocator: Rc<CountingAllocator>,
    pub textures: VideoTextures,
}

impl Harness {
    pub fn new() -> Self {
        let ticks = Rc::new(TickQueue::new());
        let allocator = Rc::new(CountingAllocator::default());
        let textures = VideoTextures::new(ticks.clone(), allocator.clone());
        Harness {
            ticks,
            allocator,
            textures,
        }
    }

    pub fn counters(&self) -> &Counters {
        &self.allocator.counters
    }

    pub fn uploads(&self) -> usize {
        self.counters().uploads.get()
    }

    /// The token `source` carries for this harness's registry.
    pub fn identity_of(&self, source: &dyn MediaSource) -> Option<SourceId> {
        source.identity(self.textures.scope())
    }
}

/// Counts "loaded" notifications delivered to an observer.
pub fn count_loaded(texture: &moving_images::VideoTexture) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    texture.on_loaded(move |_| c.set(c.get() + 1));
    count
}
