// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The video texture factory.

[VideoTextures] owns an identity cache and hands out at most one [VideoTexture] per media
source.  Registries are independent: two registries may each wrap the same source, and each keeps
its own token on it (see [IdentityScope]).

```
# use std::rc::Rc;
# use moving_images::{TickQueue, VideoTextures, ScaleMode};
# use moving_images::texture::{BaseTexture, TextureAllocator};
# use moving_images::media::MediaSource;
# struct Nothing;
# impl BaseTexture for Nothing { fn update(&mut self) {} fn destroy(&mut self) {} }
# struct Allocator;
# impl TextureAllocator for Allocator {
#     fn allocate(&self, _: &Rc<dyn MediaSource>, _: ScaleMode) -> Result<Box<dyn BaseTexture>, moving_images::Error> {
#         Ok(Box::new(Nothing))
#     }
# }
let ticks = Rc::new(TickQueue::new());
let textures = VideoTextures::new(ticks.clone(), Rc::new(Allocator));
assert!(textures.is_empty());
// once per frame, from the render loop:
ticks.tick();
```
*/

use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use crate::cache::TextureCache;
use crate::error::Error;
use crate::media::{IdentityScope, MediaLoader, MediaSource, SourceId, VideoUrl};
use crate::texture::{ScaleMode, TextureAllocator};
use crate::ticks::TickSource;
use crate::video_texture::{VideoTexture, VideoTextureCache};

pub struct VideoTextures {
    cache: Rc<VideoTextureCache>,
    scope: IdentityScope,
    ticks: Rc<dyn TickSource>,
    allocator: Rc<dyn TextureAllocator>,
    loader: Option<Rc<dyn MediaLoader>>,
}

impl VideoTextures {
    /// Creates a registry whose textures tick on `ticks` and allocate their GPU side from `allocator`.
    pub fn new(ticks: Rc<dyn TickSource>, allocator: Rc<dyn TextureAllocator>) -> Self {
        VideoTextures {
            cache: Rc::new(std::cell::RefCell::new(TextureCache::new())),
            scope: IdentityScope::mint(),
            ticks,
            allocator,
            loader: None,
        }
    }

    /// The scope under which this registry stores identity tokens on sources.
    pub fn scope(&self) -> IdentityScope {
        self.scope
    }

    /// Enables [VideoTextures::from_url] and [VideoTextures::from_urls].
    pub fn with_loader(mut self, loader: Rc<dyn MediaLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /**
    Returns the texture wrapping `source`, creating it on first use.

    On a cache hit `scale_mode` is ignored and the existing texture keeps the mode it was created
    with.
    */
    pub fn from_source(
        &self,
        source: Rc<dyn MediaSource>,
        scale_mode: ScaleMode,
    ) -> Result<Rc<VideoTexture>, Error> {
        let identity = match source.identity(self.scope) {
            Some(identity) => identity,
            None => {
                let identity = SourceId::mint();
                source.set_identity(self.scope, Some(identity.clone()));
                identity
            }
        };

        let existing = self.cache.borrow().get(identity.as_str());
        if let Some(existing) = existing {
            if existing.scale_mode() != scale_mode {
                logwise::warn_sync!(
                    "{identity} is already wrapped with {existing}; ignoring requested {requested}",
                    identity = logwise::privacy::LogIt(&identity),
                    existing = logwise::privacy::LogIt(&existing.scale_mode()),
                    requested = logwise::privacy::LogIt(&scale_mode)
                );
            }
            return Ok(existing);
        }

        let base = self.allocator.allocate(&source, scale_mode)?;
        let texture = VideoTexture::new(
            source,
            base,
            scale_mode,
            self.ticks.clone(),
            Rc::downgrade(&self.cache),
            self.scope,
        );
        //cached before attaching, so a listener that wraps the source during attach gets this texture
        self.cache.borrow_mut().insert(identity.as_str(), &texture);
        texture.attach();
        logwise::trace_sync!(
            "wrapped {identity} in a new video texture",
            identity = logwise::privacy::LogIt(&identity)
        );
        Ok(texture)
    }

    /// Loads a single URL and wraps the resulting source.
    pub fn from_url(
        &self,
        url: impl Into<VideoUrl>,
        scale_mode: ScaleMode,
    ) -> Result<Rc<VideoTexture>, Error> {
        self.from_urls(&[url.into()], scale_mode)
    }

    /**
    Loads a video offered as several candidates, in preference order, and wraps the result.

    Candidates without an explicit MIME type advertise one inferred from their extension.
    */
    pub fn from_urls(
        &self,
        candidates: &[VideoUrl],
        scale_mode: ScaleMode,
    ) -> Result<Rc<VideoTexture>, Error> {
        if candidates.is_empty() {
            return Err(Error::NoCandidates);
        }
        let loader = self.loader.as_ref().ok_or(Error::NoLoader)?;
        let source = loader.load(candidates)?;
        source.play();
        self.from_source(source, scale_mode)
    }

    /// The live texture for `identity`, if any.
    pub fn cached(&self, identity: &SourceId) -> Option<Rc<VideoTexture>> {
        self.cache.borrow().get(identity.as_str())
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops cache entries for textures that no longer exist.
    pub fn prune(&self) -> usize {
        self.cache.borrow_mut().prune()
    }
}

impl Debug for VideoTextures {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoTextures")
            .field("cache", &*self.cache.borrow())
            .field("scope", &self.scope)
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}
