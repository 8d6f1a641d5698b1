/*! moving_images turns playing video into GPU textures.

A still image is a texture the moment it decodes.  A video is not: a network video becomes
decodable only after the playback engine has buffered enough, its pixels change every frame while
it plays, and nothing changes while it is paused.  moving_images takes care of the bookkeeping
between a media source and a texture backend:

| Concern     | What moving_images does                                                       |
|-------------|-------------------------------------------------------------------------------|
| Readiness   | waits for `canplay`/`canplaythrough`, reads dimensions, fires "loaded" once   |
| Uploads     | re-uploads once per tick while playing, not at all while paused               |
| Identity    | one texture per media source, via an injectable registry                      |
| Teardown    | removes listeners, cache entries and the GPU texture on `destroy` or drop     |

# Collaborators

The crate does not decode video, and it does not own a render loop.  It talks to three traits:

* [media::MediaSource]: the playback engine (a browser `<video>`, a native decoder, ...).
* [ticks::TickSource]: the per-frame clock.  [TickQueue] for native loops, [web::AnimationFrameTicks] in the browser.
* [texture::TextureAllocator] / [texture::BaseTexture]: the GPU side.  [WgpuTextureAllocator] with the
  `backend_wgpu` feature.

# Threading

Everything here is single-threaded and callback-driven.  Types are `!Send`; create and drive
them from the thread that runs your render loop.

# Usage

```
# use std::rc::Rc;
# use std::cell::Cell;
# use moving_images::{ScaleMode, TickQueue, VideoTextures, TextureState};
# use moving_images::media::{IdentityScope, Listener, ListenerId, Listeners, MediaEvent, MediaSource, ReadyState, SourceId};
# use moving_images::texture::{BaseTexture, TextureAllocator};
# #[derive(Default)]
# struct Clip { listeners: Listeners, ids: std::cell::RefCell<std::collections::HashMap<IdentityScope, SourceId>> }
# impl MediaSource for Clip {
#     fn ready_state(&self) -> ReadyState { ReadyState::HaveEnoughData }
#     fn video_width(&self) -> u32 { 640 }
#     fn video_height(&self) -> u32 { 480 }
#     fn play(&self) { self.listeners.dispatch(MediaEvent::Play) }
#     fn add_listener(&self, e: MediaEvent, l: Listener) -> ListenerId { self.listeners.add(e, l) }
#     fn remove_listener(&self, e: MediaEvent, id: ListenerId) { self.listeners.remove(e, id); }
#     fn identity(&self, scope: IdentityScope) -> Option<SourceId> { self.ids.borrow().get(&scope).cloned() }
#     fn set_identity(&self, scope: IdentityScope, id: Option<SourceId>) {
#         match id {
#             Some(id) => { self.ids.borrow_mut().insert(scope, id); }
#             None => { self.ids.borrow_mut().remove(&scope); }
#         }
#     }
# }
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

let clip: Rc<dyn MediaSource> = Rc::new(Clip::default());
let texture = textures.from_source(clip.clone(), ScaleMode::Linear).unwrap();
assert_eq!(texture.state(), TextureState::Ready);
assert_eq!((texture.width(), texture.height()), (640, 480));

// the same source always yields the same texture
let again = textures.from_source(clip, ScaleMode::Nearest).unwrap();
assert!(Rc::ptr_eq(&texture, &again));

// in the render loop
ticks.tick();

texture.destroy();
```
*/

pub mod cache;
pub mod error;
mod imp;
pub mod media;
pub mod registry;
pub mod texture;
pub mod ticks;
pub mod video_texture;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::Error;
#[cfg(feature = "backend_wgpu")]
pub use imp::{WgpuTextureAllocator, WgpuVideoTexture};
pub use media::{MediaLoader, MediaSource, VideoUrl};
pub use registry::VideoTextures;
pub use texture::ScaleMode;
pub use ticks::{TickQueue, TickSource};
pub use video_texture::{TextureState, VideoTexture};
