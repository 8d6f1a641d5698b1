// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The media-playback side of a video texture.

A [MediaSource] is whatever actually plays the video: a browser `<video>` element, a native
decoder, a test double. This crate never decodes anything itself; it only watches the source's
readiness and play/pause signals and asks the texture backend to upload frames at the right moments.

Sources are shared (`Rc<dyn MediaSource>`) between the texture and the embedding scene graph, so
every method takes `&self` and implementations use interior mutability.
*/

pub mod candidates;
pub mod listeners;

use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use candidates::{MediaLoader, VideoUrl};
pub use listeners::Listeners;

/**
How much media data is available, mirroring `HTMLMediaElement.readyState`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ReadyState {
    #[default]
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    HaveEnoughData,
}

impl ReadyState {
    /// Converts the numeric DOM value.  Values above 4 are treated as [ReadyState::HaveEnoughData].
    pub const fn from_raw(raw: u16) -> Self {
        match raw {
            0 => ReadyState::HaveNothing,
            1 => ReadyState::HaveMetadata,
            2 => ReadyState::HaveCurrentData,
            3 => ReadyState::HaveFutureData,
            _ => ReadyState::HaveEnoughData,
        }
    }

    /// Whether playback can begin without waiting for more data.
    pub const fn can_begin_playback(self) -> bool {
        matches!(self, ReadyState::HaveFutureData | ReadyState::HaveEnoughData)
    }
}

/// Signals a [MediaSource] delivers to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    /// Enough data to begin playback (`canplay`).
    CanPlay,
    /// Enough data to play to the end without buffering (`canplaythrough`).
    CanPlayThrough,
    /// Playback started (`play`).
    Play,
    /// Playback paused or stopped (`pause`).
    Pause,
}

impl MediaEvent {
    /// The DOM event name.
    pub const fn dom_name(self) -> &'static str {
        match self {
            MediaEvent::CanPlay => "canplay",
            MediaEvent::CanPlayThrough => "canplaythrough",
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
        }
    }
}

/// A callback registered with a [MediaSource].
pub type Listener = Rc<dyn Fn()>;

/// Identifies one registration made with [MediaSource::add_listener].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub const fn new(raw: u64) -> Self {
        ListenerId(raw)
    }
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/**
The identity token stored on a media source the first time a registry wraps it.

Tokens are process-wide unique; two sources never share one.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(String);

impl SourceId {
    /// Mints a fresh token, of the form `video_<uuid>`.
    pub fn mint() -> Self {
        SourceId(format!("video_{}", uuid::Uuid::new_v4()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rebuilds a token read back from wherever a source stores it.
impl From<String> for SourceId {
    fn from(token: String) -> Self {
        SourceId(token)
    }
}

/**
Names the registry an identity token belongs to.

A source may be wrapped by several [crate::VideoTextures] at once.  Each one reads and writes its
tokens under its own scope, so tearing down a texture in one registry never clears a token
another registry still uses.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityScope(u64);

impl IdentityScope {
    /// A scope distinct from every other scope minted in this process.
    pub fn mint() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        IdentityScope(NEXT.fetch_add(1, Ordering::Relaxed))
    }
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Display for IdentityScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded frame in tightly packed RGBA8, row-major, top row first.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl VideoFrame {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        VideoFrame { width, height, rgba }
    }
    /// Whether `rgba` holds exactly `width * height` pixels.
    pub fn is_well_formed(&self) -> bool {
        self.rgba.len() as u64 == self.width as u64 * self.height as u64 * 4
    }
}

impl Debug for VideoFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("byte_len", &self.rgba.len())
            .finish()
    }
}

/**
The video-playback collaborator.

Implementations must tolerate [MediaSource::remove_listener] being called with an id that was
already removed.
*/
pub trait MediaSource {
    fn ready_state(&self) -> ReadyState;
    /// Intrinsic width of the video, 0 if unknown.
    fn video_width(&self) -> u32;
    /// Intrinsic height of the video, 0 if unknown.
    fn video_height(&self) -> u32;
    /// Requests that playback begin.
    fn play(&self);
    fn add_listener(&self, event: MediaEvent, listener: Listener) -> ListenerId;
    fn remove_listener(&self, event: MediaEvent, id: ListenerId);
    /// The identity token stored on this source under `scope`, if that registry ever wrapped it.
    fn identity(&self, scope: IdentityScope) -> Option<SourceId>;
    /// Stores (`Some`) or removes (`None`) the token for `scope`, leaving other scopes alone.
    fn set_identity(&self, scope: IdentityScope, identity: Option<SourceId>);
    /**
    The frame currently being displayed, for backends that upload from CPU memory.

    Sources whose frames live elsewhere (e.g. a browser element uploaded directly) return `None`.
    */
    fn current_frame(&self) -> Option<VideoFrame> {
        None
    }
    /// Whether a frame can be extracted right now.
    fn is_decodable(&self) -> bool {
        self.ready_state().can_begin_playback() && self.video_width() != 0 && self.video_height() != 0
    }
}
