// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use std::rc::Rc;

use web_sys::wasm_bindgen::JsCast;
use web_sys::{Document, HtmlSourceElement, HtmlVideoElement};

use super::HtmlVideoSource;
use crate::error::Error;
use crate::media::{MediaLoader, MediaSource, VideoUrl};

/**
Creates a detached `<video>` element with one `<source>` child per candidate, then calls
`load()` on it.
*/
#[derive(Debug, Clone)]
pub struct HtmlVideoLoader {
    cross_origin: Option<String>,
    muted: bool,
}

impl HtmlVideoLoader {
    /// Loads with `crossOrigin="anonymous"` and muted, so frames are uploadable and autoplay is allowed.
    pub fn new() -> Self {
        HtmlVideoLoader {
            cross_origin: Some("anonymous".to_string()),
            muted: true,
        }
    }

    /// Sets the `crossOrigin` attribute, or leaves it unset with `None`.
    pub fn with_cross_origin(mut self, cross_origin: Option<&str>) -> Self {
        self.cross_origin = cross_origin.map(str::to_string);
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }
}

impl Default for HtmlVideoLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, Error> {
    document
        .create_element(tag)
        .map_err(|err| Error::Load(format!("Failed to create <{tag}>: {err:?}")))?
        .dyn_into::<T>()
        .map_err(|_| Error::Load(format!("<{tag}> is not the expected element type")))
}

impl HtmlVideoLoader {
    /// Builds and starts loading the element, returning the concrete source.
    pub fn create_source(&self, candidates: &[VideoUrl]) -> Result<HtmlVideoSource, Error> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(Error::NoSource)?;
        let video: HtmlVideoElement = create(&document, "video")?;
        video.set_cross_origin(self.cross_origin.as_deref());
        video.set_muted(self.muted);
        video.set_preload("auto");

        for candidate in candidates {
            let source: HtmlSourceElement = create(&document, "source")?;
            source.set_src(&candidate.src);
            if let Some(mime) = candidate.mime_type() {
                source.set_type(&mime);
            }
            video
                .append_child(&source)
                .map_err(|err| Error::Load(format!("Failed to append <source>: {err:?}")))?;
        }
        logwise::trace_sync!("loading video from {n} candidates", n = candidates.len());
        video.load();
        Ok(HtmlVideoSource::new(video))
    }
}

impl MediaLoader for HtmlVideoLoader {
    fn load(&self, candidates: &[VideoUrl]) -> Result<Rc<dyn MediaSource>, Error> {
        Ok(Rc::new(self.create_source(candidates)?))
    }
}
