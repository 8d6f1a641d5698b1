// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! URL candidates for building a media source.

A video can be offered in several encodings; the loader receives them in preference order and
the playback engine picks the first one it supports.
*/

use std::rc::Rc;

use super::MediaSource;
use crate::error::Error;

/// One candidate URL for a video, with an optional explicit MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrl {
    pub src: String,
    pub mime: Option<String>,
}

impl VideoUrl {
    pub fn new(src: impl Into<String>) -> Self {
        VideoUrl { src: src.into(), mime: None }
    }

    pub fn with_mime(src: impl Into<String>, mime: impl Into<String>) -> Self {
        VideoUrl { src: src.into(), mime: Some(mime.into()) }
    }

    /**
    The MIME type to advertise for this candidate.

    An explicit `mime` wins.  Otherwise the type is `video/<extension>`, where the extension is
    taken from the last path segment of `src` with any query or fragment removed.  Returns `None`
    when there is no extension to infer from.
    */
    pub fn mime_type(&self) -> Option<String> {
        if let Some(mime) = &self.mime {
            return Some(mime.clone());
        }
        let path = self.src.split(['?', '#']).next().unwrap_or("");
        let segment = path.rsplit('/').next().unwrap_or(path);
        let (stem, extension) = segment.rsplit_once('.')?;
        if stem.is_empty() || extension.is_empty() {
            return None;
        }
        Some(format!("video/{}", extension.to_ascii_lowercase()))
    }
}

impl From<&str> for VideoUrl {
    fn from(src: &str) -> Self {
        VideoUrl::new(src)
    }
}

impl From<String> for VideoUrl {
    fn from(src: String) -> Self {
        VideoUrl::new(src)
    }
}

/**
Builds a playable [MediaSource] from URL candidates.

`candidates` is never empty.  Implementations should start loading before returning; the registry
requests playback right after.
*/
pub trait MediaLoader {
    fn load(&self, candidates: &[VideoUrl]) -> Result<Rc<dyn MediaSource>, Error>;
}
