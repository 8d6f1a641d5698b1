// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Crate error type.

/// Errors reported while constructing a [crate::VideoTexture].
///
/// Callbacks that fire after a texture is gone are not errors; they are silently ignored.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No video source element was produced for the texture.
    #[error("No video source element specified.")]
    NoSource,
    /// A URL-based factory was called with an empty candidate list.
    #[error("No candidate URLs were supplied for the video")]
    NoCandidates,
    /// A URL-based factory was called on a registry configured without a [crate::MediaLoader].
    #[error("This registry has no media loader; use from_source instead")]
    NoLoader,
    /// The media loader failed to build a playable source.
    #[error("Could not load video: {0}")]
    Load(String),
    /// The texture backend could not allocate the underlying texture.
    #[error("Could not allocate base texture: {0}")]
    Allocate(String),
}
