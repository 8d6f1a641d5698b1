// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Browser collaborators.

* [HtmlVideoSource] adapts an `HTMLVideoElement`.
* [HtmlVideoLoader] builds a `<video>` from URL candidates.
* [AnimationFrameTicks] ticks on `requestAnimationFrame`.

The browser decodes and buffers; `HtmlVideoSource::current_frame` is `None`, so uploads need a
backend that reads the element directly (see [HtmlVideoSource::element]).
*/

mod animation_frame;
mod loader;
mod video_source;

pub use animation_frame::AnimationFrameTicks;
pub use loader::HtmlVideoLoader;
pub use video_source::HtmlVideoSource;
