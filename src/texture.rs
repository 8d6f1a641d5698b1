// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The base texture a [crate::VideoTexture] uploads into.

The video texture decides *when* to upload; the base texture decides *how*.  Backends implement
[TextureAllocator] to create one [BaseTexture] per wrapped source.
*/

use std::any::Any;
use std::rc::Rc;

use crate::error::Error;
use crate::media::MediaSource;

/// Texture filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleMode {
    /// Smooth scaling.
    #[default]
    Linear,
    /// Pixelated scaling.
    Nearest,
}

/**
A GPU texture whose contents come from a media source.

`update` re-reads the source's current frame and uploads it.  `destroy` releases GPU resources;
neither is called again afterwards.
*/
pub trait BaseTexture: Any {
    fn update(&mut self);
    fn destroy(&mut self);
}

/// Creates base textures bound to a source.
pub trait TextureAllocator {
    fn allocate(
        &self,
        source: &Rc<dyn MediaSource>,
        scale_mode: ScaleMode,
    ) -> Result<Box<dyn BaseTexture>, Error>;
}
