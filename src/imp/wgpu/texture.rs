// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;

use wgpu::{Extent3d, TexelCopyBufferLayout, TexelCopyTextureInfo};

use super::sampler::sampler_for;
use crate::error::Error;
use crate::media::MediaSource;
use crate::texture::{BaseTexture, ScaleMode, TextureAllocator};

const BYTES_PER_PIXEL: u32 = 4;

/**
Allocates [WgpuVideoTexture]s on a wgpu device.

Frames are uploaded from [MediaSource::current_frame] with `Queue::write_texture`.  The texture
format must be a 4-byte-per-texel format whose channel order matches the RGBA8 frames; the
default is `Rgba8UnormSrgb`.
*/
#[derive(Debug, Clone)]
pub struct WgpuTextureAllocator {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    format: wgpu::TextureFormat,
    label: String,
}

impl WgpuTextureAllocator {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        WgpuTextureAllocator {
            device,
            queue,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            label: "video_texture".to_string(),
        }
    }

    pub fn with_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.format = format;
        self
    }

    /// Debug label applied to created textures and samplers.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl TextureAllocator for WgpuTextureAllocator {
    fn allocate(
        &self,
        source: &Rc<dyn MediaSource>,
        scale_mode: ScaleMode,
    ) -> Result<Box<dyn BaseTexture>, Error> {
        if self.format.block_copy_size(None) != Some(BYTES_PER_PIXEL) {
            return Err(Error::Allocate(format!(
                "{:?} is not a 4-byte texel format",
                self.format
            )));
        }
        Ok(Box::new(WgpuVideoTexture {
            sampler: sampler_for(&self.device, scale_mode, &self.label),
            device: self.device.clone(),
            queue: self.queue.clone(),
            source: Some(source.clone()),
            format: self.format,
            label: self.label.clone(),
            gpu_texture: None,
            view: None,
            width: 0,
            height: 0,
            uploads: 0,
        }))
    }
}

/**
A wgpu texture kept in sync with a media source.

The GPU texture is created lazily on the first upload and recreated whenever the frame size
changes, so [WgpuVideoTexture::view] is `None` until a frame has been uploaded.
*/
pub struct WgpuVideoTexture {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    source: Option<Rc<dyn MediaSource>>,
    format: wgpu::TextureFormat,
    label: String,
    sampler: wgpu::Sampler,
    gpu_texture: Option<wgpu::Texture>,
    view: Option<wgpu::TextureView>,
    width: u32,
    height: u32,
    uploads: u64,
}

impl WgpuVideoTexture {
    pub fn texture(&self) -> Option<&wgpu::Texture> {
        self.gpu_texture.as_ref()
    }

    pub fn view(&self) -> Option<&wgpu::TextureView> {
        self.view.as_ref()
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Size of the GPU texture, `(0, 0)` before the first upload.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of frames uploaded so far.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }

    fn ensure_texture(&mut self, width: u32, height: u32) {
        if self.gpu_texture.is_some() && self.width == width && self.height == height {
            return;
        }
        if let Some(old) = self.gpu_texture.take() {
            old.destroy();
        }
        logwise::info_sync!(
            "allocating {label} at {width}x{height}",
            label = logwise::privacy::LogIt(&self.label),
            width = width,
            height = height
        );
        let descriptor = wgpu::TextureDescriptor {
            label: Some(&self.label),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        };
        let texture = self.device.create_texture(&descriptor);
        self.view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.gpu_texture = Some(texture);
        self.width = width;
        self.height = height;
    }
}

impl BaseTexture for WgpuVideoTexture {
    fn update(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        let Some(frame) = source.current_frame() else {
            logwise::trace_sync!("no frame available for upload");
            return;
        };
        if frame.width == 0 || frame.height == 0 || !frame.is_well_formed() {
            logwise::warn_sync!(
                "skipping malformed frame {frame}",
                frame = logwise::privacy::LogIt(&frame)
            );
            return;
        }
        self.ensure_texture(frame.width, frame.height);
        let Some(gpu_texture) = &self.gpu_texture else {
            return;
        };
        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &frame.rgba,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(frame.width * BYTES_PER_PIXEL),
                rows_per_image: Some(frame.height),
            },
            Extent3d {
                width: frame.width,
                height: frame.height,
                depth_or_array_layers: 1,
            },
        );
        self.uploads += 1;
        logwise::trace_sync!("uploaded frame {n}", n = self.uploads);
    }

    fn destroy(&mut self) {
        self.view = None;
        if let Some(texture) = self.gpu_texture.take() {
            texture.destroy();
        }
        self.source = None;
    }
}

impl Debug for WgpuVideoTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuVideoTexture")
            .field("label", &self.label)
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("uploads", &self.uploads)
            .field("attached", &self.source.is_some())
            .finish()
    }
}
