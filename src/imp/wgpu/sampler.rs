// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use wgpu::{AddressMode, SamplerDescriptor};

use crate::texture::ScaleMode;

impl ScaleMode {
    /// Minification/magnification filter for this scale mode.
    pub const fn wgpu_filter(&self) -> wgpu::FilterMode {
        match self {
            ScaleMode::Linear => wgpu::FilterMode::Linear,
            ScaleMode::Nearest => wgpu::FilterMode::Nearest,
        }
    }
}

pub(super) fn sampler_for(device: &wgpu::Device, scale_mode: ScaleMode, label: &str) -> wgpu::Sampler {
    let filter = scale_mode.wgpu_filter();
    let s = SamplerDescriptor {
        label: Some(label),
        address_mode_u: AddressMode::ClampToEdge,
        address_mode_v: AddressMode::ClampToEdge,
        address_mode_w: AddressMode::ClampToEdge,
        mag_filter: filter,
        min_filter: filter,
        //video textures carry a single mip level
        mipmap_filter: wgpu::FilterMode::Nearest,
        lod_min_clamp: 0.0,
        lod_max_clamp: 0.0,
        compare: None,
        anisotropy_clamp: 1,
        border_color: None,
    };
    device.create_sampler(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_modes_map_to_filters() {
        assert_eq!(ScaleMode::Linear.wgpu_filter(), wgpu::FilterMode::Linear);
        assert_eq!(ScaleMode::Nearest.wgpu_filter(), wgpu::FilterMode::Nearest);
    }
}
