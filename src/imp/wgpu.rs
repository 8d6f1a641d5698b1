// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
mod sampler;
mod texture;

pub use texture::{WgpuTextureAllocator, WgpuVideoTexture};
