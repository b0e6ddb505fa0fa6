//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU texture resources,
//! with helpers for the depth buffer, decoded images and solid placeholders.

use anyhow::Context;
use image::{GenericImageView, ImageFormat, load_from_memory_with_format};

/// How texel values are interpreted when sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorSpace {
    /// sRGB-encoded texels, decoded to linear on sampling.
    Srgb,
    /// Texels are sampled as stored.
    #[default]
    Linear,
}

impl ColorSpace {
    pub fn texture_format(self) -> wgpu::TextureFormat {
        match self {
            ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// A GPU texture with a view and optional sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// A 1×1 texture of a single colour, used in place of a texture that
    /// failed to load.
    pub fn create_placeholder(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: [u8; 4],
        color_space: ColorSpace,
        label: &str,
    ) -> Texture {
        Self::from_rgba(device, queue, &rgba, [1, 1], color_space, Some(label))
    }

    /// Load a texture from raw image file contents.
    ///
    /// * `format` is an optional file extension hint (e.g. "png"); the
    ///   format is guessed from the data otherwise
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
        format: Option<&str>,
        color_space: ColorSpace,
    ) -> anyhow::Result<Self> {
        let img = match format {
            None => image::load_from_memory(bytes)
                .with_context(|| format!("cannot decode image {}", label))?,
            Some(ext) => {
                let format = ImageFormat::from_extension(ext)
                    .with_context(|| format!("unknown image format {:?} for {}", ext, label))?;
                load_from_memory_with_format(bytes, format)
                    .with_context(|| format!("cannot decode image {}", label))?
            }
        };
        Ok(Self::from_image(device, queue, &img, color_space, Some(label)))
    }

    /// Upload a decoded image as a texture without mipmaps.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        color_space: ColorSpace,
        label: Option<&str>,
    ) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba(device, queue, &rgba, [width, height], color_space, label)
    }

    /// Upload tightly packed RGBA8 pixels.
    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        [width, height]: [u32; 2],
        color_space: ColorSpace,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: color_space.texture_format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            sampler: Some(create_linear_sampler(device)),
        }
    }

    /// Binds the view at binding 0 and the sampler at binding 1.
    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
    ) -> wgpu::BindGroup {
        let sampler = self
            .sampler
            .clone()
            .unwrap_or_else(|| create_linear_sampler(device));
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some(label),
        })
    }
}

/// Linear min/mag filtering, clamped at the edges. Textures carry a single
/// mip level, so the mipmap filter never kicks in.
pub fn create_linear_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_srgb_textures_are_decoded() {
        assert_eq!(
            ColorSpace::Srgb.texture_format(),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(
            ColorSpace::Linear.texture_format(),
            wgpu::TextureFormat::Rgba8Unorm
        );
        assert!(!ColorSpace::default().texture_format().is_srgb());
    }
}
