use std::path::Path;

use crate::{
    data_structures::texture::{self, ColorSpace},
    resources::load_binary,
};

/// Texture and sampler at bindings 0 and 1, sampled in the fragment stage.
pub fn texture_sampler_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some(label),
    })
}

/// Loads and decodes an image, using the file extension as format hint.
pub async fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    color_space: ColorSpace,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(file_name).await?;
    let format = Path::new(file_name).extension().and_then(|ext| ext.to_str());
    texture::Texture::from_bytes(device, queue, &data, file_name, format, color_space)
}

/// Loads a texture, falling back to a single `rgba` pixel when the file is
/// missing or cannot be decoded.
pub async fn load_texture_or_placeholder(
    file_name: &str,
    rgba: [u8; 4],
    color_space: ColorSpace,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> texture::Texture {
    match load_texture(file_name, device, queue, color_space).await {
        Ok(texture) => texture,
        Err(e) => {
            log::error!("texture {} could not be loaded: {:#}", file_name, e);
            texture::Texture::create_placeholder(device, queue, rgba, color_space, file_name)
        }
    }
}
