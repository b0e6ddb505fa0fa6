use crate::{
    data_structures::texture::Texture,
    pipelines::mk_render_pipeline,
};

/// Fullscreen pipeline drawing a texture behind everything else. It reads
/// no vertex buffers and leaves the depth buffer untouched.
pub fn mk_background_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    texture_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Background Pipeline Layout"),
        bind_group_layouts: &[texture_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Background Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("background.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        config.format,
        Some(wgpu::BlendState::REPLACE),
        None,
        Some(wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        &[],
        shader,
    )
}

/// A background texture bound for the background pipeline.
#[derive(Debug)]
pub struct Background {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl Background {
    pub fn new(device: &wgpu::Device, texture: Texture, layout: &wgpu::BindGroupLayout) -> Self {
        let bind_group = texture.bind_group(device, layout, "background_bind_group");
        Self {
            texture,
            bind_group,
        }
    }

    pub fn draw(&self, pipeline: &wgpu::RenderPipeline, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
