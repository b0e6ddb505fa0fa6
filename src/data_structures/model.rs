//! GPU meshes and matcap materials.

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{scene::MatcapId, texture::Texture},
    geometry::text::LabelShape,
};

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Non-indexed triangle list uploaded once and drawn for every instance.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

impl Mesh {
    pub fn from_label(device: &wgpu::Device, shape: &LabelShape) -> Self {
        let vertices: Vec<ModelVertex> = shape
            .positions()
            .iter()
            .zip(shape.normals())
            .map(|(position, normal)| ModelVertex {
                position: (*position).into(),
                normal: (*normal).into(),
            })
            .collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", shape.label())),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            name: shape.label().to_string(),
            vertex_buffer,
            num_vertices: vertices.len() as u32,
        }
    }
}

/// A matcap texture bound for the matcap pipeline.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub matcap: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        matcap: Texture,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let bind_group = matcap.bind_group(device, layout, name);

        Self {
            name: name.to_string(),
            matcap,
            bind_group,
        }
    }
}

/// The main matcap plus the random pool, addressed by [`MatcapId`].
#[derive(Debug)]
pub struct MatcapLibrary {
    main: Material,
    pool: Vec<Material>,
}

impl MatcapLibrary {
    pub fn new(main: Material, pool: Vec<Material>) -> Self {
        Self { main, pool }
    }

    pub fn get(&self, id: MatcapId) -> Option<&Material> {
        match id {
            MatcapId::Main => Some(&self.main),
            MatcapId::Pool(index) => self.pool.get(index),
        }
    }

    pub fn pool_ids(&self) -> Vec<MatcapId> {
        (0..self.pool.len()).map(MatcapId::Pool).collect()
    }
}

pub trait DrawModel {
    fn draw_mesh_instanced(
        &mut self,
        mesh: &Mesh,
        material: &Material,
        instances: std::ops::Range<u32>,
        camera_bind_group: &wgpu::BindGroup,
    );
}

impl DrawModel for wgpu::RenderPass<'_> {
    fn draw_mesh_instanced(
        &mut self,
        mesh: &Mesh,
        material: &Material,
        instances: std::ops::Range<u32>,
        camera_bind_group: &wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_bind_group(0, &material.bind_group, &[]);
        self.set_bind_group(1, camera_bind_group, &[]);
        self.draw(0..mesh.num_vertices, instances);
    }
}
