//! Instance transformation data for GPU rendering.
//!
//! Every label instance has its own position, Euler rotation and scale. The
//! transform is packed into an [`InstanceRaw`] and streamed to the GPU as a
//! per-instance vertex buffer.

use cgmath::{Euler, Matrix3, Matrix4, Quaternion, Rad, SquareMatrix, Vector3, Zero};

use crate::data_structures::model;

/// Per-instance transformation: position, rotation (Euler angles applied in
/// X, Y, Z order) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Euler<Rad<f32>>,
    pub scale: Vector3<f32>,
}

impl Instance {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn quaternion(&self) -> Quaternion<f32> {
        Quaternion::from(self.rotation)
    }

    /// Moves the instance along its own X axis.
    pub fn translate_x(&mut self, distance: f32) {
        self.position += self.quaternion() * Vector3::unit_x() * distance;
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.quaternion())
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        // inverse transpose of R * S is R * S^-1
        let inverse_scale = self
            .scale
            .map(|s| if s.abs() > f32::EPSILON { 1.0 / s } else { 0.0 });
        let normal = Matrix3::from(self.quaternion())
            * Matrix3::from_diagonal(inverse_scale);
        InstanceRaw {
            model: self.to_matrix().into(),
            normal: normal.into(),
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
    normal: [[f32; 3]; 3],
}

/**
 * Stride layout: the model matrix as four vec4 columns followed by the
 * normal matrix as three vec3 columns.
 */
impl model::Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // advance once per instance, not per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 19]>() as wgpu::BufferAddress,
                    shader_location: 10,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 22]>() as wgpu::BufferAddress,
                    shader_location: 11,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn translate_x_follows_local_axis() {
        let mut instance = Instance::new();
        instance.rotation.y = Rad(FRAC_PI_2);
        instance.translate_x(2.0);
        // +x rotated a quarter turn about +y points along -z
        assert!(instance.position.x.abs() < 1e-6);
        assert!((instance.position.z + 2.0).abs() < 1e-6);
    }

    #[test]
    fn identity_matrix_for_default_instance() {
        let matrix: [[f32; 4]; 4] = Instance::default().to_matrix().into();
        let identity: [[f32; 4]; 4] = Matrix4::from_scale(1.0).into();
        assert_eq!(matrix, identity);
    }
}
