//! The scene: an ordered, append-only list of lights, cameras and label
//! instances.
//!
//! The scene holds no GPU handles. Materials refer to matcap textures through
//! a [`MatcapId`], which the renderer resolves against its texture library.

use std::sync::Arc;

use cgmath::Vector3;

use crate::{
    camera::PerspectiveCamera, data_structures::instance::Instance, geometry::text::LabelShape,
};

/// Handle to a matcap texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatcapId {
    /// The texture reserved for the main label.
    Main,
    /// An entry of the random texture pool.
    Pool(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub matcap: MatcapId,
}

/// One renderable copy of the shared label shape.
#[derive(Clone, Debug)]
pub struct LabelInstance {
    pub shape: Arc<LabelShape>,
    pub material: Material,
    pub transform: Instance,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient {
        color: [f32; 3],
        intensity: f32,
    },
    Point {
        color: [f32; 3],
        intensity: f32,
        position: Vector3<f32>,
    },
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    Light(Light),
    Camera(PerspectiveCamera),
    Mesh(LabelInstance),
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn meshes(&self) -> impl Iterator<Item = &LabelInstance> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Mesh(mesh) => Some(mesh),
            _ => None,
        })
    }

    pub fn meshes_mut(&mut self) -> impl Iterator<Item = &mut LabelInstance> {
        self.nodes.iter_mut().filter_map(|node| match node {
            SceneNode::Mesh(mesh) => Some(mesh),
            _ => None,
        })
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes().count()
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Light(light) => Some(light),
            _ => None,
        })
    }

    /// The first camera added to the scene.
    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.nodes.iter().find_map(|node| match node {
            SceneNode::Camera(camera) => Some(camera),
            _ => None,
        })
    }

    pub fn camera_mut(&mut self) -> Option<&mut PerspectiveCamera> {
        self.nodes.iter_mut().find_map(|node| match node {
            SceneNode::Camera(camera) => Some(camera),
            _ => None,
        })
    }
}
