//! The label shape: extruded, beveled text centered on its own origin.

use anyhow::Context;
use cgmath::{EuclideanSpace, Point3, Vector3};
use serde::Deserialize;

use crate::geometry::{
    aabb::Aabb,
    extrude::{ExtrudeOptions, TriangleSoup, extrude},
    font::Font,
};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextOptions {
    /// Glyph size in scene units.
    pub size: f32,
    #[serde(flatten)]
    pub extrude: ExtrudeOptions,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 1.0,
            extrude: ExtrudeOptions::default(),
        }
    }
}

/// Immutable label geometry shared by every instance in the scene.
#[derive(Debug)]
pub struct LabelShape {
    label: String,
    positions: Vec<Vector3<f32>>,
    normals: Vec<Vector3<f32>>,
    bounds: Option<Aabb>,
}

impl LabelShape {
    pub fn build(font: &Font, label: &str, options: &TextOptions) -> anyhow::Result<Self> {
        let shapes = font
            .generate_shapes(label, options.size, options.extrude.curve_segments)
            .with_context(|| format!("cannot lay out label {:?}", label))?;
        let TriangleSoup { positions, normals } = extrude(&shapes, &options.extrude);
        let mut shape = Self {
            label: label.to_string(),
            positions,
            normals,
            bounds: None,
        };
        shape.center();
        log::debug!(
            "label {:?} built with {} triangles",
            label,
            shape.triangle_count()
        );
        Ok(shape)
    }

    /// Moves the geometry so the bounding box midpoint sits on the origin.
    fn center(&mut self) {
        let Some(bounds) = Aabb::from_points(self.positions.iter().map(|&p| Point3::from_vec(p)))
        else {
            return;
        };
        let shift = bounds.center().to_vec();
        self.positions.iter_mut().for_each(|p| *p -= shift);
        self.bounds = Aabb::from_points(self.positions.iter().map(|&p| Point3::from_vec(p)));
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
