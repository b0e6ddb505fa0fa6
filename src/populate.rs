//! Scene population: one label shape, many randomly placed instances.

use std::{f32::consts::FRAC_PI_2, sync::Arc};

use anyhow::bail;
use cgmath::{Euler, Rad, Vector3};
use rand::Rng;
use serde::Deserialize;

use crate::{
    data_structures::{
        instance::Instance,
        scene::{LabelInstance, MatcapId, Material, Scene, SceneNode},
    },
    geometry::{font::Font, text::LabelShape, text::TextOptions},
};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PopulateOptions {
    /// Number of random copies added next to the main label.
    pub count: usize,
    #[serde(flatten)]
    pub text: TextOptions,
}

impl Default for PopulateOptions {
    fn default() -> Self {
        Self {
            count: 200,
            text: TextOptions::default(),
        }
    }
}

/// Builds the label shape and appends the main instance plus
/// `options.count` random instances to `scene`.
///
/// Random instances draw, in order: a matcap from `pool`, a position in
/// `[-5, 5] x [-10, 10] x [-5, 5]`, a rotation in `[0, 50) x [0, 1) x
/// [0, pi/2)` radians and a uniform scale in `[0, 1)`.
///
/// On error the scene is left untouched.
pub fn populate<R: Rng + ?Sized>(
    scene: &mut Scene,
    font: &Font,
    label: &str,
    options: &PopulateOptions,
    pool: &[MatcapId],
    main: MatcapId,
    rng: &mut R,
) -> anyhow::Result<Arc<LabelShape>> {
    if options.count > 0 && pool.is_empty() {
        bail!(
            "cannot texture {} label copies from an empty matcap pool",
            options.count
        );
    }
    let shape = Arc::new(LabelShape::build(font, label, &options.text)?);

    let mut nodes = Vec::with_capacity(options.count + 1);
    nodes.push(SceneNode::Mesh(LabelInstance {
        shape: Arc::clone(&shape),
        material: Material { matcap: main },
        transform: Instance::new(),
    }));
    for _ in 0..options.count {
        let matcap = pool[rng.gen_range(0..pool.len())];
        let position = Vector3::new(
            (rng.r#gen::<f32>() - 0.5) * 10.0,
            (rng.r#gen::<f32>() - 0.5) * 20.0,
            (rng.r#gen::<f32>() - 0.5) * 10.0,
        );
        let rotation = Euler::new(
            Rad(rng.r#gen::<f32>() * 50.0),
            Rad(rng.r#gen::<f32>()),
            Rad(rng.r#gen::<f32>() * FRAC_PI_2),
        );
        let scale = rng.r#gen::<f32>();
        nodes.push(SceneNode::Mesh(LabelInstance {
            shape: Arc::clone(&shape),
            material: Material { matcap },
            transform: Instance {
                position,
                rotation,
                scale: Vector3::new(scale, scale, scale),
            },
        }));
    }

    nodes.into_iter().for_each(|node| scene.add(node));
    log::info!(
        "added {} copies of {:?} ({} triangles each)",
        options.count + 1,
        label,
        shape.triangle_count()
    );
    Ok(shape)
}
