//! Render composition and pipeline batching.
//!
//! The scene is drawn as a [`Render`] tree: the background first, then one
//! instanced draw call per matcap texture. [`LabelBatches`] keeps the
//! per-matcap instance buffers in sync with the scene.
//!
//! # Key types
//!
//! - [`Render<'a>`] describes what to draw this frame
//! - [`Instanced<'a>`] is one instanced draw: mesh, material and instance buffer
//! - [`LabelBatches`] owns the label mesh and its instance buffers

use std::{collections::BTreeMap, sync::Arc};

use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{
        instance::InstanceRaw,
        model::{DrawModel, MatcapLibrary, Material, Mesh},
        scene::{MatcapId, Scene},
    },
    geometry::text::LabelShape,
    pipelines::background::Background,
};

/// Data for instanced object rendering: a mesh, its material and an
/// instance buffer holding `amount` transforms.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub mesh: &'a Mesh,
    pub material: &'a Material,
    pub amount: usize,
}

/// Specifies what is drawn in a frame.
///
/// - `None` renders nothing
/// - `Background` fills the screen with a texture, behind everything else
/// - `Defaults(Vec<Instanced>)` renders several instanced batches
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
pub enum Render<'a> {
    None,
    Background(&'a Background),
    Defaults(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    fn sort(self, backgrounds: &mut Vec<&'a Background>, basics: &mut Vec<Instanced<'a>>) {
        match self {
            Render::Background(background) => backgrounds.push(background),
            Render::Defaults(mut vec) => basics.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.sort(backgrounds, basics)),
            Render::None => (),
        }
    }

    /// Records the draw calls, grouping them per pipeline.
    pub(crate) fn draw(self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        let mut backgrounds = Vec::new();
        let mut basics = Vec::new();
        self.sort(&mut backgrounds, &mut basics);

        for background in backgrounds {
            background.draw(&ctx.pipelines.background, render_pass);
        }

        render_pass.set_pipeline(&ctx.pipelines.matcap);
        for instanced in basics {
            if instanced.amount == 0 || instanced.instance.size() == 0 {
                log::warn!("skipping a batch of {:?} without instances", instanced.mesh.name);
                continue;
            }
            render_pass.set_vertex_buffer(1, instanced.instance.slice(..));
            render_pass.draw_mesh_instanced(
                instanced.mesh,
                instanced.material,
                0..instanced.amount as u32,
                &ctx.camera.bind_group,
            );
        }
    }
}

/// Raw transforms of every instance of `shape`, grouped by matcap.
pub fn group_instances(
    scene: &Scene,
    shape: &Arc<LabelShape>,
) -> BTreeMap<MatcapId, Vec<InstanceRaw>> {
    let mut groups: BTreeMap<MatcapId, Vec<InstanceRaw>> = BTreeMap::new();
    for mesh in scene.meshes().filter(|mesh| Arc::ptr_eq(&mesh.shape, shape)) {
        groups
            .entry(mesh.material.matcap)
            .or_default()
            .push(mesh.transform.to_raw());
    }
    groups
}

#[derive(Debug)]
struct LabelBatch {
    buffer: wgpu::Buffer,
    amount: usize,
}

/// GPU side of the labels: one shared mesh and an instance buffer per matcap.
#[derive(Debug)]
pub struct LabelBatches {
    shape: Arc<LabelShape>,
    mesh: Mesh,
    batches: BTreeMap<MatcapId, LabelBatch>,
}

impl LabelBatches {
    pub fn new(device: &wgpu::Device, shape: Arc<LabelShape>, scene: &Scene) -> Self {
        let mesh = Mesh::from_label(device, &shape);
        let mut batches = Self {
            shape,
            mesh,
            batches: BTreeMap::new(),
        };
        for (matcap, instances) in group_instances(scene, &batches.shape) {
            batches
                .batches
                .insert(matcap, Self::create_batch(device, matcap, &instances));
        }
        batches
    }

    fn create_batch(device: &wgpu::Device, matcap: MatcapId, instances: &[InstanceRaw]) -> LabelBatch {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Instance Buffer", matcap)),
            contents: bytemuck::cast_slice(instances),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        LabelBatch {
            buffer,
            amount: instances.len(),
        }
    }

    /// Uploads the current transforms. Batches that grew get a new buffer.
    pub fn write_to_buffer(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene) {
        for (matcap, instances) in group_instances(scene, &self.shape) {
            match self.batches.get_mut(&matcap) {
                Some(batch) if batch.amount == instances.len() => {
                    queue.write_buffer(&batch.buffer, 0, bytemuck::cast_slice(&instances));
                }
                _ => {
                    self.batches
                        .insert(matcap, Self::create_batch(device, matcap, &instances));
                }
            }
        }
    }

    pub fn render<'a>(&'a self, matcaps: &'a MatcapLibrary) -> Render<'a> {
        Render::Defaults(
            self.batches
                .iter()
                .filter_map(|(matcap, batch)| {
                    let material = matcaps.get(*matcap);
                    if material.is_none() {
                        log::warn!("no matcap texture for {:?}", matcap);
                    }
                    Some(Instanced {
                        instance: &batch.buffer,
                        mesh: &self.mesh,
                        material: material?,
                        amount: batch.amount,
                    })
                })
                .collect(),
        )
    }

    pub fn instance_count(&self) -> usize {
        self.batches.values().map(|batch| batch.amount).sum()
    }
}
