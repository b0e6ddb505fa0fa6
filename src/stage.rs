//! The stage: everything the demo mutates between frames.
//!
//! A [`Stage`] owns the scene, the orbit controls, the animation clock and
//! the viewport. It is created once at startup, populated once the font has
//! loaded and then advanced with [`Stage::frame`] on every redraw.

use std::sync::Arc;

use cgmath::{Deg, Point3, Vector3};
use rand::Rng;
use winit::event::WindowEvent;

use crate::{
    animate::tick,
    camera::PerspectiveCamera,
    clock::Clock,
    config::SceneConfig,
    controls::OrbitControls,
    data_structures::scene::{Light, MatcapId, Scene, SceneNode},
    geometry::{font::Font, text::LabelShape},
    populate::populate,
    viewport::Viewport,
};

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Debug)]
pub struct Stage {
    pub scene: Scene,
    pub controls: OrbitControls,
    pub clock: Clock,
    pub viewport: Viewport,
    shape: Option<Arc<LabelShape>>,
    config: SceneConfig,
}

impl Stage {
    /// An unpopulated stage holding the camera and the two lights.
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Self {
        let camera_config = &config.camera;
        let mut camera = PerspectiveCamera::new(
            camera_config.position,
            Deg(camera_config.fovy_degrees),
            viewport.aspect(),
            camera_config.near,
            camera_config.far,
        );
        camera.target = Point3::from(camera_config.target);

        let mut scene = Scene::new();
        scene.add(SceneNode::Camera(camera));
        scene.add(SceneNode::Light(Light::Ambient {
            color: WHITE,
            intensity: 0.5,
        }));
        scene.add(SceneNode::Light(Light::Point {
            color: WHITE,
            intensity: 0.5,
            position: Vector3::new(25.0, 30.0, 40.0),
        }));

        Self {
            scene,
            controls: OrbitControls::new(camera_config.enable_damping, camera_config.damping_factor),
            clock: Clock::new(),
            viewport,
            shape: None,
            config: config.clone(),
        }
    }

    /// Adds the configured label and its random copies to the scene.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        font: &Font,
        pool: &[MatcapId],
        rng: &mut R,
    ) -> anyhow::Result<Arc<LabelShape>> {
        let shape = populate(
            &mut self.scene,
            font,
            &self.config.label,
            &self.config.population,
            pool,
            MatcapId::Main,
            rng,
        )?;
        self.shape = Some(Arc::clone(&shape));
        Ok(shape)
    }

    /// Reads the clock and animates the scene. Returns the elapsed seconds.
    pub fn frame(&mut self) -> f32 {
        let elapsed = self.clock.elapsed();
        self.advance_to(elapsed);
        elapsed
    }

    /// Animates the scene to an explicit time.
    pub fn advance_to(&mut self, elapsed: f32) {
        tick(elapsed, &mut self.scene, &mut self.controls);
    }

    /// Applies a new physical window size. Returns `false` for zero sizes,
    /// which leave the stage unchanged.
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) -> bool {
        if !self.viewport.resize(width, height, scale_factor) {
            return false;
        }
        let aspect = self.viewport.aspect();
        if let Some(camera) = self.scene.camera_mut() {
            camera.aspect = aspect;
        }
        true
    }

    /// Routes input to the orbit controls.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        // cursor positions arrive in physical pixels
        let height = self.viewport.physical_size().1 as f32;
        match self.scene.camera() {
            Some(camera) => self.controls.handle_window_event(event, camera, height),
            None => false,
        }
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.scene.camera()
    }

    pub fn shape(&self) -> Option<&Arc<LabelShape>> {
        self.shape.as_ref()
    }

    pub fn is_populated(&self) -> bool {
        self.shape.is_some()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}
