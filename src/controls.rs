//! Damped orbit camera rig.
//!
//! Input events accumulate a spherical delta (rotation), a pan offset and a
//! dolly scale. [`CameraRig::update`] applies them to the camera once per
//! frame. With damping enabled only a fraction of the accumulated motion is
//! applied each update and the remainder decays, so the camera eases out.
//!
//! Left drag orbits, middle drag and the wheel dolly, right drag pans.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Rad, Vector3, Zero};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use crate::camera::PerspectiveCamera;

const POLAR_EPSILON: f32 = 1e-6;
/// Pixels per wheel line when the platform reports pixel deltas.
const PIXELS_PER_LINE: f64 = 100.0;

/// Anything that moves the camera once per frame.
pub trait CameraRig {
    fn update(&mut self, camera: &mut PerspectiveCamera);
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Drag {
    None,
    Rotate,
    Dolly,
    Pan,
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vector3<f32>,
    drag: Drag,
    cursor: Option<PhysicalPosition<f64>>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vector3::zero(),
            drag: Drag::None,
            cursor: None,
        }
    }
}

impl OrbitControls {
    pub fn new(enable_damping: bool, damping_factor: f32) -> Self {
        Self {
            enable_damping,
            damping_factor,
            ..Default::default()
        }
    }

    /// Orbit around the vertical axis. Positive angles move the camera to the
    /// left, spinning the scene to the right.
    pub fn rotate_left(&mut self, angle: Rad<f32>) {
        self.delta_theta -= angle.0;
    }

    pub fn rotate_up(&mut self, angle: Rad<f32>) {
        self.delta_phi -= angle.0;
    }

    /// Move towards the target; `factor` below 1 zooms in.
    pub fn dolly(&mut self, factor: f32) {
        if factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Shift camera and target together by a screen-space amount, expressed
    /// in pixels of a viewport `viewport_height` pixels high.
    pub fn pan(
        &mut self,
        camera: &PerspectiveCamera,
        delta_x: f32,
        delta_y: f32,
        viewport_height: f32,
    ) {
        if viewport_height <= 0.0 {
            return;
        }
        let half_fov: Rad<f32> = (camera.fovy / 2.0).into();
        let target_distance = camera.distance_to_target() * half_fov.0.tan();
        let left = 2.0 * delta_x * target_distance / viewport_height * self.pan_speed;
        let up = 2.0 * delta_y * target_distance / viewport_height * self.pan_speed;
        self.pan_offset += camera.right() * -left + camera.screen_up() * up;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Feed a window event to the rig. Returns `true` when it was consumed.
    pub fn handle_window_event(
        &mut self,
        event: &WindowEvent,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.drag = match (state, button) {
                    (ElementState::Pressed, MouseButton::Left) => Drag::Rotate,
                    (ElementState::Pressed, MouseButton::Middle) => Drag::Dolly,
                    (ElementState::Pressed, MouseButton::Right) => Drag::Pan,
                    (ElementState::Released, _) => Drag::None,
                    _ => self.drag,
                };
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let previous = self.cursor.replace(*position);
                let Some(previous) = previous else {
                    return false;
                };
                let dx = (position.x - previous.x) as f32;
                let dy = (position.y - previous.y) as f32;
                match self.drag {
                    Drag::Rotate if viewport_height > 0.0 => {
                        self.rotate_left(Rad(2.0 * PI * dx / viewport_height * self.rotate_speed));
                        self.rotate_up(Rad(2.0 * PI * dy / viewport_height * self.rotate_speed));
                        true
                    }
                    // dragging down moves away
                    Drag::Dolly => {
                        if dy > 0.0 {
                            self.dolly(1.0 / self.zoom_scale());
                        } else if dy < 0.0 {
                            self.dolly(self.zoom_scale());
                        }
                        true
                    }
                    Drag::Pan => {
                        self.pan(camera, dx, dy, viewport_height);
                        true
                    }
                    _ => false,
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
                };
                if lines > 0.0 {
                    self.dolly(self.zoom_scale());
                } else if lines < 0.0 {
                    self.dolly(1.0 / self.zoom_scale());
                }
                true
            }
            _ => false,
        }
    }

    /// Whether any accumulated motion remains to be applied.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > f32::EPSILON
            || self.delta_phi.abs() > f32::EPSILON
            || self.pan_offset.magnitude2() > f32::EPSILON * f32::EPSILON
            || (self.scale - 1.0).abs() > f32::EPSILON
    }
}

impl CameraRig for OrbitControls {
    fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - camera.target;
        let radius = offset.magnitude();
        let (mut theta, mut phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, 0.0)
        };

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        theta += self.delta_theta * step;
        phi += self.delta_phi * step;
        phi = phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        camera.target += self.pan_offset * step;

        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        let sin_phi_radius = phi.sin() * radius;
        let offset = Vector3::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        );
        camera.position = camera.target + offset;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vector3::zero();
        }
        self.scale = 1.0;
    }
}
