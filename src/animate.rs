//! Per-frame animation of every label in the scene.

use cgmath::Rad;

use crate::{controls::CameraRig, data_structures::scene::Scene};

/// Advances the scene to `elapsed` seconds.
///
/// The camera rig is updated once, then every mesh gets its depth scale set
/// to `sin(t) * 0.05 + 1`, drifts `cos(t) * 0.0001` along its own X axis and
/// has its Y rotation set to `t * 0.05`. The drift accumulates per call, so
/// its speed follows the frame rate.
pub fn tick<R: CameraRig + ?Sized>(elapsed: f32, scene: &mut Scene, rig: &mut R) {
    if let Some(camera) = scene.camera_mut() {
        rig.update(camera);
    }

    let depth = elapsed.sin() * 0.05 + 1.0;
    let drift = elapsed.cos() * 0.0001;
    let yaw = Rad(elapsed * 0.05);
    for mesh in scene.meshes_mut() {
        let transform = &mut mesh.transform;
        transform.scale.z = depth;
        transform.translate_x(drift);
        transform.rotation.y = yaw;
    }
}
