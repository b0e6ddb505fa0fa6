use std::f32::consts::{FRAC_PI_2, PI};

use approx::assert_abs_diff_eq;
use text_flow::{animate::tick, data_structures::scene::Light};

use crate::common::test_utils::{CountingRig, stage};

mod common;

#[test]
fn depth_breathes_with_time() {
    let mut stage = stage(20);

    stage.advance_to(0.0);
    assert!(stage.scene.meshes().all(|mesh| mesh.transform.scale.z == 1.0));

    stage.advance_to(FRAC_PI_2);
    for mesh in stage.scene.meshes() {
        assert_abs_diff_eq!(mesh.transform.scale.z, 1.05, epsilon = 1e-6);
    }
}

#[test]
fn depth_scale_leaves_width_and_height_alone() {
    let mut stage = stage(20);
    let before: Vec<_> = stage.scene.meshes().map(|mesh| mesh.transform.scale).collect();

    stage.advance_to(1.0);

    for (mesh, scale) in stage.scene.meshes().zip(before) {
        assert_eq!(mesh.transform.scale.x, scale.x);
        assert_eq!(mesh.transform.scale.y, scale.y);
    }
}

#[test]
fn yaw_is_set_from_elapsed_time() {
    let mut stage = stage(20);

    stage.advance_to(0.0);
    assert!(stage.scene.meshes().all(|mesh| mesh.transform.rotation.y.0 == 0.0));

    stage.advance_to(PI / 0.05);
    for mesh in stage.scene.meshes() {
        assert_abs_diff_eq!(mesh.transform.rotation.y.0, PI, epsilon = 1e-5);
    }
}

#[test]
fn yaw_does_not_accumulate() {
    let mut stage = stage(20);

    stage.advance_to(10.0);
    stage.advance_to(2.0);

    for mesh in stage.scene.meshes() {
        assert_abs_diff_eq!(mesh.transform.rotation.y.0, 0.1, epsilon = 1e-6);
    }
}

#[test]
fn pitch_and_roll_are_untouched() {
    let mut stage = stage(20);
    let before: Vec<_> = stage
        .scene
        .meshes()
        .map(|mesh| (mesh.transform.rotation.x, mesh.transform.rotation.z))
        .collect();

    stage.advance_to(3.0);

    for (mesh, (x, z)) in stage.scene.meshes().zip(before) {
        assert_eq!(mesh.transform.rotation.x, x);
        assert_eq!(mesh.transform.rotation.z, z);
    }
}

#[test]
fn drift_accumulates_every_tick() {
    let mut stage = stage(0);

    stage.advance_to(0.0);
    let main = stage.scene.meshes().next().unwrap().transform.position;
    assert_abs_diff_eq!(main.x, 0.0001, epsilon = 1e-9);

    stage.advance_to(0.0);
    let main = stage.scene.meshes().next().unwrap().transform.position;
    assert_abs_diff_eq!(main.x, 0.0002, epsilon = 1e-9);
    assert_eq!(main.y, 0.0);
    assert_eq!(main.z, 0.0);
}

#[test]
fn drift_moves_copies_away_from_their_start() {
    let mut stage = stage(20);
    let start: Vec<_> = stage
        .scene
        .meshes()
        .map(|mesh| mesh.transform.position)
        .collect();

    let distances = |stage: &text_flow::stage::Stage| -> Vec<f32> {
        stage
            .scene
            .meshes()
            .zip(&start)
            .map(|(mesh, start)| {
                use cgmath::InnerSpace;
                (mesh.transform.position - start).magnitude()
            })
            .collect()
    };

    stage.advance_to(0.1);
    let first = distances(&stage);
    stage.advance_to(0.2);
    let second = distances(&stage);

    for (a, b) in first.iter().zip(&second) {
        assert!(*a > 0.0);
        assert!(b > a, "{} then {}", a, b);
    }
}

#[test]
fn rig_updates_once_per_tick() {
    let mut stage = stage(200);
    let mut rig = CountingRig::default();

    for frame in 0..5 {
        tick(frame as f32 / 60.0, &mut stage.scene, &mut rig);
    }

    assert_eq!(rig.updates, 5);
}

#[test]
fn lights_and_camera_are_not_animated() {
    let mut stage = stage(20);
    let camera = *stage.camera().unwrap();
    let lights: Vec<Light> = stage.scene.lights().copied().collect();
    let mut rig = CountingRig::default();

    tick(4.0, &mut stage.scene, &mut rig);

    assert_eq!(*stage.camera().unwrap(), camera);
    assert_eq!(stage.scene.lights().copied().collect::<Vec<_>>(), lights);
    assert_eq!(stage.scene.len(), 3 + 21);
}
