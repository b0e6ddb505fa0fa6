use approx::assert_abs_diff_eq;
use cgmath::{Deg, InnerSpace, MetricSpace, Rad};
use text_flow::{
    camera::PerspectiveCamera,
    controls::{CameraRig, OrbitControls},
};
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceId, ElementState, MouseButton, WindowEvent},
};

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::new([1.0, 1.0, 2.0], Deg(75.0), 1.0, 0.1, 100.0)
}

fn device_id() -> DeviceId {
    // SAFETY: only compared against other dummy ids, never handed to winit.
    unsafe { DeviceId::dummy() }
}

/// Presses `button`, moves the cursor from `from` to `to` and releases it.
fn drag(
    controls: &mut OrbitControls,
    camera: &PerspectiveCamera,
    button: MouseButton,
    from: (f64, f64),
    to: (f64, f64),
) {
    let press = |state: ElementState| WindowEvent::MouseInput {
        device_id: device_id(),
        state,
        button,
    };
    let moved = |(x, y): (f64, f64)| WindowEvent::CursorMoved {
        device_id: device_id(),
        position: PhysicalPosition::new(x, y),
    };
    controls.handle_window_event(&press(ElementState::Pressed), camera, 600.0);
    controls.handle_window_event(&moved(from), camera, 600.0);
    controls.handle_window_event(&moved(to), camera, 600.0);
    controls.handle_window_event(&press(ElementState::Released), camera, 600.0);
}

#[test]
fn idle_controls_keep_the_camera_in_place() {
    let mut controls = OrbitControls::new(true, 0.05);
    let mut camera = camera();
    let start = camera.position;

    for _ in 0..10 {
        controls.update(&mut camera);
    }

    assert!(!controls.is_moving());
    assert!(camera.position.distance(start) < 1e-5);
}

#[test]
fn undamped_rotation_applies_at_once() {
    let mut controls = OrbitControls::default();
    let mut camera = camera();
    let radius = camera.distance_to_target();

    controls.rotate_left(Rad(0.5));
    controls.update(&mut camera);
    let moved = camera.position;
    controls.update(&mut camera);

    assert!(!controls.is_moving());
    assert!(camera.position.distance(moved) < 1e-5);
    assert_abs_diff_eq!(camera.distance_to_target(), radius, epsilon = 1e-5);
}

#[test]
fn damped_rotation_eases_out() {
    let mut controls = OrbitControls::new(true, 0.05);
    let mut camera = camera();
    let radius = camera.distance_to_target();

    controls.rotate_left(Rad(1.0));
    let mut steps = Vec::new();
    for _ in 0..5 {
        let before = camera.position;
        controls.update(&mut camera);
        steps.push(camera.position.distance(before));
    }

    assert!(controls.is_moving());
    assert!(steps[0] > 0.0);
    assert!(steps.windows(2).all(|pair| pair[1] < pair[0]), "{:?}", steps);
    assert_abs_diff_eq!(camera.distance_to_target(), radius, epsilon = 1e-4);
}

#[test]
fn damped_motion_settles() {
    let mut controls = OrbitControls::new(true, 0.05);
    let mut camera = camera();

    controls.rotate_up(Rad(0.3));
    for _ in 0..1000 {
        controls.update(&mut camera);
    }

    assert!(!controls.is_moving());
}

#[test]
fn camera_never_flips_over_the_pole() {
    let mut controls = OrbitControls::default();
    let mut camera = camera();

    controls.rotate_up(Rad(10.0));
    controls.update(&mut camera);

    let offset = camera.position - camera.target;
    assert!(offset.y > 0.0);
    assert!(offset.x.is_finite() && offset.z.is_finite());
    assert_abs_diff_eq!(offset.magnitude(), 6.0f32.sqrt(), epsilon = 1e-5);
}

#[test]
fn dolly_scales_the_distance() {
    let mut controls = OrbitControls::default();
    let mut camera = camera();
    let radius = camera.distance_to_target();

    controls.dolly(0.5);
    controls.update(&mut camera);

    assert_abs_diff_eq!(camera.distance_to_target(), radius * 0.5, epsilon = 1e-5);
}

#[test]
fn dolly_respects_distance_limits() {
    let mut controls = OrbitControls::default();
    controls.max_distance = 3.0;
    let mut camera = camera();

    controls.dolly(10.0);
    controls.update(&mut camera);

    assert_abs_diff_eq!(camera.distance_to_target(), 3.0, epsilon = 1e-5);
}

#[test]
fn pan_moves_camera_and_target_together() {
    let mut controls = OrbitControls::default();
    let mut camera = camera();
    let offset = camera.position - camera.target;

    controls.pan(&camera, 100.0, 0.0, 600.0);
    controls.update(&mut camera);

    assert!(camera.target.x.abs() + camera.target.z.abs() > 0.0);
    assert_abs_diff_eq!(camera.target.y, 0.0, epsilon = 1e-6);
    let moved = camera.position - camera.target;
    assert!((moved - offset).magnitude() < 1e-5);
}

#[test]
fn middle_drag_down_dollies_out() {
    let mut controls = OrbitControls::default();
    let mut camera = camera();
    let radius = camera.distance_to_target();
    let target = camera.target;

    drag(&mut controls, &camera, MouseButton::Middle, (100.0, 100.0), (100.0, 150.0));
    controls.update(&mut camera);

    assert_abs_diff_eq!(camera.distance_to_target(), radius / 0.95, epsilon = 1e-5);
    assert_eq!(camera.target, target);
}

#[test]
fn middle_drag_up_dollies_in() {
    let mut controls = OrbitControls::default();
    let mut camera = camera();
    let radius = camera.distance_to_target();

    drag(&mut controls, &camera, MouseButton::Middle, (100.0, 150.0), (100.0, 100.0));
    controls.update(&mut camera);

    assert_abs_diff_eq!(camera.distance_to_target(), radius * 0.95, epsilon = 1e-5);
}

#[test]
fn right_drag_pans() {
    let mut controls = OrbitControls::default();
    let mut camera = camera();
    let radius = camera.distance_to_target();
    let target = camera.target;

    drag(&mut controls, &camera, MouseButton::Right, (100.0, 100.0), (150.0, 100.0));
    controls.update(&mut camera);

    assert_ne!(camera.target, target);
    assert_abs_diff_eq!(camera.distance_to_target(), radius, epsilon = 1e-5);
}

#[test]
fn left_drag_orbits() {
    let mut controls = OrbitControls::default();
    let mut camera = camera();
    let start = camera.position;
    let radius = camera.distance_to_target();

    drag(&mut controls, &camera, MouseButton::Left, (100.0, 100.0), (160.0, 100.0));
    controls.update(&mut camera);

    assert!(camera.position.distance(start) > 1e-3);
    assert_eq!(camera.target, cgmath::Point3::new(0.0, 0.0, 0.0));
    assert_abs_diff_eq!(camera.distance_to_target(), radius, epsilon = 1e-5);
}
