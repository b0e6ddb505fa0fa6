use std::{f32::consts::FRAC_PI_2, sync::Arc};

use text_flow::{
    data_structures::{
        instance::Instance,
        scene::{MatcapId, Scene, SceneNode},
    },
    populate::{PopulateOptions, populate},
};

use crate::common::test_utils::{font, pool, rng};

mod common;

fn options(count: usize) -> PopulateOptions {
    PopulateOptions {
        count,
        ..Default::default()
    }
}

#[test]
fn adds_main_label_plus_requested_copies() {
    for count in [0, 1, 5, 200] {
        let mut scene = Scene::new();
        populate(
            &mut scene,
            &font(),
            "GARRETT",
            &options(count),
            &pool(8),
            MatcapId::Main,
            &mut rng(),
        )
        .unwrap();
        assert_eq!(scene.mesh_count(), count + 1, "count {}", count);
    }
}

#[test]
fn every_instance_shares_one_shape() {
    let mut scene = Scene::new();
    let shape = populate(
        &mut scene,
        &font(),
        "GARRETT",
        &options(50),
        &pool(8),
        MatcapId::Main,
        &mut rng(),
    )
    .unwrap();

    assert!(scene.meshes().all(|mesh| Arc::ptr_eq(&mesh.shape, &shape)));
    assert_eq!(Arc::strong_count(&shape), 52);
    assert_eq!(shape.label(), "GARRETT");
}

#[test]
fn main_label_is_first_and_untransformed() {
    let mut scene = Scene::new();
    populate(
        &mut scene,
        &font(),
        "GARRETT",
        &options(10),
        &pool(8),
        MatcapId::Main,
        &mut rng(),
    )
    .unwrap();

    let main = scene.meshes().next().unwrap();
    assert_eq!(main.material.matcap, MatcapId::Main);
    assert_eq!(main.transform, Instance::new());
    assert!(
        scene
            .meshes()
            .skip(1)
            .all(|mesh| mesh.material.matcap != MatcapId::Main)
    );
}

#[test]
fn random_copies_stay_within_their_ranges() {
    let mut scene = Scene::new();
    populate(
        &mut scene,
        &font(),
        "GARRETT",
        &options(200),
        &pool(8),
        MatcapId::Main,
        &mut rng(),
    )
    .unwrap();

    for mesh in scene.meshes().skip(1) {
        let Instance {
            position,
            rotation,
            scale,
        } = mesh.transform;
        assert!((-5.0..=5.0).contains(&position.x), "{:?}", position);
        assert!((-10.0..=10.0).contains(&position.y), "{:?}", position);
        assert!((-5.0..=5.0).contains(&position.z), "{:?}", position);
        assert!((0.0..50.0).contains(&rotation.x.0), "{:?}", rotation);
        assert!((0.0..1.0).contains(&rotation.y.0), "{:?}", rotation);
        assert!((0.0..FRAC_PI_2).contains(&rotation.z.0), "{:?}", rotation);
        assert!((0.0..1.0).contains(&scale.x), "{:?}", scale);
        assert_eq!(scale.x, scale.y);
        assert_eq!(scale.x, scale.z);
        match mesh.material.matcap {
            MatcapId::Pool(i) => assert!(i < 8),
            MatcapId::Main => panic!("copy uses the main matcap"),
        }
    }
}

#[test]
fn same_seed_gives_same_layout() {
    let layout = || {
        let mut scene = Scene::new();
        populate(
            &mut scene,
            &font(),
            "GARRETT",
            &options(20),
            &pool(8),
            MatcapId::Main,
            &mut rng(),
        )
        .unwrap();
        scene
            .meshes()
            .map(|mesh| (mesh.material.matcap, mesh.transform))
            .collect::<Vec<_>>()
    };
    assert_eq!(layout(), layout());
}

#[test]
fn empty_pool_is_rejected_without_touching_the_scene() {
    let mut scene = Scene::new();
    scene.add(SceneNode::Light(text_flow::data_structures::scene::Light::Ambient {
        color: [1.0, 1.0, 1.0],
        intensity: 0.5,
    }));

    let result = populate(
        &mut scene,
        &font(),
        "GARRETT",
        &options(3),
        &[],
        MatcapId::Main,
        &mut rng(),
    );

    assert!(result.is_err());
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.mesh_count(), 0);
}

#[test]
fn empty_pool_is_fine_without_copies() {
    let mut scene = Scene::new();
    populate(
        &mut scene,
        &font(),
        "GARRETT",
        &options(0),
        &[],
        MatcapId::Main,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(scene.mesh_count(), 1);
}
