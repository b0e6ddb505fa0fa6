use rand::{SeedableRng, rngs::StdRng};
use text_flow::{
    camera::PerspectiveCamera,
    config::SceneConfig,
    controls::CameraRig,
    data_structures::scene::MatcapId,
    geometry::font::Font,
    stage::Stage,
    viewport::Viewport,
};

pub(crate) const FONT_JSON: &str = include_str!("../../assets/fonts/flow_block.typeface.json");

pub(crate) fn font() -> Font {
    Font::from_json(FONT_JSON).expect("bundled font parses")
}

pub(crate) fn rng() -> StdRng {
    StdRng::seed_from_u64(0x6172_7265_7474)
}

pub(crate) fn pool(size: usize) -> Vec<MatcapId> {
    (0..size).map(MatcapId::Pool).collect()
}

/// A populated stage with `count` random copies in a 800x600 window.
pub(crate) fn stage(count: usize) -> Stage {
    let mut config = SceneConfig::default();
    config.population.count = count;
    let mut stage = Stage::new(&config, Viewport::from_physical(800, 600, 1.0));
    stage
        .populate(&font(), &pool(8), &mut rng())
        .expect("stage populates");
    stage
}

/// Counts how often the animation asks it to move the camera.
#[derive(Default)]
pub(crate) struct CountingRig {
    pub(crate) updates: usize,
}

impl CameraRig for CountingRig {
    fn update(&mut self, _: &mut PerspectiveCamera) {
        self.updates += 1;
    }
}
