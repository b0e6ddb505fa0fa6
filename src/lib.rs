//! text-flow
//!
//! A cross-platform (native and WASM/WebGL) demo that extrudes a line of text
//! from a typeface font, scatters a few hundred randomly transformed,
//! matcap-shaded copies of it across a scene and animates them every frame
//! under a damped orbit camera.
//!
//! High-level modules
//! - `geometry`: typeface parsing, triangulation and beveled extrusion
//! - `data_structures`: the scene model, instances, meshes and textures
//! - `populate` / `animate`: filling the scene once and moving it every frame
//! - `stage`: scene, camera rig, clock and viewport bundled together
//! - `camera` / `controls`: perspective camera and orbit controls
//! - `context` / `pipelines` / `render`: GPU setup and drawing
//! - `resources`: loading fonts and textures natively and on the web
//! - `flow`: the winit event loop tying everything together
//!

pub mod animate;
pub mod camera;
pub mod clock;
pub mod config;
pub mod context;
pub mod controls;
pub mod data_structures;
pub mod flow;
pub mod geometry;
pub mod pipelines;
pub mod populate;
pub mod render;
pub mod resources;
pub mod stage;
pub mod viewport;

pub use config::SceneConfig;
pub use flow::run;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point: runs the stock demo on the page's `#canvas`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run(SceneConfig::default()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
