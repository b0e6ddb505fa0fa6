//! Scene data structures.
//!
//! - `scene` is the GPU-free scene model: nodes, label instances, materials
//! - `instance` holds per-instance transformation data and its GPU layout
//! - `model` contains GPU meshes and matcap materials
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod instance;
pub mod model;
pub mod scene;
pub mod texture;
