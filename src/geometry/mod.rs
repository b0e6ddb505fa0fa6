//! Text geometry: from typeface outlines to an extruded, centered mesh.
//!
//! - `font` parses typeface JSON and lays glyph outlines out along a line
//! - `path` flattens line and curve segments into polylines
//! - `shape` groups polylines into solids with holes
//! - `triangulate` fills a shape with triangles
//! - `extrude` sweeps shapes into beveled solids
//! - `text` ties everything together into a [`text::LabelShape`]

pub mod aabb;
pub mod extrude;
pub mod font;
pub mod path;
pub mod shape;
pub mod text;
pub mod triangulate;
