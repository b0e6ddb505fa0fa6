//! Extrusion of planar shapes into beveled solids.
//!
//! Each shape is swept along +z. The sweep is made of rings ("layers"): the
//! front bevel rings, the body rings and the back bevel rings, every layer
//! holding the contour followed by the holes. Lids close the first and the
//! last layer, side walls stitch consecutive layers together.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Vector2, Vector3, Zero};
use serde::Deserialize;

use crate::geometry::{
    shape::{Shape, is_clockwise},
    triangulate::triangulate,
};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtrudeOptions {
    pub depth: f32,
    pub steps: u32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 0.3,
            steps: 1,
            curve_segments: 10,
            bevel_enabled: true,
            bevel_thickness: 0.05,
            bevel_size: 0.05,
            bevel_offset: 0.0,
            bevel_segments: 10,
        }
    }
}

/// A non-indexed triangle list with one flat normal per triangle corner.
#[derive(Clone, Debug, Default)]
pub struct TriangleSoup {
    pub positions: Vec<Vector3<f32>>,
    pub normals: Vec<Vector3<f32>>,
}

impl TriangleSoup {
    fn push(&mut self, a: Vector3<f32>, b: Vector3<f32>, c: Vector3<f32>) {
        let normal = (b - a).cross(c - a);
        let normal = if normal.magnitude2() > 0.0 {
            normal.normalize()
        } else {
            Vector3::zero()
        };
        self.positions.extend([a, b, c]);
        self.normals.extend([normal; 3]);
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

pub fn extrude(shapes: &[Shape], options: &ExtrudeOptions) -> TriangleSoup {
    let mut soup = TriangleSoup::default();
    for shape in shapes {
        extrude_shape(shape, options, &mut soup);
    }
    soup
}

struct Bevel {
    segments: u32,
    thickness: f32,
    size: f32,
    offset: f32,
}

fn extrude_shape(shape: &Shape, options: &ExtrudeOptions, soup: &mut TriangleSoup) {
    if shape.contour.len() < 3 {
        return;
    }
    // outer ring clockwise, holes counter-clockwise
    let mut contour = shape.contour.clone();
    if !is_clockwise(&contour) {
        contour.reverse();
    }
    let holes: Vec<Vec<Vector2<f32>>> = shape
        .holes
        .iter()
        .filter(|hole| hole.len() >= 3)
        .map(|hole| {
            let mut hole = hole.clone();
            if is_clockwise(&hole) {
                hole.reverse();
            }
            hole
        })
        .collect();

    let faces = triangulate(&contour, &holes);

    let mut movements = ring_movements(&contour);
    for hole in &holes {
        movements.extend(ring_movements(hole));
    }
    let vertices: Vec<Vector2<f32>> = contour.iter().chain(holes.iter().flatten()).copied().collect();
    let vlen = vertices.len();

    let bevel = if options.bevel_enabled {
        Bevel {
            segments: options.bevel_segments,
            thickness: options.bevel_thickness,
            size: options.bevel_size,
            offset: options.bevel_offset,
        }
    } else {
        Bevel {
            segments: 0,
            thickness: 0.0,
            size: 0.0,
            offset: 0.0,
        }
    };
    let steps = options.steps.max(1);

    let mut layers: Vec<Vector3<f32>> =
        Vec::with_capacity(vlen * (steps + 2 * bevel.segments + 1) as usize);
    let mut push_layer = |inset: f32, z: f32| {
        for (vertex, movement) in vertices.iter().zip(&movements) {
            let p = *vertex + *movement * inset;
            layers.push(Vector3::new(p.x, p.y, z));
        }
    };

    for b in 0..bevel.segments {
        let t = b as f32 / bevel.segments as f32;
        let z = bevel.thickness * (t * FRAC_PI_2).cos();
        let inset = bevel.size * (t * FRAC_PI_2).sin() + bevel.offset;
        push_layer(inset, -z);
    }
    for s in 0..=steps {
        push_layer(
            bevel.size + bevel.offset,
            options.depth / steps as f32 * s as f32,
        );
    }
    for b in (0..bevel.segments).rev() {
        let t = b as f32 / bevel.segments as f32;
        let z = bevel.thickness * (t * FRAC_PI_2).cos();
        let inset = bevel.size * (t * FRAC_PI_2).sin() + bevel.offset;
        push_layer(inset, options.depth + z);
    }

    let last_layer = (steps + 2 * bevel.segments) as usize;

    // lids
    let top = vlen * last_layer;
    for face in &faces {
        soup.push(layers[face[2]], layers[face[1]], layers[face[0]]);
    }
    for face in &faces {
        soup.push(
            layers[face[0] + top],
            layers[face[1] + top],
            layers[face[2] + top],
        );
    }

    // side walls
    let mut ring_offset = 0;
    let ring_lengths = std::iter::once(contour.len()).chain(holes.iter().map(Vec::len));
    for len in ring_lengths {
        for i in 0..len {
            let j = i;
            let k = if i == 0 { len - 1 } else { i - 1 };
            for s in 0..last_layer {
                let slen1 = vlen * s;
                let slen2 = vlen * (s + 1);
                let a = layers[ring_offset + j + slen1];
                let b = layers[ring_offset + k + slen1];
                let c = layers[ring_offset + k + slen2];
                let d = layers[ring_offset + j + slen2];
                soup.push(a, b, d);
                soup.push(b, c, d);
            }
        }
        ring_offset += len;
    }
}

fn ring_movements(ring: &[Vector2<f32>]) -> Vec<Vector2<f32>> {
    let n = ring.len();
    (0..n)
        .map(|i| bevel_vector(ring[i], ring[(i + n - 1) % n], ring[(i + 1) % n]))
        .collect()
}

/// Direction (scaled to unit edge offset) in which a corner moves when the
/// ring is grown by the bevel.
///
/// The shift is clamped so sharp corners never move further than `sqrt(2)`
/// units per unit of bevel size.
fn bevel_vector(point: Vector2<f32>, prev: Vector2<f32>, next: Vector2<f32>) -> Vector2<f32> {
    let v_prev = point - prev;
    let v_next = next - point;
    let v_prev_lensq = v_prev.magnitude2();
    let collinear = v_prev.x * v_next.y - v_prev.y * v_next.x;

    let (trans, shrink_by) = if collinear.abs() > f32::EPSILON {
        let v_prev_len = v_prev_lensq.sqrt();
        let v_next_len = v_next.magnitude();

        let prev_shift = Vector2::new(prev.x - v_prev.y / v_prev_len, prev.y + v_prev.x / v_prev_len);
        let next_shift = Vector2::new(next.x - v_next.y / v_next_len, next.y + v_next.x / v_next_len);

        let sf = ((next_shift.x - prev_shift.x) * v_next.y - (next_shift.y - prev_shift.y) * v_next.x)
            / (v_prev.x * v_next.y - v_prev.y * v_next.x);

        let trans = Vector2::new(
            prev_shift.x + v_prev.x * sf - point.x,
            prev_shift.y + v_prev.y * sf - point.y,
        );
        let trans_lensq = trans.magnitude2();
        if trans_lensq <= 2.0 {
            return trans;
        }
        (trans, (trans_lensq / 2.0).sqrt())
    } else {
        let same_direction = if v_prev.x > f32::EPSILON {
            v_next.x > f32::EPSILON
        } else if v_prev.x < -f32::EPSILON {
            v_next.x < -f32::EPSILON
        } else {
            v_prev.y.signum() == v_next.y.signum()
        };
        if same_direction {
            (Vector2::new(-v_prev.y, v_prev.x), v_prev_lensq.sqrt())
        } else {
            (v_prev, (v_prev_lensq / 2.0).sqrt())
        }
    };

    if shrink_by > 0.0 {
        trans / shrink_by
    } else {
        Vector2::zero()
    }
}
