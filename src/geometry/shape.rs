//! Planar shapes: an outer contour with optional holes.

use cgmath::Vector2;

use crate::geometry::path::SubPath;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub contour: Vec<Vector2<f32>>,
    pub holes: Vec<Vec<Vector2<f32>>>,
}

/// Signed polygon area; positive for counter-clockwise winding in a y-up plane.
pub fn signed_area(points: &[Vector2<f32>]) -> f32 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = points[(i + n - 1) % n];
        let q = points[i];
        area += p.x * q.y - q.x * p.y;
    }
    area * 0.5
}

pub fn is_clockwise(points: &[Vector2<f32>]) -> bool {
    signed_area(points) < 0.0
}

/// Even-odd point in polygon test.
pub fn contains(polygon: &[Vector2<f32>], point: Vector2<f32>) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Drops a trailing point that repeats the first one.
fn open_ring(mut points: Vec<Vector2<f32>>) -> Vec<Vector2<f32>> {
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Group flattened sub-paths into shapes.
///
/// Typeface outlines draw solids clockwise and holes counter-clockwise. Each
/// hole joins the solid that contains its first point, falling back to the
/// closest preceding solid. Outlines without any clockwise ring are treated
/// as a list of solids.
pub fn to_shapes(subpaths: &[SubPath], divisions: u32) -> Vec<Shape> {
    let rings: Vec<Vec<Vector2<f32>>> = subpaths
        .iter()
        .map(|path| open_ring(path.points(divisions)))
        .filter(|ring| ring.len() >= 3)
        .collect();

    if rings.len() == 1 || !rings.iter().any(|ring| is_clockwise(ring)) {
        return rings
            .into_iter()
            .map(|contour| Shape {
                contour,
                holes: Vec::new(),
            })
            .collect();
    }

    let mut shapes: Vec<Shape> = Vec::new();
    let mut holes: Vec<(Option<usize>, Vec<Vector2<f32>>)> = Vec::new();
    for ring in rings {
        if is_clockwise(&ring) {
            shapes.push(Shape {
                contour: ring,
                holes: Vec::new(),
            });
        } else {
            holes.push((shapes.len().checked_sub(1), ring));
        }
    }

    for (preceding, hole) in holes {
        let owner = shapes
            .iter()
            .position(|shape| contains(&shape.contour, hole[0]))
            .or(preceding)
            .unwrap_or(0);
        shapes[owner].holes.push(hole);
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::PathBuilder;

    fn ring(points: &[(f32, f32)]) -> SubPath {
        let mut builder = PathBuilder::new();
        builder.move_to(points[0].into());
        for &p in &points[1..] {
            builder.line_to(p.into()).unwrap();
        }
        builder.finish().remove(0)
    }

    #[test]
    fn area_sign_follows_winding() {
        let ccw = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ];
        assert_eq!(signed_area(&ccw), 1.0);
        assert!(!is_clockwise(&ccw));

        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!(is_clockwise(&cw));
    }

    #[test]
    fn holes_are_attached_to_their_solid() {
        let outer = ring(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)]);
        let hole = ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let second = ring(&[(10.0, 0.0), (10.0, 1.0), (11.0, 1.0), (11.0, 0.0)]);

        let shapes = to_shapes(&[second, outer, hole], 1);
        assert_eq!(shapes.len(), 2);
        assert!(shapes[0].holes.is_empty());
        assert_eq!(shapes[1].holes.len(), 1);
    }

    #[test]
    fn closing_point_is_dropped() {
        let closed = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)]);
        let shapes = to_shapes(&[closed], 1);
        assert_eq!(shapes[0].contour.len(), 3);
    }
}
