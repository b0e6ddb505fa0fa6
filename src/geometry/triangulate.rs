//! Ear-clipping triangulation for polygons with holes.
//!
//! Holes are merged into the outer ring by bridging each hole's rightmost
//! vertex to a visible vertex of the ring (processing holes right to left),
//! after which the single weakly-simple ring is clipped ear by ear.
//! Arithmetic runs in `f64` to keep the orientation tests stable for the
//! small coordinates produced by font scaling.

use cgmath::Vector2;

const EPSILON: f64 = 1e-12;

type Point = (f64, f64);

/// Triangulate `contour` with `holes`.
///
/// Returned indices address the concatenation `contour ++ holes[0] ++ ...`,
/// and every triangle is wound counter-clockwise.
pub fn triangulate(contour: &[Vector2<f32>], holes: &[Vec<Vector2<f32>>]) -> Vec<[usize; 3]> {
    let points: Vec<Point> = contour
        .iter()
        .chain(holes.iter().flatten())
        .map(|p| (p.x as f64, p.y as f64))
        .collect();
    if contour.len() < 3 {
        return Vec::new();
    }

    let mut ring: Vec<usize> = (0..contour.len()).collect();
    if ring_area(&points, &ring) < 0.0 {
        ring.reverse();
    }

    let mut hole_rings = Vec::with_capacity(holes.len());
    let mut offset = contour.len();
    for hole in holes {
        let mut indices: Vec<usize> = (offset..offset + hole.len()).collect();
        offset += hole.len();
        if indices.len() < 3 {
            continue;
        }
        if ring_area(&points, &indices) > 0.0 {
            indices.reverse();
        }
        hole_rings.push(indices);
    }
    hole_rings.sort_by(|a, b| max_x(&points, b).total_cmp(&max_x(&points, a)));

    for hole in &hole_rings {
        ring = bridge(&points, ring, hole);
    }

    clip_ears(&points, ring)
}

fn ring_area(points: &[Point], ring: &[usize]) -> f64 {
    let n = ring.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = points[ring[(i + n - 1) % n]];
        let q = points[ring[i]];
        area += p.0 * q.1 - q.0 * p.1;
    }
    area * 0.5
}

fn max_x(points: &[Point], ring: &[usize]) -> f64 {
    ring.iter()
        .map(|&i| points[i].0)
        .fold(f64::NEG_INFINITY, f64::max)
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn in_triangle(a: Point, b: Point, c: Point, p: Point) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < -EPSILON || d2 < -EPSILON || d3 < -EPSILON;
    let has_pos = d1 > EPSILON || d2 > EPSILON || d3 > EPSILON;
    !(has_neg && has_pos)
}

/// Splice `hole` (clockwise) into `ring` (counter-clockwise).
fn bridge(points: &[Point], ring: Vec<usize>, hole: &[usize]) -> Vec<usize> {
    let m_pos = (0..hole.len())
        .max_by(|&a, &b| points[hole[a]].0.total_cmp(&points[hole[b]].0))
        .unwrap_or(0);
    let m = points[hole[m_pos]];

    let n = ring.len();
    // Closest edge hit by the ray from `m` towards +x.
    let mut hit: Option<(f64, usize)> = None;
    for i in 0..n {
        let a = points[ring[i]];
        let b = points[ring[(i + 1) % n]];
        if (a.1 > m.1) == (b.1 > m.1) && a.1 != m.1 && b.1 != m.1 {
            continue;
        }
        let x = if (b.1 - a.1).abs() < EPSILON {
            a.0.min(b.0)
        } else {
            a.0 + (m.1 - a.1) * (b.0 - a.0) / (b.1 - a.1)
        };
        if x + EPSILON < m.0 {
            continue;
        }
        if hit.map_or(true, |(best, _)| x < best) {
            hit = Some((x, i));
        }
    }

    let p_pos = match hit {
        Some((x, edge)) => {
            let a_pos = edge;
            let b_pos = (edge + 1) % n;
            let a = points[ring[a_pos]];
            let b = points[ring[b_pos]];
            let candidate = if a.0 > b.0 || (a.0 == b.0 && (a.1 - m.1).abs() <= (b.1 - m.1).abs())
            {
                a_pos
            } else {
                b_pos
            };
            let p = points[ring[candidate]];
            if (p.0 - x).abs() < EPSILON && (p.1 - m.1).abs() < EPSILON {
                candidate
            } else {
                visible_vertex(points, &ring, m, (x, m.1), candidate)
            }
        }
        None => (0..n)
            .min_by(|&a, &b| distance2(points[ring[a]], m).total_cmp(&distance2(points[ring[b]], m)))
            .unwrap_or(0),
    };

    let mut merged = Vec::with_capacity(ring.len() + hole.len() + 2);
    merged.extend_from_slice(&ring[..=p_pos]);
    for k in 0..=hole.len() {
        merged.push(hole[(m_pos + k) % hole.len()]);
    }
    merged.push(ring[p_pos]);
    merged.extend_from_slice(&ring[p_pos + 1..]);
    merged
}

fn distance2(a: Point, b: Point) -> f64 {
    (a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)
}

/// Eberly's visibility fix-up: a reflex vertex inside the triangle
/// `(m, hit, candidate)` blocks the candidate; pick the blocking vertex with
/// the smallest angle to the ray instead.
fn visible_vertex(points: &[Point], ring: &[usize], m: Point, hit: Point, candidate: usize) -> usize {
    let p = points[ring[candidate]];
    let n = ring.len();
    let mut best = candidate;
    let mut best_angle = f64::INFINITY;
    let mut best_distance = f64::INFINITY;
    for i in 0..n {
        if i == candidate {
            continue;
        }
        let r = points[ring[i]];
        if r.0 < m.0 {
            continue;
        }
        let prev = points[ring[(i + n - 1) % n]];
        let next = points[ring[(i + 1) % n]];
        let reflex = cross(prev, r, next) <= 0.0;
        if !reflex || !in_triangle(m, hit, p, r) {
            continue;
        }
        let angle = (r.1 - m.1).abs().atan2(r.0 - m.0);
        let distance = distance2(r, m);
        if angle < best_angle - EPSILON
            || ((angle - best_angle).abs() <= EPSILON && distance < best_distance)
        {
            best = i;
            best_angle = angle;
            best_distance = distance;
        }
    }
    best
}

fn is_ear(points: &[Point], ring: &[usize], prev: usize, cur: usize, next: usize) -> bool {
    let a = points[ring[prev]];
    let b = points[ring[cur]];
    let c = points[ring[next]];
    if cross(a, b, c) <= EPSILON {
        return false;
    }
    ring.iter().enumerate().all(|(pos, &index)| {
        if pos == prev || pos == cur || pos == next {
            return true;
        }
        let p = points[index];
        // bridge duplicates share coordinates with the ear's corners
        if p == a || p == b || p == c {
            return true;
        }
        !in_triangle(a, b, c, p)
    })
}

fn clip_ears(points: &[Point], mut ring: Vec<usize>) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut start = 0;
    while ring.len() > 3 {
        let n = ring.len();
        let ear = (0..n).map(|step| (start + step) % n).find(|&cur| {
            is_ear(points, &ring, (cur + n - 1) % n, cur, (cur + 1) % n)
        });

        let cur = match ear {
            Some(cur) => {
                let prev = (cur + n - 1) % n;
                let next = (cur + 1) % n;
                triangles.push([ring[prev], ring[cur], ring[next]]);
                cur
            }
            None => {
                // Degenerate ring: drop a flat vertex, or force the most convex one.
                let corner = |cur: usize| {
                    cross(
                        points[ring[(cur + n - 1) % n]],
                        points[ring[cur]],
                        points[ring[(cur + 1) % n]],
                    )
                };
                match (0..n).find(|&cur| corner(cur).abs() <= EPSILON) {
                    Some(flat) => flat,
                    None => {
                        let cur = (0..n)
                            .max_by(|&a, &b| corner(a).total_cmp(&corner(b)))
                            .unwrap_or(0);
                        log::debug!("no ear left in a ring of {} vertices, forcing one", n);
                        triangles.push([ring[(cur + n - 1) % n], ring[cur], ring[(cur + 1) % n]]);
                        cur
                    }
                }
            }
        };
        ring.remove(cur);
        start = if cur == 0 { 0 } else { cur - 1 };
    }

    if ring.len() == 3 && cross(points[ring[0]], points[ring[1]], points[ring[2]]) > EPSILON {
        triangles.push([ring[0], ring[1], ring[2]]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vector2<f32> {
        Vector2::new(x, y)
    }

    fn area(points: &[Vector2<f32>], triangles: &[[usize; 3]]) -> f32 {
        triangles
            .iter()
            .map(|t| {
                let (a, b, c) = (points[t[0]], points[t[1]], points[t[2]]);
                ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)) * 0.5
            })
            .sum()
    }

    #[test]
    fn convex_polygon_gives_n_minus_two_triangles() {
        let hexagon: Vec<_> = (0..6)
            .map(|i| {
                let a = i as f32 * std::f32::consts::PI / 3.0;
                v(a.cos(), a.sin())
            })
            .collect();
        let triangles = triangulate(&hexagon, &[]);
        assert_eq!(triangles.len(), 4);
    }

    #[test]
    fn clockwise_input_still_yields_ccw_triangles() {
        let square = [v(0.0, 0.0), v(0.0, 1.0), v(1.0, 1.0), v(1.0, 0.0)];
        let triangles = triangulate(&square, &[]);
        assert_eq!(triangles.len(), 2);
        assert!((area(&square, &triangles) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn concave_polygon_is_covered_exactly() {
        let l_shape = [
            v(0.0, 0.0),
            v(2.0, 0.0),
            v(2.0, 1.0),
            v(1.0, 1.0),
            v(1.0, 2.0),
            v(0.0, 2.0),
        ];
        let triangles = triangulate(&l_shape, &[]);
        assert_eq!(triangles.len(), 4);
        assert!((area(&l_shape, &triangles) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn square_with_hole() {
        let outer = [v(0.0, 0.0), v(0.0, 4.0), v(4.0, 4.0), v(4.0, 0.0)];
        let hole = vec![v(1.0, 1.0), v(3.0, 1.0), v(3.0, 3.0), v(1.0, 3.0)];
        let triangles = triangulate(&outer, &[hole.clone()]);

        let all: Vec<_> = outer.iter().chain(hole.iter()).copied().collect();
        assert_eq!(triangles.len(), 8);
        assert!((area(&all, &triangles) - 12.0).abs() < 1e-5);
        assert!(triangles.iter().flatten().all(|&i| i < all.len()));
    }

    #[test]
    fn degenerate_input_is_ignored() {
        assert!(triangulate(&[v(0.0, 0.0), v(1.0, 1.0)], &[]).is_empty());
    }
}
