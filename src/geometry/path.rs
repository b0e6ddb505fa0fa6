//! Outline paths as produced by typeface glyph commands.
//!
//! A [`SubPath`] starts at a point and continues through line, quadratic and
//! cubic segments. Curves are flattened into straight runs on demand with
//! [`SubPath::points`].

use anyhow::bail;
use cgmath::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line(Vector2<f32>),
    Quadratic {
        control: Vector2<f32>,
        to: Vector2<f32>,
    },
    Cubic {
        control1: Vector2<f32>,
        control2: Vector2<f32>,
        to: Vector2<f32>,
    },
}

impl Segment {
    pub fn end(&self) -> Vector2<f32> {
        match self {
            Segment::Line(to) => *to,
            Segment::Quadratic { to, .. } => *to,
            Segment::Cubic { to, .. } => *to,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubPath {
    pub start: Vector2<f32>,
    pub segments: Vec<Segment>,
}

impl SubPath {
    pub fn new(start: Vector2<f32>) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    /// Flatten the path into a polyline.
    ///
    /// Lines contribute their end point, curves contribute `divisions`
    /// evenly spaced samples. A point equal to the previous one is skipped,
    /// so joined curves never produce zero-length edges.
    pub fn points(&self, divisions: u32) -> Vec<Vector2<f32>> {
        let divisions = divisions.max(1);
        let mut points = vec![self.start];
        let mut from = self.start;
        for segment in &self.segments {
            match *segment {
                Segment::Line(to) => push_distinct(&mut points, to),
                Segment::Quadratic { control, to } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        push_distinct(&mut points, quadratic(from, control, to, t));
                    }
                }
                Segment::Cubic {
                    control1,
                    control2,
                    to,
                } => {
                    for i in 1..=divisions {
                        let t = i as f32 / divisions as f32;
                        push_distinct(&mut points, cubic(from, control1, control2, to, t));
                    }
                }
            }
            from = segment.end();
        }
        points
    }
}

fn push_distinct(points: &mut Vec<Vector2<f32>>, point: Vector2<f32>) {
    if points.last() != Some(&point) {
        points.push(point);
    }
}

fn quadratic(p0: Vector2<f32>, p1: Vector2<f32>, p2: Vector2<f32>, t: f32) -> Vector2<f32> {
    let k = 1.0 - t;
    p0 * (k * k) + p1 * (2.0 * k * t) + p2 * (t * t)
}

fn cubic(
    p0: Vector2<f32>,
    p1: Vector2<f32>,
    p2: Vector2<f32>,
    p3: Vector2<f32>,
    t: f32,
) -> Vector2<f32> {
    let k = 1.0 - t;
    p0 * (k * k * k) + p1 * (3.0 * k * k * t) + p2 * (3.0 * k * t * t) + p3 * (t * t * t)
}

/// Collects sub-paths from a stream of drawing commands.
#[derive(Debug, Default)]
pub struct PathBuilder {
    subpaths: Vec<SubPath>,
    current: Option<SubPath>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: Vector2<f32>) {
        if let Some(done) = self.current.replace(SubPath::new(to)) {
            self.subpaths.push(done);
        }
    }

    pub fn line_to(&mut self, to: Vector2<f32>) -> anyhow::Result<()> {
        self.push(Segment::Line(to))
    }

    pub fn quadratic_to(&mut self, control: Vector2<f32>, to: Vector2<f32>) -> anyhow::Result<()> {
        self.push(Segment::Quadratic { control, to })
    }

    pub fn cubic_to(
        &mut self,
        control1: Vector2<f32>,
        control2: Vector2<f32>,
        to: Vector2<f32>,
    ) -> anyhow::Result<()> {
        self.push(Segment::Cubic {
            control1,
            control2,
            to,
        })
    }

    fn push(&mut self, segment: Segment) -> anyhow::Result<()> {
        match self.current.as_mut() {
            Some(path) => {
                path.segments.push(segment);
                Ok(())
            }
            None => bail!("outline draws a segment before its first move command"),
        }
    }

    pub fn finish(mut self) -> Vec<SubPath> {
        if let Some(done) = self.current.take() {
            self.subpaths.push(done);
        }
        self.subpaths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_keep_their_corners() {
        let mut builder = PathBuilder::new();
        builder.move_to(Vector2::new(0.0, 0.0));
        builder.line_to(Vector2::new(1.0, 0.0)).unwrap();
        builder.line_to(Vector2::new(1.0, 0.0)).unwrap();
        builder.line_to(Vector2::new(1.0, 1.0)).unwrap();
        let paths = builder.finish();

        assert_eq!(paths.len(), 1);
        assert_eq!(
            paths[0].points(10),
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0)
            ]
        );
    }

    #[test]
    fn curves_are_sampled_per_division() {
        let mut builder = PathBuilder::new();
        builder.move_to(Vector2::new(0.0, 0.0));
        builder
            .quadratic_to(Vector2::new(1.0, 2.0), Vector2::new(2.0, 0.0))
            .unwrap();
        let points = builder.finish()[0].points(4);

        assert_eq!(points.len(), 5);
        assert_eq!(points[2], Vector2::new(1.0, 1.0));
        assert_eq!(points[4], Vector2::new(2.0, 0.0));
    }

    #[test]
    fn segment_without_move_is_rejected() {
        let mut builder = PathBuilder::new();
        assert!(builder.line_to(Vector2::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn move_starts_a_new_subpath() {
        let mut builder = PathBuilder::new();
        builder.move_to(Vector2::new(0.0, 0.0));
        builder.line_to(Vector2::new(1.0, 0.0)).unwrap();
        builder.move_to(Vector2::new(5.0, 5.0));
        builder.line_to(Vector2::new(6.0, 5.0)).unwrap();

        let paths = builder.finish();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].start, Vector2::new(5.0, 5.0));
    }
}
