use cgmath::{Point3, Vector3};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    /// Smallest box around `points`, `None` when there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(
            Aabb {
                min: first,
                max: first,
            },
            |bounds, p| Aabb {
                min: Point3::new(
                    bounds.min.x.min(p.x),
                    bounds.min.y.min(p.y),
                    bounds.min.z.min(p.z),
                ),
                max: Point3::new(
                    bounds.max.x.max(p.x),
                    bounds.max.y.max(p.y),
                    bounds.max.z.max(p.z),
                ),
            },
        ))
    }

    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }
}
