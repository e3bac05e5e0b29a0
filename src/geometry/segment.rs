use crate::error::{GeometryError, Result};
use crate::math::predicates::{
    distance, offset_point, opposite_direction, points_equal, same_direction,
    same_or_opposite_direction, unit_vector,
};
use crate::math::{Point3, Vector3};

/// A bounded line segment between two distinct points.
///
/// The endpoints are ordered; `direction` always points from `start` to
/// `end`.
#[derive(Debug, Clone)]
pub struct Segment {
    start: Point3,
    end: Point3,
}

impl Segment {
    /// Creates a new segment between two points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the endpoints coincide
    /// within tolerance.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if points_equal(&start, &end) {
            return Err(GeometryError::Degenerate(format!(
                "zero-length segment at ({}, {}, {})",
                start.x, start.y, start.z
            ))
            .into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        let d = self.end - self.start;
        d / d.norm()
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// Returns the segment with swapped endpoints.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Checks whether a point lies on the segment, endpoints included.
    ///
    /// A point strictly between the endpoints sees them in opposite
    /// directions.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        if points_equal(point, &self.start) || points_equal(point, &self.end) {
            return true;
        }
        opposite_direction(&(point - self.start), &(point - self.end))
    }

    /// Checks whether a point lies on the carrier line but outside the
    /// segment bounds.
    #[must_use]
    pub fn on_extension(&self, point: &Point3) -> bool {
        if points_equal(point, &self.start) || points_equal(point, &self.end) {
            return true;
        }
        same_direction(&(point - self.start), &(point - self.end))
    }

    /// Checks whether a point lies anywhere on the carrier line.
    #[must_use]
    pub fn on_line(&self, point: &Point3) -> bool {
        if points_equal(point, &self.start) || points_equal(point, &self.end) {
            return true;
        }
        same_or_opposite_direction(&(point - self.start), &(point - self.end))
    }

    /// Projects a point onto the carrier line.
    #[must_use]
    pub fn project_point(&self, point: &Point3) -> Point3 {
        if self.on_line(point) {
            return *point;
        }
        let dir = self.direction();
        let t = (point - self.start).dot(&dir);
        offset_point(&self.start, &dir, t)
    }

    /// Distance from a point to the carrier line; zero when the point lies
    /// on the line within tolerance.
    #[must_use]
    pub fn distance_to(&self, point: &Point3) -> f64 {
        if self.on_line(point) {
            return 0.0;
        }
        distance(point, &self.project_point(point))
    }

    /// Returns a copy translated along a direction by a distance.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the direction cannot be
    /// normalized.
    pub fn offset(&self, direction: &Vector3, distance: f64) -> Result<Self> {
        let dir = unit_vector(direction)?;
        Ok(Self {
            start: offset_point(&self.start, &dir, distance),
            end: offset_point(&self.end, &dir, distance),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::predicates::is_equal;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn rejects_zero_length() {
        assert!(Segment::new(p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn direction_and_length() {
        let s = Segment::new(p(0.0, 0.0, 0.0), p(3.0, 4.0, 0.0)).unwrap();
        assert!(is_equal(s.length(), 5.0));
        let d = s.direction();
        assert!(is_equal(d.x, 0.6));
        assert!(is_equal(d.y, 0.8));
    }

    #[test]
    fn containment_distinguishes_bounds_and_extension() {
        let s = Segment::new(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)).unwrap();
        assert!(s.contains(&p(5.0, 0.0, 0.0)));
        assert!(s.contains(&p(0.0, 0.0, 0.0)));
        assert!(!s.contains(&p(11.0, 0.0, 0.0)));
        assert!(s.on_extension(&p(11.0, 0.0, 0.0)));
        assert!(!s.on_extension(&p(5.0, 0.0, 0.0)));
        assert!(s.on_line(&p(-3.0, 0.0, 0.0)));
        assert!(!s.on_line(&p(5.0, 1.0, 0.0)));
    }

    #[test]
    fn projection_and_distance() {
        let s = Segment::new(p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)).unwrap();
        let q = s.project_point(&p(4.0, 3.0, 0.0));
        assert!(points_equal(&q, &p(4.0, 0.0, 0.0)));
        assert!(is_equal(s.distance_to(&p(4.0, 3.0, 0.0)), 3.0));
        assert!(is_equal(s.distance_to(&p(20.0, 0.0, 0.0)), 0.0));
    }

    #[test]
    fn offset_translates_both_endpoints() {
        let s = Segment::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)).unwrap();
        let moved = s.offset(&Vector3::new(0.0, 0.0, 2.0), 1.5).unwrap();
        assert!(points_equal(moved.start(), &p(0.0, 0.0, 1.5)));
        assert!(points_equal(moved.end(), &p(1.0, 0.0, 1.5)));
    }
}
