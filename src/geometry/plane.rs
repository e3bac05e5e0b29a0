use crate::error::{GeometryError, OperationError, Result};
use crate::math::predicates::{is_zero, offset_point, points_equal, unit_vector};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

use super::polygon::Polygon;
use super::segment::Segment;

/// An oriented plane frame in 3D space.
///
/// Defined by an origin point and two orthonormal in-plane axes; the normal
/// is derived as `x_axis × y_axis`.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    x_axis: Vector3,
    y_axis: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane from an origin and two in-plane axes.
    ///
    /// The axes are unitized; the normal is their cross product.
    ///
    /// # Errors
    ///
    /// Returns an error if either axis is zero-length or the axes are
    /// parallel.
    pub fn new(origin: Point3, x_axis: Vector3, y_axis: Vector3) -> Result<Self> {
        let x_axis = unit_vector(&x_axis)?;
        let y_axis = unit_vector(&y_axis)?;

        let normal = x_axis.cross(&y_axis);
        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::Degenerate("plane axes are parallel".into()).into());
        }

        Ok(Self {
            origin,
            x_axis,
            y_axis,
            normal: normal / normal_len,
        })
    }

    /// Creates a plane from a normal and a chosen in-plane X axis.
    ///
    /// The Y axis is derived as `x_axis × normal`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidPrecondition`] if the axis is not
    /// perpendicular to the normal, or a degeneracy error for zero-length
    /// input.
    pub fn from_normal_with_x(origin: Point3, normal: Vector3, x_axis: Vector3) -> Result<Self> {
        if !is_zero(x_axis.dot(&normal)) {
            return Err(OperationError::InvalidPrecondition(
                "x axis is not perpendicular to the plane normal".into(),
            )
            .into());
        }
        let y_axis = unit_vector(&x_axis.cross(&normal))?;
        Self::new(origin, x_axis, y_axis)
    }

    /// Creates a plane from a normal and a chosen in-plane Y axis.
    ///
    /// The X axis is derived as `y_axis × normal`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidPrecondition`] if the axis is not
    /// perpendicular to the normal, or a degeneracy error for zero-length
    /// input.
    pub fn from_normal_with_y(origin: Point3, normal: Vector3, y_axis: Vector3) -> Result<Self> {
        if !is_zero(y_axis.dot(&normal)) {
            return Err(OperationError::InvalidPrecondition(
                "y axis is not perpendicular to the plane normal".into(),
            )
            .into());
        }
        let x_axis = unit_vector(&y_axis.cross(&normal))?;
        Self::new(origin, x_axis, y_axis)
    }

    /// Returns the origin point.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit X axis.
    #[must_use]
    pub fn x_axis(&self) -> &Vector3 {
        &self.x_axis
    }

    /// Returns the unit Y axis.
    #[must_use]
    pub fn y_axis(&self) -> &Vector3 {
        &self.y_axis
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Distance from a point to the plane, reported as an unsigned
    /// magnitude. The side of the plane is not encoded; [`Self::project_point`]
    /// disambiguates it by testing both candidates.
    #[must_use]
    pub fn distance_to(&self, point: &Point3) -> f64 {
        self.normal.dot(&(point - self.origin)).abs()
    }

    /// Checks whether a point lies in the plane within tolerance.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        is_zero(self.distance_to(point))
    }

    /// Projects a point onto the plane.
    ///
    /// Offsets along the normal by the unsigned distance and keeps the
    /// candidate that lands in-plane.
    #[must_use]
    pub fn project_point(&self, point: &Point3) -> Point3 {
        let d = self.distance_to(point);
        let candidate = offset_point(point, &self.normal, d);
        if self.contains(&candidate) {
            candidate
        } else {
            offset_point(point, &self.normal, -d)
        }
    }

    /// Projects a segment onto the plane endpoint by endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the projections coincide
    /// (the segment is perpendicular to the plane).
    pub fn project_segment(&self, segment: &Segment) -> Result<Segment> {
        Segment::new(
            self.project_point(segment.start()),
            self.project_point(segment.end()),
        )
    }

    /// Projects a polygon onto the plane segment by segment.
    ///
    /// # Errors
    ///
    /// Returns an error if any projected segment degenerates or the
    /// projected boundary no longer closes.
    pub fn project_polygon(&self, polygon: &Polygon) -> Result<Polygon> {
        let mut segments = Vec::with_capacity(polygon.segments().len());
        for segment in polygon.segments() {
            segments.push(self.project_segment(segment)?);
        }
        Polygon::from_segments(&segments)
    }

    /// Maps a point to its local `(u, v)` coordinates.
    ///
    /// The point is projected into the plane first when off-plane. The
    /// coordinates are solved indirectly: the perpendicular distances to
    /// the auxiliary planes spanned by (y, normal) and (x, normal) give the
    /// magnitudes of `u` and `v`, and the four sign combinations are tested
    /// against the projected point.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::AmbiguousGeometry`] if no sign combination
    /// reproduces the projected point.
    pub fn to_local(&self, point: &Point3) -> Result<Point2> {
        let point = if self.contains(point) {
            *point
        } else {
            self.project_point(point)
        };

        let plane_ox = Self::new(self.origin, self.x_axis, self.normal)?;
        let plane_oy = Self::new(self.origin, self.y_axis, self.normal)?;
        let len_u = plane_oy.distance_to(&point);
        let len_v = plane_ox.distance_to(&point);

        for su in [-1.0, 1.0] {
            for sv in [-1.0, 1.0] {
                let u = su * len_u;
                let v = sv * len_v;
                let candidate =
                    offset_point(&offset_point(&self.origin, &self.x_axis, u), &self.y_axis, v);
                if points_equal(&candidate, &point) {
                    return Ok(Point2::new(u, v));
                }
            }
        }
        Err(OperationError::AmbiguousGeometry(
            "no local coordinate sign combination reproduces the projected point".into(),
        )
        .into())
    }

    /// Maps local `(u, v)` coordinates back to a 3D point.
    #[must_use]
    pub fn from_local(&self, local: &Point2) -> Point3 {
        offset_point(
            &offset_point(&self.origin, &self.x_axis, local.x),
            &self.y_axis,
            local.y,
        )
    }
}
