use crate::error::{GeometryError, OperationError, Result};
use crate::math::predicates::{
    canonical_direction, is_zero, offset_point, points_equal, unit_vector, zyx_order,
};
use crate::math::{Point2, Point3, Vector3};

use super::plane::Plane;
use super::segment::Segment;

/// Iteration budget for chaining a segment bag into a closed loop.
pub const DEFAULT_MAX_CHAIN_STEPS: usize = 200;

/// An ordered closed loop of segments lying in one plane.
///
/// Built once; every derived metric is computed at construction. Transforms
/// such as [`Polygon::offset`] return a new instance instead of mutating.
#[derive(Debug, Clone)]
pub struct Polygon {
    segments: Vec<Segment>,
    vertices: Vec<Point3>,
    local_vertices: Vec<Point2>,
    plane: Plane,
    centroid: Point3,
    local_centroid: Point2,
    perimeter: f64,
    area: f64,
}

impl Polygon {
    /// Builds a polygon from an ordered vertex list.
    ///
    /// Consecutive vertices are joined and the loop is closed back to the
    /// first vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for fewer than 3 vertices,
    /// coincident consecutive vertices, or vertices off the supporting
    /// plane.
    pub fn from_points(points: &[Point3]) -> Result<Self> {
        if points.len() < 3 {
            return Err(
                GeometryError::Degenerate("polygon needs at least 3 vertices".into()).into(),
            );
        }
        let mut segments = Vec::with_capacity(points.len());
        for i in 0..points.len() {
            let j = (i + 1) % points.len();
            segments.push(Segment::new(points[i], points[j])?);
        }
        let plane = derive_plane(&segments)?;
        Self::build(segments, plane)
    }

    /// Builds a polygon from a segment bag with the default iteration
    /// budget.
    ///
    /// # Errors
    ///
    /// See [`Polygon::from_segments_bounded`].
    pub fn from_segments(segments: &[Segment]) -> Result<Self> {
        Self::from_segments_bounded(segments, DEFAULT_MAX_CHAIN_STEPS)
    }

    /// Builds a polygon by chaining a segment bag into a closed loop.
    ///
    /// The chain starts at the first segment and is extended by any segment
    /// sharing the open end, in either orientation, refusing to double back
    /// onto the segment it just came from.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NonClosableLoop`] when the chain fails to
    /// close within `max_iterations` extension rounds, and degeneracy
    /// errors as in [`Polygon::from_points`].
    pub fn from_segments_bounded(segments: &[Segment], max_iterations: usize) -> Result<Self> {
        let first = segments.first().ok_or_else(|| {
            GeometryError::Degenerate("cannot build a polygon from an empty segment list".into())
        })?;

        let mut chain: Vec<Segment> = vec![first.clone()];
        let mut steps = 0;
        loop {
            let open = *chain[chain.len() - 1].end();
            if points_equal(&open, chain[0].start()) {
                break;
            }
            steps += 1;
            if steps > max_iterations {
                return Err(OperationError::NonClosableLoop { max_iterations }.into());
            }
            let previous = *chain[chain.len() - 1].start();
            for candidate in segments {
                if points_equal(&open, candidate.start()) {
                    if points_equal(&previous, candidate.end()) {
                        continue;
                    }
                    chain.push(candidate.clone());
                    break;
                } else if points_equal(&open, candidate.end()) {
                    if points_equal(&previous, candidate.start()) {
                        continue;
                    }
                    chain.push(candidate.reversed());
                    break;
                }
            }
        }

        let plane = derive_plane(&chain)?;
        Self::build(chain, plane)
    }

    fn build(segments: Vec<Segment>, plane: Plane) -> Result<Self> {
        let vertices: Vec<Point3> = segments.iter().map(|s| *s.start()).collect();
        if vertices.len() < 3 {
            return Err(
                GeometryError::Degenerate("polygon needs at least 3 vertices".into()).into(),
            );
        }
        for vertex in &vertices {
            if !plane.contains(vertex) {
                return Err(GeometryError::Degenerate(
                    "polygon vertex lies off the supporting plane".into(),
                )
                .into());
            }
        }

        let mut local_vertices = Vec::with_capacity(vertices.len());
        for vertex in &vertices {
            local_vertices.push(plane.to_local(vertex)?);
        }

        let mut sum = Vector3::zeros();
        for vertex in &vertices {
            sum += vertex.coords;
        }
        #[allow(clippy::cast_precision_loss)]
        let centroid = Point3::from(sum / vertices.len() as f64);
        let local_centroid = plane.to_local(&centroid)?;

        let perimeter = segments.iter().map(Segment::length).sum();
        let area = shoelace_area(&local_vertices);

        Ok(Self {
            segments,
            vertices,
            local_vertices,
            plane,
            centroid,
            local_centroid,
            perimeter,
            area,
        })
    }

    /// Returns the ordered boundary segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the ordered vertices (each segment's start point).
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Returns the vertices in local `(u, v)` coordinates.
    #[must_use]
    pub fn local_vertices(&self) -> &[Point2] {
        &self.local_vertices
    }

    /// Returns the supporting plane frame.
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the plane normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        self.plane.normal()
    }

    /// Returns the vertex centroid.
    #[must_use]
    pub fn centroid(&self) -> &Point3 {
        &self.centroid
    }

    /// Returns the centroid's local image.
    #[must_use]
    pub fn local_centroid(&self) -> &Point2 {
        &self.local_centroid
    }

    /// Returns the boundary length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    /// Returns the enclosed area (absolute shoelace value).
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Even-odd crossing test on local coordinates with a bounding-box
    /// reject. Points exactly on the boundary are numerically unstable
    /// here; classification routes boundary detection first.
    #[must_use]
    pub fn contains_local(&self, point: &Point2) -> bool {
        let verts = &self.local_vertices;
        let mut min_u = verts[0].x;
        let mut max_u = verts[0].x;
        let mut min_v = verts[0].y;
        let mut max_v = verts[0].y;
        for q in &verts[1..] {
            min_u = min_u.min(q.x);
            max_u = max_u.max(q.x);
            min_v = min_v.min(q.y);
            max_v = max_v.max(q.y);
        }
        if point.x < min_u || point.x > max_u || point.y < min_v || point.y > max_v {
            return false;
        }

        let mut inside = false;
        let n = verts.len();
        let mut j = n - 1;
        for i in 0..n {
            if (verts[i].y > point.y) != (verts[j].y > point.y)
                && point.x
                    < (verts[j].x - verts[i].x) * (point.y - verts[i].y)
                        / (verts[j].y - verts[i].y)
                        + verts[i].x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Returns a copy translated along a direction by a distance, with all
    /// derived metrics recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the direction cannot be
    /// normalized.
    pub fn offset(&self, direction: &Vector3, distance: f64) -> Result<Self> {
        let dir = unit_vector(direction)?;
        let moved: Vec<Point3> = self
            .vertices
            .iter()
            .map(|p| offset_point(p, &dir, distance))
            .collect();
        Self::from_points(&moved)
    }

    /// Compares vertex sets under tolerance, ignoring loop orientation and
    /// starting vertex: both lists are sorted into canonical coordinate
    /// order first.
    #[must_use]
    pub fn same_vertex_set(&self, other: &Self) -> bool {
        if self.vertices.len() != other.vertices.len() {
            return false;
        }
        let mut a = self.vertices.clone();
        let mut b = other.vertices.clone();
        a.sort_by(|p, q| zyx_order(p, q));
        b.sort_by(|p, q| zyx_order(p, q));
        a.iter().zip(b.iter()).all(|(p, q)| points_equal(p, q))
    }

    /// Builds a measurement frame at the centroid from a user-chosen
    /// in-plane axis. The canonical plane frame is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidPrecondition`] if the axis is not
    /// perpendicular to the polygon normal.
    pub fn manual_frame(&self, axis: &Vector3, is_x_axis: bool) -> Result<Plane> {
        let normal = self.normal();
        if !is_zero(axis.dot(normal)) {
            return Err(OperationError::InvalidPrecondition(
                "axis is not perpendicular to the polygon normal".into(),
            )
            .into());
        }
        let (x_axis, y_axis) = if is_x_axis {
            let x = unit_vector(axis)?;
            let y = unit_vector(&x.cross(normal))?;
            (x, y)
        } else {
            let y = unit_vector(axis)?;
            let x = unit_vector(&y.cross(normal))?;
            (x, y)
        };
        Plane::new(
            self.centroid,
            canonical_direction(&x_axis),
            canonical_direction(&y_axis),
        )
    }

    /// Width and height of the vertex set measured along a user-chosen
    /// in-plane axis pair.
    ///
    /// # Errors
    ///
    /// Propagates [`Polygon::manual_frame`] errors.
    pub fn dimensions_along(&self, axis: &Vector3, is_x_axis: bool) -> Result<(f64, f64)> {
        let frame = self.manual_frame(axis, is_x_axis)?;
        let mut min_u = 0.0_f64;
        let mut max_u = 0.0_f64;
        let mut min_v = 0.0_f64;
        let mut max_v = 0.0_f64;
        for vertex in &self.vertices {
            let local = frame.to_local(vertex)?;
            min_u = min_u.min(local.x);
            max_u = max_u.max(local.x);
            min_v = min_v.min(local.y);
            max_v = max_v.max(local.y);
        }
        Ok((max_u - min_u, max_v - min_v))
    }

    /// Minimum and maximum corner points of the vertex set in a manual
    /// frame, mapped back to 3D.
    ///
    /// # Errors
    ///
    /// Propagates [`Polygon::manual_frame`] errors.
    pub fn extent_points_along(
        &self,
        axis: &Vector3,
        is_x_axis: bool,
    ) -> Result<(Point3, Point3)> {
        let frame = self.manual_frame(axis, is_x_axis)?;
        let mut min_u = 0.0_f64;
        let mut max_u = 0.0_f64;
        let mut min_v = 0.0_f64;
        let mut max_v = 0.0_f64;
        for vertex in &self.vertices {
            let local = frame.to_local(vertex)?;
            min_u = min_u.min(local.x);
            max_u = max_u.max(local.x);
            min_v = min_v.min(local.y);
            max_v = max_v.max(local.y);
        }
        Ok((
            frame.from_local(&Point2::new(min_u, min_v)),
            frame.from_local(&Point2::new(max_u, max_v)),
        ))
    }

    /// Symmetric extent corners around the centroid in a manual frame:
    /// `(-max|u|, -max|v|)` and `(max|u|, max|v|)` mapped back to 3D.
    ///
    /// # Errors
    ///
    /// Propagates [`Polygon::manual_frame`] errors.
    pub fn symmetric_extent_along(
        &self,
        axis: &Vector3,
        is_x_axis: bool,
    ) -> Result<(Point3, Point3)> {
        let frame = self.manual_frame(axis, is_x_axis)?;
        let mut max_u = 0.0_f64;
        let mut max_v = 0.0_f64;
        for vertex in &self.vertices {
            let local = frame.to_local(vertex)?;
            max_u = max_u.max(local.x.abs());
            max_v = max_v.max(local.y.abs());
        }
        Ok((
            frame.from_local(&Point2::new(-max_u, -max_v)),
            frame.from_local(&Point2::new(max_u, max_v)),
        ))
    }

    /// Returns the canonically-oriented edge direction that is greatest in
    /// canonical coordinate order.
    #[must_use]
    pub fn top_direction(&self) -> Vector3 {
        let mut directions: Vec<Vector3> = self
            .segments
            .iter()
            .map(|s| canonical_direction(&s.direction()))
            .collect();
        directions.sort_by(|a, b| zyx_order(&Point3::from(*a), &Point3::from(*b)));
        directions[directions.len() - 1]
    }
}

/// Derives the supporting plane of a closed chain: origin at the first
/// vertex, X along the first edge, Y scaffolded from the cross product of
/// the first and last edge directions.
fn derive_plane(chain: &[Segment]) -> Result<Plane> {
    let origin = *chain[0].start();
    let x_axis = chain[0].direction();
    let closing = chain[chain.len() - 1].direction();
    let scaffold = unit_vector(&x_axis.cross(&closing))?;
    let y_axis = unit_vector(&x_axis.cross(&scaffold))?;
    Plane::new(origin, x_axis, y_axis)
}

/// Absolute shoelace area over local coordinates.
fn shoelace_area(local: &[Point2]) -> f64 {
    let n = local.len();
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += local[i].x * local[j].y - local[i].y * local[j].x;
    }
    (sum / 2.0).abs()
}
