use crate::error::Result;
use crate::geometry::Polygon;
use crate::math::predicates::{is_zero, local_points_equal, opposite_direction_2d};
use crate::math::{Point2, Point3};

/// Position of a point relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointPolygonRelation {
    /// Strictly inside the boundary loop.
    Inside,
    /// In the polygon's plane but outside the loop.
    Outside,
    /// On an edge interior.
    Boundary,
    /// Coincides with a polygon vertex.
    Node,
    /// Off the polygon's plane.
    NonPlanar,
}

/// Classifies a 3D point against a polygon.
///
/// Off-plane points are `NonPlanar`; in-plane points are classified on
/// their local image.
///
/// # Errors
///
/// Propagates local-coordinate solve failures.
pub fn classify_point(polygon: &Polygon, point: &Point3) -> Result<PointPolygonRelation> {
    if !is_zero(polygon.plane().distance_to(point)) {
        return Ok(PointPolygonRelation::NonPlanar);
    }
    let local = polygon.plane().to_local(point)?;
    Ok(classify_local(polygon, &local))
}

/// Classifies a local-coordinate point against a polygon.
///
/// Vertex coincidence wins over everything; an edge hit (the point sees two
/// adjacent vertices in opposite directions) wins over the crossing test,
/// which is numerically unstable exactly on edges.
#[must_use]
pub fn classify_local(polygon: &Polygon, point: &Point2) -> PointPolygonRelation {
    let verts = polygon.local_vertices();
    let n = verts.len();
    for i in 0..n {
        if local_points_equal(point, &verts[i]) {
            return PointPolygonRelation::Node;
        }
        let next = &verts[(i + 1) % n];
        if local_points_equal(point, next) {
            continue;
        }
        if opposite_direction_2d(&(point - verts[i]), &(point - next)) {
            return PointPolygonRelation::Boundary;
        }
    }
    if polygon.contains_local(point) {
        PointPolygonRelation::Inside
    } else {
        PointPolygonRelation::Outside
    }
}
