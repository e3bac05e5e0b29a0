use crate::error::Result;
use crate::geometry::{Polygon, Segment};
use crate::math::predicates::{points_equal, same_or_opposite_direction};
use crate::math::Point3;
use crate::operations::assemble::assemble_polygons;
use crate::operations::merge::{dedupe_collinear, dedupe_points, fuse_point_touch, weave_segments};

use super::point::{classify_point, PointPolygonRelation};
use super::segment_polygon::{compare_segment_polygon, SegmentPolygonRelation};

/// Relative position of two polygon planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonPosition {
    /// Coplanar (within tolerance).
    Planar,
    /// Parallel but distinct planes.
    Parallel,
    /// Planes cross.
    NonPlanar,
}

/// How two polygons intersect.
#[derive(Debug, Clone)]
pub enum PolygonIntersection {
    /// Shared area, reassembled into closed polygons.
    AreaOverlap { polygons: Vec<Polygon> },
    /// Shared boundary stretches that do not close into an area.
    Boundary { segments: Vec<Segment> },
    /// Isolated shared points.
    Point { points: Vec<Point3> },
    /// No contact.
    NonIntersect,
}

/// Full comparison result: plane position plus intersection kind.
#[derive(Debug, Clone)]
pub struct PolygonComparison {
    pub position: PolygonPosition,
    pub intersection: PolygonIntersection,
}

/// Classifies the relation between two polygons.
///
/// # Errors
///
/// Propagates segment and point classification failures.
pub fn compare_polygons(a: &Polygon, b: &Polygon) -> Result<PolygonComparison> {
    let position = relative_position(a, b)?;
    let intersection = match position {
        PolygonPosition::Parallel => PolygonIntersection::NonIntersect,
        PolygonPosition::NonPlanar => non_planar_intersection(a, b)?,
        PolygonPosition::Planar => planar_intersection(a, b)?,
    };
    Ok(PolygonComparison {
        position,
        intersection,
    })
}

fn relative_position(a: &Polygon, b: &Polygon) -> Result<PolygonPosition> {
    if same_or_opposite_direction(a.normal(), b.normal()) {
        if classify_point(a, &b.vertices()[0])? == PointPolygonRelation::NonPlanar {
            return Ok(PolygonPosition::Parallel);
        }
        return Ok(PolygonPosition::Planar);
    }
    Ok(PolygonPosition::NonPlanar)
}

/// Crossing planes: B's edges pierce A's face at points, or cut across it
/// in stretches.
fn non_planar_intersection(a: &Polygon, b: &Polygon) -> Result<PolygonIntersection> {
    let mut points: Vec<Point3> = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();
    let mut face_hit = false;
    let mut overlap_hit = false;

    for edge in b.segments() {
        match compare_segment_polygon(a, edge)? {
            SegmentPolygonRelation::NonPlanarIntersectFace { point }
            | SegmentPolygonRelation::PerpendicularIntersectFace { point } => {
                face_hit = true;
                if !points.iter().any(|q| points_equal(q, &point)) {
                    points.push(point);
                }
            }
            SegmentPolygonRelation::OverlapOrIntersect {
                segments: stretch, ..
            } => {
                overlap_hit = true;
                segments.extend(stretch);
            }
            _ => {}
        }
    }

    if overlap_hit {
        if points.len() >= 4 {
            weave_segments(&mut segments, &points, b)?;
        }
        let segments = fuse_point_touch(&dedupe_collinear(&segments)?)?;
        return Ok(PolygonIntersection::Boundary { segments });
    }
    if face_hit {
        if points.len() >= 2 {
            let mut segments = Vec::new();
            weave_segments(&mut segments, &points, b)?;
            if !segments.is_empty() {
                return Ok(PolygonIntersection::Boundary { segments });
            }
        }
        return Ok(PolygonIntersection::Point { points });
    }
    Ok(PolygonIntersection::NonIntersect)
}

/// Coplanar polygons: collect the boundary stretches each polygon
/// contributes inside the other, then try to close them into overlap
/// polygons.
fn planar_intersection(a: &Polygon, b: &Polygon) -> Result<PolygonIntersection> {
    let mut overlap_hit = false;
    let mut point_hit = false;
    let mut segments: Vec<Segment> = Vec::new();
    let mut points: Vec<Point3> = Vec::new();

    for (host, other) in [(a, b), (b, a)] {
        for edge in host.segments() {
            match compare_segment_polygon(other, edge)? {
                SegmentPolygonRelation::Inside { segments: found }
                | SegmentPolygonRelation::OverlapOrIntersect {
                    segments: found, ..
                } => {
                    overlap_hit = true;
                    segments.extend(found);
                }
                SegmentPolygonRelation::Outside => {
                    for endpoint in [edge.start(), edge.end()] {
                        if matches!(
                            classify_point(other, endpoint)?,
                            PointPolygonRelation::Boundary | PointPolygonRelation::Node
                        ) {
                            points.push(*endpoint);
                            point_hit = true;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    if overlap_hit {
        let merged = fuse_point_touch(&dedupe_collinear(&segments)?)?;
        return match assemble_polygons(&merged) {
            Ok(polygons) => Ok(PolygonIntersection::AreaOverlap { polygons }),
            Err(_) => Ok(PolygonIntersection::Boundary { segments: merged }),
        };
    }
    if point_hit {
        return Ok(PolygonIntersection::Point {
            points: dedupe_points(&points),
        });
    }
    Ok(PolygonIntersection::NonIntersect)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::predicates::is_equal;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::from_points(&[
            p(x0, y0, 0.0),
            p(x0 + size, y0, 0.0),
            p(x0 + size, y0 + size, 0.0),
            p(x0, y0 + size, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn separated_coplanar_squares_do_not_intersect() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(20.0, 0.0, 10.0);
        let result = compare_polygons(&a, &b).unwrap();
        assert_eq!(result.position, PolygonPosition::Planar);
        assert!(matches!(
            result.intersection,
            PolygonIntersection::NonIntersect
        ));
    }

    #[test]
    fn parallel_planes_do_not_intersect() {
        let a = square(0.0, 0.0, 10.0);
        let b = Polygon::from_points(&[
            p(0.0, 0.0, 5.0),
            p(10.0, 0.0, 5.0),
            p(10.0, 10.0, 5.0),
            p(0.0, 10.0, 5.0),
        ])
        .unwrap();
        let result = compare_polygons(&a, &b).unwrap();
        assert_eq!(result.position, PolygonPosition::Parallel);
        assert!(matches!(
            result.intersection,
            PolygonIntersection::NonIntersect
        ));
    }

    #[test]
    fn edge_sharing_squares_touch_along_boundary() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(10.0, 0.0, 10.0);
        let result = compare_polygons(&a, &b).unwrap();
        assert_eq!(result.position, PolygonPosition::Planar);
        match result.intersection {
            PolygonIntersection::Boundary { segments } => {
                assert_eq!(segments.len(), 1);
                assert!(is_equal(segments[0].length(), 10.0));
            }
            other => panic!("expected Boundary, got {other:?}"),
        }
    }

    #[test]
    fn vertex_sharing_squares_touch_at_point() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(10.0, 10.0, 10.0);
        let result = compare_polygons(&a, &b).unwrap();
        match result.intersection {
            PolygonIntersection::Point { points } => {
                assert_eq!(points.len(), 1);
                assert!(points_equal(&points[0], &p(10.0, 10.0, 0.0)));
            }
            other => panic!("expected Point, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_squares_share_an_area() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let result = compare_polygons(&a, &b).unwrap();
        match result.intersection {
            PolygonIntersection::AreaOverlap { polygons } => {
                assert_eq!(polygons.len(), 1);
                assert_relative_eq!(polygons[0].area(), 25.0, epsilon = 1e-9);
                let expected = square(5.0, 5.0, 5.0);
                assert!(polygons[0].same_vertex_set(&expected));
            }
            other => panic!("expected AreaOverlap, got {other:?}"),
        }
    }

    #[test]
    fn contained_square_overlaps_with_itself_as_region() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(3.0, 0.0, 4.0); // shares a stretch of the bottom edge
        let result = compare_polygons(&a, &b).unwrap();
        match result.intersection {
            PolygonIntersection::AreaOverlap { polygons } => {
                assert!(polygons[0].same_vertex_set(&b));
            }
            other => panic!("expected AreaOverlap, got {other:?}"),
        }
    }

    #[test]
    fn crossing_planes_pierce_at_points() {
        let a = square(0.0, 0.0, 10.0);
        // Vertical rectangle in the XZ plane crossing A's interior along
        // y = 5, poking through at two edge piercings.
        let b = Polygon::from_points(&[
            p(2.0, 5.0, -1.0),
            p(8.0, 5.0, -1.0),
            p(8.0, 5.0, 4.0),
            p(2.0, 5.0, 4.0),
        ])
        .unwrap();
        let result = compare_polygons(&a, &b).unwrap();
        assert_eq!(result.position, PolygonPosition::NonPlanar);
        match result.intersection {
            PolygonIntersection::Boundary { segments } => {
                assert_eq!(segments.len(), 1);
                assert!(is_equal(segments[0].length(), 6.0));
            }
            other => panic!("expected Boundary, got {other:?}"),
        }
    }

    #[test]
    fn crossing_planes_clear_of_each_other() {
        let a = square(0.0, 0.0, 10.0);
        let b = Polygon::from_points(&[
            p(2.0, 5.0, 2.0),
            p(8.0, 5.0, 2.0),
            p(8.0, 5.0, 8.0),
            p(2.0, 5.0, 8.0),
        ])
        .unwrap();
        let result = compare_polygons(&a, &b).unwrap();
        assert_eq!(result.position, PolygonPosition::NonPlanar);
        assert!(matches!(
            result.intersection,
            PolygonIntersection::NonIntersect
        ));
    }
}
